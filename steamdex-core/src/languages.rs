//! Parser for the Store's `supported_languages` field.
//!
//! The field is an HTML fragment such as
//! ```text
//! English<strong>*</strong>, French, German<strong>*</strong><br><strong>*</strong>languages with full audio support
//! ```
//! An asterisk marks a language with full audio; every listed language has
//! at least interface/subtitle support.

/// Placeholder used when a language list comes out empty.
pub const NOT_AVAILABLE: &str = "Not available";

const FULL_AUDIO_NOTE: &str = "languages with full audio support";

/// Subtitle and full-audio languages extracted from the annotated text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Languages {
    /// Every listed language.
    pub subtitles: Vec<String>,
    /// Languages marked with an asterisk.
    pub full_audio: Vec<String>,
}

/// Parse an annotated language list.
///
/// Both lists fall back to `["Not available"]` when empty.
///
/// # Examples
///
/// ```
/// use steamdex_core::languages::parse_supported_languages;
///
/// let langs = parse_supported_languages("English<strong>*</strong>, French");
/// assert_eq!(langs.subtitles, vec!["English", "French"]);
/// assert_eq!(langs.full_audio, vec!["English"]);
/// ```
pub fn parse_supported_languages(raw: &str) -> Languages {
    let text = strip_tags(strip_audio_note(raw));

    let mut subtitles = Vec::new();
    let mut full_audio = Vec::new();
    for part in text.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let name = part.trim_matches('*').trim();
        if name.is_empty() {
            continue;
        }
        if part.contains('*') {
            full_audio.push(name.to_string());
        }
        subtitles.push(name.to_string());
    }

    Languages {
        subtitles: or_not_available(subtitles),
        full_audio: or_not_available(full_audio),
    }
}

/// Cut the trailing "languages with full audio support" legend, including
/// the `<br>` that introduces it.
fn strip_audio_note(raw: &str) -> &str {
    let lower = raw.to_ascii_lowercase();
    let Some(note) = lower.find(FULL_AUDIO_NOTE) else {
        return raw;
    };
    let cut = lower[..note].rfind("<br").unwrap_or(note);
    &raw[..cut]
}

/// Remove every `<...>` tag, keeping the text between them.
fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

fn or_not_available(list: Vec<String>) -> Vec<String> {
    if list.is_empty() {
        vec![NOT_AVAILABLE.to_string()]
    } else {
        list
    }
}

#[cfg(test)]
#[path = "tests/languages_tests.rs"]
mod tests;
