use super::*;
use crate::types::RejectReason;
use crate::upstream::{PriceOverview, ReleaseDate};
use indexmap::IndexMap;

fn details() -> AppDetails {
    AppDetails {
        name: Some("Half-Life".to_string()),
        header_image: Some("https://cdn.example/hl.jpg".to_string()),
        developers: vec!["Valve".to_string()],
        publishers: vec!["Valve".to_string()],
        supported_languages: Some("English<strong>*</strong>, French".to_string()),
        short_description: Some("Named Game of the Year".to_string()),
        release_date: Some(ReleaseDate {
            coming_soon: false,
            date: Some("8 Nov, 1998".to_string()),
        }),
        platforms: [
            ("windows".to_string(), true),
            ("mac".to_string(), false),
            ("linux".to_string(), true),
        ]
        .into_iter()
        .collect(),
        ..AppDetails::default()
    }
}

fn priced(formatted: Option<&str>) -> PriceOverview {
    PriceOverview {
        final_formatted: formatted.map(str::to_string),
        ..PriceOverview::default()
    }
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

// ── Price fallback chain ────────────────────────────────────────────────────

#[test]
fn free_wins_over_every_other_price_field() {
    let mut d = details();
    d.is_free = true;
    d.price_overview = Some(priced(Some("$9.99")));
    d.release_date = Some(ReleaseDate {
        coming_soon: true,
        date: None,
    });
    d.packages = vec![serde_json::json!({"price": "$1.00"})];
    assert_eq!(resolve_price(&d), PRICE_FREE);
}

#[test]
fn price_block_uses_formatted_value() {
    let mut d = details();
    d.price_overview = Some(priced(Some("$9.99")));
    assert_eq!(resolve_price(&d), "$9.99");
}

#[test]
fn price_block_without_formatted_value() {
    let mut d = details();
    d.price_overview = Some(priced(None));
    assert_eq!(resolve_price(&d), PRICE_UNFORMATTED);
}

#[test]
fn coming_soon_without_price_block() {
    let mut d = details();
    d.release_date = Some(ReleaseDate {
        coming_soon: true,
        date: Some("Coming soon".to_string()),
    });
    d.packages = vec![serde_json::json!({"price": "$1.00"})];
    assert_eq!(resolve_price(&d), PRICE_COMING_SOON);
}

#[test]
fn package_price_is_last_resort() {
    let mut d = details();
    d.packages = vec![serde_json::json!(12345), serde_json::json!({"price": "$4.99"})];
    assert_eq!(resolve_price(&d), "$4.99");
}

#[test]
fn no_price_information_at_all() {
    let mut d = details();
    d.packages = vec![serde_json::json!(12345)];
    assert_eq!(resolve_price(&d), PRICE_NOT_AVAILABLE);
}

// ── Completeness ────────────────────────────────────────────────────────────

#[test]
fn unknown_developer_is_incomplete() {
    assert!(!is_complete(&names(&["Unknown"]), &names(&["Acme"])));
}

#[test]
fn real_developer_and_publisher_is_complete() {
    assert!(is_complete(&names(&["Acme"]), &names(&["Acme"])));
}

#[test]
fn blank_entries_do_not_count() {
    assert!(!is_complete(&names(&["", "  "]), &names(&["Acme"])));
    assert!(!is_complete(&names(&["Acme"]), &[]));
}

#[test]
fn any_real_name_in_list_is_enough() {
    assert!(is_complete(&names(&["Unknown", "Acme"]), &names(&["", "Acme"])));
}

// ── Non-game filter ─────────────────────────────────────────────────────────

#[test]
fn trailer_without_description_is_not_a_game() {
    let mut d = details();
    d.name = Some("Portal 2 Launch TRAILER".to_string());
    d.short_description = Some(String::new());
    assert!(is_non_game(&d));
}

#[test]
fn trailer_with_description_is_kept() {
    let mut d = details();
    d.name = Some("Trailer Park Simulator".to_string());
    assert!(!is_non_game(&d));
}

// ── Record building ─────────────────────────────────────────────────────────

#[test]
fn builds_full_record() {
    let mut tags = IndexMap::new();
    tags.insert("FPS".to_string(), 900);
    tags.insert("Classic".to_string(), 1200);
    let stats = AppStats {
        positive: 100,
        negative: 5,
        ccu: 42,
        tags,
    };

    let record = build_record(70, &details(), &stats);
    assert_eq!(record.id, 70);
    assert_eq!(record.name, "Half-Life");
    assert_eq!(record.developer, "Valve");
    assert_eq!(record.price, PRICE_NOT_AVAILABLE);
    assert_eq!(record.positive_reviews, 100);
    assert_eq!(record.negative_reviews, 5);
    assert_eq!(record.day_peak, 42);
    assert_eq!(record.top_tags, vec!["Classic", "FPS"]);
    assert_eq!(record.languages_sub, vec!["English", "French"]);
    assert_eq!(record.languages_audio, vec!["English"]);
    assert_eq!(record.release_date, "8 Nov, 1998");
    assert_eq!(record.platforms, "windows, linux");
    assert!(record.missing_fields().is_empty());
}

#[test]
fn missing_fields_get_defaults() {
    let record = build_record(1, &AppDetails::default(), &AppStats::default());
    assert_eq!(record.name, UNKNOWN);
    assert_eq!(record.developer, UNKNOWN);
    assert_eq!(record.publisher, UNKNOWN);
    assert_eq!(record.image_url, "No image available");
    assert_eq!(record.short_desc, "No description available");
    assert_eq!(record.release_date, UNKNOWN);
    assert_eq!(record.languages_sub, vec![NOT_AVAILABLE]);
    assert_eq!(record.languages_audio, vec![NOT_AVAILABLE]);
    assert!(record.top_tags.is_empty());
    assert_eq!(record.platforms, "");
}

#[test]
fn text_fields_are_unescaped() {
    let mut d = details();
    d.name = Some("Tom &amp; Jerry&#39;s".to_string());
    let record = build_record(5, &d, &AppStats::default());
    assert_eq!(record.name, "Tom & Jerry's");
}

#[test]
fn html_named_entities_are_decoded() {
    assert_eq!(unescape_html("Tom &amp; Jerry&nbsp;Party"), "Tom & Jerry\u{a0}Party");
    assert_eq!(unescape_html("Grand Theft Auto&reg; V"), "Grand Theft Auto\u{ae} V");
    assert_eq!(unescape_html("Portal&trade; &ndash; Still Alive"), "Portal\u{2122} \u{2013} Still Alive");
}

#[test]
fn unresolvable_references_do_not_block_the_rest() {
    assert_eq!(unescape_html("A & B &amp; C"), "A & B & C");
    assert_eq!(unescape_html("&bogus; &lt;3"), "&bogus; <3");
    assert_eq!(unescape_html("R&D"), "R&D");
}

#[test]
fn escaped_description_is_decoded_in_record() {
    let mut d = details();
    d.short_description = Some("Fast&nbsp;paced &mdash; &quot;fun&quot;".to_string());
    let record = build_record(5, &d, &AppStats::default());
    assert_eq!(record.short_desc, "Fast\u{a0}paced \u{2014} \"fun\"");
}

#[test]
fn incomplete_classification_keeps_full_record() {
    let mut d = details();
    d.publishers.clear();
    let classified = classify(9, &d, &AppStats::default());
    assert!(matches!(classified, Classification::Incomplete(_)));

    let rejected = classified.into_result().unwrap_err();
    assert_eq!(rejected.reason, RejectReason::Incomplete);
    assert_eq!(rejected.name, "Half-Life");
    assert_eq!(rejected.details.as_ref().map(|r| r.id), Some(9));
}

#[test]
fn complete_classification_is_ok() {
    let classified = classify(9, &details(), &AppStats::default());
    assert_eq!(classified.record().publisher, "Valve");
    assert!(classified.into_result().is_ok());
}
