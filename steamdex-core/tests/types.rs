use steamdex_core::*;

#[test]
fn game_record_uses_store_field_names() {
    let record = GameRecord {
        id: 10,
        name: "Counter-Strike".to_string(),
        top_tags: vec!["Action".to_string()],
        ..GameRecord::default()
    };
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["ID"], 10);
    assert_eq!(json["Name"], "Counter-Strike");
    assert_eq!(json["TopTags"][0], "Action");
    assert!(json.get("LanguagesSub").is_some());
    assert!(json.get("DayPeak").is_some());
}

#[test]
fn legacy_entry_with_missing_fields_loads() {
    let record: GameRecord =
        serde_json::from_str(r#"{"ID": 20, "Name": "Team Fortress Classic", "Price": "$4.99"}"#)
            .unwrap();
    assert_eq!(record.id, 20);
    assert_eq!(record.price, "$4.99");

    let missing = record.missing_fields();
    assert!(missing.contains(&"Developer"));
    assert!(missing.contains(&"LanguagesSub"));
    assert!(!missing.contains(&"Name"));
}

#[test]
fn fetch_failure_entry_serializes_without_details() {
    let entry = RejectedEntry::fetch_failed(30);
    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["Name"], INVALID_GAME_NAME);
    assert_eq!(json["Reason"], "fetch_failed");
    assert!(json.get("Details").is_none());
}

#[test]
fn rejected_entry_projects_to_id_and_name() {
    let record = GameRecord {
        id: 40,
        name: "Day of Defeat".to_string(),
        ..GameRecord::default()
    };
    let invalid = RejectedEntry::incomplete(record).to_invalid();
    assert_eq!(
        invalid,
        InvalidGameRecord {
            id: 40,
            name: "Day of Defeat".to_string()
        }
    );
    let json = serde_json::to_value(&invalid).unwrap();
    assert_eq!(json.as_object().unwrap().len(), 2);
}

#[test]
fn details_envelope_parses_failure_indicator() {
    let env: AppDetailsEnvelope = serde_json::from_str(r#"{"success": false}"#).unwrap();
    assert!(!env.success);
    assert!(env.data.is_none());
}

#[test]
fn stats_accept_empty_tag_list() {
    let stats: AppStats =
        serde_json::from_str(r#"{"positive": 3, "negative": 1, "ccu": 0, "tags": []}"#).unwrap();
    assert_eq!(stats.positive, 3);
    assert!(stats.tags.is_empty());

    let stats: AppStats =
        serde_json::from_str(r#"{"tags": {"Action": 12, "Indie": 4}}"#).unwrap();
    assert_eq!(stats.tags.get("Action"), Some(&12));
    assert_eq!(stats.positive, 0);
}
