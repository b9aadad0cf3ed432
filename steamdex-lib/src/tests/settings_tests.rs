use super::*;

#[test]
fn empty_file_gives_defaults() {
    let settings = Settings::parse("").unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.crawl.batch_size, 100);
    assert_eq!(settings.crawl.workers, 2);
    assert_eq!(settings.crawl.region, "US");
    assert_eq!(settings.retry.max_retries, 10);
}

#[test]
fn partial_tables_keep_other_defaults() {
    let settings = Settings::parse(
        r#"
[paths]
data_dir = "/srv/steam"

[crawl]
workers = 4
region = "DE"

[retry]
max_throttle_retries = 5

[endpoints]
spy_api = "http://localhost:9000/api.php"
"#,
    )
    .unwrap();

    assert_eq!(settings.paths.data_dir, Some(PathBuf::from("/srv/steam")));
    assert_eq!(settings.crawl.workers, 4);
    assert_eq!(settings.crawl.batch_size, 100);
    assert_eq!(settings.retry.max_throttle_retries, 5);
    assert_eq!(settings.retry.throttle_wait_ms, 5_000);
    assert_eq!(settings.endpoints.spy_api, "http://localhost:9000/api.php");
    assert_eq!(settings.endpoints.app_details, Endpoints::default().app_details);

    let client = settings.client_options();
    assert_eq!(client.region, "DE");
    assert_eq!(client.spy_policy.min_request_interval_ms, 1_000);
    assert_eq!(client.store_policy.min_request_interval_ms, 0);
    assert_eq!(settings.crawl_options().workers, 4);
}

#[test]
fn unknown_types_are_rejected() {
    assert!(matches!(
        Settings::parse("[crawl]\nworkers = \"many\"\n"),
        Err(SettingsError::Parse(_))
    ));
}

#[test]
fn data_dir_priority() {
    let mut settings = Settings::default();
    settings.paths.data_dir = Some(PathBuf::from("/from/settings"));
    assert_eq!(
        settings.data_dir(Some(PathBuf::from("/from/cli"))),
        PathBuf::from("/from/cli")
    );
    assert_eq!(settings.data_dir(None), PathBuf::from("/from/settings"));
}

#[test]
fn save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cfg").join("settings.toml");
    let mut settings = Settings::default();
    settings.crawl.batch_size = 25;
    settings.save_to(&path).unwrap();

    assert!(!path.with_extension("toml.tmp").exists());
    assert_eq!(Settings::load_from(&path).unwrap().crawl.batch_size, 25);
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::load_from(&dir.path().join("nope.toml")).unwrap();
    assert_eq!(settings, Settings::default());
}
