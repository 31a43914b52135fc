use sentinel::{AppConfig, Category, CategoryCaps, Dataset, Matcher, SentinelError};
use std::io::Write;
use std::sync::Arc;
use tempfile::{tempdir, NamedTempFile};

#[test]
fn sparse_dataset_file_loads_and_searches() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "users": [{{"id": "1", "name": "Nadia Hassan", "visibleId": "900001"}}],
            "devices": [
                {{"id": "1", "name": "Dock Gate", "location": "Loading Bay"}},
                {{"id": "2", "name": "Lab Door", "ipAddress": "10.0.0.42"}}
            ],
            "userGroups": [{{"id": "1", "name": "Night Crew"}}],
            "cardTemplates": [{{"id": "1", "name": "Dock Pass", "cardType": "Contractor"}}]
        }}"#
    )
    .unwrap();

    let data = Dataset::load(file.path()).unwrap();
    assert_eq!(data.count(Category::User), 1);
    assert_eq!(data.count(Category::Device), 2);
    assert!(data.recent_actions.is_empty());
    assert!(data.users[0].avatar.is_none());

    let matcher = Matcher::new(Arc::new(data), CategoryCaps::default());
    let dock = matcher.search("dock");
    let ids: Vec<&str> = dock.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["device-1", "template-1"]);

    let ip = matcher.search(" 10.0.0.4 ");
    assert_eq!(ip.len(), 1);
    assert_eq!(ip[0].title, "Lab Door");

    // Absent descriptions are skipped, never an error.
    assert!(matcher.search("crew").iter().all(|r| r.category == Category::UserGroup));
}

#[test]
fn exported_sample_loads_back_identically() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("site.json");

    let sample = Dataset::sample();
    sample.save(&path).unwrap();
    let loaded = Dataset::load(&path).unwrap();

    assert_eq!(loaded.users, sample.users);
    assert_eq!(loaded.devices, sample.devices);
    assert_eq!(loaded.card_templates, sample.card_templates);
    assert_eq!(loaded.device_groups, sample.device_groups);
    assert_eq!(loaded.device_summary(), sample.device_summary());
    assert_eq!(loaded.stats, sample.stats);

    let a = Matcher::new(Arc::new(sample), CategoryCaps::default());
    let b = Matcher::new(Arc::new(loaded), CategoryCaps::default());
    assert_eq!(a.search("an"), b.search("an"));
}

#[test]
fn missing_dataset_names_the_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nope.json");
    let err = Dataset::load(&path).unwrap_err();
    assert!(matches!(err, SentinelError::Io(_)));
    assert!(err.to_string().contains("nope.json"));
}

#[test]
fn malformed_dataset_is_a_json_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{{\"users\": [").unwrap();
    assert!(matches!(
        Dataset::load(file.path()),
        Err(SentinelError::Json(_))
    ));
}

#[test]
fn partial_config_keeps_other_defaults_and_caps_apply() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"debounceMs": 50, "caps": {{"users": 1}}}}"#).unwrap();

    let config = AppConfig::load(file.path()).unwrap();
    assert_eq!(config.debounce_ms, 50);
    assert_eq!(config.caps.users, 1);
    assert_eq!(config.caps.devices, 3);
    assert_eq!(config.tick_rate_ms, 50);

    let matcher = Matcher::new(Arc::new(Dataset::sample()), config.caps);
    let users = matcher
        .search("a")
        .into_iter()
        .filter(|r| r.category == Category::User)
        .count();
    assert_eq!(users, 1);
}

#[test]
fn invalid_config_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"feedCapacity": 0}}"#).unwrap();
    assert!(matches!(
        AppConfig::load(file.path()),
        Err(SentinelError::Config(_))
    ));
}
