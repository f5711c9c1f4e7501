use super::*;

fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn defaults_match_page_settings() {
    let config = SiteConfig::default();
    assert_eq!(config.page_settings(), PageSettings::default());
    assert!(config.persist_preferences);
    assert_eq!(config.submission_endpoint, None);
}

#[test]
fn reads_partial_config_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("site.toml");
    fs::write(
        &path,
        "site_name = \"Acme\"\nsuccess_message_ms = 2500\nsubmission_endpoint = \"https://acme.test/contact\"\n",
    )
    .expect("write config");

    let config = read_config_file(&path).expect("read config");

    assert_eq!(config.site_name, "Acme");
    assert_eq!(config.success_message_ms, 2500);
    assert_eq!(
        config.submission_endpoint.as_deref(),
        Some("https://acme.test/contact")
    );
    assert_eq!(config.faq_items, SiteConfig::default().faq_items);
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_config(Some(&dir.path().join("absent.toml"))).expect_err("must fail");
    assert!(format!("{err:#}").contains("failed to read config file"));
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("site.toml");
    fs::write(&path, "faq_items = \"many\"").expect("write config");
    assert!(read_config_file(&path).is_err());
}

#[test]
fn env_overrides_apply_and_skip_bad_values() {
    let mut config = SiteConfig::default();
    apply_env_overrides(
        &mut config,
        vars(&[
            ("SITE__SITE_NAME", "Env Site"),
            ("SITE__FAQ_ITEMS", "3"),
            ("SITE__SUCCESS_MESSAGE_MS", "soon"),
            ("SITE__PERSIST_PREFERENCES", "false"),
            ("SITE__STATE_DIR", "/tmp/site-state"),
            ("SITE__SUBMISSION_ENDPOINT", " "),
            ("OTHER_VAR", "ignored"),
        ]),
    );

    assert_eq!(config.site_name, "Env Site");
    assert_eq!(config.faq_items, 3);
    assert_eq!(
        config.success_message_ms,
        SiteConfig::default().success_message_ms
    );
    assert!(!config.persist_preferences);
    assert_eq!(config.state_dir, Some(PathBuf::from("/tmp/site-state")));
    assert_eq!(config.submission_endpoint, None);
}

#[test]
fn explicit_state_dir_wins() {
    let config = SiteConfig {
        state_dir: Some(PathBuf::from("/srv/site")),
        ..SiteConfig::default()
    };
    assert_eq!(config.resolve_state_dir(), Some(PathBuf::from("/srv/site")));
}
