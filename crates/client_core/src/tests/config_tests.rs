use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

#[test]
fn defaults_point_at_local_server_with_five_second_messages() {
    let settings = ClientSettings::default();
    assert_eq!(settings.server_url, "http://127.0.0.1:8000");
    assert_eq!(settings.message_display(), Duration::from_secs(5));
}

#[test]
fn file_values_override_defaults() {
    let mut settings = ClientSettings::default();
    apply_file(
        &mut settings,
        Path::new("activities.toml"),
        "server_url = \"https://activities.example.edu\"\nmessage_display_secs = 8\n",
    );
    assert_eq!(settings.server_url, "https://activities.example.edu");
    assert_eq!(settings.message_display_secs, 8);
}

#[test]
fn unparsable_file_is_ignored() {
    let mut settings = ClientSettings::default();
    apply_file(&mut settings, Path::new("activities.toml"), "server_url = [");
    assert_eq!(settings, ClientSettings::default());
}

#[test]
fn app_prefixed_env_wins_over_legacy_name() {
    let mut settings = ClientSettings::default();
    apply_env(
        &mut settings,
        env_from(&[
            ("ACTIVITIES_SERVER_URL", "http://legacy:8000"),
            ("APP__SERVER_URL", "http://preferred:9000"),
            ("APP__MESSAGE_DISPLAY_SECS", "3"),
        ]),
    );
    assert_eq!(settings.server_url, "http://preferred:9000");
    assert_eq!(settings.message_display_secs, 3);
}

#[test]
fn invalid_display_secs_env_keeps_previous_value() {
    let mut settings = ClientSettings::default();
    apply_env(
        &mut settings,
        env_from(&[("APP__MESSAGE_DISPLAY_SECS", "soon")]),
    );
    assert_eq!(settings.message_display_secs, 5);
}

#[test]
fn explicit_settings_file_is_read() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("activities_settings_test_{suffix}.toml"));
    fs::write(&path, "message_display_secs = 12\n").expect("write settings");

    let settings = load_settings(Some(&path));
    assert_eq!(settings.message_display_secs, 12);

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn normalizes_trailing_slash_and_whitespace() {
    let url = normalize_server_url("  http://127.0.0.1:8000/ ").expect("url");
    assert_eq!(url.as_str(), "http://127.0.0.1:8000/");

    let url = normalize_server_url("https://school.example/api/").expect("url");
    assert_eq!(url.path(), "/api");
}

#[test]
fn rejects_non_http_urls() {
    assert!(matches!(
        normalize_server_url("ftp://school.example"),
        Err(ConfigError::UnsupportedScheme(scheme)) if scheme == "ftp"
    ));
    assert!(matches!(
        normalize_server_url("not a url"),
        Err(ConfigError::InvalidServerUrl { .. })
    ));
}
