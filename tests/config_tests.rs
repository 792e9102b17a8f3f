use country_atlas::config::Settings;
use serial_test::serial;
use std::env;
use std::fs;

const VARS: &[&str] = &[
    "ATLAS__MAP__TILER_KEY",
    "ATLAS__MAP__STYLE",
    "ATLAS__MAP__WIDTH",
    "ATLAS__COUNTRIES__BASE_URL",
    "ATLAS__COUNTRIES__TIMEOUT_SECS",
];

fn cleanup() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_env_overrides_defaults() {
    cleanup();
    env::set_var("ATLAS__MAP__TILER_KEY", "secret-key");
    env::set_var("ATLAS__MAP__WIDTH", "800");
    env::set_var("ATLAS__COUNTRIES__BASE_URL", "http://localhost:9000/alpha/");

    let settings = Settings::load(None).expect("settings load");
    assert_eq!(settings.map.tiler_key, "secret-key");
    assert_eq!(settings.map.width, 800);
    assert_eq!(settings.map.height, 640);
    assert_eq!(settings.map.style, "streets");
    assert_eq!(settings.countries.base_url, "http://localhost:9000/alpha");
    assert_eq!(settings.countries.timeout_secs, 10);
    assert!(settings.map.boundaries_path.is_none());

    cleanup();
}

#[test]
#[serial]
fn test_missing_tiler_key_is_rejected() {
    cleanup();

    let err = Settings::load(None).unwrap_err().to_string();
    assert!(err.contains("map.tiler_key"), "unexpected error: {}", err);

    cleanup();
}

#[test]
#[serial]
fn test_user_file_is_layered_under_env() {
    cleanup();
    let dir = env::temp_dir().join(format!("country-atlas-test-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("atlas.toml");
    fs::write(
        &path,
        "[map]\ntiler_key = \"from-file\"\nstyle = \"outdoor\"\n",
    )
    .unwrap();
    env::set_var("ATLAS__MAP__STYLE", "satellite");

    let settings = Settings::load(Some(path.clone())).expect("settings load");
    assert_eq!(settings.map.tiler_key, "from-file");
    assert_eq!(settings.map.style, "satellite");

    let _ = fs::remove_dir_all(&dir);
    cleanup();
}
