use super::*;

#[test]
fn new_trims_trailing_slashes() {
    let cfg = ServiceConfig::new("http://analysis.internal:8090//", 5).unwrap();
    assert_eq!(cfg.base_url, "http://analysis.internal:8090");
    assert_eq!(cfg.connect_timeout_secs, 5);
}

#[test]
fn new_rejects_non_http_urls() {
    let err = ServiceConfig::new("localhost:8090", 5).unwrap_err();
    assert_eq!(err, ConfigError::InvalidServiceUrl("localhost:8090".to_owned()));
    assert!(err.to_string().contains("ANALYSIS_SERVICE_URL"));
}

#[test]
fn default_points_at_local_service() {
    let cfg = ServiceConfig::default();
    assert_eq!(cfg.base_url, DEFAULT_SERVICE_URL);
    assert_eq!(cfg.connect_timeout_secs, DEFAULT_CONNECT_TIMEOUT_SECS);
}

#[test]
fn from_env_reads_overrides_and_defaults() {
    unsafe {
        std::env::set_var("ANALYSIS_SERVICE_URL", "https://risk.example.test/");
        std::env::set_var("ANALYSIS_CONNECT_TIMEOUT_SECS", "not-a-number");
    }

    let cfg = ServiceConfig::from_env().unwrap();
    assert_eq!(cfg.base_url, "https://risk.example.test");
    assert_eq!(cfg.connect_timeout_secs, DEFAULT_CONNECT_TIMEOUT_SECS);

    unsafe {
        std::env::remove_var("ANALYSIS_SERVICE_URL");
        std::env::remove_var("ANALYSIS_CONNECT_TIMEOUT_SECS");
    }
}
