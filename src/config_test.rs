use super::*;

#[test]
fn new_trims_trailing_slashes() {
    let cfg = ClientConfig::new("https://cms.example.test//", None, ClientTimeouts::default()).unwrap();
    assert_eq!(cfg.base_url, "https://cms.example.test");
    assert_eq!(cfg.session_cookie, None);
    assert_eq!(
        cfg.timeouts,
        ClientTimeouts { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    );
}

#[test]
fn new_accepts_default_base_url() {
    let cfg = ClientConfig::new(DEFAULT_BASE_URL, None, ClientTimeouts::default()).unwrap();
    assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
}

#[test]
fn new_rejects_missing_scheme() {
    let err = ClientConfig::new("cms.example.test", None, ClientTimeouts::default()).unwrap_err();
    assert_eq!(err, ConfigError::InvalidBaseUrl("cms.example.test".into()));
}

#[test]
fn new_rejects_scheme_without_host() {
    let err = ClientConfig::new("https://", None, ClientTimeouts::default()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));
}

#[test]
fn new_rejects_zero_timeouts() {
    let err =
        ClientConfig::new(DEFAULT_BASE_URL, None, ClientTimeouts { request_secs: 0, connect_secs: 5 }).unwrap_err();
    assert_eq!(err, ConfigError::ZeroTimeout { field: "request timeout" });

    let err =
        ClientConfig::new(DEFAULT_BASE_URL, None, ClientTimeouts { request_secs: 5, connect_secs: 0 }).unwrap_err();
    assert!(err.to_string().contains("connect timeout"));
}

#[test]
fn new_trims_session_cookie() {
    let cfg =
        ClientConfig::new(DEFAULT_BASE_URL, Some("  JSESSIONID=abc  ".into()), ClientTimeouts::default()).unwrap();
    assert_eq!(cfg.session_cookie.as_deref(), Some("JSESSIONID=abc"));
}

#[test]
fn new_rejects_blank_session_cookie() {
    let err = ClientConfig::new(DEFAULT_BASE_URL, Some("   ".into()), ClientTimeouts::default()).unwrap_err();
    assert_eq!(err, ConfigError::EmptySessionCookie);
}
