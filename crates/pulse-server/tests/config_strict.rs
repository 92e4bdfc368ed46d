#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use pulse_server::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
simulation:
  error_rat: 0.2 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:5000");
    assert_eq!(cfg.simulation.latency_min_ms, 100);
    assert_eq!(cfg.simulation.latency_max_ms, 500);
    assert_eq!(cfg.simulation.error_rate, 0.1);
}

#[test]
fn full_config() {
    let ok = r#"
version: 1
server:
  listen: "127.0.0.1:9000"
simulation:
  latency_min_ms: 0
  latency_max_ms: 10
  error_rate: 0.5
  users_min: 1
  users_max: 2
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.server.listen, "127.0.0.1:9000");
    assert_eq!(cfg.simulation.users_max, 2);
}

#[test]
fn unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn out_of_range_values_are_rejected() {
    let cases = [
        "version: 1\nserver: { listen: \"not-an-addr\" }\n",
        "version: 1\nsimulation: { error_rate: 1.5 }\n",
        "version: 1\nsimulation: { latency_min_ms: 600, latency_max_ms: 500 }\n",
        "version: 1\nsimulation: { latency_max_ms: 120000 }\n",
        "version: 1\nsimulation: { users_min: 10, users_max: 5 }\n",
    ];
    for case in cases {
        let err = config::load_from_str(case).expect_err(case);
        assert_eq!(err.code().as_str(), "BAD_CONFIG", "{case}");
    }
}

#[test]
fn missing_file_is_a_config_error() {
    let err = config::load_from_file("/nonexistent/pulse.yaml").expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn explicit_missing_path_is_reported() {
    let err = config::load(Some("/nonexistent/pulse.yaml")).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn no_explicit_path_and_no_default_file_uses_defaults() {
    // Integration tests run from the crate directory, which has no pulse.yaml.
    let cfg = config::load(None).expect("defaults");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:5000");
}
