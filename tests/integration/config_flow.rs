use std::fs;
use std::io::Cursor;

use check_http_json::cmd::probe::{build_checks, run_with_stdin};
use check_http_json::domain::config::ProbeConfig;
use check_http_json::domain::report::NagiosStatus;
use check_http_json::io::reader::read_config;
use tempfile::tempdir;

use crate::http_server::serve_once;

#[test]
fn config_file_and_flags_combine_into_checks() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("probe.toml");
    fs::write(
        &path,
        r#"
hostname = "file.example"
status = 200
key-exists = ["id"]
header-equals = ["Content-Type:json"]
"#,
    )
    .expect("write config");

    let flags = ProbeConfig {
        hostname: Some("flag.example".to_string()),
        key_lte: vec!["latency:250".to_string()],
        ..ProbeConfig::default()
    };
    let config = read_config(&path).expect("config").merge(flags);
    assert_eq!(config.hostname.as_deref(), Some("flag.example"));

    let checks = build_checks(&config).expect("checks");
    assert_eq!(checks.status, Some(200));
    assert_eq!(checks.headers.len(), 1);
    let predicates: Vec<String> = checks.predicates.iter().map(ToString::to_string).collect();
    assert_eq!(predicates, vec!["exists id", "lte latency:250"]);
}

#[test]
fn yaml_config_drives_a_full_probe() {
    let (address, server) = serve_once(
        200,
        &[("Content-Type", "application/json")],
        r#"{"status":"ok","checks":[{"name":"db","latency":12},{"name":"cache","latency":3}]}"#,
    );

    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("probe.yaml");
    fs::write(
        &path,
        format!(
            "hostname: \"{address}\"\nuri: /health\nstatus: 200\nkey-equals: ['status:^ok$']\nkey-lte: ['latency:50']\n"
        ),
    )
    .expect("write config");

    let config = read_config(&path).expect("config");
    let response = run_with_stdin(&config, Cursor::new(""));
    let request = server.join().expect("server thread");

    assert!(request.starts_with("GET /health HTTP/1.1\r\n"));
    assert_eq!(response.status, NagiosStatus::Ok, "{}", response.line());
    assert_eq!(response.line(), "OK: All tests passed");
}
