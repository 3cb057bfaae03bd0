use predicates::prelude::predicate;

#[test]
fn help_is_available() {
    assert_cmd::cargo::cargo_bin_cmd!("check-http-json")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--hostname"))
        .stdout(predicate::str::contains("--key-exists"))
        .stdout(predicate::str::contains("--key-equals"))
        .stdout(predicate::str::contains("--page-size"));
}

#[test]
fn help_names_template_time_format() {
    assert_cmd::cargo::cargo_bin_cmd!("check-http-json")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("strftime specifiers"))
        .stdout(predicate::str::contains("not Go reference layouts"));
}

#[test]
fn version_is_available() {
    assert_cmd::cargo::cargo_bin_cmd!("check-http-json")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_flag_is_unknown_status() {
    assert_cmd::cargo::cargo_bin_cmd!("check-http-json")
        .arg("--no-such-flag")
        .assert()
        .code(3)
        .stdout(predicate::str::starts_with("UNKNOWN: "));
}

#[test]
fn non_numeric_status_flag_is_unknown_status() {
    assert_cmd::cargo::cargo_bin_cmd!("check-http-json")
        .args(["-H", "localhost", "--status", "ok"])
        .assert()
        .code(3)
        .stdout(predicate::str::starts_with("UNKNOWN: "));
}

#[test]
fn missing_hostname_is_critical() {
    assert_cmd::cargo::cargo_bin_cmd!("check-http-json")
        .args(["--key-exists", "id"])
        .assert()
        .code(2)
        .stdout("CRITICAL: Hostname is blank\n");
}

#[test]
fn malformed_key_flag_exits_before_request() {
    // Nothing listens on this host; reaching the network would yield UNKNOWN.
    assert_cmd::cargo::cargo_bin_cmd!("check-http-json")
        .args(["-H", "127.0.0.1:9", "--key-lte", "latency"])
        .assert()
        .code(2)
        .stdout("CRITICAL: Flag key-lte needs to be in 'key:value' format\n");
}

#[test]
fn unreadable_config_file_is_critical() {
    assert_cmd::cargo::cargo_bin_cmd!("check-http-json")
        .args(["--config", "/nonexistent/probe.toml"])
        .assert()
        .code(2)
        .stdout(predicate::str::starts_with(
            "CRITICAL: failed to load config file `/nonexistent/probe.toml`",
        ));
}
