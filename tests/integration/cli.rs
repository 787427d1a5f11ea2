// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use assert_cmd::Command;

#[test]
fn help_renders() {
    let mut cmd = Command::cargo_bin("qagen").unwrap();
    cmd.arg("--help").assert().success();
}

#[test]
fn missing_api_key_halts_with_configuration_error() {
    let mut cmd = Command::cargo_bin("qagen").unwrap();
    cmd.env_remove("API_KEY")
        .args(["--feature", "Login Form", "--platform", "web-application", "--context", ""])
        .arg("--no-save")
        .assert()
        .failure()
        .code(exitcode::CONFIG);
}

#[test]
fn empty_feature_name_halts_with_usage_error() {
    let mut cmd = Command::cargo_bin("qagen").unwrap();
    cmd.env("API_KEY", "test-key")
        .args(["--feature", "", "--platform", "rest-api", "--context", "irrelevant"])
        .arg("--no-save")
        .assert()
        .failure()
        .code(exitcode::USAGE);
}

#[test]
fn rejects_unknown_platform_value() {
    let mut cmd = Command::cargo_bin("qagen").unwrap();
    cmd.env("API_KEY", "test-key")
        .args(["--feature", "Login Form", "--platform", "mainframe"])
        .assert()
        .failure();
}
