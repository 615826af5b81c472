// web3deploy - Solidity compile-and-deploy tool
// Copyright (C) 2024 Zhuo Zhang and Wuqi Zhang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Command-line tests that never reach the compiler or a node.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tracing::info;
use web3deploy_common::{env, logging::ensure_test_logging, test_utils::TestWorkspace};

/// The binary, run inside `ws` with none of the configuration variables inherited.
fn web3deploy(ws: &TestWorkspace) -> Command {
    let mut cmd = Command::cargo_bin("web3deploy").unwrap();
    cmd.current_dir(ws.root());
    for key in env::ALL {
        cmd.env_remove(key);
    }
    cmd
}

#[test]
fn test_help() {
    ensure_test_logging(None);
    info!("Running test");
    let ws = TestWorkspace::new().unwrap();
    web3deploy(&ws)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Compile Solidity contracts"))
        .stdout(predicate::str::contains("--config-help"))
        .stdout(predicate::str::contains("--optimize"));
}

#[test]
fn test_version() {
    ensure_test_logging(None);
    let ws = TestWorkspace::new().unwrap();
    web3deploy(&ws)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("web3deploy"));
}

#[test]
fn test_config_help_lists_keys_and_effective_values() {
    ensure_test_logging(None);
    let ws = TestWorkspace::new().unwrap();
    let assert = web3deploy(&ws)
        .arg("--config-help")
        .env(env::RPC_PROVIDER_URL, "http://node.internal:8545")
        .env(env::ACCOUNT_INDEX, "2")
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    for key in env::ALL {
        assert!(stdout.contains(key), "missing {key} in:\n{stdout}");
    }
    assert!(stdout.contains("http://node.internal:8545"));
    assert!(stdout.contains("http://localhost:8545"));
    assert!(!ws.build_dir().exists());
}

#[test]
fn test_clear_removes_build_dir_and_exits() {
    ensure_test_logging(None);
    let ws = TestWorkspace::new().unwrap();
    ws.add_counter("Counter").unwrap();
    fs::create_dir_all(ws.build_dir().join("contract")).unwrap();
    fs::write(ws.registry_path(), "{}").unwrap();

    // Unreachable node: the run must stop before connecting.
    web3deploy(&ws)
        .arg("--clear")
        .env(env::RPC_PROVIDER_URL, "http://127.0.0.1:1")
        .assert()
        .success();
    assert!(!ws.build_dir().exists());

    // Clearing twice is fine.
    web3deploy(&ws).arg("--clear").assert().success();
}

#[test]
fn test_config_help_shows_values_that_do_not_validate() {
    ensure_test_logging(None);
    let ws = TestWorkspace::new().unwrap();
    web3deploy(&ws)
        .arg("--config-help")
        .env(env::COMPILER_VERSION, "latest")
        .env(env::RPC_PROVIDER_URL, "   ")
        .assert()
        .success()
        .stdout(predicate::str::contains("latest"));
}

#[test]
fn test_clear_ignores_invalid_settings() {
    ensure_test_logging(None);
    let ws = TestWorkspace::new().unwrap();
    fs::create_dir_all(ws.build_dir()).unwrap();

    web3deploy(&ws).arg("--clear").env(env::COMPILER_VERSION, "latest").assert().success();
    assert!(!ws.build_dir().exists());
}

#[test]
fn test_clear_honours_build_dir_flag() {
    ensure_test_logging(None);
    let ws = TestWorkspace::new().unwrap();
    let custom = ws.root().join("out");
    fs::create_dir_all(&custom).unwrap();
    fs::create_dir_all(ws.build_dir()).unwrap();

    web3deploy(&ws).arg("--clear").arg("--build-dir").arg(&custom).assert().success();
    assert!(!custom.exists());
    assert!(ws.build_dir().exists());
}

#[test]
fn test_missing_source_dir_fails() {
    ensure_test_logging(None);
    let ws = TestWorkspace::new().unwrap();
    web3deploy(&ws)
        .env(env::SOURCE_DIR, "does/not/exist")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read source directory"));
}

#[test]
fn test_empty_source_dir_is_a_no_op() {
    ensure_test_logging(None);
    let ws = TestWorkspace::new().unwrap();
    web3deploy(&ws).env(env::RPC_PROVIDER_URL, "http://127.0.0.1:1").assert().success();
    assert!(!ws.build_dir().exists());
}

#[test]
fn test_invalid_compiler_version_fails() {
    ensure_test_logging(None);
    let ws = TestWorkspace::new().unwrap();
    web3deploy(&ws)
        .arg("--compiler-version")
        .arg("latest")
        .assert()
        .failure()
        .stderr(predicate::str::contains(env::COMPILER_VERSION));
}

#[test]
fn test_empty_rpc_url_fails() {
    ensure_test_logging(None);
    let ws = TestWorkspace::new().unwrap();
    web3deploy(&ws)
        .arg("--rpc-url")
        .arg("   ")
        .assert()
        .failure()
        .stderr(predicate::str::contains(env::RPC_PROVIDER_URL));
}

#[test]
fn test_invalid_optimizer_runs_rejected() {
    ensure_test_logging(None);
    let ws = TestWorkspace::new().unwrap();
    web3deploy(&ws)
        .arg("--optimize")
        .arg("many")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_invalid_remapping_rejected() {
    ensure_test_logging(None);
    let ws = TestWorkspace::new().unwrap();
    web3deploy(&ws).arg("--remapping").arg("no-equals-sign").assert().failure();
}
