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

//! Run configuration.
//!
//! The command line and environment are read exactly once, into a
//! [`DeployConfig`] that is then passed by reference to every component.

use std::{
    fmt::{self, Write as _},
    path::PathBuf,
    str::FromStr,
};

use semver::Version;
use web3deploy_common::env;

use crate::{Cli, DeployError, Result};

/// Default directory scanned for sources.
pub const DEFAULT_SOURCE_DIR: &str = "src/sol";
/// Default solc version.
pub const DEFAULT_COMPILER_VERSION: &str = "0.8.9";
/// Default build output directory.
pub const DEFAULT_BUILD_DIR: &str = "build/web3deploy";
/// Default JSON-RPC endpoint.
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";
/// Default deployer account index.
pub const DEFAULT_ACCOUNT_INDEX: usize = 0;
/// Optimizer runs used when `--optimize` is given without a value.
pub const DEFAULT_OPTIMIZER_RUNS: usize = 200;

/// Remappings applied to every compilation, for packages installed with npm.
pub const DEFAULT_REMAPPINGS: [(&str, &str); 2] = [
    ("@openzeppelin/", "node_modules/@openzeppelin/"),
    ("@chainlink/", "node_modules/@chainlink/"),
];

/// An import remapping: imports starting with `prefix` resolve under `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRemapping {
    /// Import prefix, e.g. `@openzeppelin/`.
    pub prefix: String,
    /// Filesystem location the prefix maps to.
    pub path: String,
}

impl ImportRemapping {
    /// New remapping.
    pub fn new(prefix: impl Into<String>, path: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), path: path.into() }
    }
}

impl FromStr for ImportRemapping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((prefix, path)) if !prefix.is_empty() && !path.is_empty() => {
                Ok(Self::new(prefix, path))
            }
            _ => Err(format!("invalid remapping `{s}`, expected PREFIX=PATH")),
        }
    }
}

impl fmt::Display for ImportRemapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.prefix, self.path)
    }
}

/// Optimizer settings passed to the compiler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptimizerSettings {
    /// Number of runs, `None` when the optimizer is off.
    pub runs: Option<usize>,
}

impl OptimizerSettings {
    /// Settings for a requested run count. `None` and `Some(0)` both disable the optimizer.
    pub fn from_runs(runs: Option<usize>) -> Self {
        Self { runs: runs.filter(|runs| *runs > 0) }
    }

    /// Whether the optimizer is enabled.
    pub fn enabled(&self) -> bool {
        self.runs.is_some()
    }
}

/// Everything a run needs to know, resolved once at startup.
#[derive(Debug, Clone)]
pub struct DeployConfig {
    /// Directory scanned for sources when no explicit files are given.
    pub source_dir: PathBuf,
    /// Explicitly selected source files, in order.
    pub files: Vec<PathBuf>,
    /// Only contracts with these names are deployed. Empty means all.
    pub contracts: Vec<String>,
    /// solc version.
    pub compiler_version: Version,
    /// Optimizer settings.
    pub optimizer: OptimizerSettings,
    /// Import remappings, defaults first.
    pub remappings: Vec<ImportRemapping>,
    /// Base path for import resolution; also the only path solc may read outside the sources.
    pub base_path: PathBuf,
    /// Output directory.
    pub build_dir: PathBuf,
    /// JSON-RPC endpoint.
    pub rpc_url: String,
    /// Proof-of-authority chain.
    pub poa: bool,
    /// Index into the node's accounts of the deployer.
    pub account_index: usize,
}

impl DeployConfig {
    /// Build the configuration from parsed command-line arguments.
    ///
    /// The working directory becomes the compiler's base path.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let base_path = std::env::current_dir()
            .map_err(|e| DeployError::config(format!("cannot determine working directory: {e}")))?;
        Self::from_cli_with_base(cli, base_path)
    }

    /// Like [`DeployConfig::from_cli`], with an explicit base path.
    pub fn from_cli_with_base(cli: &Cli, base_path: PathBuf) -> Result<Self> {
        let rpc_url = cli.rpc_url.trim();
        if rpc_url.is_empty() {
            return Err(DeployError::config(format!("{} must not be empty", env::RPC_PROVIDER_URL)));
        }

        let compiler_version = parse_compiler_version(&cli.compiler_version)?;

        let remappings = DEFAULT_REMAPPINGS
            .iter()
            .map(|(prefix, path)| ImportRemapping::new(*prefix, *path))
            .chain(cli.remappings.iter().cloned())
            .collect();

        Ok(Self {
            source_dir: cli.source_dir.clone(),
            files: cli.files.clone(),
            contracts: cli.contracts.clone(),
            compiler_version,
            optimizer: OptimizerSettings::from_runs(cli.optimize),
            remappings,
            base_path,
            build_dir: cli.build_dir.clone(),
            rpc_url: rpc_url.to_string(),
            poa: cli.poa,
            account_index: cli.account_index,
        })
    }
}

/// Table of configuration variables with their defaults and the values given.
///
/// Works from the raw command line so it can be shown even when the values
/// do not validate.
pub fn help_text(cli: &Cli) -> String {
    let rows = [
        (
            env::SOURCE_DIR,
            "directory scanned for contract source files",
            DEFAULT_SOURCE_DIR.to_string(),
            cli.source_dir.display().to_string(),
        ),
        (
            env::COMPILER_VERSION,
            "compiler version",
            DEFAULT_COMPILER_VERSION.to_string(),
            cli.compiler_version.clone(),
        ),
        (
            env::BUILD_DIR,
            "output directory for compiled artifacts and registry",
            DEFAULT_BUILD_DIR.to_string(),
            cli.build_dir.display().to_string(),
        ),
        (env::RPC_PROVIDER_URL, "JSON-RPC endpoint", DEFAULT_RPC_URL.to_string(), cli.rpc_url.clone()),
        (env::POA_MODE, "target chain is proof-of-authority", "false".to_string(), cli.poa.to_string()),
        (
            env::ACCOUNT_INDEX,
            "index of the deployer in the node's accounts",
            DEFAULT_ACCOUNT_INDEX.to_string(),
            cli.account_index.to_string(),
        ),
    ];

    let mut out = String::from("Configuration (environment variables, also read from .env):\n\n");
    let _ = writeln!(out, "{:<18} {:<54} {:<24} {}", "KEY", "MEANING", "DEFAULT", "CURRENT");
    for (key, meaning, default, current) in rows {
        let _ = writeln!(out, "{key:<18} {meaning:<54} {default:<24} {current}");
    }
    out
}

/// Parse a solc version, tolerating a leading `v`.
fn parse_compiler_version(raw: &str) -> Result<Version> {
    let trimmed = raw.trim();
    Version::parse(trimmed.strip_prefix('v').unwrap_or(trimmed)).map_err(|e| {
        DeployError::config(format!("invalid {} `{raw}`: {e}", env::COMPILER_VERSION))
    })
}
