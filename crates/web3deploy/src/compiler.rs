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

//! Solidity compilation.
//!
//! The compiler itself is an external collaborator: solc, resolved (and
//! installed on first use) through `foundry-compilers`. This module turns one
//! source file into standard-JSON input, runs solc and reduces the output to
//! what deployment needs: each contract's ABI and creation bytecode, keyed by
//! `<path>:<name>`.

use std::{collections::BTreeMap, path::Path};

use alloy_json_abi::JsonAbi;
use alloy_primitives::Bytes;
use foundry_compilers::{
    artifacts::{
        output_selection::OutputSelection, CompilerOutput, Optimizer, Settings, SolcInput, Source,
        Sources,
    },
    solc::{Solc, SolcLanguage},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::{ContractSource, DeployConfig, DeployError, Result};

/// ABI and creation bytecode of one compiled contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompiledArtifact {
    /// Contract interface.
    pub abi: JsonAbi,
    /// Creation bytecode, hex encoded when serialized.
    pub bin: Bytes,
}

/// Compiler output for one run, keyed by [`artifact_id`].
pub type CompiledContracts = BTreeMap<String, CompiledArtifact>;

/// Compound identifier `<path>:<name>` of a compiled contract.
pub fn artifact_id(path: &Path, name: &str) -> String {
    format!("{}:{}", path.display(), name)
}

/// Compiles a single source file.
#[auto_impl::auto_impl(&, Box, Arc)]
pub trait SolidityCompiler {
    /// Compile `source`, returning every contract it defines.
    fn compile(&self, source: &ContractSource) -> Result<CompiledContracts>;
}

/// [`SolidityCompiler`] backed by a local solc binary.
#[derive(Debug, Clone)]
pub struct SolcCompiler {
    solc: Solc,
    settings: Settings,
}

impl SolcCompiler {
    /// Resolve the configured compiler version, installing it if needed.
    ///
    /// Installation downloads through a blocking HTTP client and must not be
    /// called from inside an async runtime.
    pub fn new(config: &DeployConfig) -> Result<Self> {
        let version = &config.compiler_version;
        let mut solc = Solc::find_or_install(version).map_err(|e| {
            DeployError::CompilerUnavailable { version: version.to_string(), message: e.to_string() }
        })?;
        solc.base_path = Some(config.base_path.clone());
        solc.allow_paths.insert(config.base_path.clone());
        info!(version = %solc.version, solc = %solc.solc.display(), "using compiler");

        Ok(Self { solc, settings: build_settings(config)? })
    }

    /// The resolved compiler.
    pub fn solc(&self) -> &Solc {
        &self.solc
    }
}

impl SolidityCompiler for SolcCompiler {
    fn compile(&self, source: &ContractSource) -> Result<CompiledContracts> {
        let mut sources = Sources::new();
        sources.insert(source.path.clone(), Source::new(source.text.clone()));
        let input = SolcInput::new(SolcLanguage::Solidity, sources, self.settings.clone());
        trace!(path = %source.path.display(), settings = ?self.settings, "compiling");

        let output = self.solc.compile_exact(&input).map_err(|e| DeployError::Compilation {
            path: source.path.clone(),
            message: e.to_string(),
        })?;

        collect_contracts(&source.path, output)
    }
}

/// Standard-JSON settings for a run.
fn build_settings(config: &DeployConfig) -> Result<Settings> {
    let remappings = config
        .remappings
        .iter()
        .map(|remapping| {
            remapping.to_string().parse().map_err(|e| {
                DeployError::config(format!("invalid remapping `{remapping}`: {e}"))
            })
        })
        .collect::<Result<_>>()?;

    Ok(Settings {
        // Let each solc release pick its own default EVM version.
        evm_version: None,
        output_selection: OutputSelection::default_output_selection(),
        optimizer: Optimizer {
            enabled: Some(config.optimizer.enabled()),
            runs: config.optimizer.runs,
            ..Default::default()
        },
        remappings,
        ..Default::default()
    })
}

/// Turn solc output into [`CompiledContracts`], failing on error diagnostics.
fn collect_contracts(path: &Path, output: CompilerOutput) -> Result<CompiledContracts> {
    let mut errors = Vec::new();
    for diagnostic in &output.errors {
        let message =
            diagnostic.formatted_message.clone().unwrap_or_else(|| diagnostic.message.clone());
        if diagnostic.is_error() {
            errors.push(message);
        } else {
            warn!(path = %path.display(), "{}", message.trim_end());
        }
    }
    if !errors.is_empty() {
        return Err(DeployError::Compilation {
            path: path.to_path_buf(),
            message: errors.join("\n"),
        });
    }

    let mut compiled = CompiledContracts::new();
    for (file, contracts) in output.contracts {
        for (name, contract) in contracts {
            let Some(bin) = contract
                .evm
                .as_ref()
                .and_then(|evm| evm.bytecode.as_ref())
                .and_then(|bytecode| bytecode.object.as_bytes())
                .cloned()
            else {
                // Interfaces have no bytecode; unlinked libraries are not deployable as-is.
                debug!(file = %file.display(), contract = %name, "skipping contract without bytecode");
                continue;
            };

            let abi = contract.abi.unwrap_or_default();
            compiled.insert(artifact_id(&file, &name), CompiledArtifact { abi, bin });
        }
    }

    debug!(path = %path.display(), count = compiled.len(), "compiled contracts");
    Ok(compiled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cli, OptimizerSettings};
    use clap::Parser;
    use semver::Version;
    use std::path::PathBuf;
    use web3deploy_common::test_utils::{counter_source, TestWorkspace};

    fn test_config(base: PathBuf, extra: &[&str]) -> DeployConfig {
        let cli = Cli::try_parse_from(
            ["web3deploy", "--rpc-url", "http://localhost:8545", "--compiler-version", "0.8.9"]
                .into_iter()
                .chain(extra.iter().copied()),
        )
        .unwrap();
        DeployConfig::from_cli_with_base(&cli, base).unwrap()
    }

    #[test]
    fn test_artifact_id() {
        assert_eq!(
            artifact_id(Path::new("src/sol/Counter.sol"), "Counter"),
            "src/sol/Counter.sol:Counter"
        );
    }

    #[test]
    fn test_settings_follow_config() {
        let mut config =
            test_config(PathBuf::from("/work"), &["--remapping", "@solmate/=lib/solmate/src/"]);
        config.optimizer = OptimizerSettings::from_runs(Some(500));
        let settings = build_settings(&config).unwrap();

        assert_eq!(settings.optimizer.enabled, Some(true));
        assert_eq!(settings.optimizer.runs, Some(500));
        assert_eq!(settings.remappings.len(), 3);
        assert_eq!(settings.remappings[0].name, "@openzeppelin/");
        assert_eq!(settings.remappings[2].name, "@solmate/");
        assert!(settings.evm_version.is_none());
    }

    #[test]
    fn test_settings_without_optimizer() {
        let config = test_config(PathBuf::from("/work"), &[]);
        let settings = build_settings(&config).unwrap();
        assert_eq!(settings.optimizer.enabled, Some(false));
        assert_eq!(settings.optimizer.runs, None);
    }

    #[test]
    fn test_artifact_serialization_shape() {
        let artifact =
            CompiledArtifact { abi: JsonAbi::default(), bin: Bytes::from(vec![0x60, 0x80]) };
        let mut compiled = CompiledContracts::new();
        compiled.insert(artifact_id(Path::new("src/sol/A.sol"), "A"), artifact.clone());

        let json = serde_json::to_value(&compiled).unwrap();
        assert_eq!(json["src/sol/A.sol:A"]["bin"], "0x6080");
        assert!(json["src/sol/A.sol:A"]["abi"].is_array());

        let back: CompiledContracts = serde_json::from_value(json).unwrap();
        assert_eq!(back["src/sol/A.sol:A"], artifact);
    }

    // Downloads solc 0.8.9 on first run.
    #[test]
    #[ignore = "requires network access to install solc"]
    fn test_compile_counter_with_solc() {
        let ws = TestWorkspace::new().unwrap();
        let path = ws.add_counter("Counter").unwrap();
        let config = test_config(ws.root().to_path_buf(), &["--optimize"]);

        let compiler = SolcCompiler::new(&config).unwrap();
        assert_eq!(compiler.solc().version, Version::new(0, 8, 9));
        assert_eq!(compiler.solc().base_path.as_deref(), Some(ws.root()));
        let compiled = compiler.compile(&ContractSource::read(&path).unwrap()).unwrap();

        let artifact = &compiled[&artifact_id(&path, "Counter")];
        assert!(!artifact.bin.is_empty());
        assert!(artifact.abi.function("increment").is_some());
    }

    #[test]
    #[ignore = "requires network access to install solc"]
    fn test_syntax_error_is_a_compilation_error() {
        let ws = TestWorkspace::new().unwrap();
        let broken = counter_source("Broken").replace("count += 1;", "count += ;");
        let path = ws.add_source("Broken.sol", &broken).unwrap();
        let config = test_config(ws.root().to_path_buf(), &[]);

        let compiler = SolcCompiler::new(&config).unwrap();
        let err = compiler.compile(&ContractSource::read(&path).unwrap()).unwrap_err();
        assert!(matches!(err, DeployError::Compilation { .. }));
    }
}
