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

//! The compile-and-deploy run.
//!
//! A [`Pipeline`] walks the resolved source files in order. For each file it
//! extracts the contract name, compiles the file, writes the compiler output
//! to the build directory, deploys the named contract and records its address.
//! The registry is written back after every deployment, so a failure halfway
//! through a run keeps the addresses of everything deployed before it.
//!
//! A file with no recognizable contract declaration (an interface, say) is
//! skipped and the run carries on; the first such failure is reported once
//! every other file has been processed. A contract that compiles to no
//! bytecode is skipped with a warning. Compilation and deployment failures
//! stop the run immediately.

use std::{collections::BTreeSet, path::PathBuf};

use tracing::{debug, info, warn};

use crate::{
    artifact_id, merge, AddressRegistry, BuildDir, ContractDeployer, ContractSource, DeployConfig,
    DeployError, NameExtractor, RegexNameExtractor, RegistryStore, Result, SolidityCompiler,
};

/// Outcome of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Contracts deployed by this run.
    pub deployed: AddressRegistry,
    /// Registry as persisted at the end of the run.
    pub registry: AddressRegistry,
}

/// Sequential compile-and-deploy driver.
#[derive(Debug)]
pub struct Pipeline<'a, C, D, E = RegexNameExtractor> {
    config: &'a DeployConfig,
    compiler: C,
    deployer: D,
    extractor: E,
    build_dir: BuildDir,
    store: RegistryStore,
}

impl<'a, C, D> Pipeline<'a, C, D>
where
    C: SolidityCompiler,
    D: ContractDeployer,
{
    /// New pipeline using the regex-based name extractor.
    pub fn new(config: &'a DeployConfig, compiler: C, deployer: D) -> Self {
        let build_dir = BuildDir::new(&config.build_dir);
        let store = RegistryStore::new(build_dir.registry_path());
        Self { config, compiler, deployer, extractor: RegexNameExtractor, build_dir, store }
    }
}

impl<'a, C, D, E> Pipeline<'a, C, D, E>
where
    C: SolidityCompiler,
    D: ContractDeployer,
    E: NameExtractor,
{
    /// Replace the name extractor.
    pub fn with_extractor<X: NameExtractor>(self, extractor: X) -> Pipeline<'a, C, D, X> {
        Pipeline {
            config: self.config,
            compiler: self.compiler,
            deployer: self.deployer,
            extractor,
            build_dir: self.build_dir,
            store: self.store,
        }
    }

    /// Compile and deploy every contract in `sources`, in order.
    ///
    /// Stops at the first compilation or deployment error. Files whose contract
    /// name cannot be extracted are skipped, and the first of those errors is
    /// returned after the remaining files are done. Entries persisted before
    /// any error stay on disk.
    pub async fn run(&self, sources: &[PathBuf]) -> Result<RunSummary> {
        let previous = self.store.load()?;
        let filter: BTreeSet<&str> = self.config.contracts.iter().map(String::as_str).collect();
        let mut matched = BTreeSet::new();
        let mut unextracted = Vec::new();

        let mut deployed = AddressRegistry::new();
        let mut registry = previous.clone();

        for path in sources {
            let source = ContractSource::read(path)?;
            let name = match self.extractor.extract(&source.text) {
                Ok(name) => name,
                Err(cause) => {
                    let err = DeployError::Extraction { path: path.clone(), source: cause };
                    warn!(path = %path.display(), "skipping file: {err}");
                    unextracted.push(err);
                    continue;
                }
            };

            if !filter.is_empty() {
                if !filter.contains(name.as_str()) {
                    debug!(contract = %name, path = %path.display(), "not selected, skipping");
                    continue;
                }
                matched.insert(name.to_string());
            }
            if deployed.get(&name).is_some() {
                warn!(contract = %name, path = %path.display(), "contract name declared by more than one file, later deployment wins");
            }

            info!(contract = %name, path = %path.display(), "compiling");
            let compiled = self.compiler.compile(&source)?;
            self.build_dir.write_artifact(&name, &compiled)?;

            let id = artifact_id(&source.path, &name);
            let Some(artifact) = compiled.get(&id) else {
                warn!(contract = %name, path = %path.display(), "no bytecode for contract, skipping deployment");
                continue;
            };

            info!(contract = %name, "deploying");
            let address = self.deployer.deploy(&name, artifact).await?;
            info!(contract = %name, %address, "deployed");

            deployed.insert(name.to_string(), address);
            registry = merge(&previous, &deployed);
            self.store.persist(&registry)?;
        }

        for name in filter.iter().filter(|name| !matched.contains(**name)) {
            warn!(contract = name, "selected contract was not found in any source file");
        }

        if let Some(first) = unextracted.into_iter().next() {
            return Err(first);
        }
        Ok(RunSummary { deployed, registry })
    }
}
