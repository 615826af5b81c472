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

//! Build directory layout.
//!
//! ```text
//! <build_dir>/
//! ├── address.json          contract name → deployed address
//! └── contract/
//!     └── <Name>.json       compiler output of the file declaring <Name>
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::{CompiledContracts, DeployError, Result};

/// Name of the address registry file.
pub const REGISTRY_FILE: &str = "address.json";

/// Subdirectory holding per-contract compiler output.
pub const CONTRACT_DIR: &str = "contract";

/// Paths inside the build directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildDir {
    root: PathBuf,
}

impl BuildDir {
    /// New layout rooted at `root`. Nothing is created on disk.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root of the build directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding per-contract compiler output.
    pub fn contract_dir(&self) -> PathBuf {
        self.root.join(CONTRACT_DIR)
    }

    /// Compiler output file for the contract `name`.
    pub fn artifact_path(&self, name: &str) -> PathBuf {
        self.contract_dir().join(format!("{name}.json"))
    }

    /// The address registry file.
    pub fn registry_path(&self) -> PathBuf {
        self.root.join(REGISTRY_FILE)
    }

    /// Write the compiler output of the file declaring `name`, replacing any previous output.
    pub fn write_artifact(&self, name: &str, compiled: &CompiledContracts) -> Result<PathBuf> {
        let dir = self.contract_dir();
        fs::create_dir_all(&dir).map_err(|e| DeployError::io(&dir, e))?;

        let path = self.artifact_path(name);
        let content = serde_json::to_string_pretty(compiled)
            .map_err(|e| DeployError::io(&path, io::Error::other(e)))?;
        fs::write(&path, content).map_err(|e| DeployError::io(&path, e))?;

        debug!(contract = name, path = %path.display(), "wrote compiler output");
        Ok(path)
    }

    /// Delete the build directory. Returns whether there was anything to delete.
    pub fn clear(&self) -> Result<bool> {
        match fs::remove_dir_all(&self.root) {
            Ok(()) => {
                info!(path = %self.root.display(), "cleared build directory");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.root.display(), "build directory does not exist");
                Ok(false)
            }
            Err(e) => Err(DeployError::io(&self.root, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{artifact_id, CompiledArtifact};
    use alloy_primitives::Bytes;
    use web3deploy_common::test_utils::TestWorkspace;

    #[test]
    fn test_layout() {
        let build = BuildDir::new("build/web3deploy");
        assert_eq!(build.registry_path(), PathBuf::from("build/web3deploy/address.json"));
        assert_eq!(
            build.artifact_path("Counter"),
            PathBuf::from("build/web3deploy/contract/Counter.json")
        );
    }

    #[test]
    fn test_write_artifact_creates_directories() {
        let ws = TestWorkspace::new().unwrap();
        let build = BuildDir::new(ws.build_dir());

        let mut compiled = CompiledContracts::new();
        compiled.insert(
            artifact_id(Path::new("src/sol/Counter.sol"), "Counter"),
            CompiledArtifact { bin: Bytes::from(vec![0xfe]), ..Default::default() },
        );
        let path = build.write_artifact("Counter", &compiled).unwrap();

        assert_eq!(path, build.artifact_path("Counter"));
        let on_disk: CompiledContracts =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(on_disk, compiled);
    }

    #[test]
    fn test_clear() {
        let ws = TestWorkspace::new().unwrap();
        let build = BuildDir::new(ws.build_dir());

        assert!(!build.clear().unwrap());

        build.write_artifact("Counter", &CompiledContracts::new()).unwrap();
        assert!(build.root().exists());
        assert!(build.clear().unwrap());
        assert!(!build.root().exists());
    }
}
