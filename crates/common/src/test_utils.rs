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

//! Test utilities for setting up isolated deployment workspaces.
//!
//! A [`TestWorkspace`] is a temporary directory laid out the way the deployer
//! expects a project to look: a source directory with `.sol` files and a
//! build directory for artifacts and the address registry. The directory is
//! removed when the workspace is dropped.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tempfile::TempDir;
use tracing::info;

/// Source directory name inside a [`TestWorkspace`].
pub const TEST_SOURCE_DIR: &str = "src/sol";

/// Build directory name inside a [`TestWorkspace`].
pub const TEST_BUILD_DIR: &str = "build/web3deploy";

/// Solidity source of a contract without constructor arguments.
pub fn counter_source(name: &str) -> String {
    format!(
        r#"// SPDX-License-Identifier: MIT
pragma solidity ^0.8.9;

contract {name} {{
    uint256 public count;

    function increment() external {{
        count += 1;
    }}
}}
"#
    )
}

/// A throwaway project directory.
#[derive(Debug)]
pub struct TestWorkspace {
    root: TempDir,
}

impl TestWorkspace {
    /// Create an empty workspace with the source directory in place.
    pub fn new() -> io::Result<Self> {
        let root = tempfile::Builder::new().prefix("web3deploy-test-").tempdir()?;
        fs::create_dir_all(root.path().join(TEST_SOURCE_DIR))?;
        info!("Created temporary test workspace: {}", root.path().display());
        Ok(Self { root })
    }

    /// Root of the workspace.
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Directory holding the `.sol` sources.
    pub fn source_dir(&self) -> PathBuf {
        self.root.path().join(TEST_SOURCE_DIR)
    }

    /// Directory the deployer writes its output to.
    pub fn build_dir(&self) -> PathBuf {
        self.root.path().join(TEST_BUILD_DIR)
    }

    /// Path of the address registry inside the build directory.
    pub fn registry_path(&self) -> PathBuf {
        self.build_dir().join("address.json")
    }

    /// Write `contents` to `file_name` inside the source directory.
    pub fn add_source(&self, file_name: &str, contents: &str) -> io::Result<PathBuf> {
        let path = self.source_dir().join(file_name);
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Write a counter contract called `name` to `<name>.sol`.
    pub fn add_counter(&self, name: &str) -> io::Result<PathBuf> {
        self.add_source(&format!("{name}.sol"), &counter_source(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_layout() {
        let ws = TestWorkspace::new().unwrap();
        assert!(ws.source_dir().is_dir());
        assert!(!ws.build_dir().exists());
        assert!(ws.registry_path().ends_with("build/web3deploy/address.json"));
    }

    #[test]
    fn test_add_counter() {
        let ws = TestWorkspace::new().unwrap();
        let path = ws.add_counter("Counter").unwrap();

        assert_eq!(path, ws.source_dir().join("Counter.sol"));
        let contents = fs::read_to_string(path).unwrap();
        assert!(contents.contains("contract Counter {"));
    }

    #[test]
    fn test_workspace_removed_on_drop() {
        let ws = TestWorkspace::new().unwrap();
        let root = ws.root().to_path_buf();
        drop(ws);
        assert!(!root.exists());
    }
}
