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

//! Source discovery.
//!
//! Resolves which Solidity files a run acts on: either the files the caller
//! named explicitly, or every `.sol` file at the top level of the configured
//! source directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, trace};

use crate::{DeployError, Result};

/// Extension of Solidity source files.
pub const SOLIDITY_EXTENSION: &str = "sol";

/// A source file together with its raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractSource {
    /// Path as given by the locator.
    pub path: PathBuf,
    /// File contents.
    pub text: String,
}

impl ContractSource {
    /// Read the file at `path`.
    pub fn read(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let text = fs::read_to_string(&path).map_err(|e| DeployError::io(&path, e))?;
        Ok(Self { path, text })
    }
}

/// Resolve the ordered list of source files.
///
/// A non-empty `explicit` list is returned verbatim, order preserved.
/// Otherwise `source_dir` is scanned (non-recursively) for `.sol` files,
/// returned sorted by path so repeated runs visit contracts in the same order.
pub fn locate_sources(explicit: &[PathBuf], source_dir: &Path) -> Result<Vec<PathBuf>> {
    if !explicit.is_empty() {
        debug!(count = explicit.len(), "using explicitly selected source files");
        return Ok(explicit.to_vec());
    }

    let entries = fs::read_dir(source_dir).map_err(|e| {
        DeployError::config(format!(
            "cannot read source directory {}: {e}",
            source_dir.display()
        ))
    })?;

    let mut sources = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| DeployError::io(source_dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == SOLIDITY_EXTENSION) {
            trace!(path = %path.display(), "found source file");
            sources.push(path);
        }
    }
    sources.sort();

    debug!(dir = %source_dir.display(), count = sources.len(), "scanned source directory");
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use web3deploy_common::test_utils::TestWorkspace;

    #[test]
    fn test_explicit_list_is_used_verbatim() {
        let explicit = vec![PathBuf::from("b/Zeta.sol"), PathBuf::from("a/Alpha.sol")];
        let sources = locate_sources(&explicit, Path::new("does/not/exist")).unwrap();
        assert_eq!(sources, explicit);
    }

    #[test]
    fn test_scan_picks_only_solidity_files() {
        let ws = TestWorkspace::new().unwrap();
        ws.add_counter("Beta").unwrap();
        ws.add_counter("Alpha").unwrap();
        ws.add_source("README.md", "# notes").unwrap();
        ws.add_source("Alpha.sol.bak", "contract Old {}").unwrap();
        fs::create_dir(ws.source_dir().join("nested.sol")).unwrap();
        fs::create_dir(ws.source_dir().join("lib")).unwrap();
        fs::write(ws.source_dir().join("lib/Hidden.sol"), "contract Hidden {}").unwrap();

        let sources = locate_sources(&[], &ws.source_dir()).unwrap();
        assert_eq!(
            sources,
            vec![ws.source_dir().join("Alpha.sol"), ws.source_dir().join("Beta.sol")]
        );
    }

    #[test]
    fn test_scan_of_empty_directory() {
        let ws = TestWorkspace::new().unwrap();
        assert!(locate_sources(&[], &ws.source_dir()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_directory_is_a_config_error() {
        let ws = TestWorkspace::new().unwrap();
        let err = locate_sources(&[], &ws.root().join("missing")).unwrap_err();
        assert!(matches!(err, DeployError::Config(_)));
    }

    #[test]
    fn test_read_source() {
        let ws = TestWorkspace::new().unwrap();
        let path = ws.add_counter("Counter").unwrap();

        let source = ContractSource::read(&path).unwrap();
        assert_eq!(source.path, path);
        assert!(source.text.contains("contract Counter"));

        let err = ContractSource::read(ws.source_dir().join("Nope.sol")).unwrap_err();
        assert!(matches!(err, DeployError::Io { .. }));
    }
}
