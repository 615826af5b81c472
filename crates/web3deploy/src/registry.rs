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

//! Address registry.
//!
//! The registry maps contract names to the address each was last deployed at.
//! It lives in `address.json` in the build directory and survives across
//! runs: a run only ever adds or replaces the entries of the contracts it
//! deployed, everything else is carried over untouched.

use std::{
    collections::BTreeMap,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::{DeployError, Result};

/// Contract name → deployed address. Serialized as a JSON object with sorted keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressRegistry(BTreeMap<String, Address>);

impl AddressRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Address recorded for `name`.
    pub fn get(&self, name: &str) -> Option<Address> {
        self.0.get(name).copied()
    }

    /// Record `address` for `name`, returning the address it replaces.
    pub fn insert(&mut self, name: impl Into<String>, address: Address) -> Option<Address> {
        self.0.insert(name.into(), address)
    }

    /// Number of recorded contracts.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Address)> + '_ {
        self.0.iter().map(|(name, address)| (name.as_str(), *address))
    }

    /// Merge `newer` into this registry.
    ///
    /// Every entry of `newer` replaces the entry of the same name; entries only
    /// present in `self` are kept.
    pub fn merge(mut self, newer: &Self) -> Self {
        self.0.extend(newer.0.iter().map(|(name, address)| (name.clone(), *address)));
        self
    }
}

impl<S: Into<String>> FromIterator<(S, Address)> for AddressRegistry {
    fn from_iter<I: IntoIterator<Item = (S, Address)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(name, address)| (name.into(), address)).collect())
    }
}

/// Merge `new` over `old`; see [`AddressRegistry::merge`].
pub fn merge(old: &AddressRegistry, new: &AddressRegistry) -> AddressRegistry {
    old.clone().merge(new)
}

/// Loads and persists the registry file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryStore {
    path: PathBuf,
}

impl RegistryStore {
    /// Store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The registry file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the registry. A missing file yields an empty registry.
    pub fn load(&self) -> Result<AddressRegistry> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "no address registry found, starting empty");
                return Ok(AddressRegistry::new());
            }
            Err(e) => return Err(self.error(e)),
        };

        let registry: AddressRegistry = serde_json::from_str(&content).map_err(|e| self.error(e))?;
        debug!(path = %self.path.display(), entries = registry.len(), "loaded address registry");
        Ok(registry)
    }

    /// Write `registry`, fully replacing the file.
    ///
    /// The content goes to a temporary file next to the target first and is then
    /// renamed over it, so readers never observe a partially written registry.
    pub fn persist(&self, registry: &AddressRegistry) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| self.error(e))?;

        let mut file = NamedTempFile::new_in(&dir).map_err(|e| self.error(e))?;
        serde_json::to_writer_pretty(&mut file, registry).map_err(|e| self.error(e))?;
        file.write_all(b"\n").map_err(|e| self.error(e))?;
        file.persist(&self.path).map_err(|e| self.error(e.error))?;

        debug!(path = %self.path.display(), entries = registry.len(), "persisted address registry");
        Ok(())
    }

    fn error(&self, err: impl ToString) -> DeployError {
        DeployError::Registry { path: self.path.clone(), message: err.to_string() }
    }
}
