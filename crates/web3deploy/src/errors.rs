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

//! Error types for the compile-and-deploy pipeline.
//!
//! Every failure the pipeline can hit maps onto one [`DeployError`] variant.
//! All of them are fatal: they propagate to the binary, which reports them and
//! exits with a non-zero status. A missing address registry is not an error at
//! all; it is logged as a warning and treated as empty.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::ExtractionError;

/// Convenience alias used across the crate.
pub type Result<T, E = DeployError> = std::result::Result<T, E>;

/// Errors raised while compiling and deploying contracts.
#[derive(Debug, Error)]
pub enum DeployError {
    /// Invalid or missing configuration. Raised before anything is compiled.
    #[error("configuration error: {0}")]
    Config(String),

    /// No contract declaration could be found in a source file.
    #[error("failed to extract contract name from {}: {source}", path.display())]
    Extraction {
        /// Source file that was scanned.
        path: PathBuf,
        /// Underlying extraction failure.
        #[source]
        source: ExtractionError,
    },

    /// The requested compiler version could not be found or installed.
    #[error("solc {version} is unavailable: {message}")]
    CompilerUnavailable {
        /// Requested compiler version.
        version: String,
        /// Why the compiler could not be resolved.
        message: String,
    },

    /// The compiler rejected a source file or could not be run at all.
    #[error("failed to compile {}: {message}", path.display())]
    Compilation {
        /// Source file being compiled.
        path: PathBuf,
        /// Compiler diagnostics or invocation failure.
        message: String,
    },

    /// A contract-creation transaction could not be submitted or mined.
    #[error("failed to deploy {contract}: {message}")]
    Deployment {
        /// Name of the contract being deployed.
        contract: String,
        /// What went wrong.
        message: String,
    },

    /// The address registry could not be read, parsed or written.
    #[error("address registry {} is unusable: {message}", path.display())]
    Registry {
        /// Registry file.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// Filesystem failure outside the registry.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl DeployError {
    /// Build a [`DeployError::Config`] from anything printable.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Build a [`DeployError::Deployment`] for `contract`.
    pub fn deployment(contract: impl Into<String>, message: impl ToString) -> Self {
        Self::Deployment { contract: contract.into(), message: message.to_string() }
    }

    /// Build a [`DeployError::Io`] for `path`.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
