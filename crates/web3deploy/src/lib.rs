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

//! Compile Solidity contracts and deploy them to an Ethereum JSON-RPC endpoint.
//!
//! A run resolves a list of source files, extracts the contract each one
//! declares, compiles it with solc, deploys it from a node-managed account and
//! records the resulting address in `address.json` in the build directory.
//! Entries for contracts not touched by a run are carried over.
//!
//! The moving parts are small and separately usable:
//!
//! - [`locate_sources`] picks the files,
//! - a [`NameExtractor`] finds the contract name,
//! - a [`SolidityCompiler`] produces ABI and bytecode,
//! - a [`ContractDeployer`] puts the bytecode on chain,
//! - the [`RegistryStore`] loads and persists the addresses.
//!
//! [`Pipeline`] wires them together.

pub mod artifacts;
pub use artifacts::*;

pub mod cli;
pub use cli::*;

pub mod compiler;
pub use compiler::*;

pub mod config;
pub use config::*;

pub mod deployer;
pub use deployer::*;

pub mod errors;
pub use errors::*;

pub mod extract;
pub use extract::*;

pub mod pipeline;
pub use pipeline::*;

pub mod registry;
pub use registry::*;

pub mod source;
pub use source::*;
