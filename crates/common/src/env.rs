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

//! Environment variable name constants for web3deploy configuration.
//!
//! Every setting of the deployer can be supplied through the environment (or a
//! `.env` file in the working directory). These constants are the single
//! source of truth for the variable names, shared by the CLI definition, the
//! configuration help output and the tests.
//!
//! # Environment Variables
//!
//! ## Build Configuration
//! - [`SOURCE_DIR`] - Directory scanned for Solidity sources
//! - [`COMPILER_VERSION`] - solc version used for compilation
//! - [`BUILD_DIR`] - Output directory for artifacts and the address registry
//!
//! ## Chain Configuration
//! - [`RPC_PROVIDER_URL`] - JSON-RPC endpoint of the target chain
//! - [`POA_MODE`] - Whether the target chain is a proof-of-authority network
//! - [`ACCOUNT_INDEX`] - Which node-managed account pays for deployments

/// Environment variable for the directory scanned for contract sources.
///
/// Only the top level of the directory is scanned, and only files ending in
/// `.sol` are picked up. Ignored when explicit files are passed with `--files`.
///
/// # Examples
///
/// ```bash
/// SOURCE_DIR=contracts web3deploy
/// ```
pub const SOURCE_DIR: &str = "SOURCE_DIR";

/// Environment variable for the solc version, e.g. `0.8.9`.
///
/// The compiler is installed on first use if it is not found locally.
pub const COMPILER_VERSION: &str = "COMPILER_VERSION";

/// Environment variable for the build output directory.
///
/// Holds `contract/<Name>.json` compiler output and the `address.json`
/// registry of deployed addresses.
pub const BUILD_DIR: &str = "BUILD_DIR";

/// Environment variable for the JSON-RPC endpoint deployments are sent to.
pub const RPC_PROVIDER_URL: &str = "RPC_PROVIDER_URL";

/// Environment variable marking the target chain as proof-of-authority.
///
/// # Values
///
/// - `"true"`, `"1"`, `"yes"`, `"on"` - Proof-of-authority chain
/// - `"false"`, `"0"`, `"no"`, `"off"` or unset - Regular chain
pub const POA_MODE: &str = "POA_MODE";

/// Environment variable selecting the deployer from the node's `eth_accounts`.
///
/// Must be a valid index into the account list reported by the node.
pub const ACCOUNT_INDEX: &str = "ACCOUNT_INDEX";

/// All configuration variables, in the order they are documented.
pub const ALL: [&str; 6] =
    [SOURCE_DIR, COMPILER_VERSION, BUILD_DIR, RPC_PROVIDER_URL, POA_MODE, ACCOUNT_INDEX];
