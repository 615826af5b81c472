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

//! Command-line interface definition.
//!
//! Every configurable value can also be supplied through the environment (see
//! [`web3deploy_common::env`]); explicit flags take precedence.

use std::path::PathBuf;

use clap::{builder::BoolishValueParser, Parser};
use web3deploy_common::env;

use crate::{
    config::{
        DEFAULT_ACCOUNT_INDEX, DEFAULT_BUILD_DIR, DEFAULT_COMPILER_VERSION, DEFAULT_RPC_URL,
        DEFAULT_SOURCE_DIR,
    },
    ImportRemapping,
};

/// Command-line interface for web3deploy
#[derive(Debug, Parser)]
#[command(name = "web3deploy")]
#[command(about = "Compile Solidity contracts and deploy them to an Ethereum JSON-RPC endpoint")]
#[command(version)]
pub struct Cli {
    /// Directory scanned for `.sol` files
    #[arg(long, env = env::SOURCE_DIR, default_value = DEFAULT_SOURCE_DIR)]
    pub source_dir: PathBuf,

    /// Solidity compiler version
    #[arg(long, env = env::COMPILER_VERSION, default_value = DEFAULT_COMPILER_VERSION)]
    pub compiler_version: String,

    /// Output directory for compiled artifacts and the address registry
    #[arg(long, env = env::BUILD_DIR, default_value = DEFAULT_BUILD_DIR)]
    pub build_dir: PathBuf,

    /// Ethereum JSON-RPC endpoint
    #[arg(long, env = env::RPC_PROVIDER_URL, default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Target chain is a proof-of-authority network
    #[arg(long, env = env::POA_MODE, value_parser = BoolishValueParser::new())]
    pub poa: bool,

    /// Index into the node's accounts of the account paying for deployments
    #[arg(long, env = env::ACCOUNT_INDEX, default_value_t = DEFAULT_ACCOUNT_INDEX)]
    pub account_index: usize,

    /// Delete the build directory and exit
    #[arg(long)]
    pub clear: bool,

    /// Print the configuration variables with their effective values and exit
    #[arg(long)]
    pub config_help: bool,

    /// Source files to process instead of scanning the source directory
    #[arg(long, value_name = "PATH", num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Only deploy contracts with these names
    #[arg(long, value_name = "NAME", num_args = 1.., value_delimiter = ',')]
    pub contracts: Vec<String>,

    /// Enable the optimizer with this many runs (0 disables it, no value means 200)
    #[arg(long, value_name = "RUNS", num_args = 0..=1, default_missing_value = "200")]
    pub optimize: Option<usize>,

    /// Extra import remapping, e.g. `@solmate/=lib/solmate/src/`
    #[arg(long = "remapping", value_name = "PREFIX=PATH")]
    pub remappings: Vec<ImportRemapping>,

    /// Also write logs to a file in the system temp directory
    #[arg(long)]
    pub log_file: bool,
}
