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

//! `web3deploy` command-line entry point.

use clap::Parser;
use eyre::Result;
use web3deploy::{
    help_text, locate_sources, BuildDir, Cli, DeployConfig, Pipeline, RpcDeployer, SolcCompiler,
};
use web3deploy_common::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    logging::init_logging("web3deploy", cli.log_file)?;

    // Neither needs a validated configuration
    if cli.config_help {
        print!("{}", help_text(&cli));
        return Ok(());
    }

    if cli.clear {
        let build_dir = BuildDir::new(&cli.build_dir);
        if !build_dir.clear()? {
            tracing::info!("Nothing to clear at {}", build_dir.root().display());
        }
        return Ok(());
    }

    let config = DeployConfig::from_cli(&cli)?;

    let sources = locate_sources(&config.files, &config.source_dir)?;
    if sources.is_empty() {
        tracing::warn!("No Solidity sources found in {}", config.source_dir.display());
        return Ok(());
    }
    tracing::info!("Found {} source file(s)", sources.len());

    // Installing solc downloads through a blocking client
    let compiler = {
        let config = config.clone();
        tokio::task::spawn_blocking(move || SolcCompiler::new(&config)).await??
    };

    let deployer = RpcDeployer::connect(&config).await?;
    let summary = Pipeline::new(&config, compiler, deployer).run(&sources).await?;

    for (name, address) in summary.deployed.iter() {
        tracing::info!("{name}: {address}");
    }
    tracing::info!(
        "Deployed {} contract(s), {} recorded in {}",
        summary.deployed.len(),
        summary.registry.len(),
        BuildDir::new(&config.build_dir).registry_path().display()
    );

    Ok(())
}
