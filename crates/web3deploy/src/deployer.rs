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

//! Contract deployment over JSON-RPC.
//!
//! Deployment uses an unlocked account managed by the node: the creation
//! transaction is sent with `eth_sendTransaction` from the account at the
//! configured index of `eth_accounts`, and the node signs it. No private keys
//! are handled here.

use std::future::Future;

use alloy_network::{ReceiptResponse, TransactionBuilder};
use alloy_primitives::Address;
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_rpc_types::TransactionRequest;
use tracing::{debug, info};

use crate::{CompiledArtifact, ContractName, DeployConfig, DeployError, Result};

/// Deploys compiled contracts to a chain.
pub trait ContractDeployer {
    /// Submit the creation bytecode of `artifact` and wait until it is mined.
    ///
    /// Resolves to the address of the new contract.
    fn deploy(
        &self,
        name: &ContractName,
        artifact: &CompiledArtifact,
    ) -> impl Future<Output = Result<Address>> + Send;
}

impl<T: ContractDeployer> ContractDeployer for &T {
    fn deploy(
        &self,
        name: &ContractName,
        artifact: &CompiledArtifact,
    ) -> impl Future<Output = Result<Address>> + Send {
        (**self).deploy(name, artifact)
    }
}

/// [`ContractDeployer`] sending transactions from a node-managed account.
#[derive(Debug, Clone)]
pub struct RpcDeployer {
    provider: DynProvider,
    account: Address,
}

impl RpcDeployer {
    /// Connect to the configured endpoint and select the deploying account.
    pub async fn connect(config: &DeployConfig) -> Result<Self> {
        if config.poa {
            // Extended block headers are decoded natively, nothing to configure.
            info!("proof-of-authority mode enabled");
        }

        let provider = ProviderBuilder::new()
            .connect(&config.rpc_url)
            .await
            .map_err(|e| {
                DeployError::config(format!("cannot connect to {}: {e}", config.rpc_url))
            })?
            .erased();

        let accounts = provider.get_accounts().await.map_err(|e| {
            DeployError::config(format!("cannot list accounts of {}: {e}", config.rpc_url))
        })?;
        let account = accounts.get(config.account_index).copied().ok_or_else(|| {
            DeployError::config(format!(
                "account index {} is out of range, the node manages {} account(s)",
                config.account_index,
                accounts.len()
            ))
        })?;
        info!(rpc_url = %config.rpc_url, %account, "connected");

        Ok(Self { provider, account })
    }

    /// The account contracts are deployed from.
    pub fn account(&self) -> Address {
        self.account
    }
}

impl ContractDeployer for RpcDeployer {
    async fn deploy(&self, name: &ContractName, artifact: &CompiledArtifact) -> Result<Address> {
        if artifact.bin.is_empty() {
            return Err(DeployError::deployment(name.as_str(), "empty creation bytecode"));
        }

        let tx = TransactionRequest::default()
            .with_from(self.account)
            .with_deploy_code(artifact.bin.clone());

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| DeployError::deployment(name.as_str(), e))?;
        debug!(contract = %name, tx_hash = %pending.tx_hash(), "creation transaction sent");

        let receipt =
            pending.get_receipt().await.map_err(|e| DeployError::deployment(name.as_str(), e))?;
        if !receipt.status() {
            return Err(DeployError::deployment(
                name.as_str(),
                format!("transaction {} reverted", receipt.transaction_hash()),
            ));
        }

        receipt.contract_address().ok_or_else(|| {
            DeployError::deployment(name.as_str(), "receipt carries no contract address")
        })
    }
}
