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

//! web3deploy common - shared functionality for web3deploy components
//!
//! This crate provides the pieces shared by the deployer library, its binary
//! and its tests: logging setup, environment variable names and test helpers.

/// Environment variable names recognized by web3deploy
pub mod env;
/// Logging setup and utilities for consistent logging across web3deploy components
pub mod logging;
/// Helpers for building isolated test workspaces
pub mod test_utils;

pub use logging::*;
