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

//! Contract name extraction.
//!
//! Each source file is assumed to declare exactly one contract, and the
//! deployer needs its name before compiling: the compiler keys its output by
//! `<path>:<name>`, and the registry is keyed by name. The lookup is done
//! with a pattern match on the raw source text, hidden behind
//! [`NameExtractor`] so a real Solidity parser can replace it later.

use std::{borrow::Borrow, fmt, ops::Deref};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `contract <Name>` followed by an inheritance clause or the opening brace.
static CONTRACT_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bcontract\s+(\w+)(?:\s+is\b|\s*\{)").expect("contract pattern is valid")
});

/// No contract declaration was found in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("contract name pattern unmatched")]
pub struct ExtractionError;

/// Identifier of a declared contract. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractName(String);

impl ContractName {
    /// Wrap `name`, rejecting the empty string.
    pub fn new(name: impl Into<String>) -> Result<Self, ExtractionError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ExtractionError);
        }
        Ok(Self(name))
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for ContractName {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ContractName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContractName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Finds the name of the contract declared in a block of source text.
#[auto_impl::auto_impl(&, Box, Arc)]
pub trait NameExtractor {
    /// Return the declared contract's name, or [`ExtractionError`] if none is found.
    fn extract(&self, source: &str) -> Result<ContractName, ExtractionError>;
}

/// Pattern-based [`NameExtractor`]. The first declaration in the text wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexNameExtractor;

impl NameExtractor for RegexNameExtractor {
    fn extract(&self, source: &str) -> Result<ContractName, ExtractionError> {
        let captures = CONTRACT_DECLARATION.captures(source).ok_or(ExtractionError)?;
        ContractName::new(&captures[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(source: &str) -> Result<ContractName, ExtractionError> {
        RegexNameExtractor.extract(source)
    }

    #[test]
    fn test_plain_declaration() {
        assert_eq!(extract("contract Foo {").unwrap().as_str(), "Foo");
        assert_eq!(extract("contract Foo{ uint x; }").unwrap().as_str(), "Foo");
    }

    #[test]
    fn test_inheritance_clause() {
        assert_eq!(extract("contract Foo is Bar {").unwrap().as_str(), "Foo");
        assert_eq!(extract("contract Token is ERC20, Ownable {").unwrap().as_str(), "Token");
    }

    #[test]
    fn test_full_source_file() {
        let source = r#"// SPDX-License-Identifier: MIT
pragma solidity ^0.8.9;

import "@openzeppelin/contracts/token/ERC20/ERC20.sol";

contract My_Token2
    is ERC20
{
    constructor() ERC20("My", "MY") {}
}
"#;
        assert_eq!(extract(source).unwrap().as_str(), "My_Token2");
    }

    #[test]
    fn test_abstract_contract() {
        assert_eq!(extract("abstract contract Base {").unwrap().as_str(), "Base");
    }

    #[test]
    fn test_first_declaration_wins() {
        let source = "contract First {}\ncontract Second is First {}";
        assert_eq!(extract(source).unwrap().as_str(), "First");
    }

    #[test]
    fn test_no_contract_keyword() {
        assert_eq!(extract("pragma solidity ^0.8.9;\nlibrary Math {}"), Err(ExtractionError));
        assert_eq!(extract(""), Err(ExtractionError));
    }

    #[test]
    fn test_keyword_must_stand_alone() {
        assert_eq!(extract("subcontract Foo {"), Err(ExtractionError));
        assert_eq!(extract("contract Foo isBar {"), Err(ExtractionError));
        assert_eq!(extract("contract Foo;"), Err(ExtractionError));
    }

    #[test]
    fn test_prose_mentioning_contract_is_skipped() {
        let source = "// this contract is upgradeable\ncontract Vault is Base {}";
        assert_eq!(extract(source).unwrap().as_str(), "Vault");
    }

    #[test]
    fn test_contract_name_rejects_empty() {
        assert_eq!(ContractName::new(""), Err(ExtractionError));
        assert_eq!(ContractName::new("A").unwrap().to_string(), "A");
    }
}
