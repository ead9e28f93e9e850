//! Tokens, the token list, and the swap pair.
//!
//! The token list is static configuration. The pair is the only piece
//! of it that changes at runtime, and every change goes through
//! [`SwapPair::select_source`] / [`SwapPair::select_target`] so the
//! `source != target` invariant can never be observed broken.

use std::fmt;

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default decimal scale for every token in this system.
pub const DEFAULT_DECIMALS: u8 = 18;

/// An ERC-20 token the user can swap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Contract address (chain-unique).
    pub address: Address,
    /// Display label.
    pub name: String,
    /// Base-unit scale.
    pub decimals: u8,
}

impl Token {
    /// Create an 18-decimal token.
    pub fn new(name: impl Into<String>, address: Address) -> Self {
        Self {
            address,
            name: name.into(),
            decimals: DEFAULT_DECIMALS,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.address)
    }
}

/// Token list construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenListError {
    #[error("token list needs at least two tokens, got {0}")]
    TooShort(usize),
    #[error("duplicate token address {0}")]
    DuplicateAddress(Address),
}

/// Ordered token list with at least two entries and distinct addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    /// Validate and wrap an ordered list of tokens.
    pub fn new(tokens: Vec<Token>) -> Result<Self, TokenListError> {
        if tokens.len() < 2 {
            return Err(TokenListError::TooShort(tokens.len()));
        }
        for (i, token) in tokens.iter().enumerate() {
            if tokens[..i].iter().any(|t| t.address == token.address) {
                return Err(TokenListError::DuplicateAddress(token.address));
            }
        }
        Ok(Self { tokens })
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always `false`; the constructor rejects short lists.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn by_address(&self, address: Address) -> Option<&Token> {
        self.tokens.iter().find(|t| t.address == address)
    }

    /// Look a token up by address or by case-insensitive name.
    pub fn find(&self, key: &str) -> Option<&Token> {
        if let Ok(address) = key.parse::<Address>() {
            return self.by_address(address);
        }
        self.tokens
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(key))
    }

    /// First token in list order whose address differs from `address`.
    pub fn first_other_than(&self, address: Address) -> &Token {
        // Two distinct addresses are guaranteed by the constructor.
        self.tokens
            .iter()
            .find(|t| t.address != address)
            .unwrap_or(&self.tokens[0])
    }

    /// The default pair: list entries 0 and 1.
    pub fn default_pair(&self) -> SwapPair {
        SwapPair {
            source: self.tokens[0].clone(),
            target: self.tokens[1].clone(),
        }
    }
}

/// Source/target token pair. `source.address != target.address` always.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapPair {
    source: Token,
    target: Token,
}

impl SwapPair {
    /// Build a pair from two distinct tokens.
    pub fn new(source: Token, target: Token) -> Option<Self> {
        (source.address != target.address).then_some(Self { source, target })
    }

    pub const fn source(&self) -> &Token {
        &self.source
    }

    pub const fn target(&self) -> &Token {
        &self.target
    }

    /// Ordered router path `[source, target]`.
    pub fn path(&self) -> Vec<Address> {
        vec![self.source.address, self.target.address]
    }

    /// Select a new source token.
    ///
    /// If it collides with the target, the target moves to the first
    /// other token in the list.
    pub fn select_source(&mut self, list: &TokenList, token: &Token) {
        if token.address == self.target.address {
            self.target = list.first_other_than(token.address).clone();
        }
        self.source = token.clone();
    }

    /// Select a new target token, mirroring [`Self::select_source`].
    pub fn select_target(&mut self, list: &TokenList, token: &Token) {
        if token.address == self.source.address {
            self.source = list.first_other_than(token.address).clone();
        }
        self.target = token.clone();
    }
}

impl fmt::Display for SwapPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}→{}", self.source.name, self.target.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> TokenList {
        TokenList::new(vec![
            Token::new("TKA", Address::repeat_byte(0xaa)),
            Token::new("TKB", Address::repeat_byte(0xbb)),
            Token::new("TKC", Address::repeat_byte(0xcc)),
        ])
        .unwrap()
    }

    #[test]
    fn test_token_list_rejects_short_lists() {
        let one = vec![Token::new("TKA", Address::repeat_byte(1))];
        assert_eq!(TokenList::new(one), Err(TokenListError::TooShort(1)));
    }

    #[test]
    fn test_token_list_rejects_duplicates() {
        let dup = vec![
            Token::new("TKA", Address::repeat_byte(1)),
            Token::new("TKA2", Address::repeat_byte(1)),
        ];
        assert_eq!(
            TokenList::new(dup),
            Err(TokenListError::DuplicateAddress(Address::repeat_byte(1)))
        );
    }

    #[test]
    fn test_default_pair_is_first_two() {
        let pair = list().default_pair();
        assert_eq!(pair.source().name, "TKA");
        assert_eq!(pair.target().name, "TKB");
        assert_eq!(
            pair.path(),
            vec![Address::repeat_byte(0xaa), Address::repeat_byte(0xbb)]
        );
    }

    #[test]
    fn test_select_source_equal_to_target_reassigns_target() {
        let tokens = list();
        let mut pair = tokens.default_pair();
        let tkb = tokens.find("TKB").unwrap().clone();

        pair.select_source(&tokens, &tkb);

        assert_eq!(pair.source().name, "TKB");
        assert_eq!(pair.target().name, "TKA");
    }

    #[test]
    fn test_select_target_equal_to_source_reassigns_source() {
        let tokens = list();
        let mut pair = tokens.default_pair();
        let tka = tokens.find("tka").unwrap().clone();

        pair.select_target(&tokens, &tka);

        assert_eq!(pair.target().name, "TKA");
        assert_eq!(pair.source().name, "TKB");
    }

    #[test]
    fn test_select_non_colliding_keeps_other_side() {
        let tokens = list();
        let mut pair = tokens.default_pair();
        let tkc = tokens.find("TKC").unwrap().clone();

        pair.select_target(&tokens, &tkc);

        assert_eq!(pair.source().name, "TKA");
        assert_eq!(pair.target().name, "TKC");
    }

    #[test]
    fn test_find_by_address() {
        let tokens = list();
        let addr = Address::repeat_byte(0xcc).to_string();
        assert_eq!(tokens.find(&addr).unwrap().name, "TKC");
        assert!(tokens.find("TKZ").is_none());
    }

    #[test]
    fn test_pair_new_rejects_same_token() {
        let t = Token::new("TKA", Address::repeat_byte(1));
        assert!(SwapPair::new(t.clone(), t).is_none());
    }
}
