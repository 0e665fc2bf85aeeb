//! Compressor configuration.

use std::fmt;
use std::str::FromStr;

use huffpack_core::Error;
use serde::{Deserialize, Serialize};

/// Which byte values receive a leaf in the code tree.
///
/// The policy only affects compression. The tree itself is serialized into
/// the container, so a container decodes the same way whichever policy
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeafPolicy {
    /// Seed one leaf per byte value, including ones absent from the input.
    ///
    /// Every byte value gets a code. The serialized tree is always 320 bytes.
    #[default]
    AllSymbols,

    /// Seed leaves only for byte values present in the input.
    ///
    /// Produces a smaller tree. When fewer than two values are present, the
    /// lowest unused byte values are added as zero-frequency leaves so the
    /// root is always an internal node and every code is at least one bit.
    ObservedOnly,
}

impl LeafPolicy {
    /// Get policy name as string.
    pub fn name(self) -> &'static str {
        match self {
            LeafPolicy::AllSymbols => "all_symbols",
            LeafPolicy::ObservedOnly => "observed_only",
        }
    }
}

impl fmt::Display for LeafPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LeafPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" | "all_symbols" | "all-symbols" => Ok(LeafPolicy::AllSymbols),
            "observed" | "observed_only" | "observed-only" => Ok(LeafPolicy::ObservedOnly),
            other => Err(Error::config(format!(
                "unknown leaf policy '{}': expected 'all' or 'observed'",
                other
            ))),
        }
    }
}

/// Huffman compressor configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HuffmanConfig {
    /// Leaf seeding policy for the tree builder.
    #[serde(default)]
    pub leaf_policy: LeafPolicy,
}

impl HuffmanConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the leaf seeding policy.
    pub fn with_leaf_policy(mut self, leaf_policy: LeafPolicy) -> Self {
        self.leaf_policy = leaf_policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        assert_eq!(HuffmanConfig::new().leaf_policy, LeafPolicy::AllSymbols);
    }

    #[test]
    fn test_parse_policy() {
        assert_eq!("all".parse::<LeafPolicy>().unwrap(), LeafPolicy::AllSymbols);
        assert_eq!(
            "Observed-Only".parse::<LeafPolicy>().unwrap(),
            LeafPolicy::ObservedOnly
        );
        let err = "sparse".parse::<LeafPolicy>().unwrap_err();
        assert_eq!(err.category(), "config");
    }

    #[test]
    fn test_serde_names() {
        let config = HuffmanConfig::new().with_leaf_policy(LeafPolicy::ObservedOnly);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"leaf_policy":"observed_only"}"#);

        let parsed: HuffmanConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, HuffmanConfig::default());
    }
}
