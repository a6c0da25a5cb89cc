use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fiber network a request is routed to
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[serde(alias = "Mainnet")]
    #[default]
    Mainnet,
    #[serde(alias = "Testnet")]
    Testnet,
}

impl Network {
    /// Value of the `net` query/body parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mainnet" | "main" => Ok(Network::Mainnet),
            "testnet" | "test" => Ok(Network::Testnet),
            other => Err(format!("Unknown network: {}", other)),
        }
    }
}
