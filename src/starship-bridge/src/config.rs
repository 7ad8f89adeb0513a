//! Network book: network key -> deployed contract, EVM chain id, LayerZero endpoint id.
//!
//! Read from the same JSON shape the deploy tooling writes:
//!
//! ```json
//! {
//!   "deployments": {
//!     "base-sepolia": { "address": "0x...", "rpc_url": "https://sepolia.base.org" },
//!     "arbitrum-sepolia": { "address": "0x...", "chain_id": 421614, "endpoint_id": 40231 }
//!   }
//! }
//! ```
//!
//! `chain_id` / `endpoint_id` may be omitted for the networks in [`KNOWN_NETWORKS`].

use std::{collections::BTreeMap, fs, path::Path};

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::errors::{BridgeError, Result};

pub const BASE_SEPOLIA: &str = "base-sepolia";
pub const ARBITRUM_SEPOLIA: &str = "arbitrum-sepolia";

/// (key, chain id, endpoint id)
pub const KNOWN_NETWORKS: &[(&str, u64, u32)] = &[
    (BASE_SEPOLIA, 84532, 40245),
    (ARBITRUM_SEPOLIA, 421614, 40231),
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub contract_address: Address,
    pub chain_id: u64,
    pub endpoint_id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NetworkBook {
    pub networks: BTreeMap<String, NetworkConfig>,
}

#[derive(Deserialize)]
struct RawBook {
    #[serde(alias = "deployments")]
    networks: BTreeMap<String, RawEntry>,
}

#[derive(Deserialize)]
struct RawEntry {
    #[serde(alias = "address")]
    contract_address: Address,
    chain_id: Option<u64>,
    endpoint_id: Option<u32>,
    rpc_url: Option<String>,
}

impl NetworkBook {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| BridgeError::Config(format!("failed reading {}: {e}", path.display())))?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let book: RawBook = serde_json::from_str(raw)
            .map_err(|e| BridgeError::Config(format!("failed parsing network book: {e}")))?;

        let mut networks = BTreeMap::new();
        for (key, entry) in book.networks {
            let known = known_network(&key);
            let chain_id = entry
                .chain_id
                .or(known.map(|(chain_id, _)| chain_id))
                .ok_or_else(|| BridgeError::Config(format!("`{key}` is missing chain_id")))?;
            let endpoint_id = entry
                .endpoint_id
                .or(known.map(|(_, eid)| eid))
                .ok_or_else(|| BridgeError::Config(format!("`{key}` is missing endpoint_id")))?;
            if entry.contract_address == Address::ZERO {
                return Err(BridgeError::Config(format!("`{key}` has a zero contract address")));
            }
            networks.insert(
                key,
                NetworkConfig {
                    contract_address: entry.contract_address,
                    chain_id,
                    endpoint_id,
                    rpc_url: entry.rpc_url,
                },
            );
        }
        Ok(Self { networks })
    }

    pub fn get(&self, key: &str) -> Result<&NetworkConfig> {
        self.networks
            .get(key)
            .ok_or_else(|| BridgeError::UnknownNetwork(key.to_string()))
    }

    pub fn by_endpoint_id(&self, endpoint_id: u32) -> Option<(&str, &NetworkConfig)> {
        self.networks
            .iter()
            .find(|(_, cfg)| cfg.endpoint_id == endpoint_id)
            .map(|(key, cfg)| (key.as_str(), cfg))
    }

    pub fn by_chain_id(&self, chain_id: u64) -> Option<(&str, &NetworkConfig)> {
        self.networks
            .iter()
            .find(|(_, cfg)| cfg.chain_id == chain_id)
            .map(|(key, cfg)| (key.as_str(), cfg))
    }
}

/// Chain id and endpoint id for a built-in network key.
pub fn known_network(key: &str) -> Option<(u64, u32)> {
    KNOWN_NETWORKS
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|(_, chain_id, eid)| (*chain_id, *eid))
}
