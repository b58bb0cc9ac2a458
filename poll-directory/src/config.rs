use poll_abi::{parse_address, Address};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::Path;
use thiserror::Error;

/// the contract deployed on Rootstock Testnet
const DEFAULT_CONTRACT_ADDRESS: [u8; 20] = [
    0xb5, 0x64, 0x8e, 0x2f, 0xf9, 0x97, 0x78, 0x74, 0x35, 0x9c, 0x4c, 0xac, 0x2d, 0xf6, 0x11, 0x99,
    0x87, 0x20, 0x40, 0xe6,
];
const DEFAULT_CHAIN_ID: u64 = 31;
const DEFAULT_RPC_URL: &str = "https://public-node.testnet.rsk.co";
const DEFAULT_VOTE_GAS_LIMIT: u64 = 100_000;
const DEFAULT_CREATE_POLL_GAS_LIMIT: u64 = 200_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read the client configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid client configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where the voting contract lives and how transactions to it are sent.
///
/// Every field is optional in the serialized form and falls back to the
/// Rootstock Testnet deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ClientConfig {
    #[serde(
        serialize_with = "serialize_address",
        deserialize_with = "deserialize_address"
    )]
    pub contract_address: Address,
    pub chain_id: u64,
    pub rpc_url: String,
    pub vote_gas_limit: u64,
    pub create_poll_gas_limit: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            contract_address: Address::from(DEFAULT_CONTRACT_ADDRESS),
            chain_id: DEFAULT_CHAIN_ID,
            rpc_url: DEFAULT_RPC_URL.to_owned(),
            vote_gas_limit: DEFAULT_VOTE_GAS_LIMIT,
            create_poll_gas_limit: DEFAULT_CREATE_POLL_GAS_LIMIT,
        }
    }
}

impl ClientConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

fn serialize_address<S: Serializer>(address: &Address, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&poll_abi::format_address(address))
}

fn deserialize_address<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Address, D::Error> {
    let s = String::deserialize(deserializer)?;
    parse_address(&s).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_testnet_deployment() {
        let config = ClientConfig::default();
        assert_eq!(
            poll_abi::format_address(&config.contract_address),
            "0xb5648e2ff9977874359c4cac2df61199872040e6"
        );
        assert_eq!(config.chain_id, 31);
        assert_eq!(config.vote_gas_limit, 100_000);
        assert_eq!(config.create_poll_gas_limit, 200_000);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config = ClientConfig::from_json(r#"{ "chainId": 1337 }"#).unwrap();
        assert_eq!(config.chain_id, 1337);
        assert_eq!(config.rpc_url, DEFAULT_RPC_URL);
        assert_eq!(
            config.contract_address,
            ClientConfig::default().contract_address
        );
    }

    #[test]
    fn contract_address_any_case() {
        let config = ClientConfig::from_json(
            r#"{ "contractAddress": "0xABabABabABabABabABabABabABabABabABabABab" }"#,
        )
        .unwrap();
        assert_eq!(config.contract_address, Address::repeat_byte(0xab));
    }

    #[test]
    fn invalid_contract_address_is_rejected() {
        let error = ClientConfig::from_json(r#"{ "contractAddress": "0x1234" }"#).unwrap_err();
        assert!(matches!(error, ConfigError::Json(_)));
        assert!(error.to_string().contains("0x1234"));
    }

    #[test]
    fn unknown_field_is_rejected() {
        assert!(ClientConfig::from_json(r#"{ "chainID": 1 }"#).is_err());
    }

    #[test]
    fn serialized_config_reads_back() {
        let config = ClientConfig {
            chain_id: 1,
            ..ClientConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""contractAddress":"0xb5648e2ff9977874359c4cac2df61199872040e6""#));
        assert_eq!(ClientConfig::from_json(&json).unwrap(), config);
    }
}
