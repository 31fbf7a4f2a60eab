//! # Runtime Configuration
//!
//! Network presets and environment overrides for one registry deployment.
//!
//! ## Environment Variables
//!
//! - `AUTH_NETWORK`: `hardhat` (default), `sepolia`, `optimism`, `op-sepolia`, `custom`
//! - `AUTH_CHAIN_ID`: chain id; required for `custom`, must match the preset otherwise
//! - `AUTH_DEPLOYER`: deploying account (default: development account #0)
//! - `AUTH_DEPLOYER_NONCE`: deploying account's nonce (default: 0)
//! - `AUTH_LOG_LEVEL` or `RUST_LOG`: log filter (default: info)
//! - `AUTH_JSON_LOGS`: emit JSON logs (default: false)
//! - `AUTH_BUS_CAPACITY`: event bus buffer per subscriber (default: 1000)

use shared_bus::DEFAULT_CHANNEL_CAPACITY;
use shared_types::{format_address, parse_address, Address, ChainId, ParseError, ZERO_ADDRESS};
use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Development account #0, the default deployer of local networks.
pub const DEFAULT_DEPLOYER: Address = [
    0xf3, 0x9f, 0xd6, 0xe5, 0x1a, 0xad, 0x88, 0xf6, 0xf4, 0xce, 0x6a, 0xb8, 0x82, 0x72, 0x79, 0xcf,
    0xff, 0xb9, 0x22, 0x66,
];

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown network: {0} (expected hardhat, sepolia, optimism, op-sepolia or custom)")]
    UnknownNetwork(String),

    #[error("AUTH_CHAIN_ID is required for the custom network")]
    MissingChainId,

    #[error("Chain id must be non-zero")]
    ZeroChainId,

    #[error("Network {network} runs on chain {expected}, not {actual}")]
    ChainIdMismatch {
        network: Network,
        expected: ChainId,
        actual: ChainId,
    },

    #[error("Invalid deployer address: {0}")]
    InvalidDeployer(#[from] ParseError),

    #[error("Deployer must not be the zero address")]
    ZeroDeployer,

    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },

    #[error("Event bus capacity must be at least 1")]
    ZeroBusCapacity,
}

// =============================================================================
// NETWORKS
// =============================================================================

/// Target environment of a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    /// Local development chain.
    Hardhat,
    /// Ethereum Sepolia testnet.
    Sepolia,
    /// OP Mainnet.
    Optimism,
    /// OP Sepolia testnet.
    OpSepolia,
    /// Any other chain; the chain id comes from configuration.
    Custom,
}

impl Network {
    /// Chain id of the preset, `None` for `Custom`.
    pub fn chain_id(&self) -> Option<ChainId> {
        match self {
            Self::Hardhat => Some(ChainId(1337)),
            Self::Sepolia => Some(ChainId(11_155_111)),
            Self::Optimism => Some(ChainId(10)),
            Self::OpSepolia => Some(ChainId(11_155_420)),
            Self::Custom => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Hardhat => "hardhat",
            Self::Sepolia => "sepolia",
            Self::Optimism => "optimism",
            Self::OpSepolia => "op-sepolia",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hardhat" | "localhost" => Ok(Self::Hardhat),
            "sepolia" => Ok(Self::Sepolia),
            "optimism" => Ok(Self::Optimism),
            "op-sepolia" | "op_sepolia" => Ok(Self::OpSepolia),
            "custom" => Ok(Self::Custom),
            other => Err(ConfigError::UnknownNetwork(other.to_string())),
        }
    }
}

// =============================================================================
// CONFIG
// =============================================================================

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log filter directive (trace, debug, info, warn, error, or full `EnvFilter` syntax)
    pub log_level: String,
    /// Whether to emit JSON formatted logs
    pub json_logs: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub network: Network,
    /// Explicit chain id; falls back to the network preset.
    pub chain_id: Option<ChainId>,
    pub deployer: Address,
    pub deployer_nonce: u64,
    pub bus_capacity: usize,
    pub logging: LoggingConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            network: Network::Hardhat,
            chain_id: None,
            deployer: DEFAULT_DEPLOYER,
            deployer_nonce: 0,
            bus_capacity: DEFAULT_CHANNEL_CAPACITY,
            logging: LoggingConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let network = match lookup("AUTH_NETWORK") {
            Some(name) => name.parse()?,
            None => defaults.network,
        };

        let chain_id = lookup("AUTH_CHAIN_ID")
            .map(|v| parse_number::<u64>("AUTH_CHAIN_ID", &v).map(ChainId))
            .transpose()?;

        let deployer = match lookup("AUTH_DEPLOYER") {
            Some(text) => parse_address(&text)?,
            None => defaults.deployer,
        };

        let deployer_nonce = lookup("AUTH_DEPLOYER_NONCE")
            .map(|v| parse_number("AUTH_DEPLOYER_NONCE", &v))
            .transpose()?
            .unwrap_or(defaults.deployer_nonce);

        let bus_capacity = lookup("AUTH_BUS_CAPACITY")
            .map(|v| parse_number("AUTH_BUS_CAPACITY", &v))
            .transpose()?
            .unwrap_or(defaults.bus_capacity);

        let logging = LoggingConfig {
            log_level: lookup("AUTH_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.logging.log_level),
            json_logs: lookup("AUTH_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.logging.json_logs),
        };

        let config = Self {
            network,
            chain_id,
            deployer,
            deployer_nonce,
            bus_capacity,
            logging,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration is deployable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolved_chain_id()?;

        if self.deployer == ZERO_ADDRESS {
            return Err(ConfigError::ZeroDeployer);
        }
        if self.bus_capacity == 0 {
            return Err(ConfigError::ZeroBusCapacity);
        }
        Ok(())
    }

    /// Chain id the registry binds to.
    pub fn resolved_chain_id(&self) -> Result<ChainId, ConfigError> {
        let chain_id = match (self.network.chain_id(), self.chain_id) {
            (None, None) => return Err(ConfigError::MissingChainId),
            (Some(expected), Some(actual)) if expected != actual => {
                return Err(ConfigError::ChainIdMismatch {
                    network: self.network,
                    expected,
                    actual,
                })
            }
            (_, Some(explicit)) => explicit,
            (Some(preset), None) => preset,
        };

        if chain_id.0 == 0 {
            return Err(ConfigError::ZeroChainId);
        }
        Ok(chain_id)
    }

    /// Short human-readable summary for startup logs.
    pub fn summary(&self) -> String {
        format!(
            "network={} deployer={} nonce={}",
            self.network,
            format_address(&self.deployer),
            self.deployer_nonce
        )
    }
}

fn parse_number<T: FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        var,
        value: value.to_string(),
    })
}
