// src/wallet/mod.rs
pub mod keystore;

use crate::error::{ClientError, ClientResult};
use crate::types::ClientConfig;
use alloy::network::EthereumWallet;
use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use std::str::FromStr;
use tracing::info;

/// Signing accounts plus the provider they transact through.
///
/// This is the crate's stand-in for an injected browser wallet: the key
/// list comes from configuration, the first key is the active sender.
#[derive(Clone, Debug)]
pub struct WalletSession {
    signers: Vec<PrivateKeySigner>,
    provider: DynProvider,
    network_name: String,
}

impl WalletSession {
    /// Build a session from the configured keys and network.
    ///
    /// Fails when no key is configured, a key is malformed, or the RPC URL
    /// does not parse. There is no retry; the caller decides what to do.
    pub fn connect(config: &ClientConfig) -> ClientResult<Self> {
        if config.private_keys.is_empty() {
            return Err(ClientError::WalletUnavailable);
        }

        let mut signers = Vec::with_capacity(config.private_keys.len());
        for raw in &config.private_keys {
            signers.push(parse_private_key(raw)?);
        }

        let url = config.network.rpc_url.parse().map_err(|e| {
            ClientError::InvalidConfiguration(format!(
                "invalid RPC URL {}: {}",
                config.network.rpc_url, e
            ))
        })?;

        let mut wallet = EthereumWallet::new(signers[0].clone());
        for signer in &signers[1..] {
            wallet.register_signer(signer.clone());
        }

        let provider = ProviderBuilder::new().wallet(wallet).connect_http(url).erased();

        info!(
            network = %config.network.name,
            accounts = signers.len(),
            sender = %signers[0].address(),
            "wallet session ready"
        );

        Ok(Self {
            signers,
            provider,
            network_name: config.network.name.clone(),
        })
    }

    /// Active sender, the first configured account
    pub fn address(&self) -> Address {
        self.signers[0].address()
    }

    /// All configured accounts
    pub fn accounts(&self) -> Vec<Address> {
        self.signers.iter().map(|s| s.address()).collect()
    }

    pub fn network_name(&self) -> &str {
        &self.network_name
    }

    pub fn provider(&self) -> DynProvider {
        self.provider.clone()
    }

    /// Native balance of `address` in wei
    pub async fn native_balance(&self, address: Address) -> ClientResult<U256> {
        self.provider
            .get_balance(address)
            .await
            .map_err(|e| ClientError::RpcError(e.to_string()))
    }
}

/// Parse a raw hex private key, with or without the 0x prefix
pub fn parse_private_key(raw: &str) -> ClientResult<PrivateKeySigner> {
    validate_private_key(raw)?;
    PrivateKeySigner::from_str(raw.trim()).map_err(|_| ClientError::InvalidPrivateKey)
}

/// Validate private key format (64 hex characters, optional 0x prefix)
pub fn validate_private_key(private_key: &str) -> ClientResult<()> {
    let key = private_key.trim();
    let key = key.strip_prefix("0x").unwrap_or(key);

    if key.len() != 64 {
        return Err(ClientError::InvalidPrivateKey);
    }

    if !key.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ClientError::InvalidPrivateKey);
    }

    Ok(())
}

/// Validate Ethereum address format (40 hex characters, optional 0x prefix)
pub fn validate_address(address: &str) -> ClientResult<()> {
    let addr = address.trim();
    let addr = addr.strip_prefix("0x").unwrap_or(addr);

    if addr.len() != 40 {
        return Err(ClientError::InvalidAddress(address.to_string()));
    }

    if !addr.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ClientError::InvalidAddress(address.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NetworkProfile;

    // Well-known local development key, account #0 of the default mnemonic
    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const DEV_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    fn dev_config() -> ClientConfig {
        ClientConfig {
            network: NetworkProfile::localhost(),
            private_keys: vec![DEV_KEY.to_string()],
            ..ClientConfig::default()
        }
    }

    #[test]
    fn test_connect_without_keys_fails() {
        let config = ClientConfig::default();
        let err = WalletSession::connect(&config).unwrap_err();
        assert!(matches!(err, ClientError::WalletUnavailable));
    }

    #[test]
    fn test_connect_derives_expected_address() {
        let session = WalletSession::connect(&dev_config()).unwrap();
        assert_eq!(
            session.address(),
            Address::from_str(DEV_ADDRESS).unwrap()
        );
        assert_eq!(session.accounts().len(), 1);
        assert_eq!(session.network_name(), "localhost");
    }

    #[test]
    fn test_connect_with_multiple_accounts() {
        let mut config = dev_config();
        config.private_keys.push(
            "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d".to_string(),
        );

        let session = WalletSession::connect(&config).unwrap();
        assert_eq!(session.accounts().len(), 2);
        // first key stays the active sender
        assert_eq!(session.address(), Address::from_str(DEV_ADDRESS).unwrap());
    }

    #[test]
    fn test_connect_rejects_malformed_key() {
        let mut config = dev_config();
        config.private_keys = vec!["0xdeadbeef".to_string()];
        let err = WalletSession::connect(&config).unwrap_err();
        assert!(matches!(err, ClientError::InvalidPrivateKey));
    }

    #[test]
    fn test_connect_rejects_malformed_rpc_url() {
        let mut config = dev_config();
        config.network.rpc_url = "not a url".to_string();
        let err = WalletSession::connect(&config).unwrap_err();
        assert!(matches!(err, ClientError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_private_key_validation() {
        assert!(validate_private_key(DEV_KEY).is_ok());
        assert!(validate_private_key(DEV_KEY.strip_prefix("0x").unwrap()).is_ok());
        assert!(validate_private_key("0xdeadbeef").is_err());
        assert!(
            validate_private_key(
                "gggggggggggggggggggggggggggggggggggggggggggggggggggggggggggggggg"
            )
            .is_err()
        );
    }

    #[test]
    fn test_address_validation() {
        assert!(validate_address(DEV_ADDRESS).is_ok());
        assert!(validate_address("0x742d35Cc").is_err());
        assert!(validate_address("0xgggggggggggggggggggggggggggggggggggggggg").is_err());
    }
}
