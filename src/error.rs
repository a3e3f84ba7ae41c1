use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    // Wallet errors
    #[error("No wallet account configured")]
    WalletUnavailable,

    #[error("Invalid private key")]
    InvalidPrivateKey,

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    // Contract errors
    #[error("Contract not connected")]
    ContractNotConnected,

    #[error("Contract read failed: {0}")]
    ContractRead(String),

    #[error("Campaign not found: {0}")]
    CampaignNotFound(String),

    // Transaction errors
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Transaction reverted: {0}")]
    TransactionReverted(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Pledge value overflows the native currency range")]
    AmountOverflow,

    // Keystore errors
    #[error("Encryption failed: {0}")]
    EncryptionError(String),

    #[error("Decryption failed: {0}")]
    DecryptionError(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationError(String),

    // Network errors
    #[error("RPC error: {0}")]
    RpcError(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid campaign parameters: {0}")]
    InvalidCampaign(String),

    // System errors
    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ClientError {
    /// Check if the failure came back from the node or transport
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            ClientError::ContractRead(_)
                | ClientError::TransactionFailed(_)
                | ClientError::TransactionReverted(_)
                | ClientError::RpcError(_)
        )
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            ClientError::WalletUnavailable
            | ClientError::InvalidPrivateKey
            | ClientError::InvalidAddress(_) => "wallet",

            ClientError::ContractNotConnected
            | ClientError::ContractRead(_)
            | ClientError::CampaignNotFound(_) => "contract",

            ClientError::TransactionFailed(_)
            | ClientError::TransactionReverted(_)
            | ClientError::InvalidAmount(_)
            | ClientError::AmountOverflow => "transaction",

            ClientError::EncryptionError(_)
            | ClientError::DecryptionError(_)
            | ClientError::KeyDerivationError(_) => "keystore",

            ClientError::RpcError(_) => "network",

            ClientError::InvalidConfiguration(_) | ClientError::InvalidCampaign(_) => {
                "configuration"
            }

            ClientError::SerializationError(_) | ClientError::IoError(_) => "system",
        }
    }
}

// Result type alias for convenience
pub type ClientResult<T> = Result<T, ClientError>;
