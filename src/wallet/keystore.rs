// src/wallet/keystore.rs
use crate::error::{ClientError, ClientResult};
use aes_gcm::{
    Aes256Gcm, Key, Nonce,
    aead::{Aead, AeadCore, KeyInit, OsRng},
};
use argon2::Argon2;
use base64::{Engine as _, engine::general_purpose};
use serde::{Deserialize, Serialize};
use std::path::Path;
use zeroize::Zeroize;

const SECRET_VERSION: u8 = 1;
const SALT_LEN: usize = 16;

/// Encrypted container for a private key at rest.
///
/// Versioned so the on-disk format can evolve; `salt` is present only for
/// password-derived encryption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptedSecret {
    pub ciphertext: Vec<u8>,
    pub nonce: [u8; 12],
    pub salt: Option<Vec<u8>>,
    pub version: u8,
}

impl EncryptedSecret {
    /// Write the container to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> ClientResult<()> {
        let json = serde_json::to_vec_pretty(self)
            .map_err(|e| ClientError::SerializationError(e.to_string()))?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a container from a JSON file
    pub fn load(path: impl AsRef<Path>) -> ClientResult<Self> {
        let bytes = std::fs::read(path)?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::SerializationError(e.to_string()))
    }
}

/// Key vault guarding private keys with AES-256-GCM
pub struct KeyVault {
    cipher: Aes256Gcm,
}

impl KeyVault {
    pub fn new(encryption_key: [u8; 32]) -> Self {
        let key = Key::<Aes256Gcm>::from_slice(&encryption_key);
        Self {
            cipher: Aes256Gcm::new(key),
        }
    }

    /// Encrypt a private key, returning a base64 blob safe to store
    pub async fn encrypt_private_key(&self, private_key: &str) -> ClientResult<String> {
        let secret = self.seal(private_key.as_bytes())?;
        let json = serde_json::to_vec(&secret)
            .map_err(|e| ClientError::EncryptionError(e.to_string()))?;
        Ok(general_purpose::STANDARD.encode(json))
    }

    /// Decrypt a blob produced by `encrypt_private_key`
    pub async fn decrypt_private_key(&self, blob: &str) -> ClientResult<String> {
        let json = general_purpose::STANDARD
            .decode(blob)
            .map_err(|e| ClientError::DecryptionError(e.to_string()))?;
        let secret: EncryptedSecret = serde_json::from_slice(&json)
            .map_err(|e| ClientError::DecryptionError(e.to_string()))?;

        let mut plaintext = self.open(&secret)?;
        let key = String::from_utf8(plaintext.clone())
            .map_err(|e| ClientError::DecryptionError(e.to_string()))?;
        plaintext.zeroize();
        Ok(key)
    }

    /// Encrypt arbitrary bytes into a container
    pub fn seal(&self, data: &[u8]) -> ClientResult<EncryptedSecret> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, data)
            .map_err(|e| ClientError::EncryptionError(e.to_string()))?;

        Ok(EncryptedSecret {
            ciphertext,
            nonce: nonce.into(),
            salt: None,
            version: SECRET_VERSION,
        })
    }

    /// Decrypt a container sealed with this vault's key
    pub fn open(&self, secret: &EncryptedSecret) -> ClientResult<Vec<u8>> {
        if secret.version != SECRET_VERSION {
            return Err(ClientError::DecryptionError(format!(
                "unsupported container version: {}",
                secret.version
            )));
        }

        let nonce = Nonce::from_slice(&secret.nonce);
        self.cipher
            .decrypt(nonce, secret.ciphertext.as_ref())
            .map_err(|e| ClientError::DecryptionError(e.to_string()))
    }

    /// Encrypt with a key derived from `password` via Argon2; the salt is
    /// stored in the container
    pub fn seal_with_password(data: &[u8], password: &str) -> ClientResult<EncryptedSecret> {
        let mut salt = [0u8; SALT_LEN];
        use rand::RngCore;
        rand::thread_rng().fill_bytes(&mut salt);

        let mut key_bytes = derive_key(password, &salt)?;
        let vault = KeyVault::new(key_bytes);
        key_bytes.zeroize();

        let mut secret = vault.seal(data)?;
        secret.salt = Some(salt.to_vec());
        Ok(secret)
    }

    /// Decrypt a password-sealed container
    pub fn open_with_password(secret: &EncryptedSecret, password: &str) -> ClientResult<Vec<u8>> {
        let salt = secret.salt.as_ref().ok_or_else(|| {
            ClientError::DecryptionError("missing salt for password-based decryption".to_string())
        })?;

        let mut key_bytes = derive_key(password, salt)?;
        let vault = KeyVault::new(key_bytes);
        key_bytes.zeroize();

        vault.open(secret)
    }
}

/// Derive a 32-byte encryption key from a password and salt
fn derive_key(password: &str, salt: &[u8]) -> ClientResult<[u8; 32]> {
    let mut key = [0u8; 32];
    Argon2::default()
        .hash_password_into(password.as_bytes(), salt, &mut key)
        .map_err(|e| ClientError::KeyDerivationError(e.to_string()))?;
    Ok(key)
}

/// Generate a fresh random vault key
pub fn generate_vault_key() -> [u8; 32] {
    use rand::RngCore;
    let mut key = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut key);
    key
}
