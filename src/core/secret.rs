//! Secrets sealed at rest.
//!
//! Identity key material is stored in the catalog as age-armored ciphertext
//! and only opened when a workspace actually needs it.

use std::fmt;
use std::io::{Read, Write};

use age::x25519;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::trace;
use zeroize::Zeroizing;

use crate::core::types::EncryptedValue;
use crate::error::{CipherError, Error, Result};

const ARMOR_HEADER: &str = "-----BEGIN AGE ENCRYPTED FILE-----";

/// A secret value encrypted for the controller key.
///
/// Deserialization goes through [`SealedSecret::from_armored`], so a catalog
/// holding a plaintext value fails to load.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EncryptedValue", into = "EncryptedValue")]
pub struct SealedSecret(EncryptedValue);

impl SealedSecret {
    /// Encrypt `plaintext` for `recipient`.
    pub fn seal(plaintext: &str, recipient: &x25519::Recipient) -> Result<Self> {
        trace!(plaintext_len = plaintext.len(), "sealing");

        let encryptor =
            age::Encryptor::with_recipients(std::iter::once(recipient as &dyn age::Recipient))
                .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;

        let mut sealed = Vec::new();
        let armor = age::armor::ArmoredWriter::wrap_output(
            &mut sealed,
            age::armor::Format::AsciiArmor,
        )
        .map_err(|e| CipherError::ArmorFailed(e.to_string()))?;
        let mut writer = encryptor
            .wrap_output(armor)
            .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;

        writer.write_all(plaintext.as_bytes())?;
        writer
            .finish()
            .and_then(|armor| armor.finish())
            .map_err(|e| CipherError::ArmorFailed(e.to_string()))?;

        let armored = String::from_utf8(sealed)
            .map_err(|e| CipherError::EncryptionFailed(format!("UTF-8 error: {}", e)))?;
        Ok(Self(armored))
    }

    /// Wrap ciphertext that was already sealed elsewhere.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::DecryptionFailed` if the value is not age armor.
    pub fn from_armored(armored: impl Into<EncryptedValue>) -> Result<Self> {
        let armored = armored.into();
        if !armored.trim_start().starts_with(ARMOR_HEADER) {
            return Err(CipherError::DecryptionFailed("not an age armored value".to_string()).into());
        }
        Ok(Self(armored))
    }

    /// Decrypt with the controller key.
    ///
    /// The plaintext is wiped from memory when the returned value drops.
    pub fn unseal(&self, key: &x25519::Identity) -> Result<Zeroizing<String>> {
        trace!(ciphertext_len = self.0.len(), "unsealing");

        let reader = age::armor::ArmoredReader::new(self.0.as_bytes());
        let decryptor = age::Decryptor::new(reader)
            .map_err(|e| CipherError::DecryptionFailed(e.to_string()))?;

        let mut plaintext = Zeroizing::new(Vec::new());
        decryptor
            .decrypt(std::iter::once(key as &dyn age::Identity))
            .map_err(|e| CipherError::DecryptionFailed(e.to_string()))?
            .read_to_end(&mut plaintext)?;

        let text = std::str::from_utf8(&plaintext)
            .map_err(|e| CipherError::DecryptionFailed(format!("UTF-8 error: {}", e)))?;
        Ok(Zeroizing::new(text.to_string()))
    }

    /// The armored ciphertext.
    pub fn armored(&self) -> &str {
        &self.0
    }
}

impl TryFrom<EncryptedValue> for SealedSecret {
    type Error = Error;

    fn try_from(armored: EncryptedValue) -> Result<Self> {
        Self::from_armored(armored)
    }
}

impl From<SealedSecret> for EncryptedValue {
    fn from(secret: SealedSecret) -> Self {
        secret.0
    }
}

impl fmt::Debug for SealedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SealedSecret(<redacted>)")
    }
}

/// Short sha256 fingerprint of a plaintext, safe to print.
pub fn fingerprint(plaintext: &str) -> String {
    let digest = Sha256::digest(plaintext.as_bytes());
    digest[..8].iter().map(|b| format!("{:02x}", b)).collect()
}

/// Parse a public key string into an age recipient.
///
/// # Errors
///
/// Returns `CipherError::InvalidPublicKey` if the key format is invalid.
pub fn parse_recipient(key: &str) -> Result<x25519::Recipient> {
    key.parse::<x25519::Recipient>()
        .map_err(|_| CipherError::InvalidPublicKey(key.to_string()).into())
}
