//! Type aliases for domain concepts.

/// An identity name, unique within its tool's store.
pub type IdentityName = String;

/// An age-armored ciphertext of a secret.
pub type EncryptedValue = String;

/// An age public key string (starts with "age1...").
pub type PublicKey = String;
