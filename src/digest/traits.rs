use crate::codec;
use crate::error::{Error, ErrorKind, Result};
use crate::registry::Algorithm;

/// Stateful digest object. It carries a plaintext and a hashtext slot,
/// `compute` fills the hashtext from the plaintext and both slots stay
/// readable in binary and hex form until cleared.
pub trait Digestible {
    fn algorithm(&self) -> Algorithm;

    /// Display name, e.g. "SHA-256".
    fn name(&self) -> &'static str;

    /// Digest size in bytes.
    fn digest_size(&self) -> usize;

    fn set_plaintext(&mut self, plaintext: &[u8]);

    fn set_plaintext_hex(&mut self, plaintext: &str) -> Result<()> {
        let decoded = codec::from_hex(plaintext)?;
        self.set_plaintext(&decoded);
        Ok(())
    }

    fn plaintext(&self) -> &[u8];

    fn plaintext_hex(&self) -> String {
        codec::to_hex(self.plaintext())
    }

    /// Digests the stored plaintext, stores the result as hashtext and
    /// returns it. Computing twice over unchanged plaintext yields the
    /// same hashtext.
    fn compute(&mut self) -> &[u8];

    /// Appends bytes to the stored plaintext, recomputes and returns the
    /// new hashtext.
    fn update(&mut self, more: &[u8]) -> &[u8];

    fn set_hashtext(&mut self, hashtext: &[u8]);

    fn set_hashtext_hex(&mut self, hashtext: &str) -> Result<()> {
        let decoded = codec::from_hex(hashtext)?;
        self.set_hashtext(&decoded);
        Ok(())
    }

    fn hashtext(&self) -> &[u8];

    fn hashtext_hex(&self) -> String {
        codec::to_hex(self.hashtext())
    }

    /// Reports whether digesting the stored plaintext reproduces the stored
    /// hashtext. False when no hashtext is stored. The stored texts are left
    /// untouched.
    fn validate(&mut self) -> bool;

    /// Compares a candidate digest against the stored hashtext. A candidate
    /// of digest size is compared as binary, one of twice that length as hex
    /// with ASCII case ignored. Any other length fails with `LengthMismatch`.
    fn matches(&self, candidate: &[u8]) -> Result<bool> {
        let size = self.digest_size();
        if candidate.len() == size {
            Ok(candidate == self.hashtext())
        } else if candidate.len() == 2 * size {
            Ok(candidate.to_ascii_lowercase() == self.hashtext_hex().into_bytes())
        } else {
            Err(Error::with_message(
                ErrorKind::LengthMismatch,
                format!("expected {} binary bytes or {} hex characters, got {}", size, 2 * size, candidate.len()),
            ))
        }
    }

    /// Clears plaintext and hashtext. Key material of keyed digesters is
    /// not affected.
    fn clear(&mut self);
}

/// Digest object mixing a secret key into every computation. An empty key
/// is valid and is what fresh instances start from.
pub trait Keyed: Digestible {
    fn set_key(&mut self, key: &[u8]) -> Result<()>;

    fn set_key_hex(&mut self, key: &str) -> Result<()> {
        let decoded = codec::from_hex(key)?;
        self.set_key(&decoded)
    }

    fn key(&self) -> &[u8];

    fn key_hex(&self) -> String {
        codec::to_hex(self.key())
    }

    /// Asks the primitive to use `length` bytes of the stored key. Fails
    /// with `KeyLengthRejected` when the primitive settles on a different
    /// length, in which case that length stays in effect. Storing a new
    /// key resets the effective length to the full new key.
    fn set_key_length(&mut self, length: usize) -> Result<()>;

    fn key_length(&self) -> usize;
}
