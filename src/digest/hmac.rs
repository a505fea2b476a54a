use std::mem;

use hmac::digest::crypto_common::BlockSizeUser;
use hmac::digest::{Digest, InvalidLength, KeyInit};
use hmac::{Mac, SimpleHmac};

use super::transform::{KeyedTransform, Transform};
use crate::error::{Error, ErrorKind, Result};

/// HMAC over any RustCrypto hash. The full key bytes are retained so the
/// primitive can be rekeyed with a shorter prefix later, `used` tracks how
/// many of them the running instance was built from.
pub(crate) struct HmacTransform<D: Digest + BlockSizeUser> {
    key: Vec<u8>,
    used: usize,
    initial: SimpleHmac<D>,
    mac: SimpleHmac<D>,
}

pub(crate) fn hmac_transform<D>() -> Result<Box<dyn KeyedTransform>>
where
    D: Digest + BlockSizeUser + Clone + Send + 'static,
    SimpleHmac<D>: Mac,
{
    let transform = HmacTransform::<D>::with_key(&[])?;
    Ok(Box::new(transform))
}

fn keyed_mac<D>(key: &[u8]) -> Result<SimpleHmac<D>>
where
    D: Digest + BlockSizeUser,
{
    <SimpleHmac<D> as KeyInit>::new_from_slice(key).map_err(|e: InvalidLength| {
        Error::with_message(ErrorKind::PrimitiveError, e.to_string()).cause_by(e)
    })
}

impl<D> HmacTransform<D>
where
    D: Digest + BlockSizeUser + Clone,
{
    pub(crate) fn with_key(key: &[u8]) -> Result<HmacTransform<D>> {
        let initial = keyed_mac::<D>(key)?;
        let mac = initial.clone();
        Ok(HmacTransform { key: key.to_vec(), used: key.len(), initial, mac })
    }
}

impl<D> Transform for HmacTransform<D>
where
    D: Digest + BlockSizeUser + Clone + Send + 'static,
    SimpleHmac<D>: Mac,
{
    fn output_size(&self) -> usize {
        <D as Digest>::output_size()
    }

    fn update(&mut self, data: &[u8]) {
        self.mac.update(data);
    }

    fn finalize_reset(&mut self) -> Vec<u8> {
        let mac = mem::replace(&mut self.mac, self.initial.clone());
        mac.finalize().into_bytes().to_vec()
    }

    fn reset(&mut self) {
        self.mac = self.initial.clone();
    }
}

impl<D> KeyedTransform for HmacTransform<D>
where
    D: Digest + BlockSizeUser + Clone + Send + 'static,
    SimpleHmac<D>: Mac,
{
    fn set_key(&mut self, key: &[u8]) -> Result<()> {
        self.initial = keyed_mac::<D>(key)?;
        self.mac = self.initial.clone();
        self.key = key.to_vec();
        self.used = key.len();
        Ok(())
    }

    fn key(&self) -> &[u8] {
        &self.key[..self.used]
    }

    /// Rekeys with a prefix of the stored key bytes. A length beyond the
    /// stored key is clamped, the caller observes the outcome through
    /// `effective_key_length`.
    fn set_key_length(&mut self, length: usize) -> Result<()> {
        let used = length.min(self.key.len());
        self.initial = keyed_mac::<D>(&self.key[..used])?;
        self.mac = self.initial.clone();
        self.used = used;
        Ok(())
    }

    fn effective_key_length(&self) -> usize {
        self.used
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[cfg(feature = "md5")]
    #[test]
    fn test_hmac_md5_vectors() {
        let mut transform = HmacTransform::<md5::Md5>::with_key(&[0x0b; 16]).unwrap();
        assert_eq!(16, transform.output_size());

        transform.update(b"Hi There");
        assert_eq!(hex::encode(transform.finalize_reset()), "9294727a3638bb1c13f48ef8158bfc9d");

        transform.set_key(b"Jefe").unwrap();
        transform.update(b"what do ya want for nothing?");
        assert_eq!(hex::encode(transform.finalize_reset()), "750c783e6ab0b503eaa86e310a5db738");
    }

    #[cfg(feature = "sha1")]
    #[test]
    fn test_hmac_sha1_vector() {
        let mut transform = HmacTransform::<sha1::Sha1>::with_key(&[0x0b; 20]).unwrap();
        transform.update(b"Hi There");
        assert_eq!(hex::encode(transform.finalize_reset()), "b617318655057264e28bc0b6fb378c8ef146be00");
    }

    #[cfg(feature = "md5")]
    #[test]
    fn test_rekey_restores_initial_state() {
        let mut transform = HmacTransform::<md5::Md5>::with_key(b"Jefe").unwrap();
        transform.update(b"partial input");
        transform.reset();
        transform.update(b"what do ya want for nothing?");
        assert_eq!(hex::encode(transform.finalize_reset()), "750c783e6ab0b503eaa86e310a5db738");
    }

    #[cfg(feature = "md5")]
    #[test]
    fn test_key_length_clamps_to_stored_bytes() {
        let mut transform = HmacTransform::<md5::Md5>::with_key(b"squeamish ossifrage").unwrap();
        assert_eq!(19, transform.effective_key_length());

        transform.set_key_length(9).unwrap();
        assert_eq!(9, transform.effective_key_length());
        assert_eq!(b"squeamish".as_slice(), transform.key());
        transform.update(b"The quick brown fox jumps over the lazy dog");
        assert_eq!(hex::encode(transform.finalize_reset()), "600d29a2b82bad01ceb17ae222aa3534");

        transform.set_key_length(25).unwrap();
        assert_eq!(19, transform.effective_key_length());
        transform.update(b"The quick brown fox jumps over the lazy dog");
        assert_eq!(hex::encode(transform.finalize_reset()), "281ee2ae0862f1e0bd1b5c76a3eea5ec");
    }

    #[cfg(feature = "md5")]
    #[test]
    fn test_empty_key() {
        let mut transform = HmacTransform::<md5::Md5>::with_key(&[]).unwrap();
        assert_eq!(0, transform.effective_key_length());
        assert_eq!(hex::encode(transform.finalize_reset()), "74e6f7298a9c2d168935f58c001bad88");
    }
}
