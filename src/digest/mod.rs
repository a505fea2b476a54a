use std::fmt::{self, Debug, Formatter};
use std::io::Read;

use static_assertions::assert_impl_all;

#[cfg(any(feature = "adler32", feature = "crc32"))]
pub(crate) mod checksum;
pub(crate) mod hash;
pub(crate) mod hmac;
pub mod traits;
pub(crate) mod transform;

pub use self::traits::{Digestible, Keyed};
use self::transform::{KeyedTransform, Transform};
use crate::codec;
use crate::error::{Error, ErrorKind, Result};
use crate::registry::{self, Algorithm};
use crate::stream;

/// Texts shared by every digester: the input bytes and the digest last
/// computed or assigned over them.
struct TextState {
    algorithm: Algorithm,
    name: &'static str,
    digest_size: usize,
    plaintext: Vec<u8>,
    hashtext: Vec<u8>,
}

impl TextState {
    fn new(algorithm: Algorithm, name: &'static str, digest_size: usize) -> TextState {
        TextState { algorithm, name, digest_size, plaintext: Vec::new(), hashtext: Vec::new() }
    }

    // The transform is clean between calls, every path below feeds it and
    // finalizes or resets it before returning.

    fn compute<T: Transform + ?Sized>(&mut self, transform: &mut T) -> &[u8] {
        transform.update(&self.plaintext);
        self.hashtext = transform.finalize_reset();
        &self.hashtext
    }

    fn validate<T: Transform + ?Sized>(&self, transform: &mut T) -> bool {
        if self.hashtext.is_empty() {
            return false;
        }
        transform.update(&self.plaintext);
        transform.finalize_reset() == self.hashtext
    }

    fn clear(&mut self) {
        self.plaintext.clear();
        self.hashtext.clear();
    }
}

fn compute_reader<'a, T, R>(transform: &mut T, state: &'a mut TextState, source: R) -> Result<&'a [u8]>
where
    T: Transform + ?Sized,
    R: Read,
{
    state.hashtext.clear();
    state.hashtext = stream::digest_source(transform, source)?;
    Ok(&state.hashtext)
}

fn conflicting(a: &str, b: &str) -> Error {
    Error::with_message(ErrorKind::ConflictingOptions, format!("can't set both {} and {} in options", a, b))
}

/// Options applied while constructing a digester. The binary and hex form
/// of the same field are mutually exclusive, the key family of fields is
/// only valid for HMAC digesters.
#[derive(Clone, Debug, Default)]
#[non_exhaustive]
pub struct DigestOptions {
    plaintext: Option<Vec<u8>>,
    plaintext_hex: Option<String>,
    digest: Option<Vec<u8>>,
    digest_hex: Option<String>,
    key: Option<Vec<u8>>,
    key_hex: Option<String>,
    key_length: Option<usize>,
}

impl DigestOptions {
    pub fn new() -> DigestOptions {
        DigestOptions::default()
    }

    pub fn plaintext(self, plaintext: impl Into<Vec<u8>>) -> Self {
        DigestOptions { plaintext: Some(plaintext.into()), ..self }
    }

    pub fn plaintext_hex(self, plaintext: impl Into<String>) -> Self {
        DigestOptions { plaintext_hex: Some(plaintext.into()), ..self }
    }

    pub fn digest(self, digest: impl Into<Vec<u8>>) -> Self {
        DigestOptions { digest: Some(digest.into()), ..self }
    }

    pub fn digest_hex(self, digest: impl Into<String>) -> Self {
        DigestOptions { digest_hex: Some(digest.into()), ..self }
    }

    pub fn key(self, key: impl Into<Vec<u8>>) -> Self {
        DigestOptions { key: Some(key.into()), ..self }
    }

    pub fn key_hex(self, key: impl Into<String>) -> Self {
        DigestOptions { key_hex: Some(key.into()), ..self }
    }

    pub fn key_length(self, length: usize) -> Self {
        DigestOptions { key_length: Some(length), ..self }
    }

    fn wants_key(&self) -> bool {
        self.key.is_some() || self.key_hex.is_some() || self.key_length.is_some()
    }

    fn apply_texts<T: Digestible + ?Sized>(&self, digester: &mut T) -> Result<()> {
        match (&self.plaintext, &self.plaintext_hex) {
            (Some(_), Some(_)) => return Err(conflicting("plaintext", "plaintext_hex")),
            (Some(plaintext), None) => digester.set_plaintext(plaintext),
            (None, Some(plaintext)) => digester.set_plaintext_hex(plaintext)?,
            (None, None) => {}
        }
        match (&self.digest, &self.digest_hex) {
            (Some(_), Some(_)) => return Err(conflicting("digest", "digest_hex")),
            (Some(digest), None) => digester.set_hashtext(digest),
            (None, Some(digest)) => digester.set_hashtext_hex(digest)?,
            (None, None) => {}
        }
        Ok(())
    }
}

/// Digest object for checksum and hash algorithms.
pub struct Digester {
    transform: Box<dyn Transform>,
    state: TextState,
}

impl Digester {
    /// Creates a digester with empty texts. Fails with `InvalidCategory`
    /// for HMAC identifiers and `AlgorithmDisabled` for algorithms not
    /// compiled into this build.
    pub fn new(algorithm: Algorithm) -> Result<Digester> {
        let name = registry::name_of(algorithm)?;
        let transform = registry::instantiate_plain(algorithm)?;
        let digest_size = transform.output_size();
        Ok(Digester { transform, state: TextState::new(algorithm, name, digest_size) })
    }

    /// Creates a digester and applies options. Texts are only assigned,
    /// nothing is computed. Key options fail with `InvalidCategory` here.
    pub fn with_options(algorithm: Algorithm, options: DigestOptions) -> Result<Digester> {
        let mut digester = Digester::new(algorithm)?;
        if options.wants_key() {
            return Err(Error::with_description(ErrorKind::InvalidCategory, &"key options require an HMAC algorithm"));
        }
        options.apply_texts(&mut digester)?;
        Ok(digester)
    }

    /// Digests everything the reader yields and stores the result as
    /// hashtext. The stored plaintext is not consulted. On failure the
    /// hashtext is cleared instead.
    pub fn compute_reader<R: Read>(&mut self, source: R) -> Result<&[u8]> {
        compute_reader(self.transform.as_mut(), &mut self.state, source)
    }
}

impl Digestible for Digester {
    fn algorithm(&self) -> Algorithm {
        self.state.algorithm
    }

    fn name(&self) -> &'static str {
        self.state.name
    }

    fn digest_size(&self) -> usize {
        self.state.digest_size
    }

    fn set_plaintext(&mut self, plaintext: &[u8]) {
        self.state.plaintext = plaintext.to_vec();
    }

    fn plaintext(&self) -> &[u8] {
        &self.state.plaintext
    }

    fn compute(&mut self) -> &[u8] {
        self.state.compute(self.transform.as_mut())
    }

    fn update(&mut self, more: &[u8]) -> &[u8] {
        self.state.plaintext.extend_from_slice(more);
        self.state.compute(self.transform.as_mut())
    }

    fn set_hashtext(&mut self, hashtext: &[u8]) {
        self.state.hashtext = hashtext.to_vec();
    }

    fn hashtext(&self) -> &[u8] {
        &self.state.hashtext
    }

    fn validate(&mut self) -> bool {
        self.state.validate(self.transform.as_mut())
    }

    fn clear(&mut self) {
        self.state.clear();
    }
}

impl Debug for Digester {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::result::Result<(), fmt::Error> {
        write!(f, "Digester({}: {})", self.state.name, codec::to_hex(&self.state.hashtext))
    }
}

/// Digest object for HMAC algorithms. Fresh instances carry an empty key,
/// which is a valid HMAC key.
pub struct HmacDigester {
    transform: Box<dyn KeyedTransform>,
    state: TextState,
}

impl HmacDigester {
    /// Creates an HMAC digester with empty texts and an empty key. Fails
    /// with `InvalidCategory` for non-HMAC identifiers.
    pub fn new(algorithm: Algorithm) -> Result<HmacDigester> {
        let name = registry::name_of(algorithm)?;
        let transform = registry::instantiate_keyed(algorithm)?;
        let digest_size = transform.output_size();
        Ok(HmacDigester { transform, state: TextState::new(algorithm, name, digest_size) })
    }

    /// Creates an HMAC digester and applies options. Texts and key are
    /// only assigned, nothing is computed. The key is applied before any
    /// requested key length.
    pub fn with_options(algorithm: Algorithm, options: DigestOptions) -> Result<HmacDigester> {
        let mut digester = HmacDigester::new(algorithm)?;
        options.apply_texts(&mut digester)?;
        match (&options.key, &options.key_hex) {
            (Some(_), Some(_)) => return Err(conflicting("key", "key_hex")),
            (Some(key), None) => digester.set_key(key)?,
            (None, Some(key)) => digester.set_key_hex(key)?,
            (None, None) => {}
        }
        if let Some(length) = options.key_length {
            digester.set_key_length(length)?;
        }
        Ok(digester)
    }

    /// Digests everything the reader yields under the configured key and
    /// stores the result as hashtext. The stored plaintext is not
    /// consulted. On failure the hashtext is cleared instead.
    pub fn compute_reader<R: Read>(&mut self, source: R) -> Result<&[u8]> {
        compute_reader(self.transform.as_mut(), &mut self.state, source)
    }
}

impl Digestible for HmacDigester {
    fn algorithm(&self) -> Algorithm {
        self.state.algorithm
    }

    fn name(&self) -> &'static str {
        self.state.name
    }

    fn digest_size(&self) -> usize {
        self.state.digest_size
    }

    fn set_plaintext(&mut self, plaintext: &[u8]) {
        self.state.plaintext = plaintext.to_vec();
    }

    fn plaintext(&self) -> &[u8] {
        &self.state.plaintext
    }

    fn compute(&mut self) -> &[u8] {
        self.state.compute(self.transform.as_mut())
    }

    fn update(&mut self, more: &[u8]) -> &[u8] {
        self.state.plaintext.extend_from_slice(more);
        self.state.compute(self.transform.as_mut())
    }

    fn set_hashtext(&mut self, hashtext: &[u8]) {
        self.state.hashtext = hashtext.to_vec();
    }

    fn hashtext(&self) -> &[u8] {
        &self.state.hashtext
    }

    fn validate(&mut self) -> bool {
        self.state.validate(self.transform.as_mut())
    }

    fn clear(&mut self) {
        self.state.clear();
    }
}

impl Keyed for HmacDigester {
    fn set_key(&mut self, key: &[u8]) -> Result<()> {
        self.transform.set_key(key)
    }

    fn key(&self) -> &[u8] {
        self.transform.key()
    }

    fn set_key_length(&mut self, length: usize) -> Result<()> {
        self.transform.set_key_length(length)?;
        let actual = self.transform.effective_key_length();
        if actual != length {
            return Err(Error::with_message(
                ErrorKind::KeyLengthRejected,
                format!("tried to set a key length of {} but {} was used", length, actual),
            ));
        }
        Ok(())
    }

    fn key_length(&self) -> usize {
        self.transform.effective_key_length()
    }
}

impl Debug for HmacDigester {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::result::Result<(), fmt::Error> {
        write!(f, "HmacDigester({}: {})", self.state.name, codec::to_hex(&self.state.hashtext))
    }
}

assert_impl_all!(Digester: Send);
assert_impl_all!(HmacDigester: Send);

/// Digests plaintext with a checksum or hash algorithm.
pub fn digest(algorithm: Algorithm, plaintext: &[u8]) -> Result<Vec<u8>> {
    let mut digester = Digester::new(algorithm)?;
    digester.set_plaintext(plaintext);
    Ok(digester.compute().to_vec())
}

/// Hex form of [`digest`].
pub fn digest_hex(algorithm: Algorithm, plaintext: &[u8]) -> Result<String> {
    let digest = digest(algorithm, plaintext)?;
    Ok(codec::to_hex(&digest))
}

/// Computes an HMAC over plaintext under the given key.
pub fn hmac(algorithm: Algorithm, plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    let mut digester = HmacDigester::new(algorithm)?;
    digester.set_key(key)?;
    digester.set_plaintext(plaintext);
    Ok(digester.compute().to_vec())
}

/// Hex form of [`hmac`].
pub fn hmac_hex(algorithm: Algorithm, plaintext: &[u8], key: &[u8]) -> Result<String> {
    let digest = hmac(algorithm, plaintext, key)?;
    Ok(codec::to_hex(&digest))
}
