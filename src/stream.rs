use std::io::{ErrorKind as IoErrorKind, Read};

use log::debug;

use crate::codec;
use crate::digest::transform::Transform;
use crate::error::{Error, ErrorKind, Result};
use crate::registry::{self, Algorithm, Instance};

pub(crate) const CHUNK_SIZE: usize = 8 * 1024;

/// Feeds everything the reader yields through the transform in fixed-size
/// chunks. The transform is left in its initial state afterwards, also when
/// the reader fails.
pub(crate) fn digest_source<T, R>(transform: &mut T, mut source: R) -> Result<Vec<u8>>
where
    T: Transform + ?Sized,
    R: Read,
{
    let mut chunk = [0u8; CHUNK_SIZE];
    loop {
        match source.read(&mut chunk) {
            Ok(0) => return Ok(transform.finalize_reset()),
            Ok(n) => transform.update(&chunk[..n]),
            Err(e) if e.kind() == IoErrorKind::Interrupted => continue,
            Err(e) => {
                transform.reset();
                debug!("digest source read failed: {}", e);
                return Err(Error::new(ErrorKind::IoError).cause_by(e));
            }
        }
    }
}

/// Digests everything a reader yields without buffering it whole. HMAC
/// algorithms run with an empty key, use [`HmacDigester::compute_reader`]
/// to stream under a configured key.
///
/// [`HmacDigester::compute_reader`]: crate::HmacDigester::compute_reader
pub fn digest_reader<R: Read>(algorithm: Algorithm, source: R) -> Result<Vec<u8>> {
    match registry::instantiate(algorithm)? {
        Instance::Plain(mut transform) => digest_source(transform.as_mut(), source),
        Instance::Keyed(mut transform) => digest_source(transform.as_mut(), source),
    }
}

/// Hex form of [`digest_reader`].
pub fn digest_reader_hex<R: Read>(algorithm: Algorithm, source: R) -> Result<String> {
    let digest = digest_reader(algorithm, source)?;
    Ok(codec::to_hex(&digest))
}
