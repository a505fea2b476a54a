#[cfg(feature = "adler32")]
use adler32::RollingAdler32;

use super::transform::Transform;
use crate::error::Result;

// Checksum digests keep their historical byte orders: CRC-32 is emitted
// least significant byte first, Adler-32 most significant byte first.

#[cfg(feature = "crc32")]
pub(crate) struct Crc32Transform {
    hasher: crc32fast::Hasher,
}

#[cfg(feature = "crc32")]
pub(crate) fn crc32() -> Result<Box<dyn Transform>> {
    Ok(Box::new(Crc32Transform { hasher: crc32fast::Hasher::new() }))
}

#[cfg(feature = "crc32")]
impl Transform for Crc32Transform {
    fn output_size(&self) -> usize {
        4
    }

    fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    fn finalize_reset(&mut self) -> Vec<u8> {
        let checksum = self.hasher.clone().finalize();
        self.hasher.reset();
        checksum.to_le_bytes().to_vec()
    }

    fn reset(&mut self) {
        self.hasher.reset();
    }
}

#[cfg(feature = "adler32")]
pub(crate) struct Adler32Transform {
    state: RollingAdler32,
}

#[cfg(feature = "adler32")]
pub(crate) fn adler32() -> Result<Box<dyn Transform>> {
    Ok(Box::new(Adler32Transform { state: RollingAdler32::new() }))
}

#[cfg(feature = "adler32")]
impl Transform for Adler32Transform {
    fn output_size(&self) -> usize {
        4
    }

    fn update(&mut self, data: &[u8]) {
        self.state.update_buffer(data);
    }

    fn finalize_reset(&mut self) -> Vec<u8> {
        let checksum = self.state.hash();
        self.state = RollingAdler32::new();
        checksum.to_be_bytes().to_vec()
    }

    fn reset(&mut self) {
        self.state = RollingAdler32::new();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[cfg(feature = "crc32")]
    #[test]
    fn test_crc32() {
        let mut transform = Crc32Transform { hasher: crc32fast::Hasher::new() };
        assert_eq!(4, transform.output_size());

        transform.update(b"abc");
        assert_eq!(hex::encode(transform.finalize_reset()), "c2412435");

        assert_eq!(hex::encode(transform.finalize_reset()), "00000000");

        transform.update(b"The quick brown fox jumps ");
        transform.update(b"over the lazy dog");
        assert_eq!(hex::encode(transform.finalize_reset()), "39a34f41");
    }

    #[cfg(feature = "crc32")]
    #[test]
    fn test_crc32_reset() {
        let mut transform = Crc32Transform { hasher: crc32fast::Hasher::new() };
        transform.update(b"garbage");
        transform.reset();
        transform.update(b"abc");
        assert_eq!(hex::encode(transform.finalize_reset()), "c2412435");
    }

    #[cfg(feature = "adler32")]
    #[test]
    fn test_adler32() {
        let mut transform = Adler32Transform { state: RollingAdler32::new() };
        assert_eq!(4, transform.output_size());

        transform.update(b"Wikipedia");
        assert_eq!(hex::encode(transform.finalize_reset()), "11e60398");

        transform.update(b"abc");
        assert_eq!(hex::encode(transform.finalize_reset()), "024d0127");

        assert_eq!(hex::encode(transform.finalize_reset()), "00000001");
    }

    #[cfg(feature = "adler32")]
    #[test]
    fn test_adler32_reset() {
        let mut transform = Adler32Transform { state: RollingAdler32::new() };
        transform.update(b"garbage");
        transform.reset();
        transform.update(b"abc");
        assert_eq!(hex::encode(transform.finalize_reset()), "024d0127");
    }
}
