//! Conversions between binary digest material and its lowercase hex form.

use crate::error::{Error, ErrorKind, Result};

/// Encodes bytes as lowercase hex.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decodes hex text to bytes. Both character cases are accepted, the length
/// must be even and every character a hex digit.
pub fn from_hex(text: &str) -> Result<Vec<u8>> {
    hex::decode(text).map_err(|e| Error::with_message(ErrorKind::InvalidEncoding, e.to_string()).cause_by(e))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_hex_roundtrip() {
        assert_eq!(to_hex(&[]), "");
        assert_eq!(to_hex(&[0x00, 0x9f, 0xff]), "009fff");
        assert_eq!(from_hex("009fff").unwrap(), vec![0x00, 0x9f, 0xff]);
        assert_eq!(from_hex("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_from_hex_accepts_uppercase() {
        assert_eq!(from_hex("DEADBEEF").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(from_hex("DeadBeef").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn test_from_hex_rejects_odd_length() {
        let err = from_hex("abc").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEncoding);
    }

    #[test]
    fn test_from_hex_rejects_nonhex_characters() {
        let err = from_hex("zz").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEncoding);
        let err = from_hex("0g").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEncoding);
    }
}
