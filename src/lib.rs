mod codec;
mod digest;
mod error;
pub mod prelude;
mod registry;
mod stream;

pub use error::{Error, ErrorKind, Result};
pub use registry::{Algorithm, Category, digest_algorithms, hmac_algorithms, is_enabled, name_of};
pub use self::digest::{digest, digest_hex, Digester, Digestible, DigestOptions, hmac, hmac_hex, HmacDigester, Keyed};
pub use stream::{digest_reader, digest_reader_hex};
