//! Export types with less chance to conflict with other crates in case of no renaming.
pub use crate::{
    Algorithm as DigestAlgorithm,
    Category as DigestCategory,
    Digester,
    Digestible,
    DigestOptions,
    Error as DigestError,
    ErrorKind as DigestErrorKind,
    HmacDigester,
    Keyed,
    Result as DigestResult,
};
