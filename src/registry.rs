use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

use lazy_static::lazy_static;
use log::trace;

#[cfg(feature = "adler32")]
use crate::digest::checksum::adler32;
#[cfg(feature = "crc32")]
use crate::digest::checksum::crc32;
#[cfg(any(
    feature = "md2",
    feature = "md4",
    feature = "md5",
    feature = "ripemd160",
    feature = "sha1",
    feature = "sha2",
    feature = "tiger",
    feature = "whirlpool"
))]
use crate::digest::hash::hash_transform;
#[cfg(any(
    feature = "md2",
    feature = "md4",
    feature = "md5",
    feature = "ripemd160",
    feature = "sha1",
    feature = "sha2",
    feature = "tiger",
    feature = "whirlpool"
))]
use crate::digest::hmac::hmac_transform;
use crate::digest::transform::{KeyedTransform, Transform};
use crate::error::{Error, ErrorKind, Result};

/// Identifies one supported algorithm. Checksum identifiers live in the
/// 100 range, plain hashes in the 200 range and HMAC variants in the 300
/// range, mirroring their hash at the same offset.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, strum::EnumIter)]
#[non_exhaustive]
#[repr(u16)]
pub enum Algorithm {
    Adler32 = 101,
    Crc32 = 102,

    Haval = 201,
    Md2 = 202,
    Md4 = 203,
    Md5 = 204,
    PanamaHash = 205,
    Ripemd160 = 206,
    Sha1 = 207,
    Sha224 = 208,
    Sha256 = 209,
    Sha384 = 210,
    Sha512 = 211,
    Tiger = 212,
    Whirlpool = 213,

    HmacHaval = 301,
    HmacMd2 = 302,
    HmacMd4 = 303,
    HmacMd5 = 304,
    HmacPanama = 305,
    HmacRipemd160 = 306,
    HmacSha1 = 307,
    HmacSha224 = 308,
    HmacSha256 = 309,
    HmacSha384 = 310,
    HmacSha512 = 311,
    HmacTiger = 312,
    HmacWhirlpool = 313,
}

/// Coarse grouping deciding which operations an algorithm supports. Only
/// `Hmac` algorithms accept key material.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Category {
    Checksum,
    Hash,
    Hmac,
}

impl Algorithm {
    /// Returns the stable numeric identifier of this algorithm.
    pub fn id(self) -> u16 {
        self as u16
    }

    /// Resolves a numeric identifier back to an algorithm.
    pub fn from_id(id: u16) -> Result<Algorithm> {
        match INDEX.get(&id) {
            Some(entry) => Ok(entry.algorithm),
            None => Err(Error::with_message(ErrorKind::UnknownAlgorithm, format!("no algorithm with id {}", id))),
        }
    }

    pub fn category(self) -> Category {
        use Algorithm::*;
        match self {
            Adler32 | Crc32 => Category::Checksum,
            Haval | Md2 | Md4 | Md5 | PanamaHash | Ripemd160 | Sha1 | Sha224 | Sha256 | Sha384 | Sha512 | Tiger
            | Whirlpool => Category::Hash,
            HmacHaval | HmacMd2 | HmacMd4 | HmacMd5 | HmacPanama | HmacRipemd160 | HmacSha1 | HmacSha224
            | HmacSha256 | HmacSha384 | HmacSha512 | HmacTiger | HmacWhirlpool => Category::Hmac,
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::result::Result<(), fmt::Error> {
        match INDEX.get(&self.id()) {
            Some(entry) => f.write_str(entry.name),
            None => write!(f, "algorithm {}", self.id()),
        }
    }
}

pub(crate) enum Constructor {
    Plain(fn() -> Result<Box<dyn Transform>>),
    Keyed(fn() -> Result<Box<dyn KeyedTransform>>),
}

pub(crate) struct AlgorithmEntry {
    pub algorithm: Algorithm,
    pub category: Category,
    pub name: &'static str,
    pub constructor: Option<Constructor>,
}

macro_rules! gated {
    ($feature:literal, $constructor:expr) => {{
        #[cfg(feature = $feature)]
        {
            Some($constructor)
        }
        #[cfg(not(feature = $feature))]
        {
            None
        }
    }};
}

// Every algorithm keeps its row even when its backing crate is compiled
// out, names and identifiers must resolve in every build. HAVAL and the
// Panama hash have no backing crate at all and stay permanently disabled.
static REGISTRY: &[AlgorithmEntry] = &[
    AlgorithmEntry {
        algorithm: Algorithm::Adler32,
        category: Category::Checksum,
        name: "Adler-32",
        constructor: gated!("adler32", Constructor::Plain(adler32)),
    },
    AlgorithmEntry {
        algorithm: Algorithm::Crc32,
        category: Category::Checksum,
        name: "CRC-32",
        constructor: gated!("crc32", Constructor::Plain(crc32)),
    },
    AlgorithmEntry {
        algorithm: Algorithm::Haval,
        category: Category::Hash,
        name: "HAVAL",
        constructor: None,
    },
    AlgorithmEntry {
        algorithm: Algorithm::Md2,
        category: Category::Hash,
        name: "MD2",
        constructor: gated!("md2", Constructor::Plain(hash_transform::<md2::Md2>)),
    },
    AlgorithmEntry {
        algorithm: Algorithm::Md4,
        category: Category::Hash,
        name: "MD4",
        constructor: gated!("md4", Constructor::Plain(hash_transform::<md4::Md4>)),
    },
    AlgorithmEntry {
        algorithm: Algorithm::Md5,
        category: Category::Hash,
        name: "MD5",
        constructor: gated!("md5", Constructor::Plain(hash_transform::<md5::Md5>)),
    },
    AlgorithmEntry {
        algorithm: Algorithm::PanamaHash,
        category: Category::Hash,
        name: "Panama",
        constructor: None,
    },
    AlgorithmEntry {
        algorithm: Algorithm::Ripemd160,
        category: Category::Hash,
        name: "RIPEMD-160",
        constructor: gated!("ripemd160", Constructor::Plain(hash_transform::<ripemd::Ripemd160>)),
    },
    AlgorithmEntry {
        algorithm: Algorithm::Sha1,
        category: Category::Hash,
        name: "SHA-1",
        constructor: gated!("sha1", Constructor::Plain(hash_transform::<sha1::Sha1>)),
    },
    AlgorithmEntry {
        algorithm: Algorithm::Sha224,
        category: Category::Hash,
        name: "SHA-224",
        constructor: gated!("sha2", Constructor::Plain(hash_transform::<sha2::Sha224>)),
    },
    AlgorithmEntry {
        algorithm: Algorithm::Sha256,
        category: Category::Hash,
        name: "SHA-256",
        constructor: gated!("sha2", Constructor::Plain(hash_transform::<sha2::Sha256>)),
    },
    AlgorithmEntry {
        algorithm: Algorithm::Sha384,
        category: Category::Hash,
        name: "SHA-384",
        constructor: gated!("sha2", Constructor::Plain(hash_transform::<sha2::Sha384>)),
    },
    AlgorithmEntry {
        algorithm: Algorithm::Sha512,
        category: Category::Hash,
        name: "SHA-512",
        constructor: gated!("sha2", Constructor::Plain(hash_transform::<sha2::Sha512>)),
    },
    AlgorithmEntry {
        algorithm: Algorithm::Tiger,
        category: Category::Hash,
        name: "Tiger",
        constructor: gated!("tiger", Constructor::Plain(hash_transform::<tiger::Tiger>)),
    },
    AlgorithmEntry {
        algorithm: Algorithm::Whirlpool,
        category: Category::Hash,
        name: "Whirlpool",
        constructor: gated!("whirlpool", Constructor::Plain(hash_transform::<whirlpool::Whirlpool>)),
    },
    AlgorithmEntry {
        algorithm: Algorithm::HmacHaval,
        category: Category::Hmac,
        name: "HAVAL-HMAC",
        constructor: None,
    },
    AlgorithmEntry {
        algorithm: Algorithm::HmacMd2,
        category: Category::Hmac,
        name: "MD2-HMAC",
        constructor: gated!("md2", Constructor::Keyed(hmac_transform::<md2::Md2>)),
    },
    AlgorithmEntry {
        algorithm: Algorithm::HmacMd4,
        category: Category::Hmac,
        name: "MD4-HMAC",
        constructor: gated!("md4", Constructor::Keyed(hmac_transform::<md4::Md4>)),
    },
    AlgorithmEntry {
        algorithm: Algorithm::HmacMd5,
        category: Category::Hmac,
        name: "MD5-HMAC",
        constructor: gated!("md5", Constructor::Keyed(hmac_transform::<md5::Md5>)),
    },
    AlgorithmEntry {
        algorithm: Algorithm::HmacPanama,
        category: Category::Hmac,
        name: "Panama-HMAC",
        constructor: None,
    },
    AlgorithmEntry {
        algorithm: Algorithm::HmacRipemd160,
        category: Category::Hmac,
        name: "RIPEMD-160-HMAC",
        constructor: gated!("ripemd160", Constructor::Keyed(hmac_transform::<ripemd::Ripemd160>)),
    },
    AlgorithmEntry {
        algorithm: Algorithm::HmacSha1,
        category: Category::Hmac,
        name: "SHA-1-HMAC",
        constructor: gated!("sha1", Constructor::Keyed(hmac_transform::<sha1::Sha1>)),
    },
    AlgorithmEntry {
        algorithm: Algorithm::HmacSha224,
        category: Category::Hmac,
        name: "SHA-224-HMAC",
        constructor: gated!("sha2", Constructor::Keyed(hmac_transform::<sha2::Sha224>)),
    },
    AlgorithmEntry {
        algorithm: Algorithm::HmacSha256,
        category: Category::Hmac,
        name: "SHA-256-HMAC",
        constructor: gated!("sha2", Constructor::Keyed(hmac_transform::<sha2::Sha256>)),
    },
    AlgorithmEntry {
        algorithm: Algorithm::HmacSha384,
        category: Category::Hmac,
        name: "SHA-384-HMAC",
        constructor: gated!("sha2", Constructor::Keyed(hmac_transform::<sha2::Sha384>)),
    },
    AlgorithmEntry {
        algorithm: Algorithm::HmacSha512,
        category: Category::Hmac,
        name: "SHA-512-HMAC",
        constructor: gated!("sha2", Constructor::Keyed(hmac_transform::<sha2::Sha512>)),
    },
    AlgorithmEntry {
        algorithm: Algorithm::HmacTiger,
        category: Category::Hmac,
        name: "Tiger-HMAC",
        constructor: gated!("tiger", Constructor::Keyed(hmac_transform::<tiger::Tiger>)),
    },
    AlgorithmEntry {
        algorithm: Algorithm::HmacWhirlpool,
        category: Category::Hmac,
        name: "Whirlpool-HMAC",
        constructor: gated!("whirlpool", Constructor::Keyed(hmac_transform::<whirlpool::Whirlpool>)),
    },
];

lazy_static! {
    static ref INDEX: HashMap<u16, &'static AlgorithmEntry> =
        REGISTRY.iter().map(|entry| (entry.algorithm.id(), entry)).collect();
}

fn entry(algorithm: Algorithm) -> Result<&'static AlgorithmEntry> {
    match INDEX.get(&algorithm.id()) {
        Some(entry) => Ok(entry),
        None => Err(Error::with_message(ErrorKind::UnknownAlgorithm, format!("no algorithm with id {}", algorithm.id()))),
    }
}

fn disabled(entry: &AlgorithmEntry) -> Error {
    Error::with_message(ErrorKind::AlgorithmDisabled, entry.name)
}

fn wants_key(entry: &AlgorithmEntry) -> Error {
    Error::with_message(
        ErrorKind::InvalidCategory,
        format!("{} takes a key and must be constructed as an HMAC digester", entry.name),
    )
}

fn wants_no_key(entry: &AlgorithmEntry) -> Error {
    Error::with_message(
        ErrorKind::InvalidCategory,
        format!("{} takes no key and must be constructed as a plain digester", entry.name),
    )
}

/// Reports whether the algorithm was compiled into this build.
pub fn is_enabled(algorithm: Algorithm) -> bool {
    match INDEX.get(&algorithm.id()) {
        Some(entry) => entry.constructor.is_some(),
        None => false,
    }
}

/// Returns the display name of the algorithm, e.g. "SHA-256" or "MD5-HMAC".
/// Names resolve whether or not the algorithm is enabled.
pub fn name_of(algorithm: Algorithm) -> Result<&'static str> {
    Ok(entry(algorithm)?.name)
}

/// Lists enabled checksum and hash algorithms in identifier order.
pub fn digest_algorithms() -> Vec<Algorithm> {
    REGISTRY
        .iter()
        .filter(|entry| entry.category != Category::Hmac && entry.constructor.is_some())
        .map(|entry| entry.algorithm)
        .collect()
}

/// Lists enabled HMAC algorithms in identifier order.
pub fn hmac_algorithms() -> Vec<Algorithm> {
    REGISTRY
        .iter()
        .filter(|entry| entry.category == Category::Hmac && entry.constructor.is_some())
        .map(|entry| entry.algorithm)
        .collect()
}

pub(crate) fn instantiate_plain(algorithm: Algorithm) -> Result<Box<dyn Transform>> {
    let entry = entry(algorithm)?;
    // The category gate outranks the enabled gate so that a disabled HMAC
    // identifier still reports the category misuse.
    if entry.category == Category::Hmac {
        return Err(wants_key(entry));
    }
    match entry.constructor {
        None => Err(disabled(entry)),
        Some(Constructor::Plain(build)) => {
            trace!("instantiating {}", entry.name);
            build()
        }
        Some(Constructor::Keyed(_)) => Err(wants_key(entry)),
    }
}

pub(crate) fn instantiate_keyed(algorithm: Algorithm) -> Result<Box<dyn KeyedTransform>> {
    let entry = entry(algorithm)?;
    if entry.category != Category::Hmac {
        return Err(wants_no_key(entry));
    }
    match entry.constructor {
        None => Err(disabled(entry)),
        Some(Constructor::Keyed(build)) => {
            trace!("instantiating {}", entry.name);
            build()
        }
        Some(Constructor::Plain(_)) => Err(wants_no_key(entry)),
    }
}

pub(crate) enum Instance {
    Plain(Box<dyn Transform>),
    Keyed(Box<dyn KeyedTransform>),
}

pub(crate) fn instantiate(algorithm: Algorithm) -> Result<Instance> {
    let entry = entry(algorithm)?;
    match entry.constructor {
        None => Err(disabled(entry)),
        Some(Constructor::Plain(build)) => Ok(Instance::Plain(build()?)),
        Some(Constructor::Keyed(build)) => Ok(Instance::Keyed(build()?)),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_every_algorithm_has_a_registry_row() {
        assert_eq!(Algorithm::iter().count(), REGISTRY.len());
        for algorithm in Algorithm::iter() {
            let entry = entry(algorithm).unwrap();
            assert_eq!(entry.algorithm, algorithm);
            assert_eq!(entry.category, algorithm.category());
        }
    }

    #[test]
    fn test_identifier_ranges_follow_category() {
        for algorithm in Algorithm::iter() {
            let id = algorithm.id();
            match algorithm.category() {
                Category::Checksum => assert!((101..200).contains(&id), "{algorithm}: {id}"),
                Category::Hash => assert!((201..300).contains(&id), "{algorithm}: {id}"),
                Category::Hmac => assert!((301..400).contains(&id), "{algorithm}: {id}"),
            }
        }
    }

    #[test]
    fn test_hmac_identifier_mirrors_its_hash() {
        for algorithm in Algorithm::iter() {
            if algorithm.category() != Category::Hmac {
                continue;
            }
            let hash = Algorithm::from_id(algorithm.id() - 100).unwrap();
            assert_eq!(hash.category(), Category::Hash);
            assert_eq!(is_enabled(algorithm), is_enabled(hash));
        }
    }

    #[test]
    fn test_from_id() {
        for algorithm in Algorithm::iter() {
            assert_eq!(Algorithm::from_id(algorithm.id()).unwrap(), algorithm);
        }
        assert_eq!(Algorithm::from_id(0).unwrap_err().kind(), ErrorKind::UnknownAlgorithm);
        assert_eq!(Algorithm::from_id(214).unwrap_err().kind(), ErrorKind::UnknownAlgorithm);
        assert_eq!(Algorithm::from_id(999).unwrap_err().kind(), ErrorKind::UnknownAlgorithm);
    }

    #[test]
    fn test_names() {
        assert_eq!(name_of(Algorithm::Adler32).unwrap(), "Adler-32");
        assert_eq!(name_of(Algorithm::Crc32).unwrap(), "CRC-32");
        assert_eq!(name_of(Algorithm::Md5).unwrap(), "MD5");
        assert_eq!(name_of(Algorithm::Sha256).unwrap(), "SHA-256");
        assert_eq!(name_of(Algorithm::Haval).unwrap(), "HAVAL");
        assert_eq!(name_of(Algorithm::HmacMd5).unwrap(), "MD5-HMAC");
        assert_eq!(name_of(Algorithm::HmacWhirlpool).unwrap(), "Whirlpool-HMAC");
        assert_eq!(format!("{}", Algorithm::Sha1), "SHA-1");
        assert_eq!(format!("{}", Algorithm::HmacSha512), "SHA-512-HMAC");
    }

    #[test]
    fn test_permanently_disabled_algorithms() {
        for algorithm in [Algorithm::Haval, Algorithm::PanamaHash] {
            assert!(!is_enabled(algorithm));
            assert!(name_of(algorithm).is_ok());
            let err = instantiate_plain(algorithm).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::AlgorithmDisabled);
        }
        for algorithm in [Algorithm::HmacHaval, Algorithm::HmacPanama] {
            assert!(!is_enabled(algorithm));
            let err = instantiate_keyed(algorithm).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::AlgorithmDisabled);
        }
    }

    #[test]
    fn test_category_gate_outranks_enabled_gate() {
        let err = instantiate_plain(Algorithm::HmacHaval).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCategory);
        let err = instantiate_keyed(Algorithm::Haval).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCategory);
    }

    #[test]
    fn test_category_mismatch() {
        let err = instantiate_keyed(Algorithm::Crc32).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCategory);
        #[cfg(feature = "sha1")]
        {
            let err = instantiate_plain(Algorithm::HmacSha1).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidCategory);
            let err = instantiate_keyed(Algorithm::Sha1).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidCategory);
        }
    }

    #[test]
    fn test_listings_are_deterministic_and_sorted() {
        let digests = digest_algorithms();
        let hmacs = hmac_algorithms();
        assert_eq!(digests, digest_algorithms());
        assert_eq!(hmacs, hmac_algorithms());
        assert!(digests.windows(2).all(|pair| pair[0].id() < pair[1].id()));
        assert!(hmacs.windows(2).all(|pair| pair[0].id() < pair[1].id()));
        assert!(digests.iter().all(|algorithm| algorithm.category() != Category::Hmac));
        assert!(hmacs.iter().all(|algorithm| algorithm.category() == Category::Hmac));
        assert!(!digests.contains(&Algorithm::Haval));
        assert!(!digests.contains(&Algorithm::PanamaHash));
        assert!(!hmacs.contains(&Algorithm::HmacHaval));
        assert!(!hmacs.contains(&Algorithm::HmacPanama));
    }

    #[cfg(feature = "md5")]
    #[test]
    fn test_listings_carry_enabled_algorithms() {
        assert!(is_enabled(Algorithm::Md5));
        assert!(digest_algorithms().contains(&Algorithm::Md5));
        assert!(hmac_algorithms().contains(&Algorithm::HmacMd5));
    }

    #[test]
    fn test_enabled_algorithms_instantiate() {
        for algorithm in digest_algorithms() {
            let transform = instantiate_plain(algorithm).unwrap();
            assert!(transform.output_size() > 0, "{algorithm}");
        }
        for algorithm in hmac_algorithms() {
            let transform = instantiate_keyed(algorithm).unwrap();
            assert!(transform.output_size() > 0, "{algorithm}");
            assert_eq!(transform.effective_key_length(), 0);
        }
    }
}
