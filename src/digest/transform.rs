use std::fmt::{self, Formatter};

use crate::error::Result;

/// One-way transform over a byte stream. Implementations accumulate input
/// across `update` calls until `finalize_reset` emits the digest and returns
/// the transform to its initial state.
pub(crate) trait Transform: Send {
    fn output_size(&self) -> usize;

    fn update(&mut self, data: &[u8]);

    fn finalize_reset(&mut self) -> Vec<u8>;

    /// Drops accumulated input without emitting a digest.
    fn reset(&mut self);
}

impl fmt::Debug for dyn Transform {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::result::Result<(), fmt::Error> {
        f.debug_struct("Transform").finish_non_exhaustive()
    }
}

/// Transform mixing a secret key into the digest. The effective key length
/// is whatever the primitive settled on, which may differ from the last
/// requested length.
pub(crate) trait KeyedTransform: Transform {
    fn set_key(&mut self, key: &[u8]) -> Result<()>;

    fn key(&self) -> &[u8];

    fn set_key_length(&mut self, length: usize) -> Result<()>;

    fn effective_key_length(&self) -> usize;
}

impl fmt::Debug for dyn KeyedTransform {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::result::Result<(), fmt::Error> {
        f.debug_struct("KeyedTransform").finish_non_exhaustive()
    }
}
