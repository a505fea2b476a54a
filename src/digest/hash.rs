use digest::DynDigest;

use super::transform::Transform;
use crate::error::Result;

/// Adapts any RustCrypto hash to the transform seam.
pub(crate) struct HashTransform<D> {
    digest: D,
}

pub(crate) fn hash_transform<D>() -> Result<Box<dyn Transform>>
where
    D: DynDigest + Default + Send + 'static,
{
    Ok(Box::new(HashTransform { digest: D::default() }))
}

impl<D> Transform for HashTransform<D>
where
    D: DynDigest + Send,
{
    fn output_size(&self) -> usize {
        self.digest.output_size()
    }

    fn update(&mut self, data: &[u8]) {
        self.digest.update(data);
    }

    fn finalize_reset(&mut self) -> Vec<u8> {
        self.digest.finalize_reset().into_vec()
    }

    fn reset(&mut self) {
        self.digest.reset();
    }
}
