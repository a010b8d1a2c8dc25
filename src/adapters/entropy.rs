use crate::domain::ports::EntropySource;
use crate::utils::error::Result;
use rand::rngs::OsRng;
use rand::RngCore;

/// The operating system CSPRNG. Holds no state of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, dest: &mut [u8]) -> Result<()> {
        OsRng.try_fill_bytes(dest)?;
        Ok(())
    }
}
