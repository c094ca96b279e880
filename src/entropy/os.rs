use super::RandomByteSource;
use log::warn;
use rand::rngs::OsRng;
use rand::RngCore;

/// Draws bytes straight from the operating system (`getrandom`).
///
/// The call may block until the OS entropy pool is ready. If the OS reports an
/// error the source logs it and returns `0`; this is a temporary condition and
/// later calls may succeed again.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl RandomByteSource for OsEntropy {
    fn fill(&mut self, dest: &mut [u8]) -> usize {
        match OsRng.try_fill_bytes(dest) {
            Ok(()) => dest.len(),
            Err(e) => {
                warn!("OS entropy unavailable for {} bytes: {}", dest.len(), e);
                0
            }
        }
    }
}
