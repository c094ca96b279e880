use super::RandomByteSource;
use rand::prelude::*;

/// Draws bytes from the thread local RNG (`rand::thread_rng()`).
///
/// Never short-fills. The type is zero sized and does not store the RNG, it
/// looks up the calling thread's generator on every call, so it can be shared
/// and moved between threads freely. Not reproducible: use
/// [`SeededEntropy`](super::SeededEntropy) when a run has to be replayed.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadEntropy;

impl RandomByteSource for ThreadEntropy {
    fn fill(&mut self, dest: &mut [u8]) -> usize {
        thread_rng().fill_bytes(dest);

        dest.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_env_log::test]
    fn fills_whole_buffer() {
        let mut buffer = [0u8; 64];

        assert_eq!(ThreadEntropy.fill_bytes(&mut buffer, 0, 64), Ok(64));
        // 64 zero bytes from a healthy RNG is not going to happen
        assert!(buffer.iter().any(|b| *b != 0));
    }

    #[test_env_log::test]
    fn leaves_bytes_outside_region_alone() {
        let mut buffer = [0xAAu8; 16];

        assert_eq!(ThreadEntropy.fill_bytes(&mut buffer, 4, 8), Ok(8));
        assert_eq!(&buffer[..4], &[0xAA; 4]);
        assert_eq!(&buffer[12..], &[0xAA; 4]);
    }
}
