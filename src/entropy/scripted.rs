use super::RandomByteSource;
use log::debug;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ScriptError {
    #[error("script is not valid hex: {0}")]
    Hex(#[from] hex::FromHexError),
}

/// Replays a fixed byte sequence, in order, across calls.
///
/// When fewer bytes remain than requested the source short-fills with what is
/// left; after that every call returns `0`. Exhaustion is permanent until
/// [`ScriptedEntropy::rewind`] is called. Bytes past the returned count are
/// never written.
///
/// # Example
/// ```
/// use entropy_rs::entropy::{RandomByteSource, ScriptedEntropy};
///
/// let mut source = ScriptedEntropy::from_hex("d5a58c5f").unwrap();
/// let mut buffer = [0u8; 3];
///
/// assert_eq!(source.fill(&mut buffer), 3);
/// assert_eq!(buffer, [0xd5, 0xa5, 0x8c]);
/// assert_eq!(source.remaining(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedEntropy {
    script: Vec<u8>,
    position: usize,
}

impl ScriptedEntropy {
    pub fn new(script: impl Into<Vec<u8>>) -> Self {
        ScriptedEntropy {
            script: script.into(),
            position: 0,
        }
    }

    pub fn from_hex(input: &str) -> Result<Self, ScriptError> {
        Ok(Self::new(hex::decode(input.trim())?))
    }

    pub fn remaining(&self) -> usize {
        self.script.len() - self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Starts replaying the script from its first byte again.
    pub fn rewind(&mut self) {
        self.position = 0;
    }
}

impl RandomByteSource for ScriptedEntropy {
    fn fill(&mut self, dest: &mut [u8]) -> usize {
        let count = dest.len().min(self.remaining());
        let end = self.position + count;

        dest[..count].copy_from_slice(&self.script[self.position..end]);
        self.position = end;

        if count < dest.len() {
            debug!(
                "Script short fill: {} of {} bytes, {} consumed in total",
                count,
                dest.len(),
                self.position
            );
        }

        count
    }
}
