use crate::entropy::RandomByteSource;
use std::io::{self, Read};

/// [`Read`] adapter over a [`RandomByteSource`].
///
/// A zero count from the source shows up as end of file, so a finite source
/// can be drained with `read_to_end`, and `read_exact` reports exhaustion as
/// [`io::ErrorKind::UnexpectedEof`].
#[derive(Debug, Clone)]
pub struct EntropyReader<S> {
    source: S,
}

impl<S: RandomByteSource> EntropyReader<S> {
    pub fn new(source: S) -> Self {
        EntropyReader { source }
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: RandomByteSource> Read for EntropyReader<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.source.fill(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::{ScriptedEntropy, SeededEntropy};

    #[test_env_log::test]
    fn finite_source_reads_to_end() {
        let mut reader = EntropyReader::new(ScriptedEntropy::new(vec![1, 2, 3, 4]).chunked(3));
        let mut out = Vec::new();

        assert_eq!(reader.read_to_end(&mut out).unwrap(), 4);
        assert_eq!(out, vec![1, 2, 3, 4]);
    }

    #[test_env_log::test]
    fn read_exact_past_the_end_is_unexpected_eof() {
        let mut reader = EntropyReader::new(ScriptedEntropy::new(vec![1, 2]));
        let mut out = [0u8; 3];

        let err = reader.read_exact(&mut out).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test_env_log::test]
    fn io_copy_from_limited_source() {
        let mut reader = EntropyReader::new(SeededEntropy::new(5).take(100));
        let mut sink = Vec::new();

        assert_eq!(io::copy(&mut reader, &mut sink).unwrap(), 100);
        assert_eq!(reader.get_mut().remaining(), 0);
    }

    #[test_env_log::test]
    fn into_inner_returns_partly_read_source() {
        let mut reader = EntropyReader::new(ScriptedEntropy::new(vec![1, 2, 3]));
        let mut out = [0u8; 2];

        reader.read_exact(&mut out).unwrap();

        let mut script = reader.into_inner();
        assert_eq!(script.remaining(), 1);
        assert_eq!(script.fill(&mut out), 1);
        assert_eq!(out, [3, 2]);
    }
}
