//! Pluggable sources of random bytes.
//!
//! Code that needs randomness takes a [`RandomByteSource`] instead of calling
//! a generator directly, so tests can swap in a seeded or scripted source and
//! replay a failing run byte for byte.
use std::ops::Range;
use thiserror::Error;

mod adapters;
mod os;
mod scripted;
mod seeded;
mod thread;

pub use adapters::{Chunked, Limited};
pub use os::OsEntropy;
pub use scripted::{ScriptError, ScriptedEntropy};
pub use seeded::SeededEntropy;
pub use thread::ThreadEntropy;

/// Sub-region of a caller owned buffer, given as offset and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub offset: usize,
    pub length: usize,
}

/// Returned when a region does not fit into the buffer it refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid region: offset {offset} + length {length} exceeds buffer of {capacity} bytes")]
pub struct InvalidRegion {
    pub offset: usize,
    pub length: usize,
    pub capacity: usize,
}

impl Region {
    pub fn new(offset: usize, length: usize) -> Self {
        Region { offset, length }
    }

    /// Exclusive end index, `None` if `offset + length` overflows.
    pub fn end(&self) -> Option<usize> {
        self.offset.checked_add(self.length)
    }

    /// Index range of this region in a buffer of `capacity` bytes.
    pub fn validate(&self, capacity: usize) -> Result<Range<usize>, InvalidRegion> {
        match self.end() {
            Some(end) if end <= capacity => Ok(self.offset..end),
            _ => Err(InvalidRegion {
                offset: self.offset,
                length: self.length,
                capacity,
            }),
        }
    }

    /// Like [`Region::validate`], but cuts the region down to the buffer
    /// instead of failing. May return an empty range.
    pub fn clamp(&self, capacity: usize) -> Range<usize> {
        let start = self.offset.min(capacity);
        let end = self.offset.saturating_add(self.length).min(capacity);
        start..end
    }
}

/// A capability that fills byte buffers with random data.
///
/// Implementations decide where the bytes come from: the thread local RNG,
/// the operating system, a fixed seed or a scripted sequence. Callers must not
/// assume the data is unpredictable, and must always check the returned count,
/// because a source may write fewer bytes than requested.
///
/// Only [`RandomByteSource::fill`] is required. It receives exactly the slice
/// it may write to, so an implementation cannot touch memory outside the
/// requested region.
///
/// # Example
/// ```
/// use entropy_rs::entropy::{RandomByteSource, ScriptedEntropy};
///
/// let mut source = ScriptedEntropy::new(vec![1, 2, 3]);
/// let mut buffer = [0u8; 6];
///
/// assert_eq!(source.fill_bytes(&mut buffer, 2, 4), Ok(3));
/// assert_eq!(buffer, [0, 0, 1, 2, 3, 0]);
/// assert_eq!(source.fill_bytes(&mut buffer, 0, 6), Ok(0));
/// ```
pub trait RandomByteSource {
    /// Writes generated bytes to the front of `dest` and returns how many were
    /// written, at most `dest.len()`.
    ///
    /// Bytes past the returned count are left unspecified. A return value of
    /// `0` for a non empty `dest` means no randomness was available; whether
    /// that is temporary or permanent is documented by each implementation.
    fn fill(&mut self, dest: &mut [u8]) -> usize;

    /// Fills `buffer[offset..offset + length]` and returns the number of bytes
    /// written starting at `offset`.
    ///
    /// A region that does not fit into `buffer` is rejected with
    /// [`InvalidRegion`] and the buffer is left untouched.
    fn fill_bytes(
        &mut self,
        buffer: &mut [u8],
        offset: usize,
        length: usize,
    ) -> Result<usize, InvalidRegion> {
        let range = Region::new(offset, length).validate(buffer.len())?;
        Ok(self.fill(&mut buffer[range]))
    }

    /// Tolerant variant of [`RandomByteSource::fill_bytes`]: a region reaching
    /// past the end of `buffer` is cut down to the buffer instead of rejected.
    ///
    /// The count is relative to `offset`, like for `fill_bytes`.
    fn fill_bytes_clamped(&mut self, buffer: &mut [u8], offset: usize, length: usize) -> usize {
        let range = Region::new(offset, length).clamp(buffer.len());
        self.fill(&mut buffer[range])
    }

    /// Caps the total number of bytes this source will ever produce.
    fn take(self, limit: u64) -> Limited<Self>
    where
        Self: Sized,
    {
        Limited::new(self, limit)
    }

    /// Produces at most `max_per_call` bytes per call.
    fn chunked(self, max_per_call: usize) -> Chunked<Self>
    where
        Self: Sized,
    {
        Chunked::new(self, max_per_call)
    }

    /// Borrows the source, so adapters can be applied without consuming it.
    fn by_ref(&mut self) -> &mut Self
    where
        Self: Sized,
    {
        self
    }
}

impl<S: RandomByteSource + ?Sized> RandomByteSource for &mut S {
    fn fill(&mut self, dest: &mut [u8]) -> usize {
        (**self).fill(dest)
    }

    fn fill_bytes(
        &mut self,
        buffer: &mut [u8],
        offset: usize,
        length: usize,
    ) -> Result<usize, InvalidRegion> {
        (**self).fill_bytes(buffer, offset, length)
    }

    fn fill_bytes_clamped(&mut self, buffer: &mut [u8], offset: usize, length: usize) -> usize {
        (**self).fill_bytes_clamped(buffer, offset, length)
    }
}

impl<S: RandomByteSource + ?Sized> RandomByteSource for Box<S> {
    fn fill(&mut self, dest: &mut [u8]) -> usize {
        (**self).fill(dest)
    }

    fn fill_bytes(
        &mut self,
        buffer: &mut [u8],
        offset: usize,
        length: usize,
    ) -> Result<usize, InvalidRegion> {
        (**self).fill_bytes(buffer, offset, length)
    }

    fn fill_bytes_clamped(&mut self, buffer: &mut [u8], offset: usize, length: usize) -> usize {
        (**self).fill_bytes_clamped(buffer, offset, length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Writes its counter into every byte it is given.
    struct CountingEntropy {
        calls: u8,
    }

    impl RandomByteSource for CountingEntropy {
        fn fill(&mut self, dest: &mut [u8]) -> usize {
            self.calls += 1;
            for byte in dest.iter_mut() {
                *byte = self.calls;
            }
            dest.len()
        }
    }

    #[test_env_log::test]
    fn region_validate_accepts_regions_inside_buffer() {
        assert_eq!(Region::new(0, 8).validate(8), Ok(0..8));
        assert_eq!(Region::new(3, 2).validate(8), Ok(3..5));
        assert_eq!(Region::new(8, 0).validate(8), Ok(8..8));
        assert_eq!(Region::new(0, 0).validate(0), Ok(0..0));
    }

    #[test_env_log::test]
    fn region_validate_rejects_regions_past_the_end() {
        assert_eq!(
            Region::new(6, 3).validate(8),
            Err(InvalidRegion {
                offset: 6,
                length: 3,
                capacity: 8
            })
        );
        assert!(Region::new(9, 0).validate(8).is_err());
        assert!(Region::new(usize::MAX, 2).validate(8).is_err());
    }

    #[test_env_log::test]
    fn region_clamp_cuts_down_to_buffer() {
        assert_eq!(Region::new(6, 3).clamp(8), 6..8);
        assert_eq!(Region::new(10, 3).clamp(8), 8..8);
        assert_eq!(Region::new(2, usize::MAX).clamp(8), 2..8);
        assert_eq!(Region::new(1, 2).clamp(8), 1..3);
    }

    #[test_env_log::test]
    fn fill_bytes_writes_only_the_region() {
        let mut source = CountingEntropy { calls: 0 };
        let mut buffer = [0u8; 6];

        assert_eq!(source.fill_bytes(&mut buffer, 1, 3), Ok(3));
        assert_eq!(buffer, [0, 1, 1, 1, 0, 0]);
    }

    #[test_env_log::test]
    fn fill_bytes_with_zero_length_leaves_buffer_unchanged() {
        let mut source = CountingEntropy { calls: 0 };
        let mut buffer = [7u8; 4];

        assert_eq!(source.fill_bytes(&mut buffer, 2, 0), Ok(0));
        assert_eq!(source.fill_bytes(&mut buffer, 4, 0), Ok(0));
        assert_eq!(buffer, [7; 4]);
    }

    #[test_env_log::test]
    fn fill_bytes_rejects_invalid_region_without_writing() {
        let mut source = CountingEntropy { calls: 0 };
        let mut buffer = [7u8; 4];

        let err = source.fill_bytes(&mut buffer, 2, 3).unwrap_err();
        assert_eq!(err.capacity, 4);
        assert_eq!(
            err.to_string(),
            "invalid region: offset 2 + length 3 exceeds buffer of 4 bytes"
        );
        assert_eq!(buffer, [7; 4]);
        assert_eq!(source.calls, 0);
    }

    #[test_env_log::test]
    fn fill_bytes_clamped_stops_at_buffer_end() {
        let mut source = CountingEntropy { calls: 0 };
        let mut buffer = [7u8; 4];

        assert_eq!(source.fill_bytes_clamped(&mut buffer, 2, 10), 2);
        assert_eq!(buffer, [7, 7, 1, 1]);
        assert_eq!(source.fill_bytes_clamped(&mut buffer, 5, 1), 0);
        assert_eq!(buffer, [7, 7, 1, 1]);
    }

    #[test_env_log::test]
    fn works_through_references_and_boxes() {
        let mut source = CountingEntropy { calls: 0 };
        let mut buffer = [0u8; 2];

        assert_eq!(source.by_ref().fill_bytes(&mut buffer, 0, 1), Ok(1));

        let mut boxed: Box<dyn RandomByteSource> = Box::new(source);
        assert_eq!(boxed.fill_bytes(&mut buffer, 1, 1), Ok(1));
        assert_eq!(buffer, [1, 2]);
    }
}
