use super::RandomByteSource;
use log::debug;
use std::convert::TryFrom;

/// Source adapter that stops after a fixed total number of bytes.
///
/// Created by [`RandomByteSource::take`]. Once the budget is spent every call
/// returns `0`, which turns any source into a finite one.
#[derive(Debug, Clone)]
pub struct Limited<S> {
    inner: S,
    remaining: u64,
}

impl<S> Limited<S> {
    pub fn new(inner: S, limit: u64) -> Self {
        Limited {
            inner,
            remaining: limit,
        }
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: RandomByteSource> RandomByteSource for Limited<S> {
    fn fill(&mut self, dest: &mut [u8]) -> usize {
        if self.remaining == 0 {
            return 0;
        }

        let allowed = usize::try_from(self.remaining).map_or(dest.len(), |r| r.min(dest.len()));
        // inner sources may over-report, the budget never goes below zero
        let written = self.inner.fill(&mut dest[..allowed]).min(allowed);
        self.remaining -= written as u64;

        if self.remaining == 0 {
            debug!("Byte budget spent");
        }

        written
    }
}

/// Source adapter that hands out at most `max_per_call` bytes per call.
///
/// Created by [`RandomByteSource::chunked`]. Useful to check that callers
/// handle short fills. A maximum of `0` is treated as `1`.
#[derive(Debug, Clone)]
pub struct Chunked<S> {
    inner: S,
    max_per_call: usize,
}

impl<S> Chunked<S> {
    pub fn new(inner: S, max_per_call: usize) -> Self {
        Chunked {
            inner,
            max_per_call: max_per_call.max(1),
        }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: RandomByteSource> RandomByteSource for Chunked<S> {
    fn fill(&mut self, dest: &mut [u8]) -> usize {
        let allowed = dest.len().min(self.max_per_call);

        self.inner.fill(&mut dest[..allowed])
    }
}
