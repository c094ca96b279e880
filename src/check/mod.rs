//! Conformance checks for [`RandomByteSource`] implementations.
//!
//! Harnesses that bring their own source can run [`check_conformance`] on it,
//! and [`check_reproducible`] when the source is supposed to be
//! deterministic.
use crate::entropy::{RandomByteSource, Region};
use crate::fill::{fill_vec, FillError};
use log::debug;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Broken rule found by one of the checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("returned {returned} for a region of {requested} bytes")]
    Overcount { returned: usize, requested: usize },
    #[error("wrote byte {index}, outside region {offset}+{length}")]
    OutOfRegionWrite {
        index: usize,
        offset: usize,
        length: usize,
    },
    #[error("accepted region {offset}+{length} in a buffer of {capacity} bytes")]
    AcceptedInvalidRegion {
        offset: usize,
        length: usize,
        capacity: usize,
    },
    #[error("rejected region {offset}+{length} in a buffer of {capacity} bytes")]
    RejectedValidRegion {
        offset: usize,
        length: usize,
        capacity: usize,
    },
    #[error("wrote byte {index} past the {written} bytes reported for region {offset}+{length}")]
    TailWrite {
        index: usize,
        written: usize,
        offset: usize,
        length: usize,
    },
    #[error("call {call} diverged between two sources built the same way")]
    Diverged { call: usize },
}

/// Byte the check buffers are initialised with, position dependent so a
/// shifted write is also caught.
fn pattern(index: usize) -> u8 {
    (index as u8).wrapping_mul(31) ^ 0x5A
}

fn patterned(capacity: usize) -> Vec<u8> {
    (0..capacity).map(pattern).collect()
}

/// Runs one `fill_bytes` call on a patterned buffer of `capacity` bytes and
/// checks the outcome.
///
/// A region that fits must be accepted, return at most `length`, and leave
/// every byte outside `[offset, offset + length)` alone. A region that does
/// not fit must be rejected with the buffer untouched. Returns the count
/// reported by the source, `0` for a rejected region.
///
/// Bytes past the reported count but inside the region may be written, for
/// example zeroed. Use [`check_region_strict`] to reject that too.
pub fn check_region<S>(
    source: &mut S,
    capacity: usize,
    offset: usize,
    length: usize,
) -> Result<usize, Violation>
where
    S: RandomByteSource + ?Sized,
{
    region_outcome(source, capacity, offset, length, false)
}

/// Like [`check_region`], but also requires the short-fill tail
/// `[offset + written, offset + length)` to stay untouched.
pub fn check_region_strict<S>(
    source: &mut S,
    capacity: usize,
    offset: usize,
    length: usize,
) -> Result<usize, Violation>
where
    S: RandomByteSource + ?Sized,
{
    region_outcome(source, capacity, offset, length, true)
}

fn region_outcome<S>(
    source: &mut S,
    capacity: usize,
    offset: usize,
    length: usize,
    strict_tail: bool,
) -> Result<usize, Violation>
where
    S: RandomByteSource + ?Sized,
{
    let mut buffer = patterned(capacity);
    let region = Region::new(offset, length);

    let (written, inside) = match (
        region.validate(capacity),
        source.fill_bytes(&mut buffer, offset, length),
    ) {
        (Ok(range), Ok(written)) => (written, range),
        (Err(_), Err(_)) => (0, 0..0),
        (Ok(_), Err(_)) => {
            return Err(Violation::RejectedValidRegion {
                offset,
                length,
                capacity,
            })
        }
        (Err(_), Ok(_)) => {
            return Err(Violation::AcceptedInvalidRegion {
                offset,
                length,
                capacity,
            })
        }
    };

    if written > length {
        return Err(Violation::Overcount {
            returned: written,
            requested: length,
        });
    }

    let touched = buffer
        .iter()
        .enumerate()
        .find(|(index, byte)| !inside.contains(index) && **byte != pattern(*index));

    if let Some((index, _)) = touched {
        return Err(Violation::OutOfRegionWrite {
            index,
            offset,
            length,
        });
    }

    if strict_tail {
        let tail = inside.start + written..inside.end;
        if let Some(index) = tail.into_iter().find(|index| buffer[*index] != pattern(*index)) {
            return Err(Violation::TailWrite {
                index,
                written,
                offset,
                length,
            });
        }
    }

    Ok(written)
}

/// Runs the standard battery of region checks against `source`.
///
/// Covers empty regions at the start, middle and end of a buffer, a full
/// buffer, an interior region, a region running past the end and an offset
/// that overflows. A source that is already exhausted passes as long as it
/// keeps within the rules. Writes to the short-fill tail are tolerated; see
/// [`check_conformance_strict`].
pub fn check_conformance<S>(source: &mut S) -> Result<(), Violation>
where
    S: RandomByteSource + ?Sized,
{
    run_battery(source, false)
}

/// [`check_conformance`] with [`check_region_strict`] for every case.
pub fn check_conformance_strict<S>(source: &mut S) -> Result<(), Violation>
where
    S: RandomByteSource + ?Sized,
{
    run_battery(source, true)
}

fn run_battery<S>(source: &mut S, strict_tail: bool) -> Result<(), Violation>
where
    S: RandomByteSource + ?Sized,
{
    const CAPACITY: usize = 64;

    let cases = [
        (0, 0),
        (CAPACITY / 2, 0),
        (CAPACITY, 0),
        (0, CAPACITY),
        (5, 17),
        (CAPACITY - 1, 1),
        (CAPACITY - 4, 8),
        (CAPACITY + 1, 0),
        (usize::MAX, 2),
    ];

    for (offset, length) in cases.iter() {
        let written = region_outcome(source, CAPACITY, *offset, *length, strict_tail)?;
        debug!("Region {}+{}: {} bytes written", offset, length, written);
    }

    Ok(())
}

/// Checks that two sources built by `make` produce the same counts and bytes
/// for the same sequence of request sizes.
pub fn check_reproducible<S, F>(mut make: F, lengths: &[usize]) -> Result<(), Violation>
where
    S: RandomByteSource,
    F: FnMut() -> S,
{
    let mut first = make();
    let mut second = make();

    for (call, length) in lengths.iter().enumerate() {
        let mut a = vec![0; *length];
        let mut b = vec![0; *length];

        let written_a = first.fill(&mut a);
        let written_b = second.fill(&mut b);

        if written_a != written_b || a[..written_a.min(*length)] != b[..written_b.min(*length)] {
            return Err(Violation::Diverged { call });
        }
    }

    Ok(())
}

/// Hex encoded SHA-256 of the next `count` bytes of `source`.
///
/// Handy for pinning the output of a deterministic source in a test, or for
/// logging what a seeded run produced.
pub fn fingerprint<S>(source: &mut S, count: usize) -> Result<String, FillError>
where
    S: RandomByteSource + ?Sized,
{
    let bytes = fill_vec(source, count)?;

    Ok(hex::encode(Sha256::digest(&bytes)))
}
