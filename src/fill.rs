//! Helpers for callers that need every requested byte, not just some.
use crate::entropy::{InvalidRegion, RandomByteSource, Region};
use log::debug;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FillError {
    #[error("entropy source exhausted after {filled} of {requested} bytes")]
    Exhausted { filled: usize, requested: usize },
    #[error(transparent)]
    Region(#[from] InvalidRegion),
}

/// Calls the source until `dest` is completely filled.
///
/// Short fills are retried; a call returning `0` while bytes are still
/// missing ends the loop with [`FillError::Exhausted`]. On error the bytes
/// written so far stay in `dest`.
pub fn fill_exact<S>(source: &mut S, dest: &mut [u8]) -> Result<(), FillError>
where
    S: RandomByteSource + ?Sized,
{
    let requested = dest.len();
    let mut filled = 0;

    while filled < requested {
        let written = source.fill(&mut dest[filled..]);
        if written == 0 {
            return Err(FillError::Exhausted { filled, requested });
        }
        filled += written;

        if filled < requested {
            debug!("Short fill, {} of {} bytes so far", filled, requested);
        }
    }

    Ok(())
}

/// Region form of [`fill_exact`]: fills all of `buffer[offset..offset + length]`.
pub fn fill_region_exact<S>(
    source: &mut S,
    buffer: &mut [u8],
    offset: usize,
    length: usize,
) -> Result<(), FillError>
where
    S: RandomByteSource + ?Sized,
{
    let range = Region::new(offset, length).validate(buffer.len())?;

    fill_exact(source, &mut buffer[range])
}

/// Returns exactly `count` freshly generated bytes.
pub fn fill_vec<S>(source: &mut S, count: usize) -> Result<Vec<u8>, FillError>
where
    S: RandomByteSource + ?Sized,
{
    let mut out = vec![0; count];

    fill_exact(source, &mut out)?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::{ScriptedEntropy, SeededEntropy};

    #[test_env_log::test]
    fn fill_exact_retries_short_fills() {
        let mut source = ScriptedEntropy::new((1..=7).collect::<Vec<u8>>()).chunked(3);
        let mut buffer = [0u8; 7];

        assert_eq!(fill_exact(&mut source, &mut buffer), Ok(()));
        assert_eq!(buffer, [1, 2, 3, 4, 5, 6, 7]);
    }

    #[test_env_log::test]
    fn fill_exact_reports_how_far_it_got() {
        let mut source = ScriptedEntropy::new(vec![1, 2, 3]);
        let mut buffer = [0u8; 5];

        assert_eq!(
            fill_exact(&mut source, &mut buffer),
            Err(FillError::Exhausted {
                filled: 3,
                requested: 5
            })
        );
        assert_eq!(buffer, [1, 2, 3, 0, 0]);
    }

    #[test_env_log::test]
    fn fill_exact_on_empty_slice_does_not_call_source() {
        let mut source = ScriptedEntropy::new(Vec::new());

        assert_eq!(fill_exact(&mut source, &mut []), Ok(()));
    }

    #[test_env_log::test]
    fn fill_region_exact_checks_bounds_first() {
        let mut source = ScriptedEntropy::new(vec![1, 2, 3]);
        let mut buffer = [0u8; 4];

        let err = fill_region_exact(&mut source, &mut buffer, 3, 2).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid region: offset 3 + length 2 exceeds buffer of 4 bytes"
        );
        assert_eq!(source.remaining(), 3);

        assert_eq!(fill_region_exact(&mut source, &mut buffer, 1, 3), Ok(()));
        assert_eq!(buffer, [0, 1, 2, 3]);
    }

    #[test_env_log::test]
    fn fill_vec_works_with_trait_objects() {
        let mut source: Box<dyn RandomByteSource> = Box::new(SeededEntropy::new(11));

        let bytes = fill_vec(&mut source, 33).unwrap();

        assert_eq!(bytes.len(), 33);
        assert_eq!(bytes, fill_vec(&mut SeededEntropy::new(11), 33).unwrap());
    }

    #[test_env_log::test]
    fn exhausted_error_message() {
        let err = FillError::Exhausted {
            filled: 1,
            requested: 4,
        };

        assert_eq!(
            err.to_string(),
            "entropy source exhausted after 1 of 4 bytes"
        );
    }
}
