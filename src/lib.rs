//! Pluggable random byte sources for reproducible randomized tests.
//!
//! Code under test asks a [`RandomByteSource`] for bytes instead of calling a
//! generator directly. Production code passes [`ThreadEntropy`] or
//! [`OsEntropy`], tests pass [`SeededEntropy`] or [`ScriptedEntropy`] and get
//! the same bytes on every run.
//!
//! # Example
//! ```
//! use entropy_rs::entropy::{RandomByteSource, SeededEntropy};
//! use entropy_rs::fill::fill_vec;
//!
//! fn roll(source: &mut dyn RandomByteSource) -> u8 {
//!     let byte = fill_vec(source, 1).expect("source exhausted");
//!     byte[0] % 6 + 1
//! }
//!
//! let first = roll(&mut SeededEntropy::new(3));
//! assert_eq!(first, roll(&mut SeededEntropy::new(3)));
//! ```
pub mod check;
pub mod config;
pub mod entropy;
pub mod fill;
pub mod reader;

pub use entropy::{
    InvalidRegion, OsEntropy, RandomByteSource, Region, ScriptedEntropy, SeededEntropy,
    ThreadEntropy,
};
