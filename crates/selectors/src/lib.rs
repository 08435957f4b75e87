//! # PUSH4 Selectors
//!
//! Target derivation for the selector mining pipeline.
//!
//! A pixel in the source grid becomes a 4-byte function selector target:
//! three color bytes followed by the pixel's column index. Mining then
//! searches for a function name whose keccak-256 hash, truncated to 4 bytes,
//! reproduces that target. This crate owns the target side of the problem:
//! parsing pixel grids, decomposing selectors, the hash itself, and the
//! prefix strategy used to steer retries away from name collisions.

mod error;
mod image;
mod prefix;
mod selector;

pub use error::{Result, SelectorError};
pub use image::ImageData;
pub use prefix::{PrefixStrategy, RandomSuffixPrefix};
pub use selector::{function_selector, keccak256, PixelSelector};
