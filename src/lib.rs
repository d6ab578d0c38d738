//! Fixed-width extended-precision unsigned integers.
//!
//! Provides [`U256`] and [`U512`] as plain `Copy` value types built from
//! two halves of the next smaller width, bottoming out on `u128`. All
//! arithmetic wraps modulo `2^N`; division is Knuth's Algorithm D
//! (TAOCP volume 2, section 4.3.1).

pub mod uint;

pub use uint::{DivResult, ParseUintError, U256, U512};
