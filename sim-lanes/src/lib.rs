//! Lane-parallel kernels.
//!
//! - `lanes`: the `Lanes<T, N>` vector type the kernels are written in.
//! - `edit`: edit distance for operands of at most 63, 127 or 255 bytes, with
//!   a whole anti-diagonal in one vector.
//! - `nw`: Needleman-Wunsch scoring over blocks of 16 cells.
//!
//! Results are identical to the serial engines in `sim-base-algos`.

pub mod edit;
pub mod lanes;
pub mod nw;


pub use edit::{capacity, levenshtein_fitting, WIDTHS};
pub use lanes::{Lanes, Mask};
