//! Shared vocabulary of the similarity workspace.
//!
//! - `Seq`, `Cost`, `Score` and the sentinel values returned by the engines.
//! - `SubstitutionTable` for the alignment scorer.
//! - The pluggable allocator (`alloc`) and scoped scratch buffers (`scratch`).
//! - The UTF-8 primitives consumed by the codepoint variants (`utf8`).
//! - `Params`, the serializable configuration of an engine.

mod error;
mod params;

pub mod alloc;
pub mod scratch;
pub mod utf8;

pub use error::*;
pub use params::*;

/// An immutable view of the bytes to compare.
pub type Seq<'a> = &'a [u8];

/// An owned byte string.
pub type Sequence = Vec<u8>;

/// Distances and bounds.
pub type Cost = usize;

/// Alignment scores. Signed, since substitution costs may be negative.
pub type Score = isize;

/// A bound that never triggers an early exit.
pub const UNBOUNDED: Cost = Cost::MAX;

/// Returned instead of a distance when scratch memory could not be obtained.
///
/// Valid distances never exceed `max(len_a, len_b) + 1`, so this can not be
/// confused with a result.
pub const ALLOC_FAILURE: Cost = Cost::MAX;

/// Returned by the UTF-8 entry points for malformed input, when validation is
/// enabled via `Utf8Policy::Validate`.
pub const INVALID_UTF8: Cost = Cost::MAX - 1;

/// Returned instead of a score when scratch memory could not be obtained.
pub const SCORE_ALLOC_FAILURE: Score = Score::MAX;

/// The value reported for a distance that exceeds `bound`.
///
/// Strictly larger than `bound`, and never reached for `UNBOUNDED`.
#[inline(always)]
pub fn exceeded(bound: Cost) -> Cost {
    bound.saturating_add(1)
}

/// Map a raw distance onto the bounded result domain.
#[inline(always)]
pub fn clamp_to_bound(distance: Cost, bound: Cost) -> Cost {
    if distance > bound {
        exceeded(bound)
    } else {
        distance
    }
}

/// Convert a byte slice to a string for printing, replacing invalid UTF-8.
pub fn seq_to_string(seq: Seq) -> String {
    String::from_utf8_lossy(seq).into_owned()
}

/// A dense 256x256 table of signed substitution costs.
///
/// Rows are indexed by the byte of the first operand, columns by the byte of
/// the second one. Boxed, since it is 64KiB.
#[derive(Clone, PartialEq, Eq)]
pub struct SubstitutionTable {
    costs: Box<[[i8; 256]; 256]>,
}

impl SubstitutionTable {
    /// Build a table from a function of the two bytes.
    pub fn from_fn(mut f: impl FnMut(u8, u8) -> i8) -> Self {
        let mut costs = Box::new([[0i8; 256]; 256]);
        for (a, row) in costs.iter_mut().enumerate() {
            for (b, cost) in row.iter_mut().enumerate() {
                *cost = f(a as u8, b as u8);
            }
        }
        Self { costs }
    }

    /// `matched` on the diagonal, `mismatched` everywhere else.
    pub fn from_costs(matched: i8, mismatched: i8) -> Self {
        Self::from_fn(|a, b| if a == b { matched } else { mismatched })
    }

    /// 0 on the diagonal, -1 elsewhere.
    ///
    /// Together with a gap cost of -1 the alignment score equals the negated
    /// Levenshtein distance.
    pub fn unary() -> Self {
        Self::from_costs(0, -1)
    }

    #[inline(always)]
    pub fn cost(&self, a: u8, b: u8) -> i8 {
        self.costs[a as usize][b as usize]
    }

    /// All costs for substituting byte `a` of the first operand.
    #[inline(always)]
    pub fn row(&self, a: u8) -> &[i8; 256] {
        &self.costs[a as usize]
    }

    pub fn set(&mut self, a: u8, b: u8, cost: i8) {
        self.costs[a as usize][b as usize] = cost;
    }

    /// Whether `cost(a, b) == cost(b, a)` for all pairs.
    pub fn is_symmetric(&self) -> bool {
        (0..256).all(|a| (0..a).all(|b| self.costs[a][b] == self.costs[b][a]))
    }
}

impl std::fmt::Debug for SubstitutionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubstitutionTable")
            .field("symmetric", &self.is_symmetric())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unary_table() {
        let t = SubstitutionTable::unary();
        assert_eq!(t.cost(b'a', b'a'), 0);
        assert_eq!(t.cost(b'a', b'b'), -1);
        assert_eq!(t.cost(255, 0), -1);
        assert!(t.is_symmetric());
    }

    #[test]
    fn asymmetric_table() {
        let mut t = SubstitutionTable::from_costs(2, -3);
        assert!(t.is_symmetric());
        t.set(b'A', b'C', 1);
        assert!(!t.is_symmetric());
        assert_eq!(t.row(b'A')[b'C' as usize], 1);
        assert_eq!(t.cost(b'C', b'A'), -3);
    }

    #[test]
    fn bounded_results() {
        assert_eq!(clamp_to_bound(3, 3), 3);
        assert_eq!(clamp_to_bound(4, 3), 4);
        assert_eq!(clamp_to_bound(10, 3), 4);
        assert_eq!(clamp_to_bound(10, 0), 1);
        assert_eq!(clamp_to_bound(10, UNBOUNDED), 10);
        assert_eq!(exceeded(UNBOUNDED), UNBOUNDED);
    }
}
