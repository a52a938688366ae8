//! Hamming distance over bytes and over codepoints.
//!
//! A bound of 0 means unbounded. Otherwise the count saturates at the bound.
use itertools::{EitherOrBoth, Itertools};
use sim_types::{utf8::runes, Cost, Seq, UNBOUNDED};

#[inline(always)]
fn effective_bound(bound: Cost) -> Cost {
    if bound == 0 {
        UNBOUNDED
    } else {
        bound
    }
}

/// Number of positions with different bytes. Bytes past the end of the shorter
/// operand all count as mismatches.
pub fn hamming(a: Seq, b: Seq, bound: Cost) -> Cost {
    let bound = effective_bound(bound);
    let mut d = a.len().abs_diff(b.len());
    if d >= bound {
        return bound;
    }
    // Count per block so the inner loop has no early exit.
    const BLOCK: usize = 64;
    for (ca, cb) in a.chunks(BLOCK).zip(b.chunks(BLOCK)) {
        d += ca.iter().zip(cb).filter(|(x, y)| x != y).count();
        if d >= bound {
            return bound;
        }
    }
    d
}

/// As `hamming`, but comparing decoded codepoints.
pub fn hamming_utf8(a: Seq, b: Seq, bound: Cost) -> Cost {
    let bound = effective_bound(bound);
    let mut d = 0;
    for pair in runes(a).zip_longest(runes(b)) {
        if let EitherOrBoth::Both(x, y) = pair {
            if x == y {
                continue;
            }
        }
        d += 1;
        if d >= bound {
            return bound;
        }
    }
    d
}
