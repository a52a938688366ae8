//! Needleman-Wunsch scoring with 16 `i32` lanes per step.
//!
//! Rows run over the longer operand. For each character of the shorter operand
//! a whole block of substitution costs is gathered from one row (or column) of
//! the table, and substitutions and deletions are combined lane-parallel.
//! Insertions chain along the row, which is resolved by an inclusive
//! running-maximum scan. The scan is the dominant cost of this kernel: it
//! takes `log2(16)` shifted maxima per block plus a carry between blocks.
use sim_types::{
    alloc::MemoryAllocator, scratch::Rows, AllocError, Score, Seq, SubstitutionTable,
};

use crate::lanes::Lanes;

pub const LANES: usize = 16;
type V = Lanes<i32, LANES>;

/// Whether the scores of operands this long with this gap cost fit in `i32` lanes.
pub fn fits(a_len: usize, b_len: usize, gap: Score) -> bool {
    // The running-maximum ramp spans a full block, even for short operands.
    let cells = a_len as i128 + b_len as i128 + LANES as i128;
    let worst = cells * (gap.unsigned_abs() as i128).max(128);
    worst < i32::MAX as i128 / 2
}

/// As `sim_base_algos::nw::needleman_wunsch`, for operands satisfying `fits`.
pub fn needleman_wunsch<A: MemoryAllocator + ?Sized>(
    a: Seq,
    b: Seq,
    table: &SubstitutionTable,
    gap: Score,
    alloc: &A,
) -> Result<Score, AllocError> {
    debug_assert!(fits(a.len(), b.len(), gap));
    if a.is_empty() || b.is_empty() {
        return Ok((a.len() + b.len()) as Score * gap);
    }
    if b.len() >= a.len() {
        // Rows over `b`: one table row per character of `a`.
        solve(b, a, gap as i32, alloc, |c, x| table.cost(c, x))
    } else {
        // Rows over `a`: one table column per character of `b`.
        solve(a, b, gap as i32, alloc, |c, x| table.cost(x, c))
    }
}

/// `cost(c, x)` is the substitution cost of `c` from `outer` against `x` from `row`.
fn solve<A: MemoryAllocator + ?Sized>(
    row: Seq,
    outer: Seq,
    gap: i32,
    alloc: &A,
    cost: impl Fn(u8, u8) -> i8,
) -> Result<Score, AllocError> {
    let m = row.len();
    let mut rows = Rows::<i32, A, 2>::new(alloc, m + 1, 0)?;
    for (j, x) in rows.row_mut(0).iter_mut().enumerate() {
        *x = j as i32 * gap;
    }
    let gaps = V::splat(gap);
    // Lane `l` holds `(l + 1) * gap`.
    let ramp = V::from_fn(|l| (l as i32 + 1).saturating_mul(gap));

    for (i, &c) in outer.iter().enumerate() {
        let [prev, cur] = rows.split();
        cur[0] = (i as i32 + 1) * gap;
        let mut carry = cur[0];
        for j in (0..m).step_by(LANES) {
            let end = (j + LANES).min(m);
            let sub = V::from_fn(|l| row.get(j + l).map_or(0, |&x| cost(c, x) as i32));
            let diag = V::load(&prev[j..end], 0);
            let up = V::load(&prev[j + 1..end + 1], 0);
            let mut x = diag.saturating_add(sub).max(up.saturating_add(gaps));

            // Inclusive scan of `x[l] = max(x[l], x[l-1] + gap)`.
            let mut shift = 1;
            let mut step = gap;
            while shift < LANES {
                x = x.max(x.shift_in_by(shift, i32::MIN).saturating_add(V::splat(step)));
                shift *= 2;
                step = step.saturating_mul(2);
            }
            x = x.max(V::splat(carry).saturating_add(ramp));

            x.store(&mut cur[j + 1..end + 1]);
            carry = cur[end];
        }
        rows.rotate();
    }
    Ok(rows.row(0)[m] as Score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_types::alloc::CountingAllocator;

    #[test]
    fn gattaca() {
        let a = CountingAllocator::new();
        let table = SubstitutionTable::from_costs(1, -1);
        assert_eq!(needleman_wunsch(b"GATTACA", b"GCATGCU", &table, -1, &a), Ok(0));
        assert_eq!(a.live_blocks(), 0);
    }

    #[test]
    fn asymmetric_table() {
        let a = CountingAllocator::new();
        let mut table = SubstitutionTable::from_costs(0, -5);
        table.set(b'A', b'C', 3);
        assert_eq!(needleman_wunsch(b"AA", b"C", &table, -1, &a), Ok(2));
        assert_eq!(needleman_wunsch(b"C", b"AA", &table, -1, &a), Ok(-3));
    }

    #[test]
    fn score_range() {
        assert!(fits(1000, 1000, -1));
        assert!(!fits(usize::MAX / 4, 1, -1));
        assert!(!fits(1 << 24, 1 << 24, -128));
        assert!(!fits(1, 1, -(1 << 28)));
        assert!(!fits(0, 0, Score::MIN));
    }

    #[test]
    fn large_gap_on_tiny_input() {
        let a = CountingAllocator::new();
        let table = SubstitutionTable::unary();
        assert!(fits(1, 2, -(1 << 24)));
        assert_eq!(needleman_wunsch(b"a", b"b", &table, -(1 << 24), &a), Ok(-1));
        assert_eq!(needleman_wunsch(b"a", b"ab", &table, -(1 << 24), &a), Ok(-(1 << 24)));
    }
}
