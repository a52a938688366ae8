//! Edit distance in anti-diagonal order, using three rolling diagonals.
//!
//! Diagonal `k` holds the cells `(i, k - i)`, indexed by the position `i` in
//! the shorter operand. The diagonal grows while `k <= shorter.len()`, keeps
//! its full length while `k <= longer.len()`, and shrinks after that. Cells of
//! one diagonal only depend on the two previous diagonals, so each diagonal is
//! filled by a branch-free loop over zipped slices that the compiler
//! vectorizes.
use itertools::izip;
use sim_types::{alloc::MemoryAllocator, scratch::Rows, AllocError, Cost};

/// Fill cells `lo..=hi` of diagonal `k`, for `1 <= lo`.
#[inline(always)]
fn relax<C: Copy + Eq>(
    longer: &[C],
    shorter: &[C],
    k: usize,
    lo: usize,
    hi: usize,
    [prev2, prev1, next]: [&mut [Cost]; 3],
) {
    if lo > hi {
        return;
    }
    // Walking up the shorter operand walks down the longer one.
    let l = longer[k - hi - 1..k - lo].iter().rev();
    for (n, &diag, &up, &left, &s, &c) in izip!(
        &mut next[lo..=hi],
        &prev2[lo - 1..hi],
        &prev1[lo - 1..hi],
        &prev1[lo..=hi],
        &shorter[lo - 1..hi],
        l
    ) {
        *n = (diag + (s != c) as Cost).min(up.min(left) + 1);
    }
}

/// Unbounded Levenshtein distance, for `longer.len() >= shorter.len()`.
pub fn skewed_diagonal<C: Copy + Eq, A: MemoryAllocator + ?Sized>(
    longer: &[C],
    shorter: &[C],
    alloc: &A,
) -> Result<Cost, AllocError> {
    debug_assert!(longer.len() >= shorter.len());
    let (n, m) = (shorter.len(), longer.len());
    let mut diagonals = Rows::<Cost, A, 3>::new(alloc, n + 1, 0)?;

    // Growing: both ends lie on the border of the matrix.
    for k in 0..=n {
        let d = diagonals.split();
        d[2][0] = k;
        d[2][k] = k;
        if k >= 2 {
            relax(longer, shorter, k, 1, k - 1, d);
        }
        diagonals.rotate();
    }
    // Band: only the cell in the first row is on the border.
    for k in n + 1..=m {
        let d = diagonals.split();
        d[2][0] = k;
        relax(longer, shorter, k, 1, n, d);
        diagonals.rotate();
    }
    // Shrinking: the diagonal starts at row `k - m`.
    for k in m + 1..=n + m {
        relax(longer, shorter, k, k - m, n, diagonals.split());
        diagonals.rotate();
    }
    Ok(diagonals.row(1)[n])
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_types::alloc::CountingAllocator;

    #[test]
    fn small() {
        let a = CountingAllocator::new();
        assert_eq!(skewed_diagonal(b"sitting", b"kitten", &a), Ok(3));
        assert_eq!(skewed_diagonal(b"abc", b"abc", &a), Ok(0));
        assert_eq!(skewed_diagonal(b"hello", b"", &a), Ok(5));
        assert_eq!(skewed_diagonal(b"", b"", &a), Ok(0));
        assert_eq!(skewed_diagonal(b"a", b"b", &a), Ok(1));
        assert_eq!(skewed_diagonal(b"ABCDEFGabcdefg", b"abcdefgABCDEFG", &a), Ok(14));
        assert_eq!(a.live_blocks(), 0);
        assert_eq!(a.peak_bytes(), 3 * 15 * std::mem::size_of::<Cost>());
    }
}
