//! Row-by-row edit distance with two rolling rows.
//!
//! Generic over the character type (bytes or decoded codepoints) and over
//! whether a bound is active, so neither choice branches in the inner loop.
use sim_types::{
    alloc::MemoryAllocator, clamp_to_bound, exceeded, scratch::Rows, AllocError, Cost,
};

use crate::trim::is_bounded;

/// Levenshtein distance of `longer` and `shorter`, with rows over `shorter`.
///
/// Returns `bound + 1` when the distance exceeds `bound`.
pub fn wagner_fisher<C: Copy + Eq, A: MemoryAllocator + ?Sized>(
    longer: &[C],
    shorter: &[C],
    bound: Cost,
    alloc: &A,
) -> Result<Cost, AllocError> {
    if is_bounded(bound, longer.len()) {
        solve::<C, A, true>(longer, shorter, bound, alloc)
    } else {
        solve::<C, A, false>(longer, shorter, bound, alloc)
    }
}

fn solve<C: Copy + Eq, A: MemoryAllocator + ?Sized, const BOUNDED: bool>(
    longer: &[C],
    shorter: &[C],
    bound: Cost,
    alloc: &A,
) -> Result<Cost, AllocError> {
    let mut rows = Rows::<Cost, A, 2>::new(alloc, shorter.len() + 1, 0)?;
    for (j, x) in rows.row_mut(0).iter_mut().enumerate() {
        *x = j;
    }
    for (i, &c) in longer.iter().enumerate() {
        let [prev, cur] = rows.split();
        cur[0] = i + 1;
        let mut row_min = cur[0];
        for (j, &s) in shorter.iter().enumerate() {
            let v = (prev[j] + (c != s) as Cost)
                .min(prev[j + 1] + 1)
                .min(cur[j] + 1);
            cur[j + 1] = v;
            if BOUNDED {
                row_min = row_min.min(v);
            }
        }
        // Every path crosses every row.
        if BOUNDED && row_min > bound {
            log::trace!("wagner-fisher: row {} exceeds bound {bound}", i + 1);
            return Ok(exceeded(bound));
        }
        rows.rotate();
    }
    Ok(clamp_to_bound(rows.row(0)[shorter.len()], bound))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_types::{alloc::CountingAllocator, UNBOUNDED};

    #[test]
    fn untrimmed() {
        let a = CountingAllocator::new();
        assert_eq!(wagner_fisher(b"sitting", b"kitten", UNBOUNDED, &a), Ok(3));
        assert_eq!(wagner_fisher(b"sitting", b"kitten", 2, &a), Ok(3));
        assert_eq!(wagner_fisher(b"abc", b"", UNBOUNDED, &a), Ok(3));
        assert_eq!(wagner_fisher(b"abc", b"", 1, &a), Ok(2));
        assert_eq!(a.live_blocks(), 0);
    }

    #[test]
    fn early_exit_releases_rows() {
        let a = CountingAllocator::new();
        let x = vec![b'x'; 300];
        let y = vec![b'y'; 300];
        assert_eq!(wagner_fisher(&x, &y, 10, &a), Ok(11));
        assert_eq!(a.total_blocks(), 1);
        assert_eq!(a.live_blocks(), 0);
    }

    #[test]
    fn codepoints() {
        let a = CountingAllocator::new();
        let x: Vec<u32> = "München".chars().map(|c| c as u32).collect();
        let y: Vec<u32> = "Muenchen".chars().map(|c| c as u32).collect();
        assert_eq!(wagner_fisher(&y, &x, UNBOUNDED, &a), Ok(2));
    }

    #[test]
    fn allocation_failure() {
        let a = CountingAllocator::with_limit(0);
        assert_eq!(
            wagner_fisher(b"kitten", b"sitting", UNBOUNDED, &a),
            Err(AllocError { bytes: 2 * 8 * std::mem::size_of::<Cost>() })
        );
        assert_eq!(a.failures(), 1);
    }
}
