//! Needleman-Wunsch global alignment score with a linear gap cost.
use sim_types::{alloc::MemoryAllocator, scratch::Rows, AllocError, Score, Seq, SubstitutionTable};

/// The maximum over all global alignments of the summed substitution costs
/// plus `gap` for every inserted or deleted byte.
///
/// `table` is indexed by a byte of `a` first and a byte of `b` second.
pub fn needleman_wunsch<A: MemoryAllocator + ?Sized>(
    a: Seq,
    b: Seq,
    table: &SubstitutionTable,
    gap: Score,
    alloc: &A,
) -> Result<Score, AllocError> {
    if a.is_empty() || b.is_empty() {
        return Ok((a.len() + b.len()) as Score * gap);
    }
    if a.len() >= b.len() {
        solve::<A, false>(a, b, table, gap, alloc)
    } else {
        solve::<A, true>(b, a, table, gap, alloc)
    }
}

/// Rows run over `shorter`. With `SWAPPED`, `longer` is the second operand, so
/// the table is read transposed.
fn solve<A: MemoryAllocator + ?Sized, const SWAPPED: bool>(
    longer: Seq,
    shorter: Seq,
    table: &SubstitutionTable,
    gap: Score,
    alloc: &A,
) -> Result<Score, AllocError> {
    let mut rows = Rows::<Score, A, 2>::new(alloc, shorter.len() + 1, 0)?;
    for (j, x) in rows.row_mut(0).iter_mut().enumerate() {
        *x = j as Score * gap;
    }
    for (i, &c) in longer.iter().enumerate() {
        let [prev, cur] = rows.split();
        let costs = table.row(c);
        cur[0] = (i + 1) as Score * gap;
        for (j, &s) in shorter.iter().enumerate() {
            let sub = Score::from(if SWAPPED {
                table.cost(s, c)
            } else {
                costs[s as usize]
            });
            cur[j + 1] = (prev[j] + sub).max(prev[j + 1] + gap).max(cur[j] + gap);
        }
        rows.rotate();
    }
    Ok(rows.row(0)[shorter.len()])
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
    fn empty() {
        let a = CountingAllocator::with_limit(0);
        let table = SubstitutionTable::unary();
        assert_eq!(needleman_wunsch(b"", b"", &table, -3, &a), Ok(0));
        assert_eq!(needleman_wunsch(b"abcd", b"", &table, -3, &a), Ok(-12));
        assert_eq!(needleman_wunsch(b"", b"ab", &table, -3, &a), Ok(-6));
        assert_eq!(a.failures(), 0);
    }

    #[test]
    fn asymmetric_table() {
        let a = CountingAllocator::new();
        let mut table = SubstitutionTable::from_costs(0, -5);
        table.set(b'A', b'C', 3);
        // Substituting A by C is rewarded, C by A is not.
        assert_eq!(needleman_wunsch(b"AA", b"C", &table, -1, &a), Ok(2));
        assert_eq!(needleman_wunsch(b"C", b"AA", &table, -1, &a), Ok(-3));
    }

    #[test]
    fn allocation_failure() {
        let a = CountingAllocator::with_limit(8);
        let table = SubstitutionTable::unary();
        assert!(needleman_wunsch(b"abc", b"abd", &table, -1, &a).is_err());
        assert_eq!(a.live_blocks(), 0);
    }
}
