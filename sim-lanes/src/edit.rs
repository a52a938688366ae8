//! Edit distance kernels holding a whole anti-diagonal in one lane vector.
//!
//! Lane `j` of diagonal `k` holds cell `(k - j, j)`: `j` indexes the longer
//! operand, which therefore has to fit in `N - 1` lanes. The longer operand is
//! loaded once, with lane `j` holding `longer[j - 1]`. The shorter operand is
//! kept in reversed order, so that lane `j` holds `shorter[k - j - 1]` on
//! diagonal `k`, and moving to the next diagonal is a single shift.
//!
//! Lane counters are `u8`. Lanes outside the matrix hold garbage that never
//! flows into lanes inside it, and all additions saturate.
use sim_types::{clamp_to_bound, exceeded, Cost, Seq};

use crate::lanes::{Lanes, Mask};

/// The longest operand a kernel with `lanes` lanes accepts.
pub const fn capacity(lanes: usize) -> usize {
    lanes - 1
}

/// The lane widths of the available kernels, narrowest first.
pub const WIDTHS: [usize; 3] = [64, 128, 256];

/// Levenshtein distance for `0 < shorter.len() <= longer.len() < N`.
///
/// Returns `bound + 1` when the distance exceeds `bound`.
pub fn levenshtein<const N: usize>(longer: Seq, shorter: Seq, bound: Cost) -> Cost {
    let (n, m) = (shorter.len(), longer.len());
    debug_assert!(n <= m && m < N && N <= 256);
    let bounded = bound < m;
    // Only used when bounded, and then `bound < m <= 255`.
    let lane_bound = bound.min(u8::MAX as Cost) as u8;

    let l = Lanes::<u8, N>::from_fn(|j| if 1 <= j && j <= m { longer[j - 1] } else { 0 });
    let mut s = Lanes::<u8, N>::splat(0);
    let one = Lanes::<u8, N>::splat(1);

    let mut prev2 = Lanes::<u8, N>::splat(0);
    let mut prev1 = Lanes::<u8, N>::splat(0);
    let mut prev_over = false;

    for k in 1..=n + m {
        s = s.shift_in(if k <= n { shorter[k - 1] } else { 0 });
        let mismatch = Lanes::from_mask(s.cmp_ne(&l));
        let sub = prev2.shift_in(u8::MAX).saturating_add(mismatch);
        let gap = prev1.min(prev1.shift_in(u8::MAX)).saturating_add(one);
        let mut next = sub.min(gap);
        if k <= n {
            next.set(0, k as u8);
        }
        if k <= m {
            next.set(k, k as u8);
        }

        if bounded {
            let valid = Mask::range(k.saturating_sub(n), k.min(m));
            let over = next.all_gt_in(lane_bound, valid);
            // Every path through the matrix visits one of two consecutive diagonals.
            if over && prev_over {
                log::trace!("lanes<{N}>: diagonal {k} exceeds bound {bound}");
                return exceeded(bound);
            }
            prev_over = over;
        }

        prev2 = prev1;
        prev1 = next;
    }
    clamp_to_bound(prev1.get(m) as Cost, bound)
}

pub fn levenshtein_64(longer: Seq, shorter: Seq, bound: Cost) -> Cost {
    levenshtein::<64>(longer, shorter, bound)
}

pub fn levenshtein_128(longer: Seq, shorter: Seq, bound: Cost) -> Cost {
    levenshtein::<128>(longer, shorter, bound)
}

pub fn levenshtein_256(longer: Seq, shorter: Seq, bound: Cost) -> Cost {
    levenshtein::<256>(longer, shorter, bound)
}

/// Run the narrowest kernel of at most `max_width` lanes that fits `longer`.
///
/// Returns `None` when no such kernel exists.
pub fn levenshtein_fitting(
    longer: Seq,
    shorter: Seq,
    bound: Cost,
    max_width: usize,
) -> Option<Cost> {
    let width = WIDTHS
        .into_iter()
        .find(|&w| w <= max_width && longer.len() <= capacity(w))?;
    Some(match width {
        64 => levenshtein_64(longer, shorter, bound),
        128 => levenshtein_128(longer, shorter, bound),
        _ => levenshtein_256(longer, shorter, bound),
    })
}
