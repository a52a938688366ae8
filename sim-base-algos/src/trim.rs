//! Cheap reductions applied before any DP runs.
use sim_types::{clamp_to_bound, exceeded, Cost};

/// Result of `prepare`: either the answer, or a smaller problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prepared<'a, C> {
    Done(Cost),
    /// `longer.len() >= shorter.len() > 0`, and the bound is not violated by
    /// the length difference alone.
    Solve { longer: &'a [C], shorter: &'a [C] },
}

pub fn common_prefix<C: Eq>(a: &[C], b: &[C]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

pub fn common_suffix<C: Eq>(a: &[C], b: &[C]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Strip the common prefix and suffix. Both views shrink by the same amount.
pub fn trim<'a, C: Eq>(a: &'a [C], b: &'a [C]) -> (&'a [C], &'a [C]) {
    let p = common_prefix(a, b);
    let (a, b) = (&a[p..], &b[p..]);
    let s = common_suffix(a, b);
    (&a[..a.len() - s], &b[..b.len() - s])
}

fn starts_codepoint(s: &[u8], i: usize) -> bool {
    s.get(i).map_or(true, |&c| c & 0xC0 != 0x80)
}

/// As `trim`, but only cutting where neither operand splits a codepoint.
///
/// Decoding never takes a non-continuation byte into an earlier codepoint, so
/// the codepoints of the remainders are exactly the unshared ones, also for
/// malformed input.
pub fn trim_utf8<'a>(a: &'a [u8], b: &'a [u8]) -> (&'a [u8], &'a [u8]) {
    let mut p = common_prefix(a, b);
    while p > 0 && !(starts_codepoint(a, p) && starts_codepoint(b, p)) {
        p -= 1;
    }
    let (a, b) = (&a[p..], &b[p..]);
    let mut s = common_suffix(a, b);
    while s > 0 && !(starts_codepoint(a, a.len() - s) && starts_codepoint(b, b.len() - s)) {
        s -= 1;
    }
    (&a[..a.len() - s], &b[..b.len() - s])
}

/// Order the operands by length, trim them, and answer the trivial cases.
pub fn prepare<'a, C: Eq>(a: &'a [C], b: &'a [C], bound: Cost) -> Prepared<'a, C> {
    let (longer, shorter) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let (longer, shorter) = trim(longer, shorter);
    if longer.len() - shorter.len() > bound {
        return Prepared::Done(exceeded(bound));
    }
    if shorter.is_empty() {
        return Prepared::Done(clamp_to_bound(longer.len(), bound));
    }
    Prepared::Solve { longer, shorter }
}

/// Whether `bound` can cut a computation on operands this long short.
#[inline(always)]
pub fn is_bounded(bound: Cost, longer_len: usize) -> bool {
    bound < longer_len
}
