//! Serial engines for string similarity.
//!
//! - `hamming`: Hamming distance over bytes or codepoints.
//! - `trim`: operand ordering, prefix/suffix trimming and trivial cases.
//! - `wagner_fisher`: two-row edit distance, bounded or unbounded.
//! - `diagonal`: three-diagonal edit distance for the unbounded case.
//! - `nw`: Needleman-Wunsch alignment score.
//!
//! All scratch memory comes from a caller-supplied `MemoryAllocator` and is
//! released before returning.

pub mod diagonal;
pub mod hamming;
pub mod nw;
pub mod trim;
pub mod wagner_fisher;


use sim_types::{
    alloc::MemoryAllocator,
    scratch::Scratch,
    utf8::{export_runes, is_ascii, runes},
    clamp_to_bound, AllocError, Cost, Seq,
};

pub use diagonal::skewed_diagonal;
pub use hamming::{hamming, hamming_utf8};
pub use nw::needleman_wunsch;
pub use trim::{prepare, trim_utf8, Prepared};
pub use wagner_fisher::wagner_fisher;

/// Run the serial engine best suited to an already prepared problem.
///
/// The diagonal solver is used when no bound applies and the operands have
/// equal length, Wagner-Fisher otherwise.
pub fn solve_trimmed<C: Copy + Eq, A: MemoryAllocator + ?Sized>(
    longer: &[C],
    shorter: &[C],
    bound: Cost,
    alloc: &A,
) -> Result<Cost, AllocError> {
    if !trim::is_bounded(bound, longer.len()) && longer.len() == shorter.len() {
        skewed_diagonal(longer, shorter, alloc)
    } else {
        wagner_fisher(longer, shorter, bound, alloc)
    }
}

/// Levenshtein distance using only the serial engines.
pub fn levenshtein<C: Copy + Eq, A: MemoryAllocator + ?Sized>(
    a: &[C],
    b: &[C],
    bound: Cost,
    alloc: &A,
) -> Result<Cost, AllocError> {
    match prepare(a, b, bound) {
        Prepared::Done(d) => Ok(d),
        Prepared::Solve { longer, shorter } => solve_trimmed(longer, shorter, bound, alloc),
    }
}

/// Decode `bytes` into a scratch buffer of codepoints.
///
/// Returns the buffer and the number of codepoints in it.
pub fn decode_runes<'a, A: MemoryAllocator + ?Sized>(
    bytes: Seq,
    alloc: &'a A,
) -> Result<(Scratch<'a, u32, A>, usize), AllocError> {
    let mut buf = Scratch::filled(alloc, bytes.len(), 0u32)?;
    let n = export_runes(bytes, &mut buf);
    Ok((buf, n))
}

/// Levenshtein distance in codepoints.
///
/// The common prefix and suffix are trimmed at codepoint boundaries first.
/// A pure ASCII remainder is handed to `bytes`; anything else is decoded and
/// solved by the serial engines.
pub fn levenshtein_utf8_with<A: MemoryAllocator + ?Sized>(
    a: Seq,
    b: Seq,
    bound: Cost,
    alloc: &A,
    bytes: impl FnOnce(Seq, Seq) -> Result<Cost, AllocError>,
) -> Result<Cost, AllocError> {
    let (a, b) = trim_utf8(a, b);
    if is_ascii(a) && is_ascii(b) {
        return bytes(a, b);
    }
    if a.is_empty() || b.is_empty() {
        return Ok(clamp_to_bound(runes(a).count() + runes(b).count(), bound));
    }
    let (ra, na) = decode_runes(a, alloc)?;
    let (rb, nb) = decode_runes(b, alloc)?;
    log::trace!("edit distance over {na}x{nb} codepoints bound {bound}");
    levenshtein(&ra[..na], &rb[..nb], bound, alloc)
}

/// Levenshtein distance in codepoints, using only the serial engines.
pub fn levenshtein_utf8<A: MemoryAllocator + ?Sized>(
    a: Seq,
    b: Seq,
    bound: Cost,
    alloc: &A,
) -> Result<Cost, AllocError> {
    levenshtein_utf8_with(a, b, bound, alloc, |a, b| levenshtein(a, b, bound, alloc))
}
