//! String similarity: Hamming and Levenshtein distances over bytes and UTF-8
//! codepoints, and Needleman-Wunsch alignment scores.
//!
//! The free functions use a process-wide default `Engine` drawing memory from
//! the global allocator; the `_in` variants take any `MemoryAllocator`, and the
//! `try_` variants report failures as `Error` instead of sentinel values.
//!
//! ```
//! use simdist::*;
//!
//! assert_eq!(edit_distance(b"kitten", b"sitting", UNBOUNDED), 3);
//! assert_eq!(edit_distance(b"hello", b"hallo", 0), 1);
//! assert_eq!(edit_distance_utf8("München".as_bytes(), "Muenchen".as_bytes(), UNBOUNDED), 2);
//! assert_eq!(hamming_distance(b"karolin", b"kathrin", UNBOUNDED), 3);
//! let table = SubstitutionTable::unary();
//! assert_eq!(alignment_score(b"kitten", b"sitting", &table, -1), -3);
//! ```

mod caps;
mod dispatch;
mod engine;

pub use caps::Capabilities;
pub use dispatch::{Backend, Lanes, Policy, Serial};
pub use engine::Engine;
pub use sim_types::{
    alloc::{CountingAllocator, GlobalAllocator, MemoryAllocator},
    AllocError, BackendKind, Cost, Error, Params, Score, Seq, SubstitutionTable, Utf8Error,
    Utf8Policy, ALLOC_FAILURE, INVALID_UTF8, SCORE_ALLOC_FAILURE, UNBOUNDED,
};

use std::sync::OnceLock;

/// The engine behind the free functions.
pub fn default_engine() -> &'static Engine<'static> {
    static ENGINE: OnceLock<Engine<'static>> = OnceLock::new();
    ENGINE.get_or_init(Engine::default)
}

pub fn hamming_distance(a: Seq, b: Seq, bound: Cost) -> Cost {
    default_engine().hamming_distance(a, b, bound)
}

pub fn hamming_distance_utf8(a: Seq, b: Seq, bound: Cost) -> Cost {
    default_engine().hamming_distance_utf8(a, b, bound)
}

pub fn edit_distance(a: Seq, b: Seq, bound: Cost) -> Cost {
    default_engine().edit_distance(a, b, bound)
}

pub fn edit_distance_in<A: MemoryAllocator + ?Sized>(
    a: Seq,
    b: Seq,
    bound: Cost,
    alloc: &A,
) -> Cost {
    default_engine().rebind(alloc).edit_distance(a, b, bound)
}

pub fn try_edit_distance(a: Seq, b: Seq, bound: Cost) -> Result<Cost, Error> {
    default_engine().try_edit_distance(a, b, bound)
}

pub fn edit_distance_utf8(a: Seq, b: Seq, bound: Cost) -> Cost {
    default_engine().edit_distance_utf8(a, b, bound)
}

pub fn edit_distance_utf8_in<A: MemoryAllocator + ?Sized>(
    a: Seq,
    b: Seq,
    bound: Cost,
    alloc: &A,
) -> Cost {
    default_engine().rebind(alloc).edit_distance_utf8(a, b, bound)
}

pub fn try_edit_distance_utf8(a: Seq, b: Seq, bound: Cost) -> Result<Cost, Error> {
    default_engine().try_edit_distance_utf8(a, b, bound)
}

pub fn alignment_score(a: Seq, b: Seq, table: &SubstitutionTable, gap: Score) -> Score {
    default_engine().alignment_score(a, b, table, gap)
}

pub fn alignment_score_in<A: MemoryAllocator + ?Sized>(
    a: Seq,
    b: Seq,
    table: &SubstitutionTable,
    gap: Score,
    alloc: &A,
) -> Score {
    default_engine()
        .rebind(alloc)
        .alignment_score(a, b, table, gap)
}

pub fn try_alignment_score(
    a: Seq,
    b: Seq,
    table: &SubstitutionTable,
    gap: Score,
) -> Result<Score, Error> {
    default_engine().try_alignment_score(a, b, table, gap)
}
