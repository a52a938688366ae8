use sim_base_algos::{hamming, hamming_utf8, levenshtein_utf8_with, prepare, Prepared};
use sim_types::{
    alloc::{GlobalAllocator, MemoryAllocator},
    utf8::validate,
    AllocError, Cost, Error, Params, Score, Seq, SubstitutionTable, Utf8Policy, SCORE_ALLOC_FAILURE,
};

use crate::dispatch::Policy;

/// Computes similarities with fixed `Params` and scratch memory from one allocator.
///
/// Every call is independent: the engine itself is never mutated, so a shared
/// engine can be used from several threads when its allocator is `Sync`.
pub struct Engine<'a, A: MemoryAllocator + ?Sized = GlobalAllocator> {
    params: Params,
    policy: Policy,
    alloc: &'a A,
}

impl Engine<'static, GlobalAllocator> {
    pub fn new(params: Params) -> Self {
        Self::with_allocator(params, &GlobalAllocator)
    }
}

impl Default for Engine<'static, GlobalAllocator> {
    fn default() -> Self {
        Self::new(Params::default())
    }
}

impl<'a, A: MemoryAllocator + ?Sized> Engine<'a, A> {
    pub fn with_allocator(params: Params, alloc: &'a A) -> Self {
        Self::with_policy(params, Policy::detect(&params), alloc)
    }

    /// Use an explicit policy instead of one derived from the detected hardware.
    pub fn with_policy(params: Params, policy: Policy, alloc: &'a A) -> Self {
        Self {
            params,
            policy,
            alloc,
        }
    }

    /// The same configuration, drawing scratch memory from `alloc`.
    pub fn rebind<'b, B: MemoryAllocator + ?Sized>(&self, alloc: &'b B) -> Engine<'b, B> {
        Engine::with_policy(self.params, self.policy, alloc)
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn allocator(&self) -> &'a A {
        self.alloc
    }

    fn check_utf8(&self, a: Seq, b: Seq) -> Result<(), Error> {
        if self.params.utf8 == Utf8Policy::Validate {
            validate(a)?;
            validate(b)?;
        }
        Ok(())
    }

    /// Byte-wise Hamming distance. A bound of 0 means unbounded.
    pub fn hamming_distance(&self, a: Seq, b: Seq, bound: Cost) -> Cost {
        hamming(a, b, bound)
    }

    /// Codepoint-wise Hamming distance. A bound of 0 means unbounded.
    pub fn try_hamming_distance_utf8(&self, a: Seq, b: Seq, bound: Cost) -> Result<Cost, Error> {
        self.check_utf8(a, b)?;
        Ok(hamming_utf8(a, b, bound))
    }

    pub fn hamming_distance_utf8(&self, a: Seq, b: Seq, bound: Cost) -> Cost {
        self.try_hamming_distance_utf8(a, b, bound)
            .unwrap_or_else(|e| e.distance_sentinel())
    }

    /// Levenshtein distance over bytes, or `bound + 1` if it exceeds `bound`.
    pub fn try_edit_distance(&self, a: Seq, b: Seq, bound: Cost) -> Result<Cost, Error> {
        Ok(self.edit_bytes(a, b, bound)?)
    }

    fn edit_bytes(&self, a: Seq, b: Seq, bound: Cost) -> Result<Cost, AllocError> {
        match prepare(a, b, bound) {
            Prepared::Done(d) => Ok(d),
            Prepared::Solve { longer, shorter } => {
                let backend = self.policy.edit_backend(longer.len());
                log::trace!(
                    "edit distance {}x{} bound {bound}: {}",
                    longer.len(),
                    shorter.len(),
                    backend.name()
                );
                backend.edit_distance(longer, shorter, bound, &self.alloc)
            }
        }
    }

    /// As `try_edit_distance`, returning `ALLOC_FAILURE` when scratch memory
    /// could not be obtained.
    pub fn edit_distance(&self, a: Seq, b: Seq, bound: Cost) -> Cost {
        self.try_edit_distance(a, b, bound)
            .unwrap_or_else(|e| e.distance_sentinel())
    }

    /// Levenshtein distance over codepoints.
    ///
    /// Operands that are pure ASCII once their common codepoints are trimmed
    /// take the byte path, lane kernels included. Otherwise both are decoded
    /// into codepoint buffers first.
    pub fn try_edit_distance_utf8(&self, a: Seq, b: Seq, bound: Cost) -> Result<Cost, Error> {
        self.check_utf8(a, b)?;
        Ok(levenshtein_utf8_with(a, b, bound, self.alloc, |a, b| {
            self.edit_bytes(a, b, bound)
        })?)
    }

    /// As `try_edit_distance_utf8`, returning `ALLOC_FAILURE` or `INVALID_UTF8`
    /// on failure.
    pub fn edit_distance_utf8(&self, a: Seq, b: Seq, bound: Cost) -> Cost {
        self.try_edit_distance_utf8(a, b, bound)
            .unwrap_or_else(|e| e.distance_sentinel())
    }

    /// Needleman-Wunsch score with substitution costs `table[a_i][b_j]` and a
    /// linear `gap` cost.
    pub fn try_alignment_score(
        &self,
        a: Seq,
        b: Seq,
        table: &SubstitutionTable,
        gap: Score,
    ) -> Result<Score, Error> {
        let backend = self.policy.alignment_backend();
        log::trace!("alignment {}x{}: {}", a.len(), b.len(), backend.name());
        Ok(backend.alignment_score(a, b, table, gap, &self.alloc)?)
    }

    /// As `try_alignment_score`, returning `SCORE_ALLOC_FAILURE` when scratch
    /// memory could not be obtained.
    pub fn alignment_score(&self, a: Seq, b: Seq, table: &SubstitutionTable, gap: Score) -> Score {
        self.try_alignment_score(a, b, table, gap)
            .unwrap_or(SCORE_ALLOC_FAILURE)
    }

    /// `edit_distance` for each pair, in order.
    pub fn edit_distances<'s>(
        &self,
        pairs: impl IntoIterator<Item = (Seq<'s>, Seq<'s>)>,
        bound: Cost,
    ) -> Vec<Cost> {
        pairs
            .into_iter()
            .map(|(a, b)| self.edit_distance(a, b, bound))
            .collect()
    }

    /// `edit_distance_utf8` for each pair, in order.
    pub fn edit_distances_utf8<'s>(
        &self,
        pairs: impl IntoIterator<Item = (Seq<'s>, Seq<'s>)>,
        bound: Cost,
    ) -> Vec<Cost> {
        pairs
            .into_iter()
            .map(|(a, b)| self.edit_distance_utf8(a, b, bound))
            .collect()
    }

    /// `alignment_score` for each pair, in order.
    pub fn alignment_scores<'s>(
        &self,
        pairs: impl IntoIterator<Item = (Seq<'s>, Seq<'s>)>,
        table: &SubstitutionTable,
        gap: Score,
    ) -> Vec<Score> {
        pairs
            .into_iter()
            .map(|(a, b)| self.alignment_score(a, b, table, gap))
            .collect()
    }
}

impl<A: MemoryAllocator + ?Sized> std::fmt::Debug for Engine<'_, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("params", &self.params)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
