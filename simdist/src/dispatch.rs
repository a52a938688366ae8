//! Backends and the policy that picks one per call.
//!
//! A `Backend` solves edit distance on operands that were already ordered and
//! trimmed, and scores alignments. `Policy` is built once from `Params` and the
//! detected `Capabilities` and only compares lengths afterwards.
use std::fmt::Debug;

use sim_lanes::{capacity, edit::levenshtein_fitting};
use sim_types::{
    alloc::MemoryAllocator, AllocError, BackendKind, Cost, Params, Score, Seq, SubstitutionTable,
};

use crate::caps::Capabilities;

pub trait Backend: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// Edit distance for `longer.len() >= shorter.len() > 0`.
    fn edit_distance(
        &self,
        longer: Seq,
        shorter: Seq,
        bound: Cost,
        alloc: &dyn MemoryAllocator,
    ) -> Result<Cost, AllocError>;

    fn alignment_score(
        &self,
        a: Seq,
        b: Seq,
        table: &SubstitutionTable,
        gap: Score,
        alloc: &dyn MemoryAllocator,
    ) -> Result<Score, AllocError>;
}

/// The two-row and skewed-diagonal solvers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Serial;

impl Backend for Serial {
    fn name(&self) -> &'static str {
        "serial"
    }

    fn edit_distance(
        &self,
        longer: Seq,
        shorter: Seq,
        bound: Cost,
        alloc: &dyn MemoryAllocator,
    ) -> Result<Cost, AllocError> {
        sim_base_algos::solve_trimmed(longer, shorter, bound, alloc)
    }

    fn alignment_score(
        &self,
        a: Seq,
        b: Seq,
        table: &SubstitutionTable,
        gap: Score,
        alloc: &dyn MemoryAllocator,
    ) -> Result<Score, AllocError> {
        sim_base_algos::needleman_wunsch(a, b, table, gap, alloc)
    }
}

/// The fixed-width lane kernels, falling back to `Serial` for inputs that do
/// not fit in `max_width` lanes.
#[derive(Debug, Clone, Copy)]
pub struct Lanes {
    pub max_width: usize,
}

impl Backend for Lanes {
    fn name(&self) -> &'static str {
        "lanes"
    }

    fn edit_distance(
        &self,
        longer: Seq,
        shorter: Seq,
        bound: Cost,
        alloc: &dyn MemoryAllocator,
    ) -> Result<Cost, AllocError> {
        match levenshtein_fitting(longer, shorter, bound, self.max_width) {
            Some(d) => Ok(d),
            None => Serial.edit_distance(longer, shorter, bound, alloc),
        }
    }

    fn alignment_score(
        &self,
        a: Seq,
        b: Seq,
        table: &SubstitutionTable,
        gap: Score,
        alloc: &dyn MemoryAllocator,
    ) -> Result<Score, AllocError> {
        if sim_lanes::nw::fits(a.len(), b.len(), gap) {
            sim_lanes::nw::needleman_wunsch(a, b, table, gap, alloc)
        } else {
            Serial.alignment_score(a, b, table, gap, alloc)
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Policy {
    serial: Serial,
    /// `None` when lane kernels are disabled.
    lanes: Option<Lanes>,
}

impl Policy {
    pub fn new(params: &Params, caps: Capabilities) -> Self {
        let hardware = match params.backend {
            BackendKind::Auto => caps.lane_budget(),
            BackendKind::Serial => 0,
            BackendKind::Lanes => *sim_lanes::WIDTHS.last().unwrap_or(&0),
        };
        let width = params.max_lane_width.map_or(hardware, |w| w.min(hardware));
        // A limit like 100 rounds down to the widest kernel below it.
        let lanes = sim_lanes::WIDTHS
            .into_iter()
            .filter(|&w| w <= width)
            .last()
            .map(|max_width| Lanes { max_width });
        log::debug!(
            "policy for {:?}: lane kernels up to {:?} lanes",
            params.backend,
            lanes.map(|l| l.max_width)
        );
        Self {
            serial: Serial,
            lanes,
        }
    }

    /// Use the detected capabilities.
    pub fn detect(params: &Params) -> Self {
        Self::new(params, Capabilities::detect())
    }

    /// The longest operand the lane kernels take, 0 when they are disabled.
    pub fn lane_capacity(&self) -> usize {
        self.lanes.map_or(0, |l| capacity(l.max_width))
    }

    /// Backend for an edit distance whose longer trimmed operand has `longer_len` bytes.
    pub fn edit_backend(&self, longer_len: usize) -> &dyn Backend {
        match &self.lanes {
            Some(lanes) if longer_len <= capacity(lanes.max_width) => lanes,
            _ => &self.serial,
        }
    }

    pub fn alignment_backend(&self) -> &dyn Backend {
        match &self.lanes {
            Some(lanes) => lanes,
            None => &self.serial,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(backend: BackendKind, max_lane_width: Option<usize>) -> Params {
        Params {
            backend,
            max_lane_width,
            ..Params::default()
        }
    }

    #[test]
    fn auto_follows_hardware() {
        let avx2 = Capabilities {
            avx2: true,
            ..Capabilities::NONE
        };
        let avx512 = Capabilities {
            avx512bw: true,
            avx512vbmi: true,
            ..avx2
        };
        let auto = params(BackendKind::Auto, None);
        assert_eq!(Policy::new(&auto, Capabilities::NONE).lane_capacity(), 0);
        assert_eq!(Policy::new(&auto, avx2).lane_capacity(), 63);
        assert_eq!(Policy::new(&auto, avx512).lane_capacity(), 255);

        let p = Policy::new(&auto, avx2);
        assert_eq!(p.edit_backend(63).name(), "lanes");
        assert_eq!(p.edit_backend(64).name(), "serial");
        assert_eq!(p.alignment_backend().name(), "lanes");
        let p = Policy::new(&auto, Capabilities::NONE);
        assert_eq!(p.edit_backend(1).name(), "serial");
        assert_eq!(p.alignment_backend().name(), "serial");
    }

    #[test]
    fn forced() {
        let p = Policy::new(&params(BackendKind::Lanes, None), Capabilities::NONE);
        assert_eq!(p.lane_capacity(), 255);
        assert_eq!(p.edit_backend(255).name(), "lanes");
        assert_eq!(p.edit_backend(256).name(), "serial");
        let p = Policy::new(&params(BackendKind::Serial, None), Capabilities::detect());
        assert_eq!(p.lane_capacity(), 0);
    }

    #[test]
    fn width_limit() {
        let caps = Capabilities::NONE;
        let p = Policy::new(&params(BackendKind::Lanes, Some(128)), caps);
        assert_eq!(p.lane_capacity(), 127);
        let p = Policy::new(&params(BackendKind::Lanes, Some(100)), caps);
        assert_eq!(p.lane_capacity(), 63);
        let p = Policy::new(&params(BackendKind::Lanes, Some(10)), caps);
        assert_eq!(p.lane_capacity(), 0);
    }
}
