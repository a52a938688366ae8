//! Runtime detection of the vector registers the lane kernels can rely on.
//!
//! Set `SIMDIST_FORCE_SERIAL=1` to pretend no vector extension is available.
use std::sync::OnceLock;

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub avx2: bool,
    pub avx512bw: bool,
    pub avx512vbmi: bool,
    pub neon: bool,
}

impl Capabilities {
    /// No vector extensions.
    pub const NONE: Self = Self {
        avx2: false,
        avx512bw: false,
        avx512vbmi: false,
        neon: false,
    };

    /// Probe the CPU once per process.
    pub fn detect() -> Self {
        static CAPS: OnceLock<Capabilities> = OnceLock::new();
        *CAPS.get_or_init(|| {
            let caps = if std::env::var("SIMDIST_FORCE_SERIAL").is_ok_and(|v| v == "1") {
                log::info!("SIMDIST_FORCE_SERIAL=1: ignoring vector extensions");
                Self::NONE
            } else {
                Self::probe()
            };
            log::debug!(
                "detected {caps:?}: {}-bit registers, lane kernels up to {} lanes",
                caps.register_bits(),
                caps.lane_budget()
            );
            caps
        })
    }

    #[cfg(target_arch = "x86_64")]
    fn probe() -> Self {
        Self {
            avx2: is_x86_feature_detected!("avx2"),
            avx512bw: is_x86_feature_detected!("avx512bw"),
            avx512vbmi: is_x86_feature_detected!("avx512vbmi"),
            neon: false,
        }
    }

    #[cfg(target_arch = "aarch64")]
    fn probe() -> Self {
        Self {
            neon: std::arch::is_aarch64_feature_detected!("neon"),
            ..Self::NONE
        }
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    fn probe() -> Self {
        Self::NONE
    }

    /// Width of the widest usable vector register.
    pub fn register_bits(&self) -> usize {
        if self.avx512bw && self.avx512vbmi {
            512
        } else if self.avx2 {
            256
        } else if self.neon {
            128
        } else {
            64
        }
    }

    /// The widest lane kernel worth using automatically, 0 for none.
    ///
    /// 256-bit registers afford the 64 lane kernel (operands up to 63 bytes),
    /// 512-bit ones the 256 lane kernel (up to 255 bytes).
    pub fn lane_budget(&self) -> usize {
        match self.register_bits() {
            512 => 256,
            256 => 64,
            _ => 0,
        }
    }
}
