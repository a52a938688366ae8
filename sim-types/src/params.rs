//! Configuration of an engine.
use serde::{Deserialize, Serialize};

/// Which family of kernels the dispatcher may use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum BackendKind {
    /// Lane kernels when the hardware has wide enough registers, serial otherwise.
    #[default]
    Auto,
    /// Only the serial Wagner-Fisher and skewed-diagonal solvers.
    Serial,
    /// Lane kernels for every input that fits, regardless of the hardware.
    Lanes,
}

/// How the UTF-8 entry points treat their input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Utf8Policy {
    /// Input is assumed to be well-formed. Malformed bytes decode to
    /// replacement units but are never reported.
    #[default]
    Trusted,
    /// Both operands are validated before decoding.
    Validate,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Params {
    #[serde(default)]
    pub backend: BackendKind,

    #[serde(default)]
    pub utf8: Utf8Policy,

    /// Upper limit on the lane count of the fixed-width kernels, `None` for
    /// no limit beyond what the hardware affords.
    #[serde(default)]
    pub max_lane_width: Option<usize>,
}

impl Params {
    pub fn serial() -> Self {
        Self {
            backend: BackendKind::Serial,
            ..Self::default()
        }
    }

    pub fn lanes() -> Self {
        Self {
            backend: BackendKind::Lanes,
            ..Self::default()
        }
    }

    pub fn validate_utf8(mut self) -> Self {
        self.utf8 = Utf8Policy::Validate;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_from_empty_json() {
        let p: Params = serde_json::from_str("{}").unwrap();
        assert_eq!(p, Params::default());
        assert_eq!(p.backend, BackendKind::Auto);
        assert_eq!(p.utf8, Utf8Policy::Trusted);
    }

    #[test]
    fn json_roundtrip() {
        let p = Params {
            backend: BackendKind::Lanes,
            utf8: Utf8Policy::Validate,
            max_lane_width: Some(64),
        };
        let s = serde_json::to_string(&p).unwrap();
        assert_eq!(serde_json::from_str::<Params>(&s).unwrap(), p);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<Params>(r#"{"bakend": "Serial"}"#).is_err());
    }
}
