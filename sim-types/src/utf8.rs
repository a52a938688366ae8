//! UTF-8 primitives used by the codepoint-granularity engines.
//!
//! Decoding assumes well-formed input. Malformed or truncated sequences decode
//! to one `REPLACEMENT` unit per offending byte, so decoding never reads past
//! the end of the input and always makes progress.
use crate::{Seq, Utf8Error};

pub const REPLACEMENT: u32 = 0xFFFD;

/// Decode the first codepoint of `bytes`, returning it and its width in bytes.
///
/// `bytes` must be non-empty.
#[inline(always)]
pub fn decode(bytes: Seq) -> (u32, usize) {
    let b0 = bytes[0] as u32;
    if b0 < 0x80 {
        return (b0, 1);
    }
    let (width, init) = match b0 {
        0xC0..=0xDF => (2, b0 & 0x1F),
        0xE0..=0xEF => (3, b0 & 0x0F),
        0xF0..=0xF7 => (4, b0 & 0x07),
        _ => return (REPLACEMENT, 1),
    };
    if bytes.len() < width {
        return (REPLACEMENT, 1);
    }
    let mut c = init;
    for &b in &bytes[1..width] {
        if b & 0xC0 != 0x80 {
            return (REPLACEMENT, 1);
        }
        c = (c << 6) | (b as u32 & 0x3F);
    }
    (c, width)
}

/// Whether all bytes are below 0x80.
#[inline]
pub fn is_ascii(bytes: Seq) -> bool {
    bytes.is_ascii()
}

/// Iterator over the codepoints of a byte string.
#[derive(Clone, Debug)]
pub struct Runes<'a> {
    rest: Seq<'a>,
}

pub fn runes(bytes: Seq) -> Runes<'_> {
    Runes { rest: bytes }
}

impl Iterator for Runes<'_> {
    type Item = u32;

    #[inline(always)]
    fn next(&mut self) -> Option<u32> {
        if self.rest.is_empty() {
            return None;
        }
        let (c, width) = decode(self.rest);
        self.rest = &self.rest[width..];
        Some(c)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.rest.len().div_ceil(4), Some(self.rest.len()))
    }
}

/// Decode all of `bytes` into `out`, returning the number of codepoints written.
///
/// `out` needs room for at most `bytes.len()` codepoints.
pub fn export_runes(bytes: Seq, out: &mut [u32]) -> usize {
    let mut n = 0;
    for c in runes(bytes) {
        out[n] = c;
        n += 1;
    }
    n
}

/// Check that `bytes` is well-formed UTF-8.
pub fn validate(bytes: Seq) -> Result<(), Utf8Error> {
    std::str::from_utf8(bytes).map(|_| ()).map_err(|e| Utf8Error {
        offset: e.valid_up_to(),
    })
}
