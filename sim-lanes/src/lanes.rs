//! A fixed-capacity vector of `N` lanes.
//!
//! All operations are plain loops over `[T; N]`, which the compiler lowers to
//! whatever vector instructions the target enables.
use std::{array::from_fn, fmt::Debug};

use num_traits::{One, SaturatingAdd, Zero};

pub trait Lane: Copy + Ord + Zero + One + SaturatingAdd + Debug {}
impl<T: Copy + Ord + Zero + One + SaturatingAdd + Debug> Lane for T {}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(C, align(64))]
pub struct Lanes<T, const N: usize>(pub [T; N]);

/// One flag per lane.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Mask<const N: usize>(pub [bool; N]);

impl<const N: usize> Mask<N> {
    /// Lanes `lo..=hi`. Empty when `lo > hi`.
    #[inline(always)]
    pub fn range(lo: usize, hi: usize) -> Self {
        Self(from_fn(|l| lo <= l && l <= hi))
    }
    #[inline(always)]
    pub fn all(&self) -> bool {
        self.0.iter().all(|&b| b)
    }
    #[inline(always)]
    pub fn or(self, other: Self) -> Self {
        Self(from_fn(|l| self.0[l] || other.0[l]))
    }
    #[inline(always)]
    pub fn not(self) -> Self {
        Self(self.0.map(|b| !b))
    }
}

impl<T: Lane, const N: usize> Lanes<T, N> {
    #[inline(always)]
    pub fn splat(v: T) -> Self {
        Self([v; N])
    }

    #[inline(always)]
    pub fn from_fn(f: impl FnMut(usize) -> T) -> Self {
        Self(from_fn(f))
    }

    /// The first `N` values of `values`, padded with `pad`.
    #[inline(always)]
    pub fn load(values: &[T], pad: T) -> Self {
        Self(from_fn(|l| values.get(l).copied().unwrap_or(pad)))
    }

    /// Write the first `out.len().min(N)` lanes to `out`.
    #[inline(always)]
    pub fn store(&self, out: &mut [T]) {
        let n = out.len().min(N);
        out[..n].copy_from_slice(&self.0[..n]);
    }

    #[inline(always)]
    pub fn get(&self, lane: usize) -> T {
        self.0[lane]
    }

    #[inline(always)]
    pub fn set(&mut self, lane: usize, v: T) {
        self.0[lane] = v;
    }

    /// Move every lane up by one. Lane 0 becomes `fill`, the top lane is dropped.
    #[inline(always)]
    pub fn shift_in(self, fill: T) -> Self {
        self.shift_in_by(1, fill)
    }

    /// Move every lane up by `by`, filling the bottom lanes with `fill`.
    #[inline(always)]
    pub fn shift_in_by(self, by: usize, fill: T) -> Self {
        Self(from_fn(|l| if l >= by { self.0[l - by] } else { fill }))
    }

    #[inline(always)]
    pub fn cmp_ne(&self, other: &Self) -> Mask<N> {
        Mask(from_fn(|l| self.0[l] != other.0[l]))
    }

    #[inline(always)]
    pub fn cmp_gt(&self, other: &Self) -> Mask<N> {
        Mask(from_fn(|l| self.0[l] > other.0[l]))
    }

    /// 1 in the lanes of `mask`, 0 elsewhere.
    #[inline(always)]
    pub fn from_mask(mask: Mask<N>) -> Self {
        Self(mask.0.map(|b| if b { T::one() } else { T::zero() }))
    }

    #[inline(always)]
    pub fn min(self, other: Self) -> Self {
        Self(from_fn(|l| self.0[l].min(other.0[l])))
    }

    #[inline(always)]
    pub fn max(self, other: Self) -> Self {
        Self(from_fn(|l| self.0[l].max(other.0[l])))
    }

    #[inline(always)]
    pub fn saturating_add(self, other: Self) -> Self {
        Self(from_fn(|l| self.0[l].saturating_add(&other.0[l])))
    }

    /// Whether every lane in `mask` is larger than `v`.
    #[inline(always)]
    pub fn all_gt_in(&self, v: T, mask: Mask<N>) -> bool {
        self.cmp_gt(&Self::splat(v)).or(mask.not()).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type L8 = Lanes<u8, 8>;

    #[test]
    fn shifts() {
        let x = L8::from_fn(|l| l as u8);
        assert_eq!(x.shift_in(9).0, [9, 0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(x.shift_in_by(3, 0).0, [0, 0, 0, 0, 1, 2, 3, 4]);
    }

    #[test]
    fn arithmetic() {
        let x = L8::from_fn(|l| 250 + l as u8 % 6);
        let y = x.saturating_add(L8::splat(3));
        assert_eq!(y.0, [253, 254, 255, 255, 255, 255, 253, 254]);
        assert_eq!(x.min(L8::splat(252)).0, [250, 251, 252, 252, 252, 252, 250, 251]);
        assert_eq!(x.max(L8::splat(252)).0, [252, 252, 252, 253, 254, 255, 252, 252]);
        let i = Lanes::<i32, 4>([-5, 3, i32::MAX, 0]).saturating_add(Lanes::splat(1));
        assert_eq!(i.0, [-4, 4, i32::MAX, 1]);
    }

    #[test]
    fn masks() {
        let x = L8::load(b"abcd", 0);
        let y = L8::load(b"abed", 0);
        let ne = x.cmp_ne(&y);
        assert_eq!(L8::from_mask(ne).0, [0, 0, 1, 0, 0, 0, 0, 0]);
        assert!(ne.or(Mask::range(0, 1)).or(Mask::range(3, 7)).all());
        assert!(!Mask::<8>::range(5, 2).not().not().all());
        let v = L8::from_fn(|l| l as u8 * 10);
        assert!(v.all_gt_in(15, Mask::range(2, 7)));
        assert!(!v.all_gt_in(15, Mask::range(1, 7)));
        assert!(v.all_gt_in(200, Mask::range(3, 2)));
    }

    #[test]
    fn load_store() {
        let x = Lanes::<i32, 4>::load(&[1, 2], -1);
        assert_eq!(x.0, [1, 2, -1, -1]);
        let mut out = [0; 3];
        x.store(&mut out);
        assert_eq!(out, [1, 2, -1]);
        assert_eq!(x.get(1), 2);
    }
}
