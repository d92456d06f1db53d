//! ARM NEON backend (4-wide).
//!
//! There is no 8-wide NEON register file; the 8-wide type on `aarch64`
//! is the scalar one, mirroring the AVX-absent rule on x86_64.

use super::SimdF32;
use core::arch::aarch64::*;
use core::fmt::{Debug, Formatter};
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

/// 4-lane f32 vector in a 128-bit NEON register.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct F32x4(float32x4_t);

impl Default for F32x4 {
    #[inline(always)]
    fn default() -> Self {
        unsafe { Self(vdupq_n_f32(0.0)) }
    }
}

impl Debug for F32x4 {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "F32x4({:?})", self.to_array())
    }
}

impl F32x4 {
    /// Builds a vector from individual lane values, in lane order.
    #[inline(always)]
    pub fn new(x0: f32, x1: f32, x2: f32, x3: f32) -> Self {
        let lanes = [x0, x1, x2, x3];
        unsafe { Self(vld1q_f32(lanes.as_ptr())) }
    }
}

impl SimdF32 for F32x4 {
    const LANES: usize = 4;
    const ALIGN: usize = 16;
    type Array = [f32; 4];

    #[inline(always)]
    fn splat(val: f32) -> Self {
        unsafe { Self(vdupq_n_f32(val)) }
    }

    #[inline(always)]
    fn from_array(lanes: [f32; 4]) -> Self {
        unsafe { Self(vld1q_f32(lanes.as_ptr())) }
    }

    #[inline(always)]
    fn to_array(self) -> [f32; 4] {
        let mut arr = [0.0f32; 4];
        unsafe { vst1q_f32(arr.as_mut_ptr(), self.0) };
        arr
    }

    #[inline(always)]
    fn from_slice(slice: &[f32]) -> Self {
        assert!(slice.len() >= Self::LANES);
        unsafe { Self(vld1q_f32(slice.as_ptr())) }
    }

    #[inline(always)]
    fn store(&self, out: &mut [f32]) {
        assert!(out.len() >= Self::LANES);
        unsafe { vst1q_f32(out.as_mut_ptr(), self.0) }
    }

    // vld1q tolerates any alignment; the aligned variant only upholds the
    // shared contract.
    #[inline(always)]
    unsafe fn from_aligned(src: *const f32) -> Self {
        debug_assert!(src as usize % Self::ALIGN == 0);
        unsafe { Self(vld1q_f32(src)) }
    }

    #[inline(always)]
    unsafe fn from_unaligned(src: *const f32) -> Self {
        unsafe { Self(vld1q_f32(src)) }
    }

    #[inline(always)]
    unsafe fn load_first(src: *const f32) -> Self {
        unsafe { Self(vld1q_lane_f32::<0>(src, vdupq_n_f32(0.0))) }
    }

    #[inline(always)]
    unsafe fn store_aligned(self, dst: *mut f32) {
        debug_assert!(dst as usize % Self::ALIGN == 0);
        unsafe { vst1q_f32(dst, self.0) }
    }

    #[inline(always)]
    unsafe fn store_unaligned(self, dst: *mut f32) {
        unsafe { vst1q_f32(dst, self.0) }
    }

    // Across-vector add; folds pairwise in hardware.
    #[inline(always)]
    fn sum(self) -> f32 {
        unsafe { vaddvq_f32(self.0) }
    }
}

impl PartialEq for F32x4 {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        // Lane mask is all-1s per equal lane; min across lanes is all-1s
        // only when every lane matched.
        unsafe { vminvq_u32(vceqq_f32(self.0, other.0)) == u32::MAX }
    }
}

impl Add for F32x4 {
    type Output = Self;
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { Self(vaddq_f32(self.0, rhs.0)) }
    }
}

impl Sub for F32x4 {
    type Output = Self;
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Self(vsubq_f32(self.0, rhs.0)) }
    }
}

impl Mul for F32x4 {
    type Output = Self;
    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { Self(vmulq_f32(self.0, rhs.0)) }
    }
}

impl Div for F32x4 {
    type Output = Self;
    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        unsafe { Self(vdivq_f32(self.0, rhs.0)) }
    }
}

impl AddAssign for F32x4 {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for F32x4 {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for F32x4 {
    #[inline(always)]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl DivAssign for F32x4 {
    #[inline(always)]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

/// In-place 4x4 transpose over NEON registers.
///
/// After the call, lane `i` of `rows[j]` holds what lane `j` of `rows[i]`
/// held on entry. Applying it twice restores the input.
#[inline(always)]
pub fn transpose4(rows: &mut [F32x4; 4]) {
    unsafe {
        let ab = vtrnq_f32(rows[0].0, rows[1].0); // (a0 b0 a2 b2), (a1 b1 a3 b3)
        let cd = vtrnq_f32(rows[2].0, rows[3].0); // (c0 d0 c2 d2), (c1 d1 c3 d3)
        rows[0].0 = vcombine_f32(vget_low_f32(ab.0), vget_low_f32(cd.0)); // a0 b0 c0 d0
        rows[1].0 = vcombine_f32(vget_low_f32(ab.1), vget_low_f32(cd.1)); // a1 b1 c1 d1
        rows[2].0 = vcombine_f32(vget_high_f32(ab.0), vget_high_f32(cd.0)); // a2 b2 c2 d2
        rows[3].0 = vcombine_f32(vget_high_f32(ab.1), vget_high_f32(cd.1)); // a3 b3 c3 d3
    }
}
