//! x86_64 backend: SSE 4-wide and AVX 8-wide vectors.
//!
//! The 4-wide type is always available on this architecture (SSE2 is part
//! of the x86_64 baseline). The 8-wide type and everything touching YMM
//! registers is gated on `target_feature = "avx"`; the half-precision load
//! overloads are additionally gated on the `f16` cargo feature plus
//! `target_feature = "f16c"`, and simply do not exist otherwise.

use super::SimdF32;
use core::arch::x86_64::*;
use core::fmt::{Debug, Formatter};
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

#[cfg(all(feature = "f16", target_feature = "f16c"))]
use half::f16;

// ============================================================================
// F32x4 - SSE
// ============================================================================

/// 4-lane f32 vector in a 128-bit SSE register.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct F32x4(__m128);

impl Default for F32x4 {
    #[inline(always)]
    fn default() -> Self {
        unsafe { Self(_mm_setzero_ps()) }
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
        // _mm_set_ps args are in reverse order: e3, e2, e1, e0
        unsafe { Self(_mm_set_ps(x3, x2, x1, x0)) }
    }

    /// Loads 4 half-precision values through the F16C converter.
    ///
    /// Both variants issue the same 64-bit load; this one documents (and
    /// debug-asserts) an 8-byte-aligned source.
    ///
    /// # Safety
    ///
    /// `src` must be valid for reading 4 halfs and 8-byte aligned.
    #[cfg(all(feature = "f16", target_feature = "f16c"))]
    #[inline(always)]
    pub unsafe fn from_aligned_f16(src: *const f16) -> Self {
        debug_assert!(src as usize % 8 == 0);
        unsafe { Self(_mm_cvtph_ps(_mm_loadl_epi64(src as *const __m128i))) }
    }

    /// Loads 4 half-precision values with no alignment requirement.
    ///
    /// # Safety
    ///
    /// `src` must be valid for reading 4 halfs.
    #[cfg(all(feature = "f16", target_feature = "f16c"))]
    #[inline(always)]
    pub unsafe fn from_unaligned_f16(src: *const f16) -> Self {
        unsafe { Self(_mm_cvtph_ps(_mm_loadl_epi64(src as *const __m128i))) }
    }

    /// Loads a single half-precision value into lane 0; other lanes are 0.0.
    ///
    /// # Safety
    ///
    /// `src` must be valid for reading one half.
    #[cfg(all(feature = "f16", target_feature = "f16c"))]
    #[inline(always)]
    pub unsafe fn load_first_f16(src: *const f16) -> Self {
        unsafe {
            let bits = (*src).to_bits() as i32;
            Self(_mm_cvtph_ps(_mm_cvtsi32_si128(bits)))
        }
    }
}

impl SimdF32 for F32x4 {
    const LANES: usize = 4;
    const ALIGN: usize = 16;
    type Array = [f32; 4];

    #[inline(always)]
    fn splat(val: f32) -> Self {
        unsafe { Self(_mm_set1_ps(val)) }
    }

    #[inline(always)]
    fn from_array(lanes: [f32; 4]) -> Self {
        unsafe { Self(_mm_loadu_ps(lanes.as_ptr())) }
    }

    #[inline(always)]
    fn to_array(self) -> [f32; 4] {
        let mut arr = [0.0f32; 4];
        unsafe { _mm_storeu_ps(arr.as_mut_ptr(), self.0) };
        arr
    }

    #[inline(always)]
    fn from_slice(slice: &[f32]) -> Self {
        assert!(slice.len() >= Self::LANES);
        unsafe { Self(_mm_loadu_ps(slice.as_ptr())) }
    }

    #[inline(always)]
    fn store(&self, out: &mut [f32]) {
        assert!(out.len() >= Self::LANES);
        unsafe { _mm_storeu_ps(out.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    unsafe fn from_aligned(src: *const f32) -> Self {
        debug_assert!(src as usize % Self::ALIGN == 0);
        unsafe { Self(_mm_load_ps(src)) }
    }

    #[inline(always)]
    unsafe fn from_unaligned(src: *const f32) -> Self {
        unsafe { Self(_mm_loadu_ps(src)) }
    }

    #[inline(always)]
    unsafe fn load_first(src: *const f32) -> Self {
        unsafe { Self(_mm_load_ss(src)) }
    }

    #[inline(always)]
    unsafe fn store_aligned(self, dst: *mut f32) {
        debug_assert!(dst as usize % Self::ALIGN == 0);
        unsafe { _mm_store_ps(dst, self.0) }
    }

    #[inline(always)]
    unsafe fn store_unaligned(self, dst: *mut f32) {
        unsafe { _mm_storeu_ps(dst, self.0) }
    }

    // Pairwise fold: (0+2, 1+3), then lane0 + lane1. Stays within SSE2.
    #[inline(always)]
    fn sum(self) -> f32 {
        unsafe {
            let hi = _mm_movehl_ps(self.0, self.0);
            let pairs = _mm_add_ps(self.0, hi);
            let odd = _mm_shuffle_ps::<0b00_00_00_01>(pairs, pairs);
            _mm_cvtss_f32(_mm_add_ss(pairs, odd))
        }
    }
}

impl PartialEq for F32x4 {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        unsafe { _mm_movemask_ps(_mm_cmpeq_ps(self.0, other.0)) == 0b1111 }
    }
}

impl Add for F32x4 {
    type Output = Self;
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { Self(_mm_add_ps(self.0, rhs.0)) }
    }
}

impl Sub for F32x4 {
    type Output = Self;
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Self(_mm_sub_ps(self.0, rhs.0)) }
    }
}

impl Mul for F32x4 {
    type Output = Self;
    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { Self(_mm_mul_ps(self.0, rhs.0)) }
    }
}

impl Div for F32x4 {
    type Output = Self;
    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        unsafe { Self(_mm_div_ps(self.0, rhs.0)) }
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

/// In-place 4x4 transpose over XMM registers.
///
/// After the call, lane `i` of `rows[j]` holds what lane `j` of `rows[i]`
/// held on entry. Applying it twice restores the input.
#[inline(always)]
pub fn transpose4(rows: &mut [F32x4; 4]) {
    unsafe {
        let t0 = _mm_unpacklo_ps(rows[0].0, rows[1].0); // a0 b0 a1 b1
        let t1 = _mm_unpackhi_ps(rows[0].0, rows[1].0); // a2 b2 a3 b3
        let t2 = _mm_unpacklo_ps(rows[2].0, rows[3].0); // c0 d0 c1 d1
        let t3 = _mm_unpackhi_ps(rows[2].0, rows[3].0); // c2 d2 c3 d3
        rows[0].0 = _mm_movelh_ps(t0, t2); // a0 b0 c0 d0
        rows[1].0 = _mm_movehl_ps(t2, t0); // a1 b1 c1 d1
        rows[2].0 = _mm_movelh_ps(t1, t3); // a2 b2 c2 d2
        rows[3].0 = _mm_movehl_ps(t3, t1); // a3 b3 c3 d3
    }
}

// ============================================================================
// Prefetch hints
// ============================================================================

/// Hints the prefetcher to pull `src` into every cache level.
///
/// Advisory only; never faults, has no effect on vector values.
#[inline(always)]
pub fn prefetch_near(src: *const f32) {
    unsafe { _mm_prefetch::<_MM_HINT_T0>(src as *const i8) }
}

/// Hints the prefetcher to pull `src` into L2 and outward.
#[inline(always)]
pub fn prefetch_medium(src: *const f32) {
    unsafe { _mm_prefetch::<_MM_HINT_T1>(src as *const i8) }
}

/// Hints the prefetcher to pull `src` into the outermost cache level.
#[inline(always)]
pub fn prefetch_far(src: *const f32) {
    unsafe { _mm_prefetch::<_MM_HINT_T2>(src as *const i8) }
}

/// Hints a non-temporal fetch of `src`, minimizing cache pollution.
#[inline(always)]
pub fn prefetch_non_temporal(src: *const f32) {
    unsafe { _mm_prefetch::<_MM_HINT_NTA>(src as *const i8) }
}

// ============================================================================
// F32x8 - AVX
// ============================================================================

/// 8-lane f32 vector in a 256-bit AVX register.
#[cfg(target_feature = "avx")]
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct F32x8(__m256);

#[cfg(target_feature = "avx")]
impl Default for F32x8 {
    #[inline(always)]
    fn default() -> Self {
        unsafe { Self(_mm256_setzero_ps()) }
    }
}

#[cfg(target_feature = "avx")]
impl Debug for F32x8 {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "F32x8({:?})", self.to_array())
    }
}

#[cfg(target_feature = "avx")]
impl F32x8 {
    /// Builds a vector from individual lane values, in lane order.
    #[inline(always)]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        x0: f32,
        x1: f32,
        x2: f32,
        x3: f32,
        x4: f32,
        x5: f32,
        x6: f32,
        x7: f32,
    ) -> Self {
        // _mm256_set_ps args are in reverse order
        unsafe { Self(_mm256_set_ps(x7, x6, x5, x4, x3, x2, x1, x0)) }
    }

    /// Loads 8 half-precision values through the F16C converter.
    ///
    /// # Safety
    ///
    /// `src` must be valid for reading 8 halfs and 16-byte aligned.
    #[cfg(all(feature = "f16", target_feature = "f16c"))]
    #[inline(always)]
    pub unsafe fn from_aligned_f16(src: *const f16) -> Self {
        debug_assert!(src as usize % 16 == 0);
        unsafe { Self(_mm256_cvtph_ps(_mm_load_si128(src as *const __m128i))) }
    }

    /// Loads 8 half-precision values with no alignment requirement.
    ///
    /// # Safety
    ///
    /// `src` must be valid for reading 8 halfs.
    #[cfg(all(feature = "f16", target_feature = "f16c"))]
    #[inline(always)]
    pub unsafe fn from_unaligned_f16(src: *const f16) -> Self {
        unsafe { Self(_mm256_cvtph_ps(_mm_loadu_si128(src as *const __m128i))) }
    }

    /// Loads a single half-precision value into lane 0; other lanes are 0.0.
    ///
    /// # Safety
    ///
    /// `src` must be valid for reading one half.
    #[cfg(all(feature = "f16", target_feature = "f16c"))]
    #[inline(always)]
    pub unsafe fn load_first_f16(src: *const f16) -> Self {
        unsafe {
            let bits = (*src).to_bits() as i32;
            Self(_mm256_cvtph_ps(_mm_cvtsi32_si128(bits)))
        }
    }
}

#[cfg(target_feature = "avx")]
impl SimdF32 for F32x8 {
    const LANES: usize = 8;
    const ALIGN: usize = 32;
    type Array = [f32; 8];

    #[inline(always)]
    fn splat(val: f32) -> Self {
        unsafe { Self(_mm256_set1_ps(val)) }
    }

    #[inline(always)]
    fn from_array(lanes: [f32; 8]) -> Self {
        unsafe { Self(_mm256_loadu_ps(lanes.as_ptr())) }
    }

    #[inline(always)]
    fn to_array(self) -> [f32; 8] {
        let mut arr = [0.0f32; 8];
        unsafe { _mm256_storeu_ps(arr.as_mut_ptr(), self.0) };
        arr
    }

    #[inline(always)]
    fn from_slice(slice: &[f32]) -> Self {
        assert!(slice.len() >= Self::LANES);
        unsafe { Self(_mm256_loadu_ps(slice.as_ptr())) }
    }

    #[inline(always)]
    fn store(&self, out: &mut [f32]) {
        assert!(out.len() >= Self::LANES);
        unsafe { _mm256_storeu_ps(out.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    unsafe fn from_aligned(src: *const f32) -> Self {
        debug_assert!(src as usize % Self::ALIGN == 0);
        unsafe { Self(_mm256_load_ps(src)) }
    }

    #[inline(always)]
    unsafe fn from_unaligned(src: *const f32) -> Self {
        unsafe { Self(_mm256_loadu_ps(src)) }
    }

    // Masked load: only lane 0 touches memory, the rest are zeroed by the
    // hardware rather than by a separate blend.
    #[inline(always)]
    unsafe fn load_first(src: *const f32) -> Self {
        unsafe {
            let mask = _mm256_set_epi32(0, 0, 0, 0, 0, 0, 0, -1);
            Self(_mm256_maskload_ps(src, mask))
        }
    }

    #[inline(always)]
    unsafe fn store_aligned(self, dst: *mut f32) {
        debug_assert!(dst as usize % Self::ALIGN == 0);
        unsafe { _mm256_store_ps(dst, self.0) }
    }

    #[inline(always)]
    unsafe fn store_unaligned(self, dst: *mut f32) {
        unsafe { _mm256_storeu_ps(dst, self.0) }
    }

    // Three-stage fold: 256 -> 128, then the 4-wide movehl/shuffle ladder.
    #[inline(always)]
    fn sum(self) -> f32 {
        unsafe {
            let lo = _mm256_castps256_ps128(self.0);
            let hi = _mm256_extractf128_ps::<1>(self.0);
            let quad = _mm_add_ps(lo, hi);
            let pairs = _mm_add_ps(quad, _mm_movehl_ps(quad, quad));
            let odd = _mm_shuffle_ps::<0b00_00_00_01>(pairs, pairs);
            _mm_cvtss_f32(_mm_add_ss(pairs, odd))
        }
    }
}

#[cfg(target_feature = "avx")]
impl PartialEq for F32x8 {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        unsafe {
            _mm256_movemask_ps(_mm256_cmp_ps::<_CMP_EQ_OQ>(self.0, other.0)) == 0b1111_1111
        }
    }
}

#[cfg(target_feature = "avx")]
impl Add for F32x8 {
    type Output = Self;
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_add_ps(self.0, rhs.0)) }
    }
}

#[cfg(target_feature = "avx")]
impl Sub for F32x8 {
    type Output = Self;
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_sub_ps(self.0, rhs.0)) }
    }
}

#[cfg(target_feature = "avx")]
impl Mul for F32x8 {
    type Output = Self;
    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_mul_ps(self.0, rhs.0)) }
    }
}

#[cfg(target_feature = "avx")]
impl Div for F32x8 {
    type Output = Self;
    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        unsafe { Self(_mm256_div_ps(self.0, rhs.0)) }
    }
}

#[cfg(target_feature = "avx")]
impl AddAssign for F32x8 {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

#[cfg(target_feature = "avx")]
impl SubAssign for F32x8 {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

#[cfg(target_feature = "avx")]
impl MulAssign for F32x8 {
    #[inline(always)]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

#[cfg(target_feature = "avx")]
impl DivAssign for F32x8 {
    #[inline(always)]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

/// In-place 8x8 transpose over YMM registers.
///
/// Two-level shuffle network: interleave row pairs within each 128-bit
/// half (unpack, then shuffle across pair results), then recombine the
/// halves with cross-lane permutes. After the call, lane `i` of `rows[j]`
/// holds what lane `j` of `rows[i]` held on entry.
#[cfg(target_feature = "avx")]
#[inline(always)]
pub fn transpose8(rows: &mut [F32x8; 8]) {
    unsafe {
        // Interleave adjacent row pairs within 128-bit halves.
        let t0 = _mm256_unpacklo_ps(rows[0].0, rows[1].0); // a0 b0 a1 b1 | a4 b4 a5 b5
        let t1 = _mm256_unpackhi_ps(rows[0].0, rows[1].0); // a2 b2 a3 b3 | a6 b6 a7 b7
        let t2 = _mm256_unpacklo_ps(rows[2].0, rows[3].0);
        let t3 = _mm256_unpackhi_ps(rows[2].0, rows[3].0);
        let t4 = _mm256_unpacklo_ps(rows[4].0, rows[5].0);
        let t5 = _mm256_unpackhi_ps(rows[4].0, rows[5].0);
        let t6 = _mm256_unpacklo_ps(rows[6].0, rows[7].0);
        let t7 = _mm256_unpackhi_ps(rows[6].0, rows[7].0);

        // Gather 4-lane column groups within each 128-bit half.
        let s0 = _mm256_shuffle_ps::<0b0100_0100>(t0, t2); // a0 b0 c0 d0 | a4 b4 c4 d4
        let s1 = _mm256_shuffle_ps::<0b1110_1110>(t0, t2); // a1 b1 c1 d1 | a5 b5 c5 d5
        let s2 = _mm256_shuffle_ps::<0b0100_0100>(t1, t3);
        let s3 = _mm256_shuffle_ps::<0b1110_1110>(t1, t3);
        let s4 = _mm256_shuffle_ps::<0b0100_0100>(t4, t6); // e0 f0 g0 h0 | e4 f4 g4 h4
        let s5 = _mm256_shuffle_ps::<0b1110_1110>(t4, t6);
        let s6 = _mm256_shuffle_ps::<0b0100_0100>(t5, t7);
        let s7 = _mm256_shuffle_ps::<0b1110_1110>(t5, t7);

        // Stitch low/high 128-bit halves across the lane boundary.
        rows[0].0 = _mm256_permute2f128_ps::<0x20>(s0, s4); // a0 b0 c0 d0 e0 f0 g0 h0
        rows[1].0 = _mm256_permute2f128_ps::<0x20>(s1, s5);
        rows[2].0 = _mm256_permute2f128_ps::<0x20>(s2, s6);
        rows[3].0 = _mm256_permute2f128_ps::<0x20>(s3, s7);
        rows[4].0 = _mm256_permute2f128_ps::<0x31>(s0, s4);
        rows[5].0 = _mm256_permute2f128_ps::<0x31>(s1, s5);
        rows[6].0 = _mm256_permute2f128_ps::<0x31>(s2, s6);
        rows[7].0 = _mm256_permute2f128_ps::<0x31>(s3, s7);
    }
}
