//! Backend contract and compile-time backend selection.
//!
//! Each submodule provides concrete vector types satisfying [`SimdF32`]:
//!
//! - `scalar`: portable reference implementation, always compiled.
//! - `x86`: SSE 4-wide and (with `target_feature = "avx"`) AVX 8-wide.
//! - `arm`: NEON 4-wide.
//!
//! The re-exports at the bottom of this module bind "the" 4-wide and
//! 8-wide type for the current build. This is a zero-cost alias, resolved
//! before any instance exists. Callers that want a specific backend can
//! still name it through the submodule path (the differential tests do).

use core::fmt::Debug;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

/// Structural contract shared by every lane width on every backend.
///
/// Implementors are plain value types: `Copy`, register-sized, with no
/// heap state and no lifetime ties. Equality is exact per-lane float
/// comparison, never tolerance-based. Arithmetic is elementwise IEEE 754;
/// division by zero produces inf/NaN and is not an error.
pub trait SimdF32:
    Copy
    + Clone
    + Debug
    + Default
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
{
    /// Number of lanes.
    const LANES: usize;

    /// Natural alignment in bytes of the backing storage.
    ///
    /// The `*_aligned` pointer operations require their pointer to satisfy
    /// this; it is 4 for the scalar backend, 16 for SSE/NEON, 32 for AVX.
    const ALIGN: usize;

    /// `[f32; LANES]`.
    type Array: Copy + Debug + PartialEq + AsRef<[f32]>;

    /// Broadcast a single value to all lanes.
    fn splat(val: f32) -> Self;

    /// Build a vector from a lane array, in lane order.
    fn from_array(lanes: Self::Array) -> Self;

    /// Extract the lanes as an array.
    fn to_array(self) -> Self::Array;

    /// Load `LANES` values from the front of a slice (unaligned).
    ///
    /// # Panics
    ///
    /// Panics if `slice.len() < LANES`.
    fn from_slice(slice: &[f32]) -> Self;

    /// Store all lanes to the front of a slice (unaligned).
    ///
    /// # Panics
    ///
    /// Panics if `out.len() < LANES`.
    fn store(&self, out: &mut [f32]);

    /// Load `LANES` contiguous values from an aligned pointer.
    ///
    /// # Safety
    ///
    /// `src` must be valid for reading `LANES` floats and aligned to
    /// [`ALIGN`](Self::ALIGN) bytes. Neither is checked in release builds.
    unsafe fn from_aligned(src: *const f32) -> Self;

    /// Load `LANES` contiguous values from a pointer with no alignment
    /// requirement.
    ///
    /// # Safety
    ///
    /// `src` must be valid for reading `LANES` floats.
    unsafe fn from_unaligned(src: *const f32) -> Self;

    /// Load a single value into lane 0; all other lanes are 0.0.
    ///
    /// # Safety
    ///
    /// `src` must be valid for reading one float.
    unsafe fn load_first(src: *const f32) -> Self;

    /// Store all lanes to an aligned pointer.
    ///
    /// # Safety
    ///
    /// `dst` must be valid for writing `LANES` floats and aligned to
    /// [`ALIGN`](Self::ALIGN) bytes. Neither is checked in release builds.
    unsafe fn store_aligned(self, dst: *mut f32);

    /// Store all lanes to a pointer with no alignment requirement.
    ///
    /// # Safety
    ///
    /// `dst` must be valid for writing `LANES` floats.
    unsafe fn store_unaligned(self, dst: *mut f32);

    /// Horizontal sum of all lanes.
    ///
    /// The reduction order is backend-defined (strict left-to-right on
    /// scalar, pairwise folds in hardware), so results agree across
    /// backends only to within ordinary float accumulation error, not
    /// bit-exactly.
    fn sum(self) -> f32;
}

pub mod scalar;

#[cfg(target_arch = "x86_64")]
pub mod x86;

#[cfg(target_arch = "aarch64")]
pub mod arm;

// ============================================================================
// Compile-time backend selection
// ============================================================================

// 4-wide: hardware on x86_64 (SSE2 is baseline there) and aarch64,
// scalar everywhere else.
#[cfg(target_arch = "x86_64")]
pub use x86::{transpose4, F32x4};

#[cfg(target_arch = "aarch64")]
pub use arm::{transpose4, F32x4};

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
pub use scalar::{transpose4, F32x4};

// 8-wide: AVX or scalar. No AVX means scalar even when SSE is present;
// the 8-wide type is never emulated over two 128-bit registers.
#[cfg(all(target_arch = "x86_64", target_feature = "avx"))]
pub use x86::{transpose8, F32x8};

#[cfg(not(all(target_arch = "x86_64", target_feature = "avx")))]
pub use scalar::{transpose8, F32x8};
