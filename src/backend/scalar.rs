//! Portable scalar backend.
//!
//! Plain lane arrays with no hardware dependency. Always compiled: this is
//! the fallback for targets (or lane widths) without a suitable register
//! file, and the reference implementation the hardware backends are held
//! to in the differential tests.

use super::SimdF32;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

macro_rules! scalar_vector {
    ($name:ident, $lanes:literal, $transpose:ident, $type_doc:literal, $transpose_doc:literal, $($lane:ident),+) => {
        #[doc = $type_doc]
        #[derive(Copy, Clone, Debug, Default, PartialEq)]
        #[repr(transparent)]
        pub struct $name([f32; $lanes]);

        impl $name {
            /// Builds a vector from individual lane values, in lane order.
            #[inline(always)]
            #[allow(clippy::too_many_arguments)]
            pub fn new($($lane: f32),+) -> Self {
                Self([$($lane),+])
            }
        }

        impl SimdF32 for $name {
            const LANES: usize = $lanes;
            const ALIGN: usize = core::mem::align_of::<f32>();
            type Array = [f32; $lanes];

            #[inline(always)]
            fn splat(val: f32) -> Self {
                Self([val; $lanes])
            }

            #[inline(always)]
            fn from_array(lanes: [f32; $lanes]) -> Self {
                Self(lanes)
            }

            #[inline(always)]
            fn to_array(self) -> [f32; $lanes] {
                self.0
            }

            #[inline(always)]
            fn from_slice(slice: &[f32]) -> Self {
                assert!(slice.len() >= Self::LANES);
                let mut lanes = [0.0; $lanes];
                lanes.copy_from_slice(&slice[..$lanes]);
                Self(lanes)
            }

            #[inline(always)]
            fn store(&self, out: &mut [f32]) {
                assert!(out.len() >= Self::LANES);
                out[..$lanes].copy_from_slice(&self.0);
            }

            #[inline(always)]
            unsafe fn from_aligned(src: *const f32) -> Self {
                debug_assert!(src as usize % Self::ALIGN == 0);
                unsafe { Self(core::ptr::read(src as *const [f32; $lanes])) }
            }

            #[inline(always)]
            unsafe fn from_unaligned(src: *const f32) -> Self {
                unsafe { Self(core::ptr::read_unaligned(src as *const [f32; $lanes])) }
            }

            #[inline(always)]
            unsafe fn load_first(src: *const f32) -> Self {
                let mut lanes = [0.0; $lanes];
                lanes[0] = unsafe { *src };
                Self(lanes)
            }

            #[inline(always)]
            unsafe fn store_aligned(self, dst: *mut f32) {
                debug_assert!(dst as usize % Self::ALIGN == 0);
                unsafe { core::ptr::write(dst as *mut [f32; $lanes], self.0) }
            }

            #[inline(always)]
            unsafe fn store_unaligned(self, dst: *mut f32) {
                unsafe { core::ptr::write_unaligned(dst as *mut [f32; $lanes], self.0) }
            }

            // Strict left-to-right accumulation. The hardware backends fold
            // pairwise instead, so cross-backend sums agree only to within
            // float accumulation error.
            #[inline(always)]
            fn sum(self) -> f32 {
                let mut acc = 0.0;
                for lane in self.0 {
                    acc += lane;
                }
                acc
            }
        }

        impl Add for $name {
            type Output = Self;
            #[inline(always)]
            fn add(self, rhs: Self) -> Self {
                Self(core::array::from_fn(|i| self.0[i] + rhs.0[i]))
            }
        }

        impl Sub for $name {
            type Output = Self;
            #[inline(always)]
            fn sub(self, rhs: Self) -> Self {
                Self(core::array::from_fn(|i| self.0[i] - rhs.0[i]))
            }
        }

        impl Mul for $name {
            type Output = Self;
            #[inline(always)]
            fn mul(self, rhs: Self) -> Self {
                Self(core::array::from_fn(|i| self.0[i] * rhs.0[i]))
            }
        }

        impl Div for $name {
            type Output = Self;
            #[inline(always)]
            fn div(self, rhs: Self) -> Self {
                Self(core::array::from_fn(|i| self.0[i] / rhs.0[i]))
            }
        }

        impl AddAssign for $name {
            #[inline(always)]
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl SubAssign for $name {
            #[inline(always)]
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl MulAssign for $name {
            #[inline(always)]
            fn mul_assign(&mut self, rhs: Self) {
                *self = *self * rhs;
            }
        }

        impl DivAssign for $name {
            #[inline(always)]
            fn div_assign(&mut self, rhs: Self) {
                *self = *self / rhs;
            }
        }

        #[doc = $transpose_doc]
        ///
        /// After the call, lane `i` of `rows[j]` holds what lane `j` of
        /// `rows[i]` held on entry. Applying it twice restores the input.
        #[inline(always)]
        pub fn $transpose(rows: &mut [$name; $lanes]) {
            for i in 0..$lanes {
                for j in (i + 1)..$lanes {
                    let a = rows[i].0[j];
                    rows[i].0[j] = rows[j].0[i];
                    rows[j].0[i] = a;
                }
            }
        }
    };
}

scalar_vector!(
    F32x4,
    4,
    transpose4,
    "4-lane f32 vector over a plain array.",
    "In-place 4x4 transpose.",
    x0,
    x1,
    x2,
    x3
);

scalar_vector!(
    F32x8,
    8,
    transpose8,
    "8-lane f32 vector over a plain array.",
    "In-place 8x8 transpose.",
    x0,
    x1,
    x2,
    x3,
    x4,
    x5,
    x6,
    x7
);
