//! # lanewise
//!
//! Fixed-width SIMD f32 vectors with interchangeable backends.
//!
//! Two lane widths are provided, [`F32x4`] and [`F32x8`], each backed by
//! whichever implementation the compilation target supports:
//!
//! - **scalar**: plain `[f32; N]` arrays, always available, and the
//!   correctness baseline the hardware backends are tested against.
//! - **x86**: SSE registers for the 4-wide type (baseline on `x86_64`),
//!   AVX registers for the 8-wide type when `target_feature = "avx"` is
//!   enabled.
//! - **arm**: NEON registers for the 4-wide type on `aarch64`.
//!
//! Backend selection is a compile-time `pub use`: no vtable, no runtime
//! branch, no allocation. The 8-wide type falls back to scalar whenever AVX
//! is absent; there is deliberately no 8-wide emulation over two 128-bit
//! registers.
//!
//! ## Build configuration
//!
//! The hardware paths are gated on the usual target cfgs, so the build
//! flags are the standard rustc ones:
//!
//! ```text
//! RUSTFLAGS="-C target-feature=+avx"        # 8-wide AVX backend
//! RUSTFLAGS="-C target-feature=+avx,+f16c"  # plus half-float loads
//! ```
//!
//! The half-float load overloads additionally require the `f16` cargo
//! feature, which pulls in the `half` crate for the element type. When
//! either gate is off, those methods do not exist at all.
//!
//! ## Contract
//!
//! All concrete types satisfy [`SimdF32`]: splat/array/slice/pointer
//! construction, aligned and unaligned bulk I/O, horizontal [`sum`],
//! elementwise `+ - * /` (plus compound assignment), and exact per-lane
//! equality. The free functions [`transpose4`] and [`transpose8`] reshape
//! a square set of vectors in place. Operations never fail: the pointer
//! surface is `unsafe` with documented length/alignment preconditions,
//! and division by zero follows IEEE 754.
//!
//! [`sum`]: SimdF32::sum

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

pub mod backend;

pub use backend::{transpose4, transpose8, F32x4, F32x8, SimdF32};
