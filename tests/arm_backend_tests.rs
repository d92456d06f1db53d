//! Battery for the aarch64 NEON backend.

#[cfg(target_arch = "aarch64")]
mod neon {
    use lanewise::backend::arm::{transpose4, F32x4};
    use lanewise::SimdF32;

    #[repr(align(16))]
    struct Aligned16([f32; 4]);

    #[test]
    fn lanes_and_alignment() {
        assert_eq!(F32x4::LANES, 4);
        assert_eq!(F32x4::ALIGN, 16);
    }

    #[test]
    fn splat_matches_explicit_constructor() {
        assert_eq!(F32x4::splat(42.0), F32x4::new(42.0, 42.0, 42.0, 42.0));
    }

    #[test]
    fn aligned_round_trip() {
        let src = Aligned16([1.5, -2.5, 3.25, 4.75]);
        let mut dst = Aligned16([0.0; 4]);
        unsafe {
            let v = F32x4::from_aligned(src.0.as_ptr());
            v.store_aligned(dst.0.as_mut_ptr());
        }
        assert_eq!(dst.0, src.0);
    }

    #[test]
    fn load_first_zeroes_upper_lanes() {
        let src = [42.0f32, 43.0, 44.0, 45.0];
        let v = unsafe { F32x4::load_first(src.as_ptr()) };
        assert_eq!(v, F32x4::new(42.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn sum_is_exact_for_integer_lanes() {
        assert_eq!(F32x4::new(1.0, 2.0, 3.0, 4.0).sum(), 10.0);
    }

    #[test]
    fn elementwise_arithmetic() {
        let a = F32x4::new(1.0, 2.0, 3.0, 4.0);
        let b = F32x4::new(3.0, 4.0, 5.0, 6.0);
        assert_eq!(a + b, F32x4::new(4.0, 6.0, 8.0, 10.0));
        assert_eq!(b - a, F32x4::splat(2.0));
        assert_eq!(a * b, F32x4::new(3.0, 8.0, 15.0, 24.0));
        assert_eq!(a / a, F32x4::splat(1.0));
    }

    #[test]
    fn compound_assignment() {
        let mut v = F32x4::splat(8.0);
        v += F32x4::splat(2.0);
        v *= F32x4::splat(3.0);
        v -= F32x4::splat(10.0);
        v /= F32x4::splat(4.0);
        assert_eq!(v, F32x4::splat(5.0));
    }

    #[test]
    fn equality_is_exact_per_lane() {
        let a = F32x4::new(1.0, 2.0, 3.0, 4.0);
        for lane in 0..4 {
            let mut lanes = a.to_array();
            lanes[lane] += 1e-7;
            assert_ne!(a, F32x4::from_array(lanes), "lane {lane}");
        }
        assert_ne!(F32x4::splat(f32::NAN), F32x4::splat(f32::NAN));
    }

    #[test]
    fn transpose_reshapes_rows_to_columns() {
        let mut rows = [F32x4::new(1.0, 2.0, 3.0, 4.0); 4];
        transpose4(&mut rows);
        assert_eq!(rows[0], F32x4::splat(1.0));
        assert_eq!(rows[1], F32x4::splat(2.0));
        assert_eq!(rows[2], F32x4::splat(3.0));
        assert_eq!(rows[3], F32x4::splat(4.0));
        transpose4(&mut rows);
        assert_eq!(rows, [F32x4::new(1.0, 2.0, 3.0, 4.0); 4]);
    }
}
