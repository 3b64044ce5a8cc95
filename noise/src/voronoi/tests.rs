use super::*;
use crate::lattice::{LatticeNormal, LatticeTiling};

fn points() -> impl Iterator<Item = Vec3> {
    (0..300).map(|i| {
        let f = i as f32;
        Vec3::new(
            (f * 0.618).sin() * 5.0,
            (f * 0.377).cos() * 5.0,
            f * 0.031 - 4.0,
        )
    })
}

fn assert_f2_not_below_f1<N1: Noise, N2: Noise>() {
    let hash = SmallXxHash::seed(17);
    for p in points() {
        for frequency in [1, 3, 8] {
            let f1 = N1::get_noise(p, hash, frequency).v;
            let f2 = N2::get_noise(p, hash, frequency).v;
            assert!(f2 >= f1, "F2 {} < F1 {} at {:?}", f2, f1, p);
        }
    }
}

#[test]
fn test_worley_f2_not_below_f1() {
    assert_f2_not_below_f1::<
        Voronoi1D<LatticeNormal, Worley, F1>,
        Voronoi1D<LatticeNormal, Worley, F2>,
    >();
    assert_f2_not_below_f1::<
        Voronoi2D<LatticeNormal, Worley, F1>,
        Voronoi2D<LatticeNormal, Worley, F2>,
    >();
    assert_f2_not_below_f1::<
        Voronoi3D<LatticeTiling, Worley, F1>,
        Voronoi3D<LatticeTiling, Worley, F2>,
    >();
}

#[test]
fn test_chebyshev_f2_not_below_f1() {
    assert_f2_not_below_f1::<
        Voronoi2D<LatticeTiling, Chebyshev, F1>,
        Voronoi2D<LatticeTiling, Chebyshev, F2>,
    >();
    assert_f2_not_below_f1::<
        Voronoi3D<LatticeNormal, Chebyshev, F1>,
        Voronoi3D<LatticeNormal, Chebyshev, F2>,
    >();
}

#[test]
fn test_edges_are_non_negative() {
    let hash = SmallXxHash::seed(2);
    for p in points() {
        let s = Voronoi2D::<LatticeNormal, Worley, F2MinusF1>::get_noise(p, hash, 4);
        assert!(s.v >= 0.0);
    }
}

#[test]
fn test_worley_f1_range() {
    let hash = SmallXxHash::seed(5);
    for p in points() {
        let s = Voronoi3D::<LatticeNormal, Worley, F1>::get_noise(p, hash, 2);
        assert!((0.0..=1.0).contains(&s.v), "value {}", s.v);
        assert!(s.dx.is_finite() && s.dy.is_finite() && s.dz.is_finite());
    }
}

#[test]
fn test_smooth_worley_finite() {
    let hash = SmallXxHash::seed(8);
    for p in points() {
        let s = Voronoi3D::<LatticeNormal, SmoothWorley, F1>::get_noise(p, hash, 2);
        assert!(s.v.is_finite());
        assert!((0.0..=1.0).contains(&s.v));
        let s = Voronoi1D::<LatticeNormal, SmoothWorley, F2>::get_noise(p, hash, 2);
        assert!(s.v.is_finite());
    }
}

#[test]
fn test_worley_derivative_matches_finite_difference() {
    type N = Voronoi2D<LatticeNormal, Worley, F1>;
    let hash = SmallXxHash::seed(3);
    let h = 1e-3;
    let mut checked = 0;
    for p in points() {
        let s = N::get_noise(p, hash, 1);
        let ahead = N::get_noise(p + Vec3::X * h, hash, 1).v;
        let behind = N::get_noise(p - Vec3::X * h, hash, 1).v;
        // Skip samples straddling a cell border, where F1 has a kink
        let forward = (ahead - s.v) / h;
        let backward = (s.v - behind) / h;
        if (forward - backward).abs() > 1e-2 || s.v >= 1.0 {
            continue;
        }
        let numeric = (ahead - behind) / (2.0 * h);
        assert!((numeric - s.dx).abs() < 1e-2, "{} vs {}", numeric, s.dx);
        checked += 1;
    }
    assert!(checked > 100);
}

#[test]
fn test_tiling_voronoi_is_periodic() {
    type N = Voronoi2D<LatticeTiling, Worley, F1>;
    let hash = SmallXxHash::seed(9);
    for p in points() {
        let a = N::get_noise(p, hash, 3).v;
        let b = N::get_noise(p + Vec3::X, hash, 3).v;
        let c = N::get_noise(p + Vec3::Z, hash, 3).v;
        assert!((a - b).abs() < 1e-3);
        assert!((a - c).abs() < 1e-3);
    }
}
