//! Displaced surface geometry checked against finite differences

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use strata_mesh::generators::{Octasphere, SquareGrid};
use strata_mesh::{MeshJob, MeshKind, SingleStream, Vertex};
use strata_noise::{Lattice3D, LatticeNormal, Perlin, Settings, Simplex, Simplex3D, SpaceTrs};
use strata_surface::{NoiseType, SurfaceConfig, SurfaceJob, SurfaceMode, build_surface};

type Perlin3 = Lattice3D<LatticeNormal, Perlin>;

/// Single vertex at `p` on a flat mesh
fn plane_point(p: Vec2) -> SingleStream {
    let mut streams = SingleStream::new();
    streams.vertices.push(
        Vertex {
            position: Vec3::new(p.x, 0.0, p.y),
            normal: Vec3::Y,
            tangent: Vec3::X.extend(-1.0),
            tex_coord0: Vec2::ZERO,
        }
        .into(),
    );
    streams
}

fn displaced_height(job: &SurfaceJob<Perlin3>, p: Vec2) -> f32 {
    let mut streams = plane_point(p);
    job.run(&mut streams).unwrap();
    streams.vertex(0).position.y
}

#[test]
fn test_plane_normals_match_finite_differences() {
    let domain = SpaceTrs {
        rotation: Vec3::new(10.0, 20.0, 30.0),
        scale: Vec3::new(1.5, 1.0, 0.75),
        ..Default::default()
    };
    let job = SurfaceJob::<Perlin3>::new(Settings::default(), domain, 0.5, SurfaceMode::Plane);
    let mut rng = Pcg64::seed_from_u64(42);
    let h = 1.0 / 1024.0;

    for _ in 0..100 {
        let p = Vec2::new(rng.random_range(-0.5..0.5), rng.random_range(-0.5..0.5));
        let dx = (displaced_height(&job, p + Vec2::new(h, 0.0)) - displaced_height(&job, p - Vec2::new(h, 0.0)))
            / (2.0 * h);
        let dz = (displaced_height(&job, p + Vec2::new(0.0, h)) - displaced_height(&job, p - Vec2::new(0.0, h)))
            / (2.0 * h);
        let expected = Vec3::new(-dx, 1.0, -dz).normalize();

        let mut streams = plane_point(p);
        job.run(&mut streams).unwrap();
        let v = streams.vertex(0);
        assert!(v.normal.abs_diff_eq(expected, 1e-2), "{} vs {}", v.normal, expected);
        assert!((v.normal.length() - 1.0).abs() < 1e-5);
        assert!(v.normal.dot(v.tangent.truncate()).abs() < 1e-5);
    }
}

#[test]
fn test_sphere_frame_orthonormal() {
    let mut streams = SingleStream::new();
    MeshJob::<Octasphere>::new(10).unwrap().run_parallel(&mut streams);
    let settings = Settings {
        octaves: 3,
        ..Default::default()
    };
    SurfaceJob::<Simplex3D<Simplex>>::new(settings, SpaceTrs::default(), -0.3, SurfaceMode::Sphere)
        .run(&mut streams)
        .unwrap();

    for i in 0..streams.vertices.len() {
        let v = streams.vertex(i);
        let t = v.tangent.truncate();
        assert!((v.normal.length() - 1.0).abs() < 1e-4);
        assert!((t.length() - 1.0).abs() < 1e-4, "{i}: tangent {t}");
        assert!(v.normal.dot(t).abs() < 1e-4, "{i}: {} . {}", v.normal, t);
        assert!((0.7..=1.3).contains(&v.position.length()));
    }
}

#[test]
fn test_build_surface_is_deterministic() {
    let config = SurfaceConfig {
        mesh: MeshKind::SquareGrid,
        noise: NoiseType::Perlin,
        dimensions: 2,
        resolution: 12,
        ..Default::default()
    };
    let a = build_surface(&config).unwrap();
    let b = build_surface(&config).unwrap();
    assert_eq!(a, b);

    let other_seed = SurfaceConfig {
        settings: Settings::with_seed(99),
        ..config
    };
    let c = build_surface(&other_seed).unwrap();
    assert_ne!(a.streams.vertices, c.streams.vertices);
}

#[test]
fn test_build_surface_matches_manual_pipeline() {
    let config = SurfaceConfig {
        mesh: MeshKind::SquareGrid,
        noise: NoiseType::Perlin,
        dimensions: 3,
        resolution: 6,
        displacement: 0.4,
        ..Default::default()
    };
    let surface = build_surface(&config).unwrap();

    let mut streams = SingleStream::new();
    MeshJob::<SquareGrid>::new(6)
        .unwrap()
        .with_extra_bounds_extents(Vec3::new(0.0, 0.4, 0.0))
        .run(&mut streams);
    SurfaceJob::<Perlin3>::new(config.settings, config.domain, 0.4, SurfaceMode::Plane)
        .run(&mut streams)
        .unwrap();
    assert_eq!(surface.streams, streams);
}
