use std::collections::HashMap;

use glam::{IVec3, Vec3};

use super::*;
use crate::streams::VertexLayout;

/// Sink recording how often each slot is written
#[derive(Default)]
struct CoverageSink {
    vertices: Vec<Vertex>,
    vertex_writes: Vec<u32>,
    triangles: Vec<IVec3>,
    triangle_writes: Vec<u32>,
}

impl MeshStreams for CoverageSink {
    fn setup(&mut self, _bounds: Bounds, vertex_count: usize, index_count: usize) {
        self.vertices = vec![Vertex::default(); vertex_count];
        self.vertex_writes = vec![0; vertex_count];
        self.triangles = vec![IVec3::ZERO; index_count / 3];
        self.triangle_writes = vec![0; index_count / 3];
    }

    fn set_vertex(&mut self, index: usize, vertex: Vertex) {
        self.vertices[index] = vertex;
        self.vertex_writes[index] += 1;
    }

    fn set_triangle(&mut self, index: usize, triangle: IVec3) {
        self.triangles[index] = triangle;
        self.triangle_writes[index] += 1;
    }

    fn layout(&self) -> VertexLayout {
        VertexLayout::default()
    }
}

fn generate<G: MeshGenerator>(resolution: u32) -> (G, CoverageSink) {
    let generator = G::with_resolution(resolution);
    let mut sink = CoverageSink::default();
    sink.setup(generator.bounds(), generator.vertex_count(), generator.index_count());
    for i in 0..generator.job_length() {
        generator.execute(i, &mut sink);
    }
    (generator, sink)
}

/// Every slot written once, every index valid, every triangle non-degenerate
fn check_coverage<G: MeshGenerator>(resolution: u32) -> CoverageSink {
    let (generator, sink) = generate::<G>(resolution);
    let vertex_count = generator.vertex_count() as i32;
    assert!(
        sink.vertex_writes.iter().all(|&n| n == 1),
        "{} r={}: vertex writes {:?}",
        G::NAME,
        resolution,
        sink.vertex_writes
    );
    assert!(
        sink.triangle_writes.iter().all(|&n| n == 1),
        "{} r={}: triangle writes {:?}",
        G::NAME,
        resolution,
        sink.triangle_writes
    );
    for t in &sink.triangles {
        assert!(
            t.cmpge(IVec3::ZERO).all() && t.cmplt(IVec3::splat(vertex_count)).all(),
            "{} r={}: index out of range {}",
            G::NAME,
            resolution,
            t
        );
        assert!(t.x != t.y && t.y != t.z && t.x != t.z, "{}: degenerate {}", G::NAME, t);
    }
    for v in &sink.vertices {
        assert!(v.position.is_finite() && v.normal.is_finite() && v.tangent.is_finite());
        assert!(generator.bounds().contains(v.position, 1e-4), "{}: {} outside bounds", G::NAME, v.position);
    }
    sink
}

fn face_normal(sink: &CoverageSink, t: IVec3) -> Vec3 {
    let a = sink.vertices[t.x as usize].position;
    let b = sink.vertices[t.y as usize].position;
    let c = sink.vertices[t.z as usize].position;
    (b - a).cross(c - a)
}

fn check_grid<G: MeshGenerator>() {
    for resolution in [1, 2, 3, 8] {
        let sink = check_coverage::<G>(resolution);
        for v in &sink.vertices {
            assert_eq!(v.position.y, 0.0);
            assert_eq!(v.normal, Vec3::Y);
            assert!(v.tex_coord0.cmpge(Vec2::ZERO).all() && v.tex_coord0.cmple(Vec2::ONE).all());
        }
        for &t in &sink.triangles {
            assert!(face_normal(&sink, t).y > 0.0, "{}: triangle {} faces down", G::NAME, t);
        }
    }
}

fn check_sphere<G: MeshGenerator>() {
    for resolution in [1, 2, 3, 6] {
        let sink = check_coverage::<G>(resolution);
        for v in &sink.vertices {
            assert!((v.position.length() - 1.0).abs() < 1e-4, "{}: |{}| != 1", G::NAME, v.position);
            assert!((v.normal.length() - 1.0).abs() < 1e-3);
            assert!(v.normal.dot(v.position) > 0.5, "{}: inward normal", G::NAME);
        }
        for &t in &sink.triangles {
            let centroid = sink.vertices[t.x as usize].position
                + sink.vertices[t.y as usize].position
                + sink.vertices[t.z as usize].position;
            assert!(
                face_normal(&sink, t).dot(centroid) > 0.0,
                "{} r={}: triangle {} faces inward",
                G::NAME,
                resolution,
                t
            );
        }
    }
}

/// Each directed edge once and its reverse once
fn check_closed<G: MeshGenerator>(resolution: u32) {
    let (generator, sink) = generate::<G>(resolution);
    let mut edges: HashMap<(i32, i32), u32> = HashMap::new();
    for t in &sink.triangles {
        for (a, b) in [(t.x, t.y), (t.y, t.z), (t.z, t.x)] {
            *edges.entry((a, b)).or_default() += 1;
        }
    }
    for (&(a, b), &n) in &edges {
        assert_eq!(n, 1, "{}: edge ({a}, {b}) used {n} times", G::NAME);
        assert!(edges.contains_key(&(b, a)), "{}: open edge ({a}, {b})", G::NAME);
    }
    // Euler characteristic of a sphere
    let v = generator.vertex_count() as i64;
    let e = edges.len() as i64 / 2;
    let f = sink.triangles.len() as i64;
    assert_eq!(v - e + f, 2, "{} r={}", G::NAME, resolution);
}

#[test]
fn test_square_grid() {
    check_grid::<SquareGrid>();
}

#[test]
fn test_shared_square_grid() {
    check_grid::<SharedSquareGrid>();
}

#[test]
fn test_shared_triangle_grid() {
    check_grid::<SharedTriangleGrid>();
}

#[test]
fn test_pointy_hexagon_grid() {
    check_grid::<PointyHexagonGrid>();
}

#[test]
fn test_flat_hexagon_grid() {
    check_grid::<FlatHexagonGrid>();
}

#[test]
fn test_cube_sphere() {
    check_sphere::<CubeSphere>();
}

#[test]
fn test_shared_cube_sphere() {
    check_sphere::<SharedCubeSphere>();
    for resolution in [1, 2, 4] {
        check_closed::<SharedCubeSphere>(resolution);
    }
}

#[test]
fn test_uv_sphere() {
    check_sphere::<UvSphere>();
}

#[test]
fn test_octasphere() {
    check_sphere::<Octasphere>();
}

#[test]
fn test_geo_octasphere() {
    check_sphere::<GeoOctasphere>();
}

#[test]
fn test_icosphere() {
    check_sphere::<Icosphere>();
    for resolution in [1, 2, 5] {
        check_closed::<Icosphere>(resolution);
    }
}

#[test]
fn test_geo_icosphere() {
    check_sphere::<GeoIcosphere>();
    for resolution in [1, 2, 5] {
        check_closed::<GeoIcosphere>(resolution);
    }
}

#[test]
fn test_counts() {
    let g = SquareGrid::with_resolution(3);
    assert_eq!((g.vertex_count(), g.index_count(), g.job_length()), (36, 54, 3));
    let g = SharedSquareGrid::with_resolution(3);
    assert_eq!((g.vertex_count(), g.index_count(), g.job_length()), (16, 54, 4));
    let g = PointyHexagonGrid::with_resolution(2);
    assert_eq!((g.vertex_count(), g.index_count()), (28, 72));
    let g = CubeSphere::with_resolution(2);
    assert_eq!((g.vertex_count(), g.index_count(), g.job_length()), (96, 144, 12));
    let g = SharedCubeSphere::with_resolution(2);
    assert_eq!(g.vertex_count(), 26);
    let g = UvSphere::with_resolution(1);
    assert_eq!((g.vertex_count(), g.index_count(), g.job_length()), (13, 24, 5));
    let g = Octasphere::with_resolution(2);
    assert_eq!((g.vertex_count(), g.index_count(), g.job_length()), (27, 96, 9));
    let g = GeoIcosphere::with_resolution(2);
    assert_eq!((g.vertex_count(), g.index_count(), g.job_length()), (42, 240, 10));
}

#[test]
fn test_resolution_clamped_to_one() {
    let g = SharedTriangleGrid::with_resolution(0);
    assert_eq!(g.resolution(), 1);
    let mut g = UvSphere::default();
    g.set_resolution(0);
    assert_eq!(g.resolution(), 1);
}

#[test]
fn test_uv_sphere_seam_tex_coords() {
    let (_, sink) = generate::<UvSphere>(2);
    // Seam column at u = 0, last column at u = 1 in the same positions
    let rv = 4;
    for v in 1..rv {
        let seam = sink.vertices[v - 1];
        let last = sink.vertices[(rv + 1) * 8 - 2 + v];
        assert_eq!(seam.tex_coord0.x, 0.0);
        assert_eq!(last.tex_coord0.x, 1.0);
        assert!(seam.position.abs_diff_eq(last.position, 1e-5));
    }
}

#[test]
fn test_geo_octasphere_spacing_more_uniform() {
    // Ratio of longest to shortest edge is smaller with geodesic placement
    fn edge_ratio<G: MeshGenerator>() -> f32 {
        let (_, sink) = generate::<G>(8);
        let mut min = f32::MAX;
        let mut max = 0.0f32;
        for t in &sink.triangles {
            for (a, b) in [(t.x, t.y), (t.y, t.z), (t.z, t.x)] {
                let d = sink.vertices[a as usize].position.distance(sink.vertices[b as usize].position);
                min = min.min(d);
                max = max.max(d);
            }
        }
        max / min
    }
    assert!(edge_ratio::<GeoOctasphere>() < edge_ratio::<Octasphere>());
}

#[test]
fn test_mesh_kind_serde_names() {
    #[derive(Deserialize)]
    struct Wrapper {
        kind: MeshKind,
    }
    let parsed: Wrapper = toml::from_str("kind = \"geo_icosphere\"").unwrap();
    assert_eq!(parsed.kind, MeshKind::GeoIcosphere);
    assert!(MeshKind::SharedTriangleGrid.is_plane());
    assert!(!MeshKind::UvSphere.is_plane());
    assert_eq!(MeshKind::ALL.len(), 12);
}
