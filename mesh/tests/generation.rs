//! End-to-end generation through every sink

use glam::Vec3;
use strata_mesh::generators::{CubeSphere, GeoIcosphere, Octasphere, SharedTriangleGrid, UvSphere};
use strata_mesh::{
    MeshGenerator, MeshJob, MeshStreams, MultiStream, PackedStream, PositionStream, SingleStream,
};

#[test]
fn test_cube_sphere_counts_and_radius() {
    let job = MeshJob::<CubeSphere>::new(2).unwrap();
    let mut streams = SingleStream::new();
    job.run(&mut streams);

    assert_eq!(streams.vertices.len(), 96);
    assert_eq!(streams.indices().len(), 144);
    for i in 0..streams.vertices.len() {
        let v = streams.vertex(i);
        assert!((v.position.length() - 1.0).abs() < 1e-4, "{}", v.position);
    }
    assert!(streams.indices().iter().all(|&i| (i as usize) < 96));
}

#[test]
fn test_parallel_matches_serial_for_every_sink() {
    fn compare<S: MeshStreams + Default + PartialEq + std::fmt::Debug>() {
        let job = MeshJob::<GeoIcosphere>::new(6).unwrap();
        let mut serial = S::default();
        let mut parallel = S::default();
        job.run(&mut serial);
        job.run_parallel(&mut parallel);
        assert_eq!(serial, parallel);
    }
    compare::<SingleStream>();
    compare::<MultiStream>();
    compare::<PositionStream>();
    compare::<PackedStream>();
}

#[test]
fn test_sinks_agree_on_geometry() {
    let job = MeshJob::<Octasphere>::new(5).unwrap();
    let mut single = SingleStream::new();
    let mut multi = MultiStream::new();
    let mut positions = PositionStream::new();
    job.run_parallel(&mut single);
    job.run_parallel(&mut multi);
    job.run_parallel(&mut positions);

    assert_eq!(single.indices(), multi.indices());
    assert_eq!(single.indices(), positions.indices());
    for i in 0..single.vertices.len() {
        assert_eq!(single.vertex(i), multi.vertex(i));
        assert_eq!(single.vertex(i).position, positions.positions[i]);
    }
}

#[test]
fn test_packed_positions_within_half_precision() {
    let job = MeshJob::<UvSphere>::new(8).unwrap();
    let mut single = SingleStream::new();
    let mut packed = PackedStream::new();
    job.run(&mut single);
    job.run(&mut packed);

    for (i, p) in packed.vertices.iter().enumerate() {
        let expected = single.vertex(i);
        let unpacked = p.unpack();
        assert!(unpacked.position.abs_diff_eq(expected.position, 1e-3));
        assert!(unpacked.normal.dot(expected.normal) > 0.999);
        assert_eq!(unpacked.tangent.w, expected.tangent.w);
    }
}

#[test]
fn test_grid_vertices_inside_bounds() {
    let job = MeshJob::<SharedTriangleGrid>::new(10)
        .unwrap()
        .with_extra_bounds_extents(Vec3::new(0.0, 0.25, 0.0));
    let mut streams = PositionStream::new();
    job.run(&mut streams);

    assert_eq!(streams.bounds.extents.y, 0.25);
    let bounds = job.generator().bounds();
    assert!(streams.positions.iter().all(|&p| bounds.contains(p, 1e-5)));
}
