use super::{vecs, SQUARE, W};
use crate::{
    mesh::Mesh,
    monotone::{Chain, MonotoneTriangulator},
    partition::Partitioner,
    triangulator::Tolerance,
};

#[test]
fn chains_of_a_square() {
    let mesh = Mesh::from_polygon(&vecs(&SQUARE), Tolerance::default());
    let mut triangulator = MonotoneTriangulator::default();
    triangulator.load_chains(&mesh, mesh.start);

    let sequence: Vec<(usize, Chain)> = triangulator
        .sequence
        .iter()
        .map(|c| (c.vertex, c.chain))
        .collect();
    assert_eq!(
        sequence,
        [
            (3, Chain::Left),
            (2, Chain::Right),
            (0, Chain::Left),
            (1, Chain::Right),
        ]
    );
}

#[test]
fn monotone_face_becomes_triangles() {
    let zigzag = vecs(&[
        (0., 0.),
        (4., -1.),
        (8., 0.),
        (7., 3.),
        (9., 6.),
        (6., 9.),
        (4., 12.),
        (3., 9.),
        (1., 7.),
        (2., 4.),
    ]);
    let mut mesh = Mesh::from_polygon(&zigzag, Tolerance::default());
    let start = mesh.start;
    let mut triangulator = MonotoneTriangulator::default();
    triangulator.triangulate_face(&mut mesh, start).unwrap();

    // n - 3 diagonals for n = 10
    assert_eq!(mesh.edges.len(), 2 * 10 + 2 * 7);
    let faces = mesh.faces();
    assert_eq!(faces.len(), 8);
    assert!(faces.iter().all(|&f| mesh.face_walk(f).count() == 3));
}

#[test]
fn triangle_face_is_left_alone() {
    let mut mesh = Mesh::from_polygon(&vecs(&[(0., 0.), (1., 0.), (0., 1.)]), Tolerance::default());
    let start = mesh.start;
    MonotoneTriangulator::default()
        .triangulate_face(&mut mesh, start)
        .unwrap();
    assert_eq!(mesh.edges.len(), 6);
}

#[test]
fn every_partition_face_is_triangulated() {
    let mut mesh = Mesh::from_polygon(&vecs(&W), Tolerance::default());
    Partitioner::new(&mut mesh).sweep().unwrap();

    let mut triangulator = MonotoneTriangulator::default();
    for face in mesh.faces() {
        triangulator.triangulate_face(&mut mesh, face).unwrap();
    }
    let triangles = mesh.triangles().unwrap();
    assert_eq!(triangles.len(), 12);
}
