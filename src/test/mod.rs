use std::collections::HashMap;

use crate::{signed_area, Vec2};

mod fixtures;
mod monotone;

pub(crate) fn points(coords: &[(f64, f64)]) -> Vec<[f64; 2]> {
    coords.iter().map(|&(x, y)| [x, y]).collect()
}

pub(crate) fn vecs(coords: &[(f64, f64)]) -> Vec<Vec2> {
    coords.iter().map(|&(x, y)| Vec2::new(x, y)).collect()
}

pub(crate) fn reversed(points: &[[f64; 2]]) -> Vec<[f64; 2]> {
    points.iter().rev().copied().collect()
}

pub(crate) fn triangle_area(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> f64 {
    0.5 * ((b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1]))
}

pub(crate) fn total_area(points: &[[f64; 2]], indices: &[usize]) -> f64 {
    indices
        .chunks(3)
        .map(|t| triangle_area(points[t[0]], points[t[1]], points[t[2]]))
        .sum()
}

pub(crate) fn polygon_area(points: &[[f64; 2]]) -> f64 {
    let ring: Vec<Vec2> = points.iter().copied().map(Vec2::from).collect();
    signed_area(&ring).abs()
}

/// Checks that `indices` is a triangulation of the ring `points`: the right
/// number of counter-clockwise triangles, covering the polygon area, with
/// every boundary edge used once and every diagonal shared by two triangles.
pub(crate) fn assert_triangulation(points: &[[f64; 2]], indices: &[usize]) {
    let n = points.len();
    assert_eq!(indices.len(), 3 * (n - 2));
    assert!(indices.iter().all(|&i| i < n));

    let expected = polygon_area(points);
    for t in indices.chunks(3) {
        let area = triangle_area(points[t[0]], points[t[1]], points[t[2]]);
        assert!(area > -1e-9, "triangle {:?} is clockwise ({})", t, area);
    }
    let covered = total_area(points, indices);
    assert!(
        (covered - expected).abs() <= 1e-6 * expected.max(1.),
        "covered {} but polygon area is {}",
        covered,
        expected
    );

    let mut uses: HashMap<(usize, usize), usize> = HashMap::new();
    for t in indices.chunks(3) {
        for (a, b) in [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])] {
            *uses.entry((a.min(b), a.max(b))).or_default() += 1;
        }
    }
    for i in 0..n {
        let j = (i + 1) % n;
        assert_eq!(uses.remove(&(i.min(j), i.max(j))), Some(1), "edge {}-{}", i, j);
    }
    assert_eq!(uses.len(), n - 3);
    assert!(uses.values().all(|&count| count == 2));
}

pub(crate) const SQUARE: [(f64, f64); 4] = [(0., 0.), (10., 0.), (10., 10.), (0., 10.)];

/// One split vertex at (4, 5) and one merge vertex at (4, 8).
pub(crate) const W: [(f64, f64); 6] = [
    (0., 10.),
    (2., 0.),
    (4., 5.),
    (6., 0.),
    (8., 10.),
    (4., 8.),
];
