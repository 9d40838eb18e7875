use snafu::{ensure, Snafu};
use tracing::debug;

use crate::{mesh::Mesh, monotone::MonotoneTriangulator, partition::Partitioner, vec2::Vec2};

/// Floating point tolerances shared by the vertex order, the event
/// classifier and the half-edge angles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerance {
    /// Vertices whose heights are closer than this share one sweep line.
    /// On the same line, vertices closer than this in x coincide.
    pub epsilon: f64,
    /// Direction components smaller than this are snapped to zero before
    /// their angle is taken.
    pub axis_snap: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            epsilon: 1e-6,
            axis_snap: 1e-7,
        }
    }
}

#[derive(Debug, Snafu, Clone, Copy, PartialEq, Eq)]
#[snafu(visibility(pub(crate)))]
pub enum TriangulationError {
    #[snafu(display("a polygon needs at least three points"))]
    Incomplete,
    #[snafu(display("polygon is not simple or is degenerate"))]
    InvalidPolygon,
}

/// Triangulates one simple polygon given as a closed ring of points.
///
/// The winding of the ring does not matter. Each consecutive triple of the
/// result names one counter-clockwise triangle by indices into `points`.
pub fn triangulate(points: &[[f64; 2]]) -> Result<Vec<usize>, TriangulationError> {
    let points: Vec<Vec2> = points.iter().copied().map(Vec2::from).collect();
    run(&points, Tolerance::default())
}

#[derive(Default)]
pub struct Triangulator {
    contour: Vec<Vec2>,
    tolerance: Tolerance,
}

impl Triangulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(tolerance: Tolerance) -> Self {
        Self {
            contour: vec![],
            tolerance,
        }
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// Replaces the polygon ring. The last point connects back to the first.
    pub fn set_contour(&mut self, points: Vec<[f64; 2]>) -> Result<(), TriangulationError> {
        ensure!(points.len() >= 3, IncompleteSnafu);
        self.contour = points.into_iter().map(Vec2::from).collect();
        Ok(())
    }

    pub fn triangulate(&self) -> Result<Vec<usize>, TriangulationError> {
        run(&self.contour, self.tolerance)
    }

    pub fn triangles(&self) -> Result<Vec<[[f64; 2]; 3]>, TriangulationError> {
        let indices = self.triangulate()?;
        Ok(indices
            .chunks_exact(3)
            .map(|t| {
                [
                    self.contour[t[0]].into(),
                    self.contour[t[1]].into(),
                    self.contour[t[2]].into(),
                ]
            })
            .collect())
    }
}

fn run(points: &[Vec2], tolerance: Tolerance) -> Result<Vec<usize>, TriangulationError> {
    let n = points.len();
    validate(points).inspect_err(rejected(n, "validation"))?;

    let mut mesh = Mesh::from_polygon(points, tolerance);
    Partitioner::new(&mut mesh)
        .sweep()
        .inspect_err(rejected(n, "monotone partition"))?;

    let mut triangulator = MonotoneTriangulator::default();
    for face in mesh.faces() {
        triangulator
            .triangulate_face(&mut mesh, face)
            .inspect_err(rejected(n, "face triangulation"))?;
    }

    let triangles = mesh
        .triangles()
        .inspect_err(rejected(n, "triangle extraction"))?;
    debug!(points = n, triangles = triangles.len() / 3, "triangulated polygon");
    Ok(triangles)
}

fn validate(points: &[Vec2]) -> Result<(), TriangulationError> {
    ensure!(points.len() >= 3, IncompleteSnafu);
    ensure!(points.iter().all(Vec2::is_finite), InvalidPolygonSnafu);
    Ok(())
}

fn rejected(points: usize, stage: &'static str) -> impl Fn(&TriangulationError) {
    move |err: &TriangulationError| debug!(points, stage, %err, "polygon rejected")
}
