//! Half-edge mesh over a single polygon ring.
//!
//! Vertices and half-edges live in two append-only arenas and refer to each
//! other by index. Half-edges are always allocated in pairs, so the twin of
//! edge `e` is `e ^ 1`.
//!
//! The interior boundary loop is kept counter-clockwise: the interior lies to
//! the left of every edge when following `next`. Consequently the radial step
//! `next(twin(e))` visits the edges leaving a vertex in clockwise order.

use std::{cmp::Ordering, collections::VecDeque, f64::consts::TAU};

use snafu::{ensure, OptionExt};
use tracing::trace;

use crate::{
    event::{sweep_heights, sweep_order},
    triangulator::{InvalidPolygonSnafu, Tolerance, TriangulationError},
    vec2::{signed_area, Vec2},
};

pub(crate) type VertexIndex = usize;
pub(crate) type EdgeIndex = usize;

#[derive(Clone, Debug)]
pub(crate) struct Vertex {
    pub(crate) pos: Vec2,
    /// Any half-edge leaving this vertex on the interior side.
    pub(crate) outgoing: EdgeIndex,
    pub(crate) is_merge: bool,
}

#[derive(Clone, Debug)]
pub(crate) struct HalfEdge {
    pub(crate) origin: VertexIndex,
    pub(crate) next: EdgeIndex,
    pub(crate) prev: EdgeIndex,
    /// Direction from origin to destination, in `[0, 2π)`.
    pub(crate) angle: f64,
}

#[derive(Clone, Debug)]
pub(crate) struct Mesh {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) edges: Vec<HalfEdge>,
    /// A boundary edge on the interior side of the original ring.
    pub(crate) start: EdgeIndex,
    pub(crate) tolerance: Tolerance,
}

#[inline(always)]
pub(crate) fn twin(e: EdgeIndex) -> EdgeIndex {
    e ^ 1
}

impl Mesh {
    /// Builds the two-face mesh of a ring of at least three points.
    ///
    /// Boundary edge `i` runs from point `i` to point `i + 1`; its pair is
    /// `2 * i` (forward) and `2 * i + 1` (backward). Vertex heights are
    /// levelled with [`sweep_heights`] before anything else reads them.
    pub(crate) fn from_polygon(points: &[Vec2], tolerance: Tolerance) -> Self {
        let n = points.len();
        let heights = sweep_heights(points, tolerance.epsilon);
        let points: Vec<Vec2> = points
            .iter()
            .zip(heights)
            .map(|(point, y)| Vec2::new(point.x, y))
            .collect();
        let mut mesh = Self {
            vertices: points
                .iter()
                .enumerate()
                .map(|(i, &pos)| Vertex {
                    pos,
                    outgoing: 2 * i,
                    is_merge: false,
                })
                .collect(),
            edges: Vec::with_capacity(4 * n),
            start: 0,
            tolerance,
        };

        for i in 0..n {
            let forward = mesh.push_pair(i, (i + 1) % n);
            let before = (i + n - 1) % n;
            let after = (i + 1) % n;
            mesh.edges[forward].next = 2 * after;
            mesh.edges[forward].prev = 2 * before;
            mesh.edges[twin(forward)].next = 2 * before + 1;
            mesh.edges[twin(forward)].prev = 2 * after + 1;
        }

        // The closing edge runs from the last point back to the first. Its
        // forward half is on the interior loop when the ring is counter-clockwise.
        let closing = 2 * (n - 1);
        mesh.start = if signed_area(&points) > 0. {
            closing
        } else {
            twin(closing)
        };

        let mut e = mesh.start;
        loop {
            let origin = mesh.edges[e].origin;
            mesh.vertices[origin].outgoing = e;
            e = mesh.edges[e].next;
            if e == mesh.start {
                break;
            }
        }

        mesh
    }

    /// Appends an unlinked half-edge pair from `a` to `b` and returns the
    /// index of the `a -> b` half.
    fn push_pair(&mut self, a: VertexIndex, b: VertexIndex) -> EdgeIndex {
        let index = self.edges.len();
        let snap = self.tolerance.axis_snap;
        let (pa, pb) = (self.vertices[a].pos, self.vertices[b].pos);
        self.edges.push(HalfEdge {
            origin: a,
            next: index,
            prev: index,
            angle: (pb - pa).direction(snap),
        });
        self.edges.push(HalfEdge {
            origin: b,
            next: index + 1,
            prev: index + 1,
            angle: (pa - pb).direction(snap),
        });
        index
    }

    pub(crate) fn origin(&self, e: EdgeIndex) -> VertexIndex {
        self.edges[e].origin
    }

    pub(crate) fn dest(&self, e: EdgeIndex) -> VertexIndex {
        self.edges[twin(e)].origin
    }

    pub(crate) fn next(&self, e: EdgeIndex) -> EdgeIndex {
        self.edges[e].next
    }

    pub(crate) fn pos(&self, v: VertexIndex) -> Vec2 {
        self.vertices[v].pos
    }

    pub(crate) fn outgoing(&self, v: VertexIndex) -> EdgeIndex {
        self.vertices[v].outgoing
    }

    /// Next edge leaving the same vertex, turning clockwise.
    pub(crate) fn radial_next(&self, e: EdgeIndex) -> EdgeIndex {
        self.edges[twin(e)].next
    }

    /// Boundary edge arriving at `v` just before its representative outgoing
    /// edge. Only meaningful while no diagonal touches `v`.
    pub(crate) fn incoming(&self, v: VertexIndex) -> EdgeIndex {
        twin(self.radial_next(self.outgoing(v)))
    }

    pub(crate) fn compare(&self, a: VertexIndex, b: VertexIndex) -> Ordering {
        sweep_order(self.pos(a), self.pos(b))
    }

    /// True when `a` comes strictly before `b` in the top-to-bottom sweep.
    pub(crate) fn precedes(&self, a: VertexIndex, b: VertexIndex) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    pub(crate) fn face_walk(&self, start: EdgeIndex) -> FaceWalk<'_> {
        FaceWalk {
            mesh: self,
            start,
            current: Some(start),
        }
    }

    /// Inserts a diagonal between two vertices and returns the `a -> b` half.
    ///
    /// Each half is spliced into the radial cycle of its origin at the position
    /// given by its angle, which keeps every face boundary simple.
    pub(crate) fn add_diagonal(
        &mut self,
        a: VertexIndex,
        b: VertexIndex,
    ) -> Result<EdgeIndex, TriangulationError> {
        trace!(from = a, to = b, "insert diagonal");
        let e = self.push_pair(a, b);
        self.splice(e)?;
        self.splice(twin(e))?;
        Ok(e)
    }

    fn splice(&mut self, e: EdgeIndex) -> Result<(), TriangulationError> {
        let origin = self.edges[e].origin;
        let angle = self.edges[e].angle;
        let before = self
            .insertion_slot(origin, angle)
            .context(InvalidPolygonSnafu)?;
        let after = self.radial_next(before);

        self.edges[twin(e)].next = after;
        self.edges[after].prev = twin(e);
        self.edges[twin(before)].next = e;
        self.edges[e].prev = twin(before);
        Ok(())
    }

    /// Finds the edge leaving `v` directly counter-clockwise of `angle`, that
    /// is the edge `r` such that `angle` lies strictly inside the clockwise
    /// sweep from `r` to `radial_next(r)`.
    fn insertion_slot(&self, v: VertexIndex, angle: f64) -> Option<EdgeIndex> {
        let first = self.outgoing(v);
        let mut r = first;
        loop {
            let w = self.radial_next(r);
            if w == r {
                return Some(r);
            }
            let mut span = (self.edges[r].angle - self.edges[w].angle).rem_euclid(TAU);
            if span == 0. {
                span = TAU;
            }
            let offset = (self.edges[r].angle - angle).rem_euclid(TAU);
            if offset > 0. && offset < span {
                return Some(r);
            }
            r = w;
            if r == first {
                return None;
            }
        }
    }

    /// One representative edge per bounded face.
    ///
    /// Faces are found by a breadth-first search over twins starting on the
    /// exterior loop, which is the first face found and is dropped.
    pub(crate) fn faces(&self) -> Vec<EdgeIndex> {
        let mut visited = vec![false; self.edges.len()];
        let mut work = VecDeque::from([twin(self.start)]);
        let mut faces = vec![];
        while let Some(first) = work.pop_front() {
            if visited[first] {
                continue;
            }
            faces.push(first);
            let mut e = first;
            loop {
                visited[e] = true;
                if !visited[twin(e)] {
                    work.push_back(twin(e));
                }
                e = self.edges[e].next;
                if e == first {
                    break;
                }
            }
        }
        faces.remove(0);
        faces
    }

    /// Flat list of vertex triples, one per bounded face.
    pub(crate) fn triangles(&self) -> Result<Vec<usize>, TriangulationError> {
        let faces = self.faces();
        let mut triangles = Vec::with_capacity(faces.len() * 3);
        for face in faces {
            let start = triangles.len();
            triangles.extend(self.face_walk(face).map(|e| self.origin(e)));
            ensure!(triangles.len() - start == 3, InvalidPolygonSnafu);
        }
        Ok(triangles)
    }
}

/// Iterates the half-edges of one face boundary, following `next`.
pub(crate) struct FaceWalk<'a> {
    mesh: &'a Mesh,
    start: EdgeIndex,
    current: Option<EdgeIndex>,
}

impl<'a> Iterator for FaceWalk<'a> {
    type Item = EdgeIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let e = self.current?;
        let next = self.mesh.next(e);
        self.current = if next == self.start { None } else { Some(next) };
        Some(e)
    }
}
