//! Sweep-line decomposition of the polygon into y-monotone faces.

use std::collections::BTreeMap;

use snafu::{ensure, OptionExt};
use tracing::trace;

use crate::{
    event::{classify, EventKind},
    mesh::{EdgeIndex, Mesh, VertexIndex},
    triangulator::{InvalidPolygonSnafu, TriangulationError},
};

pub(crate) struct Partitioner<'a> {
    mesh: &'a mut Mesh,
    /// Active edges that have the interior on their right, with their helper.
    helpers: BTreeMap<EdgeIndex, VertexIndex>,
}

impl<'a> Partitioner<'a> {
    pub(crate) fn new(mesh: &'a mut Mesh) -> Self {
        Self {
            mesh,
            helpers: BTreeMap::new(),
        }
    }

    /// Visits every vertex top to bottom and inserts the diagonals that make
    /// every face y-monotone.
    pub(crate) fn sweep(mut self) -> Result<(), TriangulationError> {
        let queue = self.event_queue()?;
        for v in queue {
            let kind = classify(self.mesh, v);
            trace!(vertex = v, event = ?kind, "sweep event");
            match kind {
                EventKind::Start => self.handle_start(v),
                EventKind::End => self.handle_end(v)?,
                EventKind::Split => self.handle_split(v)?,
                EventKind::Merge => self.handle_merge(v)?,
                EventKind::Regular => self.handle_regular(v)?,
            }
        }
        Ok(())
    }

    /// Vertices in sweep order. Coincident vertices share a height, sort next
    /// to each other and are rejected.
    fn event_queue(&self) -> Result<Vec<VertexIndex>, TriangulationError> {
        let mesh = &*self.mesh;
        let mut queue: Vec<VertexIndex> = (0..mesh.vertices.len()).collect();
        queue.sort_by(|&a, &b| mesh.compare(a, b));
        for pair in queue.windows(2) {
            let (a, b) = (mesh.pos(pair[0]), mesh.pos(pair[1]));
            ensure!(
                a.y != b.y || (a.x - b.x).abs() >= mesh.tolerance.epsilon,
                InvalidPolygonSnafu
            );
        }
        Ok(queue)
    }

    fn handle_start(&mut self, v: VertexIndex) {
        self.helpers.insert(self.mesh.outgoing(v), v);
    }

    fn handle_end(&mut self, v: VertexIndex) -> Result<(), TriangulationError> {
        let incoming = self.mesh.incoming(v);
        self.close(v, incoming)
    }

    fn handle_split(&mut self, v: VertexIndex) -> Result<(), TriangulationError> {
        let left = self.edge_left_of(v)?;
        let helper = self.helper(left)?;
        self.mesh.add_diagonal(v, helper)?;
        self.helpers.insert(left, v);
        self.helpers.insert(self.mesh.outgoing(v), v);
        Ok(())
    }

    fn handle_merge(&mut self, v: VertexIndex) -> Result<(), TriangulationError> {
        let incoming = self.mesh.incoming(v);
        self.close(v, incoming)?;
        self.reassign_left(v)
    }

    fn handle_regular(&mut self, v: VertexIndex) -> Result<(), TriangulationError> {
        let incoming = self.mesh.incoming(v);
        if self.mesh.precedes(self.mesh.origin(incoming), v) {
            // descending chain, interior to the right
            self.close(v, incoming)?;
            self.helpers.insert(self.mesh.outgoing(v), v);
            Ok(())
        } else {
            self.reassign_left(v)
        }
    }

    /// Retires `edge`, connecting `v` to its helper first if that helper was
    /// a merge vertex.
    fn close(&mut self, v: VertexIndex, edge: EdgeIndex) -> Result<(), TriangulationError> {
        let helper = self.helper(edge)?;
        if self.mesh.vertices[helper].is_merge {
            self.mesh.add_diagonal(v, helper)?;
        }
        self.helpers.remove(&edge);
        Ok(())
    }

    /// Makes `v` the helper of the active edge directly to its left.
    fn reassign_left(&mut self, v: VertexIndex) -> Result<(), TriangulationError> {
        let left = self.edge_left_of(v)?;
        let helper = self.helper(left)?;
        if self.mesh.vertices[helper].is_merge {
            self.mesh.add_diagonal(v, helper)?;
        }
        self.helpers.insert(left, v);
        Ok(())
    }

    fn helper(&self, edge: EdgeIndex) -> Result<VertexIndex, TriangulationError> {
        self.helpers
            .get(&edge)
            .copied()
            .context(InvalidPolygonSnafu)
    }

    /// The active edge whose crossing with the horizontal line through `v`
    /// is closest to `v` on its left.
    fn edge_left_of(&self, v: VertexIndex) -> Result<EdgeIndex, TriangulationError> {
        let mesh = &*self.mesh;
        let pos = mesh.pos(v);
        let mut best: Option<(f64, EdgeIndex)> = None;
        for &edge in self.helpers.keys() {
            let x = match sweep_crossing(mesh, edge, pos.y) {
                Some(x) if x < pos.x => x,
                _ => continue,
            };
            if best.map_or(true, |(best_x, _)| x > best_x) {
                best = Some((x, edge));
            }
        }
        best.map(|(_, edge)| edge).context(InvalidPolygonSnafu)
    }
}

/// Leftmost x where `edge` meets the horizontal line at `y`, if it does.
///
/// Vertex heights are levelled when the mesh is built, so an endpoint on the
/// same sweep line as `y` matches it exactly.
pub(crate) fn sweep_crossing(mesh: &Mesh, edge: EdgeIndex, y: f64) -> Option<f64> {
    let a = mesh.pos(mesh.origin(edge));
    let b = mesh.pos(mesh.dest(edge));
    if !((a.y >= y && b.y <= y) || (a.y <= y && b.y >= y)) {
        return None;
    }
    if a.y == y {
        if b.y == y && b.x < a.x {
            return Some(b.x);
        }
        return Some(a.x);
    }
    if b.y == y {
        return Some(b.x);
    }
    Some(a.x + (b.x - a.x) / (b.y - a.y) * (y - a.y))
}
