//! Linear-time triangulation of a single y-monotone face.

use crate::{
    mesh::{EdgeIndex, Mesh, VertexIndex},
    triangulator::TriangulationError,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Chain {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct ChainVertex {
    pub(crate) vertex: VertexIndex,
    pub(crate) chain: Chain,
}

/// Holds scratch buffers so consecutive faces reuse their allocations.
#[derive(Default)]
pub(crate) struct MonotoneTriangulator {
    pub(crate) sequence: Vec<ChainVertex>,
    stack: Vec<ChainVertex>,
}

impl MonotoneTriangulator {
    /// Splits the face starting at `face` into triangles by inserting
    /// diagonals into `mesh`.
    pub(crate) fn triangulate_face(
        &mut self,
        mesh: &mut Mesh,
        face: EdgeIndex,
    ) -> Result<(), TriangulationError> {
        self.load_chains(mesh, face);
        if self.sequence.len() <= 3 {
            return Ok(());
        }

        let last = self.sequence.len() - 1;
        self.stack.clear();
        self.stack.push(self.sequence[0]);
        self.stack.push(self.sequence[1]);

        for i in 2..last {
            let u = self.sequence[i];
            let top = match self.stack.last() {
                Some(&top) => top,
                None => break,
            };

            if u.chain != top.chain {
                // everything on the stack is visible from u
                while let Some(popped) = self.stack.pop() {
                    if !self.stack.is_empty() {
                        mesh.add_diagonal(u.vertex, popped.vertex)?;
                    }
                }
                self.stack.push(self.sequence[i - 1]);
                self.stack.push(u);
            } else {
                let mut popped = top;
                self.stack.pop();
                while let Some(&below) = self.stack.last() {
                    if !diagonal_inside(mesh, below, popped, u) {
                        break;
                    }
                    self.stack.pop();
                    popped = below;
                    mesh.add_diagonal(u.vertex, popped.vertex)?;
                }
                self.stack.push(popped);
                self.stack.push(u);
            }
        }

        let bottom = self.sequence[last];
        self.stack.pop();
        while let Some(popped) = self.stack.pop() {
            if !self.stack.is_empty() {
                mesh.add_diagonal(bottom.vertex, popped.vertex)?;
            }
        }
        Ok(())
    }

    /// Collects the face vertices tagged by chain and sorts them top to
    /// bottom. Walking forward from the topmost vertex descends the left
    /// chain; the bottommost vertex belongs to the right chain.
    pub(crate) fn load_chains(&mut self, mesh: &Mesh, face: EdgeIndex) {
        let mut top = face;
        let mut bottom = face;
        for e in mesh.face_walk(face) {
            if mesh.precedes(mesh.origin(e), mesh.origin(top)) {
                top = e;
            }
            if mesh.precedes(mesh.origin(bottom), mesh.origin(e)) {
                bottom = e;
            }
        }

        self.sequence.clear();
        let mut chain = Chain::Left;
        for e in mesh.face_walk(top) {
            if e == bottom {
                chain = Chain::Right;
            }
            self.sequence.push(ChainVertex {
                vertex: mesh.origin(e),
                chain,
            });
        }
        self.sequence
            .sort_by(|a, b| mesh.compare(a.vertex, b.vertex));
    }
}

/// Whether the diagonal from `u` to `below` stays inside the face, given
/// that `popped` sits between them on the same chain as `u`.
fn diagonal_inside(mesh: &Mesh, below: ChainVertex, popped: ChainVertex, u: ChainVertex) -> bool {
    let a = mesh.pos(below.vertex);
    let b = mesh.pos(popped.vertex);
    let c = mesh.pos(u.vertex);
    let turn = (b - a).cross(c - b);
    match u.chain {
        Chain::Left => turn > 0.,
        Chain::Right => turn < 0.,
    }
}
