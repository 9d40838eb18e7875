mod event;
mod mesh;
mod monotone;
mod partition;
mod triangulator;
mod vec2;

pub use {
    triangulator::{triangulate, Tolerance, TriangulationError, Triangulator},
    vec2::{signed_area, Vec2},
};

#[cfg(test)]
mod test;
