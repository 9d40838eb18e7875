use std::{cmp::Ordering, f64::consts::PI, f64::consts::TAU};

use crate::{
    mesh::{Mesh, VertexIndex},
    vec2::Vec2,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EventKind {
    Start,
    End,
    Split,
    Merge,
    Regular,
}

/// Sweep order: top to bottom, ties broken left to right.
///
/// `Less` means `a` is visited before `b`. This is a total order over
/// finite points, so heights that should count as equal must already be
/// snapped together by [`sweep_heights`].
pub(crate) fn sweep_order(a: Vec2, b: Vec2) -> Ordering {
    b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x))
}

/// Height of each point on the sweep line.
///
/// Points are grouped top to bottom into levels: a point joins the level
/// above it when its height is within `epsilon` of the previous point.
/// Every point of a level takes the height of the level's topmost point.
pub(crate) fn sweep_heights(points: &[Vec2], epsilon: f64) -> Vec<f64> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| points[b].y.total_cmp(&points[a].y));

    let mut heights = vec![0.; points.len()];
    let mut level = 0.;
    let mut previous: Option<f64> = None;
    for i in order {
        let y = points[i].y;
        match previous {
            Some(above) if above - y < epsilon => {}
            _ => level = y,
        }
        heights[i] = level;
        previous = Some(y);
    }
    heights
}

/// Turning angle at `center` when walking `prev -> center -> next`, in
/// `[0, 2π)`. Below π the walk turns left.
pub(crate) fn turn_angle(prev: Vec2, center: Vec2, next: Vec2, snap: f64) -> f64 {
    let incoming = (center - prev).direction(snap);
    let outgoing = (next - center).direction(snap);
    (outgoing - incoming).rem_euclid(TAU)
}

/// Classifies `v` from its boundary neighbours and records merge vertices
/// on the mesh. Must run before any diagonal is attached to `v`.
pub(crate) fn classify(mesh: &mut Mesh, v: VertexIndex) -> EventKind {
    let out = mesh.outgoing(v);
    let next = mesh.dest(out);
    let prev = mesh.dest(mesh.radial_next(out));

    let angle = turn_angle(
        mesh.pos(prev),
        mesh.pos(v),
        mesh.pos(next),
        mesh.tolerance.axis_snap,
    );

    // an angle of exactly π is collinear and falls through to regular
    if mesh.precedes(v, prev) && mesh.precedes(v, next) {
        if angle < PI {
            return EventKind::Start;
        } else if angle > PI {
            return EventKind::Split;
        }
    } else if mesh.precedes(prev, v) && mesh.precedes(next, v) {
        if angle < PI {
            return EventKind::End;
        } else if angle > PI {
            mesh.vertices[v].is_merge = true;
            return EventKind::Merge;
        }
    }
    EventKind::Regular
}
