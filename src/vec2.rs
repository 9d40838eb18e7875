use std::{
    f64::consts::TAU,
    ops::{Add, Mul, Sub},
};

#[repr(C)]
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0., 0.);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f64 {
        self.dot(*self).sqrt()
    }

    pub fn dot(&self, rhs: Vec2) -> f64 {
        (self.x * rhs.x) + (self.y * rhs.y)
    }

    pub fn cross(&self, rhs: Vec2) -> f64 {
        (self.x * rhs.y) - (self.y * rhs.x)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Direction of this vector in radians, in `[0, 2π)`.
    ///
    /// Components smaller than `snap` are treated as exactly zero, so nearly
    /// axis-aligned vectors get exactly axis-aligned angles.
    pub(crate) fn direction(&self, snap: f64) -> f64 {
        let dx = if self.x.abs() < snap { 0. } else { self.x };
        let dy = if self.y.abs() < snap { 0. } else { self.y };
        let angle = dy.atan2(dx);
        if angle < 0. {
            // -0.0 and tiny negatives can round up to TAU
            let wrapped = angle + TAU;
            if wrapped >= TAU {
                0.
            } else {
                wrapped
            }
        } else {
            angle
        }
    }
}

/// Shoelace area of a closed ring, positive when counter-clockwise.
pub fn signed_area(points: &[Vec2]) -> f64 {
    let mut sum = 0.;
    let mut prev = match points.last() {
        Some(last) => *last,
        None => return 0.,
    };
    for point in points.iter() {
        sum += prev.cross(*point);
        prev = *point;
    }
    sum * 0.5
}

impl From<[f64; 2]> for Vec2 {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Vec2> for [f64; 2] {
    fn from(v: Vec2) -> Self {
        [v.x, v.y]
    }
}

impl Add<Vec2> for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x.add(rhs.x),
            y: self.y.add(rhs.y),
        }
    }
}

impl Sub<Vec2> for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x.sub(rhs.x),
            y: self.y.sub(rhs.y),
        }
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self {
            x: self.x.mul(rhs),
            y: self.y.mul(rhs),
        }
    }
}
