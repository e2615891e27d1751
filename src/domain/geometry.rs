// Ground-plane vector math used by reconciliation and motion stepping.

use std::ops::{Add, Mul, Sub};

/// 3D position/direction with y-up convention; entities live on the y = 0 plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

// Matches the tolerance the motion loop uses to decide "arrived at target".
pub const POSITION_EPSILON: f32 = 1e-5;

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Builds a position on the ground plane from wire-format [x, z] pairs.
    pub const fn ground(x: f32, z: f32) -> Self {
        Self { x, y: 0.0, z }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn distance(self, other: Self) -> f32 {
        (other - self).length()
    }

    /// Unit-length copy; zero-length vectors stay zero instead of producing NaN.
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len <= POSITION_EPSILON {
            return Self::ZERO;
        }
        self * (1.0 / len)
    }

    /// Linear interpolation with `t` clamped to [0, 1], so overshooting time
    /// never moves past the target.
    pub fn lerp(from: Self, to: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        from + (to - from) * t
    }

    pub fn approx_eq(self, other: Self) -> bool {
        self.distance(other) <= POSITION_EPSILON
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Tests whether the ground-plane segment `from -> to` crosses an axis-aligned
/// rectangle centered at `center` with the given half extents on x/z.
///
/// A segment that *starts* inside the rectangle does not count as a hit, so an
/// entity already overlapping an obstacle can still move out of it.
pub fn segment_intersects_rect_xz(
    from: Vec3,
    to: Vec3,
    center: Vec3,
    half_x: f32,
    half_z: f32,
) -> bool {
    let min_x = center.x - half_x;
    let max_x = center.x + half_x;
    let min_z = center.z - half_z;
    let max_z = center.z + half_z;

    let starts_inside =
        from.x >= min_x && from.x <= max_x && from.z >= min_z && from.z <= max_z;
    if starts_inside {
        return false;
    }

    // Slab test on both ground-plane axes.
    let dx = to.x - from.x;
    let dz = to.z - from.z;
    let mut t_min = 0.0f32;
    let mut t_max = 1.0f32;

    for (origin, delta, slab_min, slab_max) in [
        (from.x, dx, min_x, max_x),
        (from.z, dz, min_z, max_z),
    ] {
        if delta.abs() < f32::EPSILON {
            // Segment runs parallel to this slab; it must already be within it.
            if origin < slab_min || origin > slab_max {
                return false;
            }
        } else {
            let t1 = (slab_min - origin) / delta;
            let t2 = (slab_max - origin) / delta;
            let (near, far) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
            t_min = t_min.max(near);
            t_max = t_max.min(far);
            if t_min > t_max {
                return false;
            }
        }
    }

    true
}
