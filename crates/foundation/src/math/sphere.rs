//! Geographic degrees to points on a render sphere.
//!
//! Convention shared by outlines, pick surfaces and camera centering:
//! +Y is the north pole and longitude 0°, latitude 0° lands on +X. The camera
//! looks down -Z, so the camera-facing reference direction is +Z.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use super::Vec3;

/// Longitude/latitude pair in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LonLat {
    pub lon_deg: f64,
    pub lat_deg: f64,
}

impl LonLat {
    pub fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self { lon_deg, lat_deg }
    }
}

/// Projects geographic degrees onto a sphere of `radius` centered at the origin.
pub fn project(lon_deg: f64, lat_deg: f64, radius: f64) -> Vec3 {
    let phi = (90.0 - lat_deg) * PI / 180.0;
    let theta = (lon_deg + 180.0) * PI / 180.0;
    Vec3::new(
        -radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

/// Scene rotation `(x, y)` that brings `(lon, lat)` onto the camera-facing +Z axis.
///
/// Rotations are applied Y first, then X (the scene transform is `Rx * Ry`).
pub fn facing_rotation(lon_deg: f64, lat_deg: f64) -> (f64, f64) {
    let rot_y = -lon_deg.to_radians() - FRAC_PI_2;
    let rot_x = lat_deg.to_radians();
    (rot_x, rot_y)
}

/// Returns the angle equivalent to `target` that lies closest to `current`.
pub fn nearest_equivalent_angle(current: f64, target: f64) -> f64 {
    let delta = (target - current).rem_euclid(TAU);
    if delta > PI {
        current + delta - TAU
    } else {
        current + delta
    }
}

#[cfg(test)]
mod tests {
    use super::{facing_rotation, nearest_equivalent_angle, project};
    use crate::math::Vec3;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn prime_meridian_equator_is_plus_x() {
        let p = project(0.0, 0.0, 1.0);
        assert_close(p.x, 1.0, 1e-12);
        assert_close(p.y, 0.0, 1e-12);
        assert_close(p.z, 0.0, 1e-12);
    }

    #[test]
    fn north_pole_is_plus_y() {
        let p = project(37.0, 90.0, 2.0);
        assert_close(p.y, 2.0, 1e-12);
    }

    #[test]
    fn projected_points_lie_on_the_sphere() {
        let mut lon = -180.0;
        while lon <= 180.0 {
            let mut lat = -90.0;
            while lat <= 90.0 {
                let p = project(lon, lat, 1.001);
                assert_close(p.length(), 1.001, 1e-12);
                lat += 7.5;
            }
            lon += 11.25;
        }
    }

    #[test]
    fn facing_rotation_brings_point_to_plus_z() {
        for (lon, lat) in [(0.0, 0.0), (-74.0, 40.7), (139.7, 35.7), (151.2, -33.9)] {
            let (rx, ry) = facing_rotation(lon, lat);
            let p = project(lon, lat, 1.0).rotate_y(ry).rotate_x(rx);
            let d = (p - Vec3::new(0.0, 0.0, 1.0)).length();
            assert!(d < 1e-9, "({lon}, {lat}) landed at {p:?}");
        }
    }

    #[test]
    fn nearest_angle_takes_short_way_round() {
        let pi = std::f64::consts::PI;
        assert_close(nearest_equivalent_angle(0.0, 1.5 * pi), -0.5 * pi, 1e-12);
        assert_close(nearest_equivalent_angle(10.0 * pi, 0.25 * pi), 10.25 * pi, 1e-9);
        assert_close(nearest_equivalent_angle(1.0, 1.0), 1.0, 1e-12);
    }
}
