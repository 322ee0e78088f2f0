//! Bounding volumes used to reject pick rays early.
use crate::math::Vec3;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f64,
}

impl BoundingSphere {
    pub fn new(center: Vec3, radius: f64) -> Self {
        BoundingSphere { center, radius }
    }

    /// Sphere around the centroid of `points`; `None` when `points` is empty.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let sum = points.iter().fold(Vec3::ZERO, |acc, p| acc + *p);
        let center = sum * (1.0 / points.len() as f64);
        let radius = points
            .iter()
            .map(|p| (*p - center).length())
            .fold(0.0, f64::max);
        Some(BoundingSphere { center, radius })
    }

    /// Whether the ray `origin + t * dir` (t >= 0, `dir` unit length) touches the sphere.
    pub fn intersects_ray(&self, origin: Vec3, dir: Vec3) -> bool {
        let oc = self.center - origin;
        let t_closest = oc.dot(dir);
        let r2 = self.radius * self.radius;
        let dist2 = oc.dot(oc);
        if t_closest < 0.0 {
            // Center behind the origin: only a hit if the origin is inside.
            return dist2 <= r2;
        }
        dist2 - t_closest * t_closest <= r2
    }
}

#[cfg(test)]
mod tests {
    use super::BoundingSphere;
    use crate::math::Vec3;

    #[test]
    fn encloses_all_points() {
        let pts = [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
        ];
        let s = BoundingSphere::from_points(&pts).expect("points");
        for p in pts {
            assert!((p - s.center).length() <= s.radius + 1e-12);
        }
        assert!(BoundingSphere::from_points(&[]).is_none());
    }

    #[test]
    fn ray_tests() {
        let s = BoundingSphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0);
        let origin = Vec3::ZERO;
        assert!(s.intersects_ray(origin, Vec3::new(0.0, 0.0, -1.0)));
        assert!(!s.intersects_ray(origin, Vec3::new(0.0, 0.0, 1.0)));
        assert!(!s.intersects_ray(origin, Vec3::new(1.0, 0.0, 0.0)));
        let inside = BoundingSphere::new(Vec3::new(0.0, 0.0, 0.5), 1.0);
        assert!(inside.intersects_ray(origin, Vec3::new(0.0, 0.0, -1.0)));
    }
}
