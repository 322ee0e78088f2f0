//! Outline and pick-surface construction from geographic rings.
//!
//! Pick surfaces are a triangle fan from each ring's centroid. For concave
//! rings the fan spills outside the true border and can overlap neighbours;
//! that is accepted for pointer resolution.

use foundation::bounds::BoundingSphere;
use foundation::math::{LonLat, Vec3, project};

/// A closed polyline of `(lon, lat)` degrees.
pub type Ring = Vec<LonLat>;

/// Line segments of every ring of a country, in sphere-local space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutlineGeometry {
    pub segments: Vec<[Vec3; 2]>,
}

/// Invisible hit-test mesh of a country, in sphere-local space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickSurface {
    pub triangles: Vec<[Vec3; 3]>,
    pub bounds: Option<BoundingSphere>,
}

impl PickSurface {
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

/// Whether a ring can contribute at least one outline segment.
pub fn is_usable_ring(ring: &[LonLat]) -> bool {
    ring.len() >= 2
}

pub fn build_outline(rings: &[Ring], radius: f64) -> OutlineGeometry {
    let mut segments = Vec::new();
    for ring in rings.iter().filter(|r| is_usable_ring(r)) {
        let projected: Vec<Vec3> = ring
            .iter()
            .map(|p| project(p.lon_deg, p.lat_deg, radius))
            .collect();
        segments.extend(projected.windows(2).map(|w| [w[0], w[1]]));
    }
    OutlineGeometry { segments }
}

pub fn build_pick_surface(rings: &[Ring], radius: f64) -> PickSurface {
    let mut triangles = Vec::new();
    for ring in rings.iter().filter(|r| r.len() >= 3) {
        let projected: Vec<Vec3> = ring
            .iter()
            .map(|p| project(p.lon_deg, p.lat_deg, radius))
            .collect();
        let sum = projected.iter().fold(Vec3::ZERO, |acc, v| acc + *v);
        let centroid = sum * (1.0 / projected.len() as f64);
        triangles.extend(projected.windows(2).map(|w| [centroid, w[0], w[1]]));
    }

    let vertices: Vec<Vec3> = triangles.iter().flat_map(|t| t.iter().copied()).collect();
    let bounds = BoundingSphere::from_points(&vertices);
    PickSurface { triangles, bounds }
}

#[cfg(test)]
mod tests {
    use super::{Ring, build_outline, build_pick_surface};
    use foundation::math::{LonLat, project};

    fn square() -> Ring {
        vec![
            LonLat::new(0.0, 0.0),
            LonLat::new(10.0, 0.0),
            LonLat::new(10.0, 10.0),
            LonLat::new(0.0, 10.0),
            LonLat::new(0.0, 0.0),
        ]
    }

    #[test]
    fn outline_has_one_segment_per_consecutive_pair() {
        let outline = build_outline(&[square(), vec![LonLat::new(5.0, 5.0)]], 1.001);
        assert_eq!(outline.segments.len(), 4);
        assert_eq!(outline.segments[0][0], project(0.0, 0.0, 1.001));
        assert_eq!(outline.segments[3][1], project(0.0, 0.0, 1.001));
    }

    #[test]
    fn pick_surface_is_a_centroid_fan() {
        let surface = build_pick_surface(&[square()], 1.0);
        assert_eq!(surface.triangles.len(), 4);
        let centroid = surface.triangles[0][0];
        assert!(surface.triangles.iter().all(|t| t[0] == centroid));
        // The centroid sits inside the sphere (chord average), never outside.
        assert!(centroid.length() < 1.0);
        let bounds = surface.bounds.expect("bounds");
        for t in &surface.triangles {
            for v in t {
                assert!((*v - bounds.center).length() <= bounds.radius + 1e-12);
            }
        }
    }

    #[test]
    fn two_point_rings_outline_but_do_not_pick() {
        let line = vec![LonLat::new(0.0, 0.0), LonLat::new(1.0, 1.0)];
        assert_eq!(build_outline(&[line.clone()], 1.0).segments.len(), 1);
        let surface = build_pick_surface(&[line], 1.0);
        assert!(surface.is_empty());
        assert!(surface.bounds.is_none());
    }
}
