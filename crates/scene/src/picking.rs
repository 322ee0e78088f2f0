use foundation::math::Vec3;
use foundation::math::precision::stable_total_cmp_f64;

use crate::World;
use crate::entity::CountryId;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickHit {
    pub country: CountryId,
    pub distance: f64,
    /// Hit position in world (rotated) space.
    pub point: Vec3,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickOptions {
    pub max_distance: f64,
    /// Skip countries whose bounding sphere the ray misses. Never changes the result.
    pub bounds_prefilter: bool,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            max_distance: 1.0e30,
            bounds_prefilter: true,
        }
    }
}

/// Deterministic ray picking against country pick surfaces.
///
/// Ordering contract:
/// - The closest hit along the (normalized) ray wins.
/// - If multiple countries are hit at the same distance, the lower `CountryId` wins.
///
/// Notes:
/// - Surfaces are tested in the world's current rotation, the same transform
///   outlines are drawn with.
/// - Triangles are double-sided.
pub fn pick_ray(world: &World, ray: Ray, opts: PickOptions) -> Option<PickHit> {
    let dir = ray.dir.normalized()?;

    // Move the ray into sphere-local space instead of rotating every triangle.
    let rotation = world.rotation();
    let to_local = |v: Vec3| v.rotate_x(-rotation.x).rotate_y(-rotation.y);
    let local_origin = to_local(ray.origin);
    let local_dir = to_local(dir);

    let mut best: Option<(f64, CountryId)> = None;

    for country in world.countries() {
        if country.pick.is_empty() {
            continue;
        }
        if opts.bounds_prefilter
            && let Some(bounds) = country.pick.bounds
            && !bounds.intersects_ray(local_origin, local_dir)
        {
            continue;
        }

        let nearest = country
            .pick
            .triangles
            .iter()
            .filter_map(|tri| ray_triangle_hit_t(local_origin, local_dir, tri))
            .filter(|t| *t <= opts.max_distance)
            .min_by(|a, b| stable_total_cmp_f64(*a, *b));
        let Some(t) = nearest else {
            continue;
        };

        best = match best {
            None => Some((t, country.id)),
            Some((bt, bc)) => {
                let ord = stable_total_cmp_f64(t, bt).then_with(|| country.id.cmp(&bc));
                if ord.is_lt() {
                    Some((t, country.id))
                } else {
                    Some((bt, bc))
                }
            }
        };
    }

    let (t, country) = best?;
    Some(PickHit {
        country,
        distance: t,
        point: ray.origin + dir * t,
    })
}

/// Screen picking wrapper.
///
/// The caller supplies a deterministic screen->ray mapping via `make_ray`.
pub fn pick_screen<F>(
    world: &World,
    x_px: f64,
    y_px: f64,
    mut make_ray: F,
    opts: PickOptions,
) -> Option<PickHit>
where
    F: FnMut(f64, f64) -> Option<Ray>,
{
    let ray = make_ray(x_px, y_px)?;
    pick_ray(world, ray, opts)
}

/// Möller-Trumbore intersection; returns the distance along `dir` (unit length).
fn ray_triangle_hit_t(origin: Vec3, dir: Vec3, tri: &[Vec3; 3]) -> Option<f64> {
    const EPS: f64 = 1e-12;

    let edge1 = tri[1] - tri[0];
    let edge2 = tri[2] - tri[0];
    let p = dir.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < EPS {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = origin - tri[0];
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(q) * inv_det;
    (t > EPS).then_some(t)
}
