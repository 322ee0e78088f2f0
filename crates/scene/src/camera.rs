use foundation::math::{Vec2, Vec3};

use crate::picking::Ray;

/// Render-surface size in CSS/logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    /// Whether a surface-relative position lies on the surface (edges inclusive).
    pub fn contains(&self, pos_px: Vec2) -> bool {
        pos_px.x >= 0.0 && pos_px.x <= self.width && pos_px.y >= 0.0 && pos_px.y <= self.height
    }

    /// Surface-relative pixels to normalized device coordinates (+Y up).
    pub fn to_ndc(&self, pos_px: Vec2) -> Vec2 {
        Vec2::new(
            (pos_px.x / self.width) * 2.0 - 1.0,
            -(pos_px.y / self.height) * 2.0 + 1.0,
        )
    }
}

/// Perspective camera on the +Z axis looking at the globe center.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub fov_y_deg: f64,
    pub near: f64,
    pub far: f64,
    pub distance: f64,
    pub viewport: Viewport,
}

impl PerspectiveCamera {
    pub fn new(fov_y_deg: f64, near: f64, far: f64, distance: f64, viewport: Viewport) -> Self {
        Self {
            fov_y_deg,
            near,
            far,
            distance,
            viewport,
        }
    }

    pub fn aspect(&self) -> f64 {
        self.viewport.aspect()
    }

    pub fn eye(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.distance)
    }

    /// World-space ray through a point given in normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Option<Ray> {
        let tan_half = (self.fov_y_deg.to_radians() * 0.5).tan();
        let dir = Vec3::new(ndc.x * tan_half * self.aspect(), ndc.y * tan_half, -1.0);
        Some(Ray::new(self.eye(), dir.normalized()?))
    }

    /// World-space ray through a surface-relative pixel.
    pub fn ray_from_pixel(&self, pos_px: Vec2) -> Option<Ray> {
        self.ray_from_ndc(self.viewport.to_ndc(pos_px))
    }
}
