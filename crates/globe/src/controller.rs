//! Euler-angle globe controller: drag rotation, wheel zoom, auto-spin and
//! animated centering on a country.

use foundation::math::Vec2;
use foundation::math::sphere::{facing_rotation, nearest_equivalent_angle};
use scene::SceneRotation;

use crate::config::GlobeConfig;

/// Tilt limit in radians; rotation X stays strictly inside `(-MAX_TILT, MAX_TILT)`.
pub const MAX_TILT: f64 = std::f64::consts::PI / 2.1;

/// Linear interpolation of the scene rotation toward a facing target.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Centering {
    from: SceneRotation,
    to: SceneRotation,
    /// Progress in `[0, 1]`.
    t: f64,
    duration_s: f64,
}

/// Controller limits taken from [`GlobeConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerLimits {
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub wheel_zoom_scale: f64,
    pub drag_sensitivity: f64,
    pub centering_duration_s: f64,
}

impl From<&GlobeConfig> for ControllerLimits {
    /// An inverted zoom range is swapped so clamping stays well defined.
    fn from(cfg: &GlobeConfig) -> Self {
        Self {
            min_zoom: cfg.min_zoom.min(cfg.max_zoom),
            max_zoom: cfg.max_zoom.max(cfg.min_zoom),
            wheel_zoom_scale: cfg.wheel_zoom_scale,
            drag_sensitivity: cfg.drag_sensitivity,
            centering_duration_s: cfg.centering_duration_s,
        }
    }
}

/// Globe controller state.
#[derive(Debug, Clone)]
pub struct GlobeController {
    /// Scene rotation about X (tilt), radians.
    pub rotation_x: f64,

    /// Scene rotation about Y (spin), radians. Unbounded.
    pub rotation_y: f64,

    /// Camera distance from the globe center.
    pub zoom_distance: f64,

    /// Whether the idle spin is running.
    pub auto_spin: bool,

    /// Idle spin step in radians per frame.
    pub spin_speed: f64,

    limits: ControllerLimits,

    /// Drag state.
    dragging: bool,

    /// Last pointer position in pixels.
    last_pos_px: Vec2,

    centering: Option<Centering>,
}

impl GlobeController {
    pub fn new(cfg: &GlobeConfig) -> Self {
        let limits = ControllerLimits::from(cfg);
        let [rot_x, rot_y] = cfg.initial_rotation;
        Self {
            rotation_x: clamp_tilt(rot_x),
            rotation_y: rot_y,
            zoom_distance: cfg.initial_zoom.clamp(limits.min_zoom, limits.max_zoom),
            auto_spin: true,
            spin_speed: cfg.spin_speed,
            limits,
            dragging: false,
            last_pos_px: Vec2::default(),
            centering: None,
        }
    }

    pub fn is_centering(&self) -> bool {
        self.centering.is_some()
    }

    pub fn rotation(&self) -> SceneRotation {
        SceneRotation::new(self.rotation_x, self.rotation_y)
    }

    /// Handle pointer down event.
    pub fn on_pointer_down(&mut self, pos_px: Vec2) {
        // A new drag takes over from any running animation.
        self.centering = None;
        self.dragging = true;
        self.last_pos_px = pos_px;
    }

    /// Handle pointer move event. Returns `true` if the globe rotated.
    pub fn on_pointer_move(&mut self, pos_px: Vec2) -> bool {
        if !self.dragging {
            return false;
        }
        let delta = pos_px - self.last_pos_px;
        self.last_pos_px = pos_px;
        if delta.x == 0.0 && delta.y == 0.0 {
            return false;
        }

        self.rotation_y += delta.x * self.limits.drag_sensitivity;
        self.rotation_x = clamp_tilt(self.rotation_x + delta.y * self.limits.drag_sensitivity);
        self.auto_spin = false;
        true
    }

    /// Handle pointer up (or cancel) event.
    pub fn on_pointer_up(&mut self) {
        self.dragging = false;
    }

    /// Handle mouse wheel event for zoom.
    ///
    /// - `delta`: Wheel delta (positive = zoom out, negative = zoom in).
    pub fn on_wheel(&mut self, delta: f64) {
        self.zoom_distance = (self.zoom_distance + delta * self.limits.wheel_zoom_scale)
            .clamp(self.limits.min_zoom, self.limits.max_zoom);
    }

    pub fn resume_auto_spin(&mut self) {
        self.auto_spin = true;
    }

    /// Starts animating toward the rotation that faces `(lon, lat)`.
    ///
    /// Y takes the shortest angular path; X is clamped to the tilt limit.
    pub fn center_on(&mut self, lon_deg: f64, lat_deg: f64) {
        let (target_x, target_y) = facing_rotation(lon_deg, lat_deg);
        let to = SceneRotation::new(
            clamp_tilt(target_x),
            nearest_equivalent_angle(self.rotation_y, target_y),
        );
        if self.limits.centering_duration_s <= 0.0 {
            self.apply_rotation(to);
            return;
        }
        self.centering = Some(Centering {
            from: self.rotation(),
            to,
            t: 0.0,
            duration_s: self.limits.centering_duration_s,
        });
    }

    /// Update the controller each frame.
    ///
    /// - `dt`: Time delta in seconds since last update.
    pub fn update(&mut self, dt: f64) {
        let dt = dt.max(0.0);

        if let Some(mut anim) = self.centering {
            anim.t = (anim.t + dt / anim.duration_s).min(1.0);
            let lerp = |a: f64, b: f64| a + (b - a) * anim.t;
            self.apply_rotation(SceneRotation::new(
                lerp(anim.from.x, anim.to.x),
                lerp(anim.from.y, anim.to.y),
            ));
            self.centering = (anim.t < 1.0).then_some(anim);
        } else if self.auto_spin && !self.dragging {
            self.rotation_y += self.spin_speed;
        }
    }

    fn apply_rotation(&mut self, rotation: SceneRotation) {
        self.rotation_x = clamp_tilt(rotation.x);
        self.rotation_y = rotation.y;
    }
}

fn clamp_tilt(x: f64) -> f64 {
    let limit = MAX_TILT - f64::EPSILON;
    x.clamp(-limit, limit)
}
