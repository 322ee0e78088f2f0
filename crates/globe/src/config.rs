use serde::{Deserialize, Serialize};

/// Tunables for one globe view. Every field has a default, so a config file
/// only needs the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    /// Name of the geometry collection under `objects` in the topology.
    pub topology_object: String,
    pub outline_radius: f64,
    pub pick_radius: f64,

    pub fov_y_deg: f64,
    pub near: f64,
    pub far: f64,

    /// `[x, y]` scene rotation in radians when the globe is first built.
    pub initial_rotation: [f64; 2],
    pub initial_zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Zoom distance per wheel delta unit.
    pub wheel_zoom_scale: f64,

    /// Auto-spin step in radians per frame.
    pub spin_speed: f64,
    /// Radians of rotation per pixel of drag.
    pub drag_sensitivity: f64,

    pub mouse_click_threshold_px: f64,
    pub touch_click_threshold_px: f64,

    pub navigation_delay_s: f64,
    pub centering_duration_s: f64,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            topology_object: "countries".to_string(),
            outline_radius: 1.001,
            pick_radius: 1.001,
            fov_y_deg: 45.0,
            near: 0.1,
            far: 100.0,
            initial_rotation: [0.3, 0.0],
            initial_zoom: 2.6,
            min_zoom: 1.3,
            max_zoom: 7.0,
            wheel_zoom_scale: 0.003,
            spin_speed: 0.0018,
            drag_sensitivity: 0.005,
            mouse_click_threshold_px: 5.0,
            touch_click_threshold_px: 10.0,
            navigation_delay_s: 0.7,
            centering_duration_s: 1.0 / 3.0,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Json(serde_json::Error),
    InvalidZoomRange { min_zoom: f64, max_zoom: f64 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Json(e) => write!(f, "config JSON parse error: {e}"),
            ConfigError::InvalidZoomRange { min_zoom, max_zoom } => {
                write!(f, "min_zoom {min_zoom} must not exceed max_zoom {max_zoom}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Json(e) => Some(e),
            ConfigError::InvalidZoomRange { .. } => None,
        }
    }
}

impl GlobeConfig {
    pub fn from_json_str(payload: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(payload).map_err(ConfigError::Json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_zoom > self.max_zoom {
            return Err(ConfigError::InvalidZoomRange {
                min_zoom: self.min_zoom,
                max_zoom: self.max_zoom,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, GlobeConfig};
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg = GlobeConfig::from_json_str(r#"{"spin_speed": 0.0, "max_zoom": 5.0}"#)
            .expect("config");
        assert_eq!(
            cfg,
            GlobeConfig {
                spin_speed: 0.0,
                max_zoom: 5.0,
                ..GlobeConfig::default()
            }
        );
    }

    #[test]
    fn unknown_types_are_rejected() {
        assert!(matches!(
            GlobeConfig::from_json_str(r#"{"min_zoom": "near"}"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn inverted_zoom_range_is_rejected() {
        assert!(matches!(
            GlobeConfig::from_json_str(r#"{"min_zoom": 8.0, "max_zoom": 5.0}"#),
            Err(ConfigError::InvalidZoomRange { .. })
        ));
        assert!(GlobeConfig::from_json_str(r#"{"min_zoom": 4.0, "max_zoom": 4.0}"#).is_ok());
    }
}
