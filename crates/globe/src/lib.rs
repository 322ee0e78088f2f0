//! Interactive country globe: camera control, picking-driven selection and
//! deferred navigation on top of the `scene` and `formats` crates.

pub mod config;
pub mod controller;
pub mod label;
pub mod view;

pub use config::{ConfigError, GlobeConfig};
pub use controller::GlobeController;
pub use view::{DatasetState, GlobeEvent, GlobeView, InteractionPhase, PointerKind};
