pub mod camera;
pub mod entity;
pub mod geometry;
pub mod picking;
pub mod registry;
pub mod selection;
pub mod style;
pub mod world;

pub use world::*;
