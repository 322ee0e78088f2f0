pub mod fetch;
pub mod registry;
pub mod scene_ingest;
pub mod topology;

pub use fetch::*;
pub use registry::*;
pub use scene_ingest::*;
pub use topology::*;
