//! HTTP API handlers for velvet-fr

pub mod arcana;
pub mod error;
pub mod fusion;
pub mod personas;
pub mod status;
pub mod theurgy;

pub use arcana::{get_chart, list_arcana};
pub use error::ApiError;
pub use fusion::{fuse_personas, resolve_fusion, reverse_lookup};
pub use personas::{get_persona, list_personas};
pub use status::{get_build_info, health_routes};
pub use theurgy::list_theurgy;
