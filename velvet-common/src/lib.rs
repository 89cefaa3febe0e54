//! # Velvet Common Library
//!
//! Shared code for the Velvet Room guide services:
//! - Arcana catalog and pairwise fusion chart (forward and reverse lookup)
//! - Persona compendium and two-persona fusion
//! - Theurgy unlock table
//! - Reference data loading and validation
//! - Configuration loading

pub mod arcana;
pub mod chart;
pub mod compendium;
pub mod config;
pub mod data;
pub mod error;
pub mod persona_fusion;
pub mod theurgy;

pub use arcana::{Arcana, ArcanaCatalog};
pub use chart::{Fusion, FusionChart, FusionPair};
pub use data::VelvetData;
pub use error::{Error, Result};
