pub mod analysis_model;
pub mod analyzer;
