pub mod export_model;
pub mod markdown;
pub mod output;
pub mod pdf;
