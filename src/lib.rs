pub mod analysis;
pub mod catalog;
pub mod cli;
pub mod detection;
pub mod error;
pub mod export;
pub mod matcher;
pub mod repository;
