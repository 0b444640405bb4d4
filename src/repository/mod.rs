pub mod heuristic_model;
pub mod preview;
pub mod repository;
