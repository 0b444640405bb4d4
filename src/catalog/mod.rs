pub mod catalog_model;
pub mod element_catalog;
