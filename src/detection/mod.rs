pub mod classifier;
pub mod summarizer;
