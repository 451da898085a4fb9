pub mod cache;
pub mod library;
