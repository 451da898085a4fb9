pub mod cards;
pub mod files;
