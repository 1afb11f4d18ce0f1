pub mod recipes;
pub mod root;
pub mod upload;
