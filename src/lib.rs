pub mod errors;
pub mod language;
pub mod position;
pub mod prototype;
pub mod render;
pub mod source;
pub mod tokenize;
pub mod topic;
