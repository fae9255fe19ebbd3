pub mod compose;
pub mod sanitize;
pub mod segment;
