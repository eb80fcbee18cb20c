pub mod content;
pub mod engine;
pub mod store;
pub mod transition;
