pub mod action;
pub mod log;
pub mod scene;
pub mod state;
