//! Ceres Run — the narrative engine behind the Charity Water One mission.
//!
//! A deterministic state machine over story scenes. Each player choice spends
//! or earns bounded resources (fuel, Earth and Mars water, mission time, a
//! gold flag) and moves the story on until one of four endings is reached.
//! Rendering is left to the caller; the engine hands back plain data.

pub mod core;
pub mod schema;
