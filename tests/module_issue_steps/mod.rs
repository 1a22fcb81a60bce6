//! Step definitions for module issue assignment BDD scenarios.

pub mod world;

mod given;
mod then;
mod when;
