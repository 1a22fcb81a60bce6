//! Module management for Workstream.
//!
//! This module implements project modules: named groupings of issues with a
//! lifecycle status, lead, members, and target dates. It covers creating
//! modules within a project, listing and retrieving them with aggregated
//! membership, and bulk-assigning issues to a module. Assignment reconciles
//! each requested issue against its current module so an issue belongs to at
//! most one module at a time, and every membership change is reported to the
//! activity stream. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
