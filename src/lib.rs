//! Workstream: project work management platform.
//!
//! This crate provides the core functionality for organising project work,
//! grouping issues into modules, and recording the activity generated by
//! membership changes.
//!
//! # Architecture
//!
//! Workstream follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, APIs, etc.)
//!
//! # Modules
//!
//! - [`module`]: Module lifecycle and issue membership reconciliation

pub mod module;
