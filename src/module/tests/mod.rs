//! Unit tests for the module management context.

mod reconcile_tests;
