//! Behavioral tests for the DOM helpers
//!
//! This module provides BDD-style tests using given-when-then naming convention.
//! Tests run against the in-memory DOM.

pub mod mixin_behaviors;
