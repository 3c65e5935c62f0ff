//! Common test utilities for API integration tests
//!
//! This module provides shared test infrastructure for integration tests,
//! including seeded data builders and helpers for executing GraphQL
//! documents against the in-memory backend.

#![allow(unused_imports)]

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
