//! core
//!
//! Core domain types, configuration, and repository guards for lv.
//!
//! # Modules
//!
//! - [`types`] - Strong types: CommitType, StatusSnapshot, IgnoreSet, Oid
//! - [`config`] - Configuration schema and loading
//! - [`paths`] - Centralized path routing for lv storage
//! - [`ops`] - Repository locking
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Schemas are strict and self-describing

pub mod config;
pub mod ops;
pub mod paths;
pub mod types;
