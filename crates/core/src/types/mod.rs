//! Core types for the WMP domain panel.
//!
//! This module provides type-safe wrappers for the WMP domain data.

pub mod domain;
pub mod record;

pub use domain::SiteDomain;
pub use record::{Contact, DomainRecord, Instance, Persons};
