//! WMP Core - shared types library.
//!
//! This crate provides the domain-data types used by the panel:
//! - [`SiteDomain`] - the bare domain name a website is looked up by
//! - [`DomainRecord`] - a hosted-domain record from the WMP config API
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere. Records are
//! deserialized leniently: unknown upstream fields are ignored, missing
//! ones default, and templates read them through placeholder-substituting
//! accessors.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
