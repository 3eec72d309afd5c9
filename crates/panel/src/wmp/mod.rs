//! WMP config API integration.
//!
//! This module provides:
//! - [`WmpClient`] for looking up the hosted-domain record of a site
//! - [`WmpError`] for the failure classes the client absorbs
//!
//! # Flow
//!
//! 1. A page handler resolves the current [`wmp_core::SiteDomain`]
//! 2. [`WmpClient::domain_data`] answers from its in-process cache, or
//!    fetches `<base URL><encoded domain>` from the WMP API
//! 3. The one-entry response envelope is unwrapped into a
//!    [`wmp_core::DomainRecord`]
//! 4. Any failure degrades to the empty record after logging, so pages
//!    always render
//!
//! WMP is the system of record; the panel only ever reads from it.

mod client;
mod error;

pub use client::WmpClient;
pub use error::WmpError;
