//! WMP panel library.
//!
//! This crate provides the panel functionality as a library,
//! allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod options;
pub mod resolver;
pub mod routes;
pub mod state;
pub mod views;
pub mod wmp;
