//! Mentor Match - Mentor matching and gap-analysis service
//!
//! This crate matches a user's self-reported trait profile against a pool
//! of mentor profiles, explains the largest gap to the best match, and logs
//! every ranking decision as labeled training data.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
