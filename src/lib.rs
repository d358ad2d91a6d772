//! Aletheia - SQL Injection Verification Harness
//!
//! Drives a deliberately graded vulnerable web application (DVWA-shaped by
//! default) through a set of SQL injection techniques at each configured
//! security level, and verifies that the observed outcome matches the known
//! expectation matrix for that (technique, level) pair. Produces structured
//! per-case records for console and JSON reporting.

pub mod config;
pub mod error;
pub mod expect;
pub mod harness;
pub mod http;
pub mod models;
pub mod oracle;
pub mod report;
pub mod session;
pub mod verify;
