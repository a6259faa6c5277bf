//! Command-line front end for the repair workflow.
pub mod platform;
