//! Entity layer tests
//!
//! Rename and delete cascades across a realistic model.

pub mod tests_cascades;
