//! Document layer tests
//!
//! Tests for loading and saving model files on disk:
//! - Load-time validation against checked-in fixtures
//! - Save round trips and indentation
//! - Include scanning and custom component collisions
//! - Session state transitions

pub mod tests_fixtures;
pub mod tests_includes;
pub mod tests_load_save;
pub mod tests_session;
