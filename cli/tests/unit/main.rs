//! Unit tests for zeta-deploy
//!
//! These tests drive the workflows against a scripted in-memory shell and run
//! fast without network I/O.

mod helpers;
mod step_runner;
