//! Pure logic for the drills exercises.
//!
//! Every exercise is split into a pure core (this crate) and a console
//! session (`drills-cli`). Functions here take plain data and return
//! results, so they are unit-testable and shared with the headless
//! `drills-simtest` harness.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`bubble`] | Bubble chart dataset, validation, and marker layout |
//! | [`config`] | File-backed settings for every exercise and their validation |
//! | [`guessing`] | Number guessing game state machine with an attempt limit |
//! | [`summing`] | Number parsing and a running total |
//! | [`timing`] | Duration parsing, averaging, and formatting |

pub mod bubble;
pub mod config;
pub mod guessing;
pub mod summing;
pub mod timing;
