//! Core library for the roster-tools command line application.
//!
//! The library exposes the merge pipeline that powers the command-line
//! interface as well as the tests. The modules are structured to keep
//! responsibilities narrow and composable: workbook adapters live under
//! [`io`], data representations inside [`model`], table discovery in
//! [`locate`], column redaction in [`redact`], record shaping in
//! [`normalize`], headcount statistics in [`aggregate`], style-preserving
//! copies in [`transcribe`], and the merge orchestration under [`merge`].

pub mod aggregate;
pub mod config;
pub mod error;
pub mod io;
pub mod locate;
pub mod merge;
pub mod model;
pub mod normalize;
pub mod redact;
pub mod transcribe;

pub use error::{MergeError, Result};
