//! Foundation types for the knowme terminal.
//!
//! This crate holds the front-end-agnostic types shared by every knowme
//! crate: the error enum, theme and background choices, line-editor input
//! events, and configuration.

pub mod config;
pub mod error;
pub mod input;
pub mod theme;
