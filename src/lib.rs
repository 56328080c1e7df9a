//! A terminal one-time-passcode field: a row of single-digit cells that behave
//! as one input.
//!
//! The routing core lives in [`otp`] and has no terminal dependency beyond
//! ratatui's colour type. [`ui`] renders a group and translates crossterm
//! events into group edits; [`app`] is the host screen used by the binary.

pub mod app;
pub mod config;
pub mod event;
pub mod otp;
pub mod ui;
