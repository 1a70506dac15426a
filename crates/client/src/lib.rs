//! `invoicehub-client`
//!
//! **Responsibility:** the interactive invoicing client.
//!
//! This crate provides:
//! - the view controller that owns the invoice draft and talks to the API
//! - the `Screen` seam the controller projects onto
//! - a terminal screen and command loop used by the `invoicehub` binary
//!
//! The entry point builds the component graph explicitly
//! (config → gateway → screen → controller); nothing here is global.

pub mod config;
pub mod controller;
pub mod screen;
pub mod terminal;
pub mod view;

pub use config::AppConfig;
pub use controller::{ControllerError, ViewController};
pub use screen::{DraftProjection, Notice, RowProjection, Screen};
pub use terminal::{Command, TerminalScreen};
pub use view::{CreateState, View};
