//! Dashboard window
//!
//! The main application window: sidebar navigation on the left, active view
//! in the central panel.

pub mod app;
pub mod components;
pub mod state;
pub mod theme;
pub mod views;
