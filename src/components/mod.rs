//! Dioxus components for the page shell.

mod app;

pub use app::*;
