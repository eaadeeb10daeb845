pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod credentials;
pub mod history_view;
pub mod pages;
pub mod state;
pub mod styles;
pub mod theme;
pub mod trace_view;

pub use app::{App, Route};
