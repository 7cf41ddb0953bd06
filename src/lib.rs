#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod panes;
pub mod trace;

pub use app::ViewerApp;
