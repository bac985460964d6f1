//! Weather lookup widget for Mausam
//!
//! Holds the widget state, runs lookups off the input loop and hands the
//! result to a renderer.

pub mod display;
pub mod error_mapping;
pub mod services;
pub mod terminal;
pub mod widget;

pub use display::{DisplayFields, Render, WidgetView};
pub use services::{request_lookup, LookupServiceMessage};
pub use terminal::{read_input_line, TerminalRenderer};
pub use widget::{Key, LookupRequest, SubmitOutcome, WeatherWidget};
