//! Maps service errors to mausam_core error types for consistent user-facing messages.

mod weather;

pub use weather::lookup_error;
