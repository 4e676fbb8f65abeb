pub mod string_utils;

// Re-export commonly used functions
pub use string_utils::{prettify_network, shorten_address};
