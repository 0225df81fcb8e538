//! Built-in conversation scenarios

pub mod first_meeting;

pub use first_meeting::first_meeting;
