#![warn(clippy::pedantic)]

pub mod lifecycle;
pub mod log;
pub mod screen;

pub use screen::{Dialog, Notification, WorkoutScreen};
