//! Turns campus bus stop data into markers and timetables for the campus map.

pub mod aggregator;
pub mod classifier;
pub mod data_source;
pub mod model;
pub mod presentation;
pub mod view;

pub use aggregator::{RouteSchedule, aggregate};
pub use classifier::{ClassifyError, StopCategory, classify};
