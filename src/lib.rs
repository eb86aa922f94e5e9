pub mod cli;
pub mod config;
pub mod model;
pub mod recorder;
pub mod resolution;

mod api;

pub use api::{Deplock, DeplockBuilder, LockMode};
