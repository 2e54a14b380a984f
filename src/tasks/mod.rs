//! Background Tasks Module
//!
//! Contains background tasks that run periodically while the server is up.
//!
//! # Tasks
//! - Cache sweep: drops expired cache entries at a fixed interval

mod sweep;

pub use sweep::spawn_sweep_task;
