pub mod ask;
pub mod config;
pub mod misc;
pub mod notes;
pub mod sync;
pub mod vault;
