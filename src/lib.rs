//! Draw bounding boxes over an image and read their coordinates back.

pub mod app;
pub mod geometry;
pub mod interaction;
pub mod loader;
pub mod surface;
