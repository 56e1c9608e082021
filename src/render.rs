//! Rasterization of draw lists.

pub mod backend;
pub mod cpu;
pub mod draw;
pub mod text;
