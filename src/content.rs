//! The portfolio content document and its one-time loader.

pub mod model;
pub mod store;
