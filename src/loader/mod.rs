//! File loaders for the bundled model assets.

pub mod obj;
