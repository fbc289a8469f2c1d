//! Board storage

pub mod grid;

pub use grid::Grid;
