pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{LifeError, Result};
pub use types::{Boundary, Cell, GameMode, Probability, Tick};
