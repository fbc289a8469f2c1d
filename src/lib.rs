//! Chat Life - Game of Life steered live by chat commands

pub mod chat;
pub mod command;
pub mod core;
pub mod input;
pub mod render;
pub mod rules;
pub mod simulation;
pub mod spatial;
