pub mod commands;
mod print;
pub mod setup;
