pub mod commands;
pub mod expand;
pub mod parser;
pub mod state;

pub use state::ShellState;
