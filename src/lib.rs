pub mod board;
pub mod config;
pub mod state;
pub mod summary;
