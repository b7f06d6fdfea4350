pub mod backend;
pub mod cli;
pub mod core;
pub mod render;
pub mod session;
