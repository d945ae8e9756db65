pub mod builder;
pub mod cli;
