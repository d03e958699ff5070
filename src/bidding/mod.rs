pub mod commands;
pub mod contract;
