//! CLI module graph.

pub mod address;
pub mod check;
pub mod command;
pub mod market;
pub mod output;
pub mod prices;
pub mod run;
pub mod scan;
pub mod settings;
pub mod trades;
