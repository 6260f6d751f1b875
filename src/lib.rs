pub mod app;
pub mod cli;
pub mod config;
pub mod filter;
pub mod loader;
pub mod model;
pub mod page;
pub mod render;
pub mod view;

#[cfg(test)]
mod tests;
