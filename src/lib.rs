pub mod app;
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod launcher;
pub mod navigator;
pub mod screenshot;
pub mod theme;
pub mod tree;
pub mod ui;
