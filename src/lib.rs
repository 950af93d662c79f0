pub mod analysis;
pub mod api;
pub mod config;
pub mod display;
pub mod error;
pub mod game;
pub mod opponent;
pub mod service;
pub mod session;
pub mod storage;
