pub mod app;
pub mod config;
pub mod cycler;
pub mod events;
pub mod geocode;
pub mod location;
pub mod logging;
pub mod models;
pub mod ui;
