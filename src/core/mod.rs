//! Core module - Configuration and events

pub mod config;
pub mod events;
