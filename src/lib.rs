#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]

pub mod actions;
pub mod ai_providers;
pub mod app_composite;
pub mod config;
pub mod logger;
pub mod pipeline;
pub mod session;
pub mod speech;
pub mod web;
