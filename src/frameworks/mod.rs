// Frameworks: configuration, tracing bootstrap and session entry points.

pub mod config;
pub mod session;
