//! Innoscope - AI-Powered Problem Analysis Platform
//!
//! Accepts user-submitted problem descriptions and orchestrates
//! asynchronous AI analysis of them across interchangeable providers.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
