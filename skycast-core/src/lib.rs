//! Skycast Core
//!
//! Core types for the Skycast flight-delay prediction service.
//!
//! This crate contains:
//! - Domain types: Core business entities (Job, WeatherSummary, etc.)
//! - DTOs: Data transfer objects for the HTTP surface

pub mod domain;
pub mod dto;
