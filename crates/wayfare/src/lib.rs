//! Wayfare Backend Library
//!
//! This library provides the core components for the Wayfare tourism
//! information platform: the dual-track session system, user accounts, and
//! the HTTP surface.

pub mod api;
pub mod auth;
pub mod db;
pub mod user;
