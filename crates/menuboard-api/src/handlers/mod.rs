//! HTTP handlers

pub mod ai;
pub mod auth;
pub mod health;
pub mod menu;
pub mod uploads;
