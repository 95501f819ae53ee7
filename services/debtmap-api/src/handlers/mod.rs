//! HTTP request handlers for the debt map API.

pub mod common;
pub mod dashboard;
pub mod health;
pub mod proxy;
