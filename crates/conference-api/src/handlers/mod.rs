//! HTTP handlers

pub mod conference;
pub mod health;
