//! # IO Module
//!
//! Interfaces exposing the backend to the outside world. Currently only the
//! REST API used by the dashboard UI.

pub mod rest;
