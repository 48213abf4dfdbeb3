//! Sparco Gateway - payment gateway core for the Sparco processor
//!
//! This crate signs and verifies Sparco webhook payloads, opens checkout
//! sessions for shop orders and drives the order status transitions the
//! processor's notifications call for.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
