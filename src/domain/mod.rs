//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors, state machine trait)
//! - `signature` - Canonical message construction and HMAC signing
//! - `order` - Order status lifecycle and guarded transitions
//! - `webhook` - Payment notification parsing and the transition table
//! - `checkout` - Checkout session request and reply types

pub mod checkout;
pub mod foundation;
pub mod order;
pub mod signature;
pub mod webhook;
