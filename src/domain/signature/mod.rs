//! Signature module - canonical message construction and HMAC signing.
//!
//! Everything here is pure: no I/O, no shared state, safe to call from any
//! number of concurrent requests.

mod codec;
mod context;
mod field_map;

pub use codec::{
    SignatureCodec, SignatureVerification, PUB_KEY_KEY, SIGNATURE_KEY, SIGNED_FIELDS_KEY,
    TIMESTAMP_KEY,
};
pub use context::SigningContext;
pub use field_map::{scalar_to_string, FieldMap};
