//! Sparco message signing and verification.
//!
//! A signature is `base64(HMAC-SHA256(message, secret_key))` over the raw
//! digest bytes. The message is the comma-joined `name=value` pairs of the
//! signed-field list, in list order:
//!
//! ```text
//! a=1,b=2,signedFields=a,b,signedFields
//! ```
//!
//! The signed-field list is taken from the payload's `signedFields` entry
//! when one is present, otherwise it is every key of the payload followed by
//! `signedFields` itself. Only fields named in the list are protected.

use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use secrecy::ExposeSecret;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::{FieldMap, SigningContext};

/// Payload key carrying the comma-joined signed-field list.
pub const SIGNED_FIELDS_KEY: &str = "signedFields";

/// Payload key carrying the base64 signature.
pub const SIGNATURE_KEY: &str = "signature";

/// Payload key that overrides the public key during verification.
pub const PUB_KEY_KEY: &str = "pubKey";

/// Payload key carrying the signer's timestamp.
pub const TIMESTAMP_KEY: &str = "timestamp";

/// Result of checking a payload's signature.
#[derive(Debug, Clone)]
pub struct SignatureVerification {
    /// Signature the payload carried, if any.
    pub received_signature: Option<String>,
    /// Signature recomputed from the payload.
    pub computed_signature: String,
    pub verified: bool,
    /// Context after resolving `pubKey` and `timestamp` from the payload.
    pub context: SigningContext,
}

/// Stateless signer and verifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureCodec;

impl SignatureCodec {
    /// Signs `payload`, returning a copy with `signedFields` and `signature` set.
    ///
    /// Never fails: fields named in the list but missing from the payload
    /// sign as empty strings.
    pub fn generate(payload: &FieldMap, ctx: &SigningContext) -> FieldMap {
        let mut data = payload.clone();

        let signed_fields = Self::signed_fields(&data);
        data.insert(SIGNED_FIELDS_KEY, signed_fields.join(","));

        let message = Self::canonical_message(&data, &signed_fields);
        data.insert(SIGNATURE_KEY, Self::sign(&message, ctx));

        data
    }

    /// Recomputes the signature of `payload` and compares it with the one it
    /// carries.
    ///
    /// `pubKey` and `timestamp` in the payload take precedence over the
    /// caller's context; the resolved context is returned, the caller's is
    /// left untouched.
    pub fn verify(payload: &FieldMap, ctx: &SigningContext) -> SignatureVerification {
        let mut resolved = ctx.clone();
        if let Some(public_key) = payload.get(PUB_KEY_KEY) {
            resolved.public_key = public_key.to_string();
        }
        resolved.timestamp = payload
            .get(TIMESTAMP_KEY)
            .and_then(|t| t.trim().parse::<i64>().ok());

        let received_signature = payload.get(SIGNATURE_KEY).map(str::to_string);
        let computed_signature = Self::generate(payload, &resolved)
            .get(SIGNATURE_KEY)
            .unwrap_or_default()
            .to_string();

        let verified = received_signature
            .as_deref()
            .map(|received| constant_time_compare(received.as_bytes(), computed_signature.as_bytes()))
            .unwrap_or(false);

        SignatureVerification {
            received_signature,
            computed_signature,
            verified,
            context: resolved,
        }
    }

    /// Determines the ordered signed-field list for `data`.
    ///
    /// A blank or `"0"` list counts as absent. The default list then keeps
    /// the payload's own `signedFields` key in place and appends another, so
    /// `{a, signedFields: ""}` signs `a,signedFields,signedFields`.
    pub fn signed_fields(data: &FieldMap) -> Vec<String> {
        match data
            .get(SIGNED_FIELDS_KEY)
            .filter(|list| !list.is_empty() && *list != "0")
        {
            Some(list) => list.split(',').map(str::to_string).collect(),
            None => data
                .keys()
                .map(str::to_string)
                .chain(std::iter::once(SIGNED_FIELDS_KEY.to_string()))
                .collect(),
        }
    }

    /// Builds the exact string fed to the HMAC.
    pub fn canonical_message(data: &FieldMap, signed_fields: &[String]) -> String {
        signed_fields
            .iter()
            .map(|name| format!("{}={}", name, data.get_or_empty(name)))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn sign(message: &str, ctx: &SigningContext) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(ctx.secret_key.expose_secret().as_bytes())
            .expect("HMAC accepts any key");
        mac.update(message.as_bytes());
        STANDARD.encode(mac.finalize().into_bytes())
    }
}

/// Performs constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
