//! Request signing for the Nextcloud Talk bot API.
//!
//! Each outbound message is authenticated with a fresh random nonce and
//! HMAC-SHA256(secret, nonce || message), carried in the
//! `X-Nextcloud-Talk-Bot-Random` and `X-Nextcloud-Talk-Bot-Signature`
//! headers. The Talk server recomputes the same concatenation to verify.

use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Size of the random nonce in raw bytes, before base64 encoding.
const NONCE_BYTES: usize = 64;

/// Signing material for a single delivery attempt.
///
/// The nonce is single-use; a new one is drawn for every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedPayload {
    /// Base64-encoded random nonce.
    pub nonce: String,
    /// Hex-encoded HMAC-SHA256 over `nonce || message`.
    pub signature: String,
}

/// Sign a message for delivery, generating a fresh nonce.
pub fn sign(secret: &[u8], message: &str) -> SignedPayload {
    let mut random_bytes = [0u8; NONCE_BYTES];
    OsRng.fill_bytes(&mut random_bytes);
    let nonce = STANDARD.encode(random_bytes);

    let signature = sign_with_nonce(secret, &nonce, message);

    SignedPayload { nonce, signature }
}

/// Compute the signature for a given nonce and message.
///
/// The HMAC input is the base64 nonce *text* concatenated with the message
/// text, both as UTF-8, matching what the Talk server verifies against.
pub fn sign_with_nonce(secret: &[u8], nonce: &str, message: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(nonce.as_bytes());
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
