//! Salted password digests: HMAC-SHA256 keyed by a random UUID salt, hex encoded.

use hmac::{Hmac, Mac};
use remedy_application::ports::credentials::CredentialHasher;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Default, Clone, Copy)]
pub struct HmacCredentialHasher;

impl HmacCredentialHasher {
    fn mac(salt: &str) -> HmacSha256 {
        // HMAC accepts keys of any length
        <HmacSha256 as Mac>::new_from_slice(salt.as_bytes())
            .unwrap_or_else(|_| unreachable!("HMAC key length is unrestricted"))
    }
}

impl CredentialHasher for HmacCredentialHasher {
    fn new_salt(&self) -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }

    fn digest(&self, password: &str, salt: &str) -> String {
        let mut mac = Self::mac(salt);
        mac.update(password.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Constant-time comparison against the stored digest
    fn verify(&self, password: &str, salt: &str, expected_digest: &str) -> bool {
        let Ok(expected) = hex::decode(expected_digest) else {
            return false;
        };
        let mut mac = Self::mac(salt);
        mac.update(password.as_bytes());
        mac.verify_slice(&expected).is_ok()
    }
}
