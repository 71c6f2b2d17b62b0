use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Distinguishes what a signature was issued for, so a value signed for
/// one cookie never verifies as another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    Session,
    State,
    Csrf,
}

impl Purpose {
    fn label(self) -> &'static [u8] {
        match self {
            Purpose::Session => b"authrelay.session",
            Purpose::State => b"authrelay.state",
            Purpose::Csrf => b"authrelay.csrf",
        }
    }
}

#[derive(Clone)]
pub struct SigningService {
    mac: HmacSha256,
}

impl std::fmt::Debug for SigningService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SigningService {{ ... }}")
    }
}

impl SigningService {
    pub fn with_secret_key(secret_key: &[u8]) -> Result<Self, hmac::digest::InvalidLength> {
        let mac = HmacSha256::new_from_slice(secret_key)?;
        Ok(Self { mac })
    }

    fn keyed(&self, purpose: Purpose, value: &str) -> HmacSha256 {
        let mut mac = self.mac.clone();
        mac.update(purpose.label());
        mac.update(&[0]);
        mac.update(value.as_bytes());
        mac
    }

    /// MAC of `value`, base64url encoded.
    pub fn digest(&self, purpose: Purpose, value: &str) -> String {
        let tag = self.keyed(purpose, value).finalize().into_bytes();
        base64::encode_config(tag, base64::URL_SAFE_NO_PAD)
    }

    /// Constant time check of a tag produced by [`SigningService::digest`].
    pub fn verify_digest(&self, purpose: Purpose, value: &str, tag: &str) -> bool {
        match base64::decode_config(tag, base64::URL_SAFE_NO_PAD) {
            Ok(tag) => self.keyed(purpose, value).verify_slice(&tag).is_ok(),
            Err(_) => false,
        }
    }

    /// `<value>.<tag>`. `value` must not contain a `.`.
    pub fn sign(&self, purpose: Purpose, value: &str) -> String {
        format!("{}.{}", value, self.digest(purpose, value))
    }

    /// Returns the value of a string produced by [`SigningService::sign`]
    /// if its tag checks out.
    pub fn unsign<'s>(&self, purpose: Purpose, signed: &'s str) -> Option<&'s str> {
        let (value, tag) = signed.rsplit_once('.')?;
        if self.verify_digest(purpose, value, tag) {
            Some(value)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> SigningService {
        SigningService::with_secret_key(b"0123456789abcdef0123456789abcdef").unwrap()
    }

    #[test]
    fn signed_values_verify() {
        let signer = signer();
        let signed = signer.sign(Purpose::Session, "payload");
        assert_eq!(signer.unsign(Purpose::Session, &signed), Some("payload"));
    }

    #[test]
    fn tampered_values_are_rejected() {
        let signer = signer();
        let signed = signer.sign(Purpose::Session, "payload");
        let forged = signed.replacen("payload", "paylaod", 1);
        assert_eq!(signer.unsign(Purpose::Session, &forged), None);
        assert_eq!(signer.unsign(Purpose::Session, "payload"), None);
        assert_eq!(signer.unsign(Purpose::Session, "payload.!!!"), None);
    }

    #[test]
    fn purposes_do_not_cross_verify() {
        let signer = signer();
        let signed = signer.sign(Purpose::State, "nonce");
        assert_eq!(signer.unsign(Purpose::Session, &signed), None);
    }

    #[test]
    fn different_keys_do_not_cross_verify() {
        let other = SigningService::with_secret_key(b"another key, also long enough!!!").unwrap();
        let signed = signer().sign(Purpose::Csrf, "secret");
        assert_eq!(other.unsign(Purpose::Csrf, &signed), None);
    }
}
