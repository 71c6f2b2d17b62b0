use crate::core::types::{CsrfSecret, StateNonce};

pub trait FromRandom {
    fn from_random() -> Self;
}

impl FromRandom for StateNonce {
    fn from_random() -> Self {
        StateNonce(random_string(32))
    }
}

impl FromRandom for CsrfSecret {
    fn from_random() -> Self {
        CsrfSecret(random_string(24))
    }
}

fn random_string(size: usize) -> String {
    use rand::Rng;

    let s: String = rand::thread_rng()
        .sample_iter(rand::distributions::Alphanumeric)
        .take(size)
        .map(char::from)
        .collect();
    base64::encode_config(s, base64::URL_SAFE_NO_PAD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonces_are_url_safe_and_distinct() {
        let a = StateNonce::from_random();
        let b = StateNonce::from_random();
        assert_ne!(a, b);
        assert!(a
            .0
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }
}
