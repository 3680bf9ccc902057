use super::*;

/// Lifetime of a session token and of the cookie that carries it.
pub const SESSION_TTL: std::time::Duration = std::time::Duration::from_secs(7 * 24 * 60 * 60);

/// Signs and verifies session tokens (HS256 JWT).
///
/// This is the only token validation routine in the crate: the route
/// guard and the session resolver both go through [`Codec::parse`].
#[derive(Clone)]
pub struct Codec {
    encoding: jsonwebtoken::EncodingKey,
    decoding: jsonwebtoken::DecodingKey,
}

impl Codec {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: jsonwebtoken::EncodingKey::from_secret(secret),
            decoding: jsonwebtoken::DecodingKey::from_secret(secret),
        }
    }
    /// Per-process random secret for development. Tokens die with the process.
    pub fn random() -> Self {
        use rand::Rng;
        let ref mut bytes = [0u8; 32];
        rand::rng().fill(bytes);
        Self::new(bytes)
    }
    pub const fn ttl() -> std::time::Duration {
        SESSION_TTL
    }

    pub fn mint(&self, identity: &Identity) -> Result<String, jsonwebtoken::errors::Error> {
        self.mint_at(identity, now(), SESSION_TTL)
    }
    pub fn mint_at(
        &self,
        identity: &Identity,
        iat: i64,
        ttl: std::time::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims::new(identity, iat, ttl);
        let header = jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256);
        jsonwebtoken::encode(&header, &claims, &self.encoding)
    }

    pub fn parse(&self, token: &str) -> Option<Identity> {
        self.parse_at(token, now())
    }
    /// Validates structure, signature, identity fields and expiry.
    /// Every failure collapses to `None`.
    pub fn parse_at(&self, token: &str, now: i64) -> Option<Identity> {
        if token.split('.').count() != 3 {
            log::debug!("token rejected: malformed");
            return None;
        }
        let claims = jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation())
            .inspect_err(|e| log::debug!("token rejected: {}", e))
            .ok()?
            .claims;
        if !claims.complete() {
            log::debug!("token rejected: incomplete identity");
            return None;
        }
        if claims.expired(now) {
            log::debug!("token rejected: expired");
            return None;
        }
        Some(claims.identity())
    }
}

/// Expiry is checked by [`Claims::expired`] with no leeway, so the library
/// check is disabled; `exp` must still be present.
fn validation() -> jsonwebtoken::Validation {
    let mut validation = jsonwebtoken::Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp"]);
    validation
}

/// Current time in epoch seconds.
pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dkt_core::ID;
    use std::time::Duration;

    fn jane() -> Identity {
        Identity {
            id: ID::default(),
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            role: Role::Standard,
        }
    }

    fn codec() -> Codec {
        Codec::new(b"test-secret")
    }

    #[test]
    fn roundtrip_within_window() {
        let codec = codec();
        let identity = jane();
        let token = codec.mint_at(&identity, 1_000, Duration::from_secs(60)).unwrap();
        assert_eq!(codec.parse_at(&token, 1_000), Some(identity.clone()));
        assert_eq!(codec.parse_at(&token, 1_059), Some(identity));
    }

    #[test]
    fn expiry_boundary_is_exclusive() {
        let codec = codec();
        let token = codec.mint_at(&jane(), 1_000, Duration::from_secs(60)).unwrap();
        assert_eq!(codec.parse_at(&token, 1_060), None);
        assert_eq!(codec.parse_at(&token, 9_999), None);
    }

    #[test]
    fn huge_ttl_saturates_instead_of_wrapping() {
        let codec = codec();
        let token = codec.mint_at(&jane(), 1_000, Duration::from_secs(u64::MAX)).unwrap();
        assert_eq!(codec.parse_at(&token, 1_000), Some(jane()));
        let token = codec.mint_at(&jane(), i64::MAX - 10, Duration::from_secs(60)).unwrap();
        assert_eq!(codec.parse_at(&token, i64::MAX - 1), Some(jane()));
    }

    #[test]
    fn fresh_token_parses_now() {
        let codec = codec();
        let identity = jane();
        let token = codec.mint(&identity).unwrap();
        assert_eq!(codec.parse(&token), Some(identity));
    }

    #[test]
    fn tampered_payload_rejected() {
        let codec = codec();
        let token = codec.mint_at(&jane(), 1_000, Duration::from_secs(60)).unwrap();
        let parts = token.split('.').collect::<Vec<_>>();
        let payload = parts[1];
        for i in 0..payload.len() {
            let mut bytes = payload.as_bytes().to_vec();
            bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
            let forged = format!(
                "{}.{}.{}",
                parts[0],
                String::from_utf8(bytes).unwrap(),
                parts[2]
            );
            assert_eq!(codec.parse_at(&forged, 1_000), None, "byte {} accepted", i);
        }
    }

    #[test]
    fn foreign_secret_rejected() {
        let token = Codec::new(b"other").mint(&jane()).unwrap();
        assert_eq!(codec().parse(&token), None);
    }

    #[test]
    fn malformed_structure_rejected() {
        let codec = codec();
        assert_eq!(codec.parse(""), None);
        assert_eq!(codec.parse("a.b"), None);
        assert_eq!(codec.parse("a.b.c.d"), None);
        assert_eq!(codec.parse("not a token"), None);
    }

    #[test]
    fn missing_identity_field_rejected() {
        let key = jsonwebtoken::EncodingKey::from_secret(b"test-secret");
        let claims = serde_json::json!({
            "id": uuid::Uuid::now_v7(),
            "email": "jane@example.com",
            "role": "LAWYER",
            "iat": now(),
            "exp": now() + 60,
        });
        let token = jsonwebtoken::encode(&jsonwebtoken::Header::default(), &claims, &key).unwrap();
        assert_eq!(codec().parse(&token), None);
    }

    #[test]
    fn empty_identity_field_rejected() {
        let mut identity = jane();
        identity.name = String::new();
        let token = codec().mint(&identity).unwrap();
        assert_eq!(codec().parse(&token), None);
    }

    #[test]
    fn unknown_role_rejected() {
        let key = jsonwebtoken::EncodingKey::from_secret(b"test-secret");
        let claims = serde_json::json!({
            "id": uuid::Uuid::now_v7(),
            "name": "Jane Doe",
            "email": "jane@example.com",
            "role": "ROOT",
            "iat": now(),
            "exp": now() + 60,
        });
        let token = jsonwebtoken::encode(&jsonwebtoken::Header::default(), &claims, &key).unwrap();
        assert_eq!(codec().parse(&token), None);
    }

    #[test]
    fn unsigned_token_rejected() {
        use base64::Engine;
        let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
        let header = engine.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let claims = Claims::new(&jane(), now(), Duration::from_secs(60));
        let payload = engine.encode(serde_json::to_vec(&claims).unwrap());
        let token = format!("{}.{}.{}", header, payload, engine.encode(b"signature"));
        assert_eq!(codec().parse(&token), None);
    }
}
