use super::*;

/// JWT payload: the identity tuple plus issued-at and expiry, in epoch seconds.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Claims {
    pub id: uuid::Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(identity: &Identity, iat: i64, ttl: std::time::Duration) -> Self {
        Self {
            id: identity.id.inner(),
            name: identity.name.clone(),
            email: identity.email.clone(),
            role: identity.role,
            iat,
            exp: i64::try_from(ttl.as_secs()).map_or(i64::MAX, |ttl| iat.saturating_add(ttl)),
        }
    }
    /// Expiry is exclusive: a token is dead at the instant `now == exp`.
    pub fn expired(&self, now: i64) -> bool {
        now >= self.exp
    }
    /// Every identity field must be present and non-empty.
    pub fn complete(&self) -> bool {
        !self.id.is_nil() && !self.name.is_empty() && !self.email.is_empty()
    }
    pub fn identity(self) -> Identity {
        Identity {
            id: dkt_core::ID::from(self.id),
            name: self.name,
            email: self.email,
            role: self.role,
        }
    }
}
