use super::*;
use dkt_core::ID;

/// Minimal authenticated identity: what a token asserts and what
/// handlers receive from the resolver.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Identity {
    pub id: ID<Account>,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl Identity {
    pub fn elevated(&self) -> bool {
        self.role.elevated()
    }
}
