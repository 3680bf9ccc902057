use super::*;
use dkt_core::ID;

/// A record that belongs to exactly one account.
pub trait Owned {
    fn owner(&self) -> ID<Account>;
}

/// Owner or elevated role may act on a resource.
pub fn permits(identity: &Identity, owner: ID<Account>) -> bool {
    identity.elevated() || identity.id == owner
}

/// Gate for single-record reads and writes. Run after the record is
/// known to exist so that missing and forbidden stay distinguishable.
pub fn authorize<R: Owned>(identity: &Identity, resource: &R) -> Result<(), ApiError> {
    match permits(identity, resource.owner()) {
        true => Ok(()),
        false => {
            log::info!("forbidden: account {} on record owned by {}", identity.id, resource.owner());
            Err(ApiError::Forbidden)
        }
    }
}

/// Gate for administration endpoints.
pub fn require_elevated(identity: &Identity) -> Result<(), ApiError> {
    match identity.elevated() {
        true => Ok(()),
        false => Err(ApiError::Forbidden),
    }
}

/// Row filter for list queries, pushed down into the query itself so that
/// other owners' rows are never loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    All,
    Owner(ID<Account>),
}

impl Scope {
    pub fn of(identity: &Identity) -> Self {
        match identity.role {
            Role::Elevated => Self::All,
            Role::Standard => Self::Owner(identity.id),
        }
    }
    pub fn admits(&self, owner: ID<Account>) -> bool {
        match self {
            Self::All => true,
            Self::Owner(id) => *id == owner,
        }
    }
    /// Owner filter as an optional query parameter: `NULL` admits all rows.
    pub fn owner(&self) -> Option<uuid::Uuid> {
        match self {
            Self::All => None,
            Self::Owner(id) => Some(id.inner()),
        }
    }
}
