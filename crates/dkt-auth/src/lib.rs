//! Authentication, sessions, and authorization for the practice backend.
//!
//! Stateless HS256 session tokens carried in an HTTP-only cookie, Argon2
//! password hashing, and owner-or-elevated access rules.
//!
//! ## Identity
//!
//! - [`Account`] — Stored user with role and timestamps
//! - [`Identity`] — Public projection carried by tokens and responses
//! - [`Role`] — Standard practitioner or elevated administrator
//!
//! ## Sessions
//!
//! - [`Codec`] — Token minting and validation
//! - [`resolve`] — Authoritative session lookup against storage
//! - [`Auth`] / [`MaybeAuth`] — Request extractors
//! - [`guard`] — Per-request route guard middleware
//!
//! ## Authorization
//!
//! - [`authorize`] — Owner-or-elevated check for one record
//! - [`Scope`] — Row filter for list queries
mod account;
mod claims;
mod codec;
mod cookie;
pub mod credentials;
mod dto;
mod error;
mod guard;
mod handlers;
mod identity;
mod limiter;
mod memory;
pub mod password;
mod policy;
mod repository;
mod resolver;
mod role;
pub mod validate;

pub use account::*;
pub use claims::*;
pub use codec::*;
pub use cookie::*;
pub use dto::*;
pub use error::*;
pub use guard::*;
pub use handlers::*;
pub use identity::*;
pub use limiter::*;
pub use memory::*;
pub use policy::*;
pub use repository::*;
pub use resolver::*;
pub use role::*;
