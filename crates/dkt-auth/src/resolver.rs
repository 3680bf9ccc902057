use super::*;
use actix_web::FromRequest;
use actix_web::HttpRequest;
use actix_web::dev::Payload;
use actix_web::web;
use dkt_pg::StoreError;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;

/// Result of resolving the session cookie of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    /// No cookie at all.
    Anonymous,
    /// A cookie that no longer names a live session: bad token or vanished
    /// account. Callers should clear it.
    Stale,
    Active(Identity),
}

impl Session {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Active(identity) => Some(identity),
            _ => None,
        }
    }
    pub fn stale(&self) -> bool {
        matches!(self, Self::Stale)
    }
}

/// Authoritative session lookup: verify the token, then confirm the account
/// still exists and project it fresh from storage.
pub async fn resolve<A: Accounts>(
    token: Option<&str>,
    codec: &Codec,
    accounts: &A,
) -> Result<Session, StoreError> {
    let Some(token) = token else {
        return Ok(Session::Anonymous);
    };
    let Some(claimed) = codec.parse(token) else {
        return Ok(Session::Stale);
    };
    match accounts.by_id(claimed.id).await? {
        Some(account) => Ok(Session::Active(account.identity())),
        None => {
            log::info!("session for vanished account {}", claimed.id);
            Ok(Session::Stale)
        }
    }
}

fn resolve_request<A: Accounts + 'static>(
    req: &HttpRequest,
) -> Pin<Box<dyn Future<Output = Result<Session, ApiError>>>> {
    let codec = req.app_data::<web::Data<Codec>>().cloned();
    let accounts = req.app_data::<web::Data<A>>().cloned();
    let token = req.cookie(COOKIE).map(|c| c.value().to_owned());
    Box::pin(async move {
        let codec = codec.ok_or_else(|| ApiError::internal("token codec not configured"))?;
        let accounts = accounts.ok_or_else(|| ApiError::internal("account store not configured"))?;
        resolve(token.as_deref(), &codec, accounts.get_ref())
            .await
            .map_err(ApiError::from)
    })
}

/// Extractor for authenticated requests. Rejects with 401 when there is no
/// live session.
pub struct Auth<A>(Identity, PhantomData<fn() -> A>);

impl<A> Auth<A> {
    pub fn identity(&self) -> &Identity {
        &self.0
    }
    pub fn into_identity(self) -> Identity {
        self.0
    }
}

impl<A: Accounts + 'static> FromRequest for Auth<A> {
    type Error = ApiError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;
    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let session = resolve_request::<A>(req);
        Box::pin(async move {
            match session.await? {
                Session::Active(identity) => Ok(Auth(identity, PhantomData)),
                Session::Anonymous | Session::Stale => Err(ApiError::Unauthenticated),
            }
        })
    }
}

/// Optional session extractor. Never fails for "no session", only for
/// storage errors.
pub struct MaybeAuth<A>(Session, PhantomData<fn() -> A>);

impl<A> MaybeAuth<A> {
    pub fn session(&self) -> &Session {
        &self.0
    }
    pub fn identity(&self) -> Option<&Identity> {
        self.0.identity()
    }
}

impl<A: Accounts + 'static> FromRequest for MaybeAuth<A> {
    type Error = ApiError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;
    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let session = resolve_request::<A>(req);
        Box::pin(async move { session.await.map(|s| MaybeAuth(s, PhantomData)) })
    }
}
