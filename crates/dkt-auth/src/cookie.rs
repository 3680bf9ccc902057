use super::*;
use actix_web::HttpRequest;
use actix_web::cookie::Cookie;
use actix_web::cookie::SameSite;

/// Name of the session cookie.
pub const COOKIE: &str = "auth-token";

/// Mints a session token for `identity` and wraps it in the session cookie.
///
/// No server-side state is written; the cookie is the whole session.
pub fn issue(
    codec: &Codec,
    identity: &Identity,
    secure: bool,
) -> Result<Cookie<'static>, jsonwebtoken::errors::Error> {
    let token = codec.mint(identity)?;
    Ok(Cookie::build(COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(actix_web::cookie::time::Duration::seconds(
            Codec::ttl().as_secs() as i64,
        ))
        .finish())
}

/// Removal cookie for sign-out and stale sessions.
pub fn clear() -> Cookie<'static> {
    let mut cookie = Cookie::build(COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish();
    cookie.make_removal();
    cookie
}

/// Whether the request arrived over TLS, honoring `X-Forwarded-Proto`.
pub fn secure(req: &HttpRequest) -> bool {
    req.connection_info().scheme() == "https"
}
