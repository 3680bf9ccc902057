use super::*;
use actix_web::HttpResponse;
use actix_web::body::EitherBody;
use actix_web::body::MessageBody;
use actix_web::dev::ServiceRequest;
use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use actix_web::middleware::Next;
use actix_web::web;

pub const SIGNIN: &str = "/signin";
pub const SIGNUP: &str = "/signup";
pub const DASHBOARD: &str = "/dashboard";

/// State of the session cookie as seen by the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Absent,
    Invalid,
    Valid,
}

/// What the guard does with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    /// Page request without a live session: send to the sign-in form.
    SignIn,
    /// API request without a live session.
    Unauthorized,
    /// Signed-in user hitting a sign-in or sign-up form.
    Dashboard,
}

/// Coarse, per-request gate. Decides from the path and the cookie alone;
/// the account lookup happens later in [`resolve`].
pub struct Gate;

impl Gate {
    /// Paths that bypass the session check entirely.
    pub fn exempt(path: &str) -> bool {
        under(path, "/api/auth")
            || under(path, "/_next")
            || under(path, "/static")
            || path == "/api/health"
            || path == "/favicon.ico"
            || Self::form(path)
    }
    /// Sign-in and sign-up forms.
    pub fn form(path: &str) -> bool {
        path == SIGNIN || path == SIGNUP
    }
    pub fn api(path: &str) -> bool {
        under(path, "/api")
    }
    pub fn decide(path: &str, token: Token) -> Verdict {
        match (path, token) {
            (p, Token::Valid) if Self::form(p) => Verdict::Dashboard,
            (p, _) if Self::exempt(p) => Verdict::Allow,
            (_, Token::Valid) => Verdict::Allow,
            ("/", Token::Absent) => Verdict::Allow,
            (p, Token::Absent | Token::Invalid) if Self::api(p) => Verdict::Unauthorized,
            (_, Token::Absent | Token::Invalid) => Verdict::SignIn,
        }
    }
}

fn under(path: &str, prefix: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

fn token(req: &ServiceRequest) -> Token {
    let Some(cookie) = req.cookie(COOKIE) else {
        return Token::Absent;
    };
    // without a codec nothing can be validated
    let Some(codec) = req.app_data::<web::Data<Codec>>() else {
        log::error!("route guard has no token codec");
        return Token::Invalid;
    };
    match codec.parse(cookie.value()) {
        Some(_) => Token::Valid,
        None => Token::Invalid,
    }
}

/// Route guard middleware. Mount with
/// `App::new().wrap(actix_web::middleware::from_fn(dkt_auth::guard))`.
pub async fn guard(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<EitherBody<impl MessageBody>>, actix_web::Error> {
    let path = req.path().to_owned();
    let token = token(&req);
    let verdict = Gate::decide(&path, token);
    let redirect = |to: &str| {
        HttpResponse::TemporaryRedirect()
            .insert_header((header::LOCATION, to.to_owned()))
            .finish()
    };
    let mut response = match verdict {
        Verdict::Allow => return next.call(req).await.map(ServiceResponse::map_into_left_body),
        Verdict::Dashboard => redirect(DASHBOARD),
        Verdict::SignIn => redirect(SIGNIN),
        Verdict::Unauthorized => actix_web::ResponseError::error_response(&ApiError::Unauthenticated),
    };
    log::debug!("guard {:?} on {} ({:?})", verdict, path, token);
    if token == Token::Invalid {
        let _ = response.add_removal_cookie(&clear());
    }
    Ok(req.into_response(response).map_into_right_body())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::App;
    use actix_web::http::StatusCode;
    use actix_web::middleware::from_fn;
    use actix_web::test::TestRequest;
    use actix_web::test::call_service;
    use actix_web::test::init_service;
    use dkt_core::ID;

    #[test]
    fn decision_table() {
        use Token::*;
        use Verdict::*;
        assert_eq!(Gate::decide("/cases", Absent), SignIn);
        assert_eq!(Gate::decide("/cases", Invalid), SignIn);
        assert_eq!(Gate::decide("/cases", Valid), Allow);
        assert_eq!(Gate::decide("/", Absent), Allow);
        assert_eq!(Gate::decide("/", Invalid), SignIn);
        assert_eq!(Gate::decide("/signin", Absent), Allow);
        assert_eq!(Gate::decide("/signin", Invalid), Allow);
        assert_eq!(Gate::decide("/signin", Valid), Dashboard);
        assert_eq!(Gate::decide("/signup", Valid), Dashboard);
        assert_eq!(Gate::decide("/api/cases", Absent), Unauthorized);
        assert_eq!(Gate::decide("/api/cases", Invalid), Unauthorized);
        for token in [Absent, Invalid, Valid] {
            assert_eq!(Gate::decide("/api/auth/signin", token), Allow);
            assert_eq!(Gate::decide("/_next/static/chunk.js", token), Allow);
            assert_eq!(Gate::decide("/api/health", token), Allow);
        }
    }

    #[test]
    fn prefixes_match_whole_segments() {
        assert!(Gate::exempt("/api/auth"));
        assert!(Gate::exempt("/api/auth/session"));
        assert!(!Gate::exempt("/api/authors"));
        assert!(!Gate::exempt("/signin/extra"));
        assert!(!Gate::api("/apiary"));
    }

    fn valid_cookie(codec: &Codec) -> actix_web::cookie::Cookie<'static> {
        let identity = Identity {
            id: ID::default(),
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            role: Role::Standard,
        };
        issue(codec, &identity, false).unwrap()
    }

    macro_rules! app {
        ($codec:expr) => {
            init_service(
                App::new()
                    .app_data(web::Data::new($codec))
                    .wrap(from_fn(guard))
                    .default_service(web::to(|| async { HttpResponse::Ok().body("page") })),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn protected_page_without_cookie_redirects() {
        let app = app!(Codec::new(b"guard"));
        let res = call_service(&app, TestRequest::get().uri("/cases").to_request()).await;
        assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(res.headers().get(header::LOCATION).unwrap(), SIGNIN);
    }

    #[actix_web::test]
    async fn signin_with_valid_cookie_goes_to_dashboard() {
        let codec = Codec::new(b"guard");
        let cookie = valid_cookie(&codec);
        let app = app!(codec);
        let req = TestRequest::get().uri(SIGNIN).cookie(cookie).to_request();
        let res = call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(res.headers().get(header::LOCATION).unwrap(), DASHBOARD);
    }

    #[actix_web::test]
    async fn exempt_path_ignores_cookie_state() {
        let app = app!(Codec::new(b"guard"));
        let forged = actix_web::cookie::Cookie::new(COOKIE, "a.b.c");
        for req in [
            TestRequest::get().uri("/api/auth/session").to_request(),
            TestRequest::get().uri("/api/auth/session").cookie(forged).to_request(),
        ] {
            let res = call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::OK);
        }
    }

    #[actix_web::test]
    async fn forged_cookie_is_cleared_and_redirected() {
        let app = app!(Codec::new(b"guard"));
        let forged = valid_cookie(&Codec::new(b"someone-else"));
        let req = TestRequest::get().uri("/cases").cookie(forged).to_request();
        let res = call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
        let cleared = res.response().cookies().find(|c| c.name() == COOKIE).unwrap();
        assert_eq!(cleared.value(), "");
    }

    #[actix_web::test]
    async fn api_without_cookie_is_unauthorized() {
        let app = app!(Codec::new(b"guard"));
        let res = call_service(&app, TestRequest::get().uri("/api/cases").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn valid_cookie_passes_through() {
        let codec = Codec::new(b"guard");
        let cookie = valid_cookie(&codec);
        let app = app!(codec);
        let req = TestRequest::get().uri("/cases").cookie(cookie).to_request();
        let res = call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
