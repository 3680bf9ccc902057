use super::*;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::web;
use dkt_core::ID;
use dkt_core::Unique;
use dkt_pg::StoreError;

fn throttle(limiter: &dyn Limiter, req: &HttpRequest, action: &str) -> Result<(), ApiError> {
    let key = format!("{}:{}", action, client_key(req));
    let decision = limiter.check(&key);
    match decision.allowed {
        true => Ok(()),
        false => {
            log::warn!("rate limited {}", key);
            Err(ApiError::RateLimited(decision))
        }
    }
}

fn conflict(msg: &'static str) -> impl Fn(StoreError) -> ApiError {
    move |e| match e {
        StoreError::Duplicate => ApiError::Conflict(msg),
        e => ApiError::from(e),
    }
}

pub async fn signup<A: Accounts + 'static>(
    accounts: web::Data<A>,
    limiter: web::Data<dyn Limiter>,
    req: HttpRequest,
    body: web::Json<SignupRequest>,
) -> Result<HttpResponse, ApiError> {
    throttle(limiter.get_ref(), &req, "signup")?;
    validate::signup(&body)?;
    let accounts = accounts.get_ref();
    if accounts.by_email(&body.email).await?.is_some() {
        return Err(ApiError::Conflict("User already exists"));
    }
    let hashword = password::hash(&body.password)?;
    let account = Account::new(
        ID::default(),
        body.name.trim().to_string(),
        body.email.clone(),
        Role::Standard,
    );
    accounts
        .create(&account, Some(&hashword))
        .await
        .map_err(conflict("User already exists"))?;
    log::info!("account {} signed up", account.id());
    Ok(HttpResponse::Created().json(UserResponse {
        user: account.identity(),
    }))
}

pub async fn signin<A: Accounts + 'static>(
    accounts: web::Data<A>,
    codec: web::Data<Codec>,
    limiter: web::Data<dyn Limiter>,
    req: HttpRequest,
    body: web::Json<SigninRequest>,
) -> Result<HttpResponse, ApiError> {
    throttle(limiter.get_ref(), &req, "signin")?;
    validate::signin(&body)?;
    let account = credentials::verify(accounts.get_ref(), &body.email, &body.password)
        .await
        .inspect_err(|e| {
            if let ApiError::InvalidCredentials = e {
                log::info!("failed sign-in from {}", client_key(&req));
            }
        })?;
    let identity = account.identity();
    let cookie = issue(&codec, &identity, secure(&req))?;
    log::info!("account {} signed in", identity.id);
    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(UserResponse { user: identity }))
}

/// Idempotent: answers success whether or not a cookie was sent.
pub async fn signout() -> HttpResponse {
    HttpResponse::Ok()
        .cookie(clear())
        .json(serde_json::json!({ "success": true }))
}

pub async fn session<A: Accounts + 'static>(auth: MaybeAuth<A>) -> HttpResponse {
    let mut response = HttpResponse::Ok();
    if auth.session().stale() {
        response.cookie(clear());
    }
    response.json(SessionResponse {
        user: auth.identity().cloned(),
    })
}

/// Updates the caller's name and email, then re-issues the cookie so the
/// token carries the new identity.
pub async fn profile<A: Accounts + 'static>(
    auth: Auth<A>,
    accounts: web::Data<A>,
    codec: web::Data<Codec>,
    req: HttpRequest,
    body: web::Json<ProfileRequest>,
) -> Result<HttpResponse, ApiError> {
    validate::profile(&body)?;
    let accounts = accounts.get_ref();
    let mut account = accounts
        .by_id(auth.identity().id)
        .await?
        .ok_or(ApiError::Unauthenticated)?;
    if body.email != account.email() {
        if let Some((other, _)) = accounts.by_email(&body.email).await? {
            if other.id() != account.id() {
                return Err(ApiError::Conflict("Email is already in use"));
            }
        }
    }
    account.rename(body.name.trim().to_string(), body.email.clone());
    accounts
        .update(&account)
        .await
        .map_err(conflict("Email is already in use"))?;
    let cookie = issue(&codec, &account.identity(), secure(&req))?;
    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(AccountView::from(&account)))
}

pub async fn list_accounts<A: Accounts + 'static>(
    auth: Auth<A>,
    accounts: web::Data<A>,
) -> Result<HttpResponse, ApiError> {
    require_elevated(auth.identity())?;
    let all = accounts.get_ref().all().await?;
    Ok(HttpResponse::Ok().json(all.iter().map(AccountView::from).collect::<Vec<_>>()))
}

pub async fn create_account<A: Accounts + 'static>(
    auth: Auth<A>,
    accounts: web::Data<A>,
    body: web::Json<CreateAccountRequest>,
) -> Result<HttpResponse, ApiError> {
    require_elevated(auth.identity())?;
    validate::account(&body)?;
    let accounts = accounts.get_ref();
    if accounts.by_email(&body.email).await?.is_some() {
        return Err(ApiError::Conflict("User already exists"));
    }
    let hashword = password::hash(&body.password)?;
    let account = Account::new(
        ID::default(),
        body.name.trim().to_string(),
        body.email.clone(),
        body.role.unwrap_or_default(),
    );
    accounts
        .create(&account, Some(&hashword))
        .await
        .map_err(conflict("User already exists"))?;
    log::info!("account {} created by {}", account.id(), auth.identity().id);
    Ok(HttpResponse::Created().json(AccountView::from(&account)))
}

/// Self or elevated. Checked before existence, so a standard caller cannot
/// probe for other account ids.
fn permit_account(identity: &Identity, id: ID<Account>) -> Result<(), ApiError> {
    match permits(identity, id) {
        true => Ok(()),
        false => {
            log::info!("forbidden: account {} on account {}", identity.id, id);
            Err(ApiError::Forbidden)
        }
    }
}

pub async fn view_account<A: Accounts + 'static>(
    auth: Auth<A>,
    accounts: web::Data<A>,
    id: web::Path<ID<Account>>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    permit_account(auth.identity(), id)?;
    let account = accounts
        .get_ref()
        .by_id(id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;
    Ok(HttpResponse::Ok().json(AccountView::from(&account)))
}

/// Partial edit of one account. Only an elevated caller may change a role;
/// from anyone else the field is ignored. Editing oneself re-issues the
/// cookie.
pub async fn update_account<A: Accounts + 'static>(
    auth: Auth<A>,
    accounts: web::Data<A>,
    codec: web::Data<Codec>,
    req: HttpRequest,
    id: web::Path<ID<Account>>,
    body: web::Json<AccountUpdateRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let caller = auth.identity();
    permit_account(caller, id)?;
    let role = validate::update(&body)?;
    let accounts = accounts.get_ref();
    let mut account = accounts.by_id(id).await?.ok_or(ApiError::NotFound("User"))?;
    let name = validate::present(&body.name).map_or(account.name(), str::trim).to_string();
    let email = validate::present(&body.email).unwrap_or(account.email()).to_string();
    if email != account.email() {
        if let Some((other, _)) = accounts.by_email(&email).await? {
            if other.id() != id {
                return Err(ApiError::Conflict("Email is already in use"));
            }
        }
    }
    account.rename(name, email);
    match (role, caller.elevated()) {
        (Some(role), true) => account.assign(role),
        (Some(_), false) => log::info!("ignored role change on {} by {}", id, caller.id),
        (None, _) => {}
    }
    accounts
        .update(&account)
        .await
        .map_err(conflict("Email is already in use"))?;
    if let Some(password) = validate::present(&body.password) {
        let hashword = password::hash(password)?;
        if !accounts.rehash(id, &hashword).await? {
            return Err(ApiError::NotFound("User"));
        }
    }
    log::info!("account {} updated by {}", id, caller.id);
    let mut response = HttpResponse::Ok();
    if id == caller.id {
        response.cookie(issue(&codec, &account.identity(), secure(&req))?);
    }
    Ok(response.json(AccountView::from(&account)))
}

pub async fn delete_account<A: Accounts + 'static>(
    auth: Auth<A>,
    accounts: web::Data<A>,
    id: web::Path<ID<Account>>,
) -> Result<HttpResponse, ApiError> {
    require_elevated(auth.identity())?;
    let id = id.into_inner();
    match accounts.get_ref().delete(id).await? {
        true => {
            log::info!("account {} deleted by {}", id, auth.identity().id);
            Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "User deleted successfully" })))
        }
        false => Err(ApiError::NotFound("User")),
    }
}

/// Mounts `/api/auth/*` and `/api/users*` for the given account store.
pub fn routes<A: Accounts + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .route("/signup", web::post().to(signup::<A>))
            .route("/signin", web::post().to(signin::<A>))
            .route("/signout", web::post().to(signout))
            .route("/session", web::get().to(session::<A>)),
    )
    .service(
        web::scope("/api/users")
            .route("", web::get().to(list_accounts::<A>))
            .route("", web::post().to(create_account::<A>))
            .route("/profile", web::patch().to(profile::<A>))
            .route("/{id}", web::get().to(view_account::<A>))
            .route("/{id}", web::put().to(update_account::<A>))
            .route("/{id}", web::delete().to(delete_account::<A>)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::App;
    use actix_web::cookie::Cookie;
    use actix_web::dev::ServiceResponse;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;
    use actix_web::test::call_service;
    use actix_web::test::init_service;
    use actix_web::test::read_body_json;
    use serde_json::Value;
    use serde_json::json;
    use std::sync::Arc;

    macro_rules! app {
        ($accounts:expr, $limiter:expr) => {
            init_service(
                App::new()
                    .app_data(web::Data::new(Codec::new(b"handlers")))
                    .app_data($accounts.clone())
                    .app_data(web::Data::from($limiter as Arc<dyn Limiter>))
                    .configure(routes::<MemoryAccounts>),
            )
            .await
        };
        ($accounts:expr) => {
            app!($accounts, Arc::new(Unlimited))
        };
    }

    fn session_cookie(res: &ServiceResponse) -> Option<Cookie<'static>> {
        res.response()
            .cookies()
            .find(|c| c.name() == COOKIE)
            .map(|c| c.into_owned())
    }

    fn jane() -> Value {
        json!({ "name": "Jane Doe", "email": "jane@example.com", "password": "secret1" })
    }

    async fn seed_admin(accounts: &MemoryAccounts) {
        let admin = Account::new(ID::default(), "Admin".into(), "admin@example.com".into(), Role::Elevated);
        let hashword = password::hash("rootroot").unwrap();
        accounts.create(&admin, Some(&hashword)).await.unwrap();
    }

    #[actix_web::test]
    async fn signup_returns_user_without_password() {
        let accounts = web::Data::new(MemoryAccounts::new());
        let app = app!(accounts);
        let req = TestRequest::post().uri("/api/auth/signup").set_json(jane()).to_request();
        let res = call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = read_body_json(res).await;
        assert_eq!(body["user"]["email"], "jane@example.com");
        assert_eq!(body["user"]["role"], "LAWYER");
        assert!(body["user"].get("password").is_none());
        assert!(body["user"].get("hashword").is_none());
    }

    #[actix_web::test]
    async fn signup_twice_conflicts() {
        let accounts = web::Data::new(MemoryAccounts::new());
        let app = app!(accounts);
        for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
            let req = TestRequest::post().uri("/api/auth/signup").set_json(jane()).to_request();
            assert_eq!(call_service(&app, req).await.status(), expected);
        }
    }

    #[actix_web::test]
    async fn signin_sets_cookie() {
        let accounts = web::Data::new(MemoryAccounts::new());
        let app = app!(accounts);
        let req = TestRequest::post().uri("/api/auth/signup").set_json(jane()).to_request();
        call_service(&app, req).await;
        let req = TestRequest::post()
            .uri("/api/auth/signin")
            .set_json(json!({ "email": "jane@example.com", "password": "secret1" }))
            .to_request();
        let res = call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let cookie = session_cookie(&res).expect("session cookie");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        let body: Value = read_body_json(res).await;
        assert_eq!(body["user"]["name"], "Jane Doe");
    }

    #[actix_web::test]
    async fn signin_failures_are_generic() {
        let accounts = web::Data::new(MemoryAccounts::new());
        let app = app!(accounts);
        let req = TestRequest::post().uri("/api/auth/signup").set_json(jane()).to_request();
        call_service(&app, req).await;
        let mut bodies = Vec::new();
        for email in ["jane@example.com", "nobody@example.com"] {
            let req = TestRequest::post()
                .uri("/api/auth/signin")
                .set_json(json!({ "email": email, "password": "wrong-password" }))
                .to_request();
            let res = call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
            assert!(session_cookie(&res).is_none());
            bodies.push(read_body_json::<Value, _>(res).await);
        }
        assert_eq!(bodies[0], bodies[1]);
        assert_eq!(bodies[0]["error"], "Invalid credentials");
    }

    #[actix_web::test]
    async fn signin_missing_fields_is_bad_request() {
        let accounts = web::Data::new(MemoryAccounts::new());
        let app = app!(accounts);
        let req = TestRequest::post()
            .uri("/api/auth/signin")
            .set_json(json!({ "email": "jane@example.com" }))
            .to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn signin_is_rate_limited() {
        let accounts = web::Data::new(MemoryAccounts::new());
        let app = app!(accounts, Arc::new(Window::auth()));
        let attempt = || {
            TestRequest::post()
                .uri("/api/auth/signin")
                .insert_header(("x-forwarded-for", "203.0.113.9"))
                .set_json(json!({ "email": "jane@example.com", "password": "nope" }))
                .to_request()
        };
        for _ in 0..5 {
            assert_eq!(call_service(&app, attempt()).await.status(), StatusCode::UNAUTHORIZED);
        }
        let res = call_service(&app, attempt()).await;
        assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(res.headers().contains_key("Retry-After"));
    }

    #[actix_web::test]
    async fn session_without_cookie_is_null() {
        let accounts = web::Data::new(MemoryAccounts::new());
        let app = app!(accounts);
        let res = call_service(&app, TestRequest::get().uri("/api/auth/session").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = read_body_json(res).await;
        assert_eq!(body, json!({ "user": null }));
    }

    #[actix_web::test]
    async fn stale_cookie_is_cleared() {
        let accounts = web::Data::new(MemoryAccounts::new());
        let app = app!(accounts);
        let req = TestRequest::get()
            .uri("/api/auth/session")
            .cookie(Cookie::new(COOKIE, "x.y.z"))
            .to_request();
        let res = call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(session_cookie(&res).map(|c| c.value().to_string()), Some(String::new()));
    }

    #[actix_web::test]
    async fn signout_without_cookie_succeeds() {
        let accounts = web::Data::new(MemoryAccounts::new());
        let app = app!(accounts);
        let res = call_service(&app, TestRequest::post().uri("/api/auth/signout").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = read_body_json(res).await;
        assert_eq!(body["success"], true);
    }

    #[actix_web::test]
    async fn profile_update_reissues_cookie() {
        let accounts = web::Data::new(MemoryAccounts::new());
        let app = app!(accounts);
        call_service(&app, TestRequest::post().uri("/api/auth/signup").set_json(jane()).to_request()).await;
        let res = call_service(
            &app,
            TestRequest::post()
                .uri("/api/auth/signin")
                .set_json(json!({ "email": "jane@example.com", "password": "secret1" }))
                .to_request(),
        )
        .await;
        let cookie = session_cookie(&res).unwrap();
        let req = TestRequest::patch()
            .uri("/api/users/profile")
            .cookie(cookie)
            .set_json(json!({ "name": "Jane Roe", "email": "roe@example.com" }))
            .to_request();
        let res = call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let fresh = session_cookie(&res).unwrap();
        assert_eq!(Codec::new(b"handlers").parse(fresh.value()).unwrap().email, "roe@example.com");
        let body: Value = read_body_json(res).await;
        assert_eq!(body["name"], "Jane Roe");
    }

    #[actix_web::test]
    async fn profile_requires_session() {
        let accounts = web::Data::new(MemoryAccounts::new());
        let app = app!(accounts);
        let req = TestRequest::patch()
            .uri("/api/users/profile")
            .set_json(json!({ "name": "Jane Roe", "email": "roe@example.com" }))
            .to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn account_administration_is_elevated_only() {
        let accounts = web::Data::new(MemoryAccounts::new());
        seed_admin(&accounts).await;
        let app = app!(accounts);
        call_service(&app, TestRequest::post().uri("/api/auth/signup").set_json(jane()).to_request()).await;
        let signin = |email: &str, password: &str| {
            TestRequest::post()
                .uri("/api/auth/signin")
                .set_json(json!({ "email": email, "password": password }))
                .to_request()
        };
        let standard = session_cookie(&call_service(&app, signin("jane@example.com", "secret1")).await).unwrap();
        let elevated = session_cookie(&call_service(&app, signin("admin@example.com", "rootroot")).await).unwrap();

        let req = TestRequest::get().uri("/api/users").cookie(standard).to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = TestRequest::post()
            .uri("/api/users")
            .cookie(elevated.clone())
            .set_json(json!({ "name": "Second Admin", "email": "second@example.com", "password": "secret2", "role": "ADMIN" }))
            .to_request();
        let res = call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = read_body_json(res).await;
        assert_eq!(body["role"], "ADMIN");

        let req = TestRequest::get().uri("/api/users").cookie(elevated).to_request();
        let res = call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = read_body_json(res).await;
        assert_eq!(body.as_array().map(Vec::len), Some(3));
    }

    fn signin(email: &str, password: &str) -> TestRequest {
        TestRequest::post()
            .uri("/api/auth/signin")
            .set_json(json!({ "email": email, "password": password }))
    }

    #[actix_web::test]
    async fn account_is_visible_to_self_and_elevated() {
        let accounts = web::Data::new(MemoryAccounts::new());
        seed_admin(&accounts).await;
        let app = app!(accounts);
        let res = call_service(&app, TestRequest::post().uri("/api/auth/signup").set_json(jane()).to_request()).await;
        let jane: Value = read_body_json(res).await;
        let uri = format!("/api/users/{}", jane["user"]["id"].as_str().unwrap());
        let other = json!({ "name": "John Roe", "email": "john@example.com", "password": "secret1" });
        call_service(&app, TestRequest::post().uri("/api/auth/signup").set_json(other).to_request()).await;
        let own = session_cookie(&call_service(&app, signin("jane@example.com", "secret1").to_request()).await).unwrap();
        let john = session_cookie(&call_service(&app, signin("john@example.com", "secret1").to_request()).await).unwrap();
        let admin = session_cookie(&call_service(&app, signin("admin@example.com", "rootroot").to_request()).await).unwrap();

        let res = call_service(&app, TestRequest::get().uri(&uri).cookie(own).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = read_body_json(res).await;
        assert_eq!(body["email"], "jane@example.com");
        assert!(body.get("hashword").is_none());

        let res = call_service(&app, TestRequest::get().uri(&uri).cookie(john).to_request()).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let res = call_service(&app, TestRequest::get().uri(&uri).cookie(admin.clone()).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);

        let missing = format!("/api/users/{}", ID::<Account>::default());
        let res = call_service(&app, TestRequest::get().uri(&missing).cookie(admin).to_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = read_body_json(res).await;
        assert_eq!(body["error"], "User not found");
    }

    #[actix_web::test]
    async fn only_elevated_changes_roles() {
        let accounts = web::Data::new(MemoryAccounts::new());
        seed_admin(&accounts).await;
        let app = app!(accounts);
        let res = call_service(&app, TestRequest::post().uri("/api/auth/signup").set_json(jane()).to_request()).await;
        let jane: Value = read_body_json(res).await;
        let uri = format!("/api/users/{}", jane["user"]["id"].as_str().unwrap());
        let own = session_cookie(&call_service(&app, signin("jane@example.com", "secret1").to_request()).await).unwrap();
        let admin = session_cookie(&call_service(&app, signin("admin@example.com", "rootroot").to_request()).await).unwrap();

        let req = TestRequest::put()
            .uri(&uri)
            .cookie(own)
            .set_json(json!({ "name": "Jane Roe", "role": "ADMIN" }))
            .to_request();
        let res = call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let fresh = session_cookie(&res).expect("self edit re-issues the cookie");
        assert_eq!(Codec::new(b"handlers").parse(fresh.value()).unwrap().role, Role::Standard);
        let body: Value = read_body_json(res).await;
        assert_eq!(body["name"], "Jane Roe");
        assert_eq!(body["role"], "LAWYER");
        assert_eq!(body["email"], "jane@example.com");

        let req = TestRequest::put()
            .uri(&uri)
            .cookie(admin)
            .set_json(json!({ "role": "ADMIN" }))
            .to_request();
        let res = call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(session_cookie(&res).is_none());
        let body: Value = read_body_json(res).await;
        assert_eq!(body["role"], "ADMIN");
        assert_eq!(body["name"], "Jane Roe");
    }

    #[actix_web::test]
    async fn others_cannot_edit_and_password_is_rehashed() {
        let accounts = web::Data::new(MemoryAccounts::new());
        let app = app!(accounts);
        let res = call_service(&app, TestRequest::post().uri("/api/auth/signup").set_json(jane()).to_request()).await;
        let jane: Value = read_body_json(res).await;
        let uri = format!("/api/users/{}", jane["user"]["id"].as_str().unwrap());
        let other = json!({ "name": "John Roe", "email": "john@example.com", "password": "secret1" });
        call_service(&app, TestRequest::post().uri("/api/auth/signup").set_json(other).to_request()).await;
        let own = session_cookie(&call_service(&app, signin("jane@example.com", "secret1").to_request()).await).unwrap();
        let john = session_cookie(&call_service(&app, signin("john@example.com", "secret1").to_request()).await).unwrap();

        let req = TestRequest::put()
            .uri(&uri)
            .cookie(john)
            .set_json(json!({ "password": "hijacked" }))
            .to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = TestRequest::put()
            .uri(&uri)
            .cookie(own.clone())
            .set_json(json!({ "email": "john@example.com" }))
            .to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::CONFLICT);

        let req = TestRequest::put()
            .uri(&uri)
            .cookie(own)
            .set_json(json!({ "password": "secret2" }))
            .to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::OK);
        let res = call_service(&app, signin("jane@example.com", "secret1").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let res = call_service(&app, signin("jane@example.com", "secret2").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn deleting_accounts_is_elevated_only() {
        let accounts = web::Data::new(MemoryAccounts::new());
        seed_admin(&accounts).await;
        let app = app!(accounts);
        let res = call_service(&app, TestRequest::post().uri("/api/auth/signup").set_json(jane()).to_request()).await;
        let jane: Value = read_body_json(res).await;
        let uri = format!("/api/users/{}", jane["user"]["id"].as_str().unwrap());
        let own = session_cookie(&call_service(&app, signin("jane@example.com", "secret1").to_request()).await).unwrap();
        let admin = session_cookie(&call_service(&app, signin("admin@example.com", "rootroot").to_request()).await).unwrap();

        let res = call_service(&app, TestRequest::delete().uri(&uri).cookie(own).to_request()).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let res = call_service(&app, TestRequest::delete().uri(&uri).cookie(admin.clone()).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = read_body_json(res).await;
        assert_eq!(body["message"], "User deleted successfully");

        let res = call_service(&app, TestRequest::delete().uri(&uri).cookie(admin).to_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
