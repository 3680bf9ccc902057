use super::*;
use actix_web::HttpResponse;
use actix_web::web;
use dkt_auth::Accounts;
use dkt_auth::ApiError;
use dkt_auth::Auth;
use dkt_auth::Scope;
use dkt_auth::authorize;
use dkt_core::ID;

pub async fn list<A, S, R>(auth: Auth<A>, store: web::Data<S>) -> Result<HttpResponse, ApiError>
where
    A: Accounts + 'static,
    S: Store<R> + 'static,
    R: Record,
{
    let records = store.get_ref().list(Scope::of(auth.identity())).await?;
    Ok(HttpResponse::Ok().json(records))
}

/// Existence first, then ownership: a missing record is 404 for everyone.
async fn load<S, R>(store: &S, id: ID<R>) -> Result<R, ApiError>
where
    S: Store<R>,
    R: Record,
{
    store.fetch(id).await?.ok_or(ApiError::NotFound(R::KIND))
}

pub async fn fetch<A, S, R>(
    auth: Auth<A>,
    store: web::Data<S>,
    id: web::Path<ID<R>>,
) -> Result<HttpResponse, ApiError>
where
    A: Accounts + 'static,
    S: Store<R> + 'static,
    R: Record,
{
    let record = load(store.get_ref(), id.into_inner()).await?;
    authorize(auth.identity(), &record)?;
    Ok(HttpResponse::Ok().json(record))
}

pub async fn create<A, S, R>(
    auth: Auth<A>,
    store: web::Data<S>,
    body: web::Json<R::Draft>,
) -> Result<HttpResponse, ApiError>
where
    A: Accounts + 'static,
    S: Store<R> + Store<Case> + 'static,
    R: Record,
{
    let record = R::draft(auth.identity().id, body.into_inner())?;
    if let Some(case) = record.parent() {
        let parent = load::<S, Case>(store.get_ref(), case).await?;
        authorize(auth.identity(), &parent)?;
    }
    Store::<R>::insert(store.get_ref(), &record).await?;
    log::info!("{} {} created by {}", R::KIND, record.id(), auth.identity().id);
    Ok(HttpResponse::Created().json(record))
}

/// Full replacement. Moving a hearing or document under another case needs
/// access to that case as well.
pub async fn update<A, S, R>(
    auth: Auth<A>,
    store: web::Data<S>,
    id: web::Path<ID<R>>,
    body: web::Json<R::Draft>,
) -> Result<HttpResponse, ApiError>
where
    A: Accounts + 'static,
    S: Store<R> + Store<Case> + 'static,
    R: Record,
{
    let prior = load(store.get_ref(), id.into_inner()).await?;
    authorize(auth.identity(), &prior)?;
    let record = R::draft(prior.owner(), body.into_inner())?.succeed(&prior);
    if let Some(case) = record.parent().filter(|case| Some(*case) != prior.parent()) {
        let parent = load::<S, Case>(store.get_ref(), case).await?;
        authorize(auth.identity(), &parent)?;
    }
    match Store::<R>::update(store.get_ref(), &record).await? {
        true => {
            log::info!("{} {} updated by {}", R::KIND, record.id(), auth.identity().id);
            Ok(HttpResponse::Ok().json(record))
        }
        false => Err(ApiError::NotFound(R::KIND)),
    }
}

pub async fn delete<A, S, R>(
    auth: Auth<A>,
    store: web::Data<S>,
    id: web::Path<ID<R>>,
) -> Result<HttpResponse, ApiError>
where
    A: Accounts + 'static,
    S: Store<R> + 'static,
    R: Record,
{
    let record = load(store.get_ref(), id.into_inner()).await?;
    authorize(auth.identity(), &record)?;
    match store.get_ref().delete(record.id()).await? {
        true => {
            log::info!("{} {} deleted by {}", R::KIND, record.id(), auth.identity().id);
            Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
        }
        false => Err(ApiError::NotFound(R::KIND)),
    }
}

fn mount<A, S, R>(cfg: &mut web::ServiceConfig)
where
    A: Accounts + 'static,
    S: Store<R> + Store<Case> + 'static,
    R: Record,
{
    cfg.service(
        web::scope(R::PATH)
            .route("", web::get().to(list::<A, S, R>))
            .route("", web::post().to(create::<A, S, R>))
            .route("/{id}", web::get().to(fetch::<A, S, R>))
            .route("/{id}", web::put().to(update::<A, S, R>))
            .route("/{id}", web::delete().to(delete::<A, S, R>)),
    );
}

/// Mounts the four record collections for the given account and record
/// stores.
pub fn routes<A, S>(cfg: &mut web::ServiceConfig)
where
    A: Accounts + 'static,
    S: Stores + 'static,
{
    mount::<A, S, Case>(cfg);
    mount::<A, S, Client>(cfg);
    mount::<A, S, Hearing>(cfg);
    mount::<A, S, Document>(cfg);
}
