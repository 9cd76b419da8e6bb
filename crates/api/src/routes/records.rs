//! Generic list/detail/form endpoints, instantiated once per collection.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use domain::models::{EntityKind, Locale};
use domain::services::listing::{empty_as_none, list_records, ListQuery, Listing};
use domain::services::render::RenderContext;
use domain::services::FormDialog;
use domain::{Resource, Session};
use persistence::store::{remove_or_retire, Removal, StoreError};
use shared::pagination::Paginator;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::{AppState, HasStore, Stores};
use crate::error::ApiError;
use crate::extractors::SessionContext;
use crate::middleware::record_mutation;

/// Routes for one collection under `/api/v1/<kind>`.
pub fn routes<R>() -> Router<AppState>
where
    R: Resource,
    Stores: HasStore<R>,
{
    let collection = format!("/api/v1/{}", R::KIND.as_str());
    let item = format!("{}/:id", collection);

    Router::new()
        .route(&collection, get(list::<R>).post(create::<R>))
        .route(&item, get(show::<R>).put(update::<R>).delete(remove::<R>))
}

/// Render context for a request; an explicit `locale` parameter overrides
/// the session's.
pub fn render_context(session: &Session, locale: Option<Locale>) -> RenderContext {
    RenderContext::current(locale.unwrap_or(session.locale()))
}

pub fn require_manager(session: &Session, kind: EntityKind) -> Result<(), ApiError> {
    if session.can_manage(kind) {
        Ok(())
    } else {
        Err(ApiError::Forbidden(format!(
            "Role {} cannot modify {}",
            session.role(),
            kind.plural(Locale::En)
        )))
    }
}

/// Fetches a record the session may see; hidden records read as missing.
pub async fn find_visible<R>(state: &AppState, session: &Session, id: Uuid) -> Result<R, ApiError>
where
    R: Resource,
    Stores: HasStore<R>,
{
    let store = state.store::<R>();
    store
        .get(id)
        .await?
        .filter(|record| session.can_view(record))
        .ok_or_else(|| StoreError::not_found(R::KIND, id).into())
}

#[derive(Debug, serde::Deserialize)]
pub struct LocaleQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub locale: Option<Locale>,
}

async fn list<R>(
    State(state): State<AppState>,
    SessionContext(session): SessionContext,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Listing<R::Detail>>, ApiError>
where
    R: Resource,
    Stores: HasStore<R>,
{
    let Query(query) = query?;
    query.validate()?;

    let listing_config = &state.config.listing;
    let per_page = query.page_size_or(listing_config.default_page_size);
    if per_page > listing_config.max_page_size {
        return Err(ApiError::validation(format!(
            "Page size must be at most {}",
            listing_config.max_page_size
        )));
    }

    let mut paginator = Paginator::new(per_page)?;
    paginator.go_to(query.page());

    let ctx = render_context(&session, query.locale);
    let records = state.store::<R>().list().await?;
    let listing = list_records::<R>(records, &session, &query.filters(), &mut paginator, &ctx);

    Ok(Json(listing))
}

async fn show<R>(
    State(state): State<AppState>,
    SessionContext(session): SessionContext,
    id: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<LocaleQuery>, QueryRejection>,
) -> Result<Json<R::Detail>, ApiError>
where
    R: Resource,
    Stores: HasStore<R>,
{
    let Path(id) = id?;
    let Query(query) = query?;
    let record: R = find_visible(&state, &session, id).await?;
    Ok(Json(record.detail(&render_context(&session, query.locale))))
}

async fn create<R>(
    State(state): State<AppState>,
    SessionContext(session): SessionContext,
    payload: Result<Json<R::Form>, JsonRejection>,
) -> Result<(StatusCode, Json<R::Detail>), ApiError>
where
    R: Resource,
    Stores: HasStore<R>,
{
    require_manager(&session, R::KIND)?;
    let Json(form) = payload?;

    let store = state.store::<R>();
    let mut dialog = FormDialog::create(form);
    let record = dialog
        .submit_async(|_, form| async move {
            store.insert(R::create(form, Uuid::new_v4(), Utc::now())).await
        })
        .await?;

    info!(kind = %R::KIND, id = %record.id(), "Record created");
    record_mutation(R::KIND, "create");

    let ctx = render_context(&session, None);
    Ok((StatusCode::CREATED, Json(record.detail(&ctx))))
}

async fn update<R>(
    State(state): State<AppState>,
    SessionContext(session): SessionContext,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<R::Form>, JsonRejection>,
) -> Result<Json<R::Detail>, ApiError>
where
    R: Resource,
    Stores: HasStore<R>,
{
    require_manager(&session, R::KIND)?;
    let Path(id) = id?;
    let Json(form) = payload?;

    let mut current: R = find_visible(&state, &session, id).await?;
    let store = state.store::<R>();
    let mut dialog = FormDialog::edit(id, form);
    let record = dialog
        .submit_async(|_, form| async move {
            current.apply(form, Utc::now());
            store.update(current).await
        })
        .await?;

    info!(kind = %R::KIND, id = %id, "Record updated");
    record_mutation(R::KIND, "update");

    Ok(Json(record.detail(&render_context(&session, None))))
}

/// Deletes a record, or deactivates it for collections that never drop
/// rows. A deactivated record is returned with 200; a removal answers 204.
async fn remove<R>(
    State(state): State<AppState>,
    SessionContext(session): SessionContext,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Response, ApiError>
where
    R: Resource,
    Stores: HasStore<R>,
{
    require_manager(&session, R::KIND)?;
    let Path(id) = id?;
    find_visible::<R>(&state, &session, id).await?;

    let store = state.store::<R>();
    match remove_or_retire(store.as_ref(), id, Utc::now()).await? {
        Removal::Deleted => {
            info!(kind = %R::KIND, id = %id, "Record deleted");
            record_mutation(R::KIND, "delete");
            Ok(StatusCode::NO_CONTENT.into_response())
        }
        Removal::Retired(record) => {
            info!(kind = %R::KIND, id = %id, "Record deactivated");
            record_mutation(R::KIND, "deactivate");
            let ctx = render_context(&session, None);
            Ok(Json(record.detail(&ctx)).into_response())
        }
    }
}
