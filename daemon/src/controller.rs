//! HTTP surface of the catalog.
//!
//! Handlers only translate between HTTP and [`crate::services`]:
//! they pull ids, queries and bodies out of the request and wrap results in an [`Envelope`].

//----------------------------------------------------------------------------------------- std lib
use std::sync::Arc;
//--------------------------------------------------------------------------------- other libraries
use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use surrealdb::{Surreal, engine::any::Any};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
//-------------------------------------------------------------------------------- SONGBOOK libraries
use songbook_types::{Envelope, NewSong, SongChangeSet, SongField};

use crate::{
    errors::ApiError,
    services::{self, songs::PageRequest},
};

/// The database handle shared by every handler.
pub type Db = Arc<Surreal<Any>>;

/// Raw `?page=&limit=` parameters, parsed leniently by [`PageRequest::from_raw`].
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    page: Option<String>,
    limit: Option<String>,
}

/// Build the catalog router, every route lives under `/api`.
pub fn router(db: Db) -> Router {
    let songs = Router::new()
        .route("/", get(list_songs).post(create_song))
        .route("/multiple", post(create_songs))
        .route("/metadata", get(metadata))
        .route("/stats/artists", get(artist_stats))
        .route("/stats/albums", get(album_stats))
        .route("/by-artist/:artist", get(songs_by_artist))
        .route("/by-album/:album", get(songs_by_album))
        .route("/by-genre/:genre", get(songs_by_genre))
        .route("/:id", get(get_song).put(update_song).delete(delete_song));

    let health = Router::new()
        .route("/", get(health))
        .route("/ping", get(ping));

    Router::new()
        .nest("/api/songs", songs)
        .nest("/api/health", health)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(db)
}

fn respond<T: Serialize>(status: StatusCode, envelope: Envelope<T>) -> Response {
    (status, Json(envelope)).into_response()
}

fn ok<T: Serialize>(message: &str, data: T) -> Response {
    respond(StatusCode::OK, Envelope::success(message, Some(data)))
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::Validation(rejection.body_text()))
}

fn id(path: Result<Path<String>, PathRejection>) -> Result<String, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| ApiError::InvalidId(rejection.body_text()))
}

fn segment(path: Result<Path<String>, PathRejection>) -> Result<String, ApiError> {
    path.map(|Path(value)| value)
        .map_err(|rejection| ApiError::Validation(rejection.body_text()))
}

async fn health() -> Response {
    respond(StatusCode::OK, Envelope::<()>::success("RUNNING", None))
}

async fn ping() -> Response {
    respond(StatusCode::OK, Envelope::<()>::success("PONG", None))
}

async fn list_songs(
    State(db): State<Db>,
    params: Option<Query<ListParams>>,
) -> Result<Response, ApiError> {
    let params = params.map(|Query(params)| params).unwrap_or_default();
    let request = PageRequest::from_raw(params.page.as_deref(), params.limit.as_deref());

    let (songs, pagination) = services::songs::list(&*db, request).await?;

    Ok(respond(
        StatusCode::OK,
        Envelope::success("FETCH_ALL_SONGS_SUCCESS", Some(songs)).with_pagination(pagination),
    ))
}

async fn get_song(
    State(db): State<Db>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let song = services::songs::get(&*db, &id(path)?).await?;
    Ok(ok("FETCH_SONG_SUCCESS", song))
}

async fn create_song(
    State(db): State<Db>,
    payload: Result<Json<NewSong>, JsonRejection>,
) -> Result<Response, ApiError> {
    let song = services::songs::create(&*db, body(payload)?).await?;
    Ok(respond(
        StatusCode::CREATED,
        Envelope::success("ADD_SONG_SUCCESS", Some(song)),
    ))
}

async fn create_songs(
    State(db): State<Db>,
    payload: Result<Json<Vec<NewSong>>, JsonRejection>,
) -> Result<Response, ApiError> {
    let songs = services::songs::create_many(&*db, body(payload)?).await?;
    Ok(respond(
        StatusCode::CREATED,
        Envelope::success("ADD_MULTIPLE_SONGS_SUCCESS", Some(songs)),
    ))
}

async fn update_song(
    State(db): State<Db>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<SongChangeSet>, JsonRejection>,
) -> Result<Response, ApiError> {
    let id = id(path)?;
    let song = services::songs::update(&*db, &id, body(payload)?).await?;
    Ok(ok("UPDATE_SONG_SUCCESS", song))
}

async fn delete_song(
    State(db): State<Db>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    services::songs::delete(&*db, &id(path)?).await?;
    Ok(respond(
        StatusCode::OK,
        Envelope::<()>::success("DELETE_SONG_SUCCESS", None),
    ))
}

async fn metadata(State(db): State<Db>) -> Result<Response, ApiError> {
    let metadata = services::stats::metadata(&*db).await?;
    Ok(ok("FETCH_METADATA_SUCCESS", metadata))
}

async fn artist_stats(State(db): State<Db>) -> Result<Response, ApiError> {
    let stats = services::stats::stats_by(&*db, SongField::Artist).await?;
    Ok(ok("FETCH_ARTIST_STATS_SUCCESS", stats))
}

async fn album_stats(State(db): State<Db>) -> Result<Response, ApiError> {
    let stats = services::stats::stats_by(&*db, SongField::Album).await?;
    Ok(ok("FETCH_ALBUM_STATS_SUCCESS", stats))
}

async fn songs_by(
    db: &Surreal<Any>,
    field: SongField,
    value: String,
) -> Result<Response, ApiError> {
    let songs = services::songs::list_by(db, field, value).await?;
    let message = match field {
        SongField::Artist => "FETCH_SONGS_BY_ARTIST_SUCCESS",
        SongField::Album => "FETCH_SONGS_BY_ALBUM_SUCCESS",
        SongField::Genre => "FETCH_SONGS_BY_GENRE_SUCCESS",
    };
    Ok(ok(message, songs))
}

async fn songs_by_artist(
    State(db): State<Db>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    songs_by(&*db, SongField::Artist, segment(path)?).await
}

async fn songs_by_album(
    State(db): State<Db>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    songs_by(&*db, SongField::Album, segment(path)?).await
}

async fn songs_by_genre(
    State(db): State<Db>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    songs_by(&*db, SongField::Genre, segment(path)?).await
}
