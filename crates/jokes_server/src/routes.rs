//! Request handlers.
//!
//! ```text
//! GET  /jokes                        -> list_jokes
//! POST /jokes                        -> create_joke
//! GET  /jokes/random                 -> random_joke
//! GET  /jokes/random/{category}      -> random_joke_for_category
//! GET  /jokes/categories/{category}  -> jokes_for_category
//! GET  /jokes/{id}                   -> get_joke
//! POST /jokes/{id}                   -> attach_joke
//! GET  /jokes/{id}/{vote}            -> vote
//! GET  /categories                   -> list_categories
//! POST /categories                   -> create_category
//! GET  /health                       -> health
//! ```

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use jokes_core::{Category, Joke, JokeId};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{error::ApiError, state::AppState};

type Reply = (StatusCode, Json<Value>);

#[derive(Deserialize)]
pub struct NewCategory {
    category: String,
}

#[derive(Deserialize)]
pub struct NewJoke {
    content: String,
    category: String,
}

#[derive(Deserialize)]
pub struct CategoryRef {
    category: String,
}

pub async fn list_jokes(State(state): State<AppState>) -> Result<Json<Vec<Joke>>, ApiError> {
    let jokes = state.run(|service| service.list_jokes()).await?;
    Ok(Json(jokes))
}

pub async fn random_joke(State(state): State<AppState>) -> Result<Json<Joke>, ApiError> {
    state
        .run(|service| service.random_joke())
        .await
        .map(Json)
        .map_err(|err| err.empty_as("no jokes were found"))
}

pub async fn random_joke_for_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Joke>, ApiError> {
    state
        .run(move |service| service.random_joke_for_category(&category))
        .await
        .map(Json)
        .map_err(|err| {
            err.not_found_as("no category was found")
                .empty_as("no jokes for the provided category were found")
        })
}

pub async fn jokes_for_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Joke>>, ApiError> {
    state
        .run(move |service| service.jokes_for_category(&category))
        .await
        .map(Json)
        .map_err(|err| err.not_found_as("no jokes with provided category were found"))
}

pub async fn get_joke(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Joke>, ApiError> {
    let id = parse_joke_id(&id)?;
    state
        .run(move |service| service.get_joke(id))
        .await
        .map(Json)
        .map_err(|err| err.not_found_as("no joke with provided id was found"))
}

pub async fn create_joke(
    State(state): State<AppState>,
    payload: Result<Json<NewJoke>, JsonRejection>,
) -> Result<Reply, ApiError> {
    let Json(body) = payload?;
    state
        .run(move |service| service.create_joke_into(&body.category, &body.content))
        .await
        .map_err(|err| err.not_found_as("No category was found"))?;

    Ok(success(StatusCode::CREATED, "New joke was added"))
}

pub async fn attach_joke(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CategoryRef>, JsonRejection>,
) -> Result<Reply, ApiError> {
    let id = parse_joke_id(&id)?;
    let Json(body) = payload?;
    state
        .run(move |service| service.attach_joke(&body.category, id))
        .await
        .map_err(|err| err.not_found_as("No category was found"))?;

    Ok(success(StatusCode::OK, "Existing joke was added to a category"))
}

pub async fn vote(
    State(state): State<AppState>,
    Path((id, vote)): Path<(String, String)>,
) -> Result<Reply, ApiError> {
    let id = parse_joke_id(&id)?;
    state
        .run(move |service| service.vote(id, &vote))
        .await
        .map_err(|err| err.not_found_as("No joke was found"))?;

    Ok(success(StatusCode::OK, "A vote was added"))
}

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = state.run(|service| service.list_categories()).await?;
    Ok(Json(categories))
}

pub async fn create_category(
    State(state): State<AppState>,
    payload: Result<Json<NewCategory>, JsonRejection>,
) -> Result<Reply, ApiError> {
    let Json(body) = payload?;
    state
        .run(move |service| service.create_category(&body.category))
        .await?;

    Ok(success(StatusCode::CREATED, "New category was added"))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": jokes_core::core_version() }))
}

fn parse_joke_id(raw: &str) -> Result<JokeId, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid joke id `{raw}`")))
}

fn success(status: StatusCode, message: &str) -> Reply {
    (status, Json(json!({ "Success": message })))
}
