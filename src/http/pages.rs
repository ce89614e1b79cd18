//! Page handlers for the bundled demo application.
//!
//! Each handler hands a component name and props to the renderer; redirects
//! after mutations use 302 and rely on the protocol middleware to rewrite
//! them for PUT/PATCH/DELETE.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::inertia::{CommonProps, Inertia, InertiaRequest, InertiaResult, Prop, Props};

/// Application state injected into page handlers.
#[derive(Clone)]
pub struct AppState {
    pub inertia: Arc<Inertia>,
}

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
}

fn demo_users() -> Vec<User> {
    [(1, "Ada Lovelace", "ada@example.com"), (2, "Alan Turing", "alan@example.com")]
        .into_iter()
        .map(|(id, name, email)| User {
            id,
            name: name.to_string(),
            email: email.to_string(),
        })
        .collect()
}

/// Attach props shared by every page to the request.
pub async fn share_common_props(mut req: Request<Body>, next: Next) -> Response {
    req.extensions_mut().insert(CommonProps::new(|| {
        Props::new()
            .with("app", Props::new().with("name", env!("CARGO_PKG_NAME")))
            .with("flash", Prop::Value(serde_json::Value::Null))
    }));
    next.run(req).await
}

pub async fn home(
    State(state): State<AppState>,
    request: InertiaRequest,
) -> InertiaResult<Response> {
    let props = Props::new()
        .with("title", "Welcome")
        .with("stats", Prop::deferred(|| serde_json::json!({ "users": demo_users().len() })));

    state.inertia.render(&request, "Home", props)
}

pub async fn users_index(
    State(state): State<AppState>,
    request: InertiaRequest,
) -> InertiaResult<Response> {
    let props = Props::new()
        .with("users", Prop::deferred(demo_users))
        .with("total", Prop::deferred(|| demo_users().len()));

    state.inertia.render(&request, "Users/Index", props)
}

pub async fn users_show(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    request: InertiaRequest,
) -> InertiaResult<Response> {
    let Some(user) = demo_users().into_iter().find(|u| u.id == id) else {
        return Ok((StatusCode::NOT_FOUND, "User not found").into_response());
    };

    let props = Props::new().with("user", Prop::serialize(&user)?);
    state.inertia.render(&request, "Users/Show", props)
}

/// Mutations answer with a plain 302 back to the listing.
pub async fn users_mutate(Path(id): Path<u64>) -> Response {
    tracing::debug!(user_id = id, "User mutated");
    (StatusCode::FOUND, [(header::LOCATION, "/users")]).into_response()
}
