use crate::{game::SharedTable, render};
use common::messages::{ErrorResponse, PlayRequest};
use warp::{
    http::{StatusCode, Uri},
    reply::{html, json, with_status},
    Rejection, Reply,
};

type Result<T> = std::result::Result<T, Rejection>;

pub async fn index_handler(table: SharedTable) -> Result<impl Reply> {
    let state = table.lock().await.state();
    Ok(html(render::render_page(&state)))
}

pub async fn state_handler(table: SharedTable) -> Result<impl Reply> {
    let state = table.lock().await.state();
    Ok(json(&state))
}

pub async fn play_handler(body: PlayRequest, table: SharedTable) -> Result<impl Reply> {
    let result = table.lock().await.play(body.col);
    match result {
        Ok(state) => Ok(with_status(json(&state), StatusCode::OK)),
        Err(err) => Ok(with_status(
            json(&ErrorResponse::from(err)),
            StatusCode::BAD_REQUEST,
        )),
    }
}

// Moves submitted from the HTML page go back to the page on success
pub async fn play_form_handler(body: PlayRequest, table: SharedTable) -> Result<impl Reply> {
    let result = table.lock().await.play(body.col);
    match result {
        Ok(_) => Ok(warp::redirect::see_other(Uri::from_static("/")).into_response()),
        Err(err) => Ok(with_status(err.to_string(), StatusCode::BAD_REQUEST).into_response()),
    }
}

pub async fn reset_handler(table: SharedTable) -> Result<impl Reply> {
    let state = table.lock().await.reset();
    Ok(json(&state))
}

pub async fn reset_redirect_handler(table: SharedTable) -> Result<impl Reply> {
    table.lock().await.reset();
    Ok(warp::redirect::see_other(Uri::from_static("/")))
}

pub async fn health_handler() -> Result<impl Reply> {
    Ok(StatusCode::OK)
}
