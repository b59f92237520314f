use crate::config::ServerConfig;
use crate::game::{SharedTable, Table};
use std::convert::Infallible;
use tracing::info;
use tracing_subscriber::EnvFilter;
use warp::{
    http::{header, Method},
    Filter, Rejection, Reply,
};

mod config;
mod game;
mod handler;
mod render;

// Form and JSON move bodies are a few bytes
const MAX_BODY_BYTES: u64 = 1024;

#[tokio::main]
async fn main() {
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, &config.log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(non_blocking)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Error: failed to install log subscriber: {}", err);
        std::process::exit(1);
    }

    let table = Table::new(config.terminal_move_policy()).shared();
    info!("created game table with config {:?}", config);

    let addr = config.socket_addr();
    info!("listening on http://{}", addr);
    warp::serve(routes(table)).run(addr).await;
}

fn routes(
    table: SharedTable,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let index_route = warp::path::end()
        .and(warp::get())
        .and(with_table(table.clone()))
        .and_then(handler::index_handler);

    let health_route = warp::path!("health").and_then(handler::health_handler);

    let state_route = warp::path!("state")
        .and(warp::get())
        .and(with_table(table.clone()))
        .and_then(handler::state_handler);

    let play = warp::path!("play")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES));
    let play_routes = play
        .clone()
        .and(warp::body::json())
        .and(with_table(table.clone()))
        .and_then(handler::play_handler)
        .or(play
            .and(warp::body::form())
            .and(with_table(table.clone()))
            .and_then(handler::play_form_handler));

    let reset = warp::path!("reset");
    let reset_routes = reset
        .clone()
        .and(warp::post())
        .and(with_table(table.clone()))
        .and_then(handler::reset_handler)
        .or(reset
            .and(warp::get())
            .and(with_table(table))
            .and_then(handler::reset_redirect_handler));

    index_route
        .or(health_route)
        .or(state_route)
        .or(play_routes)
        .or(reset_routes)
        .with(
            warp::cors()
                .allow_methods(&[Method::OPTIONS, Method::GET, Method::POST])
                .allow_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
                .max_age(300)
                .allow_any_origin(),
        )
        .with(warp::trace::request())
}

fn with_table(
    table: SharedTable,
) -> impl Filter<Extract = (SharedTable,), Error = Infallible> + Clone {
    warp::any().map(move || table.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::TerminalMovePolicy;
    use serde_json::{json, Value};
    use warp::http::StatusCode;

    fn body_json(body: &[u8]) -> Value {
        serde_json::from_slice(body).unwrap()
    }

    async fn post_move(table: &SharedTable, col: i32) -> (StatusCode, Value) {
        let res = warp::test::request()
            .method("POST")
            .path("/play")
            .json(&json!({ "col": col }))
            .reply(&routes(table.clone()))
            .await;
        (res.status(), body_json(res.body()))
    }

    #[tokio::test]
    async fn test_health() {
        let table = Table::new(TerminalMovePolicy::AutoReset).shared();
        let res = warp::test::request()
            .path("/health")
            .reply(&routes(table))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_state() {
        let table = Table::new(TerminalMovePolicy::AutoReset).shared();
        let res = warp::test::request()
            .path("/state")
            .reply(&routes(table))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res.body());
        assert_eq!(body["status"], "InProgress");
        assert_eq!(body["active_player"], 1);
        assert_eq!(body["grid"][5], json!([0, 0, 0, 0, 0, 0, 0]));
        assert_eq!(body["scores"], json!({ "player1": 0, "player2": 0 }));
    }

    #[tokio::test]
    async fn test_json_move_returns_state() {
        let table = Table::new(TerminalMovePolicy::AutoReset).shared();
        let (status, body) = post_move(&table, 3).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["grid"][5][3], 1);
        assert_eq!(body["active_player"], 2);
    }

    #[tokio::test]
    async fn test_invalid_move_is_rejected() {
        let table = Table::new(TerminalMovePolicy::AutoReset).shared();
        post_move(&table, 0).await;
        let (status, body) = post_move(&table, 7).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["column"], 7);
        assert_eq!(body["error"], "Column 7 is outside of the board");

        let table = table.lock().await;
        assert_eq!(table.game_state().moves_played(), 1);
        assert_eq!(table.state().game.active_player.number(), 2);
    }

    #[tokio::test]
    async fn test_winning_move_updates_scores() {
        let table = Table::new(TerminalMovePolicy::AutoReset).shared();
        for col in [3, 4, 3, 4, 3, 4] {
            post_move(&table, col).await;
        }
        let (_, body) = post_move(&table, 3).await;
        assert_eq!(body["status"], "Win:1");
        assert_eq!(body["active_player"], 1);
        assert_eq!(body["scores"]["player1"], 1);

        // The next move opens a fresh game
        let (_, body) = post_move(&table, 0).await;
        assert_eq!(body["status"], "InProgress");
        assert_eq!(body["grid"][5][0], 1);
        assert_eq!(body["grid"][5][3], 0);
        assert_eq!(body["scores"]["player1"], 1);
    }

    #[tokio::test]
    async fn test_form_move_redirects() {
        let table = Table::new(TerminalMovePolicy::AutoReset).shared();
        let res = warp::test::request()
            .method("POST")
            .path("/play")
            .header("content-type", "application/x-www-form-urlencoded")
            .body("col=2")
            .reply(&routes(table.clone()))
            .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers()["location"], "/");
        assert_eq!(table.lock().await.state().game.grid[5][2], 1);
    }

    #[tokio::test]
    async fn test_form_move_into_full_column() {
        let table = Table::new(TerminalMovePolicy::AutoReset).shared();
        for _ in 0..6 {
            post_move(&table, 1).await;
        }
        let res = warp::test::request()
            .method("POST")
            .path("/play")
            .header("content-type", "application/x-www-form-urlencoded")
            .body("col=1")
            .reply(&routes(table.clone()))
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(res.body().as_ref(), b"Column 1 is full");
    }

    #[tokio::test]
    async fn test_reset() {
        let table = Table::new(TerminalMovePolicy::AutoReset).shared();
        post_move(&table, 4).await;
        let res = warp::test::request()
            .method("POST")
            .path("/reset")
            .reply(&routes(table.clone()))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res.body());
        assert_eq!(body["grid"][5][4], 0);
        assert_eq!(body["active_player"], 1);

        post_move(&table, 4).await;
        let res = warp::test::request()
            .path("/reset")
            .reply(&routes(table.clone()))
            .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(table.lock().await.game_state().moves_played(), 0);
    }

    #[tokio::test]
    async fn test_index_page() {
        let table = Table::new(TerminalMovePolicy::AutoReset).shared();
        post_move(&table, 6).await;
        let res = warp::test::request().path("/").reply(&routes(table)).await;
        assert_eq!(res.status(), StatusCode::OK);
        let page = String::from_utf8(res.body().to_vec()).unwrap();
        assert!(page.contains("Player 2 to move"));
        assert_eq!(page.matches("cell p1").count(), 1);
    }
}
