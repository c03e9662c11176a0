mod board;
mod config;
mod engine;
mod error;
mod room;
mod roster;
mod turn;
mod types;
mod words;

use std::collections::HashMap;
use std::sync::Arc;

use askama::Template;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, Query, State, WebSocketUpgrade};
use axum::{Form, Router};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect};
use axum::routing::{get, post};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::Mutex;
use tower_http::services::ServeDir;
use uuid::Uuid;

use crate::room::{Registry, RoomCommand, RoomEvent, RoomHandle};
use crate::types::ClientMsg;
use crate::words::{BuiltinWords, FileWords, WordSource};

#[derive(Clone)]
struct AppState {
    registry: Arc<Registry>,
}

// ─── Templates ────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate;

#[derive(Template)]
#[template(path = "lobby.html")]
struct LobbyTemplate {
    code: String,
}

#[derive(Template)]
#[template(path = "game.html")]
struct GameTemplate {
    code: String,
}

#[derive(Template)]
#[template(path = "rejoin.html")]
struct RejoinTemplate;

// ─── Routes ───────────────────────────────────────────────────────

async fn index_page() -> impl IntoResponse {
    Html(IndexTemplate.to_string())
}

async fn create_room(State(state): State<AppState>) -> impl IntoResponse {
    let handle = state.registry.create_room();
    Redirect::to(&format!("/l/{}", handle.code))
}

#[derive(Deserialize)]
struct JoinForm {
    game_code: String,
}

async fn join_room(State(state): State<AppState>, Form(form): Form<JoinForm>) -> impl IntoResponse {
    if state.registry.room(&form.game_code).is_some() {
        Redirect::to(&format!("/l/{}", form.game_code)).into_response()
    } else {
        Html(RejoinTemplate.to_string()).into_response()
    }
}

async fn lobby_page(Path(code): Path<String>, State(state): State<AppState>) -> impl IntoResponse {
    if state.registry.room(&code).is_some() {
        Html(LobbyTemplate { code }.to_string()).into_response()
    } else {
        Html(RejoinTemplate.to_string()).into_response()
    }
}

async fn game_page(Path(code): Path<String>, State(state): State<AppState>) -> impl IntoResponse {
    if state.registry.room(&code).is_some() {
        Html(GameTemplate { code }.to_string()).into_response()
    } else {
        Html(RejoinTemplate.to_string()).into_response()
    }
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(code): Path<String>,
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let Some(handle) = state.registry.room(&code) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    // The reconnect token is the client id handed out on first connect.
    let token = params
        .get("client")
        .and_then(|raw| Uuid::parse_str(raw).ok());
    ws.on_upgrade(move |socket| handle_socket(socket, handle, token))
        .into_response()
}

async fn handle_socket(socket: WebSocket, handle: RoomHandle, token: Option<Uuid>) {
    let (sender, mut receiver) = socket.split();
    let sender = Arc::new(Mutex::new(sender));

    let socket_id = Uuid::new_v4();
    tracing::info!("WebSocket connected: {} room: {}", socket_id, handle.code);

    // Subscribe before the Connect command goes out so the reply is not
    // missed, then forward room events addressed to this socket.
    let mut event_rx = handle.event_tx.subscribe();
    let sender_clone = sender.clone();
    let event_task = tokio::spawn(async move {
        loop {
            match event_rx.recv().await {
                Ok(event) => {
                    let msg = match &event {
                        RoomEvent::SendTo {
                            socket_id: target,
                            msg,
                        } if *target == socket_id => msg,
                        RoomEvent::Broadcast { msg } => msg,
                        RoomEvent::SendTo { .. } => continue,
                    };
                    if let Ok(json) = serde_json::to_string(msg) {
                        let mut s = sender_clone.lock().await;
                        if s.send(Message::Text(json.into())).await.is_err() {
                            return;
                        }
                    }
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                Err(tokio::sync::broadcast::error::RecvError::Closed) => return,
            }
        }
    });

    let _ = handle
        .cmd_tx
        .send(RoomCommand::Connect { socket_id, token })
        .await;

    // Process incoming messages
    while let Some(Ok(msg)) = receiver.next().await {
        let Message::Text(text) = msg else { continue };

        let client_msg: ClientMsg = match serde_json::from_str(&text) {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!("Invalid message: {}", e);
                continue;
            }
        };

        let cmd = match client_msg {
            ClientMsg::AddPlayer => RoomCommand::AddPlayer { socket_id },
            ClientMsg::RemovePlayer { player_id } => RoomCommand::RemovePlayer {
                socket_id,
                player_id,
            },
            ClientMsg::SwitchTeam { player_id } => RoomCommand::SwitchTeam {
                socket_id,
                player_id,
            },
            ClientMsg::SwitchRole { player_id } => RoomCommand::SwitchRole {
                socket_id,
                player_id,
            },
            ClientMsg::StartGame => RoomCommand::StartGame { socket_id },
            ClientMsg::SubmitClue { word, number } => RoomCommand::SubmitClue {
                socket_id,
                word,
                number,
            },
            ClientMsg::Guess { word } => RoomCommand::Guess { socket_id, word },
            ClientMsg::PauseGame => RoomCommand::PauseGame { socket_id },
        };

        if handle.cmd_tx.send(cmd).await.is_err() {
            break;
        }
    }

    // Socket disconnected
    tracing::info!("WebSocket disconnected: {}", socket_id);
    event_task.abort();

    let _ = handle
        .cmd_tx
        .send(RoomCommand::Disconnect { socket_id })
        .await;
}

// ─── Main ─────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    config::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .expect("Invalid PORT");

    let game_config = config::load();

    let words: Arc<dyn WordSource> = match config::words_file_path(&game_config) {
        Some(path) => Arc::new(FileWords::load(&path).expect("Failed to load words file")),
        None => Arc::new(BuiltinWords),
    };

    let registry = Registry::new(game_config, words);

    let state = AppState { registry };

    let app = Router::new()
        .route("/", get(index_page))
        .route("/create", get(create_room))
        .route("/join", post(join_room))
        .route("/l/{code}", get(lobby_page))
        .route("/g/{code}", get(game_page))
        .route("/ws/{code}", get(ws_handler))
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .expect("Failed to bind");

    tracing::info!("codewords server running on port {}", port);

    axum::serve(listener, app).await.unwrap();
}
