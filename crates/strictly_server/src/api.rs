//! HTTP API over a shared registry.
//!
//! Every handler takes the registry lock for exactly one registry operation,
//! so requests never observe each other's partial state.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use strictly_escrow::{
    Clock, ErrorClass, EscrowError, InMemoryLedger, Ledger, Registry, TracingSink,
};
use strictly_tictactoe::{AccountId, Game, GameId};
use tower::ServiceBuilder;
use tracing::{debug, info, instrument, warn};

/// Header carrying the authenticated caller's account id.
pub const CALLER_HEADER: &str = "x-account-id";

/// Registry type served over HTTP.
pub type HttpRegistry<C> = Registry<InMemoryLedger, C, TracingSink>;

/// State shared by all handlers.
pub struct AppState<C> {
    registry: Arc<Mutex<HttpRegistry<C>>>,
}

impl<C> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<C> AppState<C> {
    /// Wraps a registry for sharing across requests.
    pub fn new(registry: HttpRegistry<C>) -> Self {
        Self {
            registry: Arc::new(Mutex::new(registry)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HttpRegistry<C>>, ApiError> {
        self.registry.lock().map_err(|_| ApiError::Poisoned)
    }
}

/// Request body for `POST /games`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGameRequest {
    /// Seat One.
    pub player_one: AccountId,
    /// Seat Two.
    pub player_two: AccountId,
}

/// Response body for `POST /games`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGameResponse {
    /// New game id.
    pub game_id: GameId,
}

/// Request body for `POST /games/{id}/marks`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MarkRequest {
    /// Row (0-2).
    pub row: usize,
    /// Column (0-2).
    pub col: usize,
}

/// A game as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameView {
    /// The full game record.
    #[serde(flatten)]
    pub game: Game,
    /// Human-readable status line.
    pub status: String,
    /// Account owed or paid the stake, once resolved.
    pub prize_recipient: Option<AccountId>,
}

impl From<&Game> for GameView {
    fn from(game: &Game) -> Self {
        Self {
            game: game.clone(),
            status: game.status_string(),
            prize_recipient: game.prize_recipient().cloned(),
        }
    }
}

/// Response body for `GET /accounts/{account}/balance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceResponse {
    /// Queried account.
    pub account: AccountId,
    /// Its balance.
    pub balance: u64,
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
    /// Games created so far.
    pub games: u64,
    /// Games still unresolved.
    pub open_games: usize,
}

/// Error body returned for every rejected request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
    /// Machine-readable error name.
    pub kind: String,
    /// `input`, `state_conflict`, `resource` or `server`.
    pub class: String,
}

/// Errors a handler can return.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ApiError {
    /// The registry rejected the operation.
    #[display("{_0}")]
    Escrow(EscrowError),
    /// The caller header is absent or empty.
    #[display("Missing {} header", CALLER_HEADER)]
    MissingCaller,
    /// A previous request panicked while holding the registry.
    #[display("Registry unavailable")]
    Poisoned,
}

impl From<EscrowError> for ApiError {
    fn from(err: EscrowError) -> Self {
        ApiError::Escrow(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, class) = match &self {
            ApiError::Escrow(err) => {
                let status = match (err, err.class()) {
                    (EscrowError::InvalidGameId { .. }, _) => StatusCode::NOT_FOUND,
                    (_, ErrorClass::Input) => StatusCode::BAD_REQUEST,
                    (_, ErrorClass::StateConflict) => StatusCode::CONFLICT,
                    (_, ErrorClass::Resource) => StatusCode::PAYMENT_REQUIRED,
                };
                (status, err.kind().to_string(), err.class().to_string())
            }
            ApiError::MissingCaller => (
                StatusCode::UNAUTHORIZED,
                "MissingCaller".to_string(),
                ErrorClass::Input.to_string(),
            ),
            ApiError::Poisoned => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Poisoned".to_string(),
                "server".to_string(),
            ),
        };

        let body = ErrorBody {
            error: self.to_string(),
            kind,
            class,
        };
        (status, Json(body)).into_response()
    }
}

/// Builds the router.
pub fn router<C>(state: AppState<C>) -> Router
where
    C: Clock + Send + 'static,
{
    Router::new()
        .route("/health", get(health::<C>))
        .route("/games", post(create_game::<C>))
        .route("/games/{id}", get(get_game::<C>))
        .route("/games/{id}/marks", post(mark_space::<C>))
        .route("/games/{id}/release", post(release::<C>))
        .route("/accounts/{account}/balance", get(balance::<C>))
        .layer(ServiceBuilder::new().map_request(|req: Request<Body>| {
            info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
            req
        }))
        .with_state(state)
}

fn caller(headers: &HeaderMap) -> Result<AccountId, ApiError> {
    headers
        .get(CALLER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(AccountId::from)
        .ok_or_else(|| {
            warn!("Request without caller identity");
            ApiError::MissingCaller
        })
}

async fn health<C: Clock + Send + 'static>(
    State(state): State<AppState<C>>,
) -> Result<Json<HealthResponse>, ApiError> {
    let registry = state.lock()?;
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        games: registry.game_count(),
        open_games: registry.open_games(),
    }))
}

#[instrument(skip(state, headers, req))]
async fn create_game<C: Clock + Send + 'static>(
    State(state): State<AppState<C>>,
    headers: HeaderMap,
    Json(req): Json<CreateGameRequest>,
) -> Result<(StatusCode, Json<CreateGameResponse>), ApiError> {
    let creator = caller(&headers)?;
    let mut registry = state.lock()?;
    let game_id = registry.create_game(&creator, req.player_one, req.player_two)?;
    Ok((StatusCode::CREATED, Json(CreateGameResponse { game_id })))
}

#[instrument(skip(state))]
async fn get_game<C: Clock + Send + 'static>(
    State(state): State<AppState<C>>,
    Path(id): Path<GameId>,
) -> Result<Json<GameView>, ApiError> {
    let registry = state.lock()?;
    let game = registry.game(id)?;
    debug!(game_id = id, result = %game.result(), "Game fetched");
    Ok(Json(GameView::from(game)))
}

#[instrument(skip(state, headers))]
async fn mark_space<C: Clock + Send + 'static>(
    State(state): State<AppState<C>>,
    Path(id): Path<GameId>,
    headers: HeaderMap,
    Json(req): Json<MarkRequest>,
) -> Result<Json<GameView>, ApiError> {
    let actor = caller(&headers)?;
    let mut registry = state.lock()?;
    let marked = registry.mark_space(&actor, id, req.row, req.col)?;
    if marked.outcome.is_terminal() {
        info!(game_id = id, outcome = ?marked.outcome, "Game resolved over HTTP");
    }
    Ok(Json(GameView::from(registry.game(id)?)))
}

#[instrument(skip(state))]
async fn release<C: Clock + Send + 'static>(
    State(state): State<AppState<C>>,
    Path(id): Path<GameId>,
) -> Result<Json<GameView>, ApiError> {
    let mut registry = state.lock()?;
    registry.release_funds_after_expiration(id)?;
    Ok(Json(GameView::from(registry.game(id)?)))
}

#[instrument(skip(state))]
async fn balance<C: Clock + Send + 'static>(
    State(state): State<AppState<C>>,
    Path(account): Path<String>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let account = AccountId::from(account);
    let registry = state.lock()?;
    let balance = registry.ledger().balance_of(&account);
    Ok(Json(BalanceResponse { account, balance }))
}
