// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Form, Json, Router,
    extract::{
        FromRequest, Multipart, Query, Request, State as AxumState,
        multipart::{MultipartError, MultipartRejection},
        rejection::{FormRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::Parser;
use loyalty_crm_api::{
    ApiError, ChangeHistoryRequest, ChangeHistoryResponse, ClientInfo, GetClientRequest,
    ListClientsResponse, ReassignCardRequest, ReassignCardResponse, RegisterClientRequest,
    RegisterClientResponse, VerifyCardRequest, VerifyCardResponse, get_change_history, get_client,
    list_clients, reassign_card, register_client, verify_card,
};
use loyalty_crm_persistence::{Persistence, PersistenceError};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Loyalty CRM Server - HTTP server for VIP client cards
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,
}

/// Errors that stop the server from starting or serving.
#[derive(Debug, thiserror::Error)]
enum ServerError {
    /// The store could not be opened.
    #[error("Failed to open the store: {0}")]
    Persistence(#[from] PersistenceError),
    /// The bind address is not an IP address.
    #[error("Invalid bind address '{address}': {source}")]
    InvalidBindAddress {
        address: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// Binding or serving failed.
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application state shared across handlers.
///
/// The store is constructed once in `main` and injected here.
#[derive(Clone)]
struct AppState {
    /// The client and card history store.
    persistence: Arc<Mutex<Persistence>>,
}

/// Parameters accepted by `/clientes`, from a form body, a multipart body,
/// or a query string.
///
/// `action` selects the operation; the other fields are read by the
/// operations that need them.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
struct ActionParams {
    /// The operation to run.
    action: Option<String>,
    /// The client key.
    cedula: Option<String>,
    /// The card being replaced.
    tarjeta_anterior: Option<String>,
    /// The replacement card.
    tarjeta_nueva: Option<String>,
    /// The reason category, or free text.
    motivo: Option<String>,
    /// The description when the reason is `Otro`.
    motivo_otro: Option<String>,
    /// The card number to verify.
    numero: Option<String>,
    /// The card number on registration. Ignored by history lookups.
    num_tarjeta: Option<String>,
    /// The client's full name.
    nombre: Option<String>,
    /// The client's phone number.
    telefono: Option<String>,
    /// The client's birthday as `DD/MM`.
    fecha_cumpleanos: Option<String>,
    /// Where the client is from.
    lugar_origen: Option<String>,
    /// The card issue date as `YYYY-MM-DD`.
    fecha_entrega_tarjeta: Option<String>,
    /// Comma-delimited allergy tags.
    alergias: Option<String>,
    /// Free-text preferences.
    gustos_especiales: Option<String>,
}

/// Success envelope shared by every action.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct ActionResponse {
    /// Always true.
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    existe: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_tarjeta: Option<String>,
}

impl ActionResponse {
    fn ok() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }
}

/// Failure envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Always false.
    success: bool,
    /// The error message.
    message: String,
}

/// HTTP error wrapper that converts API errors to HTTP responses.
#[derive(Debug)]
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            success: false,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::CardAlreadyAssigned { .. } | ApiError::DuplicateClient { .. } => {
                StatusCode::CONFLICT
            }
            ApiError::StorageFailure { .. } => {
                error!(error = %err, "Storage failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for HttpError {
    fn from(err: serde_json::Error) -> Self {
        error!(error = %err, "Failed to encode response");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Failed to encode response: {err}"),
        }
    }
}

/// Builds the error for a request whose body or query could not be read.
fn unreadable_request(status: StatusCode, message: String) -> HttpError {
    warn!(%status, message = %message, "Rejected unreadable request");
    HttpError { status, message }
}

impl From<FormRejection> for HttpError {
    fn from(rejection: FormRejection) -> Self {
        unreadable_request(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartRejection> for HttpError {
    fn from(rejection: MultipartRejection) -> Self {
        unreadable_request(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartError> for HttpError {
    fn from(err: MultipartError) -> Self {
        unreadable_request(err.status(), err.body_text())
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        unreadable_request(rejection.status(), rejection.body_text())
    }
}

fn unknown_action(action: &str) -> HttpError {
    warn!(action, "Unknown action");
    HttpError {
        status: StatusCode::BAD_REQUEST,
        message: format!("Acción no reconocida: {action}"),
    }
}

fn field(value: Option<String>) -> String {
    value.unwrap_or_default()
}

fn is_multipart(request: &Request) -> bool {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| {
            value
                .trim_start()
                .to_ascii_lowercase()
                .starts_with("multipart/form-data")
        })
}

/// Reads the POST parameters from a url-encoded or a multipart body.
///
/// Multipart fields are read as text; unknown field names are ignored.
///
/// # Errors
///
/// Returns an error if the content type is not a form type, or if the body
/// cannot be decoded.
async fn read_post_params(request: Request) -> Result<ActionParams, HttpError> {
    if !is_multipart(&request) {
        let Form(params) = Form::<ActionParams>::from_request(request, &()).await?;
        return Ok(params);
    }

    let mut multipart: Multipart = Multipart::from_request(request, &()).await?;
    let mut fields: serde_json::Map<String, serde_json::Value> = serde_json::Map::new();
    while let Some(part) = multipart.next_field().await? {
        let Some(name) = part.name().map(str::to_string) else {
            continue;
        };
        let value: String = part.text().await?;
        fields.insert(name, serde_json::Value::String(value));
    }

    serde_json::from_value(serde_json::Value::Object(fields)).map_err(|err| {
        unreadable_request(
            StatusCode::BAD_REQUEST,
            format!("Failed to read multipart body: {err}"),
        )
    })
}

/// Handler for POST `/clientes`.
///
/// Runs the state-changing actions.
async fn handle_post_action(
    AxumState(app_state): AxumState<AppState>,
    request: Request,
) -> Result<Json<ActionResponse>, HttpError> {
    let params: ActionParams = read_post_params(request).await?;
    let action: String = params.action.clone().unwrap_or_default();
    info!(action = %action, "Handling POST /clientes");

    let mut persistence = app_state.persistence.lock().await;

    match action.as_str() {
        "reasignar_tarjeta" => {
            let request: ReassignCardRequest = ReassignCardRequest {
                client_key: field(params.cedula),
                previous_card: params.tarjeta_anterior,
                new_card: field(params.tarjeta_nueva),
                reason: field(params.motivo),
                other_reason: params.motivo_otro,
            };
            let response: ReassignCardResponse = reassign_card(&mut persistence, request)?;
            Ok(Json(ActionResponse {
                message: Some(response.message),
                ..ActionResponse::ok()
            }))
        }
        "registrar_cliente" => {
            let request: RegisterClientRequest = RegisterClientRequest {
                client_key: field(params.cedula),
                name: field(params.nombre),
                phone: field(params.telefono),
                birthday: field(params.fecha_cumpleanos),
                origin: field(params.lugar_origen),
                card_number: params.num_tarjeta,
                card_issued_on: params.fecha_entrega_tarjeta,
                allergies: params.alergias,
                preferences: params.gustos_especiales,
            };
            let response: RegisterClientResponse = register_client(&mut persistence, request)?;
            Ok(Json(ActionResponse {
                message: Some(response.message),
                id: Some(response.client_key),
                num_tarjeta: Some(response.card_number),
                ..ActionResponse::ok()
            }))
        }
        other => Err(unknown_action(other)),
    }
}

/// Handler for GET `/clientes`.
///
/// Runs the read-only actions.
async fn handle_get_action(
    AxumState(app_state): AxumState<AppState>,
    query: Result<Query<ActionParams>, QueryRejection>,
) -> Result<Json<ActionResponse>, HttpError> {
    let Query(params) = query?;
    let action: String = params.action.clone().unwrap_or_default();
    info!(action = %action, "Handling GET /clientes");

    let mut persistence = app_state.persistence.lock().await;

    match action.as_str() {
        "verificar_tarjeta" => {
            let request: VerifyCardRequest = VerifyCardRequest {
                card_number: field(params.numero),
            };
            let response: VerifyCardResponse = verify_card(&mut persistence, &request)?;
            Ok(Json(ActionResponse {
                existe: Some(response.exists),
                ..ActionResponse::ok()
            }))
        }
        "historial_cambios" => {
            let request: ChangeHistoryRequest = ChangeHistoryRequest {
                client_key: field(params.cedula),
            };
            let response: ChangeHistoryResponse = get_change_history(&mut persistence, &request)?;
            Ok(Json(ActionResponse {
                data: Some(serde_json::to_value(response.entries)?),
                ..ActionResponse::ok()
            }))
        }
        "obtener_cliente" => {
            let request: GetClientRequest = GetClientRequest {
                client_key: field(params.cedula),
            };
            let client: ClientInfo = get_client(&mut persistence, &request)?;
            Ok(Json(ActionResponse {
                data: Some(serde_json::to_value(client)?),
                ..ActionResponse::ok()
            }))
        }
        "obtener_clientes" => {
            let response: ListClientsResponse = list_clients(&mut persistence)?;
            Ok(Json(ActionResponse {
                data: Some(serde_json::to_value(response.clients)?),
                ..ActionResponse::ok()
            }))
        }
        other => Err(unknown_action(other)),
    }
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/clientes", get(handle_get_action).post(handle_post_action))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Loyalty CRM Server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!(path = %db_path, "Using file-based database");
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };
    let app: Router = build_router(app_state);

    let ip: IpAddr = args
        .bind
        .parse()
        .map_err(|source| ServerError::InvalidBindAddress {
            address: args.bind.clone(),
            source,
        })?;
    let addr: SocketAddr = SocketAddr::new(ip, args.port);
    info!(%addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
