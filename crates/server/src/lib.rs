use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{ServerState, router, run, run_with_listener, spawn_with_listener};

mod expenses;
mod export;
mod server;
mod vehicles;

pub mod types {
    pub mod common {
        pub use api_types::common::ActionResponse;
    }

    pub mod vehicle {
        pub use api_types::vehicle::{
            MarginUpdate, SellRequest, VehicleCreated, VehicleListResponse, VehicleNew,
            VehicleView,
        };
    }

    pub mod expense {
        pub use api_types::expense::{ExpenseNew, ExpenseUpdate, ExpenseView};
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

#[derive(Serialize)]
pub(crate) struct Error {
    pub(crate) error: String,
}

/// Outcome envelope for the form-style mutations: validation problems come
/// back as `success: false` with the field named in the message, store
/// failures are logged and replaced with a generic message.
pub(crate) fn action_outcome(
    result: engine::ResultEngine<()>,
    done: &str,
) -> Json<api_types::common::ActionResponse> {
    use api_types::common::ActionResponse;

    match result {
        Ok(()) => Json(ActionResponse::ok(done)),
        Err(EngineError::Store(err)) => {
            tracing::error!("store error: {err}");
            Json(ActionResponse::fail("Something went wrong"))
        }
        Err(err) => Json(ActionResponse::fail(err.to_string())),
    }
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::InvalidAmount(_) | EngineError::Validation { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Store(store_err) => {
            tracing::error!("store error: {store_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
