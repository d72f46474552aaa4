//! Tally Server - small HTTP API for data and diagnostic endpoints
//!
//! Every request passes a shared pipeline before and after its handler runs:
//!
//! - **CORS gate**: answers preflight probes directly and stamps permissive
//!   origin headers on everything else
//! - **Token auth**: `/get_token` exchanges the configured credential pair for
//!   a signed bearer token; protected handlers verify it as their first step
//! - **Error envelope**: every failure renders as `{"status", "message"}` JSON
//!   from a single place, with internal errors masked as a generic 500
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! ## Public Endpoints (No Authentication)
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `POST /get_token` - Exchange credentials for a bearer token
//!
//! ## Protected Endpoints (Bearer Token Required)
//!
//! - `GET /api/v1/sheets` - List available sheets
//! - `GET /api/v1/sheets/{name}` - Fetch one sheet
//! - `GET /api/v1/summary` - Numeric summary of a sheet column
//!
//! Protected endpoints accept the token either as `Authorization: Bearer <t>`
//! or as an explicit `?token=<t>` query parameter.

pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod sheets;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult, ErrorBody};
pub use server::{build_router, start_server};
pub use state::ServerState;
