//! HTTP API Handlers and Routes
//!
//! This module provides the REST API layer for JoeyAi, built on the Axum web framework.
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//! - [`api::docs`](crate::api::docs) - OpenAPI document
//!
//! # API Endpoints
//!
//! ## Chat (`/api/chat`)
//! - `POST /api/chat` - Send a message and receive a canned reply
//! - `GET /api/chat/history` - History placeholder
//!
//! ## Memory (`/api/memory`)
//! - `POST /api/memory/toggle` - Turn memory on or off
//! - `GET /api/memory/status` - Current memory state
//! - `POST /api/memory/clear` - Forget everything
//! - `GET /api/memory/conversations?limit=N` - Most recent conversations
//!
//! ## System (`/api/system`)
//! - `GET /api/system/stats` - Basic status, never fails
//! - `GET /api/system/detailed` - Placeholder percentages and platform info
//! - `GET /api/system/health` - Fixed health assessment
//!
//! ## Shell
//! - `GET /` - Frontend entry page
//! - `GET /styles/*`, `/scripts/*`, `/assets/*` - Frontend files
//! - `GET /health` - Liveness
//! - `GET /api` - Endpoint directory
//! - `GET /api/openapi.json` - OpenAPI document
//!
//! When the `swagger-ui` feature is enabled, interactive API documentation
//! is available at `/swagger-ui/`.

/// OpenAPI document.
pub mod docs;
/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;
