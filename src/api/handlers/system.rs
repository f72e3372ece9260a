//! System statistics handlers.
//!
//! Load figures are placeholders. `/api/system/stats` never fails: if uptime
//! cannot be computed it reports `"Unknown"` instead.

use crate::{
    AppState,
    system::{
        self, HEALTH_RECOMMENDATION, HEALTH_SCORE, HEALTH_STATUS, PLACEHOLDER_CPU_PERCENT,
        PLACEHOLDER_DISK_PERCENT, PLACEHOLDER_MEMORY_PERCENT, RESOURCE_OK, RUNTIME_VERSION,
        UNKNOWN_UPTIME,
    },
    types::{ComponentScores, DetailedSystemStats, SystemHealth, SystemStats},
    utils::time::{iso_timestamp, round_to},
};
use axum::{Json, extract::State};

/// Basic system status
#[utoipa::path(
    get,
    path = "/api/system/stats",
    responses(
        (status = 200, description = "System status", body = SystemStats)
    ),
    tag = "system"
)]
pub async fn system_stats(State(state): State<AppState>) -> Json<SystemStats> {
    let uptime = match system::uptime(state.started_at) {
        Ok(elapsed) => system::format_uptime(elapsed),
        Err(e) => {
            tracing::warn!(error = %e, "Could not compute uptime");
            UNKNOWN_UPTIME.to_string()
        }
    };

    Json(SystemStats {
        cpu: RESOURCE_OK.to_string(),
        ram: RESOURCE_OK.to_string(),
        disk: RESOURCE_OK.to_string(),
        uptime,
        platform: state.platform.system.clone(),
        runtime_version: RUNTIME_VERSION.to_string(),
    })
}

/// Detailed system statistics
#[utoipa::path(
    get,
    path = "/api/system/detailed",
    responses(
        (status = 200, description = "Detailed statistics", body = DetailedSystemStats)
    ),
    tag = "system"
)]
pub async fn detailed_stats(State(state): State<AppState>) -> Json<DetailedSystemStats> {
    let uptime_seconds = system::uptime(state.started_at)
        .map(|elapsed| round_to(elapsed.as_secs_f64(), 2))
        .unwrap_or_default();

    Json(DetailedSystemStats {
        cpu_percent: PLACEHOLDER_CPU_PERCENT,
        memory_percent: PLACEHOLDER_MEMORY_PERCENT,
        disk_percent: PLACEHOLDER_DISK_PERCENT,
        uptime_seconds,
        platform_info: (*state.platform).clone(),
        timestamp: iso_timestamp(),
    })
}

/// Overall health assessment
#[utoipa::path(
    get,
    path = "/api/system/health",
    responses(
        (status = 200, description = "Health assessment", body = SystemHealth)
    ),
    tag = "system"
)]
pub async fn system_health() -> Json<SystemHealth> {
    Json(SystemHealth {
        status: HEALTH_STATUS.to_string(),
        health_score: HEALTH_SCORE,
        components: ComponentScores {
            cpu: 85.0,
            memory: 95.0,
            disk: 87.5,
        },
        recommendations: vec![HEALTH_RECOMMENDATION.to_string()],
        timestamp: iso_timestamp(),
    })
}
