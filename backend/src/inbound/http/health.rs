//! Health endpoints for orchestration probes.
//!
//! Liveness reports whether the process can answer at all; readiness flips
//! on only after the storage probe succeeded and the listener is bound, so
//! traffic is withheld from instances that cannot serve it yet.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};

/// Readiness flag shared between the server bootstrap and the probe handler.
#[derive(Debug, Default)]
pub struct HealthState {
    ready: AtomicBool,
}

impl HealthState {
    /// Create a state that reports not-ready until the server is wired up.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service ready to receive traffic.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Whether the service is ready to receive traffic.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

fn probe_response(ok: bool) -> HttpResponse {
    let mut builder = if ok {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    builder
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

/// Readiness probe.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Service is ready for traffic"),
        (status = 503, description = "Service is still starting")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_ready())
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses((status = 200, description = "Process is alive"))
)]
#[get("/health/live")]
pub async fn live() -> HttpResponse {
    probe_response(true)
}
