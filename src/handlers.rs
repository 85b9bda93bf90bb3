use crate::config::{self, Config};
use crate::docker::DockerCli;
use crate::render;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use std::collections::HashMap;

pub struct AppState {
    pub config: Config,
    pub docker: DockerCli,
}

type Query = web::Query<HashMap<String, String>>;

/// GET / — container listing, HTML or plain text per content negotiation.
/// Always 200; a discovery failure shows up as an empty listing.
pub async fn index(req: HttpRequest, state: web::Data<AppState>, query: Query) -> impl Responder {
    let names = current_containers(&state).await;
    if wants_html(&req) {
        HttpResponse::Ok()
            .content_type("text/html")
            .body(render::container_index_html(
                &names,
                state.config.inspect,
                state.config.health,
                refresh_seconds(&query),
            ))
    } else {
        HttpResponse::Ok()
            .content_type("text/plain")
            .body(render::container_index_text(&names))
    }
}

/// GET /command/logs/{name} — one-shot log snapshot.
pub async fn logs(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: Query,
) -> impl Responder {
    let name = path.into_inner();
    let names = current_containers(&state).await;
    if !names.iter().any(|n| n == &name) {
        return not_found(req).await;
    }

    let tail = query
        .get("tail")
        .and_then(|v| config::parse_tail(v))
        .unwrap_or(state.config.tail);
    let timestamps = query
        .get("timestamps")
        .and_then(|v| config::parse_bool_token(v))
        .unwrap_or(state.config.timestamps);

    match state.docker.logs(&name, tail, timestamps).await {
        Ok(raw) => {
            if wants_html(&req) {
                HttpResponse::Ok()
                    .content_type("text/html")
                    .body(render::command_output_html(
                        &raw,
                        &name,
                        refresh_seconds(&query),
                    ))
            } else {
                HttpResponse::Ok().content_type("text/plain").body(raw)
            }
        }
        Err(e) => {
            log::error!("Could not get logs for \"{name}\": {e}");
            HttpResponse::NotFound()
                .content_type("text/plain")
                .body(format!("Could not get logs for \"{name}\""))
        }
    }
}

/// GET /command/inspect/{name} — pretty-printed inspect JSON, gated by the
/// inspect feature toggle.
pub async fn inspect(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let name = path.into_inner();
    if !state.config.inspect {
        return not_found(req).await;
    }
    let names = current_containers(&state).await;
    if !names.iter().any(|n| n == &name) {
        return not_found(req).await;
    }

    let raw = match state.docker.inspect(&name).await {
        Ok(raw) => raw,
        Err(e) => {
            log::error!("Could not inspect \"{name}\": {e}");
            return inspect_failed(&name);
        }
    };
    // Untrusted until it parses as JSON.
    match render::pretty_json(&raw) {
        Ok(body) => HttpResponse::Ok()
            .content_type("application/json")
            .body(body),
        Err(e) => {
            log::error!("Inspect output for \"{name}\" is not valid JSON: {e}");
            inspect_failed(&name)
        }
    }
}

/// GET /health/{name} — trimmed health status, gated by the health feature
/// toggle.
pub async fn health(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: Query,
) -> impl Responder {
    let name = path.into_inner();
    if !state.config.health {
        return not_found(req).await;
    }
    let names = current_containers(&state).await;
    if !names.iter().any(|n| n == &name) {
        return not_found(req).await;
    }

    match state.docker.health(&name).await {
        Ok(status) => {
            if wants_html(&req) {
                HttpResponse::Ok()
                    .content_type("text/html")
                    .body(render::command_output_html(
                        status.as_bytes(),
                        &name,
                        refresh_seconds(&query),
                    ))
            } else {
                HttpResponse::Ok().content_type("text/plain").body(status)
            }
        }
        Err(e) => {
            log::error!("Could not get health status for \"{name}\": {e}");
            HttpResponse::NotFound()
                .content_type("text/plain")
                .body(format!("Could not get health status for \"{name}\""))
        }
    }
}

/// Fallback for unknown routes, gated-off features, and unknown container
/// names.
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound()
        .content_type("text/plain")
        .body(format!("\"{}\" not found", req.path()))
}

/// The container set for this request: the allow-list when configured,
/// otherwise one discovery call whose result is held for the rest of the
/// request. Discovered names pass the same validation as allow-listed ones.
async fn current_containers(state: &AppState) -> Vec<String> {
    if !state.config.containers.is_empty() {
        return state.config.containers.clone();
    }
    match state.docker.list_containers().await {
        Ok(mut names) => {
            names.retain(|n| config::is_valid_container_name(n));
            names.sort();
            names.dedup();
            names
        }
        Err(e) => {
            log::info!("Could not get list of docker container names: {e}");
            Vec::new()
        }
    }
}

fn wants_html(req: &HttpRequest) -> bool {
    let accept = req
        .headers()
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok());
    render::wants_html(accept)
}

fn refresh_seconds(query: &HashMap<String, String>) -> Option<u64> {
    query
        .get("refresh")
        .and_then(|v| v.parse::<i64>().ok())
        .filter(|secs| *secs > 0)
        .map(|secs| secs as u64)
}

fn inspect_failed(name: &str) -> HttpResponse {
    HttpResponse::NotFound()
        .content_type("text/plain")
        .body(format!("Could not inspect \"{name}\""))
}
