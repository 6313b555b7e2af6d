use actix_web::{HttpRequest, HttpResponse};
use askama::Template;

use crate::admin::AdminGate;
use crate::client::ServiceClient;
use crate::web::state::AppState;

pub fn is_htmx(req: &HttpRequest) -> bool {
    req.headers()
        .get("HX-Request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|s| s.eq_ignore_ascii_case("true"))
}

pub fn render<T: Template>(t: T) -> HttpResponse {
    render_with_status(t, HttpResponse::Ok())
}

pub fn render_with_status<T: Template>(
    t: T,
    mut builder: actix_web::HttpResponseBuilder,
) -> HttpResponse {
    match t.render() {
        Ok(body) => builder.content_type("text/html; charset=utf-8").body(body),
        Err(e) => {
            log::error!("Template error: {}", e);
            HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body(format!("Template error: {e}"))
        }
    }
}

pub fn redirect(req: &HttpRequest, location: &str) -> HttpResponse {
    if is_htmx(req) {
        HttpResponse::Ok()
            .insert_header(("HX-Redirect", location.to_string()))
            .finish()
    } else {
        HttpResponse::SeeOther()
            .insert_header(("Location", location.to_string()))
            .finish()
    }
}

/// Adds `key=value` to `path`, percent-encoding the value.
pub fn with_query(path: &str, key: &str, value: &str) -> String {
    let sep = if path.contains('?') { '&' } else { '?' };
    format!("{}{}{}={}", path, sep, key, urlencoding::encode(value))
}

/// Connects a client for the request and runs the admin guard.
///
/// Anything short of [`AdminGate::Granted`] becomes a redirect to `/admin`,
/// which renders the matching prompt.
pub async fn require_admin(
    state: &AppState,
    req: &HttpRequest,
) -> Result<ServiceClient, HttpResponse> {
    let client = state.client_for(req).await;

    match AdminGate::evaluate(&client).await {
        AdminGate::Granted(_) => Ok(client),
        other => {
            log::info!("Admin request to {} stopped at {:?}", req.path(), other);
            Err(redirect(req, "/admin"))
        }
    }
}

pub fn client_ip(req: &HttpRequest) -> String {
    req.connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string()
}
