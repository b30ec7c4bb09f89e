//! HTTP transport for the dispatcher.
//!
//! Every path is served by the same endpoint; the envelope's method name
//! alone picks the handler. Only POST is accepted.

use std::future::Future;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::dispatch::RpcService;
use crate::envelope::MethodResponse;
use crate::fault::Fault;
use crate::xml::encode_response;

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the router serving `service`, rejecting bodies over `max_body_bytes`.
pub fn router(service: Arc<RpcService>, max_body_bytes: usize) -> Router {
    Router::new()
        .fallback(rpc_endpoint)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(service)
}

/// Bind the listening socket. Failure here is fatal to the service.
pub async fn bind(addr: &str) -> Result<TcpListener, ServeError> {
    TcpListener::bind(addr).await.map_err(|source| ServeError::Bind {
        addr: addr.to_string(),
        source,
    })
}

/// Serve until `shutdown` resolves, then finish in-flight requests.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> Result<(), ServeError>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "rpc server listening");
    }
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("rpc server stopped");
    Ok(())
}

async fn rpc_endpoint(
    State(service): State<Arc<RpcService>>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    if method != Method::POST {
        debug!(%method, path = %uri.path(), "non-POST request refused");
        return (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, "POST")]).into_response();
    }

    debug!(path = %uri.path(), body_len = body.len(), "rpc request received");

    // Handlers may block on the window toolkit; keep them off the reactor.
    let xml = match tokio::task::spawn_blocking(move || service.handle(&body)).await {
        Ok(xml) => xml,
        Err(e) => {
            error!(error = %e, "rpc handler task failed");
            encode_response(&MethodResponse::Fault(Fault::internal("handler failed")))
        }
    };

    ([(header::CONTENT_TYPE, "text/xml")], xml).into_response()
}
