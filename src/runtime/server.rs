//! Direct HTTP server.

use crate::runtime::AdapterConfig;
use crate::synth::synthesize;
use crate::transport::direct::{adapt_request, into_http_response};
use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

/// Local HTTP server answering every path with the synthesized response.
pub struct HttpServer {
    config: Arc<AdapterConfig>,
}

impl HttpServer {
    /// Create a new server.
    pub fn new(config: AdapterConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Bind and serve until Ctrl-C.
    ///
    /// Failing to bind is returned to the caller.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr: SocketAddr = self.config.bind_addr().parse()?;
        let listener = TcpListener::bind(addr).await?;

        info!("Local server listening on {}", addr);
        info!("Test with: curl -X GET http://localhost:{}/", addr.port());

        self.serve(listener).await
    }

    /// Serve connections from an already bound listener.
    pub async fn serve(
        self,
        listener: TcpListener,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            let (stream, remote_addr) = tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok(conn) => conn,
                    Err(err) => {
                        warn!("Error accepting connection: {}", err);
                        continue;
                    }
                },
                _ = &mut shutdown => {
                    info!("Shutdown signal received, stopping listener");
                    return Ok(());
                }
            };
            let io = TokioIo::new(stream);
            let config = self.config.clone();

            tokio::task::spawn(async move {
                let service = service_fn(move |req| {
                    let config = config.clone();
                    async move { handle_request(req, config, remote_addr).await }
                });

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    error!("Error serving connection: {:?}", err);
                }
            });
        }
    }
}

/// Handle an incoming HTTP request.
async fn handle_request(
    req: Request<Incoming>,
    config: Arc<AdapterConfig>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let request_id = generate_request_id();
    debug!(
        "Handling request: {} {} from {} [{}]",
        req.method(),
        req.uri().path(),
        remote_addr,
        request_id
    );

    let canonical = adapt_request(req, config.max_body_bytes).await;
    Ok(into_http_response(synthesize(canonical)))
}

/// Generate a request ID for log correlation.
fn generate_request_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{:x}", timestamp)
}
