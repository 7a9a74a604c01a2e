// HTTP listener and worker threads.
//
// Architecture: one shared `tiny_http::Server` polled by a fixed pool of
// worker threads. Each worker loops on `recv_timeout`, reads the request
// body, hands method/URL/body to `App::handle`, and writes the JSON reply.
// The timeout doubles as the shutdown poll: workers check `keep_running`
// between requests, so `ServerHandle::stop` returns within one timeout.
//
// `App` is shared read-only behind an `Arc`; all mutable state lives in the
// store, which does its own locking.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use tiny_http::{Header, Request, Response, Server};
use tracing::{debug, info, warn};

use crate::app::{ApiResponse, App, MSG_MALFORMED_BODY};
use crate::config::ServerConfig;
use crate::error::{Result, ServerError};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Handle returned by `start_server` to control the running server.
pub struct ServerHandle {
    keep_running: Arc<AtomicBool>,
    workers: Vec<thread::JoinHandle<()>>,
}

impl ServerHandle {
    /// Signal the workers to stop and wait for them to finish.
    pub fn stop(self) {
        self.keep_running.store(false, Ordering::SeqCst);
        for worker in self.workers {
            let _ = worker.join();
        }
        info!("server stopped");
    }
}

/// Bind and start serving on background threads. Returns a handle for
/// stopping and the bound address (useful with port 0).
pub fn start_server(config: &ServerConfig, app: App) -> Result<(ServerHandle, SocketAddr)> {
    let bind = format!("{}:{}", config.bind_addr, config.port);
    let server = Server::http(&bind).map_err(|e| ServerError::Bind {
        addr: bind.clone(),
        message: e.to_string(),
    })?;
    let listen = server.server_addr();
    let addr = listen
        .to_ip()
        .ok_or_else(|| ServerError::NotIpAddress(bind.clone()))?;

    let server = Arc::new(server);
    let app = Arc::new(app);
    let keep_running = Arc::new(AtomicBool::new(true));

    let workers = (0..config.workers.max(1))
        .map(|n| {
            let server = server.clone();
            let app = app.clone();
            let keep_running = keep_running.clone();
            thread::Builder::new()
                .name(format!("kidcatch-http-{n}"))
                .spawn(move || run_worker(&server, &app, &keep_running))
        })
        .collect::<std::io::Result<Vec<_>>>()?;

    info!(%addr, workers = workers.len(), "server listening");
    Ok((
        ServerHandle {
            keep_running,
            workers,
        },
        addr,
    ))
}

fn run_worker(server: &Server, app: &App, keep_running: &AtomicBool) {
    while keep_running.load(Ordering::SeqCst) {
        match server.recv_timeout(POLL_INTERVAL) {
            Ok(Some(request)) => serve(app, request),
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "listener failed, worker exiting");
                break;
            }
        }
    }
}

fn serve(app: &App, mut request: Request) {
    let method = request.method().to_string();
    let url = request.url().to_string();

    let mut body = String::new();
    let response = match request.as_reader().read_to_string(&mut body) {
        Ok(_) => app.handle(&method, &url, &body),
        Err(e) => {
            debug!(error = %e, "unreadable request body");
            ApiResponse::error(400, MSG_MALFORMED_BODY)
        }
    };
    debug!(%method, %url, status = response.status, "response");

    let mut reply = Response::from_string(response.body).with_status_code(response.status);
    if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], &b"application/json; charset=utf-8"[..]) {
        reply = reply.with_header(header);
    }
    if let Err(e) = request.respond(reply) {
        debug!(error = %e, "client went away before the response was sent");
    }
}
