// kidcatch_server: the JSON API over the creation core, plus the `kidcatch`
// command-line tool.
//
// Module overview:
// - `config.rs`:  `ServerConfig` (bind address, port, share-link base, store
//                 file, worker count, enrichment settings) from defaults and
//                 environment.
// - `router.rs`:  `route(method, url) -> Route`, pure path/query matching.
// - `app.rs`:     `App`, which owns the store and the guide and turns a
//                 request into an `ApiResponse`. All endpoint semantics live
//                 here.
// - `server.rs`:  tiny_http listener, worker pool, `start_server` and
//                 `ServerHandle::stop`.
// - `error.rs`:   `ServerError` (startup failures only).
//
// The server can run from the binary (`main.rs`) or be embedded, as the
// smoke test does, via `start_server` on port 0.

pub mod app;
pub mod config;
pub mod error;
pub mod router;
pub mod server;

pub use app::{ApiResponse, App};
pub use config::ServerConfig;
pub use error::ServerError;
pub use server::{ServerHandle, start_server};
