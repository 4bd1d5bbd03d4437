//! Adapter module - read-only network view of the game over TCP
//!
//! This module lets external observers watch a running game. It never changes
//! the game: the terminal loop publishes snapshots into a
//! [`SnapshotGate`](tui_reveal_core::SnapshotGate) and the server reads them.
//!
//! # Protocol Overview
//!
//! The adapter implements a **line-delimited JSON protocol** over TCP:
//!
//! 1. **Connection**: Client connects to the configured address
//! 2. **Handshake**: Client sends `hello`, server responds with `welcome`
//! 3. **Snapshots**: Client sends `snapshot`, server responds with `observation`
//! 4. **Streaming**: Clients that asked for it get an `observation` whenever
//!    the published revision changes
//!
//! Every message carries `type`, `seq` and `ts`. Client `seq` values must
//! strictly increase on a connection. Lines longer than
//! [`MAX_LINE_BYTES`](server::MAX_LINE_BYTES) close the connection, as does a
//! client that stops reading while its reply queue is full.
//!
//! ## Errors
//!
//! - **handshake_required**: request sent before `hello`
//! - **protocol_mismatch**: `hello` with another major version (connection closed)
//! - **invalid_request**: malformed JSON, unknown type, or non-increasing `seq`
//! - **not_ready**: nothing published yet
//!
//! # Plain HTTP
//!
//! A connection whose first line starts with `GET ` is answered as HTTP/1.1
//! with the current observation as JSON (503 before the first publish).
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Server: {"type":"hello","seq":1,"ts":1234567890,"client":{"name":"watcher","version":"1.0.0"},"protocol_version":"1.0.0"}
//! Server -> Client: {"type":"welcome","seq":1,"ts":1234567890,"protocol_version":"1.0.0","client_id":1,"game_id":"tui-reveal","streaming":false}
//! Client -> Server: {"type":"snapshot","seq":2,"ts":1234567891}
//! Server -> Client: {"type":"observation","seq":2,"ts":1234567891,"revision":4,"width":20,...}
//! ```
//!
//! # Testing
//!
//! ```bash
//! curl http://127.0.0.1:7777/
//! ```

pub mod protocol;
pub mod runtime;
pub mod server;

pub use tui_reveal_core as core;
pub use tui_reveal_types as types;

// Re-export protocol types for convenience
pub use protocol::*;
pub use runtime::ViewServer;
pub use server::{build_observation, run_server, state_hash, ServerConfig, ServerState};
