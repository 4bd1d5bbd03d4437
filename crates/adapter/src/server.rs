//! TCP server for the network view
//!
//! Handles incoming connections and manages client lifecycle.
//! Uses tokio for async networking. The only thing shared with the game loop
//! is the [`SnapshotGate`]; the server never touches the live game.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;

use crate::protocol::*;
use tui_reveal_core::{render_snapshot, GameSnapshot, SnapshotGate};

/// Stable 64-bit FNV-1a hasher for deterministic `state_hash`.
///
/// We avoid `DefaultHasher` here since its output is not guaranteed stable across
/// Rust versions/platforms.
#[derive(Debug, Clone)]
struct Fnv1aHasher {
    state: u64,
}

impl Fnv1aHasher {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    fn new() -> Self {
        Self {
            state: Self::OFFSET_BASIS,
        }
    }
}

impl std::hash::Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state ^= b as u64;
            self.state = self.state.wrapping_mul(Self::PRIME);
        }
    }
}

/// Header lines read (and ignored) after an HTTP request line
const MAX_HTTP_HEADERS: usize = 64;

/// Longest request line accepted; longer lines close the connection.
pub const MAX_LINE_BYTES: usize = 64 * 1024;

/// Messages queued per client before it counts as lagging
const OUTBOUND_CAPACITY: usize = 16;

/// Request lines buffered between the socket reader and the session loop
const INBOUND_CAPACITY: usize = 16;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub protocol_version: String,
    /// How often streaming clients are checked for a new revision
    pub stream_interval_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 7777)),
            protocol_version: PROTOCOL_VERSION.to_string(),
            stream_interval_ms: 100,
        }
    }
}

impl ServerConfig {
    pub fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            ..Self::default()
        }
    }
}

/// Shared server state
pub struct ServerState {
    config: ServerConfig,
    gate: Arc<SnapshotGate>,
    next_client_id: AtomicU64,
    connected: AtomicUsize,
}

impl ServerState {
    pub fn new(config: ServerConfig, gate: Arc<SnapshotGate>) -> Self {
        Self {
            config,
            gate,
            next_client_id: AtomicU64::new(1),
            connected: AtomicUsize::new(0),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Number of open connections
    pub fn client_count(&self) -> usize {
        self.connected.load(Ordering::Relaxed)
    }
}

/// Keeps `connected` accurate however the client task ends.
struct ConnectionGuard(Arc<ServerState>);

impl ConnectionGuard {
    fn new(state: Arc<ServerState>) -> Self {
        state.connected.fetch_add(1, Ordering::Relaxed);
        Self(state)
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.0.connected.fetch_sub(1, Ordering::Relaxed);
    }
}

/// Per-connection protocol state
#[derive(Debug, Default)]
struct Session {
    handshaken: bool,
    streaming: bool,
    last_seq: Option<u64>,
    last_sent_revision: Option<u64>,
    stream_seq: u64,
}

impl Session {
    /// Accept `seq` only if it is strictly greater than the last one seen.
    fn check_and_update_seq(&mut self, seq: u64) -> bool {
        match self.last_seq {
            Some(prev) if seq <= prev => false,
            _ => {
                self.last_seq = Some(seq);
                true
            }
        }
    }
}

#[derive(Debug, Clone)]
enum ClientOutbound {
    Welcome(WelcomeMessage),
    Error(ErrorMessage),
    Observation(Box<ObservationMessage>),
}

/// Answer to one request line
#[derive(Debug)]
struct Reply {
    message: ClientOutbound,
    /// Close the connection once the reply is queued
    close: bool,
}

impl Reply {
    fn send(message: ClientOutbound) -> Self {
        Self {
            message,
            close: false,
        }
    }

    fn error(seq: u64, code: ErrorCode, message: &str) -> Self {
        Self::send(ClientOutbound::Error(create_error(seq, code, message)))
    }
}

/// Read one `\n`-terminated line of at most [`MAX_LINE_BYTES`].
///
/// Returns `Ok(None)` at end of stream. A trailing fragment without newline is
/// still returned; an over-long line is an error.
async fn read_capped_line<R>(reader: &mut R, buf: &mut Vec<u8>) -> anyhow::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    let read = (&mut *reader)
        .take(MAX_LINE_BYTES as u64 + 1)
        .read_until(b'\n', buf)
        .await?;
    if read == 0 {
        return Ok(None);
    }
    if buf.last() != Some(&b'\n') && buf.len() > MAX_LINE_BYTES {
        anyhow::bail!("request line longer than {MAX_LINE_BYTES} bytes");
    }
    let line = String::from_utf8_lossy(buf);
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

/// Queue `message` without waiting. False means the client is gone or lagging.
fn deliver(tx: &mpsc::Sender<ClientOutbound>, message: ClientOutbound) -> bool {
    tx.try_send(message).is_ok()
}

/// Run the server until the listener fails.
///
/// `ready_tx` receives the bound address once the socket is listening, which
/// lets callers bind port 0 and learn the real port.
pub async fn run_server(
    state: Arc<ServerState>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind(state.config.addr).await?;
    let bound = listener.local_addr()?;
    tracing::info!(addr = %bound, "view server listening");
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    loop {
        let (socket, addr) = listener.accept().await?;
        let client_id = state.next_client_id.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(client_id, %addr, "client connected");

        let state = Arc::clone(&state);
        tokio::spawn(async move {
            let _guard = ConnectionGuard::new(Arc::clone(&state));
            if let Err(e) = handle_client(socket, client_id, state).await {
                tracing::warn!(client_id, error = %e, "client error");
            }
            tracing::debug!(client_id, "client disconnected");
        });
    }
}

/// Handle a single client connection
async fn handle_client(
    socket: TcpStream,
    client_id: u64,
    state: Arc<ServerState>,
) -> anyhow::Result<()> {
    let (reader, mut writer) = tokio::io::split(socket);
    let mut reader = BufReader::new(reader);
    let mut line_buf = Vec::with_capacity(256);

    let Some(first) = read_capped_line(&mut reader, &mut line_buf).await? else {
        return Ok(());
    };
    if first.starts_with("GET ") {
        return serve_http(&mut reader, &mut writer, &state.gate).await;
    }

    // Lines are read on their own task so the session loop only waits on
    // channel receives, which are safe to cancel inside `select!`.
    let (line_tx, mut line_rx) = mpsc::channel::<String>(INBOUND_CAPACITY);
    let read_task = tokio::spawn(async move {
        loop {
            match read_capped_line(&mut reader, &mut line_buf).await {
                Ok(Some(line)) => {
                    if line_tx.send(line).await.is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::debug!(client_id, error = %e, "closing connection");
                    break;
                }
            }
        }
    });

    // Channel to send messages to this client
    let (tx, mut rx) = mpsc::channel::<ClientOutbound>(OUTBOUND_CAPACITY);

    let write_task = tokio::spawn(async move {
        let mut buf: Vec<u8> = Vec::with_capacity(4096);
        while let Some(msg) = rx.recv().await {
            buf.clear();
            let encoded = match &msg {
                ClientOutbound::Welcome(m) => serde_json::to_writer(&mut buf, m),
                ClientOutbound::Error(m) => serde_json::to_writer(&mut buf, m),
                ClientOutbound::Observation(m) => serde_json::to_writer(&mut buf, m),
            };
            if encoded.is_err() {
                continue;
            }
            buf.push(b'\n');
            if writer.write_all(&buf).await.is_err() {
                break;
            }
            if writer.flush().await.is_err() {
                break;
            }
        }
        let _ = writer.shutdown().await;
    });

    let mut session = Session::default();
    let mut ticker =
        tokio::time::interval(Duration::from_millis(state.config.stream_interval_ms.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut pending = Some(first);
    loop {
        let line = match pending.take() {
            Some(line) => line,
            None => {
                tokio::select! {
                    next = line_rx.recv() => match next {
                        Some(line) => line,
                        None => break,
                    },
                    _ = ticker.tick(), if session.streaming => {
                        if !push_if_changed(&mut session, &state.gate, &tx) {
                            break;
                        }
                        continue;
                    }
                }
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let reply = handle_line(trimmed, client_id, &mut session, &state);
        if !deliver(&tx, reply.message) {
            tracing::info!(client_id, "client not reading replies, disconnecting");
            break;
        }
        if reply.close {
            break;
        }
    }

    // Closing the channel lets the writer drain and shut the socket down.
    read_task.abort();
    drop(tx);
    let _ = write_task.await;
    Ok(())
}

/// Process one protocol line into the reply owed to the client.
fn handle_line(line: &str, client_id: u64, session: &mut Session, state: &ServerState) -> Reply {
    let parsed = match parse_message(line) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!(client_id, error = %e, "malformed message");
            return Reply::error(0, ErrorCode::InvalidRequest, &format!("malformed message: {e}"));
        }
    };

    match parsed {
        ParsedMessage::Hello(hello) => {
            if !session.check_and_update_seq(hello.seq) {
                return Reply::error(hello.seq, ErrorCode::InvalidRequest, "seq must increase");
            }
            if session.handshaken {
                return Reply::error(hello.seq, ErrorCode::InvalidRequest, "already handshaken");
            }
            if !is_compatible_version(&hello.protocol_version) {
                tracing::info!(
                    client_id,
                    version = %hello.protocol_version,
                    "rejecting incompatible client"
                );
                let mut reply = Reply::error(
                    hello.seq,
                    ErrorCode::ProtocolMismatch,
                    &format!(
                        "unsupported protocol_version {}, expected {}",
                        hello.protocol_version, state.config.protocol_version
                    ),
                );
                reply.close = true;
                return reply;
            }

            session.handshaken = true;
            session.streaming = hello.requested.stream_observations;
            tracing::info!(
                client_id,
                client = %hello.client.name,
                streaming = session.streaming,
                "client handshaken"
            );
            let mut welcome = create_welcome(hello.seq, client_id, session.streaming);
            welcome.protocol_version = state.config.protocol_version.clone();
            Reply::send(ClientOutbound::Welcome(welcome))
        }
        ParsedMessage::Snapshot(req) => {
            if !session.handshaken {
                return Reply::error(req.seq, ErrorCode::HandshakeRequired, "send hello first");
            }
            if !session.check_and_update_seq(req.seq) {
                return Reply::error(req.seq, ErrorCode::InvalidRequest, "seq must increase");
            }
            match state.gate.read() {
                Some(snap) => {
                    let obs = build_observation(&snap, req.seq);
                    Reply::send(ClientOutbound::Observation(Box::new(obs)))
                }
                None => Reply::error(req.seq, ErrorCode::NotReady, "no snapshot published yet"),
            }
        }
        ParsedMessage::Unknown(unknown) => Reply::error(
            unknown.seq,
            ErrorCode::InvalidRequest,
            &format!("unsupported message type: {}", unknown.msg_type),
        ),
    }
}

/// Send an observation if the published revision moved since the last push.
///
/// A client whose queue is full skips revisions instead of queueing them; the
/// next tick retries with whatever is newest. Returns false once the writer is
/// gone.
fn push_if_changed(
    session: &mut Session,
    gate: &SnapshotGate,
    tx: &mpsc::Sender<ClientOutbound>,
) -> bool {
    if tx.is_closed() {
        return false;
    }
    let Some(snap) = gate.read() else {
        return true;
    };
    if session.last_sent_revision == Some(snap.revision) || tx.capacity() == 0 {
        return true;
    }
    session.last_sent_revision = Some(snap.revision);
    session.stream_seq += 1;
    let obs = build_observation(&snap, session.stream_seq);
    match tx.try_send(ClientOutbound::Observation(Box::new(obs))) {
        Ok(()) | Err(TrySendError::Full(_)) => true,
        Err(TrySendError::Closed(_)) => false,
    }
}

/// Answer a plain HTTP GET with the current observation and close.
async fn serve_http<R, W>(
    reader: &mut R,
    writer: &mut W,
    gate: &SnapshotGate,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::with_capacity(256);
    for _ in 0..MAX_HTTP_HEADERS {
        match read_capped_line(reader, &mut buf).await? {
            Some(header) if !header.trim().is_empty() => continue,
            _ => break,
        }
    }

    let (status, body) = match gate.read() {
        Some(snap) => (
            "200 OK",
            serde_json::to_string(&build_observation(&snap, 0))?,
        ),
        None => (
            "503 Service Unavailable",
            serde_json::to_string(&create_error(
                0,
                ErrorCode::NotReady,
                "no snapshot published yet",
            ))?,
        ),
    };
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    writer.write_all(response.as_bytes()).await?;
    writer.flush().await?;
    writer.shutdown().await?;
    Ok(())
}

/// Deterministic hash of everything a player could observe in `snap`.
pub fn state_hash(snap: &GameSnapshot) -> StateHash {
    use std::hash::{Hash, Hasher};

    let mut hasher = Fnv1aHasher::new();
    snap.revision.hash(&mut hasher);
    snap.cursor.hash(&mut hasher);
    snap.score.hash(&mut hasher);
    snap.game_over.hash(&mut hasher);
    snap.board.width().hash(&mut hasher);
    snap.board.height().hash(&mut hasher);
    for cell in snap.board.cells() {
        cell.is_revealed().hash(&mut hasher);
        if cell.is_revealed() {
            cell.tile().hash(&mut hasher);
        }
    }
    StateHash(hasher.finish())
}

/// Build the wire observation for a published snapshot.
pub fn build_observation(snap: &GameSnapshot, seq: u64) -> ObservationMessage {
    let board = &snap.board;

    let tiles = board
        .catalog()
        .tiles()
        .iter()
        .map(|t| TileInfo {
            glyph: t.glyph.to_string(),
            color: t.color.clone(),
            points: t.points,
        })
        .collect();

    let cells = board
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| CellObservation {
                    revealed: cell.is_revealed(),
                    tile: cell.tile().filter(|_| cell.is_revealed()).map(|id| id.0),
                })
                .collect()
        })
        .collect();

    ObservationMessage {
        msg_type: ObservationType::Observation,
        seq,
        ts: current_timestamp_ms(),
        revision: snap.revision,
        width: board.width(),
        height: board.height(),
        cursor: CursorSnapshot {
            x: snap.cursor.x,
            y: snap.cursor.y,
        },
        score: snap.score,
        playable: snap.playable(),
        game_over: snap.game_over,
        seed: snap.seed,
        revealed: snap.revealed(),
        remaining: snap.remaining(),
        tiles,
        cells,
        frame: render_snapshot(snap),
        state_hash: state_hash(snap),
    }
}
