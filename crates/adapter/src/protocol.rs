//! Protocol module - JSON message types for the network view
//!
//! Line-delimited JSON. All messages have: type, seq (sequence number), ts
//! (timestamp in ms). The view is read-only: clients can ask for snapshots and
//! subscribe to updates, never change the game.

use serde::{Deserialize, Serialize};

/// Protocol version announced in `welcome`; clients must share the major.
pub const PROTOCOL_VERSION: &str = "1.0.0";

/// Value of `game_id` in `welcome`
pub const GAME_ID: &str = "tui-reveal";

// ============== Client -> Game Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HelloType {
    #[serde(rename = "hello")]
    #[default]
    Hello,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SnapshotType {
    #[serde(rename = "snapshot")]
    #[default]
    Snapshot,
}

/// Client hello message (first message on a connection)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelloMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: HelloType,
    pub seq: u64,
    pub ts: u64,
    pub client: ClientInfo,
    pub protocol_version: String,
    #[serde(default)]
    pub requested: RequestedCapabilities,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestedCapabilities {
    /// Push an observation whenever the game changes
    #[serde(default)]
    pub stream_observations: bool,
}

/// Request for the current snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotRequest {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: SnapshotType,
    pub seq: u64,
    pub ts: u64,
}

// ============== Game -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WelcomeType {
    #[serde(rename = "welcome")]
    Welcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservationType {
    #[serde(rename = "observation")]
    Observation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "handshake_required")]
    HandshakeRequired,
    #[serde(rename = "protocol_mismatch")]
    ProtocolMismatch,
    #[serde(rename = "invalid_request")]
    InvalidRequest,
    #[serde(rename = "not_ready")]
    NotReady,
}

/// Welcome message (response to hello)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeMessage {
    #[serde(rename = "type")]
    pub msg_type: WelcomeType,
    pub seq: u64,
    pub ts: u64,
    pub protocol_version: String,
    pub client_id: u64,
    pub game_id: String,
    pub streaming: bool,
}

/// Error message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    pub seq: u64,
    pub ts: u64,
    pub code: ErrorCode,
    pub message: String,
}

/// Full read-only view of a published snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationMessage {
    #[serde(rename = "type")]
    pub msg_type: ObservationType,
    pub seq: u64,
    pub ts: u64,
    pub revision: u64,
    pub width: u16,
    pub height: u16,
    pub cursor: CursorSnapshot,
    pub score: u32,
    pub playable: bool,
    pub game_over: bool,
    pub seed: u32,
    pub revealed: usize,
    pub remaining: usize,
    pub tiles: Vec<TileInfo>,
    /// Row-major, `cells[y][x]`
    pub cells: Vec<Vec<CellObservation>>,
    /// Plain-text rendering of the board and score
    pub frame: String,
    pub state_hash: StateHash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorSnapshot {
    pub x: u16,
    pub y: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileInfo {
    pub glyph: String,
    pub color: String,
    pub points: u32,
}

/// One cell as seen by observers; the tile stays secret until revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellObservation {
    pub revealed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile: Option<u16>,
}

/// Deterministic state hash serialized as lowercase hex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateHash(pub u64);

impl Serialize for StateHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format!("{:016x}", self.0))
    }
}

impl<'de> Deserialize<'de> for StateHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        u64::from_str_radix(s.trim(), 16)
            .map(StateHash)
            .map_err(|_| serde::de::Error::custom("invalid hex"))
    }
}

// ============== Message Parsing ==============

/// Parsed incoming message
#[derive(Debug, Clone)]
pub enum ParsedMessage {
    Hello(HelloMessage),
    Snapshot(SnapshotRequest),
    Unknown(UnknownMessage),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMessage {
    pub seq: u64,
    pub msg_type: String,
}

/// Parse a JSON message from a string
///
/// A well-formed object with an unrecognized `type` is not a parse error; it
/// comes back as [`ParsedMessage::Unknown`] so the server can answer it.
pub fn parse_message(json: &str) -> Result<ParsedMessage, serde_json::Error> {
    #[derive(Debug, Deserialize)]
    #[serde(tag = "type")]
    enum InboundMessage {
        #[serde(rename = "hello")]
        Hello(HelloMessage),
        #[serde(rename = "snapshot")]
        Snapshot(SnapshotRequest),
    }

    match serde_json::from_str::<InboundMessage>(json) {
        Ok(InboundMessage::Hello(m)) => Ok(ParsedMessage::Hello(m)),
        Ok(InboundMessage::Snapshot(m)) => Ok(ParsedMessage::Snapshot(m)),
        Err(e) => {
            #[derive(Debug, Deserialize)]
            struct Envelope {
                #[serde(rename = "type")]
                msg_type: Option<String>,
                seq: Option<u64>,
            }
            let envelope = serde_json::from_str::<Envelope>(json)?;
            let msg_type = envelope.msg_type.unwrap_or_else(|| "unknown".to_string());
            if msg_type == "hello" || msg_type == "snapshot" {
                return Err(e);
            }
            Ok(ParsedMessage::Unknown(UnknownMessage {
                seq: envelope.seq.unwrap_or(0),
                msg_type,
            }))
        }
    }
}

// ============== Utility Functions ==============

/// Create a hello message
pub fn create_hello(seq: u64, client_name: &str, stream_observations: bool) -> HelloMessage {
    HelloMessage {
        msg_type: HelloType::Hello,
        seq,
        ts: current_timestamp_ms(),
        client: ClientInfo {
            name: client_name.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        protocol_version: PROTOCOL_VERSION.to_string(),
        requested: RequestedCapabilities {
            stream_observations,
        },
    }
}

/// Create a snapshot request
pub fn create_snapshot_request(seq: u64) -> SnapshotRequest {
    SnapshotRequest {
        msg_type: SnapshotType::Snapshot,
        seq,
        ts: current_timestamp_ms(),
    }
}

/// Create a welcome message
pub fn create_welcome(seq: u64, client_id: u64, streaming: bool) -> WelcomeMessage {
    WelcomeMessage {
        msg_type: WelcomeType::Welcome,
        seq,
        ts: current_timestamp_ms(),
        protocol_version: PROTOCOL_VERSION.to_string(),
        client_id,
        game_id: GAME_ID.to_string(),
        streaming,
    }
}

/// Create an error message
pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        ts: current_timestamp_ms(),
        code,
        message: message.to_string(),
    }
}

/// True when `version` shares our protocol major version
pub fn is_compatible_version(version: &str) -> bool {
    let major = |v: &str| v.split('.').next().map(str::to_string);
    major(version).is_some_and(|m| Some(m) == major(PROTOCOL_VERSION))
}

/// Get current timestamp in milliseconds
pub(crate) fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hello() {
        let json = r#"{"type":"hello","seq":1,"ts":1234567890,"client":{"name":"watcher","version":"1.0.0"},"protocol_version":"1.0.0","requested":{"stream_observations":true}}"#;

        match parse_message(json).unwrap() {
            ParsedMessage::Hello(msg) => {
                assert_eq!(msg.msg_type, HelloType::Hello);
                assert_eq!(msg.seq, 1);
                assert_eq!(msg.client.name, "watcher");
                assert!(msg.requested.stream_observations);
            }
            other => panic!("Expected Hello message, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_hello_without_requested() {
        let json = r#"{"type":"hello","seq":1,"ts":0,"client":{"name":"w","version":"0"},"protocol_version":"1.2.0"}"#;
        match parse_message(json).unwrap() {
            ParsedMessage::Hello(msg) => assert!(!msg.requested.stream_observations),
            other => panic!("Expected Hello message, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_snapshot() {
        let json = r#"{"type":"snapshot","seq":4,"ts":10}"#;
        match parse_message(json).unwrap() {
            ParsedMessage::Snapshot(req) => assert_eq!(req.seq, 4),
            other => panic!("Expected Snapshot message, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_is_not_an_error() {
        let json = r#"{"type":"command","seq":9,"ts":10,"actions":["hit"]}"#;
        match parse_message(json).unwrap() {
            ParsedMessage::Unknown(u) => {
                assert_eq!(u.seq, 9);
                assert_eq!(u.msg_type, "command");
            }
            other => panic!("Expected Unknown message, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_known_type_is_an_error() {
        assert!(parse_message(r#"{"type":"hello","seq":1}"#).is_err());
        assert!(parse_message("not json").is_err());
    }

    #[test]
    fn test_version_compatibility() {
        assert!(is_compatible_version("1.0.0"));
        assert!(is_compatible_version("1.9"));
        assert!(!is_compatible_version("2.0.0"));
        assert!(!is_compatible_version("10.0.0"));
    }

    #[test]
    fn test_state_hash_is_fixed_width_hex() {
        let v = serde_json::to_value(StateHash(0xab)).unwrap();
        assert_eq!(v, "00000000000000ab");
        let back: StateHash = serde_json::from_value(v).unwrap();
        assert_eq!(back, StateHash(0xab));
    }

    #[test]
    fn test_error_code_wire_names() {
        let err = create_error(3, ErrorCode::NotReady, "no snapshot yet");
        let v = serde_json::to_value(&err).unwrap();
        assert_eq!(v["type"], "error");
        assert_eq!(v["code"], "not_ready");
        assert_eq!(v["seq"], 3);
    }
}
