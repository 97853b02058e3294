//! Triage engine: transport client and background submission runner.
mod decode;
mod engine;
mod settings;
mod transport;
mod types;

pub use decode::{decode_error_body, decode_result, GENERIC_SERVER_ERROR};
pub use engine::EngineHandle;
pub use settings::{
    SettingsError, TransportSettings, CLASSIFY_FILE_ROUTE, CLASSIFY_ROUTE, DEFAULT_BASE_URL,
};
pub use transport::{AnalysisTransport, ReqwestTransport, NETWORK_ERROR, TIMEOUT_ERROR};
pub use types::{ChannelEventSink, EngineEvent, EventSink};
