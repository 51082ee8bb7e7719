//! Error surfaces for the HTTP front-end and replication client.
//!
//! Follows the split the corpus uses throughout: typed `thiserror` enums
//! for in-process error values, `anyhow` at the process boundary (startup,
//! socket binding) in `main.rs`.

use thiserror::Error;

/// Failure to parse or validate an inbound JSON request body.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Error in JSON")]
    MalformedJson,
    #[error("Could not find {0} in JSON")]
    MissingField(&'static str),
}

/// Outcome of a (possibly replicated) graph mutation or query, folding in
/// the `RPC_FAILED` status that is synthesized locally on transport
/// failure and never exchanged on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Exists,
    NotFound,
    Error,
    RpcFailed,
}

impl From<crate::graph::Status> for Outcome {
    fn from(status: crate::graph::Status) -> Self {
        match status {
            crate::graph::Status::Success => Outcome::Success,
            crate::graph::Status::Exists => Outcome::Exists,
            crate::graph::Status::NotFound => Outcome::NotFound,
            crate::graph::Status::Error => Outcome::Error,
        }
    }
}
