//! Error types shared by the codecs, the state machine and the transport.
//!
//! Codec and state-machine errors signal a caller bug and are never retried.
//! `Io` and `Protocol` come from the remote transport and end the game they
//! occur in.

use crate::core::bits::BitsError;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, JassError>;

/// Every failure the engine can report.
#[derive(Debug, thiserror::Error)]
pub enum JassError {
    /// A value outside its domain was supplied (bad packed value, card not
    /// available, illegal card chosen by a player...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An index outside a collection's current size.
    #[error("index {index} out of range for size {len}")]
    InvalidIndex { index: usize, len: usize },

    /// A bit window or field width violation.
    #[error(transparent)]
    Bits(#[from] BitsError),

    /// An operation invoked in the wrong state-machine state.
    #[error("illegal state: {0}")]
    IllegalState(&'static str),

    /// Transport failure (socket closed, write failed).
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed line received from a remote peer.
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl JassError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Is this a transport-level failure?
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Protocol(_))
    }
}
