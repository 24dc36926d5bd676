//! Error types for the provisioner.

use std::fmt;

use crate::provision::ProvisionedKeys;

/// Provisioner error type.
#[derive(Debug)]
pub enum Error {
    /// Malformed arguments (e.g. owner count exceeding key count).
    InvalidArgument(String),
    /// The receiving contract rejected or failed a call.
    RemoteCall(String),
    /// A view returned a payload that did not deserialize.
    Response(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Error::RemoteCall(msg) => write!(f, "remote call failed: {msg}"),
            Error::Response(msg) => write!(f, "malformed response: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

/// A provisioning run that failed mid-stream.
///
/// Batches submitted before the failure stay committed on the contract;
/// `committed` holds their key material so the caller can compensate
/// (or keep the partially populated drop). No rollback is attempted.
#[derive(Debug)]
pub struct ProvisionFailure {
    pub committed: ProvisionedKeys,
    pub error: Error,
}

impl fmt::Display for ProvisionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "provisioning stopped after {} committed keys: {}",
            self.committed.len(),
            self.error
        )
    }
}

impl std::error::Error for ProvisionFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl From<Error> for ProvisionFailure {
    fn from(error: Error) -> Self {
        Self {
            committed: ProvisionedKeys::default(),
            error,
        }
    }
}
