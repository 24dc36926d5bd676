//! # Keypom Provisioner
//!
//! Batched access-key provisioning for Keypom drops on a NEAR sandbox.
//!
//! The provisioner generates fresh ed25519 key pairs, derives per-use
//! password commitments, partitions keys into owned and ownerless
//! subsets, and loads them onto a deployed Keypom contract in bounded
//! `add_keys` submissions. All remote state flows through the
//! [`DropChannel`] trait, so integration suites drive a real contract
//! while unit tests substitute an in-memory channel.
//!
//! ## Typical flow
//! ```ignore
//! let client = DropClient::new(funder, keypom_id);
//! let config = ProvisionConfig::default();
//! let keys = create_drop(&client, &config, "my-drop", root.id(), 120, 30).await?;
//! ```

pub mod channel;
pub mod config;
mod error;
pub mod keys;
pub mod provision;
pub mod views;

pub use channel::{DropChannel, DropClient};
pub use config::{DepositPolicy, ProvisionConfig};
pub use error::{Error, ProvisionFailure};
pub use provision::{create_drop, provision_keys, ProvisionedKeys};
