//! Remote call channel.
//!
//! All contract state flows through [`DropChannel`]: `submit` for
//! state-mutating function calls, `query` for views. [`DropClient`] is
//! the production implementation over a `near-workspaces` account; unit
//! tests substitute in-memory channels.

use near_workspaces::types::{AccountId, NearToken};
use near_workspaces::Account;
use serde_json::Value;

use crate::error::Error;

/// The sole path to remote contract state.
#[allow(async_fn_in_trait)]
pub trait DropChannel {
    /// Account signing every submission (the drop funder).
    fn signer_id(&self) -> &AccountId;

    /// Issue a state-mutating function call with an attached deposit.
    async fn submit(&self, method: &str, args: Value, deposit: NearToken) -> Result<(), Error>;

    /// Issue a read-only view call.
    async fn query(&self, method: &str, args: Value) -> Result<Value, Error>;
}

/// [`DropChannel`] backed by a sandbox account and a receiver contract.
pub struct DropClient {
    signer: Account,
    receiver: AccountId,
}

impl DropClient {
    pub fn new(signer: Account, receiver: AccountId) -> Self {
        Self { signer, receiver }
    }

    pub fn receiver(&self) -> &AccountId {
        &self.receiver
    }
}

impl DropChannel for DropClient {
    fn signer_id(&self) -> &AccountId {
        self.signer.id()
    }

    async fn submit(&self, method: &str, args: Value, deposit: NearToken) -> Result<(), Error> {
        let outcome = self
            .signer
            .call(&self.receiver, method)
            .args_json(args)
            .deposit(deposit)
            .max_gas()
            .transact()
            .await
            .map_err(|e| Error::RemoteCall(format!("{method}: {e}")))?;

        outcome
            .into_result()
            .map_err(|e| Error::RemoteCall(format!("{method}: {e}")))?;
        Ok(())
    }

    async fn query(&self, method: &str, args: Value) -> Result<Value, Error> {
        let result = self
            .signer
            .view(&self.receiver, method)
            .args_json(args)
            .await
            .map_err(|e| Error::RemoteCall(format!("{method}: {e}")))?;

        result
            .json()
            .map_err(|e| Error::Response(format!("{method}: {e}")))
    }
}
