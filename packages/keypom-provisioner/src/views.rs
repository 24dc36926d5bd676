//! Typed views over drop and key state.
//!
//! Thin wrappers over the contract's read-only interface; extra fields
//! in responses are ignored so the structs track only what the
//! surrounding tests assert on.

use near_sdk::json_types::U128;
use near_workspaces::types::AccountId;
use serde::Deserialize;
use serde_json::json;

use crate::channel::DropChannel;
use crate::error::Error;

/// Response of `get_drop_information`.
#[derive(Debug, Clone, Deserialize)]
pub struct DropInfo {
    pub drop_id: String,
    pub funder_id: AccountId,
    pub next_key_id: u64,
}

/// Response of `get_key_information`.
#[derive(Debug, Clone, Deserialize)]
pub struct KeyInfo {
    pub drop_id: String,
    /// `None` for keys provisioned without an owner.
    pub owner_id: Option<AccountId>,
    /// Remaining gas budget in yoctoNEAR; decremented by usage.
    pub allowance: U128,
    pub remaining_uses: u32,
}

pub async fn get_drop_information<C: DropChannel>(
    channel: &C,
    drop_id: &str,
) -> Result<DropInfo, Error> {
    let value = channel
        .query("get_drop_information", json!({ "drop_id": drop_id }))
        .await?;
    serde_json::from_value(value).map_err(|e| Error::Response(format!("get_drop_information: {e}")))
}

pub async fn get_key_information<C: DropChannel>(
    channel: &C,
    public_key: &str,
) -> Result<KeyInfo, Error> {
    let value = channel
        .query("get_key_information", json!({ "key": public_key }))
        .await?;
    serde_json::from_value(value).map_err(|e| Error::Response(format!("get_key_information: {e}")))
}
