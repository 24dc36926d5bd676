//! Drop creation and batched key provisioning.
//!
//! `provision_keys` splits a requested key count into consecutive
//! windows of at most `batch_size`, generates fresh key material per
//! window, and submits one `add_keys` call per window, strictly in
//! order. `create_drop` first creates the drop with its two asset
//! stages, then delegates the bulk key load.

use near_crypto::SecretKey;
use near_workspaces::types::AccountId;
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use tracing::info;

use crate::channel::DropChannel;
use crate::config::ProvisionConfig;
use crate::error::{Error, ProvisionFailure};
use crate::keys::{derive_password_commitments, generate_key_pairs, public_key_strings};

/// One `key_data` entry of an `add_keys` submission.
///
/// `key_owner` is `Some` only for keys whose global index falls below
/// the requested owner count; assignment is positional.
#[derive(Debug, Clone, Serialize)]
pub struct KeyRecord {
    pub public_key: String,
    pub password_by_use: BTreeMap<u32, String>,
    pub key_owner: Option<AccountId>,
}

/// A single bounded `add_keys` submission.
#[derive(Debug, Clone, Serialize)]
pub struct BatchRequest {
    pub drop_id: String,
    pub key_data: Vec<KeyRecord>,
}

/// What a key is allowed to do in one asset stage.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimPermission {
    Claim,
    CreateAccountAndClaim,
}

/// Per-stage claim configuration.
#[derive(Debug, Clone, Serialize)]
pub struct StageConfig {
    pub permissions: ClaimPermission,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_creation_keypom_args: Option<AccountCreationArgs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_account_id: Option<AccountId>,
}

/// Fields Keypom injects into the account-creation call.
#[derive(Debug, Clone, Serialize)]
pub struct AccountCreationArgs {
    pub drop_id_field: String,
}

/// One "use" tier of a drop.
#[derive(Debug, Clone, Serialize)]
pub struct AssetStage {
    pub uses: u32,
    pub assets: Vec<Option<serde_json::Value>>,
    pub config: StageConfig,
}

/// Key material accepted by the contract so far, in submission order.
#[derive(Debug, Default)]
pub struct ProvisionedKeys {
    pub keys: Vec<SecretKey>,
    pub public_keys: Vec<String>,
}

impl ProvisionedKeys {
    pub fn len(&self) -> usize {
        self.public_keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.public_keys.is_empty()
    }

    fn absorb(&mut self, keys: Vec<SecretKey>, public_keys: Vec<String>) {
        self.keys.extend(keys);
        self.public_keys.extend(public_keys);
    }
}

/// The two stages every onboarding drop carries: a password-gated scan,
/// then account creation under `root_account`.
fn onboarding_stages(root_account: &AccountId) -> Vec<AssetStage> {
    vec![
        AssetStage {
            uses: 1,
            assets: vec![None],
            config: StageConfig {
                permissions: ClaimPermission::Claim,
                account_creation_keypom_args: None,
                root_account_id: None,
            },
        },
        AssetStage {
            uses: 1,
            assets: vec![None],
            config: StageConfig {
                permissions: ClaimPermission::CreateAccountAndClaim,
                account_creation_keypom_args: Some(AccountCreationArgs {
                    drop_id_field: "drop_id".into(),
                }),
                root_account_id: Some(root_account.clone()),
            },
        },
    ]
}

/// Generate one window's key pairs and build its `add_keys` request.
fn build_window(
    signer: &AccountId,
    config: &ProvisionConfig,
    drop_id: &str,
    start: usize,
    len: usize,
    owner_count: usize,
) -> (Vec<SecretKey>, Vec<String>, BatchRequest) {
    let keys = generate_key_pairs(len);
    let public_keys = public_key_strings(&keys);

    let key_data = public_keys
        .iter()
        .enumerate()
        .map(|(offset, pk)| KeyRecord {
            public_key: pk.clone(),
            password_by_use: derive_password_commitments(
                pk,
                &config.password_uses,
                &config.base_password,
            ),
            key_owner: (start + offset < owner_count).then(|| signer.clone()),
        })
        .collect();

    let request = BatchRequest {
        drop_id: drop_id.to_owned(),
        key_data,
    };
    (keys, public_keys, request)
}

/// Load `total_keys` fresh keys onto `drop_id`, the first `owner_count`
/// of them owned by the signing account.
///
/// Windows are submitted sequentially; a failed window returns the key
/// material of every previously committed window alongside the error,
/// leaving the drop partially populated.
pub async fn provision_keys<C: DropChannel>(
    channel: &C,
    config: &ProvisionConfig,
    drop_id: &str,
    total_keys: usize,
    owner_count: usize,
) -> Result<ProvisionedKeys, ProvisionFailure> {
    if owner_count > total_keys {
        return Err(Error::InvalidArgument(format!(
            "owner_count {owner_count} exceeds total_keys {total_keys}"
        ))
        .into());
    }

    let mut provisioned = ProvisionedKeys::default();
    let mut start = 0;
    while start < total_keys {
        let len = (total_keys - start).min(config.batch_size);
        let (keys, public_keys, request) =
            build_window(channel.signer_id(), config, drop_id, start, len, owner_count);

        let deposit = config.add_keys_deposit.for_batch(len);
        let args = json!({
            "drop_id": request.drop_id,
            "key_data": request.key_data,
        });
        if let Err(error) = channel.submit("add_keys", args, deposit).await {
            return Err(ProvisionFailure {
                committed: provisioned,
                error,
            });
        }

        provisioned.absorb(keys, public_keys);
        start += len;
        info!(drop_id, window = len, committed = provisioned.len(), "add_keys batch submitted");
    }

    Ok(provisioned)
}

/// Create `drop_id` with zero keys and the two-stage onboarding asset
/// configuration, then load `total_keys` keys onto it.
///
/// If drop creation fails, no key provisioning is attempted.
pub async fn create_drop<C: DropChannel>(
    channel: &C,
    config: &ProvisionConfig,
    drop_id: &str,
    root_account: &AccountId,
    total_keys: usize,
    owner_count: usize,
) -> Result<ProvisionedKeys, ProvisionFailure> {
    let args = json!({
        "drop_id": drop_id,
        "key_data": [],
        "drop_config": {
            "delete_empty_drop": false,
        },
        "asset_data": onboarding_stages(root_account),
        "keep_excess_deposit": true,
    });
    channel
        .submit("create_drop", args, config.create_drop_deposit)
        .await?;
    info!(drop_id, root = %root_account, "drop created");

    provision_keys(channel, config, drop_id, total_keys, owner_count).await
}
