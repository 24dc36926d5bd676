//! Provisioning configuration.

use near_workspaces::types::NearToken;

/// Deposit attached to each `add_keys` submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepositPolicy {
    /// Fixed deposit per submission, regardless of window size.
    Flat(NearToken),
    /// Deposit scales with the number of key records in the window.
    PerKey(NearToken),
}

impl DepositPolicy {
    /// Deposit for a window of `len` key records.
    pub fn for_batch(&self, len: usize) -> NearToken {
        match self {
            DepositPolicy::Flat(amount) => *amount,
            DepositPolicy::PerKey(amount) => {
                NearToken::from_yoctonear(amount.as_yoctonear().saturating_mul(len as u128))
            }
        }
    }
}

/// Configuration for drop creation and key provisioning.
#[derive(Debug, Clone)]
pub struct ProvisionConfig {
    /// Maximum key records per `add_keys` submission.
    pub batch_size: usize,

    /// Shared base secret mixed into every password commitment.
    pub base_password: String,

    /// Key uses gated by a password commitment.
    pub password_uses: Vec<u32>,

    /// Deposit attached to each `add_keys` submission.
    pub add_keys_deposit: DepositPolicy,

    /// Deposit attached to `create_drop`.
    pub create_drop_deposit: NearToken,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            batch_size: defaults::batch_size(),
            base_password: defaults::base_password(),
            password_uses: defaults::password_uses(),
            add_keys_deposit: defaults::add_keys_deposit(),
            create_drop_deposit: defaults::create_drop_deposit(),
        }
    }
}

mod defaults {
    use super::DepositPolicy;
    use near_workspaces::types::NearToken;

    /// The contract rejects larger `key_data` payloads.
    pub fn batch_size() -> usize {
        50
    }

    pub fn base_password() -> String {
        "nearcon23-password".into()
    }

    /// Only the first use is password-gated.
    pub fn password_uses() -> Vec<u32> {
        vec![1]
    }

    pub fn add_keys_deposit() -> DepositPolicy {
        DepositPolicy::Flat(NearToken::from_near(20))
    }

    pub fn create_drop_deposit() -> NearToken {
        NearToken::from_near(21)
    }
}
