//! On-chain tests for drop creation and batched key provisioning.
//!
//! Each test deploys a fresh Keypom contract into its own sandbox, runs
//! the provisioner as a funded sub-account, and asserts the resulting
//! drop and key state through the contract's view interface.

use anyhow::Result;
use keypom_provisioner::views::{get_drop_information, get_key_information};
use keypom_provisioner::{create_drop, DropClient, ProvisionConfig};
use near_workspaces::network::Sandbox;
use near_workspaces::types::NearToken;
use near_workspaces::{Account, Worker};

use crate::utils::{deploy_keypom, keypom_wasm, setup_sandbox};

/// Sandbox + deployed Keypom + a funder holding `balance` NEAR.
async fn setup(wasm: &[u8], balance: u128) -> Result<(Worker<Sandbox>, DropClient, Account)> {
    let worker = setup_sandbox().await?;
    let contract = deploy_keypom(&worker, wasm).await?;

    let root = worker.root_account()?;
    let funder = root
        .create_subaccount("funder")
        .initial_balance(NearToken::from_near(balance))
        .transact()
        .await?
        .into_result()?;

    let client = DropClient::new(funder.clone(), contract.id().clone());
    Ok((worker, client, funder))
}

#[tokio::test]
async fn test_drop_creation_populates_keys() -> Result<()> {
    let Some(wasm) = keypom_wasm() else {
        return Ok(());
    };
    let (worker, client, funder) = setup(&wasm, 100).await?;
    let root = worker.root_account()?;

    let config = ProvisionConfig::default();
    let provisioned = create_drop(&client, &config, "onboarding-drop", root.id(), 12, 3).await?;
    assert_eq!(provisioned.public_keys.len(), 12);

    let drop = get_drop_information(&client, "onboarding-drop").await?;
    assert_eq!(drop.drop_id, "onboarding-drop");
    assert_eq!(drop.funder_id.as_str(), funder.id().as_str());
    assert_eq!(drop.next_key_id, 12);

    // First three keys belong to the funder, the rest are ownerless;
    // every fresh key still has both of its uses.
    for (idx, pk) in provisioned.public_keys.iter().enumerate() {
        let info = get_key_information(&client, pk).await?;
        assert_eq!(info.drop_id, "onboarding-drop");
        assert_eq!(info.remaining_uses, 2);
        if idx < 3 {
            assert_eq!(
                info.owner_id.as_ref().map(|o| o.as_str()),
                Some(funder.id().as_str()),
                "key {idx} should be owned"
            );
        } else {
            assert!(info.owner_id.is_none(), "key {idx} should be ownerless");
        }
    }

    Ok(())
}

#[tokio::test]
async fn test_provisioning_spans_batch_limit() -> Result<()> {
    let Some(wasm) = keypom_wasm() else {
        return Ok(());
    };
    // 55 keys → two add_keys submissions (50 + 5) at 20 NEAR each
    let (worker, client, funder) = setup(&wasm, 200).await?;
    let root = worker.root_account()?;

    let config = ProvisionConfig::default();
    let provisioned = create_drop(&client, &config, "bulk-drop", root.id(), 55, 5).await?;
    assert_eq!(provisioned.public_keys.len(), 55);

    let drop = get_drop_information(&client, "bulk-drop").await?;
    assert_eq!(drop.next_key_id, 55);

    // Spot-check the ownership boundary and both sides of the window split
    for idx in [0, 4, 5, 49, 50, 54] {
        let info = get_key_information(&client, &provisioned.public_keys[idx]).await?;
        assert_eq!(info.drop_id, "bulk-drop");
        assert_eq!(
            info.owner_id.is_some(),
            idx < 5,
            "wrong ownership at index {idx}"
        );
        if idx < 5 {
            assert_eq!(info.owner_id.unwrap().as_str(), funder.id().as_str());
        }
    }

    Ok(())
}

#[tokio::test]
async fn test_unknown_key_lookup_fails() -> Result<()> {
    let Some(wasm) = keypom_wasm() else {
        return Ok(());
    };
    let (worker, client, _funder) = setup(&wasm, 100).await?;
    let root = worker.root_account()?;

    let config = ProvisionConfig::default();
    create_drop(&client, &config, "small-drop", root.id(), 1, 0).await?;

    // A key that was never provisioned is not queryable
    let stray = "ed25519:6E8sCci9badyRkXb3JoRpBj5p8C6Tw41ELDZoiihKEtp";
    assert!(get_key_information(&client, stray).await.is_err());

    Ok(())
}
