// src/lib.rs
pub mod contract;
pub mod error;
pub mod types;
pub mod wallet;

pub use contract::ContractSession;
pub use error::{ClientError, ClientResult};
pub use types::{
    Campaign, CampaignDraft, ClientConfig, ContractSnapshot, NetworkProfile, TxOutcome,
};
pub use wallet::WalletSession;

use alloy::primitives::{Address, U256};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

/// Client for the crowdfunding contract: one wallet session, at most one
/// bound contract, and the last successfully read snapshot.
///
/// Sequencing matches the frontend it replaces: every operation runs to
/// completion before the next one is issued by the caller, writes trigger a
/// full refresh of the campaign list and balance, and there is no retry,
/// no double-submit guard and no reconciliation between concurrent clients.
#[derive(Clone, Debug)]
pub struct CrowdfundClient {
    config: ClientConfig,
    wallet: WalletSession,
    contract: Arc<RwLock<Option<ContractSession>>>,
    snapshot: Arc<RwLock<Option<ContractSnapshot>>>,
}

impl CrowdfundClient {
    /// Initialize the wallet session from the configured accounts.
    ///
    /// Fails when no account is configured or a key does not parse; there is
    /// no retry. The contract is bound separately via `connect_contract`.
    pub fn connect(config: ClientConfig) -> ClientResult<Self> {
        let wallet = WalletSession::connect(&config).inspect_err(|e| {
            warn!(category = e.category(), "wallet connection failed: {e}");
        })?;

        Ok(Self {
            config,
            wallet,
            contract: Arc::new(RwLock::new(None)),
            snapshot: Arc::new(RwLock::new(None)),
        })
    }

    /// Bind the contract at `address` and read its full state.
    ///
    /// The binding is kept even when the read batch fails, so a later
    /// `refresh` can still succeed; the snapshot is only replaced by a
    /// fully successful read.
    pub async fn connect_contract(&self, address: &str) -> ClientResult<ContractSnapshot> {
        let session = ContractSession::bind(address, self.wallet.provider())?;
        {
            let mut slot = self.contract.write().await;
            *slot = Some(session);
        }

        self.refresh().await
    }

    /// Re-run the full read batch (owner, active flag, balance, campaigns)
    pub async fn refresh(&self) -> ClientResult<ContractSnapshot> {
        let guard = self.contract.read().await;
        let session = guard.as_ref().ok_or(ClientError::ContractNotConnected)?;

        let snapshot = session.read_state().await.inspect_err(|e| {
            error!(category = e.category(), "contract read batch failed: {e}");
        })?;
        drop(guard);

        *self.snapshot.write().await = Some(snapshot.clone());
        info!(
            campaigns = snapshot.campaigns.len(),
            active = snapshot.is_active,
            "contract state refreshed"
        );
        Ok(snapshot)
    }

    /// Create a campaign, paying the configured creation fee.
    ///
    /// On success the campaign list and contract balance are re-read in
    /// full; a failure in that refresh surfaces as an error even though the
    /// transaction itself was mined. When no snapshot exists yet (the
    /// initial read batch failed), a full snapshot is taken instead of a
    /// partial update.
    pub async fn create_campaign(&self, draft: &CampaignDraft) -> ClientResult<TxOutcome> {
        let guard = self.contract.read().await;
        let session = guard.as_ref().ok_or(ClientError::ContractNotConnected)?;

        let outcome = session
            .create_campaign(draft, self.config.campaign_fee_wei)
            .await?;

        let campaigns = session.fetch_campaigns().await?;
        let balance_wei = session.fetch_balance().await?;
        if !self.apply_refresh(campaigns, balance_wei).await {
            // first successful write before any successful read: a partial
            // update has nothing to patch, take a full snapshot instead
            let snapshot = session.read_state().await?;
            *self.snapshot.write().await = Some(snapshot);
        }
        drop(guard);

        Ok(outcome)
    }

    /// Pledge `shares` shares in a campaign, paying `pledgeCost * shares`
    pub async fn pledge(&self, campaign_id: U256, shares: u64) -> ClientResult<TxOutcome> {
        let guard = self.contract.read().await;
        let session = guard.as_ref().ok_or(ClientError::ContractNotConnected)?;

        let outcome = session.pledge(campaign_id, shares).await?;

        let campaigns = session.fetch_campaigns().await?;
        let balance_wei = session.fetch_balance().await?;
        if !self.apply_refresh(campaigns, balance_wei).await {
            let snapshot = session.read_state().await?;
            *self.snapshot.write().await = Some(snapshot);
        }
        drop(guard);

        Ok(outcome)
    }

    /// Last successfully read state, if any
    pub async fn snapshot(&self) -> Option<ContractSnapshot> {
        self.snapshot.read().await.clone()
    }

    pub async fn is_contract_connected(&self) -> bool {
        self.contract.read().await.is_some()
    }

    /// Active sender account
    pub fn wallet_address(&self) -> Address {
        self.wallet.address()
    }

    /// All configured accounts
    pub fn accounts(&self) -> Vec<Address> {
        self.wallet.accounts()
    }

    /// Native balance of the active sender in wei
    pub async fn wallet_balance(&self) -> ClientResult<U256> {
        self.wallet.native_balance(self.wallet.address()).await
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // Partial refresh after a write: only campaigns and balance change;
    // owner and active flag keep their last read values. Returns false when
    // there is no snapshot to patch yet.
    async fn apply_refresh(&self, campaigns: Vec<Campaign>, balance_wei: U256) -> bool {
        let mut slot = self.snapshot.write().await;
        match slot.as_mut() {
            Some(snapshot) => {
                snapshot.campaigns = campaigns;
                snapshot.balance_wei = balance_wei;
                snapshot.fetched_at = chrono::Utc::now();
                true
            }
            None => false,
        }
    }
}
