// src/contract/mod.rs
pub mod bindings;

use crate::error::{ClientError, ClientResult};
use crate::types::{Campaign, CampaignDraft, ContractSnapshot, TxOutcome};
use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, Provider};
use bindings::Crowdfunding;
use std::str::FromStr;
use tracing::{debug, info};

/// Binding to a crowdfunding contract at a user-supplied address.
///
/// The address is parsed but the contract behind it is taken on faith:
/// no bytecode or interface check happens at bind time. A wrong address
/// simply makes every call fail.
#[derive(Debug)]
pub struct ContractSession {
    address: Address,
    provider: DynProvider,
    instance: Crowdfunding::CrowdfundingInstance<DynProvider>,
}

impl ContractSession {
    /// Bind to the contract at `address`
    pub fn bind(address: &str, provider: DynProvider) -> ClientResult<Self> {
        crate::wallet::validate_address(address)?;
        let address = Address::from_str(address.trim())
            .map_err(|_| ClientError::InvalidAddress(address.to_string()))?;
        let instance = Crowdfunding::new(address, provider.clone());

        info!(%address, "bound crowdfunding contract");
        Ok(Self {
            address,
            provider,
            instance,
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Read the full contract state: owner, active flag, native balance and
    /// the active-campaign list, sequentially. Any failure aborts the whole
    /// batch; no partial snapshot is produced.
    pub async fn read_state(&self) -> ClientResult<ContractSnapshot> {
        debug!(address = %self.address, "reading contract state");

        let owner = self
            .instance
            .owner()
            .call()
            .await
            .map_err(|e| ClientError::ContractRead(e.to_string()))?;

        let is_active = self
            .instance
            .isContractActive()
            .call()
            .await
            .map_err(|e| ClientError::ContractRead(e.to_string()))?;

        let balance_wei = self
            .provider
            .get_balance(self.address)
            .await
            .map_err(|e| ClientError::RpcError(e.to_string()))?;

        let campaigns = self.fetch_campaigns().await?;

        Ok(ContractSnapshot {
            address: self.address,
            owner,
            is_active,
            balance_wei,
            campaigns,
            fetched_at: chrono::Utc::now(),
        })
    }

    /// Fetch the active-campaign list
    pub async fn fetch_campaigns(&self) -> ClientResult<Vec<Campaign>> {
        let raw = self
            .instance
            .getActiveCampaigns()
            .call()
            .await
            .map_err(|e| ClientError::ContractRead(e.to_string()))?;

        Ok(raw.into_iter().map(Campaign::from).collect())
    }

    /// Fetch a single campaign's details
    pub async fn campaign_details(&self, campaign_id: U256) -> ClientResult<Campaign> {
        let info = self
            .instance
            .getCampaignDetails(campaign_id)
            .call()
            .await
            .map_err(|e| ClientError::ContractRead(e.to_string()))?;

        Ok(Campaign::from(info))
    }

    /// Fetch the contract's native balance in wei
    pub async fn fetch_balance(&self) -> ClientResult<U256> {
        self.provider
            .get_balance(self.address)
            .await
            .map_err(|e| ClientError::RpcError(e.to_string()))
    }

    /// Submit a createCampaign transaction carrying `fee_wei` and wait for
    /// its receipt
    pub async fn create_campaign(
        &self,
        draft: &CampaignDraft,
        fee_wei: U256,
    ) -> ClientResult<TxOutcome> {
        draft.validate()?;

        debug!(title = %draft.title, fee_wei = %fee_wei, "sending createCampaign transaction");

        let pending = self
            .instance
            .createCampaign(
                draft.title.clone(),
                draft.pledge_cost_wei,
                U256::from(draft.pledges_needed),
            )
            .value(fee_wei)
            .send()
            .await
            .map_err(|e| ClientError::TransactionFailed(e.to_string()))?;

        self.finalize(pending, "createCampaign").await
    }

    /// Pledge `shares` shares in a campaign. The current pledge cost is read
    /// from the contract and the transaction carries `pledgeCost * shares`.
    pub async fn pledge(&self, campaign_id: U256, shares: u64) -> ClientResult<TxOutcome> {
        if shares == 0 {
            return Err(ClientError::InvalidAmount(
                "share count must be at least 1".to_string(),
            ));
        }

        let details = self.campaign_details(campaign_id).await?;
        let total_wei = details
            .total_for_shares(shares)
            .ok_or(ClientError::AmountOverflow)?;

        debug!(campaign = %campaign_id, shares, value_wei = %total_wei, "sending pledge transaction");

        let pending = self
            .instance
            .pledge(campaign_id, U256::from(shares))
            .value(total_wei)
            .send()
            .await
            .map_err(|e| ClientError::TransactionFailed(e.to_string()))?;

        self.finalize(pending, "pledge").await
    }

    async fn finalize(
        &self,
        pending: alloy::providers::PendingTransactionBuilder<alloy::network::Ethereum>,
        label: &str,
    ) -> ClientResult<TxOutcome> {
        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| ClientError::TransactionFailed(e.to_string()))?;

        if !receipt.status() {
            return Err(ClientError::TransactionReverted(format!(
                "{} reverted in tx {}",
                label, receipt.transaction_hash
            )));
        }

        info!(tx_hash = %receipt.transaction_hash, "{} transaction mined", label);
        Ok(TxOutcome {
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::providers::ProviderBuilder;

    fn offline_provider() -> DynProvider {
        // Provider construction does no network IO
        ProviderBuilder::new()
            .connect_http("http://127.0.0.1:8545".parse().unwrap())
            .erased()
    }

    #[test]
    fn test_bind_valid_address() {
        let session = ContractSession::bind(
            "0x5FbDB2315678afecb367f032d93F642f64180aa3",
            offline_provider(),
        )
        .unwrap();
        assert_eq!(
            session.address(),
            Address::from_str("0x5FbDB2315678afecb367f032d93F642f64180aa3").unwrap()
        );
    }

    #[test]
    fn test_bind_trims_whitespace() {
        let session = ContractSession::bind(
            "  0x5FbDB2315678afecb367f032d93F642f64180aa3  ",
            offline_provider(),
        );
        assert!(session.is_ok());
    }

    #[test]
    fn test_bind_rejects_malformed_address() {
        let err = ContractSession::bind("0x5FbDB2", offline_provider()).unwrap_err();
        assert!(matches!(err, ClientError::InvalidAddress(_)));

        let err = ContractSession::bind("not an address", offline_provider()).unwrap_err();
        assert!(matches!(err, ClientError::InvalidAddress(_)));
    }

    #[test]
    fn test_bind_validates_address_format() {
        // right length, non-hex character
        let err = ContractSession::bind(
            "0x5FbDB2315678afecb367f032d93F642f64180aaG",
            offline_provider(),
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::InvalidAddress(_)));

        // one nibble short
        let err = ContractSession::bind(
            "0x5FbDB2315678afecb367f032d93F642f64180aa",
            offline_provider(),
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::InvalidAddress(_)));
    }

    #[tokio::test]
    async fn test_pledge_rejects_zero_shares_before_any_network_call() {
        let session = ContractSession::bind(
            "0x5FbDB2315678afecb367f032d93F642f64180aa3",
            offline_provider(),
        )
        .unwrap();

        let err = session.pledge(U256::from(1), 0).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidAmount(_)));
    }

    #[tokio::test]
    async fn test_create_campaign_rejects_invalid_draft_before_send() {
        let session = ContractSession::bind(
            "0x5FbDB2315678afecb367f032d93F642f64180aa3",
            offline_provider(),
        )
        .unwrap();

        let draft = CampaignDraft::new("", U256::from(1000), 10);
        let err = session
            .create_campaign(&draft, U256::from(1))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidCampaign(_)));
    }
}
