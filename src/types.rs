// src/types.rs
use crate::error::{ClientError, ClientResult};
use alloy::primitives::{Address, TxHash, U256, utils::format_ether};
use serde::{Deserialize, Serialize};

/// A funding round tracked by the crowdfunding contract.
///
/// Amounts are in wei end to end; share counts stay integral.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: U256,
    pub title: String,
    pub entrepreneur: Address,
    pub pledge_cost: U256,
    pub pledges_needed: U256,
    pub pledges_count: U256,
}

impl Campaign {
    /// Shares still open for pledging
    pub fn remaining_shares(&self) -> U256 {
        self.pledges_needed.saturating_sub(self.pledges_count)
    }

    pub fn is_fully_pledged(&self) -> bool {
        self.pledges_count >= self.pledges_needed
    }

    /// Total wei owed for `shares` shares, or `None` on overflow
    pub fn total_for_shares(&self, shares: u64) -> Option<U256> {
        self.pledge_cost.checked_mul(U256::from(shares))
    }
}

/// Last successful read of the contract's on-chain state.
///
/// Purely ephemeral: it mirrors the chain at `fetched_at` and is replaced
/// wholesale on the next read. It is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractSnapshot {
    pub address: Address,
    pub owner: Address,
    pub is_active: bool,
    pub balance_wei: U256,
    pub campaigns: Vec<Campaign>,
    pub fetched_at: chrono::DateTime<chrono::Utc>,
}

impl ContractSnapshot {
    /// Contract balance formatted in whole ether units
    pub fn balance_eth(&self) -> String {
        format_ether(self.balance_wei)
    }

    pub fn campaign(&self, id: U256) -> Option<&Campaign> {
        self.campaigns.iter().find(|c| c.id == id)
    }
}

/// Parameters for a new campaign, validated before any network call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignDraft {
    pub title: String,
    pub pledge_cost_wei: U256,
    pub pledges_needed: u64,
}

impl CampaignDraft {
    pub fn new(title: impl Into<String>, pledge_cost_wei: U256, pledges_needed: u64) -> Self {
        Self {
            title: title.into(),
            pledge_cost_wei,
            pledges_needed,
        }
    }

    pub fn validate(&self) -> ClientResult<()> {
        if self.title.trim().is_empty() {
            return Err(ClientError::InvalidCampaign("title is empty".to_string()));
        }
        if self.pledge_cost_wei.is_zero() {
            return Err(ClientError::InvalidCampaign(
                "pledge cost must be non-zero".to_string(),
            ));
        }
        if self.pledges_needed == 0 {
            return Err(ClientError::InvalidCampaign(
                "pledges needed must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Receipt summary of a mined transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxOutcome {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
}

/// A named RPC endpoint, mirroring the deploy tooling's network table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkProfile {
    pub name: String,
    pub rpc_url: String,
    pub chain_id: u64,
}

impl NetworkProfile {
    /// Local development node
    pub fn localhost() -> Self {
        Self {
            name: "localhost".to_string(),
            rpc_url: "http://127.0.0.1:8545".to_string(),
            chain_id: 31337,
        }
    }

    /// Ethereum mainnet through a caller-supplied gateway URL
    pub fn mainnet(rpc_url: impl Into<String>) -> Self {
        Self {
            name: "mainnet".to_string(),
            rpc_url: rpc_url.into(),
            chain_id: 1,
        }
    }
}

/// Client configuration.
///
/// `private_keys` plays the role of the injected provider's account list;
/// the first key is the active sender. Keys are raw hex here, see the
/// keystore module for storing them encrypted.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub network: NetworkProfile,
    pub private_keys: Vec<String>,
    /// Flat fee attached to every createCampaign transaction
    pub campaign_fee_wei: U256,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            network: NetworkProfile::localhost(),
            private_keys: Vec::new(),
            campaign_fee_wei: default_campaign_fee(),
        }
    }
}

/// 0.02 ETH in wei, the creation fee the contract charges
pub fn default_campaign_fee() -> U256 {
    U256::from(20_000_000_000_000_000u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample_campaign() -> Campaign {
        Campaign {
            id: U256::from(1),
            title: "Solar kiosk".to_string(),
            entrepreneur: Address::from_str("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
                .unwrap(),
            pledge_cost: U256::from(1_000_000_000_000_000u64), // 0.001 ETH
            pledges_needed: U256::from(100),
            pledges_count: U256::from(40),
        }
    }

    #[test]
    fn test_campaign_share_math() {
        let campaign = sample_campaign();
        assert_eq!(campaign.remaining_shares(), U256::from(60));
        assert!(!campaign.is_fully_pledged());
        assert_eq!(
            campaign.total_for_shares(3),
            Some(U256::from(3_000_000_000_000_000u64))
        );
    }

    #[test]
    fn test_overfull_campaign_has_no_remaining_shares() {
        let mut campaign = sample_campaign();
        campaign.pledges_count = U256::from(150);
        assert_eq!(campaign.remaining_shares(), U256::ZERO);
        assert!(campaign.is_fully_pledged());
    }

    #[test]
    fn test_pledge_total_overflow() {
        let mut campaign = sample_campaign();
        campaign.pledge_cost = U256::MAX;
        assert_eq!(campaign.total_for_shares(2), None);
        assert_eq!(campaign.total_for_shares(1), Some(U256::MAX));
    }

    #[test]
    fn test_draft_validation() {
        let good = CampaignDraft::new("Bakery", U256::from(1000), 10);
        assert!(good.validate().is_ok());

        let no_title = CampaignDraft::new("   ", U256::from(1000), 10);
        assert!(matches!(
            no_title.validate(),
            Err(ClientError::InvalidCampaign(_))
        ));

        let free = CampaignDraft::new("Bakery", U256::ZERO, 10);
        assert!(free.validate().is_err());

        let zero_goal = CampaignDraft::new("Bakery", U256::from(1000), 0);
        assert!(zero_goal.validate().is_err());
    }

    #[test]
    fn test_default_campaign_fee() {
        assert_eq!(
            default_campaign_fee(),
            alloy::primitives::utils::parse_ether("0.02").unwrap()
        );
    }

    #[test]
    fn test_network_profiles() {
        let local = NetworkProfile::localhost();
        assert_eq!(local.rpc_url, "http://127.0.0.1:8545");
        assert_eq!(local.chain_id, 31337);

        let mainnet = NetworkProfile::mainnet("https://mainnet.example/v3/key");
        assert_eq!(mainnet.chain_id, 1);
    }

    #[test]
    fn test_snapshot_lookup_and_balance_format() {
        let snapshot = ContractSnapshot {
            address: Address::ZERO,
            owner: Address::ZERO,
            is_active: true,
            balance_wei: U256::from(20_000_000_000_000_000u64),
            campaigns: vec![sample_campaign()],
            fetched_at: chrono::Utc::now(),
        };

        assert!(snapshot.campaign(U256::from(1)).is_some());
        assert!(snapshot.campaign(U256::from(7)).is_none());
        assert!(snapshot.balance_eth().starts_with("0.02"));
    }

    #[test]
    fn test_campaign_serde_round_trip() {
        let campaign = sample_campaign();
        let json = serde_json::to_string(&campaign).unwrap();
        let back: Campaign = serde_json::from_str(&json).unwrap();
        assert_eq!(campaign, back);
    }
}
