// src/contract/bindings.rs
use alloy::sol;

// Typed bindings for the crowdfunding contract's external interface. The
// contract itself is an opaque on-chain artifact; only its ABI is known here.
sol! {
    #[sol(rpc)]
    contract Crowdfunding {
        struct CampaignInfo {
            uint256 campaignId;
            string title;
            address entrepreneur;
            uint256 pledgeCost;
            uint256 pledgesNeeded;
            uint256 pledgesCount;
        }

        function owner() external view returns (address);
        function isContractActive() external view returns (bool);
        function getActiveCampaigns() external view returns (CampaignInfo[] memory);
        function getCampaignDetails(uint256 campaignId) external view returns (CampaignInfo memory);
        function createCampaign(string title, uint256 pledgeCost, uint256 pledgesNeeded) external payable;
        function pledge(uint256 campaignId, uint256 shares) external payable;
    }
}

use crate::types::Campaign;

impl From<Crowdfunding::CampaignInfo> for Campaign {
    fn from(info: Crowdfunding::CampaignInfo) -> Self {
        Self {
            id: info.campaignId,
            title: info.title,
            entrepreneur: info.entrepreneur,
            pledge_cost: info.pledgeCost,
            pledges_needed: info.pledgesNeeded,
            pledges_count: info.pledgesCount,
        }
    }
}
