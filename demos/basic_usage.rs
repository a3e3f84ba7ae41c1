// demos/basic_usage.rs
//
// End-to-end flow against a local development node with the contract
// already deployed:
//   connect wallet -> bind contract -> read state -> create campaign
//   -> pledge one share -> print the refreshed state.
use alloy::primitives::{U256, utils::format_ether};
use crowdfund_client::{CampaignDraft, ClientConfig, CrowdfundClient};

// Default deployment address of the first contract on a fresh local node
const CONTRACT_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

// Account #0 of the local node's default mnemonic
const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ClientConfig {
        private_keys: vec![DEV_KEY.to_string()],
        ..ClientConfig::default()
    };

    println!("🔌 Connecting wallet...");
    let client = CrowdfundClient::connect(config)?;
    println!("💳 Active account: {}", client.wallet_address());
    println!(
        "💰 Account balance: {} ETH",
        format_ether(client.wallet_balance().await?)
    );

    println!("📜 Binding contract at {CONTRACT_ADDRESS}...");
    let snapshot = client.connect_contract(CONTRACT_ADDRESS).await?;
    println!("👤 Owner: {}", snapshot.owner);
    println!("✅ Active: {}", snapshot.is_active);
    println!("🏦 Contract balance: {} ETH", snapshot.balance_eth());
    print_campaigns(&client).await;

    println!("🆕 Creating a campaign (fee 0.02 ETH)...");
    let draft = CampaignDraft::new(
        "Neighborhood bakery",
        U256::from(1_000_000_000_000_000u64), // 0.001 ETH per share
        10,
    );
    let outcome = client.create_campaign(&draft).await?;
    println!("⛏️  Mined in tx {}", outcome.tx_hash);
    print_campaigns(&client).await;

    // Pledge one share in the first open campaign
    if let Some(snapshot) = client.snapshot().await {
        if let Some(campaign) = snapshot.campaigns.first() {
            println!("🤝 Pledging 1 share in campaign {}...", campaign.id);
            let outcome = client.pledge(campaign.id, 1).await?;
            println!("⛏️  Mined in tx {}", outcome.tx_hash);
            print_campaigns(&client).await;
        }
    }

    Ok(())
}

async fn print_campaigns(client: &CrowdfundClient) {
    let Some(snapshot) = client.snapshot().await else {
        println!("   (no state read yet)");
        return;
    };

    println!("📊 {} active campaign(s):", snapshot.campaigns.len());
    for campaign in &snapshot.campaigns {
        println!(
            "   #{} {:<24} {}/{} shares at {} wei",
            campaign.id,
            campaign.title,
            campaign.pledges_count,
            campaign.pledges_needed,
            campaign.pledge_cost
        );
    }
}
