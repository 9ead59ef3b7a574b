//! Deployment tests. These import the built campaign WASM, so build it with
//! `stellar contract build` and run with `--features wasm-tests`.

use crate::{FactoryContract, FactoryContractClient};
use soroban_sdk::{testutils::Address as _, token, Address, Env, String};

extern crate std;

mod campaign_wasm {
    soroban_sdk::contractimport!(
        file = "../../target/wasm32v1-none/release/campaign.wasm"
    );
}

fn setup<'a>(env: &Env) -> (FactoryContractClient<'a>, Address) {
    let factory_id = env.register(FactoryContract, ());
    let factory = FactoryContractClient::new(env, &factory_id);

    let admin = Address::generate(env);
    let token_address = env
        .register_stellar_asset_contract_v2(Address::generate(env))
        .address();

    // Upload the campaign WASM.
    let wasm_hash = env.deployer().upload_contract_wasm(campaign_wasm::WASM);
    factory.initialize(&admin, &token_address, &wasm_hash);

    (factory, token_address)
}

#[test]
fn test_create_single_campaign() {
    let env = Env::default();
    env.mock_all_auths();
    let (factory, token_address) = setup(&env);

    let manager = Address::generate(&env);
    let campaign_addr = factory.create_campaign(&manager, &100);

    // Verify campaign was added to registry.
    let campaigns = factory.deployed_campaigns();
    assert_eq!(campaigns.len(), 1);
    assert_eq!(campaigns.get(0).unwrap(), campaign_addr);
    assert_eq!(factory.campaign_count(), 1);

    // The caller manages the deployed campaign.
    let campaign = campaign_wasm::Client::new(&env, &campaign_addr);
    assert_eq!(campaign.manager(), manager);
    assert_eq!(campaign.minimum_contribution(), 100);
    assert_eq!(campaign.token_address(), token_address);
}

#[test]
fn test_create_multiple_campaigns_by_same_manager() {
    let env = Env::default();
    env.mock_all_auths();
    let (factory, _) = setup(&env);

    let manager = Address::generate(&env);
    let other = Address::generate(&env);

    let campaign1 = factory.create_campaign(&manager, &100);
    let campaign2 = factory.create_campaign(&manager, &200);
    let campaign3 = factory.create_campaign(&other, &300);

    let campaigns = factory.deployed_campaigns();
    assert_eq!(campaigns.len(), 3);
    assert_eq!(campaigns.get(0).unwrap(), campaign1);
    assert_eq!(campaigns.get(1).unwrap(), campaign2);
    assert_eq!(campaigns.get(2).unwrap(), campaign3);
    assert_ne!(campaign1, campaign2);
}

#[test]
fn test_deployed_campaign_accepts_contributions() {
    let env = Env::default();
    env.mock_all_auths();
    let (factory, token_address) = setup(&env);

    let manager = Address::generate(&env);
    let campaign_addr = factory.create_campaign(&manager, &100);
    let campaign = campaign_wasm::Client::new(&env, &campaign_addr);

    let backer = Address::generate(&env);
    let recipient = Address::generate(&env);
    token::StellarAssetClient::new(&env, &token_address).mint(&backer, &500);

    campaign.contribute(&backer, &500);
    campaign.create_request(&manager, &String::from_str(&env, "Buy batteries"), &200, &recipient);
    campaign.approve_request(&backer, &0);
    campaign.finalize_request(&manager, &0);

    assert_eq!(token::Client::new(&env, &token_address).balance(&recipient), 200);
    assert!(campaign.request(&0).complete);
}
