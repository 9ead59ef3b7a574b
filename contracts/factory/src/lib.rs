#![no_std]

use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, Address, BytesN, Env, IntoVal, Symbol, Vec,
};

mod errors;


#[cfg(all(test, feature = "wasm-tests"))]
mod test_deploy;

pub use errors::FactoryError;

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    /// Deployment settings set at initialization.
    Config,
    /// List of all deployed campaign addresses.
    Campaigns,
}

/// Settings every campaign deployed by the factory shares.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct FactoryConfig {
    /// May rotate the campaign WASM hash.
    pub admin: Address,
    /// Token the campaigns accept and pay out.
    pub token: Address,
    pub campaign_wasm_hash: BytesN<32>,
}

fn read_config(env: &Env) -> Result<FactoryConfig, FactoryError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(FactoryError::NotInitialized)
}

fn read_campaigns(env: &Env) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&DataKey::Campaigns)
        .unwrap_or(Vec::new(env))
}

/// Salt derived from the registry position, so every deployment gets a
/// distinct address.
fn deployment_salt(env: &Env, index: u32) -> BytesN<32> {
    let mut salt = [0u8; 32];
    salt[28..].copy_from_slice(&index.to_be_bytes());
    BytesN::from_array(env, &salt)
}

#[contract]
pub struct FactoryContract;

#[contractimpl]
impl FactoryContract {
    /// Configure the factory.
    ///
    /// # Arguments
    /// * `admin`              – The account allowed to rotate the campaign WASM.
    /// * `token`              – The token contract campaigns use for contributions.
    /// * `campaign_wasm_hash` – The hash of the campaign contract WASM to deploy.
    pub fn initialize(
        env: Env,
        admin: Address,
        token: Address,
        campaign_wasm_hash: BytesN<32>,
    ) -> Result<(), FactoryError> {
        if env.storage().instance().has(&DataKey::Config) {
            return Err(FactoryError::AlreadyInitialized);
        }

        admin.require_auth();

        let config = FactoryConfig {
            admin,
            token,
            campaign_wasm_hash,
        };
        env.storage().instance().set(&DataKey::Config, &config);

        env.events().publish(
            (symbol_short!("factory"), symbol_short!("init")),
            (config.admin, config.token),
        );
        Ok(())
    }

    /// Deploy a new campaign managed by `manager`.
    ///
    /// # Arguments
    /// * `manager`              – The campaign manager; must authorize the call.
    /// * `minimum_contribution` – The campaign's minimum contribution.
    ///
    /// # Returns
    /// The address of the newly deployed campaign contract.
    pub fn create_campaign(
        env: Env,
        manager: Address,
        minimum_contribution: i128,
    ) -> Result<Address, FactoryError> {
        let config = read_config(&env)?;

        manager.require_auth();

        if minimum_contribution <= 0 {
            return Err(FactoryError::InvalidAmount);
        }

        let mut campaigns = read_campaigns(&env);

        // Deploy the campaign contract from the WASM hash.
        let salt = deployment_salt(&env, campaigns.len());
        let deployed_address = env
            .deployer()
            .with_current_contract(salt)
            .deploy_v2(config.campaign_wasm_hash, ());

        // Initialize the deployed contract.
        let _: () = env.invoke_contract(
            &deployed_address,
            &Symbol::new(&env, "initialize"),
            soroban_sdk::vec![
                &env,
                manager.into_val(&env),
                config.token.into_val(&env),
                minimum_contribution.into_val(&env),
            ],
        );

        // Add to registry.
        campaigns.push_back(deployed_address.clone());
        env.storage()
            .instance()
            .set(&DataKey::Campaigns, &campaigns);

        env.events().publish(
            (symbol_short!("factory"), symbol_short!("deployed")),
            (manager, deployed_address.clone(), minimum_contribution),
        );

        Ok(deployed_address)
    }

    /// Returns every campaign address ever deployed, oldest first.
    pub fn deployed_campaigns(env: Env) -> Vec<Address> {
        read_campaigns(&env)
    }

    /// Returns the total number of deployed campaigns.
    pub fn campaign_count(env: Env) -> u32 {
        read_campaigns(&env).len()
    }

    pub fn config(env: Env) -> Result<FactoryConfig, FactoryError> {
        read_config(&env)
    }

    /// Point future deployments at a new campaign WASM. Existing campaigns
    /// keep running their current code.
    pub fn set_campaign_wasm(env: Env, wasm_hash: BytesN<32>) -> Result<(), FactoryError> {
        let mut config = read_config(&env)?;
        config.admin.require_auth();

        config.campaign_wasm_hash = wasm_hash.clone();
        env.storage().instance().set(&DataKey::Config, &config);

        env.events().publish(
            (symbol_short!("factory"), symbol_short!("wasm")),
            wasm_hash,
        );
        Ok(())
    }
}
