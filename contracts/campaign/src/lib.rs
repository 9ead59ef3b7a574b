#![no_std]

use soroban_sdk::{contract, contractimpl, log, symbol_short, token, Address, Env, String};

mod errors;
mod storage;


pub use errors::CampaignError;
pub use storage::{CampaignSummary, Request};

// ── Contract ────────────────────────────────────────────────────────────────

#[contract]
pub struct CampaignContract;

#[contractimpl]
impl CampaignContract {
    /// Initializes a new campaign.
    ///
    /// # Arguments
    /// * `manager`              – The account that creates and finalizes requests.
    /// * `token`                – The token contract used for contributions and payouts.
    /// * `minimum_contribution` – Smallest contribution accepted (in the token's smallest unit).
    pub fn initialize(
        env: Env,
        manager: Address,
        token: Address,
        minimum_contribution: i128,
    ) -> Result<(), CampaignError> {
        // Prevent re-initialization.
        if storage::is_initialized(&env) {
            return Err(CampaignError::AlreadyInitialized);
        }
        if minimum_contribution <= 0 {
            return Err(CampaignError::InvalidAmount);
        }

        manager.require_auth();

        env.storage().instance().set(&storage::DataKey::Manager, &manager);
        env.storage().instance().set(&storage::DataKey::Token, &token);
        env.storage()
            .instance()
            .set(&storage::DataKey::MinimumContribution, &minimum_contribution);
        env.storage()
            .instance()
            .set(&storage::DataKey::ApproversCount, &0u32);
        env.storage()
            .instance()
            .set(&storage::DataKey::RequestCount, &0u32);

        env.events().publish(
            (symbol_short!("campaign"), symbol_short!("init")),
            (manager, token, minimum_contribution),
        );
        Ok(())
    }

    /// Contribute tokens to the campaign.
    ///
    /// A contribution of at least the minimum makes the contributor an
    /// approver. Membership never lapses and repeated contributions do not
    /// count the contributor twice.
    pub fn contribute(env: Env, contributor: Address, amount: i128) -> Result<(), CampaignError> {
        contributor.require_auth();

        let minimum = storage::read_minimum_contribution(&env)?;
        if amount < minimum {
            log!(&env, "contribution below minimum", amount, minimum);
            return Err(CampaignError::BelowMinimum);
        }

        let token_address = storage::read_token(&env)?;
        let token_client = token::Client::new(&env, &token_address);

        // Transfer tokens from the contributor to this contract.
        token_client.transfer(&contributor, &env.current_contract_address(), &amount);

        storage::add_contribution(&env, &contributor, amount);

        if storage::add_approver(&env, &contributor) {
            env.events().publish(
                (symbol_short!("campaign"), symbol_short!("approver")),
                contributor.clone(),
            );
        }

        env.events().publish(
            (symbol_short!("campaign"), symbol_short!("contrib")),
            (contributor, amount),
        );
        Ok(())
    }

    /// Propose a spending request. Manager only.
    ///
    /// The value is not checked against the current balance; an underfunded
    /// request simply cannot be finalized until funds arrive.
    ///
    /// # Returns
    /// The index of the new request.
    pub fn create_request(
        env: Env,
        caller: Address,
        description: String,
        value: i128,
        recipient: Address,
    ) -> Result<u32, CampaignError> {
        let manager = storage::read_manager(&env)?;
        if caller != manager {
            return Err(CampaignError::Unauthorized);
        }
        caller.require_auth();

        if value <= 0 {
            return Err(CampaignError::InvalidAmount);
        }

        let request = Request {
            description,
            value,
            recipient: recipient.clone(),
            complete: false,
            approval_count: 0,
        };
        let index = storage::push_request(&env, &request);

        env.events().publish(
            (symbol_short!("campaign"), symbol_short!("request"), index),
            (recipient, value),
        );
        Ok(index)
    }

    /// Vote for a request. Each approver may vote once per request.
    pub fn approve_request(env: Env, approver: Address, index: u32) -> Result<(), CampaignError> {
        approver.require_auth();

        let mut request = storage::read_request(&env, index)?;

        if !storage::is_approver(&env, &approver) {
            return Err(CampaignError::Unauthorized);
        }
        if storage::has_approved(&env, index, &approver) {
            return Err(CampaignError::DuplicateVote);
        }
        if request.complete {
            return Err(CampaignError::InvalidState);
        }

        storage::record_approval(&env, index, &approver);
        request.approval_count += 1;
        storage::write_request(&env, index, &request);

        env.events().publish(
            (symbol_short!("campaign"), symbol_short!("approve"), index),
            (approver, request.approval_count),
        );
        Ok(())
    }

    /// Pay out a request. Manager only.
    ///
    /// Requires approvals from a strict majority of the approvers counted at
    /// the time of the call, and enough tokens held by the campaign. A
    /// request can be finalized once.
    pub fn finalize_request(env: Env, caller: Address, index: u32) -> Result<(), CampaignError> {
        let manager = storage::read_manager(&env)?;
        if caller != manager {
            return Err(CampaignError::Unauthorized);
        }
        caller.require_auth();

        let mut request = storage::read_request(&env, index)?;
        if request.complete {
            return Err(CampaignError::InvalidState);
        }

        let approvers_count = storage::read_approvers_count(&env);
        if u64::from(request.approval_count) * 2 <= u64::from(approvers_count) {
            log!(
                &env,
                "request lacks majority",
                index,
                request.approval_count,
                approvers_count
            );
            return Err(CampaignError::InsufficientApproval);
        }

        let token_address = storage::read_token(&env)?;
        let token_client = token::Client::new(&env, &token_address);
        let contract_address = env.current_contract_address();
        if token_client.balance(&contract_address) < request.value {
            return Err(CampaignError::InsufficientFunds);
        }

        token_client.transfer(&contract_address, &request.recipient, &request.value);

        request.complete = true;
        storage::write_request(&env, index, &request);

        env.events().publish(
            (symbol_short!("campaign"), symbol_short!("finalize"), index),
            (request.recipient, request.value),
        );
        Ok(())
    }

    // ── View helpers ────────────────────────────────────────────────────

    pub fn manager(env: Env) -> Result<Address, CampaignError> {
        storage::read_manager(&env)
    }

    pub fn token_address(env: Env) -> Result<Address, CampaignError> {
        storage::read_token(&env)
    }

    pub fn minimum_contribution(env: Env) -> Result<i128, CampaignError> {
        storage::read_minimum_contribution(&env)
    }

    /// Returns whether `who` has contributed at least the minimum.
    pub fn is_approver(env: Env, who: Address) -> bool {
        storage::is_approver(&env, &who)
    }

    pub fn approvers_count(env: Env) -> u32 {
        storage::read_approvers_count(&env)
    }

    /// Returns the total contributed by a specific address.
    pub fn contribution(env: Env, contributor: Address) -> i128 {
        storage::read_contribution(&env, &contributor)
    }

    pub fn request(env: Env, index: u32) -> Result<Request, CampaignError> {
        storage::read_request(&env, index)
    }

    pub fn request_count(env: Env) -> u32 {
        storage::read_request_count(&env)
    }

    /// Returns whether `approver` has voted for the request at `index`.
    pub fn has_approved(env: Env, index: u32, approver: Address) -> bool {
        storage::has_approved(&env, index, &approver)
    }

    /// Returns the token balance held by the campaign.
    pub fn balance(env: Env) -> Result<i128, CampaignError> {
        let token_address = storage::read_token(&env)?;
        Ok(token::Client::new(&env, &token_address).balance(&env.current_contract_address()))
    }

    /// Returns the campaign parameters and counters in one call.
    pub fn summary(env: Env) -> Result<CampaignSummary, CampaignError> {
        Ok(CampaignSummary {
            minimum_contribution: storage::read_minimum_contribution(&env)?,
            balance: Self::balance(env.clone())?,
            request_count: storage::read_request_count(&env),
            approvers_count: storage::read_approvers_count(&env),
            manager: storage::read_manager(&env)?,
        })
    }
}
