use soroban_sdk::{contracttype, Address, Env, String};

use crate::errors::CampaignError;

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    /// The account that created the campaign.
    Manager,
    /// The token used for contributions and payouts.
    Token,
    /// Smallest contribution that makes the sender an approver.
    MinimumContribution,
    /// Whether an address is an approver.
    Approver(Address),
    /// Number of distinct approvers.
    ApproversCount,
    /// Running total contributed by an address.
    Contribution(Address),
    /// Spending request by index.
    Request(u32),
    /// Number of requests created so far.
    RequestCount,
    /// Vote cast by an approver on a request.
    Approval(u32, Address),
}

/// A proposed disbursement of campaign funds.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Request {
    pub description: String,
    pub value: i128,
    pub recipient: Address,
    pub complete: bool,
    pub approval_count: u32,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct CampaignSummary {
    pub minimum_contribution: i128,
    pub balance: i128,
    pub request_count: u32,
    pub approvers_count: u32,
    pub manager: Address,
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Manager)
}

pub fn read_manager(env: &Env) -> Result<Address, CampaignError> {
    env.storage()
        .instance()
        .get(&DataKey::Manager)
        .ok_or(CampaignError::NotInitialized)
}

pub fn read_token(env: &Env) -> Result<Address, CampaignError> {
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(CampaignError::NotInitialized)
}

pub fn read_minimum_contribution(env: &Env) -> Result<i128, CampaignError> {
    env.storage()
        .instance()
        .get(&DataKey::MinimumContribution)
        .ok_or(CampaignError::NotInitialized)
}

pub fn is_approver(env: &Env, who: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Approver(who.clone()))
        .unwrap_or(false)
}

pub fn read_approvers_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::ApproversCount)
        .unwrap_or(0)
}

/// Records `who` as an approver. Returns `false` if it already was one.
pub fn add_approver(env: &Env, who: &Address) -> bool {
    if is_approver(env, who) {
        return false;
    }
    env.storage()
        .persistent()
        .set(&DataKey::Approver(who.clone()), &true);
    let count = read_approvers_count(env);
    env.storage()
        .instance()
        .set(&DataKey::ApproversCount, &(count + 1));
    true
}

pub fn read_contribution(env: &Env, who: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Contribution(who.clone()))
        .unwrap_or(0)
}

pub fn add_contribution(env: &Env, who: &Address, amount: i128) {
    let prev = read_contribution(env, who);
    env.storage()
        .persistent()
        .set(&DataKey::Contribution(who.clone()), &(prev + amount));
}

pub fn read_request_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::RequestCount)
        .unwrap_or(0)
}

pub fn read_request(env: &Env, index: u32) -> Result<Request, CampaignError> {
    env.storage()
        .persistent()
        .get(&DataKey::Request(index))
        .ok_or(CampaignError::NotFound)
}

pub fn write_request(env: &Env, index: u32, request: &Request) {
    env.storage()
        .persistent()
        .set(&DataKey::Request(index), request);
}

/// Appends a request and returns its index.
pub fn push_request(env: &Env, request: &Request) -> u32 {
    let index = read_request_count(env);
    write_request(env, index, request);
    env.storage()
        .instance()
        .set(&DataKey::RequestCount, &(index + 1));
    index
}

pub fn has_approved(env: &Env, index: u32, who: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Approval(index, who.clone()))
}

pub fn record_approval(env: &Env, index: u32, who: &Address) {
    env.storage()
        .persistent()
        .set(&DataKey::Approval(index, who.clone()), &true);
}
