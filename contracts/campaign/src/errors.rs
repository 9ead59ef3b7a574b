use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CampaignError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    /// Caller lacks the role the operation requires (manager or approver).
    Unauthorized = 3,
    BelowMinimum = 4,
    /// Request index is out of range.
    NotFound = 5,
    DuplicateVote = 6,
    /// Approvals do not form a strict majority of approvers.
    InsufficientApproval = 7,
    InsufficientFunds = 8,
    /// The request has already been finalized.
    InvalidState = 9,
    InvalidAmount = 10,
}
