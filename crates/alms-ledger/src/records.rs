use serde::{Deserialize, Serialize};

use alms_types::{AccountId, Amount, TokenId};

/// One accumulated per-token contribution line inside a donor record.
///
/// The amount only ever grows; entries are never removed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenContribution {
    pub token: TokenId,
    pub amount: Amount,
}

/// Accounting record for a single donor.
///
/// Created lazily on the donor's first donation and never destroyed.
/// `native_total` and every token accumulator are monotonically
/// non-decreasing — they record total-ever-donated, not a live balance.
/// `token_contributions` keeps one entry per distinct token, in the order
/// the donor first donated each token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonorRecord {
    pub address: AccountId,
    pub native_total: Amount,
    pub token_contributions: Vec<TokenContribution>,
}

impl DonorRecord {
    /// Create an empty record for a donor.
    pub fn new(address: AccountId) -> Self {
        Self {
            address,
            native_total: 0,
            token_contributions: Vec::new(),
        }
    }

    /// The accumulated total for `token`, or 0 if never donated.
    pub fn token_total(&self, token: &TokenId) -> Amount {
        self.token_contributions
            .iter()
            .find(|entry| entry.token == *token)
            .map(|entry| entry.amount)
            .unwrap_or(0)
    }

    /// Overwrite the accumulator for `token`, appending a new entry in
    /// first-seen order when the donor has not donated this token before.
    pub fn commit_token_total(&mut self, token: &TokenId, total: Amount) {
        match self
            .token_contributions
            .iter_mut()
            .find(|entry| entry.token == *token)
        {
            Some(entry) => entry.amount = total,
            None => self.token_contributions.push(TokenContribution {
                token: *token,
                amount: total,
            }),
        }
    }
}
