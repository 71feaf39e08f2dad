use serde::{Deserialize, Serialize};

use alms_types::{AccountId, Amount, TokenId};

/// Full enumeration of the ledger's accounting history.
///
/// Four parallel sequences, index-aligned by donor, in first-donation
/// order. For every index `i`, `token_lists[i]` and `token_amount_lists[i]`
/// have the same length and pair up positionally. Token lists are
/// materialized at write time, so building this costs
/// O(donors + token entries).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationHistory {
    pub donors: Vec<AccountId>,
    pub native_totals: Vec<Amount>,
    pub token_lists: Vec<Vec<TokenId>>,
    pub token_amount_lists: Vec<Vec<Amount>>,
}

impl DonationHistory {
    /// Number of donors enumerated.
    pub fn len(&self) -> usize {
        self.donors.len()
    }

    /// Returns `true` if no donor has ever donated.
    pub fn is_empty(&self) -> bool {
        self.donors.is_empty()
    }

    /// Index of `donor` in the enumeration, if present.
    pub fn position(&self, donor: &AccountId) -> Option<usize> {
        self.donors.iter().position(|d| d == donor)
    }

    /// Returns `true` if the four sequences are index-aligned: equal outer
    /// lengths, and pairwise-equal token list lengths per donor.
    pub fn is_aligned(&self) -> bool {
        self.native_totals.len() == self.donors.len()
            && self.token_lists.len() == self.donors.len()
            && self.token_amount_lists.len() == self.donors.len()
            && self
                .token_lists
                .iter()
                .zip(&self.token_amount_lists)
                .all(|(tokens, amounts)| tokens.len() == amounts.len())
    }
}
