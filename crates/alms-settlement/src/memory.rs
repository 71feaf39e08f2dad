use std::collections::HashMap;
use std::sync::RwLock;

use alms_types::{AccountId, Amount, TokenId};

use crate::error::{SettlementError, SettlementResult};
use crate::traits::Settlement;

/// In-memory settlement layer for tests, demos, and embedding.
///
/// Models the external world the ledger settles against: per-account native
/// balances, per-token account balances, allowances granted to custody, and
/// the custody balances themselves. All state is held behind a `RwLock` for
/// safe concurrent access.
pub struct InMemorySettlement {
    inner: RwLock<VaultState>,
}

#[derive(Default)]
struct VaultState {
    native_accounts: HashMap<AccountId, Amount>,
    token_accounts: HashMap<(TokenId, AccountId), Amount>,
    allowances: HashMap<(TokenId, AccountId), Amount>,
    native_custody: Amount,
    token_custody: HashMap<TokenId, Amount>,
}

impl InMemorySettlement {
    /// Create a new settlement layer with no balances anywhere.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(VaultState::default()),
        }
    }

    /// Credit `amount` of native currency to an external account.
    pub fn mint_native(&self, account: &AccountId, amount: Amount) {
        let mut state = self.inner.write().expect("settlement lock poisoned");
        let balance = state.native_accounts.entry(*account).or_default();
        *balance = balance.saturating_add(amount);
    }

    /// Credit `amount` of `token` to an external account.
    pub fn mint_token(&self, token: &TokenId, account: &AccountId, amount: Amount) {
        let mut state = self.inner.write().expect("settlement lock poisoned");
        let balance = state.token_accounts.entry((*token, *account)).or_default();
        *balance = balance.saturating_add(amount);
    }

    /// Grant custody an allowance of `amount` of `token` from `owner`.
    ///
    /// Overwrites any previous allowance, matching approve semantics in
    /// common token standards.
    pub fn approve(&self, token: &TokenId, owner: &AccountId, amount: Amount) {
        let mut state = self.inner.write().expect("settlement lock poisoned");
        state.allowances.insert((*token, *owner), amount);
    }

    /// Native balance of an external account.
    pub fn native_balance_of(&self, account: &AccountId) -> Amount {
        let state = self.inner.read().expect("settlement lock poisoned");
        state.native_accounts.get(account).copied().unwrap_or(0)
    }

    /// Balance of `token` held by an external account.
    pub fn token_balance_of(&self, token: &TokenId, account: &AccountId) -> Amount {
        let state = self.inner.read().expect("settlement lock poisoned");
        state
            .token_accounts
            .get(&(*token, *account))
            .copied()
            .unwrap_or(0)
    }

    /// Remaining allowance custody holds for `token` from `owner`.
    pub fn allowance(&self, token: &TokenId, owner: &AccountId) -> Amount {
        let state = self.inner.read().expect("settlement lock poisoned");
        state.allowances.get(&(*token, *owner)).copied().unwrap_or(0)
    }
}

impl Default for InMemorySettlement {
    fn default() -> Self {
        Self::new()
    }
}

impl Settlement for InMemorySettlement {
    fn receive_native(&self, from: &AccountId, amount: Amount) -> SettlementResult<()> {
        let mut state = self.inner.write().expect("settlement lock poisoned");
        let available = state.native_accounts.get(from).copied().unwrap_or(0);
        if amount > available {
            return Err(SettlementError::InsufficientBalance {
                requested: amount,
                available,
            });
        }
        state.native_accounts.insert(*from, available - amount);
        state.native_custody = state.native_custody.saturating_add(amount);
        Ok(())
    }

    fn pull_token(
        &self,
        token: &TokenId,
        from: &AccountId,
        amount: Amount,
    ) -> SettlementResult<()> {
        let mut state = self.inner.write().expect("settlement lock poisoned");

        let available = state
            .token_accounts
            .get(&(*token, *from))
            .copied()
            .unwrap_or(0);
        if amount > available {
            return Err(SettlementError::InsufficientBalance {
                requested: amount,
                available,
            });
        }

        let approved = state.allowances.get(&(*token, *from)).copied().unwrap_or(0);
        if amount > approved {
            return Err(SettlementError::InsufficientAllowance {
                requested: amount,
                approved,
            });
        }

        state.token_accounts.insert((*token, *from), available - amount);
        state.allowances.insert((*token, *from), approved - amount);
        let custody = state.token_custody.entry(*token).or_default();
        *custody = custody.saturating_add(amount);
        Ok(())
    }

    fn push_native(&self, to: &AccountId, amount: Amount) -> SettlementResult<()> {
        let mut state = self.inner.write().expect("settlement lock poisoned");
        if amount > state.native_custody {
            return Err(SettlementError::InsufficientCustody {
                requested: amount,
                held: state.native_custody,
            });
        }
        state.native_custody -= amount;
        let balance = state.native_accounts.entry(*to).or_default();
        *balance = balance.saturating_add(amount);
        Ok(())
    }

    fn push_token(&self, token: &TokenId, to: &AccountId, amount: Amount) -> SettlementResult<()> {
        let mut state = self.inner.write().expect("settlement lock poisoned");
        let held = state.token_custody.get(token).copied().unwrap_or(0);
        if amount > held {
            return Err(SettlementError::InsufficientCustody {
                requested: amount,
                held,
            });
        }
        state.token_custody.insert(*token, held - amount);
        let balance = state.token_accounts.entry((*token, *to)).or_default();
        *balance = balance.saturating_add(amount);
        Ok(())
    }

    fn native_custody(&self) -> Amount {
        let state = self.inner.read().expect("settlement lock poisoned");
        state.native_custody
    }

    fn token_custody(&self, token: &TokenId) -> Amount {
        let state = self.inner.read().expect("settlement lock poisoned");
        state.token_custody.get(token).copied().unwrap_or(0)
    }
}
