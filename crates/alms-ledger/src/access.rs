use std::sync::RwLock;

use alms_types::AccountId;

use crate::error::LedgerError;

/// Gate for owner-only operations.
///
/// Holds the single owner identity. Replacement happens as one assignment
/// under the write lock, so there is never a window with zero owners, two
/// owners, or an untrusted party holding the role.
#[derive(Debug)]
pub struct AccessController {
    owner: RwLock<AccountId>,
}

impl AccessController {
    /// Create a controller with the given initial owner.
    ///
    /// The null account cannot own the ledger.
    pub fn new(owner: AccountId) -> Result<Self, LedgerError> {
        if owner.is_zero() {
            return Err(LedgerError::NullOwner);
        }
        Ok(Self {
            owner: RwLock::new(owner),
        })
    }

    /// The current owner.
    pub fn current_owner(&self) -> AccountId {
        *self.owner.read().expect("owner lock poisoned")
    }

    /// Fails with `Unauthorized` unless `caller` is the current owner.
    pub fn ensure_owner(&self, caller: &AccountId) -> Result<(), LedgerError> {
        let owner = self.owner.read().expect("owner lock poisoned");
        if *caller != *owner {
            return Err(LedgerError::Unauthorized { caller: *caller });
        }
        Ok(())
    }

    /// Transfer ownership to `new_owner`, returning the previous owner.
    ///
    /// The caller check and the replacement happen under one write lock, so
    /// the previous owner's authority ends exactly when the new owner's
    /// begins.
    pub fn transfer(
        &self,
        caller: &AccountId,
        new_owner: &AccountId,
    ) -> Result<AccountId, LedgerError> {
        let mut owner = self.owner.write().expect("owner lock poisoned");
        if *caller != *owner {
            return Err(LedgerError::Unauthorized { caller: *caller });
        }
        if new_owner.is_zero() {
            return Err(LedgerError::NullOwner);
        }
        let previous = *owner;
        *owner = *new_owner;
        Ok(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_rejects_null_owner() {
        let err = AccessController::new(AccountId::zero()).unwrap_err();
        assert_eq!(err, LedgerError::NullOwner);
    }

    #[test]
    fn owner_passes_gate_others_fail() {
        let owner = AccountId::ephemeral();
        let stranger = AccountId::ephemeral();
        let access = AccessController::new(owner).unwrap();

        access.ensure_owner(&owner).unwrap();
        let err = access.ensure_owner(&stranger).unwrap_err();
        assert_eq!(err, LedgerError::Unauthorized { caller: stranger });
    }

    #[test]
    fn transfer_replaces_owner_atomically() {
        let owner = AccountId::ephemeral();
        let next = AccountId::ephemeral();
        let access = AccessController::new(owner).unwrap();

        let previous = access.transfer(&owner, &next).unwrap();
        assert_eq!(previous, owner);
        assert_eq!(access.current_owner(), next);

        // The previous owner's authority ended with the transfer.
        assert!(access.ensure_owner(&owner).is_err());
        access.ensure_owner(&next).unwrap();
    }

    #[test]
    fn transfer_rejects_non_owner_caller() {
        let owner = AccountId::ephemeral();
        let stranger = AccountId::ephemeral();
        let access = AccessController::new(owner).unwrap();

        let err = access.transfer(&stranger, &stranger).unwrap_err();
        assert_eq!(err, LedgerError::Unauthorized { caller: stranger });
        assert_eq!(access.current_owner(), owner);
    }

    #[test]
    fn transfer_rejects_null_new_owner() {
        let owner = AccountId::ephemeral();
        let access = AccessController::new(owner).unwrap();

        let err = access.transfer(&owner, &AccountId::zero()).unwrap_err();
        assert_eq!(err, LedgerError::NullOwner);
        assert_eq!(access.current_owner(), owner);
    }
}
