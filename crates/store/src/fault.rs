//! Fault injection for the in-memory stores.
//!
//! Lets tests make a store fail the way a real backend would, so the
//! compensation paths of the reconciler can be exercised.

use std::collections::HashSet;
use std::sync::Mutex;

use crate::error::{StoreError, StoreResult};

/// Store operation that can be made to fail.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    Read,
    Add,
    Update,
    Delete,
}

/// Set of operations currently armed to fail.
#[derive(Debug, Default)]
pub struct FaultPlan {
    armed: Mutex<HashSet<Operation>>,
}

impl FaultPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `op` fail until [`FaultPlan::disarm`].
    pub fn arm(&self, op: Operation) {
        if let Ok(mut armed) = self.armed.lock() {
            armed.insert(op);
        }
    }

    pub fn disarm(&self, op: Operation) {
        if let Ok(mut armed) = self.armed.lock() {
            armed.remove(&op);
        }
    }

    pub fn clear(&self) {
        if let Ok(mut armed) = self.armed.lock() {
            armed.clear();
        }
    }

    pub fn check(&self, op: Operation) -> StoreResult<()> {
        let armed = self.armed.lock().map_err(|_| StoreError::Poisoned)?;
        if armed.contains(&op) {
            return Err(StoreError::storage(format!("injected {op:?} failure")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn armed_operation_fails_until_disarmed() {
        let plan = FaultPlan::new();
        assert!(plan.check(Operation::Update).is_ok());

        plan.arm(Operation::Update);
        assert!(matches!(plan.check(Operation::Update), Err(StoreError::Storage(_))));
        assert!(plan.check(Operation::Delete).is_ok());

        plan.disarm(Operation::Update);
        assert!(plan.check(Operation::Update).is_ok());
    }
}
