// crates/hardness-core/src/context.rs
//! Session-scoped business input state.
//!
//! A `SessionContext` carries a committed (saved) `BusinessContext` and a
//! working copy being edited. Updates produce a new value instead of
//! mutating shared state, so every handler sees an explicit, serializable
//! context rather than a global session dictionary.

use crate::accounts;
use crate::types::{BusinessContext, SELECT_ACCOUNT, SELECT_INDUSTRY};
use anyhow::{anyhow, Result};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionContext {
    saved: BusinessContext,
    working: BusinessContext,
    industry_locked: bool,
    pending_account: Option<String>,
}

/// Result of selecting an account. Changing the account while a saved
/// problem exists requires explicit confirmation before overwrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountChange {
    Applied(SessionContext),
    NeedsConfirmation(SessionContext),
}

impl SessionContext {
    pub fn new() -> Self {
        SessionContext::default()
    }

    pub fn working(&self) -> &BusinessContext {
        &self.working
    }

    pub fn saved(&self) -> &BusinessContext {
        &self.saved
    }

    /// Industry is locked exactly while the working account is auto-mapped.
    pub fn industry_locked(&self) -> bool {
        self.industry_locked
    }

    pub fn confirmation_pending(&self) -> bool {
        self.pending_account.is_some()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.working != self.saved
    }

    /// Select an account. Auto-maps and locks the industry for mapped
    /// accounts; unmapped accounts reset the industry to the placeholder and
    /// leave it editable. If a saved problem exists, the change is held until
    /// `confirm_account_change` or `cancel_account_change`.
    pub fn select_account(self, account: &str) -> Result<AccountChange> {
        if !accounts::is_known_account(account) {
            return Err(anyhow!("unknown account: {}", account));
        }
        if account == self.working.account {
            return Ok(AccountChange::Applied(self));
        }
        if !self.saved.problem.trim().is_empty() {
            let mut next = self;
            next.pending_account = Some(account.to_string());
            return Ok(AccountChange::NeedsConfirmation(next));
        }
        Ok(AccountChange::Applied(self.apply_account(account)))
    }

    /// Apply the held account change and its industry auto-mapping.
    pub fn confirm_account_change(mut self) -> Self {
        match self.pending_account.take() {
            Some(account) => self.apply_account(&account),
            None => self,
        }
    }

    /// Discard the held account change, reverting the working copy to the
    /// committed values.
    pub fn cancel_account_change(mut self) -> Self {
        self.pending_account = None;
        self.working = self.saved.clone();
        self.industry_locked = accounts::is_auto_mapped(&self.working.account);
        self
    }

    fn apply_account(mut self, account: &str) -> Self {
        self.working.account = account.to_string();
        match accounts::industry_for(account) {
            Some(industry) if account != SELECT_ACCOUNT => {
                debug!("auto-mapped account {} -> {}", account, industry);
                self.working.industry = industry.to_string();
                self.industry_locked = true;
            }
            _ => {
                self.working.industry = SELECT_INDUSTRY.to_string();
                self.industry_locked = false;
            }
        }
        self
    }

    /// Manual industry selection. Permitted only while the account is
    /// unmapped; auto-mapped accounts keep their derived industry.
    pub fn select_industry(self, industry: &str) -> Result<Self> {
        if self.industry_locked {
            return Err(anyhow!(
                "industry is automatically mapped for account '{}'",
                self.working.account
            ));
        }
        if !accounts::is_known_industry(industry) {
            return Err(anyhow!("unknown industry: {}", industry));
        }
        let mut next = self;
        next.working.industry = industry.to_string();
        Ok(next)
    }

    pub fn set_problem(mut self, problem: &str) -> Self {
        self.working.problem = problem.to_string();
        self
    }

    /// Commit the working copy. Fails unless an account and industry are
    /// selected and the problem statement is non-empty.
    pub fn commit(mut self) -> Result<Self> {
        if !self.working.is_complete() {
            return Err(anyhow!(
                "please select an account, an industry, and provide a business problem description"
            ));
        }
        self.saved = self.working.clone();
        self.pending_account = None;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapped_account_locks_industry() {
        let ctx = SessionContext::new();
        let ctx = match ctx.select_account("Walmart").unwrap() {
            AccountChange::Applied(c) => c,
            AccountChange::NeedsConfirmation(_) => panic!("no saved problem yet"),
        };
        assert_eq!(ctx.working().industry, "Retail");
        assert!(ctx.industry_locked());
        assert!(ctx.clone().select_industry("Finance").is_err());
    }

    #[test]
    fn test_unmapped_account_leaves_industry_editable() {
        let ctx = SessionContext::new();
        let ctx = match ctx.select_account("Others").unwrap() {
            AccountChange::Applied(c) => c,
            AccountChange::NeedsConfirmation(_) => panic!("no saved problem yet"),
        };
        assert_eq!(ctx.working().industry, "Select Industry");
        assert!(!ctx.industry_locked());
        let ctx = ctx.select_industry("Other").unwrap();
        assert_eq!(ctx.working().industry, "Other");
    }

    #[test]
    fn test_account_change_after_save_needs_confirmation() {
        let ctx = SessionContext::new();
        let ctx = match ctx.select_account("Walmart").unwrap() {
            AccountChange::Applied(c) => c,
            _ => panic!(),
        };
        let ctx = ctx
            .set_problem("Our call center cannot predict staffing needs")
            .commit()
            .unwrap();
        assert!(!ctx.has_unsaved_changes());

        let ctx = match ctx.select_account("Nike").unwrap() {
            AccountChange::NeedsConfirmation(c) => c,
            AccountChange::Applied(_) => panic!("saved problem must gate the change"),
        };
        assert!(ctx.confirmation_pending());
        // Working copy is untouched until confirmed
        assert_eq!(ctx.working().account, "Walmart");

        let ctx = ctx.confirm_account_change();
        assert_eq!(ctx.working().account, "Nike");
        assert_eq!(ctx.working().industry, "Consumer Goods");
        assert!(ctx.has_unsaved_changes());
    }

    #[test]
    fn test_cancel_reverts_to_saved() {
        let ctx = SessionContext::new();
        let ctx = match ctx.select_account("Dell").unwrap() {
            AccountChange::Applied(c) => c,
            _ => panic!(),
        };
        let ctx = ctx.set_problem("Forecasting is unreliable").commit().unwrap();
        let ctx = match ctx.select_account("BMO").unwrap() {
            AccountChange::NeedsConfirmation(c) => c,
            _ => panic!(),
        };
        let ctx = ctx.cancel_account_change();
        assert_eq!(ctx.working().account, "Dell");
        assert_eq!(ctx.working().industry, "Technology");
        assert!(!ctx.confirmation_pending());
        assert!(!ctx.has_unsaved_changes());
    }

    #[test]
    fn test_commit_requires_complete_context() {
        let ctx = SessionContext::new();
        assert!(ctx.clone().commit().is_err());

        let ctx = match ctx.select_account("Others").unwrap() {
            AccountChange::Applied(c) => c,
            _ => panic!(),
        };
        // Industry still the placeholder
        let incomplete = ctx.clone().set_problem("something").commit();
        assert!(incomplete.is_err());

        let ctx = ctx.select_industry("Other").unwrap().set_problem("something");
        assert!(ctx.commit().is_ok());
    }

    #[test]
    fn test_unknown_account_rejected() {
        let ctx = SessionContext::new();
        assert!(ctx.select_account("Not A Customer").is_err());
    }
}
