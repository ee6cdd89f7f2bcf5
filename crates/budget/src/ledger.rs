//! Budget ledger — a single balance shared by all channel clients.

use chrono::{DateTime, Utc};
use launchpad_core::config::LedgerConfig;
use launchpad_core::error::{CampaignError, CampaignResult};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Receipt for one successful debit.
#[derive(Debug, Clone, Serialize)]
pub struct Allocation {
    pub id: Uuid,
    pub amount: f64,
    /// Channel that requested the debit, if any.
    pub channel: Option<String>,
    pub remaining_after: f64,
    pub allocated_at: DateTime<Utc>,
}

#[derive(Debug)]
struct LedgerState {
    balance: f64,
    allocations: Vec<Allocation>,
}

// ---------------------------------------------------------------------------
// BudgetLedger
// ---------------------------------------------------------------------------

/// Shared balance. Wrap in an `Arc` and hand the same handle to every
/// client that spends from it.
///
/// Debits are final; there is no refund path.
#[derive(Debug)]
pub struct BudgetLedger {
    initial: f64,
    currency: String,
    state: Mutex<LedgerState>,
}

impl BudgetLedger {
    pub fn new(initial_amount: f64) -> CampaignResult<Self> {
        Self::with_currency(initial_amount, "USD")
    }

    /// Fails with `InvalidBalance` for a negative or non-finite starting amount.
    pub fn with_currency(initial_amount: f64, currency: impl Into<String>) -> CampaignResult<Self> {
        if !initial_amount.is_finite() || initial_amount < 0.0 {
            return Err(CampaignError::InvalidBalance {
                amount: initial_amount,
            });
        }

        Ok(Self {
            initial: initial_amount,
            currency: currency.into(),
            state: Mutex::new(LedgerState {
                balance: initial_amount,
                allocations: Vec::new(),
            }),
        })
    }

    pub fn from_config(config: &LedgerConfig) -> CampaignResult<Self> {
        Self::with_currency(config.initial_budget, config.currency.clone())
    }

    /// Debit `amount` from the balance.
    pub fn allocate(&self, amount: f64) -> CampaignResult<()> {
        self.debit(amount, None).map(|_| ())
    }

    /// Debit `amount` on behalf of `channel` and return the receipt.
    pub fn allocate_for_channel(&self, channel: &str, amount: f64) -> CampaignResult<Allocation> {
        self.debit(amount, Some(channel))
    }

    /// Current balance.
    pub fn remaining(&self) -> f64 {
        self.state.lock().balance
    }

    pub fn initial(&self) -> f64 {
        self.initial
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Total debited so far.
    pub fn spent(&self) -> f64 {
        self.state.lock().allocations.iter().map(|a| a.amount).sum()
    }

    /// All successful debits, oldest first.
    pub fn allocations(&self) -> Vec<Allocation> {
        self.state.lock().allocations.clone()
    }

    /// Spend per channel, sorted by channel name. Untagged debits are skipped.
    pub fn channel_spend_breakdown(&self) -> Vec<(String, f64)> {
        let state = self.state.lock();

        let mut map: HashMap<String, f64> = HashMap::new();
        for alloc in &state.allocations {
            if let Some(channel) = &alloc.channel {
                *map.entry(channel.clone()).or_insert(0.0) += alloc.amount;
            }
        }

        let mut result: Vec<(String, f64)> = map.into_iter().collect();
        result.sort_by(|a, b| a.0.cmp(&b.0));
        result
    }

    // -- internal helpers ---------------------------------------------------

    /// Check and debit under one lock so concurrent callers cannot overspend.
    fn debit(&self, amount: f64, channel: Option<&str>) -> CampaignResult<Allocation> {
        if !amount.is_finite() || amount <= 0.0 {
            warn!(amount, channel = channel.unwrap_or("-"), "Rejected non-positive allocation");
            metrics::counter!(
                "launchpad.allocation_rejected",
                "reason" => "invalid_amount",
                "channel" => channel.unwrap_or("-").to_string()
            )
            .increment(1);
            return Err(CampaignError::InvalidAmount { amount });
        }

        let mut state = self.state.lock();
        if amount > state.balance {
            let remaining = state.balance;
            drop(state);
            warn!(
                amount,
                remaining,
                channel = channel.unwrap_or("-"),
                "Rejected allocation, insufficient funds"
            );
            metrics::counter!(
                "launchpad.allocation_rejected",
                "reason" => "insufficient_funds",
                "channel" => channel.unwrap_or("-").to_string()
            )
            .increment(1);
            return Err(CampaignError::InsufficientFunds {
                requested: amount,
                remaining,
            });
        }

        state.balance -= amount;
        let allocation = Allocation {
            id: Uuid::new_v4(),
            amount,
            channel: channel.map(str::to_string),
            remaining_after: state.balance,
            allocated_at: Utc::now(),
        };
        state.allocations.push(allocation.clone());
        drop(state);

        debug!(
            allocation_id = %allocation.id,
            amount,
            remaining = allocation.remaining_after,
            channel = channel.unwrap_or("-"),
            "Budget allocated"
        );
        metrics::histogram!("launchpad.allocated_amount").record(amount);

        Ok(allocation)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
