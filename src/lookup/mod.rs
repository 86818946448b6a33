//! The address lookup page controller.
//!
//! [`AddressLookup`] owns the three pieces of page state (input text, loading
//! flag, last result) and moves between them on [`LookupEvent`]s. A submit is
//! split in two so the controller never has to be borrowed across the network
//! call: [`AddressLookup::begin_submit`] validates and stamps a
//! [`PendingLookup`], and [`AddressLookup::complete`] applies the outcome only
//! if that stamp is still the latest one.

pub mod render;

use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;

use crate::errors::LookupError;
use crate::models::lookup::LookupResult;
use crate::rpc::TransactionCountSource;
use crate::utils::validation::is_well_formed_address;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupEvent {
    Change(String),
    Submit,
    Reset,
}

/// A lookup that passed validation and is waiting on the RPC call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLookup {
    seq: u64,
    address: String,
}

impl PendingLookup {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// A lookup is already in flight; the submit affordance is disabled.
    Rejected,
    /// Validation failed and the failure is already the current result.
    Settled,
    Pending(PendingLookup),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressLookup {
    input: String,
    loading: bool,
    result: Option<LookupResult>,
    issued: u64,
}

impl AddressLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn result(&self) -> Option<&LookupResult> {
        self.result.as_ref()
    }

    /// Whether the submit control (and the input) are disabled.
    pub fn submit_disabled(&self) -> bool {
        self.loading
    }

    /// Applies a synchronous event. `Submit` only gets as far as [`begin_submit`](Self::begin_submit).
    pub fn dispatch(&mut self, event: LookupEvent) -> Option<Submission> {
        match event {
            LookupEvent::Change(text) => {
                self.set_input(text);
                None
            }
            LookupEvent::Submit => Some(self.begin_submit()),
            LookupEvent::Reset => {
                self.reset();
                None
            }
        }
    }

    /// Input is ignored while a lookup is in flight, same as a disabled text box.
    pub fn set_input(&mut self, text: impl Into<String>) {
        if !self.loading {
            self.input = text.into();
        }
    }

    pub fn begin_submit(&mut self) -> Submission {
        if self.loading {
            return Submission::Rejected;
        }

        let address = self.input.trim();

        if address.is_empty() {
            self.result = Some(LookupResult::failure("", &LookupError::InputEmpty));
            return Submission::Settled;
        }

        if !is_well_formed_address(address) {
            self.result = Some(LookupResult::failure(
                address,
                &LookupError::InputMalformed,
            ));
            return Submission::Settled;
        }

        let address = address.to_string();
        self.issued += 1;
        self.loading = true;
        self.result = None;

        Submission::Pending(PendingLookup {
            seq: self.issued,
            address,
        })
    }

    /// Stores `outcome` if `pending` is the latest submission. Returns whether it was applied.
    pub fn complete(&mut self, pending: PendingLookup, outcome: LookupResult) -> bool {
        if !self.loading || pending.seq != self.issued {
            tracing::debug!(
                seq = pending.seq,
                latest = self.issued,
                "Discarding stale lookup result"
            );
            return false;
        }

        self.loading = false;
        self.result = Some(outcome);
        true
    }

    /// Clears input and result. Anything still in flight is orphaned.
    pub fn reset(&mut self) {
        if self.loading {
            self.issued += 1;
            self.loading = false;
        }
        self.input.clear();
        self.result = None;
    }

    /// Runs a whole submit against `source` while holding the controller.
    ///
    /// A panic inside the source is turned into [`LookupError::Unexpected`].
    pub async fn submit<S>(&mut self, source: &S) -> Submission
    where
        S: TransactionCountSource + ?Sized,
    {
        let submission = self.begin_submit();

        if let Submission::Pending(pending) = &submission {
            let outcome = run_lookup(source, pending.address()).await;
            self.complete(pending.clone(), outcome);
        }

        submission
    }
}

/// Calls `source` once and never lets a panic escape.
pub async fn run_lookup<S>(source: &S, address: &str) -> LookupResult
where
    S: TransactionCountSource + ?Sized,
{
    LookupResult::from_outcome(address, guarded_count(source, address).await)
}

/// Like [`TransactionCountSource::transaction_count`], with panics mapped to [`LookupError::Unexpected`].
pub async fn guarded_count<S>(source: &S, address: &str) -> Result<u64, LookupError>
where
    S: TransactionCountSource + ?Sized,
{
    match AssertUnwindSafe(source.transaction_count(address))
        .catch_unwind()
        .await
    {
        Ok(outcome) => outcome,
        Err(_) => {
            tracing::error!("Transaction count lookup panicked for {address}");
            Err(LookupError::Unexpected)
        }
    }
}
