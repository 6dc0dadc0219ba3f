//! Sequencing of asynchronous service requests.
//!
//! Requests are issued freely while earlier ones are still in flight; only
//! the response to the most recently issued request may touch displayed
//! state. Each request takes a ticket from [`RequestLedger::begin`], and
//! [`RequestLedger::settle`] decides what its response is allowed to do when
//! it lands, however late that is.

/// What to do with a response that just arrived.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Settlement {
    /// Response to an older request; a newer one has been issued since.
    /// Nothing about it may be applied.
    Superseded,
    /// Successful response to the latest request; apply its payload.
    Apply,
    /// Failed response to the latest request: keep whatever is currently
    /// displayed and surface staleness instead.
    Stale,
}

/// Tracks the latest issued request plus the pending/stale presentation
/// flags derived from it. Pure bookkeeping, no I/O; the grid entity holds
/// one ledger per request kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestLedger {
    epoch: u64,
    pending: bool,
    stale: bool,
}

impl RequestLedger {
    /// Register a new request and return its ticket. Any request still in
    /// flight is superseded from this point on.
    pub fn begin(&mut self) -> u64 {
        self.epoch += 1;
        self.pending = true;
        self.epoch
    }

    /// Drop interest in any outstanding request without issuing a new one.
    /// A response holding an old ticket settles as [`Settlement::Superseded`].
    pub fn invalidate(&mut self) {
        self.epoch += 1;
        self.pending = false;
    }

    /// Settle the response carrying `ticket`. Late responses change nothing,
    /// not even the pending/stale flags.
    pub fn settle(&mut self, ticket: u64, succeeded: bool) -> Settlement {
        if ticket != self.epoch {
            return Settlement::Superseded;
        }
        self.pending = false;
        self.stale = !succeeded;
        if succeeded {
            Settlement::Apply
        } else {
            Settlement::Stale
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn response_to_superseded_request_is_dropped() {
        let mut ledger = RequestLedger::default();
        let first = ledger.begin();
        let second = ledger.begin();

        // The slow first response lands after the second request went out.
        assert_eq!(ledger.settle(first, true), Settlement::Superseded);
        assert!(ledger.is_pending());
        assert!(!ledger.is_stale());

        assert_eq!(ledger.settle(second, true), Settlement::Apply);
        assert!(!ledger.is_pending());
    }

    #[test]
    fn failure_of_latest_request_marks_stale_without_applying() {
        let mut ledger = RequestLedger::default();

        // Mirrors the grid: the last good payload survives a failure.
        let mut displayed = Some("BC'D");

        let ticket = ledger.begin();
        match ledger.settle(ticket, false) {
            Settlement::Apply => displayed = Some("fresh"),
            Settlement::Stale | Settlement::Superseded => {}
        }
        assert_eq!(displayed, Some("BC'D"));
        assert!(ledger.is_stale());
        assert!(!ledger.is_pending());

        // A successful retry clears the staleness.
        let retry = ledger.begin();
        assert!(ledger.is_pending());
        assert_eq!(ledger.settle(retry, true), Settlement::Apply);
        assert!(!ledger.is_stale());
    }

    #[test]
    fn only_the_newest_of_interleaved_requests_applies() {
        let mut ledger = RequestLedger::default();
        let a = ledger.begin();
        let b = ledger.begin();
        let c = ledger.begin();

        // Responses arrive out of order: b, then c, then a.
        assert_eq!(ledger.settle(b, true), Settlement::Superseded);
        assert_eq!(ledger.settle(c, false), Settlement::Stale);
        assert_eq!(ledger.settle(a, true), Settlement::Superseded);

        // The late success for `a` must not clear c's staleness.
        assert!(ledger.is_stale());
    }

    #[test]
    fn invalidate_orphans_the_outstanding_request() {
        let mut ledger = RequestLedger::default();
        let ticket = ledger.begin();
        ledger.invalidate();
        assert_eq!(ledger.settle(ticket, true), Settlement::Superseded);
        assert!(!ledger.is_pending());
    }
}
