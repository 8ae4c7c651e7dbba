use crate::foundation::error::{RootplayError, RootplayResult};

/// Identifies one submitted request. Sequence numbers only grow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn seq(self) -> u64 {
        self.0
    }
}

/// Allows one outstanding request and recognizes answers to superseded ones.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: u64,
    in_flight: Option<RequestTicket>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket, or [`RootplayError::Busy`] while another request is outstanding.
    pub fn begin(&mut self) -> RootplayResult<RequestTicket> {
        if self.in_flight.is_some() {
            return Err(RootplayError::Busy);
        }
        self.latest += 1;
        let ticket = RequestTicket(self.latest);
        self.in_flight = Some(ticket);
        Ok(ticket)
    }

    /// Accept the response for `ticket` if it is the outstanding one.
    pub fn finish(&mut self, ticket: RequestTicket) -> RootplayResult<()> {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
            return Ok(());
        }
        tracing::warn!(
            seq = ticket.0,
            latest = self.latest,
            "discarding response for superseded request"
        );
        Err(RootplayError::StaleResponse(ticket.0))
    }

    /// Give up on the outstanding request; its response will be treated as stale.
    pub fn abandon(&mut self) -> Option<RequestTicket> {
        self.in_flight.take()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/client/sequencer.rs"]
mod tests;
