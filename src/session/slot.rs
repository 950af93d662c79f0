/// Single in-flight request slot. Issuing a new ticket supersedes the
/// previous one; only the latest ticket may settle.
#[derive(Debug, Default)]
pub struct RequestSlot {
    issued: u64,
    in_flight: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl RequestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> Ticket {
        if let Some(previous) = self.in_flight {
            log::debug!("request #{} superseded", previous);
        }
        self.issued += 1;
        self.in_flight = Some(self.issued);
        Ticket(self.issued)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.in_flight == Some(ticket.0)
    }

    /// Close the slot if `ticket` still owns it.
    pub fn settle(&mut self, ticket: Ticket) -> bool {
        if self.is_current(ticket) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    /// Invalidate whatever is in flight. Returns whether anything was.
    pub fn cancel(&mut self) -> bool {
        self.in_flight.take().is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }
}
