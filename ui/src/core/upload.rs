//! Last-started-wins bookkeeping for asynchronous file reads.
//!
//! Each upload takes a ticket before its bytes are read. When the read
//! completes the ticket is checked; if another upload started in the
//! meantime the stale result is dropped without touching dashboard state.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTicket(u64);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadSequencer {
    latest: u64,
}

impl UploadSequencer {
    pub fn begin(&mut self) -> UploadTicket {
        self.latest = self.latest.wrapping_add(1);
        UploadTicket(self.latest)
    }

    pub fn is_current(&self, ticket: UploadTicket) -> bool {
        ticket.0 == self.latest
    }
}
