use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Identity and ordering evidence assigned to one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionTicket {
    /// Session the record belongs to.
    pub session_id: Uuid,
    /// Position of the record in the session, starting at 1.
    pub sequence: u64,
}

/// Session identity plus a monotonically increasing sequence counter.
///
/// The session id is fixed for the lifetime of the value. [`SessionContext::next`]
/// is atomic, so one context may be shared across threads without two records
/// ever receiving the same sequence number. Numbers are consumed whether or not
/// the record is eventually stored; a gap is evidence of a failed write.
#[derive(Debug)]
pub struct SessionContext {
    session_id: Uuid,
    sequence: AtomicU64,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext {
    /// Starts a session with a random v4 id.
    pub fn new() -> Self {
        Self::with_session_id(Uuid::new_v4())
    }

    /// Starts a session with a caller-chosen id.
    pub fn with_session_id(session_id: Uuid) -> Self {
        Self {
            session_id,
            sequence: AtomicU64::new(0),
        }
    }

    /// Session id.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Number of tickets issued so far.
    pub fn issued(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }

    /// Increments the counter and returns the new ticket.
    pub fn next(&self) -> SessionTicket {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        SessionTicket {
            session_id: self.session_id,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_one_and_keeps_session_id() {
        let session = SessionContext::new();
        assert_eq!(session.issued(), 0);
        let first = session.next();
        let second = session.next();
        assert_eq!(first.sequence, 1);
        assert_eq!(second.sequence, 2);
        assert_eq!(first.session_id, second.session_id);
        assert_eq!(first.session_id, session.session_id());
        assert_eq!(session.issued(), 2);
    }

    #[test]
    fn sessions_get_distinct_ids() {
        assert_ne!(SessionContext::new().session_id(), SessionContext::new().session_id());
    }
}
