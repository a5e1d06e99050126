/// Identifies one data load in issue order.
///
/// Tokens from the same [`RequestSequencer`] increase monotonically, so a
/// larger token always belongs to a later user action.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(pub u64);

/// Issues request tokens and decides which responses are still wanted.
///
/// Only the most recently issued token is current. A response carrying an
/// older token lost the race to a newer action and must be dropped.
#[derive(Debug, Default, Clone)]
pub struct RequestSequencer {
    next: u64,
    latest: Option<RequestToken>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> RequestToken {
        let token = RequestToken(self.next);
        self.next += 1;
        self.latest = Some(token);
        token
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest == Some(token)
    }

    /// Number of tokens issued so far.
    pub fn issued(&self) -> u64 {
        self.next
    }
}
