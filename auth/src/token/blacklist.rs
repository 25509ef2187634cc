use dashmap::DashMap;

/// Revocation store for tokens invalidated before their natural expiry.
///
/// Maps a token's literal string form to its expiry timestamp. Presence
/// means the token must be treated as invalid regardless of signature or
/// expiry checks. Entries whose expiry has passed can no longer validate
/// anyway and are safe to purge.
///
/// Internally synchronized: concurrent inserts and lookups never take a
/// global lock, and purging is safe to run alongside ongoing inserts.
/// Process-lifetime only — contents are lost on restart, so a revoked but
/// unexpired token regains validity until its own `exp`. This is a known,
/// accepted tradeoff of keeping the store in memory.
#[derive(Debug, Default)]
pub struct RevocationList {
    entries: DashMap<String, i64>,
}

impl RevocationList {
    /// Create an empty revocation list.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Record a token as revoked until the given expiry timestamp.
    pub fn insert(&self, token: &str, expires_at: i64) {
        self.entries.insert(token.to_string(), expires_at);
    }

    /// Check whether a token's literal string form has been revoked.
    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    /// Drop entries whose recorded expiry is at or before `now`.
    ///
    /// # Returns
    /// Number of entries removed
    pub fn purge_expired(&self, now: i64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, expires_at| *expires_at > now);
        before.saturating_sub(self.entries.len())
    }

    /// Number of revoked tokens currently tracked.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no revocations are tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
