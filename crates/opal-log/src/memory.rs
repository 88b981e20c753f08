use std::collections::HashSet;
use std::sync::{PoisonError, RwLock};

use tracing::debug;

use opal_types::{Entry, EntryId, LamportClock, OwnerId};

use crate::error::LogError;
use crate::source::LogSource;

/// In-memory log implementation for tests, local demos, and embedding.
///
/// Entries are deduplicated by content id and kept in deterministic
/// causal order: Lamport clock first, entry id as the final tiebreak.
/// Local appends link to the current heads and advance the local clock
/// past everything already in the log, so a purely local log reads in
/// insertion order.
pub struct InMemoryLog {
    owner: OwnerId,
    inner: RwLock<LogState>,
}

#[derive(Default)]
struct LogState {
    entries: Vec<Entry>,
    seen: HashSet<EntryId>,
    heads: Vec<EntryId>,
    clock_time: u64,
    closed: bool,
}

impl InMemoryLog {
    pub fn new(owner: OwnerId) -> Self {
        Self {
            owner,
            inner: RwLock::new(LogState::default()),
        }
    }

    /// The identity local appends are attributed to.
    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Append a locally-produced payload.
    ///
    /// The new entry links to the current heads and carries a clock
    /// strictly after every entry already known. Returns the appended
    /// entry.
    pub fn append(&self, payload: Vec<u8>) -> Result<Entry, LogError> {
        let mut state = self
            .inner
            .write()
            .map_err(|_| LogError::Backend("log lock poisoned".into()))?;
        if state.closed {
            return Err(LogError::Closed);
        }

        let clock = LamportClock::new(self.owner, state.clock_time + 1);
        let entry = Entry::new(self.owner, payload, state.heads.clone(), clock);

        state.clock_time = clock.time;
        state.seen.insert(entry.id);
        state.heads = vec![entry.id];
        state.entries.push(entry.clone());

        debug!(entry = %entry.id.short_hex(), time = clock.time, "appended log entry");
        Ok(entry)
    }

    /// Merge entries received from a peer.
    ///
    /// Entries already known are ignored, as are entries whose content
    /// hash does not verify. Returns the newly admitted entries; the
    /// sequence is re-sorted into deterministic causal order afterwards.
    pub fn join(&self, incoming: &[Entry]) -> Result<Vec<Entry>, LogError> {
        let mut state = self
            .inner
            .write()
            .map_err(|_| LogError::Backend("log lock poisoned".into()))?;
        if state.closed {
            return Err(LogError::Closed);
        }

        let mut admitted = Vec::new();
        for entry in incoming {
            if state.seen.contains(&entry.id) {
                continue;
            }
            if !entry.verify() {
                debug!(entry = %entry.id.short_hex(), "rejected entry with bad content hash");
                continue;
            }
            state.seen.insert(entry.id);
            state.clock_time = state.clock_time.max(entry.clock.time);
            state.entries.push(entry.clone());
            admitted.push(entry.clone());
        }

        if !admitted.is_empty() {
            state.entries.sort_by(|a, b| {
                a.clock.cmp(&b.clock).then_with(|| a.id.cmp(&b.id))
            });

            // Heads are the entries nothing links back to.
            let linked: HashSet<EntryId> = state
                .entries
                .iter()
                .flat_map(|e| e.next.iter().copied())
                .collect();
            state.heads = state
                .entries
                .iter()
                .map(|e| e.id)
                .filter(|id| !linked.contains(id))
                .collect();

            debug!(admitted = admitted.len(), total = state.entries.len(), "joined entries");
        }

        Ok(admitted)
    }

    /// Entry ids that no other entry links back to.
    pub fn heads(&self) -> Vec<EntryId> {
        self.read_state().heads.clone()
    }

    /// Number of entries in the log.
    pub fn len(&self) -> usize {
        self.read_state().entries.len()
    }

    /// Returns `true` if the log has no entries.
    pub fn is_empty(&self) -> bool {
        self.read_state().entries.is_empty()
    }

    /// Close the log. Every subsequent `snapshot`, `append`, or `join`
    /// fails with [`LogError::Closed`].
    pub fn close(&self) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .closed = true;
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, LogState> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LogSource for InMemoryLog {
    fn snapshot(&self) -> Result<Vec<Entry>, LogError> {
        let state = self
            .inner
            .read()
            .map_err(|_| LogError::Backend("log lock poisoned".into()))?;
        if state.closed {
            return Err(LogError::Closed);
        }
        Ok(state.entries.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(seed: u8) -> InMemoryLog {
        InMemoryLog::new(OwnerId::from_raw([seed; 32]))
    }

    #[test]
    fn new_log_is_empty() {
        let log = log(1);
        assert!(log.is_empty());
        assert!(log.heads().is_empty());
        assert!(log.snapshot().unwrap().is_empty());
    }

    #[test]
    fn append_preserves_insertion_order() {
        let log = log(1);
        let a = log.append(b"a".to_vec()).unwrap();
        let b = log.append(b"b".to_vec()).unwrap();
        let c = log.append(b"c".to_vec()).unwrap();

        let snapshot = log.snapshot().unwrap();
        let ids: Vec<_> = snapshot.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![a.id, b.id, c.id]);
    }

    #[test]
    fn append_links_to_previous_head() {
        let log = log(1);
        let a = log.append(b"a".to_vec()).unwrap();
        let b = log.append(b"b".to_vec()).unwrap();

        assert!(a.next.is_empty());
        assert_eq!(b.next, vec![a.id]);
        assert_eq!(log.heads(), vec![b.id]);
    }

    #[test]
    fn clocks_strictly_increase() {
        let log = log(1);
        let a = log.append(b"a".to_vec()).unwrap();
        let b = log.append(b"b".to_vec()).unwrap();
        assert!(b.clock > a.clock);
    }

    #[test]
    fn join_deduplicates() {
        let local = log(1);
        let remote = log(2);
        let e = remote.append(b"remote".to_vec()).unwrap();

        let admitted = local.join(&[e.clone(), e.clone()]).unwrap();
        assert_eq!(admitted.len(), 1);
        assert_eq!(local.len(), 1);

        // Redelivery admits nothing.
        let admitted = local.join(&[e]).unwrap();
        assert!(admitted.is_empty());
        assert_eq!(local.len(), 1);
    }

    #[test]
    fn join_rejects_tampered_entries() {
        let local = log(1);
        let remote = log(2);
        let mut e = remote.append(b"remote".to_vec()).unwrap();
        e.payload = b"forged".to_vec();

        let admitted = local.join(&[e]).unwrap();
        assert!(admitted.is_empty());
        assert!(local.is_empty());
    }

    #[test]
    fn join_orders_by_clock_then_id() {
        let local = log(1);
        let remote = log(9);

        let a = local.append(b"local-1".to_vec()).unwrap();
        let r1 = remote.append(b"remote-1".to_vec()).unwrap();
        let r2 = remote.append(b"remote-2".to_vec()).unwrap();
        local.join(&[r2.clone(), r1.clone()]).unwrap();

        let snapshot = local.snapshot().unwrap();
        let ids: Vec<_> = snapshot.iter().map(|e| e.id).collect();
        // a and r1 share time 1; the owner id tiebreak puts a first.
        assert_eq!(ids, vec![a.id, r1.id, r2.id]);
    }

    #[test]
    fn local_append_after_join_dominates_remote_clocks() {
        let local = log(1);
        let remote = log(2);
        remote.append(b"r1".to_vec()).unwrap();
        let r2 = remote.append(b"r2".to_vec()).unwrap();

        local.join(&remote.snapshot().unwrap()).unwrap();
        let next = local.append(b"after".to_vec()).unwrap();
        assert!(next.clock > r2.clock);
        assert_eq!(local.snapshot().unwrap().last().unwrap().id, next.id);
    }

    #[test]
    fn converged_logs_have_identical_snapshots() {
        let a = log(1);
        let b = log(2);
        a.append(b"a1".to_vec()).unwrap();
        b.append(b"b1".to_vec()).unwrap();
        a.append(b"a2".to_vec()).unwrap();

        a.join(&b.snapshot().unwrap()).unwrap();
        b.join(&a.snapshot().unwrap()).unwrap();

        assert_eq!(a.snapshot().unwrap(), b.snapshot().unwrap());
    }

    #[test]
    fn closed_log_refuses_everything() {
        let log = log(1);
        log.append(b"a".to_vec()).unwrap();
        log.close();

        assert_eq!(log.snapshot(), Err(LogError::Closed));
        assert_eq!(log.append(b"b".to_vec()), Err(LogError::Closed));
        assert!(matches!(log.join(&[]), Err(LogError::Closed)));
    }
}
