//! # Directory Resolution
//!
//! Matches a contact's canonical phone numbers against the directory of
//! known network identities.
//!
//! ## Architecture
//!
//! The [`DirectoryLookup`] trait abstracts over the directory backend.
//! Production deployments implement it against the messaging service;
//! the CLI and tests use [`InMemoryDirectory`]. Lookups are synchronous and
//! may block, so batch resolution runs each contact on tokio's blocking pool.
//!
//! ## Failure Model
//!
//! Resolution never fails. A lookup error for one number is logged and that
//! number contributes no match; the contact's other numbers still resolve.
//! In a batch, a worker that dies yields an unmatched result for its contact
//! only. An empty match set is a normal result (`is_signal_contact() == false`).

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use dashmap::DashMap;
use roster_core::{ContactId, NetworkId, RosterConfig};
use roster_phone::PhoneNumber;
use serde::Serialize;
use tokio::sync::Semaphore;

use crate::identity::ContactIdentity;

/// Errors from a directory backend. Never escape [`DirectoryResolver`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    /// The directory could not be reached.
    #[error("directory unavailable: {reason}")]
    Unavailable {
        /// Human-readable description of the outage.
        reason: String,
    },

    /// The lookup did not complete in time.
    #[error("directory lookup timed out after {elapsed_ms}ms")]
    Timeout {
        /// Elapsed time in milliseconds before the timeout triggered.
        elapsed_ms: u64,
    },
}

/// Lookup of a canonical phone number in the network directory.
///
/// Implementations must be `Send + Sync`: one directory is shared by every
/// worker of a batch resolution, behind an `Arc`. The trait is object-safe.
pub trait DirectoryLookup: Send + Sync {
    /// The network identity registered for `number`, if any.
    fn lookup(&self, number: &PhoneNumber) -> Result<Option<NetworkId>, DirectoryError>;

    /// Human-readable name of this directory implementation, for logs.
    fn directory_name(&self) -> &str;
}

/// Directory held in memory, safe for concurrent reads and inserts.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    entries: DashMap<PhoneNumber, NetworkId>,
}

impl InMemoryDirectory {
    /// An empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id` for `number`, replacing any previous registration.
    pub fn insert(&self, number: PhoneNumber, id: NetworkId) {
        self.entries.insert(number, id);
    }

    /// Number of registered phone numbers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(PhoneNumber, NetworkId)> for InMemoryDirectory {
    fn from_iter<I: IntoIterator<Item = (PhoneNumber, NetworkId)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl DirectoryLookup for InMemoryDirectory {
    fn lookup(&self, number: &PhoneNumber) -> Result<Option<NetworkId>, DirectoryError> {
        Ok(self.entries.get(number).map(|entry| entry.value().clone()))
    }

    fn directory_name(&self) -> &str {
        "InMemoryDirectory"
    }
}

/// The directory matches for one contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedIdentity {
    contact_id: ContactId,
    matched_network_ids: BTreeSet<NetworkId>,
}

impl ResolvedIdentity {
    /// A result with no matches.
    pub fn unmatched(contact_id: ContactId) -> Self {
        Self {
            contact_id,
            matched_network_ids: BTreeSet::new(),
        }
    }

    /// The contact this result belongs to.
    pub fn contact_id(&self) -> &ContactId {
        &self.contact_id
    }

    /// Every network identity matching any of the contact's numbers.
    pub fn matched_network_ids(&self) -> &BTreeSet<NetworkId> {
        &self.matched_network_ids
    }

    /// `true` iff at least one number matched.
    pub fn is_signal_contact(&self) -> bool {
        !self.matched_network_ids.is_empty()
    }

    /// The matched identities, ascending.
    pub fn signal_identifiers(&self) -> Vec<NetworkId> {
        self.matched_network_ids.iter().cloned().collect()
    }
}

/// Resolves contacts against a [`DirectoryLookup`].
#[derive(Debug, Clone)]
pub struct DirectoryResolver {
    max_concurrent_lookups: usize,
}

impl Default for DirectoryResolver {
    fn default() -> Self {
        Self::from_config(&RosterConfig::default())
    }
}

impl DirectoryResolver {
    /// A resolver running at most `max_concurrent_lookups` contacts at once
    /// in [`Self::resolve_batch`]. Zero is treated as one.
    pub fn new(max_concurrent_lookups: usize) -> Self {
        Self {
            max_concurrent_lookups: max_concurrent_lookups.clamp(1, Semaphore::MAX_PERMITS),
        }
    }

    /// A resolver using the configured concurrency bound.
    pub fn from_config(config: &RosterConfig) -> Self {
        Self::new(config.max_concurrent_lookups)
    }

    /// The concurrency bound for batch resolution.
    pub fn max_concurrent_lookups(&self) -> usize {
        self.max_concurrent_lookups
    }

    /// Resolve one contact. Each distinct number is looked up once; matches
    /// from different numbers collapse into one set.
    pub fn resolve(identity: &ContactIdentity, directory: &dyn DirectoryLookup) -> ResolvedIdentity {
        let mut matched = BTreeSet::new();
        let mut queried = HashSet::new();

        for number in identity.normalized_phone_numbers() {
            if !queried.insert(number) {
                continue;
            }
            match directory.lookup(number) {
                Ok(Some(id)) => {
                    matched.insert(id);
                }
                Ok(None) => {}
                Err(e) => tracing::warn!(
                    contact = %identity.unique_id(),
                    directory = directory.directory_name(),
                    "directory lookup failed, skipping number: {e}"
                ),
            }
        }

        ResolvedIdentity {
            contact_id: identity.unique_id().clone(),
            matched_network_ids: matched,
        }
    }

    /// Resolve many contacts concurrently.
    ///
    /// Results are returned in input order. Contacts are independent: the
    /// result for one never depends on the others or on their position.
    pub async fn resolve_batch(
        &self,
        contacts: &[ContactIdentity],
        directory: Arc<dyn DirectoryLookup>,
    ) -> Vec<ResolvedIdentity> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_lookups));

        let handles: Vec<_> = contacts
            .iter()
            .cloned()
            .map(|contact| {
                let directory = Arc::clone(&directory);
                let semaphore = Arc::clone(&semaphore);
                tokio::spawn(async move {
                    // The semaphore is never closed, so acquisition only ends in a permit.
                    let _permit = semaphore.acquire_owned().await.ok();
                    tokio::task::spawn_blocking(move || Self::resolve(&contact, directory.as_ref()))
                        .await
                })
            })
            .collect();

        let mut resolved = Vec::with_capacity(contacts.len());
        for (handle, contact) in handles.into_iter().zip(contacts) {
            let result = match handle.await {
                Ok(Ok(identity)) => identity,
                Ok(Err(e)) | Err(e) => {
                    tracing::warn!(
                        contact = %contact.unique_id(),
                        "directory resolution worker failed, treating contact as unmatched: {e}"
                    );
                    ResolvedIdentity::unmatched(contact.unique_id().clone())
                }
            };
            resolved.push(result);
        }

        tracing::info!(
            contacts = resolved.len(),
            matched = resolved.iter().filter(|r| r.is_signal_contact()).count(),
            directory = directory.directory_name(),
            "directory resolution complete"
        );
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RawContactRecord;
    use roster_phone::{PhoneNumberNormalizer, Region};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn number(s: &str) -> PhoneNumber {
        PhoneNumber::from_e164(s).unwrap()
    }

    fn nid(s: &str) -> NetworkId {
        NetworkId::new(s).unwrap()
    }

    fn contact(id: &str, phones: &[&str]) -> ContactIdentity {
        let mut record = RawContactRecord::new(ContactId::new(id).unwrap());
        record.phone_numbers = phones.iter().map(|p| p.to_string()).collect();
        ContactIdentity::from_record(
            record,
            &PhoneNumberNormalizer::new(Region::parse("US").unwrap()),
        )
    }

    fn directory() -> InMemoryDirectory {
        [
            (number("+14155550100"), nid("net-alice")),
            (number("+14155550101"), nid("net-alice-work")),
            (number("+14155550200"), nid("net-bob")),
        ]
        .into_iter()
        .collect()
    }

    /// Fails every lookup of one specific number.
    struct FlakyDirectory {
        inner: InMemoryDirectory,
        broken: PhoneNumber,
    }

    impl DirectoryLookup for FlakyDirectory {
        fn lookup(&self, n: &PhoneNumber) -> Result<Option<NetworkId>, DirectoryError> {
            if *n == self.broken {
                return Err(DirectoryError::Unavailable {
                    reason: "shard down".to_string(),
                });
            }
            self.inner.lookup(n)
        }

        fn directory_name(&self) -> &str {
            "FlakyDirectory"
        }
    }

    // -- InMemoryDirectory ---------------------------------------------------

    #[test]
    fn in_memory_directory_lookup() {
        let dir = directory();
        assert_eq!(dir.len(), 3);
        assert_eq!(dir.lookup(&number("+14155550200")).unwrap(), Some(nid("net-bob")));
        assert_eq!(dir.lookup(&number("+14155550999")).unwrap(), None);
        dir.insert(number("+14155550999"), nid("net-new"));
        assert_eq!(dir.lookup(&number("+14155550999")).unwrap(), Some(nid("net-new")));
    }

    // -- resolve -------------------------------------------------------------

    #[test]
    fn resolve_collects_matches_from_all_numbers() {
        let c = contact("alice", &["(415) 555-0100", "+1 415 555 0101", "415 555 0999"]);
        let r = DirectoryResolver::resolve(&c, &directory());
        assert_eq!(r.contact_id().as_str(), "alice");
        assert!(r.is_signal_contact());
        assert_eq!(
            r.signal_identifiers(),
            vec![nid("net-alice"), nid("net-alice-work")]
        );
    }

    #[test]
    fn resolve_collapses_duplicate_matches() {
        let c = contact("alice", &["415-555-0100", "+14155550100"]);
        let r = DirectoryResolver::resolve(&c, &directory());
        assert_eq!(r.matched_network_ids().len(), 1);
    }

    #[test]
    fn resolve_without_matches_is_not_an_error() {
        let c = contact("carol", &["415 555 0999", "garbage"]);
        let r = DirectoryResolver::resolve(&c, &directory());
        assert!(!r.is_signal_contact());
        assert!(r.signal_identifiers().is_empty());
    }

    #[test]
    fn lookup_failure_skips_only_that_number() {
        let flaky = FlakyDirectory {
            inner: directory(),
            broken: number("+14155550100"),
        };
        let c = contact("alice", &["415 555 0100", "415 555 0101"]);
        let r = DirectoryResolver::resolve(&c, &flaky);
        assert_eq!(r.signal_identifiers(), vec![nid("net-alice-work")]);
    }

    #[test]
    fn zero_concurrency_is_clamped() {
        assert_eq!(DirectoryResolver::new(0).max_concurrent_lookups(), 1);
        assert_eq!(DirectoryResolver::default().max_concurrent_lookups(), 16);
    }

    #[test]
    fn directory_trait_is_object_safe() {
        let dir: Arc<dyn DirectoryLookup> = Arc::new(directory());
        assert_eq!(dir.directory_name(), "InMemoryDirectory");
    }

    // -- resolve_batch -------------------------------------------------------

    #[tokio::test]
    async fn batch_preserves_input_order() {
        let contacts = vec![
            contact("bob", &["415 555 0200"]),
            contact("carol", &["415 555 0999"]),
            contact("alice", &["415 555 0100"]),
        ];
        let resolver = DirectoryResolver::new(2);
        let results = resolver.resolve_batch(&contacts, Arc::new(directory())).await;
        let ids: Vec<_> = results.iter().map(|r| r.contact_id().as_str()).collect();
        assert_eq!(ids, vec!["bob", "carol", "alice"]);
        assert!(results[0].is_signal_contact());
        assert!(!results[1].is_signal_contact());
    }

    #[tokio::test]
    async fn batch_is_order_independent() {
        let x = contact("x", &["415 555 0100", "415 555 0200"]);
        let y = contact("y", &["415 555 0101"]);
        let dir: Arc<dyn DirectoryLookup> = Arc::new(directory());
        let resolver = DirectoryResolver::new(4);

        let forward = resolver
            .resolve_batch(&[x.clone(), y.clone()], Arc::clone(&dir))
            .await;
        let backward = resolver.resolve_batch(&[y, x], dir).await;

        assert_eq!(forward[0], backward[1]);
        assert_eq!(forward[1], backward[0]);
    }

    #[tokio::test]
    async fn batch_of_nothing_is_empty() {
        let results = DirectoryResolver::default()
            .resolve_batch(&[], Arc::new(directory()))
            .await;
        assert!(results.is_empty());
    }

    /// Records the peak number of concurrent lookups.
    #[derive(Default)]
    struct SlowDirectory {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl DirectoryLookup for SlowDirectory {
        fn lookup(&self, _n: &PhoneNumber) -> Result<Option<NetworkId>, DirectoryError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(20));
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(None)
        }

        fn directory_name(&self) -> &str {
            "SlowDirectory"
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn batch_respects_concurrency_bound() {
        let contacts: Vec<_> = (0..12)
            .map(|i| contact(&format!("c{i}"), &["415 555 0100"]))
            .collect();
        let slow = Arc::new(SlowDirectory::default());
        let results = DirectoryResolver::new(3)
            .resolve_batch(&contacts, slow.clone())
            .await;
        assert_eq!(results.len(), 12);
        let peak = slow.peak.load(Ordering::SeqCst);
        assert!((1..=3).contains(&peak), "peak concurrency was {peak}");
    }

    /// Panics when asked about one number.
    struct PanickyDirectory;

    impl DirectoryLookup for PanickyDirectory {
        fn lookup(&self, n: &PhoneNumber) -> Result<Option<NetworkId>, DirectoryError> {
            if n.as_str() == "+14155550666" {
                panic!("corrupt directory shard");
            }
            Ok(Some(NetworkId::new(format!("net{}", n.as_str())).unwrap()))
        }

        fn directory_name(&self) -> &str {
            "PanickyDirectory"
        }
    }

    #[tokio::test]
    async fn crashed_worker_affects_only_its_contact() {
        let contacts = vec![
            contact("ok-1", &["415 555 0100"]),
            contact("doomed", &["415 555 0666"]),
            contact("ok-2", &["415 555 0200"]),
        ];
        let results = DirectoryResolver::new(2)
            .resolve_batch(&contacts, Arc::new(PanickyDirectory))
            .await;
        assert_eq!(results.len(), 3);
        assert!(results[0].is_signal_contact());
        assert_eq!(results[1], ResolvedIdentity::unmatched(ContactId::new("doomed").unwrap()));
        assert!(results[2].is_signal_contact());
    }
}
