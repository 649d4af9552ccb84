//! The benchmark workload: insert every key, shuffle, search every key,
//! shuffle, delete every key. Each of the three bulk phases is timed.
//!
//! # Examples
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use strbst::config::ContainerKind;
//! use strbst::workload;
//!
//! let keys: Vec<String> = ["pear", "fig", "plum"].iter().map(|k| k.to_string()).collect();
//! let report = workload::run(ContainerKind::Bst, &keys, &mut StdRng::seed_from_u64(0));
//!
//! assert_eq!(report.found, 3);
//! assert_eq!(report.removed, 3);
//! assert_eq!(report.final_len, 0);
//! ```

use std::collections::btree_map::{self, BTreeMap};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::time::{Duration, Instant};

use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::ContainerKind;
use crate::tree::Tree;

/// The operations the workload needs from a container of string keys.
pub trait KeySet {
    /// Adds `key`, returning whether it was new.
    fn insert(&mut self, key: String) -> bool;

    /// Whether `key` is present.
    fn contains(&self, key: &str) -> bool;

    /// Removes `key`, returning whether it was present.
    fn remove(&mut self, key: &str) -> bool;

    /// How many keys are stored.
    fn len(&self) -> usize;

    /// Whether no keys are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Releases the container once the workload is done with it.
    fn finish(self)
    where
        Self: Sized,
    {
    }
}

impl KeySet for Tree<String> {
    fn insert(&mut self, key: String) -> bool {
        Tree::insert(self, key)
    }

    fn contains(&self, key: &str) -> bool {
        self.search(key)
    }

    fn remove(&mut self, key: &str) -> bool {
        self.delete(key)
    }

    fn len(&self) -> usize {
        Tree::len(self)
    }

    fn finish(self) {
        let freed = self.dispose();
        debug!("disposed of {} remaining nodes", freed);
    }
}

impl KeySet for BTreeSet<String> {
    fn insert(&mut self, key: String) -> bool {
        BTreeSet::insert(self, key)
    }

    fn contains(&self, key: &str) -> bool {
        BTreeSet::contains(self, key)
    }

    fn remove(&mut self, key: &str) -> bool {
        BTreeSet::remove(self, key)
    }

    fn len(&self) -> usize {
        BTreeSet::len(self)
    }
}

impl KeySet for HashSet<String> {
    fn insert(&mut self, key: String) -> bool {
        HashSet::insert(self, key)
    }

    fn contains(&self, key: &str) -> bool {
        HashSet::contains(self, key)
    }

    fn remove(&mut self, key: &str) -> bool {
        HashSet::remove(self, key)
    }

    fn len(&self) -> usize {
        HashSet::len(self)
    }
}

/// Every key maps to a copy of itself. An existing entry is never overwritten.
impl KeySet for BTreeMap<String, String> {
    fn insert(&mut self, key: String) -> bool {
        match self.entry(key) {
            btree_map::Entry::Vacant(entry) => {
                let value = entry.key().clone();
                entry.insert(value);
                true
            }
            btree_map::Entry::Occupied(_) => false,
        }
    }

    fn contains(&self, key: &str) -> bool {
        self.contains_key(key)
    }

    fn remove(&mut self, key: &str) -> bool {
        BTreeMap::remove(self, key).is_some()
    }

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }
}

/// What one container did during a workload and how long each phase took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// The container that was measured.
    pub container: ContainerKind,
    /// How many keys each phase processed.
    pub keys: usize,
    /// Keys that were new when inserted.
    pub inserted: usize,
    /// Keys that were found when searched.
    pub found: usize,
    /// Keys that were present when deleted.
    pub removed: usize,
    /// Keys left in the container after the delete phase.
    pub final_len: usize,
    /// Time spent inserting.
    pub insert_time: Duration,
    /// Time spent searching.
    pub search_time: Duration,
    /// Time spent deleting.
    pub delete_time: Duration,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {}", self.container.label())?;
        writeln!(
            f,
            "Insertion of {} keys ({} new): {:.3} ms",
            self.keys,
            self.inserted,
            millis(self.insert_time)
        )?;
        writeln!(
            f,
            "Search of {} keys ({} found): {:.3} ms",
            self.keys,
            self.found,
            millis(self.search_time)
        )?;
        writeln!(
            f,
            "Deletion of {} keys ({} removed): {:.3} ms",
            self.keys,
            self.removed,
            millis(self.delete_time)
        )?;
        write!(f, "Final size: {}", self.final_len)
    }
}

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1_000.0
}

/// Runs `f` and measures how long it took.
pub fn time<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed())
}

/// Drives `set` through the workload over `keys`. Keys are inserted in the
/// given order; searches and deletes each use a fresh permutation drawn from
/// `rng`.
pub fn run_workload<S, R>(
    container: ContainerKind,
    mut set: S,
    keys: &[String],
    rng: &mut R,
) -> Report
where
    S: KeySet,
    R: Rng + ?Sized,
{
    let (inserted, insert_time) = time(|| {
        keys.iter()
            .filter(|k| set.insert(k.to_string()))
            .count()
    });

    let mut order: Vec<&str> = keys.iter().map(String::as_str).collect();
    order.shuffle(rng);
    debug!("{}: shuffled {} keys for searching", container, order.len());
    let (found, search_time) = time(|| order.iter().filter(|k| set.contains(k)).count());

    order.shuffle(rng);
    debug!("{}: shuffled {} keys for deleting", container, order.len());
    let (removed, delete_time) = time(|| order.iter().filter(|k| set.remove(k)).count());

    let final_len = set.len();
    set.finish();

    let report = Report {
        container,
        keys: keys.len(),
        inserted,
        found,
        removed,
        final_len,
        insert_time,
        search_time,
        delete_time,
    };
    info!(
        "{}: insert {:?}, search {:?}, delete {:?}",
        container, report.insert_time, report.search_time, report.delete_time
    );

    report
}

/// Runs the workload against a fresh, empty container of the given kind.
pub fn run<R>(container: ContainerKind, keys: &[String], rng: &mut R) -> Report
where
    R: Rng + ?Sized,
{
    match container {
        ContainerKind::Bst => run_workload(container, Tree::new(), keys, rng),
        ContainerKind::BtreeSet => run_workload(container, BTreeSet::new(), keys, rng),
        ContainerKind::HashSet => run_workload(container, HashSet::new(), keys, rng),
        ContainerKind::BtreeMap => run_workload(container, BTreeMap::new(), keys, rng),
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::keys::generate_keys;

    #[test]
    fn every_container_processes_every_key() {
        let mut rng = StdRng::seed_from_u64(11);
        let keys = generate_keys(&mut rng, 1_000, 15).unwrap();

        for kind in ContainerKind::ALL {
            let report = run(kind, &keys, &mut rng);

            assert_eq!(report.container, kind);
            assert_eq!(report.keys, 1_000);
            assert_eq!(report.inserted, 1_000, "{}", kind);
            assert_eq!(report.found, 1_000, "{}", kind);
            assert_eq!(report.removed, 1_000, "{}", kind);
            assert_eq!(report.final_len, 0, "{}", kind);
        }
    }

    #[test]
    fn duplicate_keys_count_once() {
        let keys: Vec<String> = ["b", "a", "b", "c", "a"]
            .iter()
            .map(|k| k.to_string())
            .collect();

        let report = run(ContainerKind::Bst, &keys, &mut StdRng::seed_from_u64(0));

        assert_eq!(report.inserted, 3);
        // Every search hits, but only the first delete of a key removes it.
        assert_eq!(report.found, 5);
        assert_eq!(report.removed, 3);
        assert_eq!(report.final_len, 0);
    }

    #[test]
    fn deep_deletions_are_counted() {
        // Sorted keys build a right spine, so most deletions never touch the root.
        let keys: Vec<String> = (0..200).map(|i| format!("{:04}", i)).collect();

        let report = run(ContainerKind::Bst, &keys, &mut StdRng::seed_from_u64(4));

        assert_eq!(report.removed, 200);
    }

    #[test]
    fn btree_map_does_not_overwrite() {
        let mut map = BTreeMap::new();

        assert!(KeySet::insert(&mut map, "k".to_string()));
        assert!(!KeySet::insert(&mut map, "k".to_string()));
        assert_eq!(map.get("k").map(String::as_str), Some("k"));
        assert!(KeySet::remove(&mut map, "k"));
        assert!(KeySet::is_empty(&map));
    }

    #[test]
    fn time_returns_the_result() {
        let (sum, elapsed) = time(|| (1..=10).sum::<u32>());

        assert_eq!(sum, 55);
        assert!(elapsed < Duration::from_secs(60));
    }

    #[test]
    fn report_renders_milliseconds() {
        let report = Report {
            container: ContainerKind::HashSet,
            keys: 3,
            inserted: 3,
            found: 3,
            removed: 2,
            final_len: 1,
            insert_time: Duration::from_micros(1_500),
            search_time: Duration::from_millis(2),
            delete_time: Duration::from_micros(250),
        };

        assert_eq!(
            report.to_string(),
            "## HashSet\n\
             Insertion of 3 keys (3 new): 1.500 ms\n\
             Search of 3 keys (3 found): 2.000 ms\n\
             Deletion of 3 keys (2 removed): 0.250 ms\n\
             Final size: 1"
        );
    }
}
