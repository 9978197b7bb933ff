//! Read-only lookup of morph sequences.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use crate::{builtin, Sequence};

/// Name-indexed collection of [`Sequence`]s with a guaranteed fallback.
///
/// Lookups never fail: an unknown or empty name resolves to the fallback
/// sequence, so an animation loop always has something to show. The store
/// is immutable once shared and can back any number of schedulers.
///
/// ## Example
///
/// ```rust
/// use shapes_morph::SequenceStore;
///
/// let store = SequenceStore::builtin();
/// assert_eq!(store.get_sequence("loading").name(), "loading");
/// assert_eq!(store.get_sequence("nope").name(), "identity");
/// ```
#[derive(Clone, Debug)]
pub struct SequenceStore {
    sequences: BTreeMap<String, Arc<Sequence>>,
    fallback: Arc<Sequence>,
}

impl SequenceStore {
    /// Create a store holding only `fallback`.
    pub fn new(fallback: Sequence) -> Self {
        let fallback = Arc::new(fallback);
        let mut sequences = BTreeMap::new();
        sequences.insert(fallback.name().to_string(), Arc::clone(&fallback));
        Self {
            sequences,
            fallback,
        }
    }

    /// The process-wide store of builtin sequences.
    ///
    /// Initialised on first use and never mutated afterwards.
    pub fn builtin() -> Arc<SequenceStore> {
        static BUILTIN: OnceLock<Arc<SequenceStore>> = OnceLock::new();
        Arc::clone(BUILTIN.get_or_init(|| {
            let mut seqs = builtin::sequences().into_iter();
            let mut store = match seqs.next() {
                Some(fallback) => SequenceStore::new(fallback),
                None => SequenceStore::new(Sequence::new(builtin::IDENTITY, Vec::new())),
            };
            for seq in seqs {
                store.insert(seq);
            }
            Arc::new(store)
        }))
    }

    /// Register a sequence, replacing any existing one with the same name.
    ///
    /// Replacing the fallback's name also replaces the fallback.
    pub fn insert(&mut self, sequence: Sequence) {
        let sequence = Arc::new(sequence);
        if sequence.name() == self.fallback.name() {
            self.fallback = Arc::clone(&sequence);
        }
        self.sequences.insert(sequence.name().to_string(), sequence);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, sequence: Sequence) -> Self {
        self.insert(sequence);
        self
    }

    /// Get the frames for `name`, falling back when it is unknown or empty.
    pub fn get_sequence(&self, name: &str) -> &Sequence {
        self.resolve(name)
    }

    /// Shared handle to the sequence `name` resolves to.
    pub(crate) fn resolve(&self, name: &str) -> &Arc<Sequence> {
        match self.sequences.get(name) {
            Some(seq) if !seq.is_empty() => seq,
            Some(_) => {
                tracing::debug!(
                    sequence = name,
                    fallback = self.fallback.name(),
                    "empty sequence, using fallback"
                );
                &self.fallback
            }
            None => {
                tracing::debug!(
                    sequence = name,
                    fallback = self.fallback.name(),
                    "unknown sequence, using fallback"
                );
                &self.fallback
            }
        }
    }

    /// All registered sequence names.
    pub fn list_sequence_names(&self) -> Vec<&str> {
        self.sequences.keys().map(String::as_str).collect()
    }

    /// The sequence substituted for unknown names.
    #[inline]
    pub fn fallback(&self) -> &Sequence {
        &self.fallback
    }

    /// Check whether `name` is registered (empty or not).
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.sequences.contains_key(name)
    }

    /// Iterate over all sequences in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Sequence> {
        self.sequences.values().map(|s| s.as_ref())
    }

    /// Number of registered sequences.
    #[inline]
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}
