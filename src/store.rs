//! Word statistics store: the collaborator that feeds the bandit.
//!
//! [`WordStatStore`] is the contract the prompt-serving flow needs:
//! a materialized snapshot for selection, paginated reads for transport,
//! dictionary replacement, and a sink for recomputed statistics.
//!
//! [`MemoryStore`] implements it in-process. The dictionary lives behind an
//! `Arc<[WordStat]>` that is swapped whole on every write, so a reader holding
//! a snapshot sees either the state before a replace or the state after it,
//! never a mix.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::{Error, Result};
use crate::{word_key, WordStat};

/// One page of a paginated statistics read.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WordStatPage {
    pub items: Vec<WordStat>,
    /// Offset of the next page, or `None` if this was the last one.
    pub next_offset: Option<usize>,
    /// Dictionary size at the time of the read.
    pub total: usize,
}

/// What a dictionary replace did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplaceSummary {
    /// Words present before and after; their statistics were preserved.
    pub kept: usize,
    /// Words new to the dictionary; they start at zero.
    pub added: usize,
    /// Words dropped along with their statistics.
    pub removed: usize,
}

/// Storage contract for per-word statistics.
pub trait WordStatStore {
    /// Full, consistent snapshot of the dictionary in dictionary order.
    fn word_stats(&self) -> Arc<[WordStat]>;

    /// Up to `limit` entries starting at `offset`. A `limit` of 0 is treated as 1.
    fn page(&self, offset: usize, limit: usize) -> WordStatPage;

    /// Replace the dictionary with `words`.
    ///
    /// Words in both the old and new sets keep their statistics, words only in
    /// the new set start at zero, and words only in the old set are discarded.
    /// Identity is case-insensitive; blank entries and repeats are skipped.
    /// The new set takes the order of `words`.
    fn replace_dictionary<I, S>(&self, words: I) -> ReplaceSummary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>;

    /// Overwrite the statistics of a word already in the dictionary.
    ///
    /// The stored spelling of the word is kept.
    fn update_stats(&self, stat: WordStat) -> Result<()>;

    /// Statistics for one word (case-insensitive lookup).
    fn get(&self, word: &str) -> Option<WordStat>;
}

/// In-memory [`WordStatStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    words: RwLock<Arc<[WordStat]>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding `words`, all with fresh statistics.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let store = Self::new();
        store.replace_dictionary(words);
        store
    }

    /// A store seeded with existing statistics.
    ///
    /// Case-insensitive repeats keep the first entry.
    pub fn from_stats(stats: impl IntoIterator<Item = WordStat>) -> Self {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for s in stats {
            let key = s.key();
            if key.is_empty() || !seen.insert(key) {
                continue;
            }
            out.push(s);
        }
        Self {
            words: RwLock::new(out.into()),
        }
    }

    pub fn len(&self) -> usize {
        self.word_stats().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl WordStatStore for MemoryStore {
    fn word_stats(&self) -> Arc<[WordStat]> {
        Arc::clone(&self.words.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn page(&self, offset: usize, limit: usize) -> WordStatPage {
        let snap = self.word_stats();
        let total = snap.len();
        let start = offset.min(total);
        let end = start.saturating_add(limit.max(1)).min(total);
        WordStatPage {
            items: snap[start..end].to_vec(),
            next_offset: (end < total).then_some(end),
            total,
        }
    }

    fn replace_dictionary<I, S>(&self, words: I) -> ReplaceSummary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        // Hold the write lock across read-modify-write so concurrent replaces
        // and stat updates cannot interleave.
        let mut guard = self.words.write().unwrap_or_else(PoisonError::into_inner);
        let current = Arc::clone(&guard);
        let mut old: HashMap<String, &WordStat> =
            current.iter().map(|s| (s.key(), s)).collect();
        let before = old.len();

        let mut next: Vec<WordStat> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut summary = ReplaceSummary::default();
        for w in words {
            let word = w.as_ref().trim();
            let key = word_key(word);
            if key.is_empty() || !seen.insert(key.clone()) {
                continue;
            }
            match old.remove(&key) {
                Some(existing) => {
                    summary.kept += 1;
                    next.push(existing.clone());
                }
                None => {
                    summary.added += 1;
                    next.push(WordStat::new(word));
                }
            }
        }
        summary.removed = before - summary.kept;

        *guard = next.into();
        tracing::info!(
            kept = summary.kept,
            added = summary.added,
            removed = summary.removed,
            "dictionary replaced"
        );
        summary
    }

    fn update_stats(&self, stat: WordStat) -> Result<()> {
        let mut guard = self.words.write().unwrap_or_else(PoisonError::into_inner);
        let key = stat.key();
        let Some(pos) = guard.iter().position(|s| s.key() == key) else {
            return Err(Error::UnknownWord(stat.word));
        };
        let mut next = guard.to_vec();
        next[pos] = WordStat {
            word: next[pos].word.clone(),
            ..stat
        };
        *guard = next.into();
        Ok(())
    }

    fn get(&self, word: &str) -> Option<WordStat> {
        let key = word_key(word);
        self.word_stats().iter().find(|s| s.key() == key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> MemoryStore {
        MemoryStore::from_stats([
            WordStat::with_rates("cat", 0.5, 0.3),
            WordStat::with_rates("dog", 0.9, 0.7),
        ])
    }

    #[test]
    fn replace_keeps_adds_and_drops() {
        let store = seeded();
        let summary = store.replace_dictionary(["cat", "bird"]);
        assert_eq!(summary, ReplaceSummary { kept: 1, added: 1, removed: 1 });

        assert_eq!(store.get("cat"), Some(WordStat::with_rates("cat", 0.5, 0.3)));
        assert_eq!(store.get("bird"), Some(WordStat::new("bird")));
        assert_eq!(store.get("dog"), None);
    }

    #[test]
    fn replace_is_case_insensitive_and_keeps_stored_spelling() {
        let store = seeded();
        store.replace_dictionary(["CAT", "  ", "Cat", "fish"]);
        let words: Vec<String> = store.word_stats().iter().map(|s| s.word.clone()).collect();
        assert_eq!(words, vec!["cat", "fish"]);
    }

    #[test]
    fn replace_takes_new_order() {
        let store = seeded();
        store.replace_dictionary(["dog", "cat"]);
        assert_eq!(store.word_stats()[0].word, "dog");
    }

    #[test]
    fn snapshots_are_unaffected_by_later_replace() {
        let store = seeded();
        let before = store.word_stats();
        store.replace_dictionary(["owl"]);
        assert_eq!(before.len(), 2);
        assert_eq!(before[1].word, "dog");
        assert_eq!(store.word_stats().len(), 1);
    }

    #[test]
    fn pagination_walks_the_dictionary() {
        let store = MemoryStore::from_words((0..7).map(|i| format!("w{i}")));
        let mut offset = 0;
        let mut seen = Vec::new();
        loop {
            let page = store.page(offset, 3);
            assert_eq!(page.total, 7);
            seen.extend(page.items.into_iter().map(|s| s.word));
            match page.next_offset {
                Some(next) => offset = next,
                None => break,
            }
        }
        assert_eq!(seen.len(), 7);
        assert_eq!(seen[6], "w6");
    }

    #[test]
    fn page_edge_cases() {
        let store = MemoryStore::from_words(["a", "b"]);
        let past_end = store.page(10, 5);
        assert!(past_end.items.is_empty());
        assert_eq!(past_end.next_offset, None);

        let zero_limit = store.page(0, 0);
        assert_eq!(zero_limit.items.len(), 1);
        assert_eq!(zero_limit.next_offset, Some(1));
    }

    #[test]
    fn update_stats_overwrites_known_word() {
        let store = seeded();
        store
            .update_stats(WordStat {
                word: "DOG".to_string(),
                pick_rate: 0.4,
                post_rate: 0.2,
                sample_size: 12,
            })
            .unwrap();
        let dog = store.get("dog").unwrap();
        assert_eq!(dog.word, "dog");
        assert_eq!(dog.sample_size, 12);
        assert_eq!(dog.pick_rate, 0.4);
    }

    #[test]
    fn update_stats_rejects_unknown_word() {
        let store = seeded();
        let err = store.update_stats(WordStat::new("yak")).unwrap_err();
        assert_eq!(err, Error::UnknownWord("yak".to_string()));
    }

    #[test]
    fn from_stats_skips_repeats_and_blanks() {
        let store = MemoryStore::from_stats([
            WordStat::with_rates("Cat", 0.1, 0.1),
            WordStat::with_rates("cat", 0.9, 0.9),
            WordStat::new(" "),
        ]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("CAT").unwrap().pick_rate, 0.1);
    }
}
