use crate::words::{LetterMap, Word};
use std::collections::{hash_map::Entry, HashMap};

pub const WORD_LENGTHS: [usize; 4] = [4, 5, 6, 7];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted,
    Duplicate,
}

/// All admitted words of one length together with their letter tally.
#[derive(Debug, Clone)]
pub struct LengthBucket {
    len: usize,
    words: HashMap<String, Word>,
    counts: LetterMap<u32>,
}

impl LengthBucket {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            words: HashMap::new(),
            counts: LetterMap::default(),
        }
    }

    /// Adds `word` unless it is already present. Only a first occurrence
    /// contributes to the letter counts.
    pub fn insert(&mut self, word: Word) -> Admission {
        debug_assert_eq!(word.len(), self.len, "word routed to the wrong bucket");
        match self.words.entry(word.to_string()) {
            Entry::Occupied(_) => Admission::Duplicate,
            Entry::Vacant(entry) => {
                for letter in word.iter() {
                    self.counts[letter] += 1;
                }
                entry.insert(word);
                Admission::Admitted
            }
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Number of letter positions across all words.
    pub fn slots(&self) -> u64 {
        (self.words.len() * self.len) as u64
    }

    pub fn counts(&self) -> &LetterMap<u32> {
        &self.counts
    }

    pub fn words(&self) -> impl Iterator<Item = (&str, &Word)> {
        self.words.iter().map(|(key, word)| (key.as_str(), word))
    }
}
