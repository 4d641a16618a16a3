use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Padding for pools too small to pair up.
pub const FALLBACK_TOKENS: [&str; 3] = ["password", "admin", "123456"];

const SEPARATORS: [char; 2] = ['_', '.'];

/// Pipeline stage that first produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Base,
    Substitution,
    Case,
    Year,
    Special,
}

/// Where a candidate comes from: the base combination it was derived from,
/// and how many transformations separate it from that base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lineage {
    pub origin: usize,
    pub depth: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rank {
    lineage: Lineage,
    stage: Stage,
    seq: usize,
}

impl Rank {
    fn key(&self) -> (u8, usize, Stage, usize) {
        (self.lineage.depth, self.lineage.origin, self.stage, self.seq)
    }
}

/// The working wordlist: unique strings, each ranked by how it was made.
///
/// Rank order is fewest transformations first, then earliest base, then
/// stage, then insertion. Base combinations therefore come before any of
/// their variants, and a suffix on a base ranks with the base's other
/// one-step variants. The suffix window and the truncating finalizer both
/// take the head of this order.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    ranks: HashMap<String, Rank>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ranks: HashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.ranks.contains_key(word)
    }

    /// Entries in hash order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ranks.keys().map(String::as_str)
    }

    /// Adds a base candidate, which becomes its own origin.
    pub fn insert_base(&mut self, word: String) -> bool {
        let lineage = Lineage {
            origin: self.ranks.len(),
            depth: 0,
        };
        self.insert_ranked(word, lineage, Stage::Base)
    }

    /// Adds a candidate made from one with lineage `parent`. An entry that
    /// already exists keeps its first rank.
    pub fn insert(&mut self, word: String, parent: Lineage, stage: Stage) -> bool {
        let lineage = Lineage {
            origin: parent.origin,
            depth: parent.depth.saturating_add(1),
        };
        self.insert_ranked(word, lineage, stage)
    }

    fn insert_ranked(&mut self, word: String, lineage: Lineage, stage: Stage) -> bool {
        let seq = self.ranks.len();
        match self.ranks.entry(word) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(Rank {
                    lineage,
                    stage,
                    seq,
                });
                true
            }
        }
    }

    /// Snapshot of every entry with its lineage, in rank order.
    pub fn ranked(&self) -> Vec<(String, Lineage)> {
        let mut entries: Vec<(&String, &Rank)> = self.ranks.iter().collect();
        entries.sort_unstable_by_key(|(_, rank)| rank.key());
        entries
            .into_iter()
            .map(|(word, rank)| (word.clone(), rank.lineage))
            .collect()
    }

    /// Words in rank order.
    pub fn into_ranked(self) -> Vec<String> {
        let mut entries: Vec<(String, Rank)> = self.ranks.into_iter().collect();
        entries.sort_unstable_by_key(|(_, rank)| rank.key());
        entries.into_iter().map(|(word, _)| word).collect()
    }

    /// Words in hash order.
    pub fn into_words(self) -> impl Iterator<Item = String> {
        self.ranks.into_keys()
    }
}

impl FromIterator<String> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = Self::new();
        for word in iter {
            set.insert_base(word);
        }
        set
    }
}

pub struct BaseCombinations {
    pub candidates: CandidateSet,
    pub padded: bool,
}

pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Builds every ordered 1- and 2-token permutation of the pool, singles
/// first, each in pool order.
///
/// Plain concatenations must reach `min_length`; the `_` and `.` joined pairs
/// are kept regardless and left for the finalizer to filter.
pub fn combine(tokens: &[&str], min_length: usize) -> BaseCombinations {
    let mut pool: Vec<&str> = tokens.to_vec();

    let padded = pool.len() < 2;
    if padded {
        pool.extend(FALLBACK_TOKENS);
    }

    let n = pool.len();
    let mut candidates = CandidateSet::with_capacity(n + n * n.saturating_sub(1) * 3);

    for token in &pool {
        if char_len(token) >= min_length {
            candidates.insert_base((*token).to_string());
        }
    }

    for (i, left) in pool.iter().enumerate() {
        for (j, right) in pool.iter().enumerate() {
            if i == j {
                continue;
            }

            let joined = format!("{}{}", left, right);
            if char_len(&joined) >= min_length {
                candidates.insert_base(joined);
            }

            for sep in SEPARATORS {
                candidates.insert_base(format!("{}{}{}", left, sep, right));
            }
        }
    }

    tracing::debug!(
        tokens = n,
        padded,
        candidates = candidates.len(),
        "base combinations built"
    );

    BaseCombinations { candidates, padded }
}
