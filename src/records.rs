use crate::{
    bucket::WORD_LENGTHS,
    stats::{Rating, Score},
    words::Letter,
};
use itertools::Itertools;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordRecord {
    pub word: String,
    pub letters: Vec<Letter>,
    pub score: Score,
}

/// Ratings of one letter in every length bucket, in [`WORD_LENGTHS`] order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingRecord {
    pub letter: Letter,
    pub ratings: [Rating; 4],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketRecords {
    pub len: usize,
    pub words: Vec<WordRecord>,
}

/// Everything a run produces, ready for a sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dataset {
    pub buckets: Vec<BucketRecords>,
    pub ratings: Vec<RatingRecord>,
}

impl Dataset {
    pub fn bucket(&self, len: usize) -> Option<&BucketRecords> {
        self.buckets.iter().find(|bucket| bucket.len == len)
    }

    #[cfg(test)]
    pub fn rating(&self, letter: Letter, len: usize) -> Option<Rating> {
        let column = WORD_LENGTHS.iter().position(|&l| l == len)?;
        self.ratings
            .iter()
            .find(|record| record.letter == letter)
            .map(|record| record.ratings[column])
    }

    /// Highest scoring words of one length, ties broken alphabetically.
    pub fn top_words(&self, len: usize, n: usize) -> Vec<&WordRecord> {
        let Some(bucket) = self.bucket(len) else {
            return Vec::new();
        };
        bucket
            .words
            .iter()
            .k_largest_by(n, |a, b| {
                a.score.cmp(&b.score).then_with(|| b.word.cmp(&a.word))
            })
            .collect()
    }
}
