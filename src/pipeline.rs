use crate::{
    bucket::{Admission, LengthBucket, WORD_LENGTHS},
    records::{BucketRecords, Dataset, RatingRecord, WordRecord},
    stats::RatingTable,
    words::{normalize, Letter, Word},
};
use indicatif::{ParallelProgressIterator, ProgressBar};
use itertools::Itertools;
use rayon::prelude::*;
use std::{
    array,
    io::{self, BufRead},
};
use tracing::{debug, info, warn};

/// Tally of what happened to the lines of one source.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SourceReport {
    pub lines: usize,
    pub admitted: usize,
    pub duplicates: usize,
    pub rejected: usize,
    pub interrupted: bool,
}

/// State of one run: a bucket per supported length, filled by any number of
/// [`Pipeline::ingest`] calls and consumed by [`Pipeline::finish`].
#[derive(Debug, Clone)]
pub struct Pipeline {
    buckets: Vec<LengthBucket>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            buckets: WORD_LENGTHS.into_iter().map(LengthBucket::new).collect(),
        }
    }

    pub fn bucket(&self, len: usize) -> Option<&LengthBucket> {
        self.buckets.iter().find(|bucket| bucket.len() == len)
    }

    pub fn word_count(&self) -> usize {
        self.buckets.iter().map(LengthBucket::word_count).sum()
    }

    /// Scans `reader` line by line. A read error ends this source only; what
    /// was admitted before it stays.
    pub fn ingest(&mut self, mut reader: impl BufRead, source: &str) -> SourceReport {
        let mut report = SourceReport::default();
        let mut line = Vec::new();
        loop {
            line.clear();
            match reader.read_until(b'\n', &mut line) {
                Ok(0) => break,
                Ok(_) => {
                    report.lines += 1;
                    match self.offer(&String::from_utf8_lossy(&line)) {
                        Some(Admission::Admitted) => report.admitted += 1,
                        Some(Admission::Duplicate) => report.duplicates += 1,
                        None => report.rejected += 1,
                    }
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    warn!(source, line = report.lines + 1, %err, "stopped reading source");
                    report.interrupted = true;
                    break;
                }
            }
        }
        info!(
            source,
            lines = report.lines,
            admitted = report.admitted,
            duplicates = report.duplicates,
            rejected = report.rejected,
            "scanned source"
        );
        report
    }

    fn offer(&mut self, line: &str) -> Option<Admission> {
        let word = Word::parse(&normalize(line))?;
        let bucket = self
            .buckets
            .iter_mut()
            .find(|bucket| bucket.len() == word.len())?;
        Some(bucket.insert(word))
    }

    /// Rates every bucket, then scores its words against the frozen ratings.
    /// Buckets are independent and processed in parallel.
    pub fn finish(self, progress: &ProgressBar) -> Dataset {
        progress.set_length(self.word_count() as u64);
        let (tables, buckets): (Vec<_>, Vec<_>) = self
            .buckets
            .into_par_iter()
            .map(|bucket| {
                let table = RatingTable::of(&bucket);
                let records = score_bucket(&bucket, &table, progress);
                info!(len = bucket.len(), words = records.words.len(), "scored bucket");
                (table, records)
            })
            .unzip();

        let ratings = Letter::all()
            .map(|letter| RatingRecord {
                letter,
                ratings: array::from_fn(|i| tables[i].ratings()[letter]),
            })
            .collect_vec();
        debug!(letters = ratings.len(), "collected letter ratings");

        Dataset { buckets, ratings }
    }
}

fn score_bucket(
    bucket: &LengthBucket,
    table: &RatingTable,
    progress: &ProgressBar,
) -> BucketRecords {
    let mut words: Vec<WordRecord> = bucket
        .words()
        .collect_vec()
        .into_par_iter()
        .progress_with(progress.clone())
        .map(|(word, letters)| WordRecord {
            word: word.to_owned(),
            letters: letters.letters().to_vec(),
            score: table.score(letters),
        })
        .collect();
    words.par_sort_unstable_by(|a, b| a.word.cmp(&b.word));
    BucketRecords {
        len: bucket.len(),
        words,
    }
}
