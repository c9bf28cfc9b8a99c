use crate::{
    bucket::LengthBucket,
    words::{LetterMap, Word},
};
use serde::{Serialize, Serializer};
use std::{
    fmt::{self, Display},
    iter::Sum,
};

const SCALE: u64 = 1000;

/// A letter frequency in `[0, 1]`, kept as thousandths so it is exactly the
/// three decimal value that ends up in storage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u16);

impl Rating {
    pub const ZERO: Rating = Rating(0);

    /// `numerator / denominator` rounded half to even at three decimals.
    /// A zero denominator rates zero instead of faulting.
    pub fn from_ratio(numerator: u64, denominator: u64) -> Self {
        if denominator == 0 {
            return Self::ZERO;
        }
        let scaled = numerator * SCALE;
        let mut quotient = scaled / denominator;
        let remainder = scaled % denominator;
        match (2 * remainder).cmp(&denominator) {
            std::cmp::Ordering::Greater => quotient += 1,
            std::cmp::Ordering::Equal if quotient % 2 == 1 => quotient += 1,
            _ => {}
        }
        Self(quotient as u16)
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / SCALE as f64
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_thousandths(f, u32::from(self.0))
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

/// Sum of the ratings of a word's distinct letters, in thousandths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(u32);

impl Score {
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / SCALE as f64
    }
}

impl Sum<Rating> for Score {
    fn sum<I: Iterator<Item = Rating>>(iter: I) -> Self {
        Score(iter.map(|rating| u32::from(rating.0)).sum())
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_thousandths(f, self.0)
    }
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

fn write_thousandths(f: &mut fmt::Formatter<'_>, value: u32) -> fmt::Result {
    let scale = SCALE as u32;
    write!(f, "{}.{:03}", value / scale, value % scale)
}

/// Frozen per-letter ratings of one length bucket.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RatingTable(LetterMap<Rating>);

impl RatingTable {
    pub fn from_counts(counts: &LetterMap<u32>, slots: u64) -> Self {
        Self(LetterMap::from_fn(|letter| {
            Rating::from_ratio(u64::from(counts[letter]), slots)
        }))
    }

    pub fn of(bucket: &LengthBucket) -> Self {
        Self::from_counts(bucket.counts(), bucket.slots())
    }

    pub fn ratings(&self) -> &LetterMap<Rating> {
        &self.0
    }

    pub fn score(&self, word: &Word) -> Score {
        let Self(ratings) = self;
        word.distinct()
            .into_iter()
            .map(|letter| ratings[letter])
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::Letter;

    fn letter(ch: char) -> Letter {
        Letter::from_char(ch).unwrap()
    }

    #[test]
    fn test_half_even_rounding() {
        // 0.1235 and 0.1245 are exact ties
        assert_eq!(Rating::from_ratio(247, 2000), Rating(124));
        assert_eq!(Rating::from_ratio(249, 2000), Rating(124));
        assert_eq!(Rating::from_ratio(1, 2000), Rating(0));
        assert_eq!(Rating::from_ratio(3, 2000), Rating(2));
        // not ties
        assert_eq!(Rating::from_ratio(1, 3), Rating(333));
        assert_eq!(Rating::from_ratio(2, 3), Rating(667));
        assert_eq!(Rating::from_ratio(1, 1), Rating(1000));
        assert_eq!(Rating::from_ratio(0, 28), Rating(0));
    }

    #[test]
    fn test_zero_denominator() {
        assert_eq!(Rating::from_ratio(0, 0), Rating::ZERO);
        assert_eq!(Rating::from_ratio(5, 0), Rating::ZERO);
    }

    #[test]
    fn test_display() {
        assert_eq!(Rating::from_ratio(247, 2000).to_string(), "0.124");
        assert_eq!(Rating::from_ratio(1, 20).to_string(), "0.050");
        assert_eq!(Rating::from_ratio(1, 1).to_string(), "1.000");
        assert_eq!(Score(1234).to_string(), "1.234");
        assert_eq!(Score::default().to_string(), "0.000");
    }

    #[test]
    fn test_repeated_letters_score_once() {
        let mut counts = LetterMap::default();
        counts[letter('а')] = 2;
        counts[letter('б')] = 1;
        counts[letter('в')] = 1;
        let table = RatingTable::from_counts(&counts, 4);
        assert_eq!(table.ratings()[letter('а')], Rating(500));
        assert_eq!(table.ratings()[letter('б')], Rating(250));

        let word = Word::parse("абав").unwrap();
        assert_eq!(table.score(&word), Score(1000));
    }

    #[test]
    fn test_unseen_letters_rate_zero() {
        let mut counts = LetterMap::default();
        counts[letter('к')] = 3;
        counts[letter('о')] = 1;
        let table = RatingTable::from_counts(&counts, 4);
        for (letter, rating) in table.ratings().entries() {
            if counts[letter] == 0 {
                assert_eq!(*rating, Rating::ZERO);
            } else {
                assert!(*rating > Rating::ZERO && rating.as_f64() <= 1.0);
            }
        }
    }
}
