use serde::{Serialize, Serializer};
use std::{
    array,
    fmt::{self, Debug, Display, Write},
    ops::{Index, IndexMut},
};

/// The lowercase Russian alphabet without `ё`, which is folded into `е`.
pub const ALPHABET: [char; 32] = [
    'а', 'б', 'в', 'г', 'д', 'е', 'ж', 'з', 'и', 'й', 'к', 'л', 'м', 'н', 'о', 'п', 'р', 'с', 'т',
    'у', 'ф', 'х', 'ц', 'ч', 'ш', 'щ', 'ъ', 'ы', 'ь', 'э', 'ю', 'я',
];

const FOLDED: char = 'ё';
const FOLDED_INTO: char = 'е';

/// Trims, lowercases and folds a raw input line. The result still has to pass
/// [`Word::parse`] to be admitted.
pub fn normalize(line: &str) -> String {
    line.trim().to_lowercase().replace(FOLDED, &FOLDED_INTO.to_string())
}

#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct Letter(u8);

impl Letter {
    pub fn from_char(letter: char) -> Option<Self> {
        // the alphabet is one contiguous code point range
        let index = (letter as u32).checked_sub(ALPHABET[0] as u32)?;
        (index < ALPHABET.len() as u32).then_some(Self(index as u8))
    }

    pub fn all() -> impl Iterator<Item = Letter> {
        (0..ALPHABET.len() as u8).map(Letter)
    }
}

impl Debug for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Letter").field(&char::from(*self)).finish()
    }
}

impl Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(char::from(*self))
    }
}

impl From<Letter> for char {
    fn from(value: Letter) -> Self {
        ALPHABET[value.0 as usize]
    }
}

impl Serialize for Letter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(char::from(*self))
    }
}

/// One value per alphabet letter, so a lookup can never miss.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LetterMap<T>([T; 32]);

impl<T> IndexMut<Letter> for LetterMap<T> {
    fn index_mut(&mut self, index: Letter) -> &mut Self::Output {
        &mut self.0[index.0 as usize]
    }
}

impl<T> Index<Letter> for LetterMap<T> {
    type Output = T;

    fn index(&self, index: Letter) -> &Self::Output {
        &self.0[index.0 as usize]
    }
}

impl<T> LetterMap<T> {
    pub fn from_fn(mut f: impl FnMut(Letter) -> T) -> Self {
        Self(array::from_fn(|i| f(Letter(i as u8))))
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    #[cfg(test)]
    pub fn entries(&self) -> impl Iterator<Item = (Letter, &T)> {
        Letter::all().zip(self.0.iter())
    }
}

#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct LetterSet(u32);

impl LetterSet {
    #[cfg(test)]
    pub fn contains(self, letter: Letter) -> bool {
        self.0 & (1 << letter.0) != 0
    }

    pub fn insert(&mut self, letter: Letter) -> bool {
        let old = self.0;
        let new = old | (1 << letter.0);
        self.0 = new;
        old != new
    }

    #[cfg(test)]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }
}

impl Debug for LetterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.into_iter().map(char::from))
            .finish()
    }
}

impl FromIterator<Letter> for LetterSet {
    fn from_iter<I: IntoIterator<Item = Letter>>(iter: I) -> Self {
        let mut set = Self::default();
        for letter in iter {
            set.insert(letter);
        }
        set
    }
}

impl IntoIterator for LetterSet {
    type Item = Letter;

    type IntoIter = LetterSetIter;

    fn into_iter(self) -> Self::IntoIter {
        LetterSetIter(self.0)
    }
}

pub struct LetterSetIter(u32);

impl Iterator for LetterSetIter {
    type Item = Letter;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            return None;
        }
        let next = self.0.trailing_zeros();
        self.0 &= !(1 << next);
        Some(Letter(next as u8))
    }
}

/// A candidate word that passed classification: 4 to 7 alphabet letters.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct Word(Vec<Letter>);

impl Word {
    pub const MIN_LEN: usize = 4;
    pub const MAX_LEN: usize = 7;

    /// Classifies an already normalized line. Anything with a foreign
    /// character or an unsupported length is `None`.
    pub fn parse(normalized: &str) -> Option<Self> {
        let letters = normalized
            .chars()
            .map(Letter::from_char)
            .collect::<Option<Vec<_>>>()?;
        (Self::MIN_LEN..=Self::MAX_LEN)
            .contains(&letters.len())
            .then_some(Self(letters))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn letters(&self) -> &[Letter] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = Letter> + '_ {
        self.0.iter().copied()
    }

    pub fn distinct(&self) -> LetterSet {
        self.iter().collect()
    }
}

impl Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.iter().try_for_each(|letter| Display::fmt(&letter, f))
    }
}
