// This file is part of Guesslist.
//
// Copyright (c) 2025  René Coignard <contact@renecoignard.com>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use crate::error::{Error, Result};
use chrono::NaiveDateTime;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Sorted, duplicate-free generator output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wordlist {
    words: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordlistStats {
    pub min_length: usize,
    pub max_length: usize,
    pub avg_length: f64,
    pub has_lower: bool,
    pub has_upper: bool,
    pub has_digit: bool,
    pub has_symbol: bool,
}

impl WordlistStats {
    pub fn charset(&self) -> String {
        let mut classes = Vec::new();
        if self.has_lower {
            classes.push("lower");
        }
        if self.has_upper {
            classes.push("upper");
        }
        if self.has_digit {
            classes.push("digit");
        }
        if self.has_symbol {
            classes.push("symbol");
        }
        classes.join(",")
    }
}

impl Wordlist {
    pub(crate) fn from_sorted(words: Vec<String>) -> Self {
        debug_assert!(words.windows(2).all(|w| w[0] < w[1]));
        Self { words }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words
            .binary_search_by(|probe| probe.as_str().cmp(word))
            .is_ok()
    }

    pub fn into_inner(self) -> Vec<String> {
        self.words
    }

    pub fn stats(&self) -> WordlistStats {
        if self.words.is_empty() {
            return WordlistStats::default();
        }

        let mut stats = WordlistStats {
            min_length: usize::MAX,
            ..WordlistStats::default()
        };
        let mut total = 0usize;

        for word in &self.words {
            let len = word.chars().count();
            total += len;
            stats.min_length = stats.min_length.min(len);
            stats.max_length = stats.max_length.max(len);

            for c in word.chars() {
                if c.is_lowercase() {
                    stats.has_lower = true;
                } else if c.is_uppercase() {
                    stats.has_upper = true;
                } else if c.is_ascii_digit() {
                    stats.has_digit = true;
                } else {
                    stats.has_symbol = true;
                }
            }
        }

        stats.avg_length = total as f64 / self.words.len() as f64;
        stats
    }

    /// Writes one entry per line, UTF-8, `\n` terminated.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_lines(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn write_lines<W: Write>(&self, writer: &mut W) -> Result<()> {
        for word in &self.words {
            writeln!(writer, "{}", word)?;
        }
        Ok(())
    }

    /// Reads a file produced by [`Wordlist::write_to`]. Blank lines are
    /// skipped; anything unsorted or repeated is rejected.
    pub fn read_from(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let mut words: Vec<String> = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.is_empty() {
                continue;
            }

            if let Some(previous) = words.last() {
                if *previous == line {
                    return Err(Error::MalformedWordlist {
                        line: index + 1,
                        reason: "duplicate entry",
                    });
                }
                if *previous > line {
                    return Err(Error::MalformedWordlist {
                        line: index + 1,
                        reason: "entries are not sorted",
                    });
                }
            }

            words.push(line);
        }

        Ok(Self { words })
    }
}

impl<'a> IntoIterator for &'a Wordlist {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}

pub fn default_file_name(now: NaiveDateTime) -> String {
    format!("custom_wordlist_{}.txt", now.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> Wordlist {
        Wordlist::from_sorted(vec![
            "1990Max".to_string(),
            "Max!".to_string(),
            "m4x".to_string(),
            "max_1990".to_string(),
        ])
    }

    #[test]
    fn test_contains() {
        let list = sample();
        assert!(list.contains("m4x"));
        assert!(!list.contains("max"));
    }

    #[test]
    fn test_write_lines_format() {
        let mut buffer = Vec::new();
        sample().write_lines(&mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "1990Max\nMax!\nm4x\nmax_1990\n"
        );
    }

    #[test]
    fn test_stats() {
        let stats = sample().stats();

        assert_eq!(stats.min_length, 3);
        assert_eq!(stats.max_length, 8);
        assert!((stats.avg_length - 5.5).abs() < f64::EPSILON);
        assert_eq!(stats.charset(), "lower,upper,digit,symbol");
    }

    #[test]
    fn test_stats_empty() {
        let stats = Wordlist::from_sorted(Vec::new()).stats();
        assert_eq!(stats, WordlistStats::default());
        assert_eq!(stats.charset(), "");
    }

    #[test]
    fn test_default_file_name() {
        let now = NaiveDate::from_ymd_opt(2025, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 1)
            .unwrap();
        assert_eq!(default_file_name(now), "custom_wordlist_20250307_090501.txt");
    }

    #[test]
    fn test_iter_matches_words() {
        let list = sample();
        let collected: Vec<&str> = list.iter().collect();
        assert_eq!(collected, list.words());
        assert_eq!((&list).into_iter().count(), 4);
    }
}
