//! Statistic lines embedded in an object's lore.
//!
//! A statistic is stored as one display line, `"<marker> <name>: <value>"`,
//! mixed freely with unrelated lore. A line belongs to a statistic when it
//! contains the statistic name as a substring, and the first such line wins.
//! This matching rule is the persisted format: objects written by earlier
//! versions must keep resolving to the same line.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::error::StatParseError;
use crate::value::StatValue;

/// Trailing `": <number>"`, digits optionally followed by a decimal part.
///
/// ASCII digits only; other numerals fall through to the malformed-line path.
static STAT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r": ([0-9]+(?:\.[0-9]+)?)$").expect("statistic pattern is valid"));

/// Encoder/decoder for statistic lines.
///
/// Stateless apart from the marker that prefixes written lines. Reading does
/// not depend on the marker, so lines written with a different marker still
/// decode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatLedger {
    marker: String,
}

impl StatLedger {
    /// Light purple formatting code used by existing objects.
    pub const DEFAULT_MARKER: &'static str = "§d";

    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    /// Reads the value of `name` from `lines`.
    ///
    /// Absent statistics read as [`StatValue::ZERO`]. A line that names the
    /// statistic but carries no parsable value also reads as zero, after a
    /// warning naming the line.
    pub fn decode<L: AsRef<str>>(&self, lines: &[L], name: &str) -> StatValue {
        let Some(line) = lines
            .iter()
            .map(AsRef::as_ref)
            .find(|line| line.contains(name))
        else {
            return StatValue::ZERO;
        };

        match parse_line(line) {
            Ok(value) => value,
            Err(error) => {
                warn!(
                    target: "stattrak::ledger",
                    statistic = name,
                    %error,
                    "Failed to parse number from lore: {}",
                    line
                );
                StatValue::ZERO
            }
        }
    }

    /// Writes `updates` into a copy of `lines`.
    ///
    /// Every statistic is resolved against the original lines before any line
    /// is written, so one update appending a line never moves the slot another
    /// update replaces. Missing statistics are appended after the existing
    /// lines, ordered by name. A name given twice keeps its last value.
    pub fn encode<'a, L, I>(&self, lines: &[L], updates: I) -> Vec<String>
    where
        L: AsRef<str>,
        I: IntoIterator<Item = (&'a str, StatValue)>,
    {
        let updates: BTreeMap<&str, StatValue> = updates.into_iter().collect();

        let resolved: Vec<_> = updates
            .into_iter()
            .map(|(name, value)| (position(lines, name), self.format_line(name, value)))
            .collect();

        let mut encoded: Vec<String> = lines.iter().map(|line| line.as_ref().to_owned()).collect();
        for (slot, line) in resolved {
            match slot {
                Some(index) => encoded[index] = line,
                None => encoded.push(line),
            }
        }
        encoded
    }

    /// Bumps an integer counter by one.
    pub fn increment<L: AsRef<str>>(&self, lines: &[L], name: &str) -> Vec<String> {
        let next = self.decode(lines, name).increment();
        self.encode(lines, [(name, next)])
    }

    /// Renders a single statistic line.
    pub fn format_line(&self, name: &str, value: StatValue) -> String {
        format!("{} {}: {}", self.marker, name, value)
    }
}

impl Default for StatLedger {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MARKER)
    }
}

/// Index of the first line containing `name`.
fn position<L: AsRef<str>>(lines: &[L], name: &str) -> Option<usize> {
    lines.iter().position(|line| line.as_ref().contains(name))
}

fn parse_line(line: &str) -> Result<StatValue, StatParseError> {
    let captures = STAT_PATTERN
        .captures(line)
        .ok_or(StatParseError::MissingValue)?;
    let text = &captures[1];

    if text.contains('.') {
        Ok(StatValue::Fractional(text.parse()?))
    } else {
        Ok(StatValue::Integer(text.parse()?))
    }
}
