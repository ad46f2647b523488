//! Record of completed text transitions.
//!
//! Each finished transition is logged with the text it replaced, the text
//! it showed, the style used and wall-clock start/finish times. The history
//! is bounded; the oldest records are dropped first.

use super::style::TransitionStyle;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Default number of records kept by [`TransitionHistory::new`].
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

/// One completed transition.
///
/// # Example
///
/// ```rust
/// use segue::core::{TransitionRecord, TransitionStyle};
/// use chrono::Utc;
///
/// let now = Utc::now();
/// let record = TransitionRecord {
///     from: "3".to_string(),
///     to: "4".to_string(),
///     style: TransitionStyle::Bounce,
///     started_at: now,
///     completed_at: now,
/// };
/// assert_eq!(record.elapsed(), Some(std::time::Duration::ZERO));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Text displayed before the transition
    pub from: String,
    /// Text displayed after the transition
    pub to: String,
    /// Style the transition ran with
    pub style: TransitionStyle,
    /// When the transition began
    pub started_at: DateTime<Utc>,
    /// When its terminal phase completed
    pub completed_at: DateTime<Utc>,
}

impl TransitionRecord {
    /// Wall-clock time the transition took, if the clock did not go backwards.
    pub fn elapsed(&self) -> Option<Duration> {
        self.completed_at
            .signed_duration_since(self.started_at)
            .to_std()
            .ok()
    }
}

/// Bounded, ordered history of completed transitions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionHistory {
    records: VecDeque<TransitionRecord>,
    limit: usize,
}

impl Default for TransitionHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionHistory {
    /// Create an empty history keeping [`DEFAULT_HISTORY_LIMIT`] records.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Create an empty history keeping at most `limit` records.
    ///
    /// A limit of zero disables recording.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(limit.min(DEFAULT_HISTORY_LIMIT)),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Append a record, evicting the oldest one when full.
    pub fn record(&mut self, record: TransitionRecord) {
        if self.limit == 0 {
            return;
        }
        while self.records.len() >= self.limit {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Sequence of displayed values: the first `from`, then every `to`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use segue::core::{TransitionHistory, TransitionRecord, TransitionStyle};
    /// use chrono::Utc;
    ///
    /// let mut history = TransitionHistory::new();
    /// for (from, to) in [("1", "2"), ("2", "3")] {
    ///     history.record(TransitionRecord {
    ///         from: from.to_string(),
    ///         to: to.to_string(),
    ///         style: TransitionStyle::FlipVertical,
    ///         started_at: Utc::now(),
    ///         completed_at: Utc::now(),
    ///     });
    /// }
    /// assert_eq!(history.get_path(), vec!["1", "2", "3"]);
    /// ```
    pub fn get_path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(first.from.as_str());
        }
        path.extend(self.records.iter().map(|r| r.to.as_str()));
        path
    }

    /// Time from the first recorded start to the last recorded completion.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.completed_at
            .signed_duration_since(first.started_at)
            .to_std()
            .ok()
    }

    pub fn records(&self) -> impl Iterator<Item = &TransitionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(from: &str, to: &str) -> TransitionRecord {
        let now = Utc::now();
        TransitionRecord {
            from: from.to_string(),
            to: to.to_string(),
            style: TransitionStyle::FadedZoom,
            started_at: now,
            completed_at: now,
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = TransitionHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert_eq!(history.limit(), DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn get_path_returns_display_sequence() {
        let mut history = TransitionHistory::new();
        history.record(record("a", "b"));
        history.record(record("b", "c"));

        assert_eq!(history.get_path(), vec!["a", "b", "c"]);
    }

    #[test]
    fn oldest_records_are_evicted() {
        let mut history = TransitionHistory::with_limit(2);
        history.record(record("1", "2"));
        history.record(record("2", "3"));
        history.record(record("3", "4"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.get_path(), vec!["2", "3", "4"]);
    }

    #[test]
    fn zero_limit_records_nothing() {
        let mut history = TransitionHistory::with_limit(0);
        history.record(record("1", "2"));
        assert!(history.is_empty());
    }

    #[test]
    fn duration_spans_first_start_to_last_completion() {
        let start = Utc::now();
        let mut history = TransitionHistory::new();
        history.record(TransitionRecord {
            started_at: start,
            completed_at: start + chrono::Duration::milliseconds(100),
            ..record("a", "b")
        });
        history.record(TransitionRecord {
            started_at: start + chrono::Duration::milliseconds(300),
            completed_at: start + chrono::Duration::milliseconds(400),
            ..record("b", "c")
        });

        assert_eq!(history.duration(), Some(Duration::from_millis(400)));
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = TransitionHistory::with_limit(8);
        history.record(record("x", "y"));

        let json = serde_json::to_string(&history).unwrap();
        let back: TransitionHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(back.len(), 1);
        assert_eq!(back.limit(), 8);
        assert_eq!(back.get_path(), vec!["x", "y"]);
    }
}
