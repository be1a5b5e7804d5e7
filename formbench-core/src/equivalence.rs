//! Equivalence Checking
//!
//! Candidates under comparison are only comparable if they compute the same
//! thing. The `Equivalence` trait defines per-type sameness plus a
//! structural diff for failures; `EquivalenceRecord` accumulates results as
//! candidates finish and aborts the run on the first mismatch.

use std::fmt;

/// Why two results were judged non-equivalent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diff {
    /// The two whole values, rendered for display.
    Values {
        /// Earlier candidate's value.
        left: String,
        /// Later candidate's value.
        right: String,
    },
    /// Elements present in one sequence but not the other.
    Elements(Vec<String>),
}

impl fmt::Display for Diff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diff::Values { left, right } => write!(f, "left: {left}, right: {right}"),
            Diff::Elements(elements) => {
                write!(f, "differing elements: [{}]", elements.join(", "))
            }
        }
    }
}

/// A pair of candidates disagreed on the computed value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("results for {left:?} and {right:?} are not equivalent ({diff})")]
pub struct EquivalenceError {
    /// Label of the earlier candidate.
    pub left: String,
    /// Label of the later candidate.
    pub right: String,
    /// What differed.
    pub diff: Diff,
}

/// Sameness between two results of the same type.
///
/// The default `diff` renders both whole values; container types override
/// it to report the differing elements instead.
pub trait Equivalence: fmt::Debug {
    /// Whether the two values count as the same result.
    fn equivalent(&self, other: &Self) -> bool;

    /// A structural description of the difference. Only called when
    /// `equivalent` returned false.
    fn diff(&self, other: &Self) -> Diff {
        Diff::Values {
            left: format!("{self:?}"),
            right: format!("{other:?}"),
        }
    }
}

macro_rules! equivalence_by_eq {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Equivalence for $ty {
                fn equivalent(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

equivalence_by_eq!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, bool, char, String,
);

impl Equivalence for f32 {
    fn equivalent(&self, other: &Self) -> bool {
        self == other
    }
}

impl Equivalence for f64 {
    fn equivalent(&self, other: &Self) -> bool {
        self == other
    }
}

impl Equivalence for &str {
    fn equivalent(&self, other: &Self) -> bool {
        self == other
    }
}

impl Equivalence for () {
    fn equivalent(&self, _other: &Self) -> bool {
        true
    }
}

impl<T: fmt::Debug + PartialEq> Equivalence for Option<T> {
    fn equivalent(&self, other: &Self) -> bool {
        self == other
    }
}

impl<T: fmt::Debug + PartialEq> Equivalence for Vec<T> {
    fn equivalent(&self, other: &Self) -> bool {
        self == other
    }

    fn diff(&self, other: &Self) -> Diff {
        // One direction may be empty while the reverse is not; report the
        // first non-empty direction. Both empty means the sequences differ
        // only by element count.
        let difference = |from: &Self, against: &Self| {
            from.iter()
                .filter(|item| !against.contains(item))
                .map(|item| format!("{item:?}"))
                .collect::<Vec<_>>()
        };
        let forward = difference(self, other);
        if !forward.is_empty() {
            return Diff::Elements(forward);
        }
        Diff::Elements(difference(other, self))
    }
}

/// Check every adjacent pair in a sequence of labeled results.
pub fn check_all<T: Equivalence>(results: &[(String, T)]) -> Result<(), EquivalenceError> {
    for pair in results.windows(2) {
        let (left_label, left) = &pair[0];
        let (right_label, right) = &pair[1];
        if !left.equivalent(right) {
            return Err(EquivalenceError {
                left: left_label.clone(),
                right: right_label.clone(),
                diff: left.diff(right),
            });
        }
    }
    Ok(())
}

/// Accumulates candidate results during a run, comparing each new result
/// against the previous one as it arrives. This makes a mismatch abort the
/// run before later candidates execute.
#[derive(Debug, Default)]
pub struct EquivalenceRecord<T> {
    results: Vec<(String, T)>,
}

impl<T: Equivalence> EquivalenceRecord<T> {
    /// An empty record.
    pub fn new() -> Self {
        Self {
            results: Vec::new(),
        }
    }

    /// Record one candidate's result, failing if it disagrees with the
    /// previously recorded one.
    pub fn insert(&mut self, label: &str, value: T) -> Result<(), EquivalenceError> {
        if let Some((prev_label, prev)) = self.results.last() {
            if !prev.equivalent(&value) {
                return Err(EquivalenceError {
                    left: prev_label.clone(),
                    right: label.to_string(),
                    diff: prev.diff(&value),
                });
            }
        }
        self.results.push((label.to_string(), value));
        Ok(())
    }
}
