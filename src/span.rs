use serde::{Deserialize, Serialize};

/// Byte-offset range in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Combine every present span into one covering range. `None` if there were none.
    pub fn combine<I>(spans: I) -> Option<Span>
    where
        I: IntoIterator<Item = Option<Span>>,
    {
        spans.into_iter().flatten().reduce(Span::merge)
    }
}
