use crate::RunSummary;

/// Accumulates run summaries across comparisons.
///
/// A session is an explicit value owned by the caller; the harness appends
/// to whichever session it is handed and keeps no state of its own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    summaries: Vec<RunSummary>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one summary.
    pub fn push(&mut self, summary: RunSummary) {
        self.summaries.push(summary);
    }

    /// Every summary recorded so far, oldest first.
    #[must_use]
    pub fn summaries(&self) -> &[RunSummary] {
        &self.summaries
    }

    /// Forgets every recorded summary.
    pub fn clear(&mut self) {
        self.summaries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }
}

impl Extend<RunSummary> for Session {
    fn extend<I: IntoIterator<Item = RunSummary>>(&mut self, iter: I) {
        self.summaries.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pivot_core::{ErrorPolicy, Estimate, Status};

    use crate::Method;

    fn summary(method: Method) -> RunSummary {
        RunSummary {
            method,
            estimate: Estimate::Scalar(1.0),
            iters: 3,
            error: 1e-9,
            policy: ErrorPolicy::Absolute,
            status: Status::Converged,
        }
    }

    #[test]
    fn push_and_clear() {
        let mut session = Session::new();
        assert!(session.is_empty());

        session.push(summary(Method::Newton));
        session.extend([summary(Method::Secant), summary(Method::Bisection)]);

        assert_eq!(session.len(), 3);
        assert_eq!(session.summaries()[1].method, Method::Secant);

        session.clear();
        assert!(session.is_empty());
    }
}
