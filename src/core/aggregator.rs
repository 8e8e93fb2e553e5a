use crate::core::{GroupReport, Outcome};

/// Folds settled outcomes into a report. Order is kept as given.
pub fn aggregate(outcomes: Vec<Outcome>) -> GroupReport {
    let success_count = outcomes.iter().filter(|o| o.is_success()).count();

    GroupReport {
        success_count,
        results: outcomes,
    }
}
