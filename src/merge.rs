//! Merge of newly extracted IPs into the persisted list, and the decision
//! whether anything needs to be written.

use std::collections::HashSet;

/// What the pipeline should do after merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The log had no qualifying lines at all.
    NothingFound,
    /// Every extracted IP was already in the list.
    NoNewIps { found: usize },
    /// The list grew and has to be written and published.
    Changed {
        all: HashSet<String>,
        found: usize,
        added: usize,
    },
}

/// Union `existing` and `new`, counting how many entries were added.
pub fn merge(existing: HashSet<String>, new: &HashSet<String>) -> MergeOutcome {
    if new.is_empty() {
        return MergeOutcome::NothingFound;
    }

    let before = existing.len();
    let mut all = existing;
    all.extend(new.iter().cloned());
    let added = all.len() - before;

    if added == 0 {
        MergeOutcome::NoNewIps { found: new.len() }
    } else {
        MergeOutcome::Changed {
            all,
            found: new.len(),
            added,
        }
    }
}
