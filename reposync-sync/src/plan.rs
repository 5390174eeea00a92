//! Set arithmetic between remote repos and local checkouts.

use std::collections::HashSet;

/// What a sync run will do: checkouts with no remote counterpart get
/// archived, remote repos with no checkout get cloned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPlan {
    pub to_archive: Vec<String>,
    pub to_clone: Vec<String>,
}

impl SyncPlan {
    pub fn len(&self) -> usize {
        self.to_archive.len() + self.to_clone.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Elements of `a` not in `b`, preserving the order of `a`.
pub fn difference(a: &[String], b: &[String]) -> Vec<String> {
    let exclude: HashSet<&str> = b.iter().map(String::as_str).collect();
    a.iter()
        .filter(|name| !exclude.contains(name.as_str()))
        .cloned()
        .collect()
}

pub fn build(remote: &[String], local: &[String]) -> SyncPlan {
    SyncPlan {
        to_archive: difference(local, remote),
        to_clone: difference(remote, local),
    }
}
