use std::collections::{HashMap, HashSet};

/// Identifiers believed to be live on the page and already announced.
pub type AnnouncedSet = HashSet<String>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reconciliation {
    /// Present on the page now but never announced.
    pub new_ids: HashSet<String>,
    /// The announced set after this cycle: exactly the ids on the page.
    pub announced: AnnouncedSet,
}

impl Reconciliation {
    /// Ids from `previous` that disappeared from the page.
    pub fn pruned<'a>(&'a self, previous: &'a AnnouncedSet) -> impl Iterator<Item = &'a String> {
        previous.difference(&self.announced)
    }
}

/// Compare the studies currently on the page against what has already been
/// announced.
pub fn reconcile<V>(
    current: &HashMap<String, V>,
    previously_announced: &AnnouncedSet,
) -> Reconciliation {
    let new_ids = current
        .keys()
        .filter(|id| !previously_announced.contains(*id))
        .cloned()
        .collect();
    let announced = current.keys().cloned().collect();

    Reconciliation { new_ids, announced }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page(ids: &[&str]) -> HashMap<String, ()> {
        ids.iter().map(|id| ((*id).to_string(), ())).collect()
    }

    fn set(ids: &[&str]) -> AnnouncedSet {
        ids.iter().map(|id| (*id).to_string()).collect()
    }

    #[test]
    fn drops_gone_keeps_known_adds_new() {
        let previous = set(&["A", "B"]);
        let result = reconcile(&page(&["B", "C"]), &previous);
        assert_eq!(result.new_ids, set(&["C"]));
        assert_eq!(result.announced, set(&["B", "C"]));
        let pruned: Vec<_> = result.pruned(&previous).collect();
        assert_eq!(pruned, vec!["A"]);
    }

    #[test]
    fn identical_pages_produce_nothing_new() {
        let first = reconcile(&page(&["X", "Y"]), &AnnouncedSet::new());
        assert_eq!(first.new_ids, set(&["X", "Y"]));

        let second = reconcile(&page(&["X", "Y"]), &first.announced);
        assert!(second.new_ids.is_empty());
        assert_eq!(second.announced, first.announced);
    }

    #[test]
    fn empty_page_clears_everything() {
        let previous = set(&["A", "B"]);
        let result = reconcile(&page(&[]), &previous);
        assert!(result.new_ids.is_empty());
        assert!(result.announced.is_empty());
        assert_eq!(result.pruned(&previous).count(), 2);
    }

    #[test]
    fn first_poll_announces_everything() {
        let result = reconcile(&page(&["1", "2", "3"]), &AnnouncedSet::new());
        assert_eq!(result.new_ids, result.announced);
    }
}
