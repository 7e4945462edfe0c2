//! Aligning materialized filters with caller-supplied definitions.

use tableview_model::{FilterDefinition, FilterId, MaterializedFilter};

/// Result of comparing incoming definitions with the materialized set.
#[derive(Debug, Clone, PartialEq)]
pub enum Reconciliation {
    /// Definitions are absent or structurally identical; keep current state.
    Unchanged,
    /// Definitions changed; these filters replace the current set.
    Reseeded(Vec<MaterializedFilter>),
}

impl Reconciliation {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }
}

/// True when `incoming` matches the definitions behind `current`, in order,
/// ignoring live selections.
pub fn definitions_match(incoming: &[FilterDefinition], current: &[MaterializedFilter]) -> bool {
    incoming.len() == current.len()
        && incoming
            .iter()
            .zip(current)
            .all(|(def, filter)| def == filter.definition())
}

/// Reconcile incoming definitions against the materialized filters.
///
/// A changed definition set is a context switch, so every filter is
/// re-seeded from its definition: multiselect filters take their default
/// options and everything else starts unset. Previous selections are not
/// carried over. New filters get ids in `generation`.
pub fn reconcile(
    incoming: &[FilterDefinition],
    current: &[MaterializedFilter],
    generation: u64,
) -> Reconciliation {
    if incoming.is_empty() || definitions_match(incoming, current) {
        return Reconciliation::Unchanged;
    }
    Reconciliation::Reseeded(
        incoming
            .iter()
            .enumerate()
            .map(|(position, def)| {
                MaterializedFilter::seeded(FilterId::new(generation, position), def.clone())
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use tableview_model::{FieldAccessor, FilterInput, FilterOption, Selection};

    use super::*;

    fn definitions() -> Vec<FilterDefinition> {
        vec![
            FilterDefinition::search(FieldAccessor::field("facilityName"), "Search"),
            FilterDefinition::new(
                FieldAccessor::field("status"),
                "Status",
                FilterInput::Multiselect {
                    available_options: vec![
                        FilterOption::new("A", "A"),
                        FilterOption::new("B", "B"),
                        FilterOption::new("C", "C"),
                    ],
                    default_options: vec!["A".into(), "B".into()],
                    separator: None,
                },
            ),
        ]
    }

    fn reseeded(r: Reconciliation) -> Vec<MaterializedFilter> {
        match r {
            Reconciliation::Reseeded(filters) => filters,
            Reconciliation::Unchanged => panic!("expected re-seed"),
        }
    }

    #[test]
    fn first_pass_seeds_selections() {
        let filters = reseeded(reconcile(&definitions(), &[], 1));
        assert_eq!(filters.len(), 2);
        assert_eq!(filters[0].selection, Selection::FreeText(None));
        assert_eq!(
            filters[1].selection,
            Selection::Multiselect(vec!["A".into(), "B".into()])
        );
        assert_eq!(filters[1].id, FilterId::new(1, 1));
    }

    #[test]
    fn identical_definitions_are_unchanged() {
        let mut filters = reseeded(reconcile(&definitions(), &[], 1));
        filters[0] = filters[0].with_selection(Selection::FreeText(Some("Bio".into())));
        // A fresh vector with the same content is not a change.
        assert!(reconcile(&definitions(), &filters, 2).is_unchanged());
    }

    #[test]
    fn empty_definitions_are_unchanged() {
        let filters = reseeded(reconcile(&definitions(), &[], 1));
        assert!(reconcile(&[], &filters, 2).is_unchanged());
    }

    #[test]
    fn changed_definitions_reset_all_selections() {
        let mut filters = reseeded(reconcile(&definitions(), &[], 1));
        filters[0] = filters[0].with_selection(Selection::FreeText(Some("Bio".into())));

        let mut changed = definitions();
        changed[1].label = "Device status".into();
        let next = reseeded(reconcile(&changed, &filters, 2));
        assert_eq!(next[0].selection, Selection::FreeText(None));
        assert_eq!(next[0].id, FilterId::new(2, 0));
    }

    #[test]
    fn reordered_definitions_are_a_change() {
        let filters = reseeded(reconcile(&definitions(), &[], 1));
        let mut reordered = definitions();
        reordered.reverse();
        assert!(!reconcile(&reordered, &filters, 2).is_unchanged());
    }
}
