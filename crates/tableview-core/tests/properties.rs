//! Property tests for evaluation, pagination and reconciliation.

use std::num::NonZeroUsize;

use proptest::prelude::*;
use tableview_core::{
    Reconciliation, TableViewController, ViewConfig, evaluate, paginate, partition, reconcile,
};
use tableview_model::{
    FieldAccessor, FilterDefinition, FilterInput, MaterializedFilter, Record, Selection,
};

fn arb_record() -> impl Strategy<Value = Record> {
    ("[a-z ]{0,12}", "[A-C]", 0.0f64..1000.0).prop_map(|(name, kind, size)| {
        Record::new()
            .with("name", name)
            .with("kind", kind)
            .with("size", size)
    })
}

fn definitions() -> Vec<FilterDefinition> {
    vec![
        FilterDefinition::search(FieldAccessor::field("name"), "Search"),
        FilterDefinition::new(
            FieldAccessor::field("kind"),
            "Kind",
            FilterInput::Multiselect {
                available_options: vec![],
                default_options: vec![],
                separator: None,
            },
        ),
        FilterDefinition::new(
            FieldAccessor::field("kind"),
            "Kind (single)",
            FilterInput::Dropdown {
                available_options: vec![],
            },
        ),
        FilterDefinition::new(
            FieldAccessor::field("size"),
            "Size",
            FilterInput::Slider {
                min: 0.0,
                max: 1000.0,
                filter_rule: None,
            },
        ),
    ]
}

fn seeded() -> Vec<MaterializedFilter> {
    match reconcile(&definitions(), &[], 1) {
        Reconciliation::Reseeded(filters) => filters,
        Reconciliation::Unchanged => unreachable!("first reconciliation always seeds"),
    }
}

proptest! {
    #[test]
    fn empty_selections_return_input_unchanged(records in prop::collection::vec(arb_record(), 0..40)) {
        let filters = seeded();
        let parts = partition(&filters);
        let out = evaluate(&records, parts.search, &parts.standard);
        prop_assert_eq!(out, records.iter().collect::<Vec<_>>());
    }

    #[test]
    fn pagination_bound_holds(len in 0usize..500, size in 1usize..50, requested in 0usize..100) {
        let items: Vec<usize> = (0..len).collect();
        let page_size = NonZeroUsize::new(size).unwrap();
        let page = paginate(&items, page_size, requested);
        prop_assert_eq!(page.total_pages, len.div_ceil(size).max(1));
        prop_assert!(page.total_pages >= 1);
        prop_assert!(page.page_index >= 1 && page.page_index <= page.total_pages);
        prop_assert!(page.items.len() <= size);
    }

    #[test]
    fn pages_cover_collection_in_order(len in 0usize..200, size in 1usize..20) {
        let items: Vec<usize> = (0..len).collect();
        let page_size = NonZeroUsize::new(size).unwrap();
        let total = paginate(&items, page_size, 1).total_pages;
        let joined: Vec<usize> = (1..=total)
            .flat_map(|n| paginate(&items, page_size, n).items.into_iter().copied().collect::<Vec<_>>())
            .collect();
        prop_assert_eq!(joined, items);
    }

    #[test]
    fn search_result_is_ordered_subsequence(
        records in prop::collection::vec(arb_record(), 0..40),
        needle in "[a-z]{1,2}",
    ) {
        let filters = seeded();
        let search = filters[0].with_selection(Selection::FreeText(Some(needle.clone())));
        let out = evaluate(&records, Some(&search), &[]);
        let expected: Vec<&Record> = records
            .iter()
            .filter(|r| r.get("name").as_text().contains(&needle))
            .collect();
        prop_assert_eq!(out, expected);
    }

    #[test]
    fn reconcile_is_idempotent(text in "[a-z]{0,6}") {
        let filters = seeded();
        let edited: Vec<MaterializedFilter> = filters
            .iter()
            .map(|f| if f.is_search() {
                f.with_selection(Selection::FreeText(Some(text.clone())))
            } else {
                f.clone()
            })
            .collect();
        prop_assert_eq!(reconcile(&definitions(), &edited, 2), Reconciliation::Unchanged);
    }

    #[test]
    fn any_filter_edit_resets_page(start_page in 2usize..10, text in "[a-z]{0,3}") {
        let records: Vec<Record> = (0..100)
            .map(|i| Record::new().with("name", format!("row {i}")).with("kind", "A"))
            .collect();
        let mut controller = TableViewController::new(ViewConfig {
            page_size: NonZeroUsize::new(10).unwrap(),
        });
        controller.on_definitions_changed(&definitions());
        controller.on_records_changed(records);
        controller.on_page_requested(start_page);
        prop_assert_eq!(controller.view().page.page_index, start_page);

        let id = controller.filters()[0].id;
        let update = controller
            .on_filter_value_changed(id, Selection::FreeText(Some(text)))
            .unwrap();
        prop_assert_eq!(update.page_index, 1);
    }
}
