use std::cell::{Cell, RefCell};
use std::rc::Rc;

use filtergrid::view::{COLUMN, FILTER_MODE, PAGE, REMOVE_ROW, ROW_ID, SEARCH_COLUMN, UPDATED_CLASS, UPDATED_FIELD};
use filtergrid::{FilterMode, FilterSpec, FilterTable, PaginationConfig, Record, Row, RowId, TableConfig, TableError, Value};
use tabledom::{query_all, Element, Event};

fn template(row: &Row) -> Element {
    Element::tr()
        .child(Element::td().child(Element::input(row.text("name")).attr(COLUMN, "name")))
        .child(Element::td().child(Element::text(row.text("city"))))
        .child(Element::td().child(Element::button("x").attr(REMOVE_ROW, "")))
}

fn table() -> FilterTable {
    FilterTable::new(TableConfig::new(template)).unwrap()
}

fn paged(per_page: usize) -> FilterTable {
    FilterTable::new(TableConfig::new(template).with_pagination(PaginationConfig::new(per_page))).unwrap()
}

fn person(id: i64, name: &str, city: &str) -> Record {
    Record::new().set("id", id).set("name", name).set("city", city)
}

fn people() -> Vec<Record> {
    vec![
        person(1, "Alice", "Oslo"),
        person(2, "Bob", "Bergen"),
        person(3, "Carol", "Oslo"),
        person(4, "Dave", "Trondheim"),
    ]
}

fn header() -> Element {
    Element::thead().child(
        Element::tr()
            .child(Element::th().child(Element::input("").attr(SEARCH_COLUMN, "name")))
            .child(Element::th().child(Element::input("").attr(SEARCH_COLUMN, "city")))
            .child(Element::th().child(Element::select("AND").attr(FILTER_MODE, ""))),
    )
}

/// Generated ID of the first element under row `id` matching `pred`.
fn in_row(table: &FilterTable, id: RowId, pred: impl Fn(&Element) -> bool) -> String {
    let row = table.row_element(id).expect("row is rendered");
    query_all(row, pred)[0].id.clone()
}

fn in_header(table: &FilterTable, pred: impl Fn(&Element) -> bool) -> String {
    query_all(table.header().expect("header bound"), pred)[0].id.clone()
}

fn rendered_ids(table: &FilterTable) -> Vec<RowId> {
    table
        .body()
        .unwrap()
        .child_elements()
        .iter()
        .map(|el| el.get_attr(ROW_ID).unwrap().parse().unwrap())
        .collect()
}

fn is_subsequence(sub: &[RowId], full: &[RowId]) -> bool {
    let mut it = full.iter();
    sub.iter().all(|id| it.any(|f| f == id))
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_body_created_when_absent() {
    let table = table();
    assert_eq!(table.table().tag, "table");
    assert_eq!(table.body().map(|b| b.tag.as_str()), Some("tbody"));
}

#[test]
fn test_existing_body_reused() {
    let root = Element::table().child(Element::tbody().id("my-body"));
    let table = FilterTable::new(TableConfig::new(template).with_table(root)).unwrap();
    assert_eq!(table.body().unwrap().id, "my-body");
    assert_eq!(table.table().child_elements().len(), 1);
}

#[test]
fn test_zero_per_page_rejected() {
    let result = FilterTable::new(TableConfig::new(template).with_pagination(PaginationConfig::new(0)));
    assert!(matches!(result, Err(TableError::InvalidPerPage)));
}

// ============================================================================
// Ingestion
// ============================================================================

#[test]
fn test_ingest_renders_rows_in_order() {
    let mut table = table();
    table.ingest(people(), false);

    assert_eq!(table.order(), &[1, 2, 3, 4]);
    assert_eq!(table.filtered_order(), table.order());
    assert_eq!(rendered_ids(&table), vec![1, 2, 3, 4]);
    assert!(table.order().iter().all(|id| table.get(*id).is_some()));
}

#[test]
fn test_ingest_merges_existing_row() {
    let mut table = table();
    table.ingest([person(1, "Alice", "Oslo").set("age", 30i64)], false);
    table.ingest([Record::new().set("id", 1i64).set("city", "Bergen")], false);

    let row = table.get(1).unwrap();
    assert_eq!(row.text("name"), "Alice");
    assert_eq!(row.text("age"), "30");
    assert_eq!(row.text("city"), "Bergen");
    assert_eq!(table.len(), 1);
}

#[test]
fn test_auto_ids() {
    let mut table = table();
    table.ingest([Record::new().set("name", "first")], false);
    assert!(table.get(1).is_some());
    table.ingest([Record::new().set("name", "second")], false);
    assert_eq!(table.get(2).unwrap().text("name"), "second");
}

#[test]
fn test_configured_id_field() {
    let mut table = FilterTable::new(TableConfig::new(template).with_id_field("key")).unwrap();
    table.ingest([Record::new().set("key", 10i64).set("name", "x")], false);
    assert_eq!(table.get(10).unwrap().text("id"), "10");
}

#[test]
fn test_ingest_without_keep_filters_resets_view() {
    let mut table = table();
    table.ingest(people(), false);
    table.filter(&FilterSpec::new().with("city", "oslo", FilterMode::And));
    assert_eq!(table.filtered_order(), &[1, 3]);

    table.ingest([person(5, "Eve", "Bergen")], false);
    assert_eq!(table.filtered_order(), table.order());
}

#[test]
fn test_ingest_with_keep_filters_appends_new_rows() {
    let mut table = table();
    table.ingest(people(), false);
    table.filter(&FilterSpec::new().with("city", "oslo", FilterMode::And));

    table.ingest([person(5, "Eve", "Bergen"), person(2, "Bobby", "Bergen")], true);
    assert_eq!(table.filtered_order(), &[1, 3, 5]);
    assert!(is_subsequence(table.filtered_order(), table.order()));
    assert_eq!(table.get(2).unwrap().text("name"), "Bobby");
}

#[test]
fn test_ingest_json() {
    let mut table = table();
    table
        .ingest_json(r#"[{"id": 1, "name": "Alice", "score": 9.5}, {"name": "Bob"}]"#, false)
        .unwrap();

    assert_eq!(table.order(), &[1, 2]);
    assert_eq!(table.get(1).unwrap().get("score"), Some(&Value::Float(9.5)));
}

#[test]
fn test_ingest_json_rejects_non_objects() {
    let mut table = table();

    let err = table.ingest_json(r#"[{"id": 1}, 5]"#, false).unwrap_err();
    assert!(matches!(err, TableError::NotAnObject { index: 1 }));
    assert!(table.is_empty());

    assert!(matches!(table.ingest_json("{", false), Err(TableError::Json(_))));
}

// ============================================================================
// Lookup, removal, update
// ============================================================================

#[test]
fn test_find_by_field() {
    let mut table = table();
    table.ingest(people(), false);

    assert_eq!(table.find_by_field("city", "Oslo").map(Row::id), Some(1));
    assert_eq!(table.find_by_field("id", 4i64).map(Row::id), Some(4));
    assert!(table.find_by_field("city", "Paris").is_none());
}

#[test]
fn test_remove_known_id() {
    let mut table = table();
    table.ingest(people(), false);
    let kept = table.row_element(3).unwrap().id.clone();

    assert!(table.remove(2));
    assert!(table.get(2).is_none());
    assert_eq!(table.order(), &[1, 3, 4]);
    assert_eq!(table.filtered_order(), &[1, 3, 4]);
    assert_eq!(rendered_ids(&table), vec![1, 3, 4]);
    // Other rows were not re-rendered
    assert_eq!(table.row_element(3).unwrap().id, kept);
}

#[test]
fn test_remove_unknown_id() {
    let mut table = table();
    table.ingest(people(), false);

    assert!(!table.remove(99));
    assert_eq!(table.order(), &[1, 2, 3, 4]);
    assert_eq!(rendered_ids(&table), vec![1, 2, 3, 4]);
}

#[test]
fn test_update_without_reflect_keeps_element() {
    let mut table = table();
    table.ingest(people(), false);
    let before = table.row_element(1).unwrap().clone();

    assert!(table.update(1, Record::new().set("name", "Alicia"), false));

    assert_eq!(table.get(1).unwrap().text("name"), "Alicia");
    assert_eq!(table.row_element(1).unwrap(), &before);
}

#[test]
fn test_update_with_reflect_swaps_element() {
    let mut table = table();
    table.ingest(people(), false);
    let before = table.row_element(1).unwrap().id.clone();

    assert!(table.update(1, Record::new().set("name", "Alicia").set("id", 7i64), true));

    let after = table.row_element(1).unwrap();
    assert_ne!(after.id, before);
    let input = &query_all(after, |el| el.has_attr(COLUMN))[0];
    assert_eq!(input.value.as_deref(), Some("Alicia"));
    assert_eq!(table.get(1).unwrap().id(), 1);
    assert_eq!(rendered_ids(&table), vec![1, 2, 3, 4]);
}

#[test]
fn test_update_unknown_id() {
    let mut table = table();
    assert!(!table.update(1, Record::new().set("name", "x"), true));
}

#[test]
fn test_template_row_id_is_kept() {
    let mut table = FilterTable::new(TableConfig::new(|row: &Row| {
        Element::tr().attr(ROW_ID, format!("{}", row.id() * 10))
    }))
    .unwrap();
    table.ingest([person(1, "a", "b")], false);

    let rows = table.body().unwrap().child_elements();
    assert_eq!(rows[0].get_attr(ROW_ID), Some("10"));
}

// ============================================================================
// Pagination
// ============================================================================

#[test]
fn test_two_rows_one_per_page() {
    let mut table = paged(1);
    table.ingest([person(1, "Alice", ""), person(2, "Bob", "")], false);

    assert_eq!(table.total_pages(), 2);
    assert_eq!(table.page_slice(), &[1]);
    assert_eq!(rendered_ids(&table), vec![1]);

    table.set_page(2);
    assert_eq!(table.page_slice(), &[2]);
    assert_eq!(rendered_ids(&table), vec![2]);
}

#[test]
fn test_total_pages_empty_is_one() {
    let mut table = paged(3);
    assert_eq!(table.total_pages(), 1);

    table.ingest(people(), false);
    table.filter(&FilterSpec::new().with("name", "zzz", FilterMode::And));
    assert!(table.filtered_order().is_empty());
    assert_eq!(table.total_pages(), 1);
    assert!(table.page_slice().is_empty());
}

#[test]
fn test_set_page_clamps() {
    let mut table = paged(3);
    table.ingest(people(), false);

    assert_eq!(table.set_page(0), 1);
    assert_eq!(table.set_page(50), 2);
    assert_eq!(table.next_page(), 2);
    assert_eq!(table.prev_page(), 1);
    assert_eq!(table.prev_page(), 1);
    assert_eq!(table.last_page(), 2);
    assert_eq!(table.first_page(), 1);
}

#[test]
fn test_starting_page_from_config() {
    let mut table = FilterTable::new(
        TableConfig::new(template).with_pagination(PaginationConfig::new(1).with_page(3)),
    )
    .unwrap();
    table.ingest(people(), false);
    assert_eq!(table.page(), 3);
    assert_eq!(rendered_ids(&table), vec![3]);
}

#[test]
fn test_starting_page_beyond_rows_is_clamped() {
    let mut table = FilterTable::new(
        TableConfig::new(template).with_pagination(PaginationConfig::new(10).with_page(5)),
    )
    .unwrap();
    table.ingest([person(1, "Alice", "Oslo")], false);

    assert_eq!(table.page(), 1);
    assert_eq!(table.total_pages(), 1);
    assert_eq!(rendered_ids(&table), vec![1]);
    assert_eq!(table.next_page(), 1);
}

#[test]
fn test_remove_last_row_on_last_page_then_redraw() {
    let mut table = paged(1);
    table.ingest(people(), false);
    assert_eq!(table.last_page(), 4);

    assert!(table.remove(4));
    assert_eq!(table.total_pages(), 3);
    assert!(table.page() <= table.total_pages());

    table.ingest(Vec::<Record>::new(), true);
    assert_eq!(table.page(), 3);
    assert_eq!(rendered_ids(&table), vec![3]);
    assert_eq!(
        footer_buttons(&table),
        vec![
            ("prev".to_string(), false),
            ("1".to_string(), false),
            ("2".to_string(), false),
            ("3".to_string(), true),
            ("next".to_string(), true),
        ]
    );

    let prev = query_all(table.footer().unwrap(), |el| el.get_attr(PAGE) == Some("prev"))[0].id.clone();
    assert!(table.dispatch(&Event::click(prev)));
    assert_eq!(table.page(), 2);
    assert_eq!(rendered_ids(&table), vec![2]);
}

#[test]
fn test_active_page_label() {
    let mut table = paged(2);
    table.ingest(people(), false);
    table.next_page();

    let active = query_all(table.footer().unwrap(), |el| el.has_class("active"));
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].text_content(), Some("2"));
}

#[test]
fn test_navigation_without_pagination() {
    let mut table = table();
    table.ingest(people(), false);
    assert_eq!(table.next_page(), 1);
    assert_eq!(table.total_pages(), 1);
    assert_eq!(table.page_slice(), &[1, 2, 3, 4]);
    assert!(table.footer().is_none());
}

#[test]
fn test_filter_resets_to_first_page() {
    let mut table = paged(1);
    table.ingest(people(), false);
    table.set_page(3);

    table.filter(&FilterSpec::new().with("city", "o", FilterMode::And));
    assert_eq!(table.page(), 1);
}

// ============================================================================
// Footer
// ============================================================================

fn footer_buttons(table: &FilterTable) -> Vec<(String, bool)> {
    query_all(table.footer().unwrap(), |el| el.tag == "button")
        .into_iter()
        .map(|el| (el.get_attr(PAGE).unwrap().to_string(), el.disabled))
        .collect()
}

#[test]
fn test_footer_controls() {
    let mut table = paged(1);
    table.ingest(people(), false);

    assert_eq!(
        footer_buttons(&table),
        vec![
            ("prev".to_string(), true),
            ("1".to_string(), true),
            ("2".to_string(), false),
            ("3".to_string(), false),
            ("4".to_string(), false),
            ("next".to_string(), false),
        ]
    );
}

#[test]
fn test_footer_ellipsis() {
    let mut table = paged(1);
    table.ingest((1..=10).map(|i| person(i, "n", "c")), false);
    table.set_page(5);

    let footer = table.footer().unwrap();
    assert_eq!(query_all(footer, |el| el.has_class("ellipsis")).len(), 2);
    let active: Vec<&str> = query_all(footer, |el| el.has_class("active"))
        .into_iter()
        .filter_map(|el| el.get_attr(PAGE))
        .collect();
    assert_eq!(active, vec!["5"]);
}

#[test]
fn test_footer_built_once_and_spans_header() {
    let mut table = paged(2);
    table.ingest(people(), false);
    let footer_id = table.footer().unwrap().id.clone();
    table.render_header(header());
    table.next_page();

    let footer = table.footer().unwrap();
    assert_eq!(footer.id, footer_id);
    assert_eq!(footer.child_elements().len(), 1);
    let cell = &query_all(footer, |el| el.tag == "td")[0];
    assert_eq!(cell.get_attr("colspan"), Some("3"));
}

#[test]
fn test_footer_colspan_without_header() {
    let mut table = paged(2);
    table.ingest(people(), false);
    let cell = &query_all(table.footer().unwrap(), |el| el.tag == "td")[0];
    assert_eq!(cell.get_attr("colspan"), Some("1"));
}

#[test]
fn test_footer_click_navigates() {
    let mut table = paged(1);
    table.ingest(people(), false);

    let next = query_all(table.footer().unwrap(), |el| el.get_attr(PAGE) == Some("next"))[0].id.clone();
    assert!(table.dispatch(&Event::click(next)));
    assert_eq!(table.page(), 2);

    let four = query_all(table.footer().unwrap(), |el| el.get_attr(PAGE) == Some("4"))[0].id.clone();
    assert!(table.dispatch(&Event::click(four)));
    assert_eq!(table.page(), 4);
    assert_eq!(rendered_ids(&table), vec![4]);

    // Current page and the boundary button are disabled
    let current = query_all(table.footer().unwrap(), |el| el.get_attr(PAGE) == Some("4"))[0].id.clone();
    assert!(!table.dispatch(&Event::click(current)));
    let next = query_all(table.footer().unwrap(), |el| el.get_attr(PAGE) == Some("next"))[0].id.clone();
    assert!(!table.dispatch(&Event::click(next)));
    assert_eq!(table.page(), 4);
}

// ============================================================================
// Header and filtering
// ============================================================================

#[test]
fn test_render_header_binds_once() {
    let mut table = table();
    assert!(table.render_header(header()));
    assert!(!table.render_header(Element::thead()));

    assert_eq!(table.table().child_elements()[0].tag, "thead");
    assert_eq!(query_all(table.table(), |el| el.tag == "thead").len(), 1);
}

#[test]
fn test_render_header_already_in_table() {
    let head = Element::thead().id("head");
    let root = Element::table().child(Element::tbody()).child(head.clone());
    let mut table = FilterTable::new(TableConfig::new(template).with_table(root)).unwrap();

    assert!(table.render_header(head));
    assert_eq!(table.table().child_elements().len(), 2);
    assert_eq!(table.header().unwrap().id, "head");
}

#[test]
fn test_header_input_filters_with_and() {
    let mut table = table();
    table.render_header(header());
    table.ingest(people(), false);

    let name = in_header(&table, |el| el.get_attr(SEARCH_COLUMN) == Some("name"));
    let city = in_header(&table, |el| el.get_attr(SEARCH_COLUMN) == Some("city"));

    assert!(table.dispatch(&Event::input(city, "oslo")));
    assert_eq!(table.filtered_order(), &[1, 3]);

    assert!(table.dispatch(&Event::input(name, "car")));
    assert_eq!(table.filtered_order(), &[3]);
    assert_eq!(rendered_ids(&table), vec![3]);
}

#[test]
fn test_header_mode_switch_or_and_not() {
    let mut table = table();
    table.render_header(header());
    table.ingest(people(), false);

    let mode = in_header(&table, |el| el.has_attr(FILTER_MODE));
    let name = in_header(&table, |el| el.get_attr(SEARCH_COLUMN) == Some("name"));
    let city = in_header(&table, |el| el.get_attr(SEARCH_COLUMN) == Some("city"));

    // Changing the mode alone does not filter
    assert!(!table.dispatch(&Event::input(mode.clone(), "OR")));
    table.dispatch(&Event::input(name.clone(), "bob"));
    table.dispatch(&Event::input(city.clone(), "trond"));
    assert_eq!(table.filtered_order(), &[2, 4]);

    table.dispatch(&Event::input(mode, "NOT"));
    table.dispatch(&Event::input(city, ""));
    assert_eq!(table.filtered_order(), &[1, 3, 4]);
}

#[test]
fn test_filter_words_and_loosening() {
    let mut table = table();
    table.ingest(people(), false);

    table.filter(&FilterSpec::new().with("name", "alice,dave", FilterMode::And));
    assert_eq!(table.filtered_order(), &[1, 4]);

    // A looser filter starts again from every row
    table.filter(&FilterSpec::new().with("name", "a", FilterMode::And));
    assert_eq!(table.filtered_order(), &[1, 3, 4]);
}

#[test]
fn test_on_filter_end_receives_filtered_rows() {
    let seen: Rc<RefCell<Vec<Vec<(RowId, String)>>>> = Rc::default();
    let sink = Rc::clone(&seen);
    let mut table = FilterTable::new(TableConfig::new(template).with_on_filter_end(move |rows| {
        sink.borrow_mut()
            .push(rows.iter().map(|(id, row)| (*id, row.text("name"))).collect());
    }))
    .unwrap();
    table.ingest(people(), false);

    table.filter(&FilterSpec::new().with("city", "oslo", FilterMode::And));

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0], vec![(1, "Alice".to_string()), (3, "Carol".to_string())]);
}

#[test]
fn test_reset_clears_inputs_and_filter() {
    let mut table = paged(1);
    table.render_header(header());
    table.ingest(people(), false);

    let city = in_header(&table, |el| el.get_attr(SEARCH_COLUMN) == Some("city"));
    table.dispatch(&Event::input(city, "oslo"));
    table.next_page();
    assert_eq!(table.filtered_order(), &[1, 3]);

    table.reset();
    assert_eq!(table.filtered_order(), &[1, 2, 3, 4]);
    assert_eq!(table.page(), 1);
    let values: Vec<Option<&str>> = query_all(table.header().unwrap(), |el| el.has_attr(SEARCH_COLUMN))
        .into_iter()
        .map(|el| el.value.as_deref())
        .collect();
    assert_eq!(values, vec![Some(""), Some("")]);
}

#[test]
fn test_on_search_input_changed() {
    let mut table = table();
    table.ingest(people(), false);
    table.on_search_input_changed(&FilterSpec::new().with("city", "bergen", FilterMode::Not));
    assert_eq!(table.filtered_order(), &[1, 3, 4]);
}

// ============================================================================
// Body interaction
// ============================================================================

#[test]
fn test_click_remove_control() {
    let mut table = table();
    table.ingest(people(), false);

    let remove = in_row(&table, 2, |el| el.has_attr(REMOVE_ROW));
    assert!(table.dispatch(&Event::click(remove)));
    assert!(table.get(2).is_none());
    assert_eq!(rendered_ids(&table), vec![1, 3, 4]);
}

#[test]
fn test_click_elsewhere_in_row_is_ignored() {
    let mut table = table();
    table.ingest(people(), false);

    let input = in_row(&table, 2, |el| el.has_attr(COLUMN));
    assert!(!table.dispatch(&Event::click(input)));
    assert!(table.get(2).is_some());
}

#[test]
fn test_edit_updates_store_without_redraw() {
    let mut table = table();
    table.ingest(people(), false);

    let row_before = table.row_element(1).unwrap().id.clone();
    let input = in_row(&table, 1, |el| el.has_attr(COLUMN));
    assert!(table.dispatch(&Event::input(input.clone(), "Alicia")));

    let row = table.get(1).unwrap();
    assert_eq!(row.text("name"), "Alicia");
    assert_eq!(row.get(UPDATED_FIELD), Some(&Value::Bool(true)));

    let el = table.row_element(1).unwrap();
    assert_eq!(el.id, row_before);
    assert!(el.has_class(UPDATED_CLASS));
    // The edited control itself is untouched
    assert_eq!(in_row(&table, 1, |el| el.has_attr(COLUMN)), input);
}

#[test]
fn test_on_field_edited() {
    let mut table = table();
    table.ingest(people(), false);

    assert!(table.on_field_edited(4, "city", "Bodø"));
    assert_eq!(table.get(4).unwrap().text("city"), "Bodø");
    assert!(table.row_element(4).unwrap().has_class(UPDATED_CLASS));
    assert!(!table.on_field_edited(99, "city", "x"));
}

#[test]
fn test_events_outside_table_are_ignored() {
    let mut table = table();
    table.ingest(people(), false);
    assert!(!table.dispatch(&Event::click("nowhere")));
    assert!(!table.dispatch(&Event::input("nowhere", "x")));
}

#[test]
fn test_listener_hook_runs_once() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let mut table = FilterTable::new(TableConfig::new(template).with_event_listeners(move |root| {
        counter.set(counter.get() + 1);
        root.set_attr("data-ready", "1");
    }))
    .unwrap();

    assert_eq!(calls.get(), 0);
    table.ingest(people(), false);
    table.ingest(people(), false);
    table.filter(&FilterSpec::new());

    assert_eq!(calls.get(), 1);
    assert_eq!(table.table().get_attr("data-ready"), Some("1"));
}
