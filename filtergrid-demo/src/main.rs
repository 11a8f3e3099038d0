//! Scripted walkthrough of a filter table.
//!
//! Loads rows from the JSON file given as the first argument (or a built-in
//! sample), then plays a short sequence of user interactions through the
//! event adapter seam and prints the table after each step.
//!
//! Logs are written to `filtergrid-demo.log`.

use std::fs::File;

use filtergrid::view::{COLUMN, FILTER_MODE, PAGE, REMOVE_ROW, SEARCH_COLUMN};
use filtergrid::{FilterTable, PaginationConfig, Row, TableConfig};
use log::LevelFilter;
use simplelog::{Config, WriteLogger};
use tabledom::{query_all, to_markup, Element, Event};

const SAMPLE: &str = r#"[
    {"id": 1, "name": "Alice", "city": "Oslo", "role": "admin"},
    {"id": 2, "name": "Bob", "city": "Bergen", "role": "editor"},
    {"id": 3, "name": "Carol", "city": "Oslo", "role": "viewer"},
    {"id": 4, "name": "Dave", "city": "Trondheim", "role": "editor"},
    {"name": "Eve", "city": "Stavanger", "role": "viewer"}
]"#;

fn row_template(row: &Row) -> Element {
    Element::tr()
        .child(Element::td().child(Element::text(row.text("id"))))
        .child(Element::td().child(Element::input(row.text("name")).attr(COLUMN, "name")))
        .child(Element::td().child(Element::text(row.text("city"))))
        .child(Element::td().child(Element::text(row.text("role"))))
        .child(Element::td().child(Element::button("remove").attr(REMOVE_ROW, "")))
}

fn header() -> Element {
    let search = |column: &str| Element::th().child(Element::input("").attr(SEARCH_COLUMN, column));
    Element::thead().child(
        Element::tr()
            .child(Element::th().child(Element::select("AND").attr(FILTER_MODE, "")))
            .child(search("name"))
            .child(search("city"))
            .child(search("role"))
            .child(Element::th()),
    )
}

fn find(table: &FilterTable, pred: impl Fn(&Element) -> bool) -> Option<String> {
    query_all(table.table(), pred).first().map(|el| el.id.clone())
}

fn show(step: &str, table: &FilterTable) {
    println!("== {step}");
    println!(
        "rows={} filtered={:?} page={}/{}",
        table.len(),
        table.filtered_order(),
        table.page(),
        table.total_pages()
    );
    println!("{}\n", to_markup(table.table()));
}

fn main() {
    let log_file = File::create("filtergrid-demo.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let data = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path).expect("Failed to read data file"),
        None => SAMPLE.to_string(),
    };

    let config = TableConfig::new(row_template)
        .with_pagination(PaginationConfig::new(2))
        .with_on_filter_end(|rows| log::info!("filter matched {} rows", rows.len()));

    let mut table = match FilterTable::new(config) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };
    table.render_header(header());
    if let Err(e) = table.ingest_json(&data, false) {
        eprintln!("Error: {}", e);
        return;
    }
    show("loaded", &table);

    if let Some(city) = find(&table, |el| el.get_attr(SEARCH_COLUMN) == Some("city")) {
        table.dispatch(&Event::input(city, "oslo, bergen"));
        show("city contains oslo or bergen", &table);
    }

    if let Some(name) = find(&table, |el| el.get_attr(COLUMN) == Some("name")) {
        table.dispatch(&Event::input(name, "Alicia"));
        show("edited first visible name", &table);
    }

    table.reset();
    if let Some(next) = find(&table, |el| el.get_attr(PAGE) == Some("next")) {
        table.dispatch(&Event::click(next));
        show("reset, then next page", &table);
    }

    if let Some(remove) = find(&table, |el| el.has_attr(REMOVE_ROW)) {
        table.dispatch(&Event::click(remove));
        show("removed first visible row", &table);
    }

    match serde_json::to_string_pretty(&table.filtered_rows()) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Error: {}", e),
    }
}
