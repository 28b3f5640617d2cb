use eframe::egui::{self, DragValue, RichText, TextEdit, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{SortField, SortOrder};
use crate::data::table::page_numbers;
use crate::state::AppState;

const SORTABLE_COLUMNS: [SortField; 5] = [
    SortField::Year,
    SortField::Country,
    SortField::Activity,
    SortField::Type,
    SortField::Emissions,
];

// ---------------------------------------------------------------------------
// Table view (central panel)
// ---------------------------------------------------------------------------

/// Render the tabular view: its own search/filter row, sortable columns, and
/// pagination controls.
pub fn table_view(ui: &mut Ui, state: &mut AppState) {
    if state.records.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view records  (File → Open…)");
        });
        return;
    }

    filter_row(ui, state);
    ui.separator();

    records_table(ui, state);
    ui.separator();

    pagination_controls(ui, state);
}

// ---------------------------------------------------------------------------
// Filter row – search box, dropdowns, year bounds
// ---------------------------------------------------------------------------

fn filter_row(ui: &mut Ui, state: &mut AppState) {
    let mut criteria = state.table_criteria.clone();
    let mut changed = false;

    // Dropdown options always span the full dataset.
    let countries = state.table.countries.clone();
    let types = state.table.types.clone();
    let activities = state.table.activities.clone();
    let year_range = state.table.year_range;

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Search");
        changed |= ui
            .add(TextEdit::singleline(&mut criteria.search).desired_width(160.0))
            .changed();

        changed |= multi_select(ui, "Country", &countries, &mut criteria.countries);
        changed |= multi_select(ui, "Type", &types, &mut criteria.types);
        changed |= multi_select(ui, "Activity", &activities, &mut criteria.activities);

        changed |= year_bound(ui, "From", year_range, &mut criteria.year_from);
        changed |= year_bound(ui, "To", year_range, &mut criteria.year_to);
    });

    if changed {
        state.set_table_criteria(criteria);
    }
}

/// Dropdown with one checkbox per value; empty selection shows everything.
fn multi_select(ui: &mut Ui, title: &str, options: &[String], selected: &mut Vec<String>) -> bool {
    let mut changed = false;

    let button_text = if selected.is_empty() {
        format!("{title}: all")
    } else {
        format!("{title}: {}", selected.len())
    };

    ui.menu_button(button_text, |ui: &mut Ui| {
        if !selected.is_empty() && ui.small_button("Clear").clicked() {
            selected.clear();
            changed = true;
        }
        for opt in options {
            let mut checked = selected.contains(opt);
            if ui.checkbox(&mut checked, opt).changed() {
                if checked {
                    selected.push(opt.clone());
                } else {
                    selected.retain(|v| v != opt);
                }
                changed = true;
            }
        }
    });

    changed
}

fn year_bound(ui: &mut Ui, label: &str, range: (i32, i32), bound: &mut Option<i32>) -> bool {
    let mut changed = false;

    let mut enabled = bound.is_some();
    if ui.checkbox(&mut enabled, label).changed() {
        *bound = enabled.then_some(if label == "From" { range.0 } else { range.1 });
        changed = true;
    }
    if let Some(year) = bound {
        changed |= ui
            .add(DragValue::new(year).range(range.0..=range.1))
            .changed();
    }

    changed
}

// ---------------------------------------------------------------------------
// Records table – sortable headers, one page of rows
// ---------------------------------------------------------------------------

fn records_table(ui: &mut Ui, state: &mut AppState) {
    let rows = state.table.paginated.clone();
    let sort_field = state.table_criteria.sort_field;
    let sort_order = state.table_criteria.sort_order;
    let mut clicked: Option<SortField> = None;

    let table_height = ui.available_height() - 40.0;

    TableBuilder::new(ui)
        .striped(true)
        .max_scroll_height(table_height)
        .columns(Column::auto().resizable(true), 4)
        .column(Column::remainder())
        .header(22.0, |mut header| {
            for field in SORTABLE_COLUMNS {
                header.col(|ui: &mut Ui| {
                    let marker = if field == sort_field {
                        match sort_order {
                            SortOrder::Ascending => " ↑",
                            SortOrder::Descending => " ↓",
                        }
                    } else {
                        ""
                    };
                    let text = RichText::new(format!("{}{marker}", field.label())).strong();
                    if ui.add(egui::Button::new(text).frame(false)).clicked() {
                        clicked = Some(field);
                    }
                });
            }
        })
        .body(|body| {
            body.rows(20.0, rows.len(), |mut row| {
                let rec = &rows[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label(rec.year.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.country);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.activity);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(rec.emission_type.label());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.2}", rec.emissions));
                });
            });
        });

    if let Some(field) = clicked {
        state.toggle_sort(field);
    }
}

// ---------------------------------------------------------------------------
// Pagination controls
// ---------------------------------------------------------------------------

fn pagination_controls(ui: &mut Ui, state: &mut AppState) {
    let total_pages = state.table.total_pages;
    let current = state.current_page;
    let mut goto: Option<usize> = None;

    ui.horizontal(|ui: &mut Ui| {
        let total = state.table.sorted.len();
        if total == 0 {
            ui.label("No matching records");
        } else {
            ui.label(format!(
                "Showing {}–{} of {}",
                state.table.start_item, state.table.end_item, total
            ));
        }

        ui.separator();

        if ui
            .add_enabled(current > 1, egui::Button::new("Prev"))
            .clicked()
        {
            goto = Some(current - 1);
        }

        for slot in page_numbers(current, total_pages) {
            match slot {
                Some(page) => {
                    if ui
                        .selectable_label(page == current, page.to_string())
                        .clicked()
                    {
                        goto = Some(page);
                    }
                }
                None => {
                    ui.label("…");
                }
            }
        }

        if ui
            .add_enabled(current < total_pages, egui::Button::new("Next"))
            .clicked()
        {
            goto = Some(current + 1);
        }
    });

    if let Some(page) = goto {
        state.set_page(page);
    }
}
