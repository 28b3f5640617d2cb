use eframe::egui::{self, Color32, DragValue, RichText, ScrollArea, Ui};

use crate::data::model::{EmissionType, FilterCriteria};
use crate::state::{AppState, View};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel for the dashboard-wide criteria.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.records.is_empty() {
        ui.label("No dataset loaded.");
        return;
    }

    // Work on a copy; criteria are replaced wholesale when anything changes.
    let mut criteria = state.criteria.clone();
    let mut changed = false;
    let facets = state.facets.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            changed |= value_selector(ui, "Countries", &facets.countries, &mut criteria.countries);

            let mut type_labels: Vec<String> = criteria
                .emission_types
                .iter()
                .map(|t| t.label().to_string())
                .collect();
            if value_selector(ui, "Emission types", &facets.emission_types, &mut type_labels) {
                criteria.emission_types =
                    type_labels.into_iter().map(EmissionType::from).collect();
                changed = true;
            }

            changed |= value_selector(ui, "Activities", &facets.activities, &mut criteria.activities);

            changed |= year_range_selector(ui, facets.year_range, &mut criteria.year_range);
            changed |= emission_bounds_selector(
                ui,
                facets.emissions_range,
                &mut criteria.min_emissions,
                &mut criteria.max_emissions,
            );

            ui.separator();
            if criteria.is_active() && ui.button("Clear filters").clicked() {
                criteria = FilterCriteria::default();
                changed = true;
            }
        });

    if changed {
        state.set_criteria(criteria);
    }
}

/// Collapsible checkbox list over a facet's values. Empty selection means
/// "no constraint", mirroring the filter engine's policy.
fn value_selector(ui: &mut Ui, title: &str, all_values: &[String], selected: &mut Vec<String>) -> bool {
    let mut changed = false;

    let header_text = if selected.is_empty() {
        format!("{title}  (all)")
    } else {
        format!("{title}  ({}/{})", selected.len(), all_values.len())
    };

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            if !selected.is_empty() && ui.small_button("Clear").clicked() {
                selected.clear();
                changed = true;
            }

            for val in all_values {
                let mut checked = selected.contains(val);
                if ui.checkbox(&mut checked, val).changed() {
                    if checked {
                        selected.push(val.clone());
                    } else {
                        selected.retain(|v| v != val);
                    }
                    changed = true;
                }
            }
        });

    changed
}

fn year_range_selector(ui: &mut Ui, bounds: (i32, i32), range: &mut Option<(i32, i32)>) -> bool {
    let mut changed = false;

    let mut enabled = range.is_some();
    if ui.checkbox(&mut enabled, "Year range").changed() {
        *range = enabled.then_some(bounds);
        changed = true;
    }

    if let Some((lo, hi)) = range {
        ui.horizontal(|ui: &mut Ui| {
            changed |= ui
                .add(DragValue::new(lo).range(bounds.0..=*hi))
                .changed();
            ui.label("to");
            changed |= ui
                .add(DragValue::new(hi).range(*lo..=bounds.1))
                .changed();
        });
    }

    changed
}

fn emission_bounds_selector(
    ui: &mut Ui,
    bounds: (f64, f64),
    min: &mut Option<f64>,
    max: &mut Option<f64>,
) -> bool {
    let mut changed = false;

    let mut enabled = min.is_some() || max.is_some();
    if ui.checkbox(&mut enabled, "Emissions range (Mt)").changed() {
        if enabled {
            *min = Some(bounds.0);
            *max = Some(bounds.1);
        } else {
            *min = None;
            *max = None;
        }
        changed = true;
    }

    if min.is_some() || max.is_some() {
        let mut lo = min.unwrap_or(bounds.0);
        let mut hi = max.unwrap_or(bounds.1);
        ui.horizontal(|ui: &mut Ui| {
            if ui.add(DragValue::new(&mut lo).speed(0.1)).changed() {
                *min = Some(lo);
                changed = true;
            }
            ui.label("to");
            if ui.add(DragValue::new(&mut hi).speed(0.1)).changed() {
                *max = Some(hi);
                changed = true;
            }
        });
    }

    changed
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar: file loading, view switch, record counts.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if ui
            .selectable_label(state.view == View::Dashboard, "Dashboard")
            .clicked()
        {
            state.view = View::Dashboard;
        }
        if ui
            .selectable_label(state.view == View::Table, "Table")
            .clicked()
        {
            state.view = View::Table;
        }

        ui.separator();

        if !state.records.is_empty() {
            ui.label(format!(
                "{} records loaded, {} matching filters",
                state.records.len(),
                state.filtered.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open emission records")
        .add_filter("Supported files", &["json", "csv"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        match crate::data::loader::load_file(&path) {
            Ok(records) => {
                state.set_records(records);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
                state.loading = false;
            }
        }
    }
}
