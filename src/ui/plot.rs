use eframe::egui::{RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use crate::color::type_color;
use crate::data::model::{EmissionType, YearPoint};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Dashboard view (central panel)
// ---------------------------------------------------------------------------

/// Render the dashboard: stat row, per-year trend, per-country totals.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    if state.records.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view emissions  (File → Open…)");
        });
        return;
    }

    stat_row(ui, state);
    ui.separator();

    let half_height = (ui.available_height() - 24.0) / 2.0;

    ui.strong("Emissions by year");
    yearly_trend_plot(ui, state, half_height);

    ui.strong("Emissions by country");
    country_bar_plot(ui, state, half_height);
}

// ---------------------------------------------------------------------------
// Stat row – headline numbers over the filtered set
// ---------------------------------------------------------------------------

fn stat_row(ui: &mut Ui, state: &AppState) {
    let agg = &state.aggregated;
    ui.horizontal(|ui: &mut Ui| {
        stat_card(ui, "Total emissions", format!("{:.2} Mt", agg.total_emissions));
        stat_card(ui, "Average", format!("{:.2} Mt", agg.average_emissions));
        stat_card(ui, "Records", state.filtered.len().to_string());
        if let Some(max) = &agg.max_record {
            stat_card(
                ui,
                "Largest source",
                format!("{} – {} ({:.2} Mt)", max.country, max.activity, max.emissions),
            );
        }
    });
}

fn stat_card(ui: &mut Ui, title: &str, value: String) {
    ui.group(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.label(RichText::new(title).small());
            ui.label(RichText::new(value).strong());
        });
    });
}

// ---------------------------------------------------------------------------
// Yearly trend – one line per known emission type plus the total
// ---------------------------------------------------------------------------

fn yearly_trend_plot(ui: &mut Ui, state: &AppState, height: f32) {
    let series = &state.aggregated.emissions_by_year;

    Plot::new("yearly_trend")
        .height(height)
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Emissions (Mt)")
        .show(ui, |plot_ui| {
            // Years without a given type are simply absent from its line.
            let mut type_line = |name: &str, tag: EmissionType, slot: fn(&YearPoint) -> Option<f64>| {
                let points: PlotPoints = series
                    .iter()
                    .filter_map(|p| slot(p).map(|v| [p.year as f64, v]))
                    .collect();
                plot_ui.line(Line::new(points).name(name).color(type_color(&tag)).width(1.5));
            };
            type_line("CO2", EmissionType::Co2, |p| p.co2);
            type_line("N2O", EmissionType::N2o, |p| p.n2o);
            type_line("CH4", EmissionType::Ch4, |p| p.ch4);

            let total: PlotPoints = series
                .iter()
                .map(|p| [p.year as f64, p.total])
                .collect();
            plot_ui.line(Line::new(total).name("Total").width(2.0));
        });
}

// ---------------------------------------------------------------------------
// Country totals – one bar per country
// ---------------------------------------------------------------------------

fn country_bar_plot(ui: &mut Ui, state: &AppState, height: f32) {
    let by_country = &state.aggregated.emissions_by_country;

    Plot::new("country_totals")
        .height(height)
        .legend(Legend::default())
        .y_axis_label("Emissions (Mt)")
        .show_x(false)
        .show(ui, |plot_ui| {
            for (i, (country, total)) in by_country.iter().enumerate() {
                let bar = Bar::new(i as f64, *total).width(0.7);
                let chart = BarChart::new(vec![bar])
                    .name(country)
                    .color(state.colors.color_for(country));
                plot_ui.bar_chart(chart);
            }
        });
}
