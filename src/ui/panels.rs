use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::loader::LoadError;
use crate::data::model::{PayloadRange, SiteSelector};
use crate::data::options::matching_options;
use crate::state::DashboardState;
use crate::ui::charts;

const TITLE_COLOR: Color32 = Color32::from_rgb(0x50, 0x3D, 0x36);

/// Clicks inside the dropdown (the search box) must not close it.
const SITE_POPUP_CLOSE: egui::PopupCloseBehavior = egui::PopupCloseBehavior::CloseOnClickOutside;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut DashboardState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export charts…").clicked() {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let source = state
            .source_path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        ui.label(format!("{} launches  {source}", state.table().len()));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Dashboard body: controls and charts, top to bottom
// ---------------------------------------------------------------------------

pub fn dashboard(ui: &mut Ui, state: &mut DashboardState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new("SpaceX Launch Records Dashboard")
                .size(40.0)
                .color(TITLE_COLOR),
        );
    });
    ui.add_space(8.0);

    site_dropdown(ui, state);
    ui.add_space(12.0);

    charts::proportion_chart(ui, state.proportion());
    ui.add_space(12.0);

    payload_slider(ui, state);
    ui.add_space(12.0);

    charts::correlation_chart(ui, state.correlation(), &state.booster_colors);
}

fn site_dropdown(ui: &mut Ui, state: &mut DashboardState) {
    ui.label("Select Launch Site:");

    let options = state.site_options().to_vec();
    let current = state.controls().site.clone();
    let selected_text = options
        .iter()
        .find(|opt| opt.selector() == current)
        .map(|opt| opt.label.clone())
        .unwrap_or_else(|| current.to_string());

    let mut picked: Option<SiteSelector> = None;
    egui::ComboBox::from_id_salt("site-dropdown")
        .selected_text(selected_text)
        .width(ui.available_width().min(480.0))
        .close_behavior(SITE_POPUP_CLOSE)
        .show_ui(ui, |ui: &mut Ui| {
            ui.add(
                egui::TextEdit::singleline(&mut state.site_query)
                    .hint_text("Select a Launch Site here"),
            );
            ui.separator();

            let hits = matching_options(&options, &state.site_query);
            if hits.is_empty() {
                ui.weak("No matching sites");
            }
            for opt in hits {
                let selector = opt.selector();
                if ui
                    .selectable_label(selector == current, &opt.label)
                    .clicked()
                {
                    picked = Some(selector);
                    ui.memory_mut(|m| m.close_popup());
                }
            }
        });

    if let Some(site) = picked {
        if state.set_site(site) {
            log::info!("Site selector set to {}", state.controls().site);
        }
    }
}

fn payload_slider(ui: &mut Ui, state: &mut DashboardState) {
    let slider = state.slider;
    let mut range = state.controls().payload;

    ui.label("Payload range (Kg):");
    let low_changed = ui
        .add(
            egui::Slider::new(&mut range.low, slider.min..=slider.max)
                .step_by(slider.step)
                .text("low"),
        )
        .changed();
    let high_changed = ui
        .add(
            egui::Slider::new(&mut range.high, slider.min..=slider.max)
                .step_by(slider.step)
                .text("high"),
        )
        .changed();

    if low_changed || high_changed {
        state.set_payload(couple_bounds(range, low_changed));
    }
}

/// Keep `low <= high` by dragging the untouched bound along with the moved one.
fn couple_bounds(range: PayloadRange, low_moved: bool) -> PayloadRange {
    if range.low <= range.high {
        range
    } else if low_moved {
        PayloadRange::new(range.low, range.low)
    } else {
        PayloadRange::new(range.high, range.high)
    }
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut DashboardState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        reload_from(state, path);
    }
}

/// Replace the table with `path`'s contents, or keep it and report why not.
fn reload_from(state: &mut DashboardState, path: PathBuf) {
    match crate::data::loader::load_launch_data(&path) {
        Ok(table) => state.set_table(table, Some(path)),
        Err(e) => {
            let message = load_error_message(e);
            log::error!("Failed to load file: {message}");
            state.status_message = Some(format!("Error: {message}"));
        }
    }
}

/// Full cause chain, e.g. `CSV row 2: CSV deserialize error: ...`.
fn load_error_message(e: LoadError) -> String {
    format!("{:#}", anyhow::Error::from(e))
}

pub fn export_file_dialog(state: &mut DashboardState) {
    let file = rfd::FileDialog::new()
        .set_title("Export chart data")
        .add_filter("JSON", &["json"])
        .set_file_name("launch_dashboard.json")
        .save_file();

    if let Some(path) = file {
        match export_snapshot(state, &path) {
            Ok(()) => {
                log::info!("Exported chart data to {}", path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

fn export_snapshot(state: &DashboardState, path: &Path) -> Result<()> {
    let json =
        serde_json::to_string_pretty(&state.snapshot()).context("serializing chart data")?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SliderConfig;
    use crate::data::model::{LaunchRecord, LaunchTable, Outcome};

    fn one_launch() -> LaunchTable {
        LaunchTable::new(vec![LaunchRecord {
            launch_site: "KSC LC-39A".to_string(),
            payload_mass_kg: 2490.0,
            outcome: Outcome::Success,
            booster_category: "FT".to_string(),
        }])
    }

    #[test]
    fn site_dropdown_stays_open_for_typing() {
        assert!(matches!(SITE_POPUP_CLOSE, egui::PopupCloseBehavior::CloseOnClickOutside));
    }

    #[test]
    fn site_dropdown_renders_headless() {
        let mut state = DashboardState::new(one_launch(), None, SliderConfig::default());
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| site_dropdown(ui, &mut state));
        });
        assert_eq!(state.controls().site, SiteSelector::All);
    }

    #[test]
    fn failed_reload_keeps_table_and_reports_cause() {
        let mut state = DashboardState::new(one_launch(), None, SliderConfig::default());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(
            &path,
            "Launch Site,class,Payload Mass (kg),Booster Version Category\n\
             CCAFS LC-40,0,0,v1.0\n\
             CCAFS LC-40,1,heavy,v1.0\n",
        )
        .unwrap();

        reload_from(&mut state, path);

        assert_eq!(state.table().len(), 1);
        let status = state.status_message.clone().unwrap();
        assert!(status.starts_with("Error: CSV row 2: "), "{status}");
        assert!(status.len() > "Error: CSV row 2: ".len());
    }

    #[test]
    fn successful_reload_replaces_table() {
        let mut state = DashboardState::new(one_launch(), None, SliderConfig::default());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("good.csv");
        std::fs::write(
            &path,
            "Launch Site,class,Payload Mass (kg),Booster Version Category\n\
             CCAFS LC-40,0,0,v1.0\n\
             VAFB SLC-4E,1,9600,FT\n",
        )
        .unwrap();

        reload_from(&mut state, path.clone());

        assert_eq!(state.table().len(), 2);
        assert_eq!(state.source_path.as_deref(), Some(path.as_path()));
        assert!(state.status_message.is_none());
    }

    #[test]
    fn ordered_range_is_untouched() {
        let range = PayloadRange::new(1000.0, 4000.0);
        assert_eq!(couple_bounds(range, true), range);
        assert_eq!(couple_bounds(range, false), range);
    }

    #[test]
    fn crossed_bounds_follow_the_moved_handle() {
        let crossed = PayloadRange::new(6000.0, 4000.0);
        assert_eq!(couple_bounds(crossed, true), PayloadRange::new(6000.0, 6000.0));
        assert_eq!(couple_bounds(crossed, false), PayloadRange::new(4000.0, 4000.0));
    }

    #[test]
    fn export_writes_pretty_json() {
        let state = DashboardState::new(one_launch(), None, SliderConfig::default());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        export_snapshot(&state, &path).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["proportion"]["title"], "Total Success Launches By Site");
        assert_eq!(written["correlation"]["points"][0]["payload_mass_kg"], 2490.0);
    }

    #[test]
    fn export_to_missing_directory_fails() {
        let state = DashboardState::new(LaunchTable::new(Vec::new()), None, SliderConfig::default());
        let dir = tempfile::tempdir().unwrap();
        let err = export_snapshot(&state, &dir.path().join("no/such/out.json")).unwrap_err();
        assert!(format!("{err:#}").contains("writing"));
    }
}
