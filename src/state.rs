use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::color::CategoryColors;
use crate::config::SliderConfig;
use crate::data::aggregate::{
    correlation_chart, proportion_chart, CorrelationChart, ProportionChart,
};
use crate::data::model::{LaunchTable, PayloadRange, SiteSelector};
use crate::data::options::{site_options, SiteOption};

// ---------------------------------------------------------------------------
// Controls and subscriptions
// ---------------------------------------------------------------------------

/// User controls that publish change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlId {
    Site,
    Payload,
}

/// Derived charts that subscribe to controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartId {
    Proportion,
    Correlation,
}

impl ChartId {
    fn slot(self) -> usize {
        match self {
            ChartId::Proportion => 0,
            ChartId::Correlation => 1,
        }
    }
}

/// A chart and the controls it recomputes on.
#[derive(Debug, Clone, Copy)]
pub struct Subscription {
    pub chart: ChartId,
    pub inputs: &'static [ControlId],
}

/// The pie depends on the site only; the scatter on both controls.
pub const SUBSCRIPTIONS: [Subscription; 2] = [
    Subscription {
        chart: ChartId::Proportion,
        inputs: &[ControlId::Site],
    },
    Subscription {
        chart: ChartId::Correlation,
        inputs: &[ControlId::Site, ControlId::Payload],
    },
];

/// Current control values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Controls {
    pub site: SiteSelector,
    pub payload: PayloadRange,
}

/// Serializable view of the current dashboard outputs.
#[derive(Debug, Serialize)]
pub struct DashboardSnapshot<'a> {
    pub site_options: &'a [SiteOption],
    pub controls: &'a Controls,
    pub proportion: &'a ProportionChart,
    pub correlation: &'a CorrelationChart,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct DashboardState {
    /// Loaded table. Replaced on reload, never mutated.
    table: Arc<LaunchTable>,

    /// File the table was read from.
    pub source_path: Option<PathBuf>,

    /// Site dropdown entries, rebuilt only when the table changes.
    site_options: Vec<SiteOption>,

    /// Booster category colours for the scatter chart.
    pub booster_colors: CategoryColors,

    pub slider: SliderConfig,

    controls: Controls,
    subscriptions: Vec<Subscription>,

    proportion: ProportionChart,
    correlation: CorrelationChart,
    revisions: [u64; 2],

    /// Text typed into the site dropdown's search box.
    pub site_query: String,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl DashboardState {
    pub fn new(table: LaunchTable, source_path: Option<PathBuf>, slider: SliderConfig) -> Self {
        let table = Arc::new(table);
        let controls = default_controls(&table, &slider);
        let state = Self {
            site_options: site_options(&table),
            booster_colors: CategoryColors::new(table.distinct_booster_categories()),
            proportion: proportion_chart(&table, &controls.site),
            correlation: correlation_chart(&table, &controls.site, controls.payload),
            table,
            source_path,
            slider,
            controls,
            subscriptions: SUBSCRIPTIONS.to_vec(),
            revisions: [1, 1],
            site_query: String::new(),
            status_message: None,
        };
        state.log_table_summary();
        state
    }

    /// Swap in a freshly loaded table and reset every control to its default.
    pub fn set_table(&mut self, table: LaunchTable, source_path: Option<PathBuf>) {
        self.table = Arc::new(table);
        self.source_path = source_path;
        self.site_options = site_options(&self.table);
        self.booster_colors = CategoryColors::new(self.table.distinct_booster_categories());
        self.controls = default_controls(&self.table, &self.slider);
        self.site_query.clear();
        self.status_message = None;
        self.recompute(ChartId::Proportion);
        self.recompute(ChartId::Correlation);
        self.log_table_summary();
    }

    pub fn table(&self) -> &LaunchTable {
        &self.table
    }

    pub fn site_options(&self) -> &[SiteOption] {
        &self.site_options
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn proportion(&self) -> &ProportionChart {
        &self.proportion
    }

    pub fn correlation(&self) -> &CorrelationChart {
        &self.correlation
    }

    /// Number of times a chart has been computed since construction.
    pub fn revision(&self, chart: ChartId) -> u64 {
        self.revisions[chart.slot()]
    }

    /// Change the site selector. Returns whether the value actually changed.
    pub fn set_site(&mut self, site: SiteSelector) -> bool {
        if self.controls.site == site {
            return false;
        }
        self.controls.site = site;
        self.publish(ControlId::Site);
        true
    }

    /// Change the payload range. Returns whether the value actually changed.
    pub fn set_payload(&mut self, payload: PayloadRange) -> bool {
        if self.controls.payload == payload {
            return false;
        }
        self.controls.payload = payload;
        self.publish(ControlId::Payload);
        true
    }

    pub fn snapshot(&self) -> DashboardSnapshot<'_> {
        DashboardSnapshot {
            site_options: &self.site_options,
            controls: &self.controls,
            proportion: &self.proportion,
            correlation: &self.correlation,
        }
    }

    /// Notify every chart subscribed to `control`.
    fn publish(&mut self, control: ControlId) {
        let targets: Vec<ChartId> = self
            .subscriptions
            .iter()
            .filter(|sub| sub.inputs.contains(&control))
            .map(|sub| sub.chart)
            .collect();
        for chart in targets {
            self.recompute(chart);
        }
    }

    fn recompute(&mut self, chart: ChartId) {
        let Controls { site, payload } = &self.controls;
        match chart {
            ChartId::Proportion => {
                self.proportion = proportion_chart(&self.table, site);
                log::debug!(
                    "pie recomputed for {site}: {} slices (revision {})",
                    self.proportion.slices.len(),
                    self.revision(chart) + 1
                );
            }
            ChartId::Correlation => {
                self.correlation = correlation_chart(&self.table, site, *payload);
                log::debug!(
                    "scatter recomputed for {site} in [{}, {}]: {} points (revision {})",
                    payload.low,
                    payload.high,
                    self.correlation.points.len(),
                    self.revision(chart) + 1
                );
            }
        }
        self.revisions[chart.slot()] += 1;
    }

    fn log_table_summary(&self) {
        let source = self
            .source_path
            .as_deref()
            .map(Path::display)
            .map(|p| p.to_string())
            .unwrap_or_else(|| "<memory>".to_string());
        if self.table.is_empty() {
            log::warn!("{source} contains no launch records");
            return;
        }
        log::info!(
            "Loaded {} launches ({} successful) from {source}: {} sites, payload range [{}, {}]",
            self.table.len(),
            self.table.success_count(),
            self.site_options.len() - 1,
            self.controls.payload.low,
            self.controls.payload.high
        );
    }
}

/// ALL sites and the observed payload span (slider bounds for an empty table).
pub fn default_controls(table: &LaunchTable, slider: &SliderConfig) -> Controls {
    let (low, high) = table.payload_bounds().unwrap_or((slider.min, slider.max));
    Controls {
        site: SiteSelector::All,
        payload: PayloadRange::new(low, high),
    }
}
