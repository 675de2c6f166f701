use serde::Serialize;

use super::model::{LaunchTable, SiteSelector, ALL_SITES};

/// Dropdown label for the ALL sentinel.
pub const ALL_SITES_LABEL: &str = "All Sites";

/// One entry of the site dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteOption {
    pub label: String,
    pub value: String,
}

impl SiteOption {
    pub fn selector(&self) -> SiteSelector {
        SiteSelector::from_value(&self.value)
    }
}

/// Build the dropdown options: the ALL sentinel first, then every distinct
/// site name in ascending order.
pub fn site_options(table: &LaunchTable) -> Vec<SiteOption> {
    let sites = table.distinct_sites();
    let mut options = Vec::with_capacity(sites.len() + 1);
    options.push(SiteOption {
        label: ALL_SITES_LABEL.to_string(),
        value: ALL_SITES.to_string(),
    });
    options.extend(sites.into_iter().map(|site| SiteOption {
        label: site.to_string(),
        value: site.to_string(),
    }));
    options
}

/// Options whose label contains `query` (case-insensitive). An empty query keeps all.
pub fn matching_options<'a>(options: &'a [SiteOption], query: &str) -> Vec<&'a SiteOption> {
    let needle = query.trim().to_lowercase();
    options
        .iter()
        .filter(|opt| needle.is_empty() || opt.label.to_lowercase().contains(&needle))
        .collect()
}
