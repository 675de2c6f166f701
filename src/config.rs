use std::path::{Path, PathBuf};

/// File name of the launch dataset inside the data directory.
pub const DATA_FILE_NAME: &str = "spacex_launch_dash.csv";

// ---------------------------------------------------------------------------
// Slider geometry
// ---------------------------------------------------------------------------

/// Fixed display bounds of the payload range selector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10_000.0,
            step: 1_000.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// CSV loaded at startup.
    pub data_path: PathBuf,
    pub slider: SliderConfig,
}

impl DashboardConfig {
    /// Configuration with the dataset resolved from the fixed data directory.
    pub fn resolve() -> Self {
        let data_dir = resolve_data_dir(&data_dir_candidates());
        Self {
            data_path: data_dir.join(DATA_FILE_NAME),
            slider: SliderConfig::default(),
        }
    }
}

/// `<executable dir>/data`, then `<crate dir>/data`.
fn data_dir_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::with_capacity(2);
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.push(exe_dir.join("data"));
    }
    candidates.push(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"));
    candidates
}

/// First candidate that is an existing directory, else the first candidate so
/// the startup error names a concrete location.
pub fn resolve_data_dir(candidates: &[PathBuf]) -> PathBuf {
    candidates
        .iter()
        .find(|dir| dir.is_dir())
        .or_else(|| candidates.first())
        .cloned()
        .unwrap_or_else(|| PathBuf::from("data"))
}
