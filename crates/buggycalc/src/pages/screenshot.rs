//! Screenshot naming and the report returned after a transfer

use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default local directory for pulled screenshots
pub const DEFAULT_SCREENSHOT_DIR: &str = "logs/screenshots";

/// A screenshot that now lives on the local machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenshotReport {
    pub path: PathBuf,
    /// `(width, height)` when the file decodes as an image
    pub dimensions: Option<(u32, u32)>,
}

impl ScreenshotReport {
    /// Describe the file at `path`, probing its image header
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let dimensions = match image::image_dimensions(&path) {
            Ok(dimensions) => Some(dimensions),
            Err(e) => {
                warn!("Could not read screenshot {}: {}", path.display(), e);
                None
            }
        };
        Self { path, dimensions }
    }
}

/// `"Add Two Numbers"` becomes `"add_two_numbers"`
pub fn scenario_screenshot_name(scenario: &str) -> String {
    scenario.split(' ').collect::<Vec<_>>().join("_").to_lowercase()
}

/// Format: `screenshot_yyyy-mm-dd_HH-MM-SS-mmm`
pub fn timestamped_screenshot_name() -> String {
    let now: DateTime<Local> = Local::now();
    format!("screenshot_{}", now.format("%Y-%m-%d_%H-%M-%S-%3f"))
}
