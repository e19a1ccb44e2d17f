//! Page objects
//!
//! - `calculator`: UI operations on the calculator screen
//! - `screenshot`: Screenshot naming and transfer reports

mod calculator;
mod screenshot;

pub use calculator::{CalculatorPage, FieldSnapshot};
pub use screenshot::{
    scenario_screenshot_name, timestamped_screenshot_name, ScreenshotReport,
    DEFAULT_SCREENSHOT_DIR,
};
