//! Configuration module for buggycalc
//!
//! This module contains:
//! - `fields`: The closed table of addressable calculator fields
//! - `timing`: Command timeout and settle delays

mod fields;
mod timing;

pub use fields::{list_valid_fields, Field, DEFAULT_ACTIVITY, DEFAULT_PACKAGE};
pub(crate) use timing::secs_duration;
pub use timing::{CommandTimingConfig, PageTimingConfig, TimingConfig, TIMING_CONFIG};
