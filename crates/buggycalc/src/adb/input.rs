//! Text input for the currently focused field

use super::device::AdbController;
use super::runner::CommandRunner;
use crate::error::Result;
use std::fmt;

/// Android keycode for DEL (backspace)
const KEYCODE_DEL: &str = "67";

/// A value typed into a field, already rendered as text
///
/// Floats keep their fractional part (`1.0` renders as `"1.0"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputValue(String);

impl InputValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InputValue {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for InputValue {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&String> for InputValue {
    fn from(value: &String) -> Self {
        Self(value.clone())
    }
}

impl From<i64> for InputValue {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<i32> for InputValue {
    fn from(value: i32) -> Self {
        Self(value.to_string())
    }
}

impl From<u32> for InputValue {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

impl From<f64> for InputValue {
    fn from(value: f64) -> Self {
        // Debug formatting is the shortest round-trip form and keeps ".0"
        Self(format!("{:?}", value))
    }
}

impl From<f32> for InputValue {
    fn from(value: f32) -> Self {
        Self(format!("{:?}", value))
    }
}

impl<R: CommandRunner> AdbController<R> {
    /// Type `value` into the currently focused input field
    pub fn input_text(&self, value: impl Into<InputValue>) -> Result<()> {
        let value = value.into();
        self.execute_quiet(&["shell", "input", "text", value.as_str()])
    }

    /// Send a single DEL key event, removing one character
    pub fn delete_char(&self) -> Result<()> {
        self.execute_quiet(&["shell", "input", "keyevent", KEYCODE_DEL])
    }
}
