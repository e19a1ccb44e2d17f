//! Addressable calculator fields and their resource-id keys

use crate::error::HarnessError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Package name of the calculator under test
pub const DEFAULT_PACKAGE: &str = "com.admsqa.buggycalc";

/// Launch activity of the calculator under test
pub const DEFAULT_ACTIVITY: &str = ".MainActivity";

/// One addressable calculator UI element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Field {
    #[serde(rename = "=")]
    Result,
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "/")]
    Divide,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "first_number")]
    FirstNumber,
    #[serde(rename = "second_number")]
    SecondNumber,
}

impl Field {
    /// Every field, in lookup-table order
    pub const ALL: [Field; 7] = [
        Field::Result,
        Field::Add,
        Field::Subtract,
        Field::Divide,
        Field::Multiply,
        Field::FirstNumber,
        Field::SecondNumber,
    ];

    /// The two numeric inputs, in the order they are cleared
    pub const INPUTS: [Field; 2] = [Field::FirstNumber, Field::SecondNumber];

    /// Symbolic name used by scenarios and the CLI
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Result => "=",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Divide => "/",
            Self::Multiply => "*",
            Self::FirstNumber => "first_number",
            Self::SecondNumber => "second_number",
        }
    }

    /// Key after `:id/` in the element's resource-id
    pub fn resource_key(&self) -> &'static str {
        match self {
            Self::Result => "resultView",
            Self::Add => "addButton",
            Self::Subtract => "subtractButton",
            Self::Divide => "divideButton",
            Self::Multiply => "multiplyButton",
            Self::FirstNumber => "input1",
            Self::SecondNumber => "input2",
        }
    }

    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            Self::Add | Self::Subtract | Self::Divide | Self::Multiply
        )
    }

    /// Fully-qualified resource-id for `package`
    pub fn resource_id(&self, package: &str) -> String {
        format!("{}:id/{}", package, self.resource_key())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Field {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.symbol() == s)
            .ok_or_else(|| HarnessError::InvalidField {
                field: s.to_string(),
                valid: list_valid_fields(),
            })
    }
}

/// Valid symbolic names rendered as `['=', '+', ...]`
pub fn list_valid_fields() -> String {
    let names: Vec<String> = Field::ALL
        .iter()
        .map(|field| format!("'{}'", field.symbol()))
        .collect();
    format!("[{}]", names.join(", "))
}
