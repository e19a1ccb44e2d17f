//! Element lookup over uiautomator hierarchy dumps
//!
//! Lookups are plain pattern searches over the dump text rather than a tree
//! walk. The first matching element wins.

use crate::config::Field;
use crate::error::{HarnessError, Result};
use regex::{Captures, Regex};
use serde::Serialize;
use tracing::debug;

/// Screen rectangle of an element, in device pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bounds {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Bounds {
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Midpoint of the rectangle, truncated towards zero
    pub fn center(&self) -> (u32, u32) {
        let mid = |a: u32, b: u32| ((u64::from(a) + u64::from(b)) / 2) as u32;
        (mid(self.left, self.right), mid(self.top, self.bottom))
    }
}

/// Extracts element bounds and text for one application package
#[derive(Debug, Clone)]
pub struct UiParser {
    package_name: String,
}

impl UiParser {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
        }
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// Bounds of the element named `name`, or `None` when it is not in the dump
    ///
    /// Fails with [`HarnessError::InvalidField`] for names outside the field
    /// table, before the dump is searched.
    pub fn bounds_of(&self, dump: &str, name: &str) -> Result<Option<Bounds>> {
        let field: Field = name.parse()?;
        self.element_bounds(dump, field)
    }

    /// Text displayed by the element named `name`
    ///
    /// A missing element is an error here ([`HarnessError::ResultNotFound`]),
    /// unlike [`UiParser::bounds_of`].
    pub fn text_of(&self, dump: &str, name: &str) -> Result<String> {
        let field: Field = name.parse()?;
        self.element_text(dump, field)
    }

    pub fn element_bounds(&self, dump: &str, field: Field) -> Result<Option<Bounds>> {
        debug!(
            "Starting element parse operation for: {}",
            field.resource_key()
        );
        debug!("Processing XML content: {}", dump);

        let pattern = format!(
            r#"(?s)resource-id="{}".*?bounds="\[(\d+),(\d+)\]\[(\d+),(\d+)\]""#,
            regex::escape(&field.resource_id(&self.package_name))
        );
        debug!("Searching for pattern: '{}'", pattern);

        let regex = Regex::new(&pattern)?;
        let Some(caps) = regex.captures(dump) else {
            return Ok(None);
        };

        Ok(Some(Bounds::new(
            coordinate(&caps, 1)?,
            coordinate(&caps, 2)?,
            coordinate(&caps, 3)?,
            coordinate(&caps, 4)?,
        )))
    }

    pub fn element_text(&self, dump: &str, field: Field) -> Result<String> {
        debug!(
            "Starting result parse operation for: {}",
            field.resource_key()
        );
        debug!("Processing XML content: {}", dump);

        let pattern = format!(
            r#"text="([^"]*)" resource-id="{}""#,
            regex::escape(&field.resource_id(&self.package_name))
        );
        debug!("Searching for pattern: '{}'", pattern);

        let regex = Regex::new(&pattern)?;
        regex
            .captures(dump)
            .map(|caps| caps[1].to_string())
            .ok_or_else(|| {
                HarnessError::ResultNotFound(format!(
                    "Result text not found for element with text '{}'",
                    field
                ))
            })
    }
}

fn coordinate(caps: &Captures<'_>, group: usize) -> Result<u32> {
    caps[group]
        .parse()
        .map_err(|e| HarnessError::Parse(format!("Invalid bounds value '{}': {}", &caps[group], e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_PACKAGE;
    use crate::testing::UI_DUMP;

    fn parser() -> UiParser {
        UiParser::new(DEFAULT_PACKAGE)
    }

    #[test]
    fn test_bounds_of_matches_every_field() {
        let expected = [
            ("=", Bounds::new(44, 127, 1036, 303)),
            ("+", Bounds::new(44, 551, 1036, 683)),
            ("-", Bounds::new(44, 683, 1036, 815)),
            ("/", Bounds::new(44, 815, 1036, 947)),
            ("*", Bounds::new(44, 947, 1036, 1079)),
            ("first_number", Bounds::new(44, 303, 1036, 427)),
            ("second_number", Bounds::new(44, 427, 1036, 551)),
        ];
        for (name, bounds) in expected {
            assert_eq!(
                parser().bounds_of(UI_DUMP, name).unwrap(),
                Some(bounds),
                "field {name}"
            );
        }
    }

    #[test]
    fn test_bounds_of_empty_dump_is_absent() {
        for field in Field::ALL {
            assert_eq!(parser().bounds_of("", field.symbol()).unwrap(), None);
        }
    }

    #[test]
    fn test_bounds_of_invalid_field() {
        let err = parser().bounds_of(UI_DUMP, "^").unwrap_err();
        assert!(matches!(err, HarnessError::InvalidField { .. }));
    }

    #[test]
    fn test_bounds_of_literal_element() {
        let dump = r#"<node text="+" resource-id="com.admsqa.buggycalc:id/addButton" class="android.widget.Button" bounds="[44,551][1036,683]" />"#;
        assert_eq!(
            parser().bounds_of(dump, "+").unwrap(),
            Some(Bounds::new(44, 551, 1036, 683))
        );
    }

    #[test]
    fn test_bounds_of_first_match_wins() {
        let dump = concat!(
            r#"<node resource-id="com.admsqa.buggycalc:id/addButton" bounds="[1,2][3,4]" />"#,
            r#"<node resource-id="com.admsqa.buggycalc:id/addButton" bounds="[5,6][7,8]" />"#,
        );
        assert_eq!(
            parser().bounds_of(dump, "+").unwrap(),
            Some(Bounds::new(1, 2, 3, 4))
        );
    }

    #[test]
    fn test_bounds_of_spans_lines() {
        let dump = "<node resource-id=\"com.admsqa.buggycalc:id/input1\"\n class=\"android.widget.EditText\"\n bounds=\"[10,20][30,40]\" />";
        assert_eq!(
            parser().bounds_of(dump, "first_number").unwrap(),
            Some(Bounds::new(10, 20, 30, 40))
        );
    }

    #[test]
    fn test_bounds_of_other_package_is_absent() {
        let parser = UiParser::new("com.example.other");
        assert_eq!(parser.bounds_of(UI_DUMP, "+").unwrap(), None);
    }

    #[test]
    fn test_bounds_of_overflowing_value_is_parse_error() {
        let dump = r#"<node resource-id="com.admsqa.buggycalc:id/addButton" bounds="[99999999999,0][1,1]" />"#;
        let err = parser().bounds_of(dump, "+").unwrap_err();
        assert!(matches!(err, HarnessError::Parse(_)));
    }

    #[test]
    fn test_text_of_matches_every_field() {
        let expected = [
            ("=", "102.0"),
            ("+", "+"),
            ("-", "-"),
            ("/", "/"),
            ("*", "*"),
            ("first_number", "100"),
            ("second_number", "2"),
        ];
        for (name, text) in expected {
            assert_eq!(parser().text_of(UI_DUMP, name).unwrap(), text, "field {name}");
        }
    }

    #[test]
    fn test_text_of_empty_dump_is_result_not_found() {
        for field in Field::ALL {
            let err = parser().text_of("", field.symbol()).unwrap_err();
            assert!(matches!(err, HarnessError::ResultNotFound(_)));
        }
    }

    #[test]
    fn test_text_of_invalid_field() {
        let err = parser().text_of("", "^").unwrap_err();
        assert!(matches!(err, HarnessError::InvalidField { .. }));
    }

    #[test]
    fn test_text_of_requires_text_before_resource_id() {
        let dump = r#"<node resource-id="com.admsqa.buggycalc:id/resultView" text="3.0" />"#;
        let err = parser().text_of(dump, "=").unwrap_err();
        assert!(matches!(err, HarnessError::ResultNotFound(_)));
    }

    #[test]
    fn test_text_of_placeholder_prompt() {
        let dump = include_str!("../tests/resources/ui_dump_empty_inputs.xml");
        assert_eq!(
            parser().text_of(dump, "first_number").unwrap(),
            "Enter the first number"
        );
        assert_eq!(parser().text_of(dump, "=").unwrap(), "");
    }

    #[test]
    fn test_center() {
        assert_eq!(Bounds::new(44, 551, 1036, 683).center(), (540, 617));
        assert_eq!(Bounds::new(1, 2, 3, 4).center(), (2, 3));
        assert_eq!(Bounds::new(0, 0, 1, 1).center(), (0, 0));
    }
}
