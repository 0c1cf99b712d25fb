use alloc::string::ToString;

use crate::MutationError;

/// Attribute flagging an element for deferred mutation.
pub const MARKER_ATTRIBUTE: &str = "data-lazy-render";

/// CSS selector matching every marked element.
pub const MARKER_SELECTOR: &str = "[data-lazy-render]";

pub const MARKER_DELIMITER: char = ';';

/// A parsed `"<property>;<value>"` marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mutation<'a> {
    pub property: &'a str,
    pub value: &'a str,
}

/// Parses a marker value.
///
/// Only the first two `;`-separated segments are used: `"src;a.jpg;x"` assigns `"a.jpg"`.
pub fn parse_marker(raw: &str) -> Result<Mutation<'_>, MutationError> {
    let mut parts = raw.split(MARKER_DELIMITER);
    let property = parts.next().unwrap_or_default();
    let Some(value) = parts.next() else {
        return Err(MutationError::MissingDelimiter {
            marker: raw.to_string(),
        });
    };
    if property.is_empty() {
        return Err(MutationError::EmptyProperty {
            marker: raw.to_string(),
        });
    }
    Ok(Mutation { property, value })
}
