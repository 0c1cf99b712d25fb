use alloc::string::String;

/// A rejected renderer configuration. Fatal to construction.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "The distance from viewport for rendering must be a number, preferably 0-100 (got {found}). \
         A default value of 50 is used if this is not defined. 0 renders an element when it is \
         immediately outside the viewport. 100 renders it when it is a full viewport height or \
         width away from being in view."
    )]
    InvalidDistanceThreshold { found: String },
    #[error("renderer options must be an object (got {found})")]
    NotAnObject { found: String },
}

/// A per-element failure during a pass.
///
/// These never abort a pass. They are only surfaced through
/// [`crate::RendererOptions::on_error`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MutationError {
    #[error("element no longer carries a marker value")]
    MissingMarker,
    #[error("marker value {marker:?} has no `;` delimiter")]
    MissingDelimiter { marker: String },
    #[error("marker value {marker:?} names an empty property")]
    EmptyProperty { marker: String },
    #[error("assigning property `{property}` failed: {reason}")]
    Assignment { property: String, reason: String },
}
