use alloc::rc::Rc;
use alloc::string::{String, ToString};

use serde_json::Value;

use crate::{ConfigError, MutationError};

/// Default proximity margin, in percent of the viewport size.
pub const DEFAULT_DISTANCE_THRESHOLD: f64 = 50.0;

/// Trailing-edge debounce delay between a trigger event and the pass it schedules.
pub const DEFAULT_DEBOUNCE_MS: u64 = 10;

/// Delay between starting a fade-in and removing the transition class and marker.
pub const DEFAULT_CLEANUP_DELAY_MS: u64 = 700;

/// A callback fired once per element, when its fade-in starts.
pub type FadeCallback = Rc<dyn Fn()>;

/// An observer for per-element failures that a pass otherwise swallows.
pub type ErrorObserver = Rc<dyn Fn(&MutationError)>;

/// Configuration for [`crate::LazyRender`].
///
/// Callbacks are stored in `Rc`s: the renderer lives on a single event loop thread.
#[derive(Clone)]
pub struct RendererOptions {
    /// Percentage of the viewport height/width by which the "near" region extends past each
    /// edge. Not clamped: negative values shrink the region, values above 100 grow it further.
    pub distance_threshold: f64,

    pub callback: Option<FadeCallback>,

    /// Opt-in visibility for per-element failures. Without it, failures are discarded.
    pub on_error: Option<ErrorObserver>,

    pub debounce_ms: u64,
    pub cleanup_delay_ms: u64,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl RendererOptions {
    pub fn new() -> Self {
        Self {
            distance_threshold: DEFAULT_DISTANCE_THRESHOLD,
            callback: None,
            on_error: None,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            cleanup_delay_ms: DEFAULT_CLEANUP_DELAY_MS,
        }
    }

    /// Reads options from a loosely typed, JS-style options object.
    ///
    /// Recognized key: `distanceThreshold`. A missing key (or a `null` options value) keeps the
    /// default; a present key holding anything but a number is rejected.
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        let options = Self::new();
        let map = match value {
            Value::Null => return Ok(options),
            Value::Object(map) => map,
            other => {
                return Err(ConfigError::NotAnObject {
                    found: json_type_name(other).to_string(),
                });
            }
        };

        match map.get("distanceThreshold") {
            None => Ok(options),
            Some(Value::Number(n)) => {
                let threshold = n.as_f64().ok_or_else(|| invalid_threshold("number"))?;
                Ok(options.with_distance_threshold(threshold))
            }
            Some(other) => Err(invalid_threshold(json_type_name(other))),
        }
    }

    pub fn with_distance_threshold(mut self, distance_threshold: f64) -> Self {
        self.distance_threshold = distance_threshold;
        self
    }

    pub fn with_callback(mut self, callback: impl Fn() + 'static) -> Self {
        self.callback = Some(Rc::new(callback));
        self
    }

    pub fn with_on_error(mut self, on_error: impl Fn(&MutationError) + 'static) -> Self {
        self.on_error = Some(Rc::new(on_error));
        self
    }

    pub fn with_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    pub fn with_cleanup_delay_ms(mut self, cleanup_delay_ms: u64) -> Self {
        self.cleanup_delay_ms = cleanup_delay_ms;
        self
    }

    pub(crate) fn notify_fade(&self) {
        if let Some(cb) = &self.callback {
            cb();
        }
    }

    pub(crate) fn report_error(&self, err: &MutationError) {
        if let Some(observer) = &self.on_error {
            observer(err);
        }
    }
}

impl core::fmt::Debug for RendererOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RendererOptions")
            .field("distance_threshold", &self.distance_threshold)
            .field("callback", &self.callback.is_some())
            .field("on_error", &self.on_error.is_some())
            .field("debounce_ms", &self.debounce_ms)
            .field("cleanup_delay_ms", &self.cleanup_delay_ms)
            .finish()
    }
}

/// Builds the error for a `distanceThreshold` of the given (JS-style) type name.
pub fn invalid_threshold(found: &str) -> ConfigError {
    ConfigError::InvalidDistanceThreshold {
        found: String::from(found),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
