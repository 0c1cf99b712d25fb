//! A headless viewport-proximity loader.
//!
//! For browser bindings (DOM queries, timers, event listeners), see the `lazy-render-web` crate.
//!
//! Elements opt in with a `data-lazy-render="<property>;<value>"` marker (e.g. `"src;photo.jpg"`).
//! Once such an element comes within a configurable distance of the viewport, the renderer
//! assigns `element[property] = value`, adds the `fade-in` class to play a CSS fade, and after
//! the animation removes both the class and the marker.
//!
//! It is UI-agnostic. A host layer is expected to provide:
//! - the marked elements, their bounding rects and the viewport size (via [`Document`])
//! - the trigger events (scroll, resize, load, ...) and a clock (`now_ms`)
//! - a timer that calls [`LazyRender::tick`] at [`LazyRender::next_deadline`]
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod geometry;
mod host;
mod marker;
mod options;
mod renderer;
mod schedule;
mod state;
mod style;


pub use error::{ConfigError, MutationError};
pub use geometry::{Rect, Viewport, is_near};
pub use host::{Document, ListenerTarget, TriggerEvent};
pub use marker::{MARKER_ATTRIBUTE, MARKER_DELIMITER, MARKER_SELECTOR, Mutation, parse_marker};
pub use options::{
    DEFAULT_CLEANUP_DELAY_MS, DEFAULT_DEBOUNCE_MS, DEFAULT_DISTANCE_THRESHOLD, ErrorObserver,
    FadeCallback, RendererOptions, invalid_threshold,
};
pub use renderer::LazyRender;
pub use schedule::{CleanupQueue, Debounce};
pub use state::RenderStats;
pub use style::{
    FADE_IN_CLASS, STYLE_MARKER_ATTRIBUTE, STYLE_MARKER_VALUE, STYLESHEET, StyleSink,
    ensure_stylesheet,
};
