//! Browser bindings for the `lazy-render` crate.
//!
//! The `lazy-render` engine is headless. This crate provides the page side of it:
//!
//! - [`WebDocument`]: the engine's `Document` over `web-sys` (marker queries, bounding rects,
//!   `window.innerWidth`/`innerHeight`, property assignment, class list, listeners)
//! - [`WebLazyRender`]: a `wasm-bindgen` class (`LazyRender` in JavaScript) that wires the five
//!   trigger events and a single `setTimeout` to the engine
//!
//! Build with `feature = "tracing"` to forward engine and binding events to `tracing`.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod binding;
mod dom;
mod timer;

#[cfg(all(test, target_arch = "wasm32"))]
mod tests;

pub use binding::{WebLazyRender, options_from_js};
pub use dom::WebDocument;
pub use lazy_render::{ConfigError, MutationError, RendererOptions};
