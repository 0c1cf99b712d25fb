/// Attribute marking the stylesheet injected by a renderer.
pub const STYLE_MARKER_ATTRIBUTE: &str = "data-lazy-render-style";
pub const STYLE_MARKER_VALUE: &str = "lazy-render";

/// Class added to a near element to start its fade-in.
pub const FADE_IN_CLASS: &str = "fade-in";

/// Hides marked elements and fades them in once they carry [`FADE_IN_CLASS`].
pub const STYLESHEET: &str = "\
@keyframes lazyRenderDelayElementIn {
    0% { opacity: 0; }
    100% { opacity: 1; }
}
[data-lazy-render] { opacity: 0 !important; }
[data-lazy-render].fade-in { animation: lazyRenderDelayElementIn 0.4s ease 0.3s normal forwards; }
";

/// The document-wide stylesheet registry.
///
/// A document holds at most one renderer stylesheet, found by scanning style elements for
/// [`STYLE_MARKER_ATTRIBUTE`]. The registry is the document itself, so independent renderer
/// instances agree without sharing any Rust state.
pub trait StyleSink {
    /// Whether any style element already carries a non-empty [`STYLE_MARKER_ATTRIBUTE`].
    fn has_marked_style(&self) -> bool;

    /// Appends a style element carrying `marker_attribute="marker_value"` and `css` to the head.
    fn append_style(&mut self, marker_attribute: &str, marker_value: &str, css: &str);
}

/// Injects [`STYLESHEET`] unless the document already has one.
///
/// Returns `true` when a style element was appended.
pub fn ensure_stylesheet<S: StyleSink + ?Sized>(sink: &mut S) -> bool {
    if sink.has_marked_style() {
        return false;
    }
    sink.append_style(STYLE_MARKER_ATTRIBUTE, STYLE_MARKER_VALUE, STYLESHEET);
    true
}
