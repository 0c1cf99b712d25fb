use crate::schedule::{CleanupQueue, Debounce};
use crate::style::ensure_stylesheet;
use crate::{
    Document, FADE_IN_CLASS, MutationError, RenderStats, RendererOptions, TriggerEvent, is_near,
    parse_marker,
};

/// A headless viewport-proximity loader.
///
/// This type is UI-agnostic:
/// - It does not hold any browser objects itself; the host supplies a [`Document`].
/// - The host drives time: forward trigger events via [`LazyRender::on_event`], and call
///   [`LazyRender::tick`] once [`LazyRender::next_deadline`] is reached.
///
/// Lifecycle:
/// - Construction injects the shared stylesheet (once per document) and attaches listeners only
///   if at least one marked element exists.
/// - Each trigger event (re)arms a debounce; when it fires, one pass evaluates every marked
///   element, mutates and fades in the near ones, and queues their cleanup.
/// - Once no marked element remains, listeners are detached for good.
pub struct LazyRender<D: Document> {
    document: D,
    options: RendererOptions,
    debounce: Debounce,
    cleanups: CleanupQueue<D::Element>,
    listening: bool,
    stats: RenderStats,
}

impl<D: Document> LazyRender<D> {
    pub fn new(document: D, options: RendererOptions) -> Self {
        let mut document = document;
        if ensure_stylesheet(&mut document) {
            ldebug!("LazyRender: injected stylesheet");
        }

        let marked = document.marked_count();
        ldebug!(
            distance_threshold = options.distance_threshold,
            marked,
            "LazyRender::new"
        );

        let mut renderer = Self {
            debounce: Debounce::new(options.debounce_ms),
            cleanups: CleanupQueue::new(options.cleanup_delay_ms),
            document,
            options,
            listening: false,
            stats: RenderStats::default(),
        };
        if marked > 0 {
            renderer.attach_listeners();
        }
        renderer
    }

    pub fn options(&self) -> &RendererOptions {
        &self.options
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn into_document(self) -> D {
        self.document
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// No listeners are attached and nothing is pending: the renderer will never act again.
    pub fn is_dormant(&self) -> bool {
        !self.listening && !self.debounce.is_pending() && self.cleanups.is_empty()
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    pub fn pending_cleanups(&self) -> usize {
        self.cleanups.len()
    }

    /// The earliest time at which [`LazyRender::tick`] has work to do.
    pub fn next_deadline(&self) -> Option<u64> {
        match (self.debounce.deadline(), self.cleanups.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Handles a trigger event: replaces any pending pass with one `debounce_ms` from now.
    ///
    /// Ignored once listeners are detached (or were never attached).
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn on_event(&mut self, event: TriggerEvent, now_ms: u64) {
        if !self.listening {
            return;
        }
        let deadline = self.debounce.trigger(now_ms);
        ltrace!(?event, now_ms, deadline, "LazyRender::on_event");
    }

    /// Runs every pass and cleanup due at or before `now_ms`, in deadline order.
    ///
    /// A pass runs at `now_ms` however late the tick is, so the cleanups it queues are due a full
    /// `cleanup_delay_ms` after the fade-in actually starts.
    pub fn tick(&mut self, now_ms: u64) {
        loop {
            let pass_due = self.debounce.deadline().filter(|&d| d <= now_ms);
            let cleanup_due = self.cleanups.next_deadline().filter(|&d| d <= now_ms);
            match (pass_due, cleanup_due) {
                (None, None) => break,
                (Some(pass), Some(cleanup)) if cleanup <= pass => self.run_cleanups(cleanup),
                (Some(_), _) => {
                    if self.debounce.fire(now_ms).is_some() {
                        self.run_pass(now_ms);
                    }
                }
                (None, Some(cleanup)) => self.run_cleanups(cleanup),
            }
        }
    }

    fn run_pass(&mut self, at_ms: u64) {
        let elements = self.document.marked_elements();
        let viewport = self.document.viewport();
        let threshold = self.options.distance_threshold;
        ltrace!(at_ms, marked = elements.len(), "LazyRender: pass start");

        for element in elements {
            self.stats.elements_evaluated += 1;
            let rect = self.document.bounding_rect(&element);
            if !is_near(rect, threshold, viewport) {
                continue;
            }

            match self.apply_mutation(&element) {
                Ok(()) => self.stats.mutations_applied += 1,
                Err(err) => {
                    self.stats.mutation_errors += 1;
                    ldebug!(error = %err, "LazyRender: swallowed element error");
                    self.options.report_error(&err);
                }
            }

            if !self.document.has_class(&element, FADE_IN_CLASS) {
                self.document.add_class(&element, FADE_IN_CLASS);
                self.stats.fades_started += 1;
                self.options.notify_fade();
            }

            self.cleanups.schedule(element, at_ms);
        }

        self.stats.passes += 1;
        let remaining = self.document.marked_count();
        ltrace!(remaining, "LazyRender: pass end");
        if remaining == 0 {
            self.detach_listeners();
        }
    }

    fn apply_mutation(&mut self, element: &D::Element) -> Result<(), MutationError> {
        let raw = self
            .document
            .marker(element)
            .ok_or(MutationError::MissingMarker)?;
        let mutation = parse_marker(&raw)?;
        self.document
            .set_property(element, mutation.property, mutation.value)
            .map_err(|reason| MutationError::Assignment {
                property: mutation.property.into(),
                reason,
            })
    }

    fn run_cleanups(&mut self, at_ms: u64) {
        let due = self.cleanups.drain_due(at_ms);
        ltrace!(at_ms, count = due.len(), "LazyRender: cleanup");
        for element in due {
            self.document.remove_class(&element, FADE_IN_CLASS);
            self.document.remove_marker(&element);
            self.stats.cleanups_run += 1;
        }

        // The last cleanup is what usually empties the document.
        if self.listening && self.document.marked_count() == 0 {
            self.detach_listeners();
        }
    }

    fn attach_listeners(&mut self) {
        for event in TriggerEvent::ALL {
            self.document.attach_listener(event);
        }
        self.listening = true;
        ldebug!("LazyRender: listeners attached");
    }

    fn detach_listeners(&mut self) {
        if !self.listening {
            return;
        }
        for event in TriggerEvent::ALL {
            self.document.detach_listener(event);
        }
        self.listening = false;
        ldebug!("LazyRender: listeners detached");
    }
}

impl<D: Document + core::fmt::Debug> core::fmt::Debug for LazyRender<D>
where
    D::Element: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LazyRender")
            .field("document", &self.document)
            .field("options", &self.options)
            .field("debounce", &self.debounce)
            .field("cleanups", &self.cleanups)
            .field("listening", &self.listening)
            .field("stats", &self.stats)
            .finish()
    }
}
