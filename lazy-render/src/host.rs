use alloc::string::String;
use alloc::vec::Vec;

use crate::{Rect, StyleSink, Viewport};

/// Where a trigger event's listener lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListenerTarget {
    Document,
    Window,
}

/// Browser lifecycle events that schedule a pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriggerEvent {
    ContentLoaded,
    Scroll,
    Load,
    Resize,
    OrientationChange,
}

impl TriggerEvent {
    pub const ALL: [TriggerEvent; 5] = [
        TriggerEvent::ContentLoaded,
        TriggerEvent::Scroll,
        TriggerEvent::Load,
        TriggerEvent::Resize,
        TriggerEvent::OrientationChange,
    ];

    /// The DOM event type name.
    pub fn event_name(self) -> &'static str {
        match self {
            Self::ContentLoaded => "DOMContentLoaded",
            Self::Scroll => "scroll",
            Self::Load => "load",
            Self::Resize => "resize",
            Self::OrientationChange => "orientationchange",
        }
    }

    pub fn target(self) -> ListenerTarget {
        match self {
            Self::ContentLoaded => ListenerTarget::Document,
            _ => ListenerTarget::Window,
        }
    }

    pub fn from_event_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.event_name() == name)
    }
}

/// The host page as seen by a renderer.
///
/// The renderer never creates or destroys elements. It only reads marker values and geometry,
/// assigns the named property, toggles the fade-in class and finally removes the marker.
pub trait Document: StyleSink {
    /// A cheap handle to a host element.
    type Element: Clone;

    /// Every element currently carrying [`crate::MARKER_ATTRIBUTE`], in document order.
    fn marked_elements(&self) -> Vec<Self::Element>;

    fn marked_count(&self) -> usize {
        self.marked_elements().len()
    }

    fn viewport(&self) -> Viewport;

    fn bounding_rect(&self, element: &Self::Element) -> Rect;

    /// The raw marker value, if the element still carries one.
    fn marker(&self, element: &Self::Element) -> Option<String>;

    /// Assigns `element[property] = value`.
    fn set_property(
        &mut self,
        element: &Self::Element,
        property: &str,
        value: &str,
    ) -> Result<(), String>;

    fn has_class(&self, element: &Self::Element, class: &str) -> bool;

    fn add_class(&mut self, element: &Self::Element, class: &str);

    fn remove_class(&mut self, element: &Self::Element, class: &str);

    fn remove_marker(&mut self, element: &Self::Element);

    fn attach_listener(&mut self, event: TriggerEvent);

    fn detach_listener(&mut self, event: TriggerEvent);
}
