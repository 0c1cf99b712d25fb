use std::cell::Cell;
use std::rc::Rc;

use lazy_render::{
    Document, LazyRender, MARKER_ATTRIBUTE, Rect, RendererOptions, StyleSink, TriggerEvent,
    Viewport,
};

// A vertical gallery of 300px-tall images inside a scrolling window.
struct Gallery {
    viewport: Viewport,
    scroll_y: f64,
    images: Vec<Image>,
    has_style: bool,
}

struct Image {
    top: f64,
    marker: Option<String>,
    src: Option<String>,
    fading: bool,
}

impl StyleSink for Gallery {
    fn has_marked_style(&self) -> bool {
        self.has_style
    }

    fn append_style(&mut self, marker_attribute: &str, _marker_value: &str, css: &str) {
        println!("inject <style {marker_attribute}> ({} bytes)", css.len());
        self.has_style = true;
    }
}

impl Document for Gallery {
    type Element = usize;

    fn marked_elements(&self) -> Vec<usize> {
        (0..self.images.len())
            .filter(|&i| self.images[i].marker.is_some())
            .collect()
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn bounding_rect(&self, i: &usize) -> Rect {
        Rect::from_origin_size(0.0, self.images[*i].top - self.scroll_y, 400.0, 300.0)
    }

    fn marker(&self, i: &usize) -> Option<String> {
        self.images[*i].marker.clone()
    }

    fn set_property(&mut self, i: &usize, property: &str, value: &str) -> Result<(), String> {
        match property {
            "src" => {
                self.images[*i].src = Some(value.to_string());
                Ok(())
            }
            other => Err(format!("unknown property `{other}`")),
        }
    }

    fn has_class(&self, i: &usize, _class: &str) -> bool {
        self.images[*i].fading
    }

    fn add_class(&mut self, i: &usize, _class: &str) {
        self.images[*i].fading = true;
    }

    fn remove_class(&mut self, i: &usize, _class: &str) {
        self.images[*i].fading = false;
    }

    fn remove_marker(&mut self, i: &usize) {
        self.images[*i].marker = None;
    }

    fn attach_listener(&mut self, event: TriggerEvent) {
        println!("addEventListener({:?})", event.event_name());
    }

    fn detach_listener(&mut self, event: TriggerEvent) {
        println!("removeEventListener({:?})", event.event_name());
    }
}

fn main() {
    let images = (0..8)
        .map(|i| Image {
            top: i as f64 * 320.0,
            marker: Some(format!("src;photo-{i}.jpg")),
            src: None,
            fading: false,
        })
        .collect();
    let gallery = Gallery {
        viewport: Viewport::new(400.0, 700.0),
        scroll_y: 0.0,
        images,
        has_style: false,
    };

    let faded = Rc::new(Cell::new(0));
    let opts = RendererOptions::new().with_callback({
        let faded = Rc::clone(&faded);
        move || faded.set(faded.get() + 1)
    });
    let mut r = LazyRender::new(gallery, opts);
    println!("{} elements carry {MARKER_ATTRIBUTE}", r.document().marked_count());

    // Simulate the user scrolling 60px every 16ms for two seconds.
    let mut now = 0u64;
    r.on_event(TriggerEvent::ContentLoaded, now);
    while now < 4_000 {
        now += 16;
        if now < 2_000 {
            r.document_mut().scroll_y += 60.0;
            r.on_event(TriggerEvent::Scroll, now);
        }
        r.tick(now);
    }

    for (i, img) in r.document().images.iter().enumerate() {
        println!("image {i}: src={:?} marked={}", img.src, img.marker.is_some());
    }
    println!(
        "faded={} stats={:?} listening={}",
        faded.get(),
        r.stats(),
        r.is_listening()
    );
}
