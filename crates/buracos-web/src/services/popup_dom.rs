//! DOM construction for popup content
//!
//! Each action button gets a click listener that forwards the action's event
//! to the sink. The returned closures must live as long as the element.

use buracos_core::controller::{EventSink, MapEvent};
use buracos_core::render::Popup;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement};

use crate::error::WebError;
use crate::theme::{action_button_style, swatch_button_style};

pub type Listener = Closure<dyn FnMut(Event)>;

/// Popup element plus the listeners keeping its buttons alive
pub struct PopupElement {
    pub element: HtmlElement,
    pub listeners: Vec<Listener>,
}

pub fn build_popup(popup: &Popup, sink: Option<&EventSink>) -> Result<PopupElement, WebError> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or(WebError::Unavailable("document"))?;

    let container: HtmlElement = document.create_element("div")?.unchecked_into();

    let heading = document.create_element("h4")?;
    heading.set_text_content(Some(&popup.heading));
    container.append_child(&heading)?;

    for line in &popup.lines {
        let paragraph = document.create_element("p")?;
        paragraph.set_class_name("popup-line");
        paragraph.set_text_content(Some(line));
        container.append_child(&paragraph)?;
    }

    let mut listeners = Vec::with_capacity(popup.actions.len());
    for action in &popup.actions {
        let button = action_button(&document, action.swatch, &action.label)?;
        match sink {
            Some(sink) => listeners.push(bind_click(&button, Rc::clone(sink), action.event.clone())?),
            None => tracing::warn!("Popup action '{}' rendered without a sink", action.label),
        }
        container.append_child(&button)?;
    }

    Ok(PopupElement {
        element: container,
        listeners,
    })
}

fn action_button(
    document: &Document,
    swatch: Option<&'static str>,
    label: &str,
) -> Result<Element, WebError> {
    let button = document.create_element("button")?;
    button.set_attribute("type", "button")?;
    match swatch {
        // Swatches are bare colored circles; the label becomes the tooltip.
        Some(color) => {
            button.set_attribute("style", &swatch_button_style(color))?;
            button.set_attribute("title", label)?;
            button.set_attribute("aria-label", label)?;
        }
        None => {
            button.set_attribute("style", &action_button_style())?;
            button.set_text_content(Some(label));
        }
    }
    Ok(button)
}

fn bind_click(button: &Element, sink: EventSink, event: MapEvent) -> Result<Listener, WebError> {
    let listener = Closure::<dyn FnMut(Event)>::new(move |dom_event: Event| {
        dom_event.stop_propagation();
        sink(event.clone());
    });
    button.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())?;
    Ok(listener)
}
