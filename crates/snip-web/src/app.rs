//! Runtime state and event wiring.
//!
//! All mutable state lives in one [`State`] behind `Rc<RefCell<_>>`. Event
//! callbacks hold a `Weak` handle, so dropping the [`App`] tears everything
//! down: listeners unregister themselves and the observer disconnects.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use snip_content::Library;
use snip_outline::{Outline, OutlineChange, OutlineCollector, ScrollSpy, ScrollThrottle};
use snip_renderer::DocsRenderer;
use snip_shell::{CopyRegistry, KeyChord, KeyResponse, NavTarget, ShellState};
use snip_site::{content_inner, render_toc};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, HtmlElement, KeyboardEvent, Window};

use crate::copy;
use crate::dom;
use crate::listener::Listener;
use crate::observer::{self, Observer};
use crate::settings::RuntimeSettings;

/// Minimum spacing of geometry samples when sampling on scroll.
const SCROLL_SAMPLE_MS: f64 = 100.0;

pub(crate) struct State {
    pub(crate) window: Window,
    pub(crate) document: Document,
    pub(crate) copies: CopyRegistry,
    library: Library,
    renderer: DocsRenderer,
    shell: ShellState,
    outlines: OutlineCollector<String>,
    spy: ScrollSpy,
    observer: Option<Observer>,
    use_observer: bool,
    throttle: ScrollThrottle,
    site_title: String,
}

pub(crate) type Handle = Weak<RefCell<State>>;

/// Run `f` against the live state, logging any error.
pub(crate) fn with_state<F>(handle: &Handle, f: F)
where
    F: FnOnce(&mut State, &Handle) -> Result<(), JsValue>,
{
    if let Some(state) = handle.upgrade() {
        let result = f(&mut state.borrow_mut(), handle);
        dom::report(result);
    }
}

/// The mounted runtime.
pub struct App {
    _state: Rc<RefCell<State>>,
    _listeners: Vec<Listener>,
}

impl App {
    /// Attach the runtime to the current page.
    pub fn mount(library: Library, settings: RuntimeSettings) -> Result<Self, JsValue> {
        let window = dom::window()?;
        let document = dom::document()?;

        let site_title = document
            .query_selector(".logo")?
            .and_then(|logo| logo.text_content())
            .unwrap_or_default();
        let use_observer = observer::supported(&window);
        if !use_observer {
            web_sys::console::info_1(&"snip: IntersectionObserver unavailable, sampling on scroll".into());
        }

        let state = Rc::new(RefCell::new(State {
            shell: ShellState::from_library(&library),
            spy: ScrollSpy::new(settings.band).with_sticky(settings.sticky),
            window: window.clone(),
            document: document.clone(),
            copies: CopyRegistry::new(settings.feedback),
            library,
            renderer: DocsRenderer::new(),
            outlines: OutlineCollector::new(),
            observer: None,
            use_observer,
            throttle: ScrollThrottle::new(SCROLL_SAMPLE_MS),
            site_title,
        }));

        let handle = Rc::downgrade(&state);
        let listeners = vec![
            listen(&document, "keydown", &handle, State::on_keydown)?,
            listen(&document, "click", &handle, State::on_click)?,
            listen(&window, "hashchange", &handle, |st, h, _| st.on_hashchange(h))?,
            listen(&window, "scroll", &handle, |st, _, _| st.on_scroll())?,
        ];

        with_state(&handle, |st, h| {
            let target = st.initial_target()?;
            match target {
                Some(target) => st.show(h, &target),
                None => Ok(()),
            }
        });

        Ok(Self {
            _state: state,
            _listeners: listeners,
        })
    }
}

/// Register a listener that forwards to a state method.
fn listen<F>(
    target: &web_sys::EventTarget,
    event: &'static str,
    handle: &Handle,
    handler: F,
) -> Result<Listener, JsValue>
where
    F: Fn(&mut State, &Handle, &Event) -> Result<(), JsValue> + 'static,
{
    let handle = handle.clone();
    Listener::new(target, event, move |e: Event| {
        with_state(&handle, |st, h| handler(st, h, &e));
    })
}

impl State {
    /// Route from the location hash, else the page's own topic.
    fn initial_target(&self) -> Result<Option<NavTarget>, JsValue> {
        let hash = self.window.location().hash()?;
        if let Some(target) = NavTarget::parse_route(&hash) {
            return Ok(Some(target));
        }
        let current = dom::by_id(&self.document, "content")?.get_attribute("data-topic");
        Ok(current
            .or_else(|| self.library.first_topic().map(|t| t.slug.clone()))
            .map(NavTarget::topic))
    }

    fn on_keydown(&mut self, _handle: &Handle, event: &Event) -> Result<(), JsValue> {
        let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
            return Ok(());
        };
        let chord = KeyChord {
            key: key.key(),
            ctrl: key.ctrl_key(),
            meta: key.meta_key(),
            shift: key.shift_key(),
            alt: key.alt_key(),
        };
        match self.shell.on_key(&chord) {
            KeyResponse::Ignored => Ok(()),
            KeyResponse::Handled { prevent_default } => {
                if prevent_default {
                    event.prevent_default();
                }
                self.sync_search()
            }
        }
    }

    fn on_click(&mut self, handle: &Handle, event: &Event) -> Result<(), JsValue> {
        if let Some(button) = dom::closest(event, ".copy-button") {
            return copy::start(self, handle, &button);
        }
        if dom::closest(event, "[data-search-backdrop]").is_some() {
            self.shell.search.backdrop_click();
            return self.sync_search();
        }
        if dom::closest(event, "#search-button").is_some() {
            self.shell.search.open();
            return self.sync_search();
        }
        if dom::closest(event, "#menu-button").is_some() {
            self.shell.mobile.toggle();
            return self.sync_menu();
        }
        if let Some(toggle) = dom::closest(event, "[data-group-toggle]") {
            let index = toggle
                .get_attribute("data-group-toggle")
                .and_then(|v| v.parse::<usize>().ok());
            if let Some(index) = index
                && self.shell.sidebar.toggle_group(index)
            {
                return self.sync_sidebar();
            }
            return Ok(());
        }
        if let Some(link) = dom::closest(event, "a[data-route]") {
            let Some(route) = link.get_attribute("data-route") else {
                return Ok(());
            };
            let Some(target) = NavTarget::parse_route(&route) else {
                return Ok(());
            };
            event.prevent_default();
            let location = self.window.location();
            if location.hash()? == route {
                // No hashchange fires for the current hash.
                return self.show(handle, &target);
            }
            location.set_hash(&route)?;
        }
        Ok(())
    }

    fn on_hashchange(&mut self, handle: &Handle) -> Result<(), JsValue> {
        let hash = self.window.location().hash()?;
        match NavTarget::parse_route(&hash) {
            Some(target) => self.show(handle, &target),
            // Plain fragments (outline links) scroll natively.
            None => Ok(()),
        }
    }

    fn on_scroll(&mut self) -> Result<(), JsValue> {
        if self.use_observer || !self.throttle.ready(js_sys::Date::now()) {
            return Ok(());
        }
        let rects = observer::heading_rects(&self.document, self.spy.observed());
        let viewport = self.window.inner_height()?.as_f64().unwrap_or_default();
        self.spy.sample(&rects, viewport);
        self.sync_outline_active()
    }

    /// Display a topic and optionally scroll to an anchor within it.
    fn show(&mut self, handle: &Handle, target: &NavTarget) -> Result<(), JsValue> {
        let Some(topic) = self.library.topic(&target.topic).cloned() else {
            web_sys::console::warn_1(&format!("snip: unknown topic {}", target.topic).into());
            return Ok(());
        };

        let main = dom::by_id(&self.document, "content")?;
        let switched = main.get_attribute("data-topic").as_deref() != Some(topic.slug.as_str());
        if switched {
            let rendered = self.renderer.render(&topic.documents);
            main.set_inner_html(&content_inner(&topic.label, &rendered.html));
            self.copies.clear();
            main.set_attribute("data-topic", &topic.slug)?;
            self.document
                .set_title(&format!("{} | {}", topic.label, self.site_title));
        }

        let change = self
            .outlines
            .sync(&topic.slug, || Outline::from_collection(&topic.documents));
        if change == OutlineChange::Replaced {
            self.mount_outline(handle)?;
        }

        for link in dom::query_all(&self.document, ".nav-link")? {
            let active = link.get_attribute("data-topic").as_deref() == Some(topic.slug.as_str());
            dom::toggle_class(&link, "active", active)?;
            if active {
                link.set_attribute("aria-current", "page")?;
            } else {
                link.remove_attribute("aria-current")?;
            }
        }

        self.shell.on_navigate(target);
        self.sync_search()?;
        self.sync_menu()?;
        self.sync_sidebar()?;

        match &target.anchor {
            Some(anchor) => {
                if let Some(element) = self.document.get_element_by_id(anchor) {
                    element.scroll_into_view();
                }
            }
            None if switched => self.window.scroll_to_with_x_and_y(0.0, 0.0),
            None => {}
        }
        Ok(())
    }

    /// Replace the outline panel and restart observation for the new headings.
    fn mount_outline(&mut self, handle: &Handle) -> Result<(), JsValue> {
        // Old observer must be gone before the new heading set is observed.
        if let Some(previous) = self.observer.take() {
            drop(previous);
        }
        if let Some(old) = self.document.get_element_by_id("toc") {
            old.remove();
        }

        let entries = self.outlines.outline().entries().to_vec();
        let html = render_toc(&entries);
        if !html.is_empty() {
            dom::by_id(&self.document, "content")?.insert_adjacent_html("afterend", &html)?;
        }

        let document = self.document.clone();
        self.spy
            .observe(&entries, |id| document.get_element_by_id(id).is_some());

        if self.use_observer && !self.spy.observed().is_empty() {
            let callback_handle = handle.clone();
            let observer = Observer::new(
                &self.document,
                self.spy.band(),
                self.spy.observed(),
                move |batch| {
                    with_state(&callback_handle, |st, _| {
                        st.spy.record(batch);
                        st.sync_outline_active()
                    });
                },
            )?;
            self.observer = Some(observer);
        }
        self.sync_outline_active()
    }

    fn sync_outline_active(&self) -> Result<(), JsValue> {
        let active = self.spy.active();
        for link in dom::query_all(&self.document, ".toc-link")? {
            let on = active.is_some() && link.get_attribute("data-target").as_deref() == active;
            dom::toggle_class(&link, "active", on)?;
        }
        Ok(())
    }

    fn sync_search(&self) -> Result<(), JsValue> {
        let overlay = dom::by_id(&self.document, "search-overlay")?;
        if self.shell.search.is_open() {
            overlay.remove_attribute("hidden")?;
            if let Some(input) = self.document.get_element_by_id("search-input")
                && let Ok(input) = input.dyn_into::<HtmlElement>()
            {
                input.focus()?;
            }
        } else {
            overlay.set_attribute("hidden", "hidden")?;
        }
        Ok(())
    }

    fn sync_menu(&self) -> Result<(), JsValue> {
        let open = self.shell.mobile.is_open();
        let flag = if open { "true" } else { "false" };
        dom::by_id(&self.document, "sidebar")?.set_attribute("data-open", flag)?;
        dom::by_id(&self.document, "menu-button")?.set_attribute("aria-expanded", flag)?;
        let body = dom::body(&self.document)?;
        dom::toggle_class(&body, "scroll-locked", self.shell.mobile.scroll_locked())
    }

    fn sync_sidebar(&self) -> Result<(), JsValue> {
        for (index, group) in self.shell.sidebar.groups().iter().enumerate() {
            let flag = if group.expanded { "true" } else { "false" };
            let selector = format!("[data-group=\"{index}\"]");
            if let Some(element) = self.document.query_selector(&selector)? {
                element.set_attribute("data-expanded", flag)?;
            }
            let selector = format!("[data-group-toggle=\"{index}\"]");
            if let Some(toggle) = self.document.query_selector(&selector)? {
                toggle.set_attribute("aria-expanded", flag)?;
            }
        }
        Ok(())
    }
}
