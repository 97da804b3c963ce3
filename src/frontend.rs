use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use js_sys::Function;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Document, Element, Event, EventTarget, HtmlElement, HtmlInputElement,
    HtmlSelectElement, KeyboardEvent, MouseEvent, Node, Window,
};

use crate::active_section::{current_section, link_targets_section, SectionBounds};
use crate::config::{PageConfig, CONFIG_ELEMENT_ID};
use crate::error::FeatureError;
use crate::nav_menu::{NavEvent, NavMenu, ACTIVE_CLASS, OPEN_CLASS};
use crate::parallax::{parallax_offsets, Translate};
use crate::storage::{LocalStorage, MemoryStore, PreferenceStore};
use crate::text_prefs::{
    PanelTransition, TextControls, TextPanel, TextPreferences, TextSettingsStore,
    PANEL_OPEN_CLASS,
};
use crate::theme::{ThemeAppearance, ThemeState, DARK_MODE_CLASS};

const NAV_FEATURE: &str = "navigation menu";
const THEME_FEATURE: &str = "theme toggle";
const SECTION_FEATURE: &str = "active section";
const TEXT_FEATURE: &str = "text settings";
const PARALLAX_FEATURE: &str = "parallax";

type Store = Rc<dyn PreferenceStore>;

fn dom_error(feature: &'static str) -> impl Fn(JsValue) -> FeatureError {
    move |err| FeatureError::Dom {
        feature,
        message: format!("{err:?}"),
    }
}

fn query(
    document: &Document,
    feature: &'static str,
    selector: &str,
) -> Result<Element, FeatureError> {
    document
        .query_selector(selector)
        .map_err(dom_error(feature))?
        .ok_or_else(|| FeatureError::missing(feature, selector))
}

fn query_as<T: JsCast>(
    document: &Document,
    feature: &'static str,
    selector: &str,
) -> Result<T, FeatureError> {
    query(document, feature, selector)?
        .dyn_into::<T>()
        .map_err(|_| FeatureError::Dom {
            feature,
            message: format!("`{selector}` is not the expected kind of element"),
        })
}

fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };

    (0..nodes.length())
        .filter_map(|index| nodes.get(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn presentation_root(
    document: &Document,
    feature: &'static str,
) -> Result<HtmlElement, FeatureError> {
    document
        .body()
        .ok_or_else(|| FeatureError::missing(feature, "body"))
}

/// Registers `handler` for `event` on `target` for the lifetime of the page.
fn listen<E, F>(
    target: &EventTarget,
    event: &str,
    feature: &'static str,
    mut handler: F,
) -> Result<(), FeatureError>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if let Ok(event) = event.dyn_into::<E>() {
            handler(event);
        }
    });

    target
        .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        .map_err(dom_error(feature))?;
    callback.forget();
    Ok(())
}

fn set_class(element: &Element, class: &str, enabled: bool) {
    let _ = element.class_list().toggle_with_force(class, enabled);
}

fn event_target_node(event: &Event) -> Option<Node> {
    event.target().and_then(|target| target.dyn_into::<Node>().ok())
}

fn outside_all(event: &Event, elements: &[&Element]) -> bool {
    let target = event_target_node(event);
    !elements
        .iter()
        .any(|element| element.contains(target.as_ref()))
}

fn load_config(document: &Document) -> PageConfig {
    let Some(raw) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
    else {
        return PageConfig::default();
    };

    PageConfig::from_json(&raw).unwrap_or_else(|err| {
        log::warn!("ignoring #{CONFIG_ELEMENT_ID}: {err}");
        PageConfig::default()
    })
}

fn open_store() -> Store {
    match LocalStorage::open() {
        Ok(storage) => Rc::new(storage),
        Err(err) => {
            log::warn!("{err}; preferences will not survive a reload");
            Rc::new(MemoryStore::new())
        }
    }
}

fn bind_nav_menu(document: &Document, config: &PageConfig) -> Result<(), FeatureError> {
    let selectors = &config.selectors;
    let toggle = query(document, NAV_FEATURE, &selectors.menu_toggle)?;
    let links = query(document, NAV_FEATURE, &selectors.nav_links)?;
    let menu = Cell::new(NavMenu::default());

    let dispatch: Rc<dyn Fn(NavEvent)> = {
        let toggle = toggle.clone();
        let links = links.clone();
        Rc::new(move |event: NavEvent| {
            let mut next = menu.get();
            if !next.handle(&event) {
                return;
            }
            menu.set(next);

            let _ = toggle.set_attribute("aria-expanded", next.aria_expanded());
            set_class(&links, OPEN_CLASS, next.is_open());
            set_class(&toggle, ACTIVE_CLASS, next.is_open());
        })
    };

    {
        let dispatch = Rc::clone(&dispatch);
        listen(&toggle, "click", NAV_FEATURE, move |_: Event| {
            dispatch(NavEvent::TogglePressed)
        })?;
    }

    for item in query_all(document, &selectors.nav_items) {
        let dispatch = Rc::clone(&dispatch);
        listen(&item, "click", NAV_FEATURE, move |_: Event| {
            dispatch(NavEvent::LinkActivated)
        })?;
    }

    {
        let dispatch = Rc::clone(&dispatch);
        listen(document, "click", NAV_FEATURE, move |event: Event| {
            if outside_all(&event, &[&toggle, &links]) {
                dispatch(NavEvent::OutsidePress);
            }
        })?;
    }

    listen(document, "keydown", NAV_FEATURE, move |event: KeyboardEvent| {
        dispatch(NavEvent::KeyPressed(event.key()))
    })
}

fn render_theme(
    root: &HtmlElement,
    toggle: &Element,
    icon: &Element,
    label: &Element,
    appearance: ThemeAppearance,
) {
    set_class(root, DARK_MODE_CLASS, appearance.root_dark);
    let icon_classes = icon.class_list();
    let _ = icon_classes.remove_1(appearance.stale_icon_class);
    let _ = icon_classes.add_1(appearance.icon_class);
    label.set_text_content(Some(appearance.label));
    let _ = toggle.set_attribute("aria-pressed", appearance.aria_pressed());
}

fn bind_theme(
    document: &Document,
    store: &Store,
    config: &PageConfig,
) -> Result<(), FeatureError> {
    let selectors = &config.selectors;
    let root = presentation_root(document, THEME_FEATURE)?;
    let toggle = query(document, THEME_FEATURE, &selectors.theme_toggle)?;
    let icon = toggle
        .query_selector(&selectors.theme_icon)
        .map_err(dom_error(THEME_FEATURE))?
        .ok_or_else(|| FeatureError::missing(THEME_FEATURE, &selectors.theme_icon))?;
    let label = query(document, THEME_FEATURE, &selectors.theme_label)?;

    let mut state = ThemeState::restore(store.as_ref(), &config.storage.theme);
    render_theme(&root, &toggle, &icon, &label, state.current().appearance());
    log::debug!("restored {} theme", state.current().as_str());

    let store = Rc::clone(store);
    let target = toggle.clone();
    listen(&target, "click", THEME_FEATURE, move |_: Event| {
        let appearance = state.toggle(store.as_ref());
        render_theme(&root, &toggle, &icon, &label, appearance);
    })
}

fn highlight_current_section(
    window: &Window,
    sections: &[HtmlElement],
    links: &[Element],
    offset: f64,
) {
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let bounds: Vec<SectionBounds> = sections
        .iter()
        .map(|section| SectionBounds::new(section.id(), f64::from(section.offset_top())))
        .collect();
    let current =
        current_section(scroll_y, &bounds, offset).map(|index| bounds[index].id.as_str());

    for link in links {
        let _ = link.remove_attribute("aria-current");
        let href = link.get_attribute("href");
        if current.is_some_and(|id| link_targets_section(href.as_deref(), id)) {
            let _ = link.set_attribute("aria-current", "page");
        }
    }
}

fn bind_active_section(
    window: &Window,
    document: &Document,
    config: &PageConfig,
) -> Result<(), FeatureError> {
    let sections: Vec<HtmlElement> = query_all(document, &config.selectors.sections)
        .into_iter()
        .filter_map(|section| section.dyn_into::<HtmlElement>().ok())
        .collect();
    let links = query_all(document, &config.selectors.nav_items);
    let offset = config.section_offset;

    highlight_current_section(window, &sections, &links, offset);

    let scrolled = window.clone();
    listen(window, "scroll", SECTION_FEATURE, move |_: Event| {
        highlight_current_section(&scrolled, &sections, &links, offset)
    })
}

struct FormControls {
    font_size: HtmlInputElement,
    line_spacing: HtmlInputElement,
    font_family: HtmlSelectElement,
    text_color: HtmlInputElement,
    bg_color: HtmlInputElement,
}

impl FormControls {
    fn bind(document: &Document, config: &PageConfig) -> Result<Self, FeatureError> {
        let selectors = &config.selectors;
        Ok(Self {
            font_size: query_as(document, TEXT_FEATURE, &selectors.font_size)?,
            line_spacing: query_as(document, TEXT_FEATURE, &selectors.line_spacing)?,
            font_family: query_as(document, TEXT_FEATURE, &selectors.font_family)?,
            text_color: query_as(document, TEXT_FEATURE, &selectors.text_color)?,
            bg_color: query_as(document, TEXT_FEATURE, &selectors.bg_color)?,
        })
    }

    fn targets(&self) -> [&EventTarget; 5] {
        [
            &self.font_size,
            &self.line_spacing,
            &self.font_family,
            &self.text_color,
            &self.bg_color,
        ]
    }
}

impl TextControls for FormControls {
    fn read(&self) -> TextPreferences {
        TextPreferences {
            font_size: self.font_size.value(),
            line_spacing: self.line_spacing.value(),
            font_family: self.font_family.value(),
            text_color: self.text_color.value(),
            bg_color: self.bg_color.value(),
        }
    }

    fn write(&self, prefs: &TextPreferences) {
        self.font_size.set_value(&prefs.font_size);
        self.line_spacing.set_value(&prefs.line_spacing);
        self.font_family.set_value(&prefs.font_family);
        self.text_color.set_value(&prefs.text_color);
        self.bg_color.set_value(&prefs.bg_color);
    }
}

fn apply_text_style(root: &HtmlElement, prefs: &TextPreferences) {
    let style = root.style();
    for (property, value) in prefs.style_declarations() {
        if let Err(err) = style.set_property(property, &value) {
            log::warn!("failed to set {property}: {err:?}");
        }
    }
}

struct TextPanelView {
    toggle: Element,
    panel: HtmlElement,
    state: Cell<TextPanel>,
    hide_delay_ms: u32,
}

fn render_panel(view: &Rc<TextPanelView>, transition: PanelTransition) {
    let _ = view
        .toggle
        .set_attribute("aria-expanded", view.state.get().aria_expanded());

    match transition {
        PanelTransition::Opened => {
            view.panel.set_hidden(false);
            let view = Rc::clone(view);
            let on_frame = Closure::once_into_js(move || {
                // A close may have landed before the frame.
                if view.state.get().is_open() {
                    set_class(&view.panel, PANEL_OPEN_CLASS, true);
                }
            });
            if let Some(win) = window() {
                let _ = win.request_animation_frame(on_frame.unchecked_ref::<Function>());
            }
        }
        PanelTransition::Closing => {
            set_class(&view.panel, PANEL_OPEN_CLASS, false);
            let delay = view.hide_delay_ms;
            let view = Rc::clone(view);
            Timeout::new(delay, move || {
                if !view.state.get().is_open() {
                    view.panel.set_hidden(true);
                }
            })
            .forget();
        }
    }
}

fn toggle_panel(view: &Rc<TextPanelView>) {
    let mut state = view.state.get();
    let transition = state.toggle();
    view.state.set(state);
    render_panel(view, transition);
}

fn dismiss_panel(view: &Rc<TextPanelView>) {
    let mut state = view.state.get();
    if let Some(transition) = state.outside_press() {
        view.state.set(state);
        render_panel(view, transition);
    }
}

fn bind_text_preferences(
    document: &Document,
    store: &Store,
    config: &PageConfig,
) -> Result<(), FeatureError> {
    let selectors = &config.selectors;
    let root = presentation_root(document, TEXT_FEATURE)?;
    let view = Rc::new(TextPanelView {
        toggle: query(document, TEXT_FEATURE, &selectors.text_toggle)?,
        panel: query_as(document, TEXT_FEATURE, &selectors.text_panel)?,
        state: Cell::new(TextPanel::default()),
        hide_delay_ms: config.panel_hide_delay_ms,
    });
    let controls = Rc::new(FormControls::bind(document, config)?);
    let reset = query(document, TEXT_FEATURE, &selectors.text_reset)?;
    let settings = TextSettingsStore::new(&config.storage.text_settings);

    if let Some(restored) = settings.restore_into(store.as_ref(), &*controls) {
        apply_text_style(&root, &restored);
        log::debug!("restored saved text settings");
    }

    for target in controls.targets() {
        let controls = Rc::clone(&controls);
        let root = root.clone();
        let store = Rc::clone(store);
        let settings = settings.clone();
        listen(target, "input", TEXT_FEATURE, move |_: Event| {
            let prefs = controls.read();
            apply_text_style(&root, &prefs);
            settings.save(store.as_ref(), &prefs);
        })?;
    }

    {
        let store = Rc::clone(store);
        listen(&reset, "click", TEXT_FEATURE, move |_: Event| {
            controls.write(&settings.reset(store.as_ref()));
            apply_text_style(&root, &controls.read());
        })?;
    }

    {
        let toggle = view.toggle.clone();
        let view = Rc::clone(&view);
        listen(&toggle, "click", TEXT_FEATURE, move |_: Event| toggle_panel(&view))?;
    }

    listen(document, "click", TEXT_FEATURE, move |event: Event| {
        if outside_all(&event, &[&*view.panel, &view.toggle]) {
            dismiss_panel(&view);
        }
    })
}

fn place_layers(
    front_layer: &HtmlElement,
    back_layer: &HtmlElement,
    front: Translate,
    back: Translate,
) {
    let _ = front_layer.style().set_property("transform", &front.to_string());
    let _ = back_layer.style().set_property("transform", &back.to_string());
}

fn bind_parallax(document: &Document, config: &PageConfig) -> Result<(), FeatureError> {
    let selectors = &config.selectors;
    let region: HtmlElement = query_as(document, PARALLAX_FEATURE, &selectors.hover_region)?;
    let front: HtmlElement = query_as(document, PARALLAX_FEATURE, &selectors.front_layer)?;
    let back: HtmlElement = query_as(document, PARALLAX_FEATURE, &selectors.back_layer)?;
    let strength = config.parallax_strength;

    {
        let (front_layer, back_layer) = (front.clone(), back.clone());
        let bounds = region.clone();
        listen(&region, "mousemove", PARALLAX_FEATURE, move |event: MouseEvent| {
            let (front, back) = parallax_offsets(
                f64::from(event.offset_x()),
                f64::from(event.offset_y()),
                f64::from(bounds.offset_width()),
                f64::from(bounds.offset_height()),
                strength,
            );
            place_layers(&front_layer, &back_layer, front, back);
        })?;
    }

    listen(&region, "mouseleave", PARALLAX_FEATURE, move |_: Event| {
        place_layers(&front, &back, Translate::ORIGIN, Translate::ORIGIN)
    })
}

fn report(feature: &str, result: Result<(), FeatureError>) {
    match result {
        Ok(()) => log::info!("{feature} ready"),
        Err(err) if err.is_absent() => log::info!("{err}; {feature} disabled"),
        Err(err) => log::warn!("{err}; {feature} disabled"),
    }
}

pub fn run() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    let _ = console_log::init_with_level(level);

    let Some(win) = window() else {
        log::error!("no window; interactions disabled");
        return;
    };
    let Some(document) = win.document() else {
        log::error!("no document; interactions disabled");
        return;
    };

    let config = load_config(&document);
    let store = open_store();

    report(NAV_FEATURE, bind_nav_menu(&document, &config));
    report(THEME_FEATURE, bind_theme(&document, &store, &config));
    report(SECTION_FEATURE, bind_active_section(&win, &document, &config));
    report(TEXT_FEATURE, bind_text_preferences(&document, &store, &config));
    report(PARALLAX_FEATURE, bind_parallax(&document, &config));
}
