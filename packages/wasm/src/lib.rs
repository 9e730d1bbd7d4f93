//! WebAssembly bindings for the LEO live book core library.
//!
//! Exposes two groups of APIs to JavaScript/TypeScript via `wasm-bindgen`.
//! Compile with `wasm-pack build` to produce an npm-ready package that works
//! in browsers, Node.js, and any other WASM host. Documents and results
//! cross the boundary as JSON strings.
//!
//! ## Stateless API — [`build_graph`], [`route_from_fragment`], [`validate`], ...
//!
//! ```js
//! import init, { build_graph, route_from_fragment } from './leobook_wasm.js';
//! await init();
//!
//! const body = await fetch('/webapp/data/book-demo.json', { cache: 'no-store' }).then(r => r.text());
//! const graph = JSON.parse(build_graph(body));           // { nodes, edges, rootId }
//! const pos = JSON.parse(route_from_fragment(location.hash, body));
//! ```
//!
//! ## Session API — [`BookReader`]
//!
//! ```js
//! const reader = new BookReader(location.hash);
//! const pending = reader.beginLoad();
//! const body = await fetch(url).then(r => r.text());
//! const elements = reader.finishLoad(pending, body);     // undefined if superseded
//! if (elements) cy.add(JSON.parse(elements));
//!
//! reader.onPositionChange((position, cause) => redraw(JSON.parse(position), cause));
//! window.addEventListener('hashchange', () => reader.fragmentChanged(location.hash));
//! const fragment = reader.navigate('sec-3');              // host writes location.hash
//! ```

use wasm_bindgen::prelude::*;

use leobook::{
    render, BookDocument, LoadOutcome, LoadTicket, NavigationPosition, PositionChangeCause, Session,
};

/// One-time initialisation called at the start of every exported function.
///
/// Installs the `console_error_panic_hook` when the feature is enabled so
/// that Rust panics are forwarded to the browser console as readable errors
/// rather than appearing as generic "unreachable" WASM traps. With
/// `console-log`, `tracing` events go to the console too.
fn setup() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console-log")]
    {
        static LOGGER: std::sync::Once = std::sync::Once::new();
        LOGGER.call_once(tracing_wasm::set_as_global_default);
    }
}

/// Build the graph model for a book document.
///
/// Returns `{ "nodes": [...], "edges": [...], "rootId": "..." }` as a JSON
/// string. Throws only if `json` is not JSON; missing fields are tolerated.
#[wasm_bindgen]
pub fn build_graph(json: &str) -> Result<String, JsValue> {
    setup();
    let doc = parse(json)?;
    to_json(&leobook::build_graph(&doc))
}

/// Build the Cytoscape element array for a book document.
///
/// Each node is `{ data: { id, label, type } }`, each edge
/// `{ data: { source, target } }`.
#[wasm_bindgen]
pub fn graph_elements(json: &str) -> Result<String, JsValue> {
    setup();
    let doc = parse(json)?;
    to_json(&leobook::build_graph(&doc).elements())
}

/// Resolve a location fragment (`#book$<book>$<section>`) against a
/// document.
///
/// Returns `{ "chapterIndex": n, "sectionIndex": m }`. Unroutable fragments
/// resolve to the first section.
#[wasm_bindgen]
pub fn route_from_fragment(fragment: &str, json: &str) -> Result<String, JsValue> {
    setup();
    let doc = parse(json)?;
    to_json(&leobook::route_from_fragment(fragment, &doc))
}

/// The fragment (without `#`) that addresses `section_id` in `book_id`.
#[wasm_bindgen]
pub fn position_to_fragment(book_id: &str, section_id: &str) -> String {
    leobook::position_to_fragment(book_id, section_id)
}

/// Position of the first section with id `section_id`, as
/// `{ "chapterIndex": n, "sectionIndex": m }`, or `undefined`.
#[wasm_bindgen]
pub fn find_section_by_id(json: &str, section_id: &str) -> Result<Option<String>, JsValue> {
    setup();
    let doc = parse(json)?;
    leobook::find_section_by_id(&doc, section_id)
        .map(|p| to_json(&p))
        .transpose()
}

/// Check a book document's ids and structure.
///
/// Returns `undefined` on success. Throws a descriptive string on failure
/// (either a JSON parse error or a structural error).
#[wasm_bindgen]
pub fn validate(json: &str) -> Result<(), JsValue> {
    setup();
    let doc = parse(json)?;
    leobook::validate_document(&doc).map_err(|e| JsValue::from_str(&e.to_string()))
}

// ── BookReader ────────────────────────────────────────────────────────────────

/// An in-flight document load started by [`BookReader::begin_load`].
#[wasm_bindgen]
pub struct PendingLoad {
    ticket: LoadTicket,
}

/// The viewer's navigation state: the loaded document, the current
/// position, and the last location fragment.
///
/// Fragment changes reported before the document arrives are remembered and
/// applied once it does. A load superseded by a newer one is ignored.
#[wasm_bindgen]
pub struct BookReader {
    session: Session,
}

#[wasm_bindgen]
impl BookReader {
    /// Start with the location fragment present at page load.
    #[wasm_bindgen(constructor)]
    pub fn new(fragment: &str) -> Self {
        setup();
        Self {
            session: Session::with_fragment(fragment),
        }
    }

    /// Begin loading a document. Pass the handle to [`finish_load`](Self::finish_load)
    /// with the response body.
    #[wasm_bindgen(js_name = beginLoad)]
    pub fn begin_load(&mut self) -> PendingLoad {
        PendingLoad {
            ticket: self.session.begin_load(),
        }
    }

    /// Install a fetched document body.
    ///
    /// Returns the Cytoscape element array as a JSON string, or `undefined`
    /// if a newer load has started since. Throws if the body is not JSON; the
    /// previous document, if any, stays loaded.
    #[wasm_bindgen(js_name = finishLoad)]
    pub fn finish_load(&mut self, pending: PendingLoad, body: &str) -> Result<Option<String>, JsValue> {
        match self.session.finish_load_json(pending.ticket, body) {
            LoadOutcome::Loaded { graph } => to_json(&graph.elements()).map(Some),
            LoadOutcome::Stale => Ok(None),
            LoadOutcome::Failed(e) => Err(JsValue::from_str(&e.to_string())),
        }
    }

    /// Record a `hashchange`. Returns the resolved position as JSON, or
    /// `undefined` while no document is loaded (the fragment is applied once
    /// one arrives).
    #[wasm_bindgen(js_name = fragmentChanged)]
    pub fn fragment_changed(&mut self, fragment: &str) -> Result<Option<String>, JsValue> {
        self.session
            .fragment_changed(fragment)
            .map(|p| to_json(&p))
            .transpose()
    }

    /// Call `callback(position, cause)` on every published position change.
    ///
    /// `position` is `{ "chapterIndex": n, "sectionIndex": m }` as a JSON
    /// string and `cause` is `"load"`, `"fragment"`, or `"navigate"`. A
    /// fragment that resolves to the position already shown (such as the
    /// echo of [`navigate`](Self::navigate)) does not fire. Exceptions thrown
    /// by the callback are ignored.
    #[wasm_bindgen(js_name = onPositionChange)]
    pub fn on_position_change(&mut self, callback: js_sys::Function) {
        self.session.router_mut().subscribe(move |state, cause| {
            let Ok(position) = serde_json::to_string(&state.position()) else {
                return;
            };
            let _ = callback.call2(
                &JsValue::NULL,
                &JsValue::from_str(&position),
                &JsValue::from_str(cause_name(cause)),
            );
        });
    }

    /// Navigate to a section by id. Returns the fragment (without `#`) to
    /// assign to the location, or `undefined` if the id is unknown.
    pub fn navigate(&mut self, section_id: &str) -> Option<String> {
        let position = leobook::find_section_by_id(self.session.document()?, section_id)?;
        self.session.navigate(position)
    }

    /// Navigate to a position by index.
    #[wasm_bindgen(js_name = navigateTo)]
    pub fn navigate_to(&mut self, chapter_index: usize, section_index: usize) -> Option<String> {
        self.session
            .navigate(NavigationPosition::new(chapter_index, section_index))
    }

    #[wasm_bindgen(getter)]
    pub fn fragment(&self) -> String {
        self.session.fragment().to_string()
    }

    #[wasm_bindgen(getter, js_name = isLoaded)]
    pub fn is_loaded(&self) -> bool {
        self.session.document().is_some()
    }

    /// `{ "chapterIndex": n, "sectionIndex": m }`, or `undefined`.
    pub fn position(&self) -> Result<Option<String>, JsValue> {
        self.session
            .router()
            .position()
            .map(|p| to_json(&p))
            .transpose()
    }

    /// The browser tab title for the loaded book.
    #[wasm_bindgen(getter, js_name = pageTitle)]
    pub fn page_title(&self) -> Option<String> {
        self.session.document().map(|d| render::page_title(d))
    }

    /// Breadcrumb and section body for the current position, as plain text.
    #[wasm_bindgen(js_name = renderReader)]
    pub fn render_reader(&self) -> Option<String> {
        self.session.state().map(|s| render::render_reader(s))
    }

    /// Table of contents with the current section marked.
    #[wasm_bindgen(js_name = renderToc)]
    pub fn render_toc(&self) -> Option<String> {
        let doc = self.session.document()?;
        Some(render::render_toc(doc, self.session.router().position()))
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn parse(json: &str) -> Result<BookDocument, JsValue> {
    BookDocument::from_json(json).map_err(|e| JsValue::from_str(&format!("parse error: {e}")))
}

fn cause_name(cause: PositionChangeCause) -> &'static str {
    match cause {
        PositionChangeCause::Load => "load",
        PositionChangeCause::Fragment => "fragment",
        PositionChangeCause::Navigate => "navigate",
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}
