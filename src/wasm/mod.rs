//! WASM bindings for the editor

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::{Array, ArrayBuffer, Function, Uint8Array};
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Blob, BlobPropertyBag, Document, HtmlAnchorElement, HtmlDocument, HtmlElement, KeyboardEvent,
    Range, Url, Window,
};

use crate::error::{EditorError, Result};
use crate::export::{DocumentConverter, ExportArtifact};
use crate::host::HostEngine;
use crate::state::{Alignment, FormatKind};
use crate::status::NoticeToken;
use crate::toolbar::{FONT_FAMILIES, FONT_SIZES};
use crate::{Editor, EditorConfig, KeyChord};

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Best-effort message from a thrown JS value
fn describe(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn window() -> std::result::Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window available"))
}

fn find_element(document: &Document, id: &str) -> std::result::Result<HtmlElement, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("element #{} not found", id)))?
        .dyn_into::<HtmlElement>()
        .map_err(JsValue::from)
}

/// A content-editable element driven through the browser's editing engine
pub struct DomHost {
    document: HtmlDocument,
    surface: HtmlElement,
    status: Option<HtmlElement>,
}

impl DomHost {
    /// Attach to the element `surface_id`, making it editable
    pub fn attach(surface_id: &str, status_id: Option<&str>) -> std::result::Result<Self, JsValue> {
        let document = window()?
            .document()
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let surface = find_element(&document, surface_id)?;
        let status = status_id
            .map(|id| find_element(&document, id))
            .transpose()?;
        surface.set_content_editable("true");

        let document = document.dyn_into::<HtmlDocument>().map_err(JsValue::from)?;
        Ok(Self {
            document,
            surface,
            status,
        })
    }

    fn selection(&self) -> Option<web_sys::Selection> {
        web_sys::window()?.get_selection().ok().flatten()
    }

    /// First non-collapsed range that lies inside the surface
    fn active_range(&self) -> Option<Range> {
        let selection = self.selection()?;
        if selection.range_count() == 0 || selection.is_collapsed() {
            return None;
        }
        let range = selection.get_range_at(0).ok()?;
        let ancestor = range.common_ancestor_container().ok()?;
        self.surface.contains(Some(&ancestor)).then_some(range)
    }

    fn exec(&self, command: &str) -> Result<()> {
        match self.document.exec_command(command) {
            Ok(true) => Ok(()),
            Ok(false) => Err(EditorError::host_command(command, "command not supported")),
            Err(err) => Err(EditorError::host_command(command, describe(&err))),
        }
    }
}

impl HostEngine for DomHost {
    fn content(&self) -> String {
        self.surface.inner_html()
    }

    fn set_content(&mut self, markup: &str) {
        self.surface.set_inner_html(markup);
    }

    fn has_selection(&self) -> bool {
        self.active_range().is_some()
    }

    fn wrap_selection(&mut self, attribute: &str, value: &str) -> Result<()> {
        let range = self
            .active_range()
            .ok_or_else(|| EditorError::selection_wrap("no selection"))?;
        let span = self
            .document
            .create_element("span")
            .and_then(|el| el.dyn_into::<HtmlElement>().map_err(JsValue::from))
            .map_err(|err| EditorError::selection_wrap(describe(&err)))?;
        span.style()
            .set_property(attribute, value)
            .map_err(|err| EditorError::selection_wrap(describe(&err)))?;
        range
            .surround_contents(&span)
            .map_err(|err| EditorError::selection_wrap(describe(&err)))
    }

    fn clear_selection(&mut self) {
        if let Some(selection) = self.selection() {
            if let Err(err) = selection.remove_all_ranges() {
                warn!(error = %describe(&err), "could not clear selection");
            }
        }
    }

    fn set_surface_style(&mut self, attribute: &str, value: &str) -> Result<()> {
        self.surface
            .style()
            .set_property(attribute, value)
            .map_err(|err| EditorError::host_command("setProperty", describe(&err)))
    }

    fn exec_format(&mut self, kind: FormatKind) -> Result<()> {
        self.exec(kind.command())
    }

    fn exec_justify(&mut self, alignment: Alignment) -> Result<()> {
        self.exec(alignment.command())
    }

    fn show_status(&mut self, message: Option<&str>) {
        if let Some(status) = &self.status {
            status.set_text_content(message);
        }
    }
}

/// A JS function `(html: string) => Uint8Array | ArrayBuffer`
struct JsConverter<'a>(&'a Function);

impl DocumentConverter for JsConverter<'_> {
    fn convert(&self, html: &str) -> Result<Vec<u8>> {
        let output = self
            .0
            .call1(&JsValue::NULL, &JsValue::from_str(html))
            .map_err(|err| EditorError::export(describe(&err)))?;
        if !(output.is_instance_of::<Uint8Array>() || output.is_instance_of::<ArrayBuffer>()) {
            return Err(EditorError::export(
                "converter must return a Uint8Array or ArrayBuffer",
            ));
        }
        Ok(Uint8Array::new(&output).to_vec())
    }
}

/// Delay before the object URL of a download is released (ms)
const DOWNLOAD_REVOKE_DELAY_MS: i32 = 10_000;

/// Hand an artifact to the browser as a file download
fn download(artifact: &ExportArtifact) -> std::result::Result<(), JsValue> {
    let document = window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document available"))?;

    let parts = Array::of1(&Uint8Array::from(artifact.bytes.as_slice()));
    let options = BlobPropertyBag::new();
    options.set_type(artifact.mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor = document
        .create_element("a")?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(JsValue::from)?;
    anchor.set_href(&url);
    anchor.set_download(&artifact.file_name);
    anchor.click();

    // The download must start before its URL is released
    let revoke = Closure::once_into_js(move || {
        if let Err(err) = Url::revoke_object_url(&url) {
            warn!(error = %describe(&err), "could not revoke download url");
        }
    });
    window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
        revoke.unchecked_ref(),
        DOWNLOAD_REVOKE_DELAY_MS,
    )?;
    Ok(())
}

/// State shared between the JS handle, the key listener and status timers
struct Session {
    editor: RefCell<Editor<DomHost>>,
    /// Token and timeout handle of the pending status clear
    timer: Cell<Option<(NoticeToken, i32)>>,
}

/// Schedule clearing the visible notice, replacing any pending clear
fn schedule_notice_clear(session: &Rc<Session>) {
    let (token, timeout) = match session.editor.try_borrow() {
        Ok(editor) => match editor.status().active_token() {
            Some(token) => (token, editor.status().timeout_ms()),
            None => return,
        },
        Err(_) => return,
    };
    if session.timer.get().map(|(pending, _)| pending) == Some(token) {
        return;
    }
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Some((_, handle)) = session.timer.take() {
        window.clear_timeout_with_handle(handle);
    }

    let weak = Rc::downgrade(session);
    let callback = Closure::once_into_js(move || {
        if let Some(session) = weak.upgrade() {
            session.timer.set(None);
            if let Ok(mut editor) = session.editor.try_borrow_mut() {
                editor.expire_notice(token);
            }
        }
    });
    let timeout = i32::try_from(timeout).unwrap_or(i32::MAX);
    match window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), timeout)
    {
        Ok(handle) => session.timer.set(Some((token, handle))),
        Err(err) => warn!(error = %describe(&err), "could not schedule status clear"),
    }
}

/// A window `keydown` registration, removed again on drop
struct ShortcutListener {
    window: Window,
    callback: Closure<dyn FnMut(KeyboardEvent)>,
}

impl ShortcutListener {
    fn register(window: &Window, session: &Rc<Session>) -> std::result::Result<Self, JsValue> {
        let weak = Rc::downgrade(session);
        let callback = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            let Some(session) = weak.upgrade() else {
                return;
            };
            let chord = KeyChord {
                key: event.key(),
                ctrl: event.ctrl_key(),
                meta: event.meta_key(),
                shift: event.shift_key(),
            };
            let handled = match session.editor.try_borrow_mut() {
                Ok(mut editor) => editor.handle_shortcut(&chord),
                Err(_) => return,
            };
            if handled {
                event.prevent_default();
                schedule_notice_clear(&session);
            }
        });
        window.add_event_listener_with_callback("keydown", callback.as_ref().unchecked_ref())?;
        Ok(Self {
            window: window.clone(),
            callback,
        })
    }
}

impl Drop for ShortcutListener {
    fn drop(&mut self) {
        if let Err(err) = self
            .window
            .remove_event_listener_with_callback("keydown", self.callback.as_ref().unchecked_ref())
        {
            warn!(error = %describe(&err), "could not remove shortcut listener");
        }
    }
}

/// WASM-exposed editor wrapper
#[wasm_bindgen]
pub struct WasmEditor {
    session: Rc<Session>,
    shortcuts: Option<ShortcutListener>,
}

#[wasm_bindgen]
impl WasmEditor {
    /// Attach to `surfaceId`; `statusId` and `configJson` are optional
    #[wasm_bindgen(constructor)]
    pub fn new(
        surface_id: &str,
        status_id: Option<String>,
        config_json: Option<String>,
    ) -> std::result::Result<WasmEditor, JsValue> {
        let config = match config_json {
            Some(json) => EditorConfig::from_json(&json)
                .map_err(|err| JsValue::from_str(&err.to_string()))?,
            None => EditorConfig::default(),
        };
        let host = DomHost::attach(surface_id, status_id.as_deref())?;
        let mut editor = Editor::with_config(host, config);
        editor.mount();

        let session = Rc::new(Session {
            editor: RefCell::new(editor),
            timer: Cell::new(None),
        });
        let shortcuts = ShortcutListener::register(&window()?, &session)?;

        Ok(Self {
            session,
            shortcuts: Some(shortcuts),
        })
    }

    /// Apply a toolbar style, e.g. `changeStyle("fontSize", "24px")`
    #[wasm_bindgen(js_name = changeStyle)]
    pub fn change_style(&self, property: &str, value: &str) {
        self.with_editor(|editor| editor.change_style(property, value));
    }

    /// Toggle `bold`, `italic` or `underline`; false for unknown kinds
    #[wasm_bindgen(js_name = applyFormatting)]
    pub fn apply_formatting(&self, kind: &str) -> bool {
        let Some(kind) = FormatKind::parse(kind) else {
            return false;
        };
        self.with_editor(|editor| editor.apply_formatting(kind))
            .is_some()
    }

    /// Align `left`, `center`, `right` or `full`; false for unknown directions
    #[wasm_bindgen(js_name = applyAlignment)]
    pub fn apply_alignment(&self, direction: &str) -> bool {
        let Some(alignment) = Alignment::parse(direction) else {
            return false;
        };
        self.with_editor(|editor| editor.apply_alignment(alignment))
            .is_some()
    }

    /// Undo last change
    pub fn undo(&self) -> bool {
        self.with_editor(|editor| editor.undo()).unwrap_or(false)
    }

    /// Redo last undone change
    pub fn redo(&self) -> bool {
        self.with_editor(|editor| editor.redo()).unwrap_or(false)
    }

    /// Call from the surface's `input` event
    #[wasm_bindgen(js_name = onInput)]
    pub fn on_input(&self) {
        self.with_editor(|editor| editor.record_input());
    }

    /// Export through `converter` and download the result
    pub fn save(&self, converter: &Function) -> bool {
        let artifact = self
            .with_editor(|editor| editor.save(&JsConverter(converter)))
            .flatten();
        let Some(artifact) = artifact else {
            return false;
        };
        match download(&artifact) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %describe(&err), "download failed");
                self.with_editor(|editor| {
                    editor.notify("Failed to save document");
                });
                false
            }
        }
    }

    /// Toolbar state as JSON
    #[wasm_bindgen(js_name = toolbarState)]
    pub fn toolbar_state(&self) -> std::result::Result<String, JsValue> {
        let editor = self
            .session
            .editor
            .try_borrow()
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        serde_json::to_string(&editor.toolbar()).map_err(|err| JsValue::from_str(&err.to_string()))
    }

    #[wasm_bindgen(js_name = statusMessage)]
    pub fn status_message(&self) -> Option<String> {
        let editor = self.session.editor.try_borrow().ok()?;
        editor.status().message().map(str::to_string)
    }

    #[wasm_bindgen(js_name = fontFamilies)]
    pub fn font_families() -> Array {
        FONT_FAMILIES.iter().map(|name| JsValue::from_str(name)).collect()
    }

    #[wasm_bindgen(js_name = fontSizes)]
    pub fn font_sizes() -> Vec<u32> {
        FONT_SIZES.to_vec()
    }

    /// Remove the keyboard listener and any pending status timer
    pub fn destroy(&mut self) {
        self.shortcuts.take();
        if let Some((_, handle)) = self.session.timer.take() {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(handle);
            }
        }
    }
}

impl WasmEditor {
    /// Run `f` on the editor, then schedule clearing any notice it posted
    fn with_editor<T>(&self, f: impl FnOnce(&mut Editor<DomHost>) -> T) -> Option<T> {
        let result = match self.session.editor.try_borrow_mut() {
            Ok(mut editor) => f(&mut editor),
            Err(err) => {
                warn!(%err, "editor busy");
                return None;
            }
        };
        schedule_notice_clear(&self.session);
        Some(result)
    }
}
