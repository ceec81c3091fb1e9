//! Capabilities borrowed from the host editing engine

mod memory;

pub use memory::MemoryHost;

use crate::error::Result;
use crate::state::{Alignment, FormatKind};

/// The native editing surface the editor drives.
///
/// The browser implementation lives in [`crate::wasm`]. [`MemoryHost`] models
/// the same behavior on a markup string.
pub trait HostEngine {
    /// Serialized markup of the whole surface
    fn content(&self) -> String;

    /// Overwrite the surface with `markup`
    fn set_content(&mut self, markup: &str);

    /// Whether a non-empty selection inside the surface exists right now
    fn has_selection(&self) -> bool;

    /// Wrap the current selection in a span styled `attribute: value`
    fn wrap_selection(&mut self, attribute: &str, value: &str) -> Result<()>;

    fn clear_selection(&mut self);

    /// Set `attribute: value` on the surface element's own style
    fn set_surface_style(&mut self, attribute: &str, value: &str) -> Result<()>;

    /// Toggle an inline format on the current selection
    fn exec_format(&mut self, kind: FormatKind) -> Result<()>;

    /// Run the built-in justify command
    fn exec_justify(&mut self, alignment: Alignment) -> Result<()>;

    /// Render a status message; `None` clears it
    fn show_status(&mut self, _message: Option<&str>) {}
}
