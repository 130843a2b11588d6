use super::{FormatCommand, SurfaceHost};
use crate::model::PageId;
use crate::text;
use std::collections::BTreeMap;
use std::ops::Range;

#[derive(Debug, Clone, Default)]
struct Surface {
    markup: String,
    selection: Option<Range<usize>>,
}

/// Headless surface host: each surface is a markup string plus an optional selection.
///
/// Selections are ranges of visible characters (see [`text::markup_range`]). Formatting
/// wraps the selected text in the command's tags; without a selection it does nothing,
/// like a collapsed caret in a browser.
#[derive(Debug, Default)]
pub struct MemorySurfaces {
    surfaces: BTreeMap<PageId, Surface>,
    focused: Option<PageId>,
}

impl MemorySurfaces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects characters `range` of the surface. Returns false if the surface does not
    /// exist or the range does not fit its text.
    pub fn select(&mut self, id: PageId, range: Range<usize>) -> bool {
        let Some(surface) = self.surfaces.get_mut(&id) else {
            return false;
        };
        if range.start >= range.end || range.end > text::text_len(&surface.markup) {
            return false;
        }
        surface.selection = Some(range);
        true
    }

    /// Selects all text of the surface. Returns false if there is nothing to select.
    pub fn select_all(&mut self, id: PageId) -> bool {
        let len = match self.surfaces.get(&id) {
            Some(surface) => text::text_len(&surface.markup),
            None => return false,
        };
        self.select(id, 0..len)
    }

    pub fn clear_selection(&mut self, id: PageId) {
        if let Some(surface) = self.surfaces.get_mut(&id) {
            surface.selection = None;
        }
    }

    pub fn selection(&self, id: PageId) -> Option<Range<usize>> {
        self.surfaces.get(&id).and_then(|s| s.selection.clone())
    }

    pub fn focused(&self) -> Option<PageId> {
        self.focused
    }

    pub fn exists(&self, id: PageId) -> bool {
        self.surfaces.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

impl SurfaceHost for MemorySurfaces {
    fn create(&mut self, id: PageId, content: &str) {
        self.surfaces.insert(
            id,
            Surface {
                markup: content.to_string(),
                selection: None,
            },
        );
    }

    fn destroy(&mut self, id: PageId) {
        self.surfaces.remove(&id);
        if self.focused == Some(id) {
            self.focused = None;
        }
    }

    fn read(&self, id: PageId) -> Option<String> {
        self.surfaces.get(&id).map(|s| s.markup.clone())
    }

    fn write(&mut self, id: PageId, content: &str) {
        if let Some(surface) = self.surfaces.get_mut(&id) {
            surface.markup = content.to_string();
            surface.selection = None;
        }
    }

    fn apply_format(&mut self, id: PageId, command: &FormatCommand) {
        let Some(surface) = self.surfaces.get_mut(&id) else {
            return;
        };
        let Some(selection) = surface.selection.clone() else {
            return;
        };
        let Some(span) = text::markup_range(&surface.markup, selection) else {
            return;
        };

        let (open, close) = command.tags();
        let mut formatted = String::with_capacity(surface.markup.len() + open.len() + close.len());
        formatted.push_str(&surface.markup[..span.start]);
        formatted.push_str(&open);
        formatted.push_str(&surface.markup[span.clone()]);
        formatted.push_str(close);
        formatted.push_str(&surface.markup[span.end..]);
        surface.markup = formatted;
    }

    fn focus(&mut self, id: PageId) {
        if self.surfaces.contains_key(&id) {
            self.focused = Some(id);
        }
    }
}
