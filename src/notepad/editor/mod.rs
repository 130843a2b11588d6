//! # Editor Surface Binding
//!
//! Every page is shown in a live editable surface owned by the UI: a rich-text region in
//! a browser, a buffer in a TUI, a string in tests. [`SurfaceHost`] is what the notepad
//! needs from whoever owns those surfaces; [`EditorBinding`] keeps exactly one surface per
//! page and knows which one is active.
//!
//! Change notifications run the other way round from a browser: instead of registering a
//! callback, the UI adapter calls [`crate::api::NotepadApi::surface_edited`] whenever a
//! surface reports an edit.

use crate::model::PageId;
use crate::text;
use std::collections::BTreeSet;

mod format;
mod memory;

pub use format::FormatCommand;
pub use memory::MemorySurfaces;

/// Capability to manage rich-text editable regions, one per page id.
pub trait SurfaceHost {
    /// Create a surface for `id` holding `content`.
    fn create(&mut self, id: PageId, content: &str);

    /// Tear down the surface for `id`.
    fn destroy(&mut self, id: PageId);

    /// Current serialized content of the surface.
    fn read(&self, id: PageId) -> Option<String>;

    /// Replace the surface's content.
    fn write(&mut self, id: PageId, content: &str);

    /// Apply `command` to the surface's current selection.
    fn apply_format(&mut self, id: PageId, command: &FormatCommand);

    /// Give input focus to the surface.
    fn focus(&mut self, id: PageId);
}

/// Binds page ids to surfaces of a [`SurfaceHost`].
///
/// The binding holds ids only; pages themselves belong to the page store.
pub struct EditorBinding<H: SurfaceHost> {
    host: H,
    bound: BTreeSet<PageId>,
    active: Option<PageId>,
}

impl<H: SurfaceHost> EditorBinding<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            bound: BTreeSet::new(),
            active: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Binds a surface for `id`. An already bound surface is reused and its content
    /// overwritten in place.
    pub fn bind(&mut self, id: PageId, content: &str) {
        if self.bound.insert(id) {
            self.host.create(id, content);
        } else {
            self.host.write(id, content);
        }
    }

    pub fn unbind(&mut self, id: PageId) {
        if self.bound.remove(&id) {
            self.host.destroy(id);
            if self.active == Some(id) {
                self.active = None;
            }
        }
    }

    pub fn unbind_all(&mut self) {
        let ids: Vec<PageId> = self.bound.iter().copied().collect();
        for id in ids {
            self.unbind(id);
        }
    }

    pub fn is_bound(&self, id: PageId) -> bool {
        self.bound.contains(&id)
    }

    pub fn bound_ids(&self) -> impl Iterator<Item = PageId> + '_ {
        self.bound.iter().copied()
    }

    /// Makes `id` the active surface. Ignored for unbound ids.
    pub fn activate(&mut self, id: PageId) {
        if self.bound.contains(&id) {
            self.active = Some(id);
        }
    }

    pub fn active(&self) -> Option<PageId> {
        self.active
    }

    pub fn read(&self, id: PageId) -> Option<String> {
        if !self.bound.contains(&id) {
            return None;
        }
        self.host.read(id)
    }

    pub fn write(&mut self, id: PageId, content: &str) -> bool {
        if !self.bound.contains(&id) {
            return false;
        }
        self.host.write(id, content);
        true
    }

    /// Visible characters across every bound surface.
    pub fn char_count(&self) -> usize {
        self.bound
            .iter()
            .filter_map(|id| self.host.read(*id))
            .map(|markup| text::char_count(&markup))
            .sum()
    }

    /// Applies `command` to the active surface and hands focus back to it.
    /// Returns the surface it was applied to, or `None` when no surface is active.
    pub fn format(&mut self, command: &FormatCommand) -> Option<PageId> {
        let id = self.active?;
        self.host.apply_format(id, command);
        self.host.focus(id);
        Some(id)
    }

    pub fn focus(&mut self, id: PageId) {
        if self.bound.contains(&id) {
            self.host.focus(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding() -> EditorBinding<MemorySurfaces> {
        EditorBinding::new(MemorySurfaces::new())
    }

    #[test]
    fn bind_creates_then_reuses() {
        let mut editors = binding();
        editors.bind(PageId(1), "<p>a</p>");
        editors.bind(PageId(1), "<p>b</p>");
        assert_eq!(editors.host().len(), 1);
        assert_eq!(editors.read(PageId(1)).unwrap(), "<p>b</p>");
    }

    #[test]
    fn unbind_destroys_surface_and_clears_active() {
        let mut editors = binding();
        editors.bind(PageId(1), "");
        editors.activate(PageId(1));
        editors.unbind(PageId(1));
        assert!(!editors.host().exists(PageId(1)));
        assert_eq!(editors.active(), None);
    }

    #[test]
    fn char_count_spans_all_surfaces() {
        let mut editors = binding();
        editors.bind(PageId(1), "<p>abc</p>");
        editors.bind(PageId(2), "<p>de</p>");
        editors.activate(PageId(1));
        assert_eq!(editors.char_count(), 5);
    }

    #[test]
    fn format_without_active_surface_is_inert() {
        let mut editors = binding();
        editors.bind(PageId(1), "<p>abc</p>");
        editors.host_mut().select_all(PageId(1));
        assert_eq!(editors.format(&FormatCommand::Bold), None);
        assert_eq!(editors.read(PageId(1)).unwrap(), "<p>abc</p>");
    }

    #[test]
    fn format_targets_active_surface_and_focuses_it() {
        let mut editors = binding();
        editors.bind(PageId(1), "<p>abc</p>");
        editors.bind(PageId(2), "<p>xyz</p>");
        editors.host_mut().select_all(PageId(1));
        editors.host_mut().select_all(PageId(2));
        editors.activate(PageId(2));

        assert_eq!(editors.format(&FormatCommand::Bold), Some(PageId(2)));
        assert_eq!(editors.read(PageId(1)).unwrap(), "<p>abc</p>");
        assert_eq!(editors.read(PageId(2)).unwrap(), "<p><b>xyz</b></p>");
        assert_eq!(editors.host().focused(), Some(PageId(2)));
    }

    #[test]
    fn focus_ignores_unbound_ids() {
        let mut editors = binding();
        editors.focus(PageId(3));
        assert_eq!(editors.host().focused(), None);
    }
}
