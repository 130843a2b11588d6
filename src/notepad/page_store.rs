//! # Page Store
//!
//! The authoritative in-memory notepad: every page, which one is current, how many there
//! are, and whether edits autosave. It always holds at least one page and the current
//! page is always one of them.
//!
//! ## Page ids
//!
//! `total_pages` counts the pages. Ids come from a separate high-water mark that only
//! grows, so after deletions a new page never gets the id of a live or deleted page.
//! Without deletions the next id is `total_pages + 1`.

use crate::error::{NotepadError, Result};
use crate::model::{
    default_page_name, normalize_page_name, Page, PageId, PageStatus, SavedState,
    FIRST_PAGE_CONTENT, LOADED_PAGE_CONTENT, NEW_PAGE_CONTENT,
};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageStore {
    pages: BTreeMap<PageId, Page>,
    current: PageId,
    total_pages: u32,
    high_water: u32,
    auto_save: bool,
}

impl Default for PageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PageStore {
    /// A notepad holding only page 1.
    pub fn new() -> Self {
        let first = Page::new(PageId::FIRST, FIRST_PAGE_CONTENT);
        let mut pages = BTreeMap::new();
        pages.insert(first.id, first);
        Self {
            pages,
            current: PageId::FIRST,
            total_pages: 1,
            high_water: 1,
            auto_save: true,
        }
    }

    /// Rebuilds a store from saved data.
    ///
    /// Pages are keyed by their own `id`. Blank names become the default name and empty
    /// content becomes [`LOADED_PAGE_CONTENT`]. The saved page count is a floor: it is raised
    /// to the highest id present. A saved current page that no longer exists falls back to
    /// the lowest id.
    pub fn from_saved(saved: SavedState, auto_save: bool) -> Result<Self> {
        let mut pages = BTreeMap::new();
        for mut page in saved.pages.into_values() {
            if page.id.get() == 0 || page.id.get() == u32::MAX {
                return Err(NotepadError::CorruptState(format!("page id {}", page.id)));
            }
            if page.name.trim().is_empty() {
                page.name = default_page_name(page.id);
            }
            if page.content.is_empty() {
                page.content = LOADED_PAGE_CONTENT.to_string();
            }
            pages.insert(page.id, page);
        }

        let Some(highest) = pages.keys().next_back().copied() else {
            return Err(NotepadError::CorruptState("no pages".to_string()));
        };
        // Leaves room for at least one more id.
        if saved.total_pages == u32::MAX {
            return Err(NotepadError::CorruptState(format!(
                "page count {}",
                saved.total_pages
            )));
        }
        let total_pages = saved.total_pages.max(highest.get());
        let current = saved
            .current_page
            .filter(|id| pages.contains_key(id))
            .unwrap_or_else(|| lowest_key(&pages));

        Ok(Self {
            pages,
            current,
            total_pages,
            high_water: total_pages,
            auto_save,
        })
    }

    pub fn snapshot(&self) -> SavedState {
        SavedState {
            pages: self.pages.clone(),
            total_pages: self.total_pages,
            current_page: Some(self.current),
        }
    }

    /// Allocates the next id and inserts a page with default name and content.
    /// The new page is not made current. Fails without mutation once ids run out.
    pub fn create_page(&mut self) -> Result<&Page> {
        let exhausted = || NotepadError::CorruptState("page ids exhausted".to_string());
        let next = self
            .total_pages
            .max(self.high_water)
            .checked_add(1)
            .ok_or_else(exhausted)?;
        let total = self.total_pages.checked_add(1).ok_or_else(exhausted)?;
        self.high_water = next;
        self.total_pages = total;

        let id = PageId(next);
        Ok(self
            .pages
            .entry(id)
            .or_insert_with(|| Page::new(id, NEW_PAGE_CONTENT)))
    }

    /// Removes a page. Refuses to remove the only page. When the current page is removed
    /// the lowest remaining id becomes current.
    pub fn delete_page(&mut self, id: PageId) -> Result<Page> {
        if self.pages.len() == 1 {
            return Err(NotepadError::LastPage);
        }
        let removed = self
            .pages
            .remove(&id)
            .ok_or(NotepadError::UnknownPage(id))?;
        self.total_pages = self.total_pages.saturating_sub(1);

        if self.current == id {
            self.current = self.lowest_id();
        }
        Ok(removed)
    }

    pub fn rename_page(&mut self, id: PageId, new_name: &str) -> Result<&Page> {
        let page = self
            .pages
            .get_mut(&id)
            .ok_or(NotepadError::UnknownPage(id))?;
        page.name = normalize_page_name(id, new_name);
        Ok(page)
    }

    pub fn update_content(&mut self, id: PageId, content: impl Into<String>) -> Result<()> {
        let page = self
            .pages
            .get_mut(&id)
            .ok_or(NotepadError::UnknownPage(id))?;
        page.content = content.into();
        Ok(())
    }

    pub fn switch_current(&mut self, id: PageId) -> Result<()> {
        if !self.pages.contains_key(&id) {
            return Err(NotepadError::UnknownPage(id));
        }
        self.current = id;
        Ok(())
    }

    pub fn get(&self, id: PageId) -> Option<&Page> {
        self.pages.get(&id)
    }

    pub fn contains(&self, id: PageId) -> bool {
        self.pages.contains_key(&id)
    }

    /// Pages in ascending id order.
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = PageId> + '_ {
        self.pages.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Always false: a store keeps at least one page.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn current(&self) -> PageId {
        self.current
    }

    pub fn current_page(&self) -> &Page {
        // The current id always resolves to a stored page.
        &self.pages[&self.current]
    }

    pub fn status(&self, id: PageId) -> Option<PageStatus> {
        self.pages.get(&id).map(|_| {
            if id == self.current {
                PageStatus::Active
            } else {
                PageStatus::Inactive
            }
        })
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn auto_save(&self) -> bool {
        self.auto_save
    }

    pub fn set_auto_save(&mut self, on: bool) {
        self.auto_save = on;
    }

    pub fn lowest_id(&self) -> PageId {
        lowest_key(&self.pages)
    }

    pub fn highest_id(&self) -> PageId {
        self.pages
            .keys()
            .next_back()
            .copied()
            .unwrap_or(PageId::FIRST)
    }

    /// Lowest id other than `id`, if any.
    pub fn lowest_other_than(&self, id: PageId) -> Option<PageId> {
        self.pages.keys().copied().find(|k| *k != id)
    }
}

fn lowest_key(pages: &BTreeMap<PageId, Page>) -> PageId {
    pages.keys().next().copied().unwrap_or(PageId::FIRST)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(store: &PageStore) -> Vec<u32> {
        store.ids().map(PageId::get).collect()
    }

    #[test]
    fn starts_with_page_one() {
        let store = PageStore::new();
        assert_eq!(ids(&store), vec![1]);
        assert_eq!(store.current(), PageId(1));
        assert_eq!(store.total_pages(), 1);
        assert!(store.auto_save());
        assert_eq!(store.current_page().name, "Page 1");
    }

    #[test]
    fn create_allocates_increasing_ids() {
        let mut store = PageStore::new();
        assert_eq!(store.create_page().unwrap().id, PageId(2));
        assert_eq!(store.create_page().unwrap().id, PageId(3));
        assert_eq!(store.total_pages(), 3);
        assert_eq!(store.current(), PageId(1));
        assert_eq!(store.get(PageId(3)).unwrap().content, NEW_PAGE_CONTENT);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = PageStore::new();
        store.create_page().unwrap();
        store.create_page().unwrap();
        store.delete_page(PageId(3)).unwrap();
        store.delete_page(PageId(2)).unwrap();

        assert_eq!(store.create_page().unwrap().id, PageId(4));
        assert_eq!(store.total_pages(), 2);
    }

    #[test]
    fn ids_strictly_increase_with_interleaved_deletes() {
        let mut store = PageStore::new();
        let mut created = Vec::new();
        for n in 0..10 {
            created.push(store.create_page().unwrap().id.get());
            if n % 3 == 0 {
                let victim = store.highest_id();
                store.delete_page(victim).unwrap();
            }
        }
        assert_eq!(created, (2..=11).collect::<Vec<_>>());
        assert!(!store.is_empty());
    }

    #[test]
    fn delete_last_page_is_rejected_without_mutation() {
        let mut store = PageStore::new();
        let before = store.clone();
        assert!(matches!(
            store.delete_page(PageId(1)),
            Err(NotepadError::LastPage)
        ));
        assert_eq!(store, before);
    }

    #[test]
    fn delete_unknown_page() {
        let mut store = PageStore::new();
        store.create_page().unwrap();
        assert!(matches!(
            store.delete_page(PageId(9)),
            Err(NotepadError::UnknownPage(PageId(9)))
        ));
        assert_eq!(store.total_pages(), 2);
    }

    #[test]
    fn deleting_current_moves_to_lowest_remaining() {
        let mut store = PageStore::new();
        store.create_page().unwrap();
        store.create_page().unwrap();
        store.switch_current(PageId(1)).unwrap();
        store.delete_page(PageId(1)).unwrap();
        assert_eq!(store.current(), PageId(2));
        assert!(store.contains(store.current()));
    }

    #[test]
    fn deleting_other_page_keeps_current() {
        let mut store = PageStore::new();
        store.create_page().unwrap();
        store.create_page().unwrap();
        store.switch_current(PageId(3)).unwrap();
        store.delete_page(PageId(2)).unwrap();
        assert_eq!(ids(&store), vec![1, 3]);
        assert_eq!(store.current(), PageId(3));
        assert_eq!(store.total_pages(), 2);
    }

    #[test]
    fn rename_normalizes() {
        let mut store = PageStore::new();
        assert_eq!(store.rename_page(PageId(1), "  Todo  ").unwrap().name, "Todo");
        assert_eq!(store.rename_page(PageId(1), "").unwrap().name, "Page 1");
        assert_eq!(store.rename_page(PageId(1), "   ").unwrap().name, "Page 1");
        assert_eq!(
            store.rename_page(PageId(1), &"A".repeat(30)).unwrap().name,
            "A".repeat(20)
        );
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let mut store = PageStore::new();
        assert!(matches!(
            store.rename_page(PageId(5), "x"),
            Err(NotepadError::UnknownPage(_))
        ));
        assert!(matches!(
            store.update_content(PageId(5), "x"),
            Err(NotepadError::UnknownPage(_))
        ));
        assert!(matches!(
            store.switch_current(PageId(5)),
            Err(NotepadError::UnknownPage(_))
        ));
        assert_eq!(store.current(), PageId(1));
    }

    #[test]
    fn status_follows_current() {
        let mut store = PageStore::new();
        store.create_page().unwrap();
        store.switch_current(PageId(2)).unwrap();
        assert_eq!(store.status(PageId(2)), Some(PageStatus::Active));
        assert_eq!(store.status(PageId(1)), Some(PageStatus::Inactive));
        assert_eq!(store.status(PageId(3)), None);
    }

    #[test]
    fn snapshot_round_trips_through_from_saved() {
        let mut store = PageStore::new();
        store.create_page().unwrap();
        store.rename_page(PageId(2), "Second").unwrap();
        store.switch_current(PageId(2)).unwrap();

        let rebuilt = PageStore::from_saved(store.snapshot(), true).unwrap();
        assert_eq!(rebuilt, store);
    }

    #[test]
    fn from_saved_raises_stale_total() {
        let mut store = PageStore::new();
        store.create_page().unwrap();
        store.create_page().unwrap();
        store.delete_page(PageId(2)).unwrap();
        let mut saved = store.snapshot();
        saved.total_pages = 1;

        let rebuilt = PageStore::from_saved(saved, true).unwrap();
        assert_eq!(rebuilt.total_pages(), 3);
        assert_eq!(rebuilt.clone().create_page().unwrap().id, PageId(4));
    }

    #[test]
    fn from_saved_falls_back_to_lowest_page() {
        let mut store = PageStore::new();
        store.create_page().unwrap();
        store.create_page().unwrap();
        store.delete_page(PageId(1)).unwrap();
        let mut saved = store.snapshot();
        saved.current_page = Some(PageId(1));

        let rebuilt = PageStore::from_saved(saved, false).unwrap();
        assert_eq!(rebuilt.current(), PageId(2));
        assert!(!rebuilt.auto_save());
    }

    #[test]
    fn from_saved_fills_blank_fields() {
        let mut saved = PageStore::new().snapshot();
        if let Some(page) = saved.pages.get_mut(&PageId(1)) {
            page.name = " ".into();
            page.content.clear();
        }
        let rebuilt = PageStore::from_saved(saved, true).unwrap();
        assert_eq!(rebuilt.current_page().name, "Page 1");
        assert_eq!(rebuilt.current_page().content, LOADED_PAGE_CONTENT);
    }

    #[test]
    fn from_saved_rejects_empty() {
        let saved = SavedState {
            pages: BTreeMap::new(),
            total_pages: 1,
            current_page: None,
        };
        assert!(matches!(
            PageStore::from_saved(saved, true),
            Err(NotepadError::CorruptState(_))
        ));
    }

    #[test]
    fn from_saved_rejects_saturated_counters() {
        let mut saved = PageStore::new().snapshot();
        saved.total_pages = u32::MAX;
        assert!(matches!(
            PageStore::from_saved(saved, true),
            Err(NotepadError::CorruptState(_))
        ));

        let mut saved = PageStore::new().snapshot();
        let page = Page::new(PageId(u32::MAX), NEW_PAGE_CONTENT);
        saved.pages.insert(page.id, page);
        assert!(matches!(
            PageStore::from_saved(saved, true),
            Err(NotepadError::CorruptState(_))
        ));
    }

    #[test]
    fn create_fails_once_ids_run_out() {
        let mut saved = PageStore::new().snapshot();
        saved.total_pages = u32::MAX - 1;
        let mut store = PageStore::from_saved(saved, true).unwrap();

        assert_eq!(store.create_page().unwrap().id, PageId(u32::MAX));
        let before = store.clone();
        assert!(matches!(
            store.create_page(),
            Err(NotepadError::CorruptState(_))
        ));
        assert_eq!(store, before);
    }
}
