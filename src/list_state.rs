//! Receipt List State
//!
//! Everything the list view shows, as one plain value held in a signal by
//! the view. Transitions are methods so they can be tested without a DOM.

use std::num::NonZeroUsize;

use crate::listing::{clamp_page, filter_receipts, page_count, page_slice, sort_newest_first, ReceiptFilter};
use crate::models::{Receipt, ReceiptId};

#[derive(Debug, Clone, PartialEq)]
pub enum LoadPhase {
    Loading,
    Loaded,
    Failed(String),
}

/// What the list area renders
#[derive(Debug, Clone, PartialEq)]
pub enum ListView {
    Loading,
    Failed(String),
    Ready,
    /// A filter is applied and nothing matches
    EmptyFiltered,
}

#[derive(Debug, Clone)]
pub struct ReceiptListState {
    phase: LoadPhase,
    /// Full set, newest first
    receipts: Vec<Receipt>,
    /// `receipts` after `filter`
    visible: Vec<Receipt>,
    filter: ReceiptFilter,
    page: usize,
    page_size: NonZeroUsize,
    selected: Option<ReceiptId>,
}

impl ReceiptListState {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            phase: LoadPhase::Loading,
            receipts: Vec::new(),
            visible: Vec::new(),
            filter: ReceiptFilter::default(),
            page: 1,
            page_size,
            selected: None,
        }
    }

    pub fn view(&self) -> ListView {
        match &self.phase {
            LoadPhase::Loading => ListView::Loading,
            LoadPhase::Failed(message) => ListView::Failed(message.clone()),
            LoadPhase::Loaded if self.filter.is_active() && self.visible.is_empty() => ListView::EmptyFiltered,
            LoadPhase::Loaded => ListView::Ready,
        }
    }

    pub fn begin_loading(&mut self) {
        self.phase = LoadPhase::Loading;
    }

    /// Replace the set with a fetch result. Receipts uploaded while the fetch
    /// was in flight are kept.
    pub fn finish_loading(&mut self, fetched: Vec<Receipt>) {
        let uploaded: Vec<Receipt> = self
            .receipts
            .drain(..)
            .filter(|local| !fetched.iter().any(|r| r.id == local.id))
            .collect();

        self.receipts = fetched;
        self.receipts.extend(uploaded);
        sort_newest_first(&mut self.receipts);
        self.phase = LoadPhase::Loaded;
        self.refilter();
        self.page = 1;
    }

    pub fn fail_loading(&mut self, message: impl Into<String>) {
        self.phase = LoadPhase::Failed(message.into());
    }

    /// Apply a filter and return to page 1
    pub fn apply_filter(&mut self, filter: ReceiptFilter) {
        self.filter = filter;
        self.refilter();
        self.page = 1;
    }

    pub fn clear_filter(&mut self) {
        self.apply_filter(ReceiptFilter::default());
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        page_count(self.visible.len(), self.page_size)
    }

    /// Button labels, `1..=page_count`
    pub fn page_numbers(&self) -> Vec<usize> {
        (1..=self.page_count()).collect()
    }

    /// Jump to `page`, clamped into range
    pub fn set_page(&mut self, page: usize) {
        self.page = clamp_page(page, self.page_count());
    }

    pub fn current_page_items(&self) -> &[Receipt] {
        page_slice(&self.visible, self.page, self.page_size)
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Full set, ignoring the filter
    pub fn receipts(&self) -> &[Receipt] {
        &self.receipts
    }

    /// Select a receipt for the detail modal. Unknown ids are ignored.
    pub fn open_detail(&mut self, id: &ReceiptId) {
        if self.receipts.iter().any(|r| &r.id == id) {
            self.selected = Some(id.clone());
        }
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    pub fn selected_receipt(&self) -> Option<&Receipt> {
        let id = self.selected.as_ref()?;
        self.receipts.iter().find(|r| &r.id == id)
    }

    /// Add a freshly uploaded receipt; an existing id is replaced
    pub fn push_uploaded(&mut self, receipt: Receipt) {
        self.receipts.retain(|r| r.id != receipt.id);
        self.receipts.push(receipt);
        sort_newest_first(&mut self.receipts);
        self.refilter();
        self.page = clamp_page(self.page, self.page_count());
    }

    fn refilter(&mut self) {
        self.visible = filter_receipts(&self.receipts, &self.filter);
    }
}
