use chrono::{DateTime, Utc};

use super::state::PagingState;
use crate::error::PaginationError;

/// One section as it appears on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// A page ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub title: String,
    pub description: String,
    pub footer: String,
    pub color: u32,
    pub timestamp: DateTime<Utc>,
    pub fields: Vec<RenderedField>,
    pub page_index: usize,
    pub page_count: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

impl RenderedPage {
    /// Human-readable position, e.g. `Page 2 of 3`.
    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.page_index + 1, self.page_count)
    }
}

/// Render page `index` of `state`.
///
/// Pure: the same state and index always give the same page. Fails with
/// [`PaginationError::RenderDefect`] when the state cannot be paged at all
/// (zero page size, no sections) or `index` is past the last page.
pub fn render(state: &PagingState, index: usize) -> Result<RenderedPage, PaginationError> {
    let page_size = state.page_size();
    if page_size == 0 {
        return Err(PaginationError::RenderDefect("page size is zero".into()));
    }
    let sections = state.sections();
    if sections.is_empty() {
        return Err(PaginationError::RenderDefect("no sections to page".into()));
    }
    let page_count = state.page_count();
    if index >= page_count {
        return Err(PaginationError::RenderDefect(format!(
            "page index {index} out of range for {page_count} pages"
        )));
    }

    let start = index * page_size;
    let end = sections.len().min(start + page_size);
    let fields = sections[start..end]
        .iter()
        .map(|section| RenderedField {
            name: section.name(),
            value: section.value(),
            inline: section.inline(),
        })
        .collect();

    let meta = state.meta();
    Ok(RenderedPage {
        title: meta.title.clone(),
        description: meta.description.clone(),
        footer: meta.footer.clone(),
        color: meta.color,
        timestamp: meta.created_at,
        fields,
        page_index: index,
        page_count,
        has_prev: index > 0,
        has_next: end < sections.len(),
    })
}
