use chrono::{DateTime, Utc};

use super::section::Section;

/// Everything shown around the sections of a paged message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayMeta {
    pub title: String,
    pub description: String,
    pub footer: String,
    pub color: u32,
    /// User id of whoever triggered the command; only they may navigate.
    pub requester_id: String,
    pub created_at: DateTime<Utc>,
}

/// Ordered sections, a fixed page size and the page currently shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagingState {
    sections: Vec<Section>,
    page_size: usize,
    page_index: usize,
    meta: DisplayMeta,
}

impl PagingState {
    /// A state positioned on the first page.
    pub fn new(sections: Vec<Section>, page_size: usize, meta: DisplayMeta) -> Self {
        Self {
            sections,
            page_size,
            page_index: 0,
            meta,
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn meta(&self) -> &DisplayMeta {
        &self.meta
    }

    /// `ceil(len / page_size)`; zero for an empty state or a zero page size.
    pub fn page_count(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        self.sections.len().div_ceil(self.page_size)
    }

    /// Move by `delta` pages, clamped to `[0, page_count - 1]`.
    ///
    /// Returns the resulting index, which may equal the previous one.
    pub(crate) fn step(&mut self, delta: isize) -> usize {
        let last = self.page_count().saturating_sub(1);
        let target = if delta.is_negative() {
            self.page_index.saturating_sub(delta.unsigned_abs())
        } else {
            self.page_index.saturating_add(delta.unsigned_abs())
        };
        self.page_index = target.min(last);
        self.page_index
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::pagination::section::{Field, Fields};

    pub(crate) fn meta(requester: &str) -> DisplayMeta {
        DisplayMeta {
            title: "Fetched course: 02105 - Algorithms".into(),
            description: String::new(),
            footer: "Fetched from https://kurser.dtu.dk/course/02105".into(),
            color: 0x0060_6060,
            requester_id: requester.into(),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    pub(crate) fn numbered_sections(count: usize) -> Vec<Section> {
        (0..count)
            .map(|i| Section::Miscellaneous {
                heading: format!("Section {i}"),
                fields: Fields::new(vec![Field::plain("Index", i.to_string())]),
            })
            .collect()
    }

    pub(crate) fn state(sections: usize, page_size: usize) -> PagingState {
        PagingState::new(numbered_sections(sections), page_size, meta("requester"))
    }
}
