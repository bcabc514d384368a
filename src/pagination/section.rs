//! Content sections: the unit the pager slices into pages.
//!
//! A section exposes a display name, a rendered value and an inline flag.
//! The pager never looks past those three capabilities; everything about how
//! a section was produced stays with the producer.

/// How a single labelled value is written into a section body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStyle {
    /// `> **Label**: value`
    Plain,
    /// `> **Label**: `value``
    Code,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: String,
    pub value: String,
    pub style: FieldStyle,
}

impl Field {
    pub fn plain(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            style: FieldStyle::Plain,
        }
    }

    pub fn code(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            style: FieldStyle::Code,
        }
    }

    /// Render as one quoted line. Blank values render as nothing.
    fn write_line(&self, out: &mut String) {
        let value = self.value.trim();
        if value.is_empty() {
            return;
        }
        let value = value.replace(['\r', '\n'], " ");
        match self.style {
            FieldStyle::Plain => out.push_str(&format!("> **{}**: {value}\n", self.label)),
            FieldStyle::Code => out.push_str(&format!("> **{}**: `{value}`\n", self.label)),
        }
    }
}

/// An ordered group of fields plus its inline flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    pub entries: Vec<Field>,
    pub inline: bool,
}

impl Fields {
    pub fn new(entries: Vec<Field>) -> Self {
        Self {
            entries,
            inline: false,
        }
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for field in &self.entries {
            field.write_line(&mut out);
        }
        out.truncate(out.trim_end().len());
        out
    }
}

/// One course-type entry with the details hidden behind "see more".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseTypeEntry {
    pub title: String,
    pub expansions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    CourseSummary { code: String, fields: Fields },
    Schedule(Fields),
    Exam(Fields),
    Responsible(Fields),
    Miscellaneous { heading: String, fields: Fields },
    /// Never displayed inline.
    CourseType(CourseTypeEntry),
}

impl Section {
    pub fn name(&self) -> String {
        match self {
            Self::CourseSummary { code, .. } => format!("**Course: {code}**"),
            Self::Schedule(_) => "Schedule".to_string(),
            Self::Exam(_) => "Exam".to_string(),
            Self::Responsible(_) => "Responsible".to_string(),
            Self::Miscellaneous { heading, .. } => heading.clone(),
            Self::CourseType(entry) => format!("Course Type: {}", entry.title),
        }
    }

    pub fn value(&self) -> String {
        match self {
            Self::CourseType(entry) => entry.expansions.join(", "),
            _ => self.fields().map(Fields::render).unwrap_or_default(),
        }
    }

    pub fn inline(&self) -> bool {
        self.fields().is_some_and(|fields| fields.inline)
    }

    /// Course-type entries ignore the request and stay block-level.
    pub fn set_inline(&mut self, inline: bool) {
        if let Some(fields) = self.fields_mut() {
            fields.inline = inline;
        }
    }

    fn fields(&self) -> Option<&Fields> {
        match self {
            Self::CourseSummary { fields, .. }
            | Self::Miscellaneous { fields, .. }
            | Self::Schedule(fields)
            | Self::Exam(fields)
            | Self::Responsible(fields) => Some(fields),
            Self::CourseType(_) => None,
        }
    }

    fn fields_mut(&mut self) -> Option<&mut Fields> {
        match self {
            Self::CourseSummary { fields, .. }
            | Self::Miscellaneous { fields, .. }
            | Self::Schedule(fields)
            | Self::Exam(fields)
            | Self::Responsible(fields) => Some(fields),
            Self::CourseType(_) => None,
        }
    }
}
