use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::course::Course;
use crate::error::CatalogError;

/// Discord shows at most this many autocomplete choices.
pub const MAX_SUGGESTIONS: usize = 25;

/// An autocomplete choice: `label` is shown, `number` is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub label: String,
    pub number: String,
}

/// Course records stored as `<dir>/<number>.json`.
#[derive(Debug, Clone)]
pub struct CourseDirectory {
    root: PathBuf,
}

impl CourseDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, number: &str) -> Result<PathBuf, CatalogError> {
        let number = number.trim();
        if number.is_empty() || !number.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CatalogError::InvalidCourseNumber(number.to_owned()));
        }
        Ok(self.root.join(format!("{number}.json")))
    }

    /// The stored record for `number`, or `None` when there is none.
    pub fn load(&self, number: &str) -> Result<Option<Course>, CatalogError> {
        let path = self.path_for(number)?;
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut course: Course =
            serde_json::from_str(&contents).map_err(|e| CatalogError::Malformed {
                number: number.trim().to_owned(),
                message: e.to_string(),
            })?;
        if course.course_number.trim().is_empty() {
            course.course_number = number.trim().to_owned();
        }
        Ok(Some(course))
    }

    /// Write `course`, replacing any earlier record with the same number.
    pub fn save(&self, course: &Course) -> Result<PathBuf, CatalogError> {
        let path = self.path_for(&course.course_number)?;
        fs::create_dir_all(&self.root)?;
        let json = serde_json::to_string_pretty(course).map_err(|e| CatalogError::Malformed {
            number: course.course_number.clone(),
            message: e.to_string(),
        })?;
        fs::write(&path, json)?;
        Ok(path)
    }

    /// Every readable record, sorted by course number. A missing directory
    /// is an empty catalog.
    pub fn list(&self) -> Result<Vec<Course>, CatalogError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut courses = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(number) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            match self.load(number) {
                Ok(Some(course)) => courses.push(course),
                Ok(None) => {}
                Err(e) => tracing::warn!(path = %path.display(), "skipping course record: {e}"),
            }
        }
        courses.sort_by(|a, b| a.course_number.cmp(&b.course_number));
        Ok(courses)
    }

    /// Courses whose `"<number>, <title>"` label starts with `prefix`,
    /// ignoring case. At most `limit` results, capped at [`MAX_SUGGESTIONS`].
    pub fn suggest(&self, prefix: &str, limit: usize) -> Result<Vec<Suggestion>, CatalogError> {
        let needle = prefix.trim().to_uppercase();
        let limit = limit.min(MAX_SUGGESTIONS);

        Ok(self
            .list()?
            .into_iter()
            .map(|course| Suggestion {
                label: course.label(),
                number: course.course_number,
            })
            .filter(|suggestion| suggestion.label.to_uppercase().starts_with(&needle))
            .take(limit)
            .collect())
    }
}
