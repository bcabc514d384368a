use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Directory holding one `<number>.json` per course.
    #[serde(default = "default_catalog_dir")]
    pub dir: PathBuf,
    /// Public course page prefix; the course number is appended.
    #[serde(default = "default_course_url_base")]
    pub course_url_base: String,
}

fn default_catalog_dir() -> PathBuf {
    PathBuf::from("courses")
}

fn default_course_url_base() -> String {
    "https://kurser.dtu.dk/course".into()
}

impl CatalogConfig {
    /// Link to the public page of `number`.
    pub fn course_url(&self, number: &str) -> String {
        format!("{}/{number}", self.course_url_base.trim_end_matches('/'))
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            dir: default_catalog_dir(),
            course_url_base: default_course_url_base(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_url_tolerates_trailing_slash() {
        let mut config = CatalogConfig::default();
        assert_eq!(config.course_url("01005"), "https://kurser.dtu.dk/course/01005");

        config.course_url_base = "https://example.org/c/".into();
        assert_eq!(config.course_url("02402"), "https://example.org/c/02402");
    }
}
