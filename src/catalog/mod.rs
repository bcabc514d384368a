//! Locally stored course records: the content source for `/fetch_course`.

pub mod course;
pub mod directory;

pub use course::{COURSE_COLOR, Course, CourseTypeBlock, parse_courses};
pub use directory::{CourseDirectory, MAX_SUGGESTIONS, Suggestion};

/// Shown when no record exists for the requested code.
pub fn not_found_notice(code: &str) -> String {
    format!("No course found for ID: {code}")
}

/// Shown when the catalog could not be read.
pub const READ_FAILURE_NOTICE: &str = "Error fetching course data.";
