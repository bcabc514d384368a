use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pagination::{
    CourseTypeEntry, DisplayMeta, Field, Fields, PagingState, Section,
};

/// Embed color used for course results.
pub const COURSE_COLOR: u32 = 0x0060_6060;

/// One course-type line and the details listed under it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseTypeBlock {
    pub title: String,
    #[serde(default)]
    pub expansions: Vec<String>,
}

/// A course record as stored in the catalog directory.
///
/// Every text field is optional in the file; blank ones are left out of the
/// rendered sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Course {
    pub course_number: String,
    pub title: String,
    pub english_title: String,
    pub language: String,
    pub ects: String,
    #[serde(rename = "type")]
    pub course_type: String,
    pub schedule: String,
    pub location: String,
    pub teaching_format: String,
    pub duration: String,
    pub exam_placement: String,
    pub evaluation: String,
    pub exam_duration: String,
    pub allowed_materials: String,
    pub grading_scale: String,
    pub point_reference: String,
    pub prerequisites: String,
    pub course_responsible: String,
    pub co_responsible: String,
    pub institute: String,
    pub website: String,
    pub fetched_at: Option<DateTime<Utc>>,
    pub course_types: Vec<CourseTypeBlock>,
}

impl Course {
    /// `"<number>, <title>"`, the label autocomplete shows.
    pub fn label(&self) -> String {
        format!("{}, {}", self.course_number, self.title)
    }

    /// Sections in display order: summary, schedule, exam, responsible,
    /// additional, then one per course-type block.
    pub fn sections(&self) -> Vec<Section> {
        let mut summary = vec![
            Field::plain("Title", &self.title),
            Field::plain("English Title", &self.english_title),
            Field::code("ECTS", &self.ects),
            Field::code("Language", &self.language),
            Field::code("Course Type", &self.course_type),
        ];
        if let Some(fetched_at) = self.fetched_at {
            summary.push(Field::code(
                "Fetched",
                fetched_at.format("%a, %d %b %Y %H:%M:%S UTC").to_string(),
            ));
        }

        let mut additional = vec![
            Field::plain("Prerequisites", &self.prerequisites),
            Field::plain("Point Reference", &self.point_reference),
        ];
        if !self.website.trim().is_empty() {
            additional.push(Field::plain(
                "Website",
                format!("[Course Page]({})", self.website.trim()),
            ));
        }

        let mut sections = vec![
            Section::CourseSummary {
                code: self.course_number.clone(),
                fields: Fields::new(summary),
            },
            Section::Schedule(Fields::new(vec![
                Field::code("Schedule", &self.schedule),
                Field::code("Location", &self.location),
                Field::code("Teaching Format", &self.teaching_format),
                Field::code("Duration", &self.duration),
            ])),
            Section::Exam(Fields::new(vec![
                Field::code("Exam Placement", &self.exam_placement),
                Field::code("Evaluation", &self.evaluation),
                Field::code("Exam Duration", &self.exam_duration),
                Field::code("Allowed Materials", &self.allowed_materials),
                Field::code("Grading Scale", &self.grading_scale),
            ])),
            Section::Responsible(Fields::new(vec![
                Field::plain("Course Responsible", &self.course_responsible),
                Field::plain("Co-Responsible", &self.co_responsible),
                Field::plain("Institute", &self.institute),
            ])),
            Section::Miscellaneous {
                heading: "Additional".into(),
                fields: Fields::new(additional),
            },
        ];

        sections.extend(
            self.course_types
                .iter()
                .filter(|block| !block.title.trim().is_empty())
                .map(|block| {
                    Section::CourseType(CourseTypeEntry {
                        title: block.title.trim().to_owned(),
                        expansions: block.expansions.clone(),
                    })
                }),
        );
        sections
    }

    /// Paging state for showing this course to `requester_id`.
    ///
    /// `requested_code` is the code as the user typed it; `course_url` is the
    /// public page the footer points at.
    pub fn paging_state(
        &self,
        requested_code: &str,
        requester_id: &str,
        page_size: usize,
        course_url: &str,
    ) -> PagingState {
        let meta = DisplayMeta {
            title: format!("Fetched course: {requested_code} - {}", self.title),
            description: String::new(),
            footer: format!("Fetched from {course_url}"),
            color: COURSE_COLOR,
            requester_id: requester_id.to_owned(),
            created_at: Utc::now(),
        };
        PagingState::new(self.sections(), page_size, meta)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<Course>),
    One(Box<Course>),
}

/// Parse a JSON document holding either one course or an array of them.
pub fn parse_courses(json: &str) -> Result<Vec<Course>, serde_json::Error> {
    Ok(match serde_json::from_str(json)? {
        OneOrMany::Many(courses) => courses,
        OneOrMany::One(course) => vec![*course],
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub(crate) fn algorithms() -> Course {
        Course {
            course_number: "02105".into(),
            title: "Algoritmer og datastrukturer".into(),
            english_title: "Algorithms and Data Structures".into(),
            language: "Danish".into(),
            ects: "5".into(),
            course_type: "BSc".into(),
            schedule: "E1A (Mon 8-12)".into(),
            location: "Campus Lyngby".into(),
            exam_placement: "December".into(),
            evaluation: "Written exam".into(),
            course_responsible: "Inge Li Gørtz".into(),
            website: "https://learn.inside.dtu.dk".into(),
            course_types: vec![
                CourseTypeBlock {
                    title: "BSc".into(),
                    expansions: vec![],
                },
                CourseTypeBlock {
                    title: "Polytechnical foundation".into(),
                    expansions: vec!["Software Technology".into(), "Mathematics".into()],
                },
            ],
            ..Course::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::algorithms;
    use super::*;

    #[test]
    fn sections_follow_display_order() {
        let names: Vec<String> = algorithms().sections().iter().map(Section::name).collect();
        assert_eq!(
            names,
            [
                "**Course: 02105**",
                "Schedule",
                "Exam",
                "Responsible",
                "Additional",
                "Course Type: BSc",
                "Course Type: Polytechnical foundation",
            ]
        );
    }

    #[test]
    fn blank_fields_are_left_out() {
        let sections = algorithms().sections();
        let schedule = sections[1].value();
        assert!(schedule.contains("> **Schedule**: `E1A (Mon 8-12)`"));
        assert!(!schedule.contains("Duration"));

        let additional = sections[4].value();
        assert_eq!(
            additional,
            "> **Website**: [Course Page](https://learn.inside.dtu.dk)"
        );
    }

    #[test]
    fn course_type_lists_expansions() {
        let sections = algorithms().sections();
        assert_eq!(sections[5].value(), "");
        assert_eq!(sections[6].value(), "Software Technology, Mathematics");
    }

    #[test]
    fn paging_state_carries_display_metadata() {
        let state = algorithms().paging_state(
            "02105",
            "user-7",
            5,
            "https://kurser.dtu.dk/course/02105",
        );
        let meta = state.meta();
        assert_eq!(meta.title, "Fetched course: 02105 - Algoritmer og datastrukturer");
        assert_eq!(meta.footer, "Fetched from https://kurser.dtu.dk/course/02105");
        assert_eq!(meta.color, COURSE_COLOR);
        assert_eq!(meta.requester_id, "user-7");
        assert_eq!(state.page_count(), 2);
        assert_eq!(state.page_index(), 0);
    }

    #[test]
    fn parses_single_record_and_arrays() {
        let one = r#"{"course_number": "01005", "title": "Matematik 1", "type": "BSc"}"#;
        let parsed = parse_courses(one).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].course_type, "BSc");

        let many = r#"[{"course_number": "01005"}, {"course_number": "02402"}]"#;
        assert_eq!(parse_courses(many).unwrap().len(), 2);

        assert!(parse_courses("42").is_err());
    }
}
