//! Courses: storage entity, outward DTO and creation payload

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Stored course, always owned by one author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub author_id: Uuid,
}

impl Course {
    pub fn new(author_id: Uuid, title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description,
            author_id,
        }
    }
}

crate::impl_shapeable!(Course {
    "Id" => id,
    "Title" => title,
    "Description" => description,
    "AuthorId" => author_id,
});

/// Course as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDto {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub author_id: Uuid,
}

impl From<&Course> for CourseDto {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id,
            title: course.title.clone(),
            description: course.description.clone(),
            author_id: course.author_id,
        }
    }
}

crate::impl_shapeable!(CourseDto {
    "id" => id,
    "title" => title,
    "description" => description,
    "authorId" => author_id,
});

/// Payload for creating a course, alone or nested in a new author
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CourseForCreationDto {
    #[validate(length(min = 1, max = 100, message = "title must be 1-100 characters"))]
    pub title: String,

    #[validate(length(max = 1500, message = "description must be at most 1500 characters"))]
    pub description: Option<String>,
}

impl CourseForCreationDto {
    pub fn into_course(self, author_id: Uuid) -> Course {
        Course::new(author_id, self.title, self.description)
    }
}
