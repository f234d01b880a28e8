//! Authors: storage entity, outward DTO and creation payload

use super::course::{Course, CourseForCreationDto};
use chrono::{Datelike, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Stored author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub main_category: String,
}

impl Author {
    /// Create an author with a fresh ID
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        date_of_birth: NaiveDate,
        main_category: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            date_of_birth,
            main_category: main_category.into(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

crate::impl_shapeable!(Author {
    "Id" => id,
    "FirstName" => first_name,
    "LastName" => last_name,
    "DateOfBirth" => date_of_birth,
    "MainCategory" => main_category,
});

/// Author as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub main_category: String,
}

impl AuthorDto {
    /// Project an author as seen on `today`
    pub fn from_author(author: &Author, today: NaiveDate) -> Self {
        Self {
            id: author.id,
            name: author.full_name(),
            age: age_on(author.date_of_birth, today),
            main_category: author.main_category.clone(),
        }
    }
}

impl From<&Author> for AuthorDto {
    fn from(author: &Author) -> Self {
        Self::from_author(author, Utc::now().date_naive())
    }
}

crate::impl_shapeable!(AuthorDto {
    "id" => id,
    "name" => name,
    "age" => age,
    "mainCategory" => main_category,
});

/// Whole years between `date_of_birth` and `today`
///
/// A February 29 birthday is reached on February 28 in common years.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let age = today.year() - date_of_birth.year();
    let anniversary = u32::try_from(age)
        .ok()
        .and_then(|years| years.checked_mul(12))
        .and_then(|months| date_of_birth.checked_add_months(Months::new(months)));

    match anniversary {
        Some(anniversary) if today < anniversary => age - 1,
        Some(_) => age,
        None if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) => {
            age - 1
        }
        None => age,
    }
}

/// Payload of `POST /api/authors`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AuthorForCreationDto {
    #[validate(length(min = 1, max = 50, message = "first name must be 1-50 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50, message = "last name must be 1-50 characters"))]
    pub last_name: String,

    pub date_of_birth: NaiveDate,

    #[validate(length(min = 1, max = 50, message = "main category must be 1-50 characters"))]
    pub main_category: String,

    #[serde(default)]
    #[validate(nested)]
    pub courses: Vec<CourseForCreationDto>,
}

impl AuthorForCreationDto {
    /// Build the author and any nested courses, linked by the new author ID
    pub fn into_entities(self) -> (Author, Vec<Course>) {
        let author = Author::new(
            self.first_name,
            self.last_name,
            self.date_of_birth,
            self.main_category,
        );
        let courses = self
            .courses
            .into_iter()
            .map(|course| course.into_course(author.id))
            .collect();
        (author, courses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::FieldValue;
    use crate::core::property::Shapeable;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        let dob = date(1980, 6, 15);
        assert_eq!(age_on(dob, date(2020, 6, 14)), 39);
        assert_eq!(age_on(dob, date(2020, 6, 15)), 40);
        assert_eq!(age_on(dob, date(2020, 12, 31)), 40);
    }

    #[test]
    fn test_age_leap_day_birthday() {
        let dob = date(2000, 2, 29);
        assert_eq!(age_on(dob, date(2021, 2, 27)), 20);
        assert_eq!(age_on(dob, date(2021, 2, 28)), 21);
        assert_eq!(age_on(dob, date(2024, 2, 29)), 24);
    }

    #[test]
    fn test_dto_projection() {
        let author = Author::new("Berry", "Griffin Beak Eldritch", date(1650, 7, 23), "Ships");
        let dto = AuthorDto::from_author(&author, date(2000, 1, 1));
        assert_eq!(dto.id, author.id);
        assert_eq!(dto.name, "Berry Griffin Beak Eldritch");
        assert_eq!(dto.age, 349);
        assert_eq!(dto.main_category, "Ships");
    }

    #[test]
    fn test_property_tables() {
        let dto_names: Vec<_> = AuthorDto::property_table()
            .all()
            .iter()
            .map(|d| d.name())
            .collect();
        assert_eq!(dto_names, vec!["id", "name", "age", "mainCategory"]);

        let author = Author::new("Nancy", "Rye", date(1668, 5, 21), "Rum");
        assert_eq!(
            Author::property_table().value_of(&author, "dateofbirth"),
            Some(FieldValue::Date(date(1668, 5, 21)))
        );
    }

    #[test]
    fn test_creation_validation() {
        let valid = AuthorForCreationDto {
            first_name: "Eli".to_string(),
            last_name: "Ivory Bones Sweet".to_string(),
            date_of_birth: date(1701, 12, 16),
            main_category: "Singing".to_string(),
            courses: Vec::new(),
        };
        assert!(valid.validate().is_ok());

        let too_long = AuthorForCreationDto {
            first_name: "x".repeat(51),
            ..valid.clone()
        };
        assert!(too_long.validate().is_err());

        let empty_category = AuthorForCreationDto {
            main_category: String::new(),
            ..valid
        };
        assert!(empty_category.validate().is_err());
    }

    #[test]
    fn test_into_entities_links_courses() {
        let dto = AuthorForCreationDto {
            first_name: "Arnold".to_string(),
            last_name: "Bullock".to_string(),
            date_of_birth: date(1702, 3, 6),
            main_category: "Singing".to_string(),
            courses: vec![CourseForCreationDto {
                title: "Top Pirate Hits".to_string(),
                description: None,
            }],
        };
        let (author, courses) = dto.into_entities();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].author_id, author.id);
    }
}
