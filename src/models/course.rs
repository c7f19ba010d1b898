use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;
use crate::store::Entity;

const REQUIRED_FIELDS: &str = "Title, Price, Category, Level, and Instructor are required";
const DEFAULT_DEMO_VIDEO: &str = "https://www.w3schools.com/html/mov_bbb.mp4";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Mobile,
    Web,
    Programming,
    Design,
    #[serde(rename = "Data Science")]
    DataScience,
    #[serde(rename = "AI")]
    Ai,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Mobile,
        Category::Web,
        Category::Programming,
        Category::Design,
        Category::DataScience,
        Category::Ai,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Mobile => "Mobile",
            Category::Web => "Web",
            Category::Programming => "Programming",
            Category::Design => "Design",
            Category::DataScience => "Data Science",
            Category::Ai => "AI",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub instructor: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    pub demo_video: String,
    pub lessons: u32,
    pub duration: String,
    pub level: Level,
    pub category: Category,
    pub students: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratings: Option<f64>,
}

impl Course {
    /// Effective price after the percentage discount, if any.
    pub fn discounted_price(&self) -> f64 {
        match self.discount {
            Some(discount) => self.price * (1.0 - discount / 100.0),
            None => self.price,
        }
    }

    fn validate(&self) -> Result<(), StoreError> {
        if self.title.trim().is_empty() || self.instructor.trim().is_empty() || self.price <= 0.0 {
            return Err(StoreError::Validation(REQUIRED_FIELDS.to_string()));
        }
        if let Some(discount) = self.discount {
            if !(0.0..=100.0).contains(&discount) {
                return Err(StoreError::Validation(
                    "Discount must be between 0 and 100".to_string(),
                ));
            }
        }
        if let Some(ratings) = self.ratings {
            if !(0.0..=5.0).contains(&ratings) {
                return Err(StoreError::Validation(
                    "Ratings must be between 0 and 5".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourseRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub instructor: String,
    pub price: f64,
    pub discount: Option<f64>,
    pub demo_video: Option<String>,
    pub lessons: Option<u32>,
    pub duration: Option<String>,
    pub level: Option<Level>,
    pub category: Option<Category>,
    pub featured: Option<bool>,
    pub ratings: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub instructor: Option<String>,
    pub price: Option<f64>,
    pub discount: Option<f64>,
    pub demo_video: Option<String>,
    pub lessons: Option<u32>,
    pub duration: Option<String>,
    pub level: Option<Level>,
    pub category: Option<Category>,
    pub featured: Option<bool>,
    pub ratings: Option<f64>,
}

impl Entity for Course {
    type Draft = NewCourseRequest;
    type Patch = UpdateCourseRequest;

    const KEY: &'static str = "courses";
    const KIND: &'static str = "course";

    fn id(&self) -> &str {
        &self.id
    }

    fn build(draft: NewCourseRequest) -> Result<Self, StoreError> {
        let (Some(level), Some(category)) = (draft.level, draft.category) else {
            return Err(StoreError::Validation(REQUIRED_FIELDS.to_string()));
        };

        let course = Course {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            description: draft.description,
            instructor: draft.instructor,
            price: draft.price,
            discount: draft.discount,
            demo_video: draft
                .demo_video
                .unwrap_or_else(|| DEFAULT_DEMO_VIDEO.to_string()),
            lessons: draft.lessons.unwrap_or(0),
            duration: draft.duration.unwrap_or_else(|| "N/A".to_string()),
            level,
            category,
            students: 0,
            featured: draft.featured,
            ratings: Some(draft.ratings.unwrap_or(0.0)),
        };
        course.validate()?;
        Ok(course)
    }

    fn merge(&self, patch: UpdateCourseRequest) -> Result<Self, StoreError> {
        let mut merged = self.clone();
        if let Some(title) = patch.title {
            merged.title = title;
        }
        if let Some(description) = patch.description {
            merged.description = description;
        }
        if let Some(instructor) = patch.instructor {
            merged.instructor = instructor;
        }
        if let Some(price) = patch.price {
            merged.price = price;
        }
        if let Some(discount) = patch.discount {
            merged.discount = Some(discount);
        }
        if let Some(demo_video) = patch.demo_video {
            merged.demo_video = demo_video;
        }
        if let Some(lessons) = patch.lessons {
            merged.lessons = lessons;
        }
        if let Some(duration) = patch.duration {
            merged.duration = duration;
        }
        if let Some(level) = patch.level {
            merged.level = level;
        }
        if let Some(category) = patch.category {
            merged.category = category;
        }
        if let Some(featured) = patch.featured {
            merged.featured = Some(featured);
        }
        if let Some(ratings) = patch.ratings {
            merged.ratings = Some(ratings);
        }
        merged.validate()?;
        Ok(merged)
    }

    fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.instructor.to_lowercase().contains(&query)
            || self.category.as_str().to_lowercase().contains(&query)
    }

    fn seed() -> Vec<Self> {
        vec![
            Course {
                id: "1".to_string(),
                title: "React Native Masterclass".to_string(),
                description: "Build cross-platform apps".to_string(),
                instructor: "John Doe".to_string(),
                price: 99.0,
                discount: Some(20.0),
                demo_video: DEFAULT_DEMO_VIDEO.to_string(),
                lessons: 42,
                duration: "8 weeks".to_string(),
                level: Level::Intermediate,
                category: Category::Mobile,
                students: 1247,
                featured: Some(true),
                ratings: Some(4.8),
            },
            Course {
                id: "2".to_string(),
                title: "Advanced JavaScript".to_string(),
                description: "Deep dive into JS".to_string(),
                instructor: "Jane Smith".to_string(),
                price: 79.0,
                discount: None,
                demo_video: DEFAULT_DEMO_VIDEO.to_string(),
                lessons: 36,
                duration: "6 weeks".to_string(),
                level: Level::Advanced,
                category: Category::Programming,
                students: 892,
                featured: None,
                ratings: Some(4.5),
            },
            Course {
                id: "3".to_string(),
                title: "Web Development Basics".to_string(),
                description: "Learn HTML, CSS, JS".to_string(),
                instructor: "Mike Ross".to_string(),
                price: 49.0,
                discount: None,
                demo_video: DEFAULT_DEMO_VIDEO.to_string(),
                lessons: 20,
                duration: "4 weeks".to_string(),
                level: Level::Beginner,
                category: Category::Web,
                students: 2500,
                featured: None,
                ratings: Some(4.2),
            },
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseSortKey {
    Title,
    Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Sorts a catalog snapshot in place. Title ordering is case-insensitive
/// (`to_lowercase`, standing in for locale collation); ties keep insertion
/// order.
pub fn sort_courses(courses: &mut [Course], key: CourseSortKey, order: SortOrder) {
    match key {
        CourseSortKey::Title => {
            courses.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
        }
        CourseSortKey::Price => {
            courses.sort_by(|a, b| a.price.total_cmp(&b.price));
        }
    }
    if order == SortOrder::Descending {
        courses.reverse();
    }
}
