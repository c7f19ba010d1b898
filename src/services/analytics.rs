use serde::Serialize;

use crate::models::{Category, Course, User, UserStatus};

#[derive(Debug, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub courses: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_courses: usize,
    pub total_users: usize,
    pub active_users: usize,
    pub total_revenue: f64,
    pub average_rating: f64,
    pub categories: Vec<CategoryCount>,
}

/// Aggregates the dashboard numbers from collection snapshots. Pure; the
/// stores are not touched.
pub fn dashboard_stats(courses: &[Course], users: &[User]) -> DashboardStats {
    let total_revenue = courses
        .iter()
        .map(|c| c.price * f64::from(c.students))
        .sum();

    let average_rating = if courses.is_empty() {
        0.0
    } else {
        courses.iter().map(|c| c.ratings.unwrap_or(0.0)).sum::<f64>() / courses.len() as f64
    };

    let categories = Category::ALL
        .iter()
        .map(|&category| CategoryCount {
            category,
            courses: courses.iter().filter(|c| c.category == category).count(),
        })
        .collect();

    DashboardStats {
        total_courses: courses.len(),
        total_users: users.len(),
        active_users: users
            .iter()
            .filter(|u| u.status == UserStatus::Active)
            .count(),
        total_revenue,
        average_rating,
        categories,
    }
}
