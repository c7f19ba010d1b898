use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::StoreError;
use crate::models::Course;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub course: Course,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub course: Course,
    pub progress: u32,
    pub enrolled_date: String,
}

/// Courses the session user has enrolled in. Session-local, never persisted.
#[derive(Debug, Default)]
pub struct Enrollments {
    entries: Vec<Enrollment>,
}

impl Enrollments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enrolling in an already-enrolled course is a no-op.
    pub fn enroll(&mut self, course: Course) {
        if self.is_enrolled(&course.id) {
            return;
        }
        info!(course = %course.id, "enrolled");
        self.entries.push(Enrollment {
            course,
            progress: 0,
            enrolled_date: Utc::now().format("%Y-%m-%d").to_string(),
        });
    }

    pub fn is_enrolled(&self, course_id: &str) -> bool {
        self.entries.iter().any(|e| e.course.id == course_id)
    }

    pub fn entries(&self) -> &[Enrollment] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Session shopping cart. Adding a carted course bumps its quantity instead
/// of duplicating the line.
#[derive(Debug, Default)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, course: Course) {
        if let Some(item) = self.items.iter_mut().find(|i| i.course.id == course.id) {
            item.quantity += 1;
            return;
        }
        self.items.push(CartItem { course, quantity: 1 });
    }

    pub fn remove(&mut self, course_id: &str) {
        self.items.retain(|i| i.course.id != course_id);
    }

    /// Discount-aware total across all line items.
    pub fn total(&self) -> f64 {
        self.items
            .iter()
            .map(|i| i.course.discounted_price() * f64::from(i.quantity))
            .sum()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Converts every line item into an enrollment and empties the cart.
    /// No payment is processed. Returns the total that was charged.
    pub fn checkout(&mut self, enrollments: &mut Enrollments) -> Result<f64, StoreError> {
        if self.items.is_empty() {
            return Err(StoreError::Validation("Your cart is empty".to_string()));
        }

        let total = self.total();
        for item in self.items.drain(..) {
            enrollments.enroll(item.course);
        }

        info!(total, "checkout completed");
        Ok(total)
    }
}
