//! Client testimonial model.

use serde::{Deserialize, Serialize};

/// Lowest and highest accepted star ratings.
pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// A client quote, optionally tied to a project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Testimonial {
    pub id: String,
    pub client_name: String,
    pub client_position: String,
    pub testimonial_text: String,
    pub rating: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Writable columns of a testimonial; doubles as the admin form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestimonialFields {
    pub client_name: String,
    pub client_position: String,
    pub testimonial_text: String,
    #[serde(default = "default_rating")]
    pub rating: i64,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_rating() -> i64 {
    MAX_RATING
}

fn default_active() -> bool {
    true
}

impl Default for TestimonialFields {
    fn default() -> Self {
        Self {
            client_name: String::new(),
            client_position: String::new(),
            testimonial_text: String::new(),
            rating: MAX_RATING,
            project_id: None,
            active: true,
        }
    }
}

impl From<&Testimonial> for TestimonialFields {
    fn from(testimonial: &Testimonial) -> Self {
        Self {
            client_name: testimonial.client_name.clone(),
            client_position: testimonial.client_position.clone(),
            testimonial_text: testimonial.testimonial_text.clone(),
            rating: testimonial.rating,
            project_id: testimonial.project_id.clone(),
            active: testimonial.active,
        }
    }
}
