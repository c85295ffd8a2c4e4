//! Data models for the studio website and its back office.
//!
//! Entity records keep the snake_case field names the website frontend reads.

mod admin_user;
mod project;
mod settings;
mod team;
mod testimonial;

pub use admin_user::*;
pub use project::*;
pub use settings::*;
pub use team::*;
pub use testimonial::*;
