//! Team member model.

use serde::{Deserialize, Serialize};

/// A studio team member shown on the about page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub position: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    pub sort_order: i64,
    /// Hidden from the public site when false.
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Writable columns of a team member; doubles as the admin form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamMemberFields {
    pub name: String,
    pub position: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Default for TeamMemberFields {
    fn default() -> Self {
        Self {
            name: String::new(),
            position: String::new(),
            bio: None,
            image_url: String::new(),
            email: None,
            linkedin_url: None,
            sort_order: 0,
            active: true,
        }
    }
}

impl From<&TeamMember> for TeamMemberFields {
    fn from(member: &TeamMember) -> Self {
        Self {
            name: member.name.clone(),
            position: member.position.clone(),
            bio: member.bio.clone(),
            image_url: member.image_url.clone(),
            email: member.email.clone(),
            linkedin_url: member.linkedin_url.clone(),
            sort_order: member.sort_order,
            active: member.active,
        }
    }
}
