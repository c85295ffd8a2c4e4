//! Privileged data-access interface used by the admin panel.
//!
//! Every method here reads all rows or writes. None of them check who is
//! calling; the panel checks the operator's role before it gets this far.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::{
    NewProjectImage, Project, ProjectFields, ProjectImage, SettingKey, SiteSetting, TeamMember,
    TeamMemberFields, Testimonial, TestimonialFields,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Gateway: Send + Sync {
    /// All projects with their images, newest first.
    async fn list_projects(&self) -> Result<Vec<Project>, AppError>;
    async fn create_project(&self, fields: &ProjectFields) -> Result<Project, AppError>;
    async fn update_project(&self, id: &str, fields: &ProjectFields) -> Result<Project, AppError>;
    async fn delete_project(&self, id: &str) -> Result<(), AppError>;

    async fn create_project_image(&self, image: &NewProjectImage)
        -> Result<ProjectImage, AppError>;
    async fn delete_project_image(&self, id: &str) -> Result<(), AppError>;

    /// All team members including inactive ones, by sort order.
    async fn list_team_members(&self) -> Result<Vec<TeamMember>, AppError>;
    async fn create_team_member(&self, fields: &TeamMemberFields)
        -> Result<TeamMember, AppError>;
    async fn update_team_member(
        &self,
        id: &str,
        fields: &TeamMemberFields,
    ) -> Result<TeamMember, AppError>;
    async fn delete_team_member(&self, id: &str) -> Result<(), AppError>;

    /// All testimonials including inactive ones, newest first.
    async fn list_testimonials(&self) -> Result<Vec<Testimonial>, AppError>;
    async fn create_testimonial(&self, fields: &TestimonialFields)
        -> Result<Testimonial, AppError>;
    async fn update_testimonial(
        &self,
        id: &str,
        fields: &TestimonialFields,
    ) -> Result<Testimonial, AppError>;
    async fn delete_testimonial(&self, id: &str) -> Result<(), AppError>;

    async fn get_setting(&self, key: SettingKey) -> Result<Option<SiteSetting>, AppError>;
    /// Insert or overwrite the row for the setting's key.
    async fn put_setting(&self, setting: &SiteSetting) -> Result<(), AppError>;
}
