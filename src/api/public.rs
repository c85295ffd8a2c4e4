//! Read-only endpoints for the public website.

use axum::extract::{Path, Query, State};
use serde::Deserialize;

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{Project, SettingKey, SiteConfig, TeamMember, Testimonial};
use crate::showcase::ProjectDetail;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ProjectListQuery {
    #[serde(default)]
    pub featured: bool,
}

/// GET /api/projects - List projects, optionally only featured ones.
pub async fn list_public_projects(
    State(state): State<AppState>,
    Query(query): Query<ProjectListQuery>,
) -> ApiResult<Vec<Project>> {
    let projects = if query.featured {
        state.repo.list_featured_projects().await?
    } else {
        state.repo.list_projects().await?
    };
    success(projects)
}

/// GET /api/projects/{id} - Project with its gallery and related projects.
pub async fn get_public_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ProjectDetail> {
    let project = state
        .repo
        .get_project(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))?;
    let all = state.repo.list_projects().await?;

    success(ProjectDetail::build(project, &all))
}

/// GET /api/team - Active team members by sort order.
pub async fn list_public_team(State(state): State<AppState>) -> ApiResult<Vec<TeamMember>> {
    success(state.repo.list_active_team_members().await?)
}

/// GET /api/testimonials - Active testimonials.
pub async fn list_public_testimonials(
    State(state): State<AppState>,
) -> ApiResult<Vec<Testimonial>> {
    success(state.repo.list_active_testimonials().await?)
}

/// GET /api/settings - Site configuration; missing rows fall back to defaults.
pub async fn get_public_settings(State(state): State<AppState>) -> ApiResult<SiteConfig> {
    let repo = &state.repo;
    let (stats, contact, social, hero) = tokio::try_join!(
        repo.get_setting(SettingKey::Stats),
        repo.get_setting(SettingKey::ContactInfo),
        repo.get_setting(SettingKey::SocialLinks),
        repo.get_setting(SettingKey::HeroSlides),
    )?;

    let mut site = SiteConfig::default();
    for setting in [stats, contact, social, hero].into_iter().flatten() {
        site.apply(setting);
    }
    success(site)
}
