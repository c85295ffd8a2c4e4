//! Database repository for CRUD operations.
//!
//! Methods are grouped per entity. The public site only uses the read
//! methods that filter to visible rows; the admin panel goes through the
//! [`Gateway`] implementation at the bottom of this file.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

use super::Gateway;
use crate::auth::{hash_password, verify_password};
use crate::errors::AppError;
use crate::models::{
    AdminUser, CreateAdminUserRequest, NewProjectImage, Project, ProjectCategory, ProjectFields,
    ProjectImage, Role, SettingKey, SiteSetting, TeamMember, TeamMemberFields, Testimonial,
    TestimonialFields, UpdateAdminUserRequest,
};

const PROJECT_COLUMNS: &str = "id, title, category, location, year, description, details, client, area, duration, featured, main_image, created_at, updated_at";
const IMAGE_COLUMNS: &str = "id, project_id, image_url, alt_text, sort_order, created_at";
const TEAM_COLUMNS: &str = "id, name, position, bio, image_url, email, linkedin_url, sort_order, active, created_at, updated_at";
const TESTIMONIAL_COLUMNS: &str = "id, client_name, client_position, testimonial_text, rating, project_id, active, created_at, updated_at";
const ADMIN_USER_COLUMNS: &str = "id, username, password_hash, role, permissions, active, created_at, updated_at, last_login";

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== PROJECT OPERATIONS ====================

    /// List projects with their images, newest first.
    pub async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC, rowid DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        let projects = rows.iter().map(project_from_row).collect();
        self.attach_images(projects).await
    }

    /// List featured projects with their images, newest first.
    pub async fn list_featured_projects(&self) -> Result<Vec<Project>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE featured = 1 ORDER BY created_at DESC, rowid DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        let projects = rows.iter().map(project_from_row).collect();
        self.attach_images(projects).await
    }

    /// Get a project and its images by ID.
    pub async fn get_project(&self, id: &str) -> Result<Option<Project>, AppError> {
        let row = sqlx::query(&format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(mut project) = row.as_ref().map(project_from_row) else {
            return Ok(None);
        };
        project.project_images = self.list_project_images(id).await?;
        Ok(Some(project))
    }

    /// Images of one project in display order.
    pub async fn list_project_images(&self, project_id: &str) -> Result<Vec<ProjectImage>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {IMAGE_COLUMNS} FROM project_images WHERE project_id = ? ORDER BY sort_order, created_at"
        ))
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(image_from_row).collect())
    }

    /// Embed image rows into their parent projects.
    async fn attach_images(&self, mut projects: Vec<Project>) -> Result<Vec<Project>, AppError> {
        if projects.is_empty() {
            return Ok(projects);
        }

        let rows = sqlx::query(&format!(
            "SELECT {IMAGE_COLUMNS} FROM project_images ORDER BY project_id, sort_order, created_at"
        ))
        .fetch_all(&self.pool)
        .await?;

        let mut by_project: HashMap<String, Vec<ProjectImage>> = HashMap::new();
        for image in rows.iter().map(image_from_row) {
            by_project
                .entry(image.project_id.clone())
                .or_default()
                .push(image);
        }

        for project in &mut projects {
            project.project_images = by_project.remove(&project.id).unwrap_or_default();
        }
        Ok(projects)
    }

    pub async fn create_project(&self, fields: &ProjectFields) -> Result<Project, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO projects (
                id, title, category, location, year, description, details,
                client, area, duration, featured, main_image, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&id)
        .bind(&fields.title)
        .bind(fields.category.as_str())
        .bind(&fields.location)
        .bind(&fields.year)
        .bind(&fields.description)
        .bind(&fields.details)
        .bind(&fields.client)
        .bind(&fields.area)
        .bind(&fields.duration)
        .bind(fields.featured as i32)
        .bind(&fields.main_image)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        tracing::debug!(project_id = %id, "Project created");

        Ok(Project {
            id,
            title: fields.title.clone(),
            category: fields.category,
            location: fields.location.clone(),
            year: fields.year.clone(),
            description: fields.description.clone(),
            details: fields.details.clone(),
            client: fields.client.clone(),
            area: fields.area.clone(),
            duration: fields.duration.clone(),
            featured: fields.featured,
            main_image: fields.main_image.clone(),
            created_at: now.clone(),
            updated_at: now,
            project_images: Vec::new(),
        })
    }

    pub async fn update_project(&self, id: &str, fields: &ProjectFields) -> Result<Project, AppError> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"UPDATE projects SET
                title = ?, category = ?, location = ?, year = ?, description = ?, details = ?,
                client = ?, area = ?, duration = ?, featured = ?, main_image = ?, updated_at = ?
            WHERE id = ?"#,
        )
        .bind(&fields.title)
        .bind(fields.category.as_str())
        .bind(&fields.location)
        .bind(&fields.year)
        .bind(&fields.description)
        .bind(&fields.details)
        .bind(&fields.client)
        .bind(&fields.area)
        .bind(&fields.duration)
        .bind(fields.featured as i32)
        .bind(&fields.main_image)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Project {} not found", id)));
        }

        self.get_project(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))
    }

    /// Delete a project. Its image rows go with it.
    pub async fn delete_project(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Project {} not found", id)));
        }
        Ok(())
    }

    // ==================== PROJECT IMAGE OPERATIONS ====================

    pub async fn create_project_image(&self, image: &NewProjectImage) -> Result<ProjectImage, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO project_images (id, project_id, image_url, alt_text, sort_order, created_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&image.project_id)
        .bind(&image.image_url)
        .bind(&image.alt_text)
        .bind(image.sort_order)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(ProjectImage {
            id,
            project_id: image.project_id.clone(),
            image_url: image.image_url.clone(),
            alt_text: image.alt_text.clone(),
            sort_order: image.sort_order,
            created_at: now,
        })
    }

    /// Delete an image row. A row that is already gone is not an error, so a
    /// gallery sync that stopped part way can be retried.
    pub async fn delete_project_image(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM project_images WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // ==================== TEAM MEMBER OPERATIONS ====================

    /// All team members, visible or not.
    pub async fn list_team_members(&self) -> Result<Vec<TeamMember>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {TEAM_COLUMNS} FROM team_members ORDER BY sort_order, created_at"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(team_member_from_row).collect())
    }

    /// Team members shown on the public site.
    pub async fn list_active_team_members(&self) -> Result<Vec<TeamMember>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {TEAM_COLUMNS} FROM team_members WHERE active = 1 ORDER BY sort_order, created_at"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(team_member_from_row).collect())
    }

    pub async fn get_team_member(&self, id: &str) -> Result<Option<TeamMember>, AppError> {
        let row = sqlx::query(&format!("SELECT {TEAM_COLUMNS} FROM team_members WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(team_member_from_row))
    }

    pub async fn create_team_member(&self, fields: &TeamMemberFields) -> Result<TeamMember, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO team_members (
                id, name, position, bio, image_url, email, linkedin_url,
                sort_order, active, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&id)
        .bind(&fields.name)
        .bind(&fields.position)
        .bind(&fields.bio)
        .bind(&fields.image_url)
        .bind(&fields.email)
        .bind(&fields.linkedin_url)
        .bind(fields.sort_order)
        .bind(fields.active as i32)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(TeamMember {
            id,
            name: fields.name.clone(),
            position: fields.position.clone(),
            bio: fields.bio.clone(),
            image_url: fields.image_url.clone(),
            email: fields.email.clone(),
            linkedin_url: fields.linkedin_url.clone(),
            sort_order: fields.sort_order,
            active: fields.active,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    pub async fn update_team_member(
        &self,
        id: &str,
        fields: &TeamMemberFields,
    ) -> Result<TeamMember, AppError> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"UPDATE team_members SET
                name = ?, position = ?, bio = ?, image_url = ?, email = ?, linkedin_url = ?,
                sort_order = ?, active = ?, updated_at = ?
            WHERE id = ?"#,
        )
        .bind(&fields.name)
        .bind(&fields.position)
        .bind(&fields.bio)
        .bind(&fields.image_url)
        .bind(&fields.email)
        .bind(&fields.linkedin_url)
        .bind(fields.sort_order)
        .bind(fields.active as i32)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Team member {} not found", id)));
        }

        self.get_team_member(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Team member {} not found", id)))
    }

    pub async fn delete_team_member(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM team_members WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Team member {} not found", id)));
        }
        Ok(())
    }

    // ==================== TESTIMONIAL OPERATIONS ====================

    /// All testimonials, newest first.
    pub async fn list_testimonials(&self) -> Result<Vec<Testimonial>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {TESTIMONIAL_COLUMNS} FROM testimonials ORDER BY created_at DESC, rowid DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(testimonial_from_row).collect())
    }

    /// Testimonials shown on the public site, newest first.
    pub async fn list_active_testimonials(&self) -> Result<Vec<Testimonial>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {TESTIMONIAL_COLUMNS} FROM testimonials WHERE active = 1 ORDER BY created_at DESC, rowid DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(testimonial_from_row).collect())
    }

    pub async fn get_testimonial(&self, id: &str) -> Result<Option<Testimonial>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {TESTIMONIAL_COLUMNS} FROM testimonials WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(testimonial_from_row))
    }

    pub async fn create_testimonial(&self, fields: &TestimonialFields) -> Result<Testimonial, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let project_id = normalize_optional(&fields.project_id);

        sqlx::query(
            r#"INSERT INTO testimonials (
                id, client_name, client_position, testimonial_text, rating,
                project_id, active, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&id)
        .bind(&fields.client_name)
        .bind(&fields.client_position)
        .bind(&fields.testimonial_text)
        .bind(fields.rating)
        .bind(&project_id)
        .bind(fields.active as i32)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Testimonial {
            id,
            client_name: fields.client_name.clone(),
            client_position: fields.client_position.clone(),
            testimonial_text: fields.testimonial_text.clone(),
            rating: fields.rating,
            project_id,
            active: fields.active,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    pub async fn update_testimonial(
        &self,
        id: &str,
        fields: &TestimonialFields,
    ) -> Result<Testimonial, AppError> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"UPDATE testimonials SET
                client_name = ?, client_position = ?, testimonial_text = ?, rating = ?,
                project_id = ?, active = ?, updated_at = ?
            WHERE id = ?"#,
        )
        .bind(&fields.client_name)
        .bind(&fields.client_position)
        .bind(&fields.testimonial_text)
        .bind(fields.rating)
        .bind(normalize_optional(&fields.project_id))
        .bind(fields.active as i32)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Testimonial {} not found", id)));
        }

        self.get_testimonial(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Testimonial {} not found", id)))
    }

    pub async fn delete_testimonial(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM testimonials WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Testimonial {} not found", id)));
        }
        Ok(())
    }

    // ==================== SITE SETTING OPERATIONS ====================

    /// Read and decode one settings row.
    pub async fn get_setting(&self, key: SettingKey) -> Result<Option<SiteSetting>, AppError> {
        let row = sqlx::query("SELECT setting_value FROM site_settings WHERE setting_key = ?")
            .bind(key.as_str())
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let raw: String = row.get("setting_value");
        let value: serde_json::Value = serde_json::from_str(&raw)?;
        let setting = SiteSetting::decode(key, value).map_err(|e| {
            AppError::Validation(format!(
                "Stored value for '{}' has an unexpected shape: {}",
                key.as_str(),
                e
            ))
        })?;
        Ok(Some(setting))
    }

    /// Write the whole value for a key, creating the row if needed.
    pub async fn put_setting(&self, setting: &SiteSetting) -> Result<(), AppError> {
        let now = Utc::now().to_rfc3339();
        let value = serde_json::to_string(&setting.to_value()?)?;

        sqlx::query(
            r#"INSERT INTO site_settings (setting_key, setting_value, updated_at)
               VALUES (?, ?, ?)
               ON CONFLICT(setting_key) DO UPDATE SET
                   setting_value = excluded.setting_value,
                   updated_at = excluded.updated_at"#,
        )
        .bind(setting.key().as_str())
        .bind(&value)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // ==================== ADMIN USER OPERATIONS ====================

    /// Active operator accounts, newest first.
    pub async fn list_admin_users(&self) -> Result<Vec<AdminUser>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {ADMIN_USER_COLUMNS} FROM admin_users WHERE active = 1 ORDER BY created_at DESC, rowid DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(admin_user_from_row).collect())
    }

    pub async fn get_admin_user(&self, id: &str) -> Result<Option<AdminUser>, AppError> {
        let row = sqlx::query(&format!("SELECT {ADMIN_USER_COLUMNS} FROM admin_users WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(admin_user_from_row))
    }

    pub async fn count_admin_users(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM admin_users")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("total"))
    }

    /// Check credentials of an active account and record the login time.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AdminUser>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {ADMIN_USER_COLUMNS} FROM admin_users WHERE username = ? AND active = 1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        let Some(mut user) = row.as_ref().map(admin_user_from_row) else {
            return Ok(None);
        };

        match verify_password(password, &user.password_hash) {
            Ok(true) => {}
            Ok(false) => return Ok(None),
            Err(e) => {
                tracing::warn!(username = %user.username, error = %e, "Unreadable password hash");
                return Ok(None);
            }
        }

        let now = Utc::now().to_rfc3339();
        sqlx::query("UPDATE admin_users SET last_login = ? WHERE id = ?")
            .bind(&now)
            .bind(&user.id)
            .execute(&self.pool)
            .await?;
        user.last_login = Some(now);

        Ok(Some(user))
    }

    pub async fn create_admin_user(
        &self,
        request: &CreateAdminUserRequest,
    ) -> Result<AdminUser, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let password_hash = hash_password(&request.password)?;
        let permissions_json = serde_json::to_string(&request.permissions)?;

        sqlx::query(
            r#"INSERT INTO admin_users (
                id, username, password_hash, role, permissions, active, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&id)
        .bind(&request.username)
        .bind(&password_hash)
        .bind(request.role.as_str())
        .bind(&permissions_json)
        .bind(request.active as i32)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(AdminUser {
            id,
            username: request.username.clone(),
            password_hash,
            role: request.role,
            permissions: request.permissions.clone(),
            active: request.active,
            created_at: now.clone(),
            updated_at: now,
            last_login: None,
        })
    }

    pub async fn update_admin_user(
        &self,
        id: &str,
        request: &UpdateAdminUserRequest,
    ) -> Result<AdminUser, AppError> {
        let existing = self
            .get_admin_user(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Admin user {} not found", id)))?;

        let now = Utc::now().to_rfc3339();
        let username = request.username.clone().unwrap_or(existing.username);
        let password_hash = request
            .password
            .as_deref()
            .map(hash_password)
            .transpose()?
            .unwrap_or(existing.password_hash);
        let role = request.role.unwrap_or(existing.role);
        let permissions = request.permissions.clone().unwrap_or(existing.permissions);
        let active = request.active.unwrap_or(existing.active);
        let permissions_json = serde_json::to_string(&permissions)?;

        sqlx::query(
            r#"UPDATE admin_users SET
                username = ?, password_hash = ?, role = ?, permissions = ?, active = ?, updated_at = ?
            WHERE id = ?"#,
        )
        .bind(&username)
        .bind(&password_hash)
        .bind(role.as_str())
        .bind(&permissions_json)
        .bind(active as i32)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(AdminUser {
            id: id.to_string(),
            username,
            password_hash,
            role,
            permissions,
            active,
            created_at: existing.created_at,
            updated_at: now,
            last_login: existing.last_login,
        })
    }

    pub async fn delete_admin_user(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM admin_users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Admin user {} not found", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl Gateway for Repository {
    async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        Repository::list_projects(self).await
    }

    async fn create_project(&self, fields: &ProjectFields) -> Result<Project, AppError> {
        Repository::create_project(self, fields).await
    }

    async fn update_project(&self, id: &str, fields: &ProjectFields) -> Result<Project, AppError> {
        Repository::update_project(self, id, fields).await
    }

    async fn delete_project(&self, id: &str) -> Result<(), AppError> {
        Repository::delete_project(self, id).await
    }

    async fn create_project_image(&self, image: &NewProjectImage) -> Result<ProjectImage, AppError> {
        Repository::create_project_image(self, image).await
    }

    async fn delete_project_image(&self, id: &str) -> Result<(), AppError> {
        Repository::delete_project_image(self, id).await
    }

    async fn list_team_members(&self) -> Result<Vec<TeamMember>, AppError> {
        Repository::list_team_members(self).await
    }

    async fn create_team_member(&self, fields: &TeamMemberFields) -> Result<TeamMember, AppError> {
        Repository::create_team_member(self, fields).await
    }

    async fn update_team_member(
        &self,
        id: &str,
        fields: &TeamMemberFields,
    ) -> Result<TeamMember, AppError> {
        Repository::update_team_member(self, id, fields).await
    }

    async fn delete_team_member(&self, id: &str) -> Result<(), AppError> {
        Repository::delete_team_member(self, id).await
    }

    async fn list_testimonials(&self) -> Result<Vec<Testimonial>, AppError> {
        Repository::list_testimonials(self).await
    }

    async fn create_testimonial(&self, fields: &TestimonialFields) -> Result<Testimonial, AppError> {
        Repository::create_testimonial(self, fields).await
    }

    async fn update_testimonial(
        &self,
        id: &str,
        fields: &TestimonialFields,
    ) -> Result<Testimonial, AppError> {
        Repository::update_testimonial(self, id, fields).await
    }

    async fn delete_testimonial(&self, id: &str) -> Result<(), AppError> {
        Repository::delete_testimonial(self, id).await
    }

    async fn get_setting(&self, key: SettingKey) -> Result<Option<SiteSetting>, AppError> {
        Repository::get_setting(self, key).await
    }

    async fn put_setting(&self, setting: &SiteSetting) -> Result<(), AppError> {
        Repository::put_setting(self, setting).await
    }
}

// Helper functions for row conversion

fn project_from_row(row: &sqlx::sqlite::SqliteRow) -> Project {
    let featured: i32 = row.get("featured");
    let category: String = row.get("category");
    Project {
        id: row.get("id"),
        title: row.get("title"),
        // The column CHECK constraint only admits known categories.
        category: ProjectCategory::parse(&category).unwrap_or(ProjectCategory::Residential),
        location: row.get("location"),
        year: row.get("year"),
        description: row.get("description"),
        details: row.get("details"),
        client: row.get("client"),
        area: row.get("area"),
        duration: row.get("duration"),
        featured: featured != 0,
        main_image: row.get("main_image"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        project_images: Vec::new(),
    }
}

fn image_from_row(row: &sqlx::sqlite::SqliteRow) -> ProjectImage {
    ProjectImage {
        id: row.get("id"),
        project_id: row.get("project_id"),
        image_url: row.get("image_url"),
        alt_text: row.get("alt_text"),
        sort_order: row.get("sort_order"),
        created_at: row.get("created_at"),
    }
}

fn team_member_from_row(row: &sqlx::sqlite::SqliteRow) -> TeamMember {
    let active: i32 = row.get("active");
    TeamMember {
        id: row.get("id"),
        name: row.get("name"),
        position: row.get("position"),
        bio: row.get("bio"),
        image_url: row.get("image_url"),
        email: row.get("email"),
        linkedin_url: row.get("linkedin_url"),
        sort_order: row.get("sort_order"),
        active: active != 0,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn testimonial_from_row(row: &sqlx::sqlite::SqliteRow) -> Testimonial {
    let active: i32 = row.get("active");
    Testimonial {
        id: row.get("id"),
        client_name: row.get("client_name"),
        client_position: row.get("client_position"),
        testimonial_text: row.get("testimonial_text"),
        rating: row.get("rating"),
        project_id: row.get("project_id"),
        active: active != 0,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn admin_user_from_row(row: &sqlx::sqlite::SqliteRow) -> AdminUser {
    let active: i32 = row.get("active");
    let role: String = row.get("role");
    let permissions: String = row.get("permissions");
    AdminUser {
        id: row.get("id"),
        username: row.get("username"),
        password_hash: row.get("password_hash"),
        // Unknown roles get the read-only role.
        role: Role::parse(&role).unwrap_or(Role::Admin),
        permissions: parse_permissions(&permissions),
        active: active != 0,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        last_login: row.get("last_login"),
    }
}

fn parse_permissions(s: &str) -> BTreeMap<String, bool> {
    serde_json::from_str(s).unwrap_or_default()
}

/// Forms send an empty string for "no project"; store that as NULL.
fn normalize_optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use tempfile::TempDir;

    async fn repo() -> (Repository, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let pool = init_database(&temp_dir.path().join("test.sqlite"))
            .await
            .expect("Failed to init DB");
        (Repository::new(pool), temp_dir)
    }

    fn fields(title: &str, category: ProjectCategory) -> ProjectFields {
        ProjectFields {
            title: title.to_string(),
            category,
            location: "Lisbon".to_string(),
            year: "2023".to_string(),
            description: "Short".to_string(),
            details: "Long".to_string(),
            client: "Client".to_string(),
            area: "120 m2".to_string(),
            duration: "6 months".to_string(),
            featured: false,
            main_image: "https://cdn.example/main.jpg".to_string(),
        }
    }

    #[tokio::test]
    async fn test_project_images_are_embedded_in_order() {
        let (repo, _dir) = repo().await;
        let project = repo
            .create_project(&fields("Loft", ProjectCategory::Residential))
            .await
            .unwrap();

        for (url, order) in [("b.jpg", 2), ("a.jpg", 1)] {
            repo.create_project_image(&NewProjectImage {
                project_id: project.id.clone(),
                image_url: url.to_string(),
                alt_text: None,
                sort_order: order,
            })
            .await
            .unwrap();
        }

        let loaded = repo.get_project(&project.id).await.unwrap().unwrap();
        let urls: Vec<_> = loaded.project_images.iter().map(|i| i.image_url.as_str()).collect();
        assert_eq!(urls, vec!["a.jpg", "b.jpg"]);

        let listed = repo.list_projects().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].project_images.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_project_cascades_to_images() {
        let (repo, _dir) = repo().await;
        let project = repo
            .create_project(&fields("Cafe", ProjectCategory::Hospitality))
            .await
            .unwrap();
        repo.create_project_image(&NewProjectImage {
            project_id: project.id.clone(),
            image_url: "x.jpg".to_string(),
            alt_text: Some("Cafe - Image 2".to_string()),
            sort_order: 1,
        })
        .await
        .unwrap();

        repo.delete_project(&project.id).await.unwrap();
        assert!(repo.list_project_images(&project.id).await.unwrap().is_empty());
        assert_eq!(
            repo.delete_project(&project.id).await,
            Err(AppError::NotFound(format!("Project {} not found", project.id)))
        );
    }

    #[tokio::test]
    async fn test_deleting_missing_image_row_succeeds() {
        let (repo, _dir) = repo().await;
        let project = repo
            .create_project(&fields("Studio", ProjectCategory::Commercial))
            .await
            .unwrap();
        let image = repo
            .create_project_image(&NewProjectImage {
                project_id: project.id.clone(),
                image_url: "y.jpg".to_string(),
                alt_text: None,
                sort_order: 1,
            })
            .await
            .unwrap();

        repo.delete_project_image(&image.id).await.unwrap();
        repo.delete_project_image(&image.id).await.unwrap();
        assert!(repo.list_project_images(&project.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_featured_and_active_filters() {
        let (repo, _dir) = repo().await;
        let mut featured = fields("Tower", ProjectCategory::Commercial);
        featured.featured = true;
        repo.create_project(&featured).await.unwrap();
        repo.create_project(&fields("Shed", ProjectCategory::Residential))
            .await
            .unwrap();

        let listed = repo.list_featured_projects().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Tower");

        let hidden = TeamMemberFields {
            name: "Hidden".to_string(),
            position: "Intern".to_string(),
            image_url: "h.jpg".to_string(),
            active: false,
            ..Default::default()
        };
        let shown = TeamMemberFields {
            name: "Shown".to_string(),
            position: "Architect".to_string(),
            image_url: "s.jpg".to_string(),
            ..Default::default()
        };
        repo.create_team_member(&hidden).await.unwrap();
        repo.create_team_member(&shown).await.unwrap();

        assert_eq!(repo.list_team_members().await.unwrap().len(), 2);
        let public = repo.list_active_team_members().await.unwrap();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].name, "Shown");
    }

    #[tokio::test]
    async fn test_setting_upsert_overwrites() {
        let (repo, _dir) = repo().await;
        assert_eq!(repo.get_setting(SettingKey::HeroSlides).await.unwrap(), None);

        let first = SiteSetting::HeroSlides(vec![Default::default()]);
        repo.put_setting(&first).await.unwrap();
        let second = SiteSetting::HeroSlides(Vec::new());
        repo.put_setting(&second).await.unwrap();

        assert_eq!(
            repo.get_setting(SettingKey::HeroSlides).await.unwrap(),
            Some(second)
        );
    }

    #[tokio::test]
    async fn test_malformed_setting_is_rejected() {
        let (repo, _dir) = repo().await;
        sqlx::query(
            "INSERT INTO site_settings (setting_key, setting_value, updated_at) VALUES ('stats', '\"oops\"', 'now')",
        )
        .execute(&repo.pool)
        .await
        .unwrap();

        assert!(matches!(
            repo.get_setting(SettingKey::Stats).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_authenticate_records_last_login() {
        let (repo, _dir) = repo().await;
        let user = repo
            .create_admin_user(&CreateAdminUserRequest {
                username: "editor".to_string(),
                password: "s3cret".to_string(),
                role: Role::SuperAdmin,
                permissions: BTreeMap::new(),
                active: true,
            })
            .await
            .unwrap();
        assert_ne!(user.password_hash, "s3cret");

        assert!(repo.authenticate("editor", "wrong").await.unwrap().is_none());
        assert!(repo.authenticate("nobody", "s3cret").await.unwrap().is_none());

        let logged_in = repo.authenticate("editor", "s3cret").await.unwrap().unwrap();
        assert_eq!(logged_in.role, Role::SuperAdmin);
        assert!(logged_in.last_login.is_some());

        repo.update_admin_user(
            &user.id,
            &UpdateAdminUserRequest {
                active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(repo.authenticate("editor", "s3cret").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_password_change_rehashes() {
        let (repo, _dir) = repo().await;
        let user = repo
            .create_admin_user(&CreateAdminUserRequest {
                username: "editor".to_string(),
                password: "old-pass".to_string(),
                role: Role::Admin,
                permissions: BTreeMap::new(),
                active: true,
            })
            .await
            .unwrap();
        assert!(user.password_hash.starts_with("$argon2id$"));

        let updated = repo
            .update_admin_user(
                &user.id,
                &UpdateAdminUserRequest {
                    password: Some("new-pass".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_ne!(updated.password_hash, user.password_hash);

        assert!(repo.authenticate("editor", "old-pass").await.unwrap().is_none());
        assert!(repo.authenticate("editor", "new-pass").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let (repo, _dir) = repo().await;
        let request = CreateAdminUserRequest {
            username: "dup".to_string(),
            password: "pw".to_string(),
            role: Role::Admin,
            permissions: BTreeMap::new(),
            active: true,
        };
        repo.create_admin_user(&request).await.unwrap();
        assert!(matches!(
            repo.create_admin_user(&request).await,
            Err(AppError::Conflict(_))
        ));
    }
}
