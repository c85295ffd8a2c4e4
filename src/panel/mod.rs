//! Back-office controller.
//!
//! An [`AdminPanel`] belongs to one operator session. It holds the lists
//! loaded at the last reload, the three entity editors and the in-memory
//! site configuration, and turns editor actions into gateway calls.
//!
//! Every mutating action checks [`AdminPanel::can_edit`] first and makes no
//! gateway or storage call when it fails.

mod forms;
mod projects;
mod settings;
mod team;
mod testimonials;
mod uploads;

pub use forms::*;

use std::sync::Arc;

use serde::Serialize;

use crate::db::Gateway;
use crate::errors::AppError;
use crate::models::{
    Operator, Project, Role, SiteConfig, TeamMember, TeamMemberFields, Testimonial,
    TestimonialFields,
};
use crate::storage::ObjectStore;

pub(crate) const LOAD_FAILED: &str = "Failed to load admin data. Please check your permissions.";

pub type ProjectEditor = Editor<ProjectForm, Project>;
pub type TeamEditor = Editor<TeamMemberFields, TeamMember>;
pub type TestimonialEditor = Editor<TestimonialFields, Testimonial>;

pub struct AdminPanel {
    operator: Operator,
    gateway: Arc<dyn Gateway>,
    storage: Arc<dyn ObjectStore>,

    projects: Vec<Project>,
    team_members: Vec<TeamMember>,
    testimonials: Vec<Testimonial>,
    site: SiteConfig,
    load_error: Option<String>,

    project_editor: ProjectEditor,
    team_editor: TeamEditor,
    testimonial_editor: TestimonialEditor,
}

/// Everything the admin UI renders, as of the latest action.
#[derive(Debug, Clone, Serialize)]
pub struct PanelSnapshot {
    pub operator: Operator,
    pub can_edit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub projects: Vec<Project>,
    pub team_members: Vec<TeamMember>,
    pub testimonials: Vec<Testimonial>,
    pub site_settings: SiteConfig,
    pub project_form: EditorView<ProjectForm>,
    pub team_form: EditorView<TeamMemberFields>,
    pub testimonial_form: EditorView<TestimonialFields>,
}

impl AdminPanel {
    pub fn new(
        operator: Operator,
        gateway: Arc<dyn Gateway>,
        storage: Arc<dyn ObjectStore>,
    ) -> Self {
        Self {
            operator,
            gateway,
            storage,
            projects: Vec::new(),
            team_members: Vec::new(),
            testimonials: Vec::new(),
            site: SiteConfig::default(),
            load_error: None,
            project_editor: Editor::default(),
            team_editor: Editor::default(),
            testimonial_editor: Editor::default(),
        }
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    /// Whether the operator may change anything.
    pub fn can_edit(&self) -> bool {
        self.operator.role == Role::SuperAdmin
    }

    fn ensure_can_edit(&self, denied: &str) -> Result<(), AppError> {
        if self.can_edit() {
            Ok(())
        } else {
            tracing::warn!(
                operator = %self.operator.username,
                role = self.operator.role.as_str(),
                "Rejected edit without super_admin role"
            );
            Err(AppError::Forbidden(denied.to_string()))
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn team_members(&self) -> &[TeamMember] {
        &self.team_members
    }

    pub fn testimonials(&self) -> &[Testimonial] {
        &self.testimonials
    }

    pub fn site_config(&self) -> &SiteConfig {
        &self.site
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn project_editor(&self) -> &ProjectEditor {
        &self.project_editor
    }

    pub fn team_editor(&self) -> &TeamEditor {
        &self.team_editor
    }

    pub fn testimonial_editor(&self) -> &TestimonialEditor {
        &self.testimonial_editor
    }

    /// Fetch all three lists concurrently, then the site settings.
    ///
    /// On failure the lists keep their previous contents and the banner
    /// error is set.
    pub async fn load_data(&mut self) -> Result<(), AppError> {
        let gateway = self.gateway.clone();
        let lists = tokio::try_join!(
            gateway.list_projects(),
            gateway.list_team_members(),
            gateway.list_testimonials(),
        );

        match lists {
            Ok((projects, team_members, testimonials)) => {
                self.projects = projects;
                self.team_members = team_members;
                self.testimonials = testimonials;
                self.load_error = None;
            }
            Err(e) => {
                tracing::error!(error = %e, "Error loading admin data");
                self.load_error = Some(LOAD_FAILED.to_string());
                return Err(AppError::ActionFailed(LOAD_FAILED.to_string()));
            }
        }

        self.load_site_settings().await;
        Ok(())
    }

    /// Reload after a successful write. Failures only set the banner.
    async fn refresh(&mut self) {
        let _ = self.load_data().await;
    }

    pub fn snapshot(&self) -> PanelSnapshot {
        PanelSnapshot {
            operator: self.operator.clone(),
            can_edit: self.can_edit(),
            error: self.load_error.clone(),
            projects: self.projects.clone(),
            team_members: self.team_members.clone(),
            testimonials: self.testimonials.clone(),
            site_settings: self.site.clone(),
            project_form: view(&self.project_editor, |p| &p.id),
            team_form: view(&self.team_editor, |m| &m.id),
            testimonial_form: view(&self.testimonial_editor, |t| &t.id),
        }
    }
}

fn view<F: Clone, R>(editor: &Editor<F, R>, id: impl Fn(&R) -> &String) -> EditorView<F> {
    EditorView {
        open: editor.open,
        editing_id: editor.editing.as_ref().map(|r| id(r).clone()),
        form: editor.form.clone(),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::db::{MockGateway, Repository};
    use crate::models::{ProjectCategory, ProjectImage};
    use crate::storage::MockObjectStore;

    pub fn operator(role: Role) -> Operator {
        Operator {
            id: "op-1".to_string(),
            username: "editor".to_string(),
            role,
            permissions: Default::default(),
        }
    }

    pub fn mock_panel(role: Role, gateway: MockGateway) -> AdminPanel {
        AdminPanel::new(
            operator(role),
            Arc::new(gateway),
            Arc::new(MockObjectStore::new()),
        )
    }

    pub async fn repo_panel(role: Role) -> (AdminPanel, Arc<Repository>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let pool = crate::db::init_database(&dir.path().join("test.db"))
            .await
            .unwrap();
        let repo = Arc::new(Repository::new(pool));
        let panel = AdminPanel::new(
            operator(role),
            repo.clone(),
            Arc::new(MockObjectStore::new()),
        );
        (panel, repo, dir)
    }

    pub fn sample_project(id: &str, images: &[&str]) -> Project {
        Project {
            id: id.to_string(),
            title: "Loft".to_string(),
            category: ProjectCategory::Residential,
            location: "Lisbon".to_string(),
            year: "2023".to_string(),
            description: "Loft conversion".to_string(),
            details: "Open plan loft".to_string(),
            client: "Private".to_string(),
            area: "120 m2".to_string(),
            duration: "6 months".to_string(),
            featured: false,
            main_image: "main.jpg".to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
            project_images: images
                .iter()
                .enumerate()
                .map(|(i, url)| ProjectImage {
                    id: format!("img-{}", i + 1),
                    project_id: id.to_string(),
                    image_url: url.to_string(),
                    alt_text: None,
                    sort_order: i as i64 + 1,
                    created_at: "2024-01-01T00:00:00Z".to_string(),
                })
                .collect(),
        }
    }

    /// Gateway that serves the given lists and no settings, once.
    pub fn loading_gateway(projects: Vec<Project>) -> MockGateway {
        let mut gateway = MockGateway::new();
        gateway
            .expect_list_projects()
            .times(1)
            .returning(move || Ok(projects.clone()));
        gateway
            .expect_list_team_members()
            .times(1)
            .returning(|| Ok(Vec::new()));
        gateway
            .expect_list_testimonials()
            .times(1)
            .returning(|| Ok(Vec::new()));
        gateway.expect_get_setting().times(4).returning(|_| Ok(None));
        gateway
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::db::MockGateway;
    use crate::models::TestimonialFields;

    #[tokio::test]
    async fn test_can_edit_follows_role() {
        let admin = mock_panel(Role::Admin, MockGateway::new());
        let super_admin = mock_panel(Role::SuperAdmin, MockGateway::new());
        assert!(!admin.can_edit());
        assert!(super_admin.can_edit());
    }

    #[tokio::test]
    async fn test_load_failure_sets_banner_and_keeps_lists() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_list_projects()
            .returning(|| Err(AppError::Database("denied".to_string())));
        gateway
            .expect_list_team_members()
            .returning(|| Ok(Vec::new()));
        gateway
            .expect_list_testimonials()
            .returning(|| Ok(Vec::new()));
        let mut panel = mock_panel(Role::Admin, gateway);

        let err = panel.load_data().await.unwrap_err();
        assert_eq!(err, AppError::ActionFailed(LOAD_FAILED.to_string()));
        assert_eq!(panel.load_error(), Some(LOAD_FAILED));
        assert!(panel.projects().is_empty());
    }

    #[tokio::test]
    async fn test_forbidden_actions_make_no_gateway_calls() {
        // Any gateway call beyond the initial load panics the mock.
        let gateway = loading_gateway(vec![sample_project("p1", &["a.jpg"])]);
        let mut panel = mock_panel(Role::Admin, gateway);
        panel.load_data().await.unwrap();
        let before = panel.snapshot();

        let forbidden = |r: Result<&'static str, AppError>| {
            assert!(matches!(r, Err(AppError::Forbidden(_))), "{:?}", r)
        };
        let forbidden_unit = |r: Result<(), AppError>| {
            assert!(matches!(r, Err(AppError::Forbidden(_))), "{:?}", r)
        };

        forbidden_unit(panel.new_project_form());
        forbidden_unit(panel.edit_project("p1"));
        forbidden_unit(panel.add_additional_image("b.jpg".to_string()));
        forbidden_unit(panel.remove_additional_image(0));
        forbidden(panel.submit_project().await);
        forbidden(panel.delete_project("p1").await);
        forbidden_unit(panel.cancel_project_form());

        forbidden_unit(panel.new_team_member_form());
        forbidden(panel.submit_team_member().await);
        forbidden(panel.delete_team_member("t1").await);

        forbidden_unit(panel.new_testimonial_form());
        forbidden_unit(panel.update_testimonial_form(TestimonialFields::default()));
        forbidden(panel.submit_testimonial().await);
        forbidden(panel.delete_testimonial("s1").await);
        forbidden_unit(panel.set_team_sort_order("4"));

        forbidden_unit(panel.add_hero_slide());
        forbidden_unit(panel.remove_hero_slide(0));
        forbidden(panel.save_site_settings().await);
        forbidden(
            panel
                .upload_image(UploadTarget::ProjectMainImage, vec![0xFF, 0xD8, 0xFF])
                .await
                .map(|_| "uploaded"),
        );
        forbidden_unit(panel.delete_uploaded_image("https://x/uploads/a.jpg").await);

        let after = panel.snapshot();
        assert_eq!(after.projects, before.projects);
        assert_eq!(after.site_settings, before.site_settings);
        assert!(!after.project_form.open);
    }
}
