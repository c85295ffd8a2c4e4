//! Team member editor actions.

use super::forms::validate_team_member;
use super::AdminPanel;
use crate::errors::AppError;
use crate::models::{parse_lenient_int, TeamMemberFields};

const DENIED: &str = "You do not have permission to modify team members.";
pub(super) const FORM: &str = "team member";
const SAVE_FAILED: &str = "Error saving team member. Please try again.";
const DELETE_FAILED: &str = "Error deleting team member. Please try again.";

impl AdminPanel {
    pub fn new_team_member_form(&mut self) -> Result<(), AppError> {
        self.ensure_can_edit(DENIED)?;
        self.team_editor.open_new();
        Ok(())
    }

    pub fn edit_team_member(&mut self, id: &str) -> Result<(), AppError> {
        self.ensure_can_edit(DENIED)?;
        let member = self
            .team_members
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Team member not found: {}", id)))?;

        let form = TeamMemberFields::from(&member);
        self.team_editor.open_existing(member, form);
        Ok(())
    }

    pub fn update_team_member_form(&mut self, fields: TeamMemberFields) -> Result<(), AppError> {
        self.ensure_can_edit(DENIED)?;
        self.team_editor.ensure_open(FORM)?;
        self.team_editor.form = fields;
        Ok(())
    }

    /// Set the sort order from raw input; non-numeric input becomes 0.
    pub fn set_team_sort_order(&mut self, raw: &str) -> Result<(), AppError> {
        self.ensure_can_edit(DENIED)?;
        self.team_editor.ensure_open(FORM)?;
        self.team_editor.form.sort_order = parse_lenient_int(raw);
        Ok(())
    }

    pub async fn submit_team_member(&mut self) -> Result<&'static str, AppError> {
        self.ensure_can_edit(DENIED)?;
        self.team_editor.ensure_open(FORM)?;
        validate_team_member(&self.team_editor.form)?;

        let result = match &self.team_editor.editing {
            Some(member) => {
                self.gateway
                    .update_team_member(&member.id, &self.team_editor.form)
                    .await
            }
            None => self.gateway.create_team_member(&self.team_editor.form).await,
        };
        if let Err(e) = result {
            tracing::error!(error = %e, "Error saving team member");
            return Err(AppError::ActionFailed(SAVE_FAILED.to_string()));
        }

        let updated = self.team_editor.editing.is_some();
        self.refresh().await;
        self.team_editor.close();

        Ok(if updated {
            "Team member updated successfully!"
        } else {
            "Team member created successfully!"
        })
    }

    pub fn cancel_team_member_form(&mut self) -> Result<(), AppError> {
        self.ensure_can_edit(DENIED)?;
        self.team_editor.close();
        Ok(())
    }

    pub async fn delete_team_member(&mut self, id: &str) -> Result<&'static str, AppError> {
        self.ensure_can_edit(DENIED)?;
        if let Err(e) = self.gateway.delete_team_member(id).await {
            tracing::error!(error = %e, member_id = %id, "Error deleting team member");
            return Err(AppError::ActionFailed(DELETE_FAILED.to_string()));
        }

        self.refresh().await;
        Ok("Team member deleted successfully!")
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::db::MockGateway;
    use crate::models::Role;

    fn member_fields(name: &str) -> TeamMemberFields {
        TeamMemberFields {
            name: name.to_string(),
            position: "Architect".to_string(),
            image_url: "https://cdn.example/face.jpg".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_and_edit_team_member() {
        let (mut panel, repo, _dir) = repo_panel(Role::SuperAdmin).await;

        panel.new_team_member_form().unwrap();
        panel.update_team_member_form(member_fields("Marta")).unwrap();
        panel.set_team_sort_order("3").unwrap();
        assert_eq!(
            panel.submit_team_member().await.unwrap(),
            "Team member created successfully!"
        );
        assert!(!panel.team_editor().open);

        let id = panel.team_members()[0].id.clone();
        assert_eq!(panel.team_members()[0].sort_order, 3);

        panel.edit_team_member(&id).unwrap();
        assert_eq!(panel.team_editor().form.name, "Marta");
        let mut fields = panel.team_editor().form.clone();
        fields.position = "Partner".to_string();
        panel.update_team_member_form(fields).unwrap();
        assert_eq!(
            panel.submit_team_member().await.unwrap(),
            "Team member updated successfully!"
        );

        let stored = repo.get_team_member(&id).await.unwrap().unwrap();
        assert_eq!(stored.position, "Partner");
    }

    #[tokio::test]
    async fn test_sort_order_input_is_parsed_leniently() {
        let mut panel = mock_panel(Role::SuperAdmin, MockGateway::new());
        panel.new_team_member_form().unwrap();

        panel.set_team_sort_order("12abc").unwrap();
        assert_eq!(panel.team_editor().form.sort_order, 12);
        panel.set_team_sort_order("abc").unwrap();
        assert_eq!(panel.team_editor().form.sort_order, 0);
    }

    #[tokio::test]
    async fn test_image_is_required_before_submit() {
        let mut panel = mock_panel(Role::SuperAdmin, MockGateway::new());
        panel.new_team_member_form().unwrap();
        let mut fields = member_fields("Marta");
        fields.image_url.clear();
        panel.update_team_member_form(fields).unwrap();

        let err = panel.submit_team_member().await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_failure_is_reported() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_delete_team_member()
            .times(1)
            .returning(|_| Err(AppError::Database("busy".to_string())));
        let mut panel = mock_panel(Role::SuperAdmin, gateway);

        let err = panel.delete_team_member("t1").await.unwrap_err();
        assert_eq!(err, AppError::ActionFailed(DELETE_FAILED.to_string()));
    }
}
