//! Testimonial editor actions.

use super::forms::validate_testimonial;
use super::AdminPanel;
use crate::errors::AppError;
use crate::models::TestimonialFields;

const DENIED: &str = "You do not have permission to modify testimonials.";
const FORM: &str = "testimonial";
const SAVE_FAILED: &str = "Error saving testimonial. Please try again.";
const DELETE_FAILED: &str = "Error deleting testimonial. Please try again.";

impl AdminPanel {
    pub fn new_testimonial_form(&mut self) -> Result<(), AppError> {
        self.ensure_can_edit(DENIED)?;
        self.testimonial_editor.open_new();
        Ok(())
    }

    pub fn edit_testimonial(&mut self, id: &str) -> Result<(), AppError> {
        self.ensure_can_edit(DENIED)?;
        let testimonial = self
            .testimonials
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Testimonial not found: {}", id)))?;

        let form = TestimonialFields::from(&testimonial);
        self.testimonial_editor.open_existing(testimonial, form);
        Ok(())
    }

    pub fn update_testimonial_form(&mut self, fields: TestimonialFields) -> Result<(), AppError> {
        self.ensure_can_edit(DENIED)?;
        self.testimonial_editor.ensure_open(FORM)?;
        self.testimonial_editor.form = fields;
        Ok(())
    }

    pub async fn submit_testimonial(&mut self) -> Result<&'static str, AppError> {
        self.ensure_can_edit(DENIED)?;
        self.testimonial_editor.ensure_open(FORM)?;
        validate_testimonial(&self.testimonial_editor.form)?;

        let form = &self.testimonial_editor.form;
        let result = match &self.testimonial_editor.editing {
            Some(testimonial) => self.gateway.update_testimonial(&testimonial.id, form).await,
            None => self.gateway.create_testimonial(form).await,
        };
        if let Err(e) = result {
            tracing::error!(error = %e, "Error saving testimonial");
            return Err(AppError::ActionFailed(SAVE_FAILED.to_string()));
        }

        let updated = self.testimonial_editor.editing.is_some();
        self.refresh().await;
        self.testimonial_editor.close();

        Ok(if updated {
            "Testimonial updated successfully!"
        } else {
            "Testimonial created successfully!"
        })
    }

    pub fn cancel_testimonial_form(&mut self) -> Result<(), AppError> {
        self.ensure_can_edit(DENIED)?;
        self.testimonial_editor.close();
        Ok(())
    }

    pub async fn delete_testimonial(&mut self, id: &str) -> Result<&'static str, AppError> {
        self.ensure_can_edit(DENIED)?;
        if let Err(e) = self.gateway.delete_testimonial(id).await {
            tracing::error!(error = %e, testimonial_id = %id, "Error deleting testimonial");
            return Err(AppError::ActionFailed(DELETE_FAILED.to_string()));
        }

        self.refresh().await;
        Ok("Testimonial deleted successfully!")
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::db::MockGateway;
    use crate::models::Role;

    fn quote(rating: i64) -> TestimonialFields {
        TestimonialFields {
            client_name: "Ana Lopes".to_string(),
            client_position: "Owner, Casa Lopes".to_string(),
            testimonial_text: "They listened.".to_string(),
            rating,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_then_edit_testimonial() {
        let (mut panel, repo, _dir) = repo_panel(Role::SuperAdmin).await;

        panel.new_testimonial_form().unwrap();
        assert_eq!(panel.testimonial_editor().form.rating, 5);
        panel.update_testimonial_form(quote(4)).unwrap();
        assert_eq!(
            panel.submit_testimonial().await.unwrap(),
            "Testimonial created successfully!"
        );

        let id = panel.testimonials()[0].id.clone();
        panel.edit_testimonial(&id).unwrap();
        let mut fields = panel.testimonial_editor().form.clone();
        fields.active = false;
        panel.update_testimonial_form(fields).unwrap();
        assert_eq!(
            panel.submit_testimonial().await.unwrap(),
            "Testimonial updated successfully!"
        );

        let stored = repo.get_testimonial(&id).await.unwrap().unwrap();
        assert_eq!(stored.rating, 4);
        assert!(!stored.active);
    }

    #[tokio::test]
    async fn test_out_of_range_rating_is_rejected_without_calls() {
        let mut panel = mock_panel(Role::SuperAdmin, MockGateway::new());
        panel.new_testimonial_form().unwrap();
        panel.update_testimonial_form(quote(7)).unwrap();

        let err = panel.submit_testimonial().await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(panel.testimonial_editor().open);
    }

    #[tokio::test]
    async fn test_edit_unknown_testimonial() {
        let mut panel = mock_panel(Role::SuperAdmin, MockGateway::new());
        assert!(matches!(
            panel.edit_testimonial("missing"),
            Err(AppError::NotFound(_))
        ));
    }
}
