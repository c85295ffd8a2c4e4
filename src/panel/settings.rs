//! Site settings load, in-memory edits and save.

use super::{AdminPanel, HeroSlideEdit, SettingsEdit};
use crate::errors::AppError;
use crate::models::{HeroSlide, SettingKey};

const DENIED: &str = "You do not have permission to update settings.";
const SAVE_FAILED: &str = "Error saving site settings. Please try again.";

impl AdminPanel {
    /// Fetch the four settings rows concurrently.
    ///
    /// A stored value replaces its whole slice of the configuration; a key
    /// with no row keeps the value already in memory. A failed fetch is
    /// logged and leaves everything as it was.
    pub async fn load_site_settings(&mut self) {
        let gateway = self.gateway.clone();
        let fetched = tokio::try_join!(
            gateway.get_setting(SettingKey::Stats),
            gateway.get_setting(SettingKey::ContactInfo),
            gateway.get_setting(SettingKey::SocialLinks),
            gateway.get_setting(SettingKey::HeroSlides),
        );

        match fetched {
            Ok((stats, contact, social, hero)) => {
                for setting in [stats, contact, social, hero].into_iter().flatten() {
                    self.site.apply(setting);
                }
            }
            Err(e) => tracing::error!(error = %e, "Error loading site settings"),
        }
    }

    /// Apply one field edit to the in-memory settings.
    pub fn edit_setting(&mut self, edit: SettingsEdit) -> Result<(), AppError> {
        self.ensure_can_edit(DENIED)?;
        match edit {
            SettingsEdit::Stats { field, value } => self.site.stats.set(field, &value),
            SettingsEdit::ContactInfo { field, value } => {
                self.site.contact_info.set(field, value)
            }
            SettingsEdit::SocialLinks { field, value } => {
                self.site.social_links.set(field, value)
            }
        }
        Ok(())
    }

    /// Append an empty slide.
    pub fn add_hero_slide(&mut self) -> Result<(), AppError> {
        self.ensure_can_edit(DENIED)?;
        self.site.hero_slides.push(HeroSlide::default());
        Ok(())
    }

    /// Remove the slide at `index`; an index past the end changes nothing.
    pub fn remove_hero_slide(&mut self, index: usize) -> Result<(), AppError> {
        self.ensure_can_edit(DENIED)?;
        if index < self.site.hero_slides.len() {
            self.site.hero_slides.remove(index);
        }
        Ok(())
    }

    pub fn update_hero_slide(&mut self, index: usize, edit: HeroSlideEdit) -> Result<(), AppError> {
        self.ensure_can_edit(DENIED)?;
        let slide = self.hero_slide_mut(index)?;
        slide.set(edit.field, edit.value);
        Ok(())
    }

    pub(super) fn hero_slide_mut(&mut self, index: usize) -> Result<&mut HeroSlide, AppError> {
        self.site
            .hero_slides
            .get_mut(index)
            .ok_or_else(|| AppError::Validation(format!("No hero slide at index {}", index)))
    }

    /// Write all four settings concurrently.
    ///
    /// Any single failure reports one generic error; rows written by the
    /// other writes stay written.
    pub async fn save_site_settings(&mut self) -> Result<&'static str, AppError> {
        self.ensure_can_edit(DENIED)?;
        let [stats, contact, social, hero] = self.site.to_settings();
        let gateway = self.gateway.clone();

        let saved = tokio::try_join!(
            gateway.put_setting(&stats),
            gateway.put_setting(&contact),
            gateway.put_setting(&social),
            gateway.put_setting(&hero),
        );
        if let Err(e) = saved {
            tracing::error!(error = %e, "Error saving site settings");
            return Err(AppError::ActionFailed(SAVE_FAILED.to_string()));
        }

        tracing::info!(operator = %self.operator.username, "Saved site settings");
        Ok("Site settings updated successfully!")
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::db::MockGateway;
    use crate::models::{
        ContactField, HeroSlideField, Role, SiteConfig, SiteSetting, StatField, Stats,
    };

    #[tokio::test]
    async fn test_load_with_only_stats_keeps_other_defaults() {
        let mut gateway = MockGateway::new();
        gateway.expect_get_setting().returning(|key| {
            Ok(match key {
                SettingKey::Stats => Some(SiteSetting::Stats(Stats {
                    projects_completed: 10,
                    years_experience: 2,
                    happy_clients: 8,
                    success_rate: 99,
                })),
                _ => None,
            })
        });
        let mut panel = mock_panel(Role::Admin, gateway);

        panel.load_site_settings().await;

        let defaults = SiteConfig::default();
        let site = panel.site_config();
        assert_eq!(site.stats.projects_completed, 10);
        assert_eq!(site.contact_info, defaults.contact_info);
        assert_eq!(site.social_links, defaults.social_links);
        assert!(site.hero_slides.is_empty());
    }

    #[tokio::test]
    async fn test_load_failure_keeps_defaults() {
        let mut gateway = MockGateway::new();
        gateway
            .expect_get_setting()
            .returning(|_| Err(AppError::Database("gone".to_string())));
        let mut panel = mock_panel(Role::Admin, gateway);

        panel.load_site_settings().await;
        assert_eq!(*panel.site_config(), SiteConfig::default());
    }

    #[tokio::test]
    async fn test_edit_and_save_round_trip() {
        let (mut panel, repo, _dir) = repo_panel(Role::SuperAdmin).await;

        panel
            .edit_setting(SettingsEdit::Stats {
                field: StatField::HappyClients,
                value: "abc".to_string(),
            })
            .unwrap();
        panel
            .edit_setting(SettingsEdit::ContactInfo {
                field: ContactField::Phone,
                value: "+351 21 000 0000".to_string(),
            })
            .unwrap();
        panel.add_hero_slide().unwrap();
        panel
            .update_hero_slide(
                0,
                HeroSlideEdit {
                    field: HeroSlideField::Title,
                    value: "Spaces that breathe".to_string(),
                },
            )
            .unwrap();

        assert_eq!(
            panel.save_site_settings().await.unwrap(),
            "Site settings updated successfully!"
        );

        let Some(SiteSetting::Stats(stats)) = repo.get_setting(SettingKey::Stats).await.unwrap()
        else {
            panic!("stats row missing");
        };
        assert_eq!(stats.happy_clients, 0);

        let Some(SiteSetting::HeroSlides(slides)) =
            repo.get_setting(SettingKey::HeroSlides).await.unwrap()
        else {
            panic!("hero_slides row missing");
        };
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].title, "Spaces that breathe");

        panel.load_site_settings().await;
        assert_eq!(panel.site_config().contact_info.phone, "+351 21 000 0000");
    }

    #[tokio::test]
    async fn test_hero_slide_list_operations() {
        let mut panel = mock_panel(Role::SuperAdmin, MockGateway::new());
        for _ in 0..3 {
            panel.add_hero_slide().unwrap();
        }
        for (i, title) in ["one", "two", "three"].iter().enumerate() {
            panel
                .update_hero_slide(
                    i,
                    HeroSlideEdit {
                        field: HeroSlideField::Title,
                        value: title.to_string(),
                    },
                )
                .unwrap();
        }

        panel.remove_hero_slide(1).unwrap();
        let titles: Vec<_> = panel
            .site_config()
            .hero_slides
            .iter()
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(titles, vec!["one", "three"]);

        panel.remove_hero_slide(9).unwrap();
        assert_eq!(panel.site_config().hero_slides.len(), 2);

        let err = panel
            .update_hero_slide(
                5,
                HeroSlideEdit {
                    field: HeroSlideField::Image,
                    value: "x.jpg".to_string(),
                },
            )
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_save_failure_reports_generic_error() {
        let mut gateway = MockGateway::new();
        gateway.expect_put_setting().returning(|setting| match setting.key() {
            SettingKey::SocialLinks => Err(AppError::Database("locked".to_string())),
            _ => Ok(()),
        });
        let mut panel = mock_panel(Role::SuperAdmin, gateway);

        let err = panel.save_site_settings().await.unwrap_err();
        assert_eq!(err, AppError::ActionFailed(SAVE_FAILED.to_string()));
    }
}
