//! Site-wide settings stored as named key/value rows.
//!
//! Storage keeps one JSON value per key. Each of the four known keys has a
//! fixed shape, so values are decoded into [`SiteSetting`] when read and a
//! value that does not match its key's shape is rejected.

use serde::{Deserialize, Serialize};

/// The four setting rows the back office manages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SettingKey {
    Stats,
    ContactInfo,
    SocialLinks,
    HeroSlides,
}

impl SettingKey {
    pub const ALL: [SettingKey; 4] = [
        SettingKey::Stats,
        SettingKey::ContactInfo,
        SettingKey::SocialLinks,
        SettingKey::HeroSlides,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::Stats => "stats",
            SettingKey::ContactInfo => "contact_info",
            SettingKey::SocialLinks => "social_links",
            SettingKey::HeroSlides => "hero_slides",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

/// Headline counters shown on the home page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub projects_completed: i64,
    pub years_experience: i64,
    pub happy_clients: i64,
    pub success_rate: i64,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            projects_completed: 150,
            years_experience: 12,
            happy_clients: 200,
            success_rate: 95,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum StatField {
    ProjectsCompleted,
    YearsExperience,
    HappyClients,
    SuccessRate,
}

impl Stats {
    /// Store raw form input into a counter. Input that is not an integer becomes 0.
    pub fn set(&mut self, field: StatField, raw: &str) {
        let value = parse_lenient_int(raw);
        match field {
            StatField::ProjectsCompleted => self.projects_completed = value,
            StatField::YearsExperience => self.years_experience = value,
            StatField::HappyClients => self.happy_clients = value,
            StatField::SuccessRate => self.success_rate = value,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactInfo {
    pub address: String,
    pub phone: String,
    pub email: String,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            address: "123 Design Street, Suite 456, New York, NY 10001".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            email: "info@26asdesign.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Address,
    Phone,
    Email,
}

impl ContactInfo {
    pub fn set(&mut self, field: ContactField, value: String) {
        match field {
            ContactField::Address => self.address = value,
            ContactField::Phone => self.phone = value,
            ContactField::Email => self.email = value,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SocialLinks {
    pub facebook: String,
    pub instagram: String,
    pub twitter: String,
    pub youtube: String,
    pub behance: String,
}

impl Default for SocialLinks {
    fn default() -> Self {
        Self {
            facebook: "https://facebook.com/26asdesign".to_string(),
            instagram: "https://instagram.com/26asdesign".to_string(),
            twitter: "https://twitter.com/26asdesign".to_string(),
            youtube: "https://youtube.com/@26asdesign".to_string(),
            behance: "https://behance.net/26asdesign".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SocialField {
    Facebook,
    Instagram,
    Twitter,
    Youtube,
    Behance,
}

impl SocialLinks {
    pub fn set(&mut self, field: SocialField, value: String) {
        match field {
            SocialField::Facebook => self.facebook = value,
            SocialField::Instagram => self.instagram = value,
            SocialField::Twitter => self.twitter = value,
            SocialField::Youtube => self.youtube = value,
            SocialField::Behance => self.behance = value,
        }
    }
}

/// One slide of the home page hero carousel.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeroSlide {
    pub image: String,
    pub title: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HeroSlideField {
    Image,
    Title,
    Subtitle,
}

impl HeroSlide {
    pub fn set(&mut self, field: HeroSlideField, value: String) {
        match field {
            HeroSlideField::Image => self.image = value,
            HeroSlideField::Title => self.title = value,
            HeroSlideField::Subtitle => self.subtitle = value,
        }
    }
}

/// A decoded settings row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteSetting {
    Stats(Stats),
    ContactInfo(ContactInfo),
    SocialLinks(SocialLinks),
    HeroSlides(Vec<HeroSlide>),
}

impl SiteSetting {
    pub fn key(&self) -> SettingKey {
        match self {
            SiteSetting::Stats(_) => SettingKey::Stats,
            SiteSetting::ContactInfo(_) => SettingKey::ContactInfo,
            SiteSetting::SocialLinks(_) => SettingKey::SocialLinks,
            SiteSetting::HeroSlides(_) => SettingKey::HeroSlides,
        }
    }

    /// Decode a stored value using the shape its key prescribes.
    pub fn decode(key: SettingKey, value: serde_json::Value) -> Result<Self, serde_json::Error> {
        Ok(match key {
            SettingKey::Stats => SiteSetting::Stats(serde_json::from_value(value)?),
            SettingKey::ContactInfo => SiteSetting::ContactInfo(serde_json::from_value(value)?),
            SettingKey::SocialLinks => SiteSetting::SocialLinks(serde_json::from_value(value)?),
            SettingKey::HeroSlides => SiteSetting::HeroSlides(serde_json::from_value(value)?),
        })
    }

    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            SiteSetting::Stats(v) => serde_json::to_value(v),
            SiteSetting::ContactInfo(v) => serde_json::to_value(v),
            SiteSetting::SocialLinks(v) => serde_json::to_value(v),
            SiteSetting::HeroSlides(v) => serde_json::to_value(v),
        }
    }
}

/// The four settings values viewed as one site configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SiteConfig {
    pub stats: Stats,
    pub contact_info: ContactInfo,
    pub social_links: SocialLinks,
    pub hero_slides: Vec<HeroSlide>,
}

impl SiteConfig {
    /// Replace the slice of configuration owned by `setting` wholesale.
    pub fn apply(&mut self, setting: SiteSetting) {
        match setting {
            SiteSetting::Stats(v) => self.stats = v,
            SiteSetting::ContactInfo(v) => self.contact_info = v,
            SiteSetting::SocialLinks(v) => self.social_links = v,
            SiteSetting::HeroSlides(v) => self.hero_slides = v,
        }
    }

    /// Split back into one row per key, in [`SettingKey::ALL`] order.
    pub fn to_settings(&self) -> [SiteSetting; 4] {
        [
            SiteSetting::Stats(self.stats.clone()),
            SiteSetting::ContactInfo(self.contact_info.clone()),
            SiteSetting::SocialLinks(self.social_links.clone()),
            SiteSetting::HeroSlides(self.hero_slides.clone()),
        ]
    }
}

/// Integer parsing for numeric form inputs.
///
/// Reads an optional sign followed by leading digits and ignores the rest,
/// so `"12 projects"` is 12. Anything without a leading integer is 0.
pub fn parse_lenient_int(raw: &str) -> i64 {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    match rest[..digits_len].parse::<i64>() {
        Ok(n) if negative => -n,
        Ok(n) => n,
        Err(_) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_lenient_int() {
        assert_eq!(parse_lenient_int("42"), 42);
        assert_eq!(parse_lenient_int("  7"), 7);
        assert_eq!(parse_lenient_int("-3"), -3);
        assert_eq!(parse_lenient_int("12abc"), 12);
        assert_eq!(parse_lenient_int("3.9"), 3);
        assert_eq!(parse_lenient_int("abc"), 0);
        assert_eq!(parse_lenient_int(""), 0);
        assert_eq!(parse_lenient_int("-"), 0);
    }

    #[test]
    fn test_stat_field_non_numeric_becomes_zero() {
        let mut stats = Stats::default();
        stats.set(StatField::HappyClients, "lots");
        assert_eq!(stats.happy_clients, 0);
        assert_eq!(stats.projects_completed, 150);
    }

    #[test]
    fn test_decode_uses_key_shape() {
        let stats = SiteSetting::decode(
            SettingKey::Stats,
            json!({"projectsCompleted": 1, "yearsExperience": 2, "happyClients": 3, "successRate": 4}),
        )
        .unwrap();
        assert_eq!(
            stats,
            SiteSetting::Stats(Stats {
                projects_completed: 1,
                years_experience: 2,
                happy_clients: 3,
                success_rate: 4,
            })
        );

        let slides = SiteSetting::decode(
            SettingKey::HeroSlides,
            json!([{"image": "a.jpg", "title": "T", "subtitle": "S"}]),
        )
        .unwrap();
        assert_eq!(slides.key(), SettingKey::HeroSlides);

        assert!(SiteSetting::decode(SettingKey::ContactInfo, json!([1, 2, 3])).is_err());
        assert!(SiteSetting::decode(SettingKey::Stats, json!({"projectsCompleted": 1})).is_err());
    }

    #[test]
    fn test_apply_replaces_only_its_slice() {
        let mut config = SiteConfig::default();
        config.apply(SiteSetting::Stats(Stats {
            projects_completed: 9,
            years_experience: 9,
            happy_clients: 9,
            success_rate: 9,
        }));
        assert_eq!(config.stats.projects_completed, 9);
        assert_eq!(config.contact_info, ContactInfo::default());
        assert_eq!(config.social_links, SocialLinks::default());
        assert!(config.hero_slides.is_empty());
    }

    #[test]
    fn test_setting_key_names() {
        for key in SettingKey::ALL {
            assert_eq!(SettingKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(SettingKey::parse("unknown"), None);
    }
}
