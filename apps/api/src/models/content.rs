use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub technologies: Vec<String>,
    pub featured: bool,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Certificate {
    pub id: Uuid,
    pub title: String,
    pub issuer: String,
    pub issue_date: NaiveDate,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub order_index: i32,
    /// `participation` or `recognition`.
    pub certificate_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct WorkExperience {
    pub id: Uuid,
    pub company: String,
    pub position: String,
    /// `Full-time`, `Part-time`, `Freelance`, `Internship` or `Contract`.
    pub employment_type: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub current: bool,
    pub duration: Option<String>,
    pub achievements: Vec<String>,
    pub responsibilities: Vec<String>,
    pub technologies: Vec<String>,
    pub team_size: Option<String>,
    pub company_size: Option<String>,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkExperience {
    /// Year range shown on the timeline card, e.g. `2022 - Present`.
    pub fn period(&self) -> String {
        let start = self.start_date.year();
        match self.end_date {
            Some(end) if !self.current => format!("{start} - {}", end.year()),
            _ => format!("{start} - Present"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeroSettingType {
    Badge,
    Resume,
    ProfileImage,
}

impl HeroSettingType {
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "badge" => Some(HeroSettingType::Badge),
            "resume" => Some(HeroSettingType::Resume),
            "profile_image" => Some(HeroSettingType::ProfileImage),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct HeroSetting {
    pub id: Uuid,
    pub setting_type: String,
    pub value: String,
    pub order_index: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HeroSetting {
    pub fn kind(&self) -> Option<HeroSettingType> {
        HeroSettingType::from_db(&self.setting_type)
    }
}
