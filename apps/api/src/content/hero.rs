use std::time::Duration;

use serde::Serialize;

use crate::interaction::parallax::HeroParallax;
use crate::interaction::typewriter::{Phase, PhraseRotator, Typewriter, PHRASE_INTERVAL};
use crate::models::content::{HeroSetting, HeroSettingType};
use crate::models::profile::Profile;

pub const DEFAULT_RESUME_URL: &str = "/resume.png";
pub const DEFAULT_PROFILE_IMAGE_URL: &str = "/placeholder.svg";
pub const DEFAULT_BADGES: &[&str] = &["BSIT Student", "Full Stack Developer", "Freelancer"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroView {
    pub name: String,
    pub headline: String,
    pub phrases: Vec<String>,
    pub badges: Vec<String>,
    pub resume_url: String,
    pub profile_image_url: String,
}

/// Builds the hero banner from active settings (already in display order),
/// falling back to defaults for anything missing or blank.
pub fn resolve_hero(profile: &Profile, settings: &[HeroSetting]) -> HeroView {
    let badges: Vec<String> = settings
        .iter()
        .filter(|s| s.kind() == Some(HeroSettingType::Badge))
        .map(|s| s.value.clone())
        .collect();
    let badges = if badges.is_empty() {
        DEFAULT_BADGES.iter().map(|b| b.to_string()).collect()
    } else {
        badges
    };

    HeroView {
        name: profile.name.clone(),
        headline: profile.headline.clone(),
        phrases: profile.phrases.clone(),
        badges,
        resume_url: first_value(settings, HeroSettingType::Resume)
            .unwrap_or(DEFAULT_RESUME_URL)
            .to_string(),
        profile_image_url: first_value(settings, HeroSettingType::ProfileImage)
            .unwrap_or(DEFAULT_PROFILE_IMAGE_URL)
            .to_string(),
    }
}

/// Value of the first setting of `kind`, if that value is non-empty.
fn first_value(settings: &[HeroSetting], kind: HeroSettingType) -> Option<&str> {
    settings
        .iter()
        .find(|s| s.kind() == Some(kind))
        .map(|s| s.value.as_str())
        .filter(|v| !v.is_empty())
}

/// The animated parts of the hero at one instant, for server-rendered snapshots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroFrame {
    pub phrase_index: usize,
    pub typed: String,
    pub phase: Phase,
    pub parallax: HeroParallax,
}

/// Each phrase is typed from scratch when the rotation reaches it.
pub fn hero_frame(phrases: &[String], elapsed: Duration, scroll_progress: f32) -> HeroFrame {
    let phrase_index = PhraseRotator::new(phrases.len()).at(elapsed);
    let since_rotation =
        Duration::from_millis((elapsed.as_millis() % PHRASE_INTERVAL.as_millis()) as u64);
    let typewriter = phrases
        .get(phrase_index)
        .map(|phrase| Typewriter::after(phrase, since_rotation))
        .unwrap_or_else(|| Typewriter::new(""));

    HeroFrame {
        phrase_index,
        typed: typewriter.text(),
        phase: typewriter.phase(),
        parallax: HeroParallax::at(scroll_progress),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::content::fixtures::hero_setting;

    fn profile() -> Profile {
        Profile::embedded().unwrap()
    }

    #[test]
    fn test_defaults_when_no_settings() {
        let hero = resolve_hero(&profile(), &[]);
        assert_eq!(hero.badges, DEFAULT_BADGES);
        assert_eq!(hero.resume_url, DEFAULT_RESUME_URL);
        assert_eq!(hero.profile_image_url, DEFAULT_PROFILE_IMAGE_URL);
    }

    #[test]
    fn test_badges_keep_setting_order() {
        let settings = vec![
            hero_setting("badge", "Rustacean", 0),
            hero_setting("resume", "/cv.pdf", 1),
            hero_setting("badge", "Speaker", 2),
        ];
        let hero = resolve_hero(&profile(), &settings);
        assert_eq!(hero.badges, vec!["Rustacean", "Speaker"]);
        assert_eq!(hero.resume_url, "/cv.pdf");
    }

    #[test]
    fn test_blank_resume_value_falls_back() {
        let settings = vec![
            hero_setting("resume", "", 0),
            hero_setting("profile_image", "/me.webp", 1),
        ];
        let hero = resolve_hero(&profile(), &settings);
        assert_eq!(hero.resume_url, DEFAULT_RESUME_URL);
        assert_eq!(hero.profile_image_url, "/me.webp");
    }

    fn phrases() -> Vec<String> {
        vec!["Rust".to_string(), "Go".to_string()]
    }

    #[test]
    fn test_frame_types_current_phrase() {
        // "Rust": chars at 120, 240, 360, 480ms
        let frame = hero_frame(&phrases(), Duration::from_millis(250), 0.0);
        assert_eq!(frame.phrase_index, 0);
        assert_eq!(frame.typed, "Ru");
        assert_eq!(frame.phase, Phase::Typing);
        assert_eq!(frame.parallax, HeroParallax::at(0.0));

        let full = hero_frame(&phrases(), Duration::from_millis(500), 0.0);
        assert_eq!(full.typed, "Rust");
        assert_eq!(full.phase, Phase::Paused);
    }

    #[test]
    fn test_frame_rotates_and_restarts_typing() {
        let frame = hero_frame(&phrases(), Duration::from_millis(4130), 1.0);
        assert_eq!(frame.phrase_index, 1);
        assert_eq!(frame.typed, "G");
        assert_eq!(frame.parallax.hero_opacity, 0.0);
    }

    #[test]
    fn test_frame_without_phrases_is_blank() {
        let frame = hero_frame(&[], Duration::from_secs(9), 0.0);
        assert_eq!(frame.phrase_index, 0);
        assert!(frame.typed.is_empty());
    }
}
