use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::content::hero::{hero_frame, resolve_hero, HeroFrame, HeroView};
use crate::errors::AppError;
use crate::interaction::lightbox::Lightbox;
use crate::interaction::orbit::OrbitNode;
use crate::interaction::Behavior;
use crate::models::content::{Certificate, Project, WorkExperience};
use crate::models::profile::{ContactDetails, Education, SkillCategory, Tool};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ExperienceCard {
    #[serde(flatten)]
    pub experience: WorkExperience,
    pub period: String,
}

impl From<WorkExperience> for ExperienceCard {
    fn from(experience: WorkExperience) -> Self {
        let period = experience.period();
        Self { experience, period }
    }
}

#[derive(Debug, Serialize)]
pub struct ToolPlacement {
    #[serde(flatten)]
    pub tool: Tool,
    pub orbit: OrbitNode,
}

#[derive(Debug, Serialize)]
pub struct CertificateDetail {
    #[serde(flatten)]
    pub certificate: Certificate,
    /// Zero-based position in the gallery, for opening the viewer at this item.
    pub index: usize,
    pub total: usize,
    /// e.g. `3 / 7`
    pub position: String,
    pub prev_id: Uuid,
    pub next_id: Uuid,
}

/// Every section of the single page in one document.
#[derive(Debug, Serialize)]
pub struct PortfolioResponse {
    pub hero: HeroView,
    pub about: Vec<String>,
    pub contact: ContactDetails,
    pub skills: Vec<SkillCategory>,
    pub tools: Vec<ToolPlacement>,
    pub certificates: Vec<Certificate>,
    pub experience: Vec<ExperienceCard>,
    pub education: Vec<Education>,
    pub projects: Vec<Project>,
    pub behavior: Behavior,
}

#[derive(Debug, Default, Deserialize)]
pub struct FrameQuery {
    #[serde(default)]
    pub elapsed_ms: u64,
    #[serde(default)]
    pub progress: f32,
}

async fn build_hero(state: &AppState) -> HeroView {
    let settings = state.store.hero_settings.snapshot().await;
    resolve_hero(&state.profile, &settings)
}

fn place_tools(state: &AppState) -> Vec<ToolPlacement> {
    let tools = &state.profile.tools;
    let nodes = state.orbit.place(tools.len(), Duration::ZERO, 0.0);
    tools
        .iter()
        .cloned()
        .zip(nodes)
        .map(|(tool, orbit)| ToolPlacement { tool, orbit })
        .collect()
}

async fn experience_cards(state: &AppState) -> Vec<ExperienceCard> {
    state
        .store
        .experience
        .snapshot()
        .await
        .into_iter()
        .map(ExperienceCard::from)
        .collect()
}

/// GET /api/v1/portfolio
pub async fn handle_portfolio(State(state): State<AppState>) -> Json<PortfolioResponse> {
    let profile = &state.profile;
    Json(PortfolioResponse {
        hero: build_hero(&state).await,
        about: profile.about.clone(),
        contact: profile.contact.clone(),
        skills: profile.skill_categories.clone(),
        tools: place_tools(&state),
        certificates: state.store.certificates.snapshot().await,
        experience: experience_cards(&state).await,
        education: profile.education.clone(),
        projects: state.store.projects.snapshot().await,
        behavior: Behavior::current(),
    })
}

/// GET /api/v1/hero
pub async fn handle_hero(State(state): State<AppState>) -> Json<HeroView> {
    Json(build_hero(&state).await)
}

/// GET /api/v1/hero/frame?elapsed_ms=&progress=
pub async fn handle_hero_frame(
    State(state): State<AppState>,
    Query(query): Query<FrameQuery>,
) -> Json<HeroFrame> {
    Json(hero_frame(
        &state.profile.phrases,
        Duration::from_millis(query.elapsed_ms),
        query.progress,
    ))
}

/// GET /api/v1/behavior
pub async fn handle_behavior() -> Json<Behavior> {
    Json(Behavior::current())
}

/// GET /api/v1/projects
pub async fn handle_projects(State(state): State<AppState>) -> Json<Vec<Project>> {
    Json(state.store.projects.snapshot().await)
}

/// GET /api/v1/certificates
pub async fn handle_certificates(State(state): State<AppState>) -> Json<Vec<Certificate>> {
    Json(state.store.certificates.snapshot().await)
}

/// GET /api/v1/certificates/:id
pub async fn handle_certificate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CertificateDetail>, AppError> {
    let certificates = state.store.certificates.snapshot().await;
    let index = certificates
        .iter()
        .position(|c| c.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Certificate {id} not found")))?;

    let mut viewer = Lightbox::new(certificates.len());
    viewer.open_at(index);
    let position = viewer.position_label().unwrap_or_default();
    viewer.prev();
    let prev = viewer.selected().unwrap_or(index);
    viewer.open_at(index);
    viewer.next();
    let next = viewer.selected().unwrap_or(index);

    Ok(Json(CertificateDetail {
        index,
        total: certificates.len(),
        position,
        prev_id: certificates[prev].id,
        next_id: certificates[next].id,
        certificate: certificates[index].clone(),
    }))
}

/// GET /api/v1/experience
pub async fn handle_experience(State(state): State<AppState>) -> Json<Vec<ExperienceCard>> {
    Json(experience_cards(&state).await)
}

/// GET /api/v1/education
pub async fn handle_education(State(state): State<AppState>) -> Json<Vec<Education>> {
    Json(state.profile.education.clone())
}

/// GET /api/v1/skills
pub async fn handle_skills(State(state): State<AppState>) -> Json<Vec<SkillCategory>> {
    Json(state.profile.skill_categories.clone())
}

/// GET /api/v1/tools
pub async fn handle_tools(State(state): State<AppState>) -> Json<Vec<ToolPlacement>> {
    Json(place_tools(&state))
}
