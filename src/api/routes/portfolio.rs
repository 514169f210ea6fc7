//! Portfolio Routes
//!
//! Read-only views of the static site content.
//!
//! - GET /api/ - API banner
//! - GET /api/portfolio/projects
//! - GET /api/portfolio/skills
//! - GET /api/portfolio/education

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{EducationResponse, MessageResponse, ProjectsResponse, SkillsResponse};
use crate::api::state::AppState;

/// GET /api/
pub async fn root(State(state): State<Arc<AppState>>) -> Json<MessageResponse> {
    Json(MessageResponse::new(format!(
        "{} Portfolio API",
        state.content.profile.name
    )))
}

/// GET /api/portfolio/projects
pub async fn projects(State(state): State<Arc<AppState>>) -> Json<ProjectsResponse<'static>> {
    let content = state.content;
    Json(ProjectsResponse {
        projects: &content.projects,
    })
}

/// GET /api/portfolio/skills
pub async fn skills(State(state): State<Arc<AppState>>) -> Json<SkillsResponse<'static>> {
    let content = state.content;
    let skills = &content.skills;
    Json(SkillsResponse {
        categories: &skills.categories,
        certifications: &skills.certifications,
    })
}

/// GET /api/portfolio/education
pub async fn education(State(state): State<Arc<AppState>>) -> Json<EducationResponse<'static>> {
    let content = state.content;
    Json(EducationResponse {
        education: &content.education.entries,
    })
}
