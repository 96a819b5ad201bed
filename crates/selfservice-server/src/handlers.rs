//! HTTP Handlers
//!
//! One GET (render) and one POST (validate and commit) handler shared by
//! every wizard step, plus the task list, completion page and health check.
//!
//! POST order of operations: guard → normalize/validate → side effect →
//! compare-and-set the progress flag → clear the step draft → redirect.
//! Validation failures and recognized domain errors re-render the step;
//! everything else bubbles into [`AppError`] and the generic failure page.

use std::collections::HashMap;

use axum::extract::{Form, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Json;
use serde::Serialize;

use psp_onboarding::{
    map_domain_error, parse_bank_details, parse_company_number, parse_director,
    parse_government_entity_document, parse_responsible_person, parse_vat_number, step_names,
    WIZARD_NAME,
};
use wizard_core::form::FormErrors;
use wizard_core::{
    check_step, completion_target, CompletionRouting, Draft, FlagUpdate, GuardDecision,
    ServiceError, WizardError,
};

use crate::session::{apply_session_cookie, session_from_headers, RequestSession};
use crate::state::AppState;
use crate::views;

// ============================================================================
// Error plumbing
// ============================================================================

/// Wrapper routing unrecoverable errors to the generic failure page
pub struct AppError(pub WizardError);

impl From<WizardError> for AppError {
    fn from(err: WizardError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            WizardError::UnknownStep(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::error!("request failed: {}", self.0);
        (status, Html(views::error_page(self.0.user_message()))).into_response()
    }
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Task-list overview: every step with its completion status
pub async fn task_list(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let flags = state.progress.get_progress(&account_id).await?;
    let flash = params.get("flash").map(String::as_str);
    Ok(Html(views::task_list_page(&account_id, &state.plan, &flags, flash)).into_response())
}

/// All-steps-complete page; redirects back into the wizard if anything is
/// still outstanding
pub async fn complete_page(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> Result<Response, AppError> {
    let flags = state.progress.get_progress(&account_id).await?;

    match completion_target(&state.plan, &flags) {
        None => Ok(Html(views::complete_page(&account_id)).into_response()),
        Some(step) => Ok(Redirect::to(&views::step_path(&account_id, step.slug)).into_response()),
    }
}

/// Render a step's form, pre-populated from the session draft.
///
/// A draft saved by a failed POST also carries its validation errors; those
/// are shown once and then dropped from the draft, so a later fresh visit
/// gets the values without stale error messages.
pub async fn get_step(
    State(state): State<AppState>,
    Path((account_id, step)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = session_from_headers(&headers);
    let flags = state.progress.get_progress(&account_id).await?;

    match check_step(&state.plan, &flags, &step)? {
        GuardDecision::Redirect(predecessor) => {
            Ok(Redirect::to(&views::step_path(&account_id, predecessor.slug)).into_response())
        }
        GuardDecision::AlreadyCompleted => Ok(already_completed_redirect(&account_id)),
        GuardDecision::Proceed => {
            let draft = state.drafts.get(&session.id, WIZARD_NAME, &step)?;
            let (values, errors) = match draft {
                Some(draft) => {
                    if draft.errors.is_some() {
                        state.drafts.put(
                            &session.id,
                            WIZARD_NAME,
                            &step,
                            Draft::new(draft.values.clone()),
                        )?;
                    }
                    (draft.values, draft.errors.unwrap_or_default())
                }
                None => (HashMap::new(), FormErrors::new()),
            };
            let html = views::step_page(&account_id, &step, &values, &errors);
            Ok(apply_session_cookie(Html(html).into_response(), &session))
        }
    }
}

/// Validate and commit a step submission
pub async fn post_step(
    State(state): State<AppState>,
    Path((account_id, step)): Path<(String, String)>,
    headers: HeaderMap,
    Form(raw): Form<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let session = session_from_headers(&headers);
    let flags = state.progress.get_progress(&account_id).await?;

    match check_step(&state.plan, &flags, &step)? {
        GuardDecision::Redirect(predecessor) => {
            return Ok(Redirect::to(&views::step_path(&account_id, predecessor.slug))
                .into_response());
        }
        GuardDecision::AlreadyCompleted => return Ok(already_completed_redirect(&account_id)),
        GuardDecision::Proceed => {}
    }

    // Validate and perform the terminal side effect with normalized values
    if let Some(errors) = perform_side_effect(&state, &account_id, &step, &raw).await? {
        state.drafts.put(
            &session.id,
            WIZARD_NAME,
            &step,
            Draft::new(raw.clone()).with_errors(errors.clone()),
        )?;
        let html = views::step_page(&account_id, &step, &raw, &errors);
        return Ok(apply_session_cookie(Html(html).into_response(), &session));
    }

    finish_step(&state, &account_id, &step, &session).await
}

// ============================================================================
// Step commit plumbing
// ============================================================================

/// Run the step's validation and, when it passes, its side effect.
///
/// Returns `Some(errors)` for a local re-render (validation failure or
/// recognized domain error); `None` means the side effect succeeded.
async fn perform_side_effect(
    state: &AppState,
    account_id: &str,
    step: &str,
    raw: &HashMap<String, String>,
) -> Result<Option<FormErrors>, WizardError> {
    let result: Result<(), ServiceError> = match step {
        step_names::BANK_DETAILS => match parse_bank_details(raw) {
            Err(errors) => return Ok(Some(errors)),
            Ok(details) => state.psp.update_bank_account(account_id, &details).await,
        },
        step_names::RESPONSIBLE_PERSON => match parse_responsible_person(raw) {
            Err(errors) => return Ok(Some(errors)),
            Ok(person) => state.psp.upsert_responsible_person(account_id, &person).await,
        },
        step_names::VAT_NUMBER => match parse_vat_number(raw) {
            Err(errors) => return Ok(Some(errors)),
            Ok(vat) => state.psp.set_vat_number(account_id, &vat).await,
        },
        step_names::COMPANY_NUMBER => match parse_company_number(raw) {
            Err(errors) => return Ok(Some(errors)),
            Ok(company) => state.psp.set_company_number(account_id, &company).await,
        },
        step_names::DIRECTOR => match parse_director(raw) {
            Err(errors) => return Ok(Some(errors)),
            Ok(director) => state.psp.create_director(account_id, &director).await,
        },
        step_names::GOVERNMENT_ENTITY_DOCUMENT => match parse_government_entity_document(raw) {
            Err(errors) => return Ok(Some(errors)),
            Ok(document) => {
                state
                    .psp
                    .upload_government_entity_document(account_id, &document)
                    .await
            }
        },
        other => return Err(WizardError::UnknownStep(other.to_string())),
    };

    match result {
        Ok(()) => Ok(None),
        Err(ServiceError::Domain { code, message }) => match map_domain_error(&code) {
            Some(mapping) => {
                tracing::info!(account_id, step, %code, "recognized domain error");
                Ok(Some(mapping.to_form_errors()))
            }
            None => Err(WizardError::Upstream(format!("{}: {}", code, message))),
        },
        Err(ServiceError::Transport(message)) => Err(WizardError::Upstream(message)),
    }
}

/// Set the step's flag, clear its draft, and redirect to the configured
/// next destination
async fn finish_step(
    state: &AppState,
    account_id: &str,
    step: &str,
    session: &RequestSession,
) -> Result<Response, AppError> {
    let step_def = state
        .plan
        .step(step)
        .ok_or_else(|| WizardError::UnknownStep(step.to_string()))?;

    match state.progress.set_flag(account_id, step_def.flag).await? {
        FlagUpdate::Updated => {}
        FlagUpdate::AlreadySet => {
            tracing::warn!(account_id, step, "concurrent submission already set flag");
        }
    }

    state.drafts.clear_step(&session.id, WIZARD_NAME, step)?;

    let flags = state.progress.get_progress(account_id).await?;
    let target = match completion_target(&state.plan, &flags) {
        None => {
            state.drafts.clear_wizard(&session.id, WIZARD_NAME)?;
            format!("{}/complete", views::wizard_path(account_id))
        }
        Some(next) => match state.wizard_config.completion_routing {
            CompletionRouting::TaskList => views::wizard_path(account_id),
            CompletionRouting::NextStep => views::step_path(account_id, next.slug),
        },
    };

    Ok(apply_session_cookie(Redirect::to(&target).into_response(), session))
}

fn already_completed_redirect(account_id: &str) -> Response {
    let target = format!("{}?flash=already-completed", views::wizard_path(account_id));
    Redirect::to(&target).into_response()
}
