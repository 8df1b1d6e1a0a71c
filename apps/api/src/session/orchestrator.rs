//! Application Orchestrator — sequences the async work around session events.
//!
//! Flow: submit → get_free_assessment → (upgrade → start_pay → assumed success)
//!       → generate_strategy_roadmap → reveal schedule → roadmap ready.
//!
//! No step is retried and nothing is cancelled: a request that has started runs
//! to completion, and a result arriving for a session that has moved on is
//! rejected by the transition table and dropped.

use tracing::{info, warn};
use uuid::Uuid;

use crate::advisory::assessment::get_free_assessment;
use crate::advisory::roadmap::generate_strategy_roadmap;
use crate::errors::AppError;
use crate::models::profile::UserProfile;
use crate::payment::Navigation;
use crate::session::presentation::{reveal_schedule, RevealAction};
use crate::session::state::SessionView;
use crate::state::AppState;

/// Submits the session's profile (optionally replacing it wholesale first) and
/// waits for the assessment.
///
/// On failure the session rolls back to `idle` with a notification, and the
/// error is returned to the caller.
pub async fn submit_assessment(
    state: &AppState,
    id: Uuid,
    replacement: Option<UserProfile>,
) -> Result<SessionView, AppError> {
    let profile = state
        .sessions
        .with(id, |s| {
            if let Some(profile) = replacement {
                s.replace_form(profile)?;
            }
            s.begin_assessment()
        })
        .await??;

    info!("Assessment requested for session {id}");

    match get_free_assessment(&profile, state.llm.as_ref()).await {
        Ok(result) => {
            state
                .sessions
                .with(id, |s| s.complete_assessment(result))
                .await??;
        }
        Err(e) => {
            warn!("Assessment failed for session {id}: {e}");
            state
                .sessions
                .with(id, |s| s.fail_assessment())
                .await?
                .unwrap_or_else(|t| warn!("Rollback skipped for session {id}: {t}"));
            return Err(e);
        }
    }

    view(state, id).await
}

/// Starts the redirect and schedules the assumed-success timer.
///
/// The timer is the only thing that moves the session on: the gate itself never
/// reports success, and no payment confirmation is consulted.
pub async fn start_payment(state: &AppState, id: Uuid) -> Result<Navigation, AppError> {
    let navigation = state.sessions.with(id, |s| s.start_pay()).await??;

    let delay = state.config.timings.payment_assumed_success;
    let task_state = state.clone();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        run_roadmap(&task_state, id).await;
    });

    info!("Payment redirect issued for session {id}; success assumed after {delay:?}");
    Ok(navigation)
}

/// Fetches the roadmap, then plays the reveal schedule.
///
/// Failures land in the session as a notification; this runs detached so there
/// is no caller to return them to.
pub async fn run_roadmap(state: &AppState, id: Uuid) {
    let inputs = match state.sessions.with(id, |s| s.payment_succeeded()).await {
        Ok(Ok(inputs)) => inputs,
        Ok(Err(e)) => {
            warn!("Roadmap not started for session {id}: {e}");
            return;
        }
        Err(e) => {
            warn!("Roadmap not started: {e}");
            return;
        }
    };
    let (profile, assessment) = inputs;

    let roadmap = match generate_strategy_roadmap(&profile, &assessment, state.llm.as_ref()).await
    {
        Ok(roadmap) => roadmap,
        Err(e) => {
            warn!("Roadmap generation failed for session {id}: {e}");
            if let Ok(Err(t)) = state.sessions.with(id, |s| s.fail_roadmap()).await {
                warn!("Rollback skipped for session {id}: {t}");
            }
            return;
        }
    };

    let mut roadmap = Some(roadmap);
    for step in reveal_schedule(&state.config.timings) {
        tokio::time::sleep(step.after).await;
        let applied = state
            .sessions
            .with(id, |s| match step.action {
                RevealAction::EnterExpertReview => s.enter_expert_review(),
                RevealAction::Publish => match roadmap.take() {
                    Some(r) => s.publish_roadmap(r),
                    None => Ok(()),
                },
            })
            .await;
        match applied {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                warn!("Reveal stopped for session {id}: {e}");
                return;
            }
            Err(e) => {
                warn!("Reveal stopped: {e}");
                return;
            }
        }
    }

    info!("Roadmap ready for session {id}");
}

pub async fn view(state: &AppState, id: Uuid) -> Result<SessionView, AppError> {
    let price = state.config.roadmap_price.clone();
    state.sessions.with(id, |s| s.view(&price)).await
}
