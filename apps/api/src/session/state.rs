//! Per-visitor session: the single owner of all cross-step state.
//!
//! Every method is one synchronous event handler. Async work (the two
//! completion calls and the reveal timers) happens outside, in
//! `session::orchestrator`, which feeds results back through these methods.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::time::Instant;
use uuid::Uuid;

use crate::booking::{BookingModal, BookingModalView, ProceedOutcome};
use crate::dashboard::DashboardView;
use crate::models::assessment::AssessmentResult;
use crate::models::profile::UserProfile;
use crate::models::roadmap::StrategyRoadmap;
use crate::payment::{Navigation, PaymentGate, PaymentStep, PaymentView};
use crate::profile::{FieldUpdate, FormView, ProfileForm};
use crate::session::phase::{Phase, RoadmapStage, TransitionError};
use crate::session::presentation::LoadingOverlay;

pub const ASSESSMENT_FAILED_MESSAGE: &str = "分析出錯，請稍後再試。";
pub const ROADMAP_FAILED_MESSAGE: &str = "生成策略圖出錯。";

/// A blocking message the client must show and dismiss.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub message: &'static str,
    pub raised_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Monotonic twin of `updated_at`, used for idle eviction.
    last_active: Instant,
    phase: Phase,
    form: ProfileForm,
    /// The profile of the current submission. Replaced wholesale on each submit.
    profile: Option<UserProfile>,
    assessment: Option<AssessmentResult>,
    roadmap: Option<StrategyRoadmap>,
    payment: Option<PaymentGate>,
    booking: BookingModal,
    notification: Option<Notification>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub phase: Phase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<FormView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dashboard: Option<DashboardView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loading: Option<LoadingOverlay>,
    pub booking: BookingModalView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            last_active: Instant::now(),
            phase: Phase::Idle,
            form: ProfileForm::new(),
            profile: None,
            assessment: None,
            roadmap: None,
            payment: None,
            booking: BookingModal::default(),
            notification: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn last_active(&self) -> Instant {
        self.last_active
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn assessment(&self) -> Option<&AssessmentResult> {
        self.assessment.as_ref()
    }

    pub fn roadmap(&self) -> Option<&StrategyRoadmap> {
        self.roadmap.as_ref()
    }

    #[cfg(test)]
    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    fn transition(&mut self, event: &'static str, target: Phase) -> Result<(), TransitionError> {
        if !self.phase.can_transition_to(target) {
            return Err(TransitionError::Illegal {
                event,
                phase: self.phase,
            });
        }
        self.phase = target;
        self.touch();
        Ok(())
    }

    fn require(&self, event: &'static str, phase: Phase) -> Result<(), TransitionError> {
        if self.phase != phase {
            return Err(TransitionError::Illegal {
                event,
                phase: self.phase,
            });
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
        self.last_active = Instant::now();
    }

    fn notify(&mut self, message: &'static str) {
        self.notification = Some(Notification {
            message,
            raised_at: Utc::now(),
        });
    }

    // ── Profile Capture ────────────────────────────────────────────────────

    /// Field edits are only accepted while the form is idle; it is disabled while assessing.
    pub fn edit_form(&mut self, updates: Vec<FieldUpdate>) -> Result<(), TransitionError> {
        self.require("edit the profile", Phase::Idle)?;
        for update in updates {
            self.form.apply(update);
        }
        self.touch();
        Ok(())
    }

    pub fn replace_form(&mut self, profile: UserProfile) -> Result<(), TransitionError> {
        self.require("edit the profile", Phase::Idle)?;
        self.form.replace(profile);
        self.touch();
        Ok(())
    }

    /// `idle → assessing`. Returns the submitted snapshot for the assessment request.
    pub fn begin_assessment(&mut self) -> Result<UserProfile, TransitionError> {
        self.transition("submit the profile", Phase::Assessing)?;
        let profile = self.form.submit();
        self.profile = Some(profile.clone());
        Ok(profile)
    }

    pub fn complete_assessment(&mut self, result: AssessmentResult) -> Result<(), TransitionError> {
        self.transition("accept an assessment", Phase::Assessed)?;
        self.assessment = Some(result);
        Ok(())
    }

    /// Rolls back to `idle` keeping nothing from the failed attempt.
    pub fn fail_assessment(&mut self) -> Result<(), TransitionError> {
        self.transition("fail an assessment", Phase::Idle)?;
        self.profile = None;
        self.assessment = None;
        self.notify(ASSESSMENT_FAILED_MESSAGE);
        Ok(())
    }

    /// `assessed | roadmap_ready → idle`. The next submission starts from a fresh form.
    pub fn reset(&mut self) -> Result<(), TransitionError> {
        self.transition("reset", Phase::Idle)?;
        self.form = ProfileForm::new();
        self.profile = None;
        self.assessment = None;
        self.roadmap = None;
        self.payment = None;
        Ok(())
    }

    // ── Payment Gate ───────────────────────────────────────────────────────

    /// The upsell action: `assessed → paying`.
    pub fn open_payment(&mut self, price: &str, link: &str) -> Result<(), TransitionError> {
        self.transition("open the payment gate", Phase::Paying)?;
        self.payment = Some(PaymentGate::new(price, link));
        Ok(())
    }

    /// `paying → assessed`. Not possible once the redirect is under way.
    pub fn cancel_payment(&mut self) -> Result<(), TransitionError> {
        let gate = self.payment.as_ref().ok_or(TransitionError::NoPaymentGate)?;
        if gate.step() == PaymentStep::Processing {
            return Err(TransitionError::Illegal {
                event: "cancel a payment in progress",
                phase: self.phase,
            });
        }
        self.transition("cancel payment", Phase::Assessed)?;
        self.payment = None;
        Ok(())
    }

    pub fn start_pay(&mut self) -> Result<Navigation, TransitionError> {
        self.require("start payment", Phase::Paying)?;
        let gate = self.payment.as_mut().ok_or(TransitionError::NoPaymentGate)?;
        let navigation = gate.start_pay()?;
        self.touch();
        Ok(navigation)
    }

    pub fn retry_payment(&mut self) -> Result<(), TransitionError> {
        self.require("retry payment", Phase::Paying)?;
        let gate = self.payment.as_mut().ok_or(TransitionError::NoPaymentGate)?;
        gate.retry()?;
        self.touch();
        Ok(())
    }

    /// Treats the issued redirect as a completed payment: `paying → roadmap_generating(ai)`.
    ///
    /// Nothing confirms the payment; see the `payment` module. Returns the inputs
    /// for the roadmap request, which can never be issued without an assessment.
    pub fn payment_succeeded(
        &mut self,
    ) -> Result<(UserProfile, AssessmentResult), TransitionError> {
        self.require("confirm payment", Phase::Paying)?;
        let redirected = self
            .payment
            .as_ref()
            .is_some_and(|g| g.step() == PaymentStep::Processing);
        if !redirected {
            return Err(TransitionError::Illegal {
                event: "confirm a payment that was never started",
                phase: self.phase,
            });
        }
        let (Some(profile), Some(assessment)) = (self.profile.clone(), self.assessment.clone())
        else {
            return Err(TransitionError::MissingAssessment);
        };
        self.transition(
            "confirm payment",
            Phase::RoadmapGenerating {
                stage: RoadmapStage::Ai,
            },
        )?;
        self.payment = None;
        Ok((profile, assessment))
    }

    pub fn enter_expert_review(&mut self) -> Result<(), TransitionError> {
        self.transition(
            "enter expert review",
            Phase::RoadmapGenerating {
                stage: RoadmapStage::Expert,
            },
        )
    }

    pub fn publish_roadmap(&mut self, roadmap: StrategyRoadmap) -> Result<(), TransitionError> {
        self.transition("publish the roadmap", Phase::RoadmapReady)?;
        self.roadmap = Some(roadmap);
        Ok(())
    }

    /// Rolls back to `assessed`; the assessment survives, no roadmap is kept.
    pub fn fail_roadmap(&mut self) -> Result<(), TransitionError> {
        self.transition("fail the roadmap", Phase::Assessed)?;
        self.roadmap = None;
        self.notify(ROADMAP_FAILED_MESSAGE);
        Ok(())
    }

    // ── Booking Modal ──────────────────────────────────────────────────────

    pub fn open_booking(&mut self) {
        self.booking.open();
        self.touch();
    }

    pub fn close_booking(&mut self) {
        self.booking.close();
        self.touch();
    }

    /// Rejected unless the modal is open.
    pub fn booking_proceed(&mut self) -> Result<ProceedOutcome, TransitionError> {
        let outcome = self.booking.proceed(self.roadmap.is_some())?;
        self.touch();
        Ok(outcome)
    }

    pub fn booking_back(&mut self) -> Result<(), TransitionError> {
        self.booking.back()?;
        self.touch();
        Ok(())
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
        self.touch();
    }

    // ── Views ──────────────────────────────────────────────────────────────

    pub fn dashboard(&self, price: &str) -> Option<DashboardView> {
        self.assessment
            .as_ref()
            .map(|a| DashboardView::render(a, self.roadmap.as_ref(), price))
    }

    pub fn view(&self, price: &str) -> SessionView {
        let loading = match self.phase {
            Phase::RoadmapGenerating { stage } => Some(LoadingOverlay::for_stage(stage)),
            _ => None,
        };
        SessionView {
            id: self.id,
            phase: self.phase,
            form: self
                .phase
                .shows_form()
                .then(|| self.form.view(self.phase == Phase::Assessing)),
            dashboard: self.dashboard(price),
            payment: self.payment.as_ref().map(PaymentGate::view),
            loading,
            booking: self.booking.view(self.roadmap.is_some()),
            notification: self.notification.clone(),
            updated_at: self.updated_at,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
