//! Workflow phases and the legal moves between them.

use serde::Serialize;
use thiserror::Error;

use crate::booking::BookingError;
use crate::payment::PaymentError;

/// The cosmetic sub-stages shown while a roadmap is being "prepared".
/// The real request has already resolved before `Expert` begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadmapStage {
    Ai,
    Expert,
}

/// Where a session is in the workflow.
///
/// idle → assessing → assessed → paying → roadmap_generating(ai → expert) → roadmap_ready,
/// with failures rolling back to the pre-call phase and reset returning to idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Assessing,
    Assessed,
    Paying,
    RoadmapGenerating { stage: RoadmapStage },
    RoadmapReady,
}

impl Phase {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: Phase) -> bool {
        use Phase::*;
        use RoadmapStage::*;
        matches!(
            (self, target),
            (Idle, Assessing)
                | (Assessing, Assessed)
                | (Assessing, Idle)
                | (Assessed, Paying)
                | (Assessed, Idle)
                | (Paying, Assessed)
                | (Paying, RoadmapGenerating { stage: Ai })
                | (RoadmapGenerating { stage: Ai }, RoadmapGenerating { stage: Expert })
                | (RoadmapGenerating { stage: Ai }, Assessed)
                | (RoadmapGenerating { stage: Expert }, RoadmapReady)
                | (RoadmapReady, Idle)
        )
    }

    /// Whether the profile form is on screen in this phase.
    pub fn shows_form(&self) -> bool {
        matches!(self, Self::Idle | Self::Assessing)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Assessing => "assessing",
            Self::Assessed => "assessed",
            Self::Paying => "paying",
            Self::RoadmapGenerating {
                stage: RoadmapStage::Ai,
            } => "roadmap_generating(ai)",
            Self::RoadmapGenerating {
                stage: RoadmapStage::Expert,
            } => "roadmap_generating(expert)",
            Self::RoadmapReady => "roadmap_ready",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum TransitionError {
    #[error("cannot {event} while {phase}")]
    Illegal { event: &'static str, phase: Phase },

    #[error("no assessment exists for this session")]
    MissingAssessment,

    #[error("payment gate is not open")]
    NoPaymentGate,

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error(transparent)]
    Booking(#[from] BookingError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use Phase::*;
    use RoadmapStage::*;

    const ALL: [Phase; 7] = [
        Idle,
        Assessing,
        Assessed,
        Paying,
        RoadmapGenerating { stage: Ai },
        RoadmapGenerating { stage: Expert },
        RoadmapReady,
    ];

    #[test]
    fn test_happy_path_is_legal() {
        let path = [
            Idle,
            Assessing,
            Assessed,
            Paying,
            RoadmapGenerating { stage: Ai },
            RoadmapGenerating { stage: Expert },
            RoadmapReady,
            Idle,
        ];
        for pair in path.windows(2) {
            assert!(
                pair[0].can_transition_to(pair[1]),
                "{} -> {} should be legal",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_failures_roll_back() {
        assert!(Assessing.can_transition_to(Idle));
        assert!(RoadmapGenerating { stage: Ai }.can_transition_to(Assessed));
    }

    #[test]
    fn test_no_roadmap_without_assessment() {
        for from in [Idle, Assessing] {
            assert!(!from.can_transition_to(RoadmapGenerating { stage: Ai }));
            assert!(!from.can_transition_to(Paying));
        }
    }

    #[test]
    fn test_reset_only_from_result_phases() {
        let resettable: Vec<Phase> = ALL
            .into_iter()
            .filter(|p| *p != Assessing && p.can_transition_to(Idle))
            .collect();
        assert_eq!(resettable, vec![Assessed, RoadmapReady]);
    }

    #[test]
    fn test_no_self_transitions() {
        for p in ALL {
            assert!(!p.can_transition_to(p), "{p} -> {p} should be illegal");
        }
    }

    #[test]
    fn test_form_visibility() {
        assert!(Idle.shows_form());
        assert!(Assessing.shows_form());
        assert!(!Assessed.shows_form());
        assert!(!RoadmapReady.shows_form());
    }

    #[test]
    fn test_phase_serializes_with_stage() {
        let json = serde_json::to_value(RoadmapGenerating { stage: Expert }).unwrap();
        assert_eq!(json["name"], "roadmap_generating");
        assert_eq!(json["stage"], "expert");
        assert_eq!(serde_json::to_value(Idle).unwrap()["name"], "idle");
    }
}
