//! Presentation sequencing for the roadmap reveal.
//!
//! These delays are not pipeline stages: the roadmap request has already
//! resolved when the schedule starts. Keeping them here lets the request path be
//! exercised without any of the choreography.

use std::time::Duration;

use serde::Serialize;

use crate::config::Timings;
use crate::session::phase::RoadmapStage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealAction {
    /// Switch the overlay from the AI stage to the expert stage.
    EnterExpertReview,
    /// Hand the roadmap to the dashboard.
    Publish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealStep {
    pub after: Duration,
    pub action: RevealAction,
}

/// The fixed reveal schedule run after the roadmap has been fetched.
pub fn reveal_schedule(timings: &Timings) -> [RevealStep; 2] {
    [
        RevealStep {
            after: timings.roadmap_ai_stage,
            action: RevealAction::EnterExpertReview,
        },
        RevealStep {
            after: timings.roadmap_expert_stage,
            action: RevealAction::Publish,
        },
    ]
}

/// Overlay copy for each stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadingOverlay {
    pub stage: RoadmapStage,
    pub title: &'static str,
    pub detail: &'static str,
}

impl LoadingOverlay {
    pub fn for_stage(stage: RoadmapStage) -> Self {
        match stage {
            RoadmapStage::Ai => Self {
                stage,
                title: "策略設計系統：正在匹配政策...",
                detail: "AI 正從 15,000+ 條政策細則中尋找最優路徑",
            },
            RoadmapStage::Expert => Self {
                stage,
                title: "資深顧問識別風險點...",
                detail: "專家正在審閱您的 7 年規劃，優化關鍵細節",
            },
        }
    }
}
