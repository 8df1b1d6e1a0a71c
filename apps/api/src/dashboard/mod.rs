//! Result Dashboard — a pure projection of the assessment (and roadmap, once paid)
//! into the view the client renders. No state, no I/O: equal inputs give equal views.

use serde::Serialize;

use crate::models::assessment::AssessmentResult;
use crate::models::roadmap::{Milestone, StrategyRoadmap};
use crate::payment::LIST_PRICE;

pub const CHART_FULL_MARK: u8 = 100;

/// One axis of the suitability radar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub subject: &'static str,
    pub value: u8,
    pub full_mark: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentPanel {
    pub chart: Vec<ChartPoint>,
    pub score: &'static str,
    pub analysis: String,
    pub recommended_path: String,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadmapPanel {
    pub title: &'static str,
    pub summary: String,
    pub milestones: Vec<Milestone>,
    pub risks_title: &'static str,
    pub risks: Vec<String>,
    pub tips_title: &'static str,
    pub tips: Vec<String>,
}

/// Shown in place of the roadmap until one exists. `action` is the event the
/// client posts to open the Payment Gate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsellPanel {
    pub title: &'static str,
    pub price: String,
    pub list_price: &'static str,
    pub action: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaidSection {
    Roadmap(RoadmapPanel),
    Upsell(UpsellPanel),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub assessment: AssessmentPanel,
    pub paid: PaidSection,
}

impl DashboardView {
    pub fn render(
        result: &AssessmentResult,
        roadmap: Option<&StrategyRoadmap>,
        price: &str,
    ) -> Self {
        let s = &result.suitability;
        let assessment = AssessmentPanel {
            chart: vec![
                point("留學路徑匹配", s.study),
                point("高才通匹配", s.ttps),
                point("優才計劃匹配", s.qmas),
            ],
            score: result.score.label(),
            analysis: result.analysis.clone(),
            recommended_path: result.recommended_path.clone(),
            next_steps: result.next_steps.clone(),
        };

        let paid = match roadmap {
            Some(r) => PaidSection::Roadmap(RoadmapPanel {
                title: "您的：7 年策略設計報告",
                summary: r.summary.clone(),
                milestones: r.milestones.clone(),
                risks_title: "顧問特別強調的風險點",
                risks: r.risks.clone(),
                tips_title: "顧問建議 (增加與港連繫)",
                tips: r.tips.clone(),
            }),
            None => PaidSection::Upsell(UpsellPanel {
                title: "解鎖系統 3：由資深顧問審閱的 7 年策略設計",
                price: price.to_string(),
                list_price: LIST_PRICE,
                action: "upgrade",
            }),
        };

        Self { assessment, paid }
    }
}

fn point(subject: &'static str, value: u8) -> ChartPoint {
    ChartPoint {
        subject,
        value: value.min(CHART_FULL_MARK),
        full_mark: CHART_FULL_MARK,
    }
}
