use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneStatus {
    Pending,
    Active,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub title: String,
    pub timeframe: String,
    pub description: String,
    pub status: MilestoneStatus,
}

/// The paid seven-year plan. Produced once per payment event, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyRoadmap {
    pub summary: String,
    pub milestones: Vec<Milestone>,
    pub risks: Vec<String>,
    pub tips: Vec<String>,
}

impl StrategyRoadmap {
    /// Checks the constraints serde cannot express. Returns the first violation.
    pub fn validate(&self) -> Result<(), String> {
        if self.summary.trim().is_empty() {
            return Err("summary is empty".to_string());
        }
        if self.milestones.is_empty() {
            return Err("milestones is empty".to_string());
        }
        if let Some(i) = self.milestones.iter().position(|m| m.title.trim().is_empty()) {
            return Err(format!("milestones[{i}].title is empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn sample_roadmap() -> StrategyRoadmap {
    StrategyRoadmap {
        summary: "以碩士留學切入，畢業後轉 IANG 簽證。".to_string(),
        milestones: vec![
            Milestone {
                title: "入學申請".to_string(),
                timeframe: "第1年".to_string(),
                description: "遞交三所院校申請".to_string(),
                status: MilestoneStatus::Active,
            },
            Milestone {
                title: "永居申請".to_string(),
                timeframe: "第7年".to_string(),
                description: "滿七年後申請永久居民身份".to_string(),
                status: MilestoneStatus::Pending,
            },
        ],
        risks: vec!["續簽時須證明在港受僱".to_string()],
        tips: vec!["儘早開立 MPF（強積金，類似內地社保養老金）賬戶".to_string()],
    }
}
