use serde::{Deserialize, Serialize};

/// Qualitative verdict vocabulary. The model is asked to write simplified
/// Chinese, so the simplified spellings are accepted as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssessmentScore {
    #[serde(rename = "極具優勢", alias = "极具优势")]
    Outstanding,
    #[serde(rename = "背景良好")]
    Good,
    #[serde(rename = "具備潛力", alias = "具备潜力")]
    Promising,
    #[serde(rename = "需大幅優化", alias = "需大幅优化")]
    NeedsWork,
    #[serde(rename = "有風險", alias = "有风险")]
    Risky,
    #[serde(rename = "風險極高", alias = "风险极高")]
    HighRisk,
}

impl AssessmentScore {
    pub const ALL: [AssessmentScore; 6] = [
        Self::Outstanding,
        Self::Good,
        Self::Promising,
        Self::NeedsWork,
        Self::Risky,
        Self::HighRisk,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Outstanding => "極具優勢",
            Self::Good => "背景良好",
            Self::Promising => "具備潛力",
            Self::NeedsWork => "需大幅優化",
            Self::Risky => "有風險",
            Self::HighRisk => "風險極高",
        }
    }
}

/// Per-route match, each 0–100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suitability {
    /// Postgraduate study route.
    pub study: u8,
    /// Top Talent Pass Scheme.
    pub ttps: u8,
    /// Quality Migrant Admission Scheme.
    pub qmas: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub score: AssessmentScore,
    pub suitability: Suitability,
    pub analysis: String,
    pub recommended_path: String,
    pub next_steps: Vec<String>,
}

impl AssessmentResult {
    /// Checks the constraints serde cannot express. Returns the first violation.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("study", self.suitability.study),
            ("ttps", self.suitability.ttps),
            ("qmas", self.suitability.qmas),
        ] {
            if value > 100 {
                return Err(format!("suitability.{name} is {value}, expected 0-100"));
            }
        }
        if self.analysis.trim().is_empty() {
            return Err("analysis is empty".to_string());
        }
        if self.recommended_path.trim().is_empty() {
            return Err("recommendedPath is empty".to_string());
        }
        if self.next_steps.iter().any(|s| s.trim().is_empty()) {
            return Err("nextSteps contains an empty entry".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn sample_assessment() -> AssessmentResult {
    AssessmentResult {
        score: AssessmentScore::Good,
        suitability: Suitability {
            study: 80,
            ttps: 60,
            qmas: 45,
        },
        analysis: "學歷背景扎實，收入證明是主要短板。".to_string(),
        recommended_path: "香港碩士留學".to_string(),
        next_steps: vec!["準備雅思".to_string(), "整理稅單".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_well_formed_response_parses_field_for_field() {
        let raw = json!({
            "score": "背景良好",
            "suitability": {"study": 80, "ttps": 60, "qmas": 45},
            "analysis": "...",
            "recommendedPath": "...",
            "nextSteps": ["a", "b"]
        });
        let parsed: AssessmentResult = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(
            parsed,
            AssessmentResult {
                score: AssessmentScore::Good,
                suitability: Suitability {
                    study: 80,
                    ttps: 60,
                    qmas: 45
                },
                analysis: "...".to_string(),
                recommended_path: "...".to_string(),
                next_steps: vec!["a".to_string(), "b".to_string()],
            }
        );
        assert_eq!(serde_json::to_value(&parsed).unwrap(), raw);
    }

    #[test]
    fn test_simplified_labels_accepted() {
        let score: AssessmentScore = serde_json::from_value(json!("风险极高")).unwrap();
        assert_eq!(score, AssessmentScore::HighRisk);
        let score: AssessmentScore = serde_json::from_value(json!("具备潜力")).unwrap();
        assert_eq!(score, AssessmentScore::Promising);
    }

    #[test]
    fn test_unknown_label_rejected() {
        assert!(serde_json::from_value::<AssessmentScore>(json!("還不錯")).is_err());
    }

    #[test]
    fn test_labels_match_wire_values() {
        for score in AssessmentScore::ALL {
            assert_eq!(serde_json::to_value(score).unwrap(), json!(score.label()));
        }
    }

    #[test]
    fn test_validate_accepts_sample() {
        assert!(sample_assessment().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_suitability() {
        let mut a = sample_assessment();
        a.suitability.qmas = 101;
        let err = a.validate().unwrap_err();
        assert!(err.contains("qmas"));
    }

    #[test]
    fn test_validate_rejects_blank_analysis() {
        let mut a = sample_assessment();
        a.analysis = "   ".to_string();
        assert!(a.validate().is_err());
    }

    #[test]
    fn test_suitability_above_u8_is_parse_error() {
        let raw = json!({
            "score": "背景良好",
            "suitability": {"study": 300, "ttps": 60, "qmas": 45},
            "analysis": "x",
            "recommendedPath": "y",
            "nextSteps": []
        });
        assert!(serde_json::from_value::<AssessmentResult>(raw).is_err());
    }
}
