use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EducationLevel {
    #[default]
    #[serde(rename = "本科")]
    Bachelor,
    #[serde(rename = "碩士")]
    Master,
    #[serde(rename = "博士")]
    Phd,
    #[serde(rename = "其他")]
    Other,
}

impl EducationLevel {
    pub const ALL: [EducationLevel; 4] = [Self::Bachelor, Self::Master, Self::Phd, Self::Other];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Bachelor => "本科",
            Self::Master => "碩士",
            Self::Phd => "博士",
            Self::Other => "其他",
        }
    }
}

/// Overall experience bracket. The precise year counters live alongside it on the profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkExperience {
    #[serde(rename = "0-2年")]
    ZeroToTwo,
    #[default]
    #[serde(rename = "3-5年")]
    ThreeToFive,
    #[serde(rename = "5-10年")]
    FiveToTen,
    #[serde(rename = "10年以上")]
    TenPlus,
}

impl WorkExperience {
    pub const ALL: [WorkExperience; 4] = [
        Self::ZeroToTwo,
        Self::ThreeToFive,
        Self::FiveToTen,
        Self::TenPlus,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::ZeroToTwo => "0-2年",
            Self::ThreeToFive => "3-5年",
            Self::FiveToTen => "5-10年",
            Self::TenPlus => "10年以上",
        }
    }
}

/// Everything the visitor tells us about themselves.
///
/// Nothing here is validated: any combination of defaults and free text is
/// accepted and forwarded to the completion endpoint as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    // Demographics and education
    pub name: String,
    pub gender: String,
    pub age: u32,
    pub location: String,
    pub education: EducationLevel,
    pub university: String,
    pub major: String,
    pub is_qualified_uni: bool,
    pub is_stem: bool,

    // Career
    pub industry: String,
    pub work_exp: WorkExperience,
    pub degree_level_work_years: u32,
    pub mnc_work_years: u32,
    pub specific_sector_work_years: u32,
    pub intl_work_years: u32,
    pub has_fortune500_exp: bool,

    // Finance
    #[serde(rename = "lastYearIncomeHKD")]
    pub last_year_income_hkd: u64,
    pub owns_business: bool,
    /// Only collected while `owns_business` is set.
    #[serde(rename = "businessProfitHKD")]
    pub business_profit_hkd: u64,
    pub owns_listed_co: bool,
    pub budget: String,

    // Language and dependents
    pub languages: String,
    pub is_bilingual: bool,
    pub english_level: String,
    pub is_english_fluent: bool,
    pub has_dependents: bool,

    pub additional_info: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "匿名精英".to_string(),
            gender: "男".to_string(),
            age: 28,
            location: String::new(),
            education: EducationLevel::default(),
            university: String::new(),
            major: String::new(),
            is_qualified_uni: false,
            is_stem: false,
            industry: String::new(),
            work_exp: WorkExperience::default(),
            degree_level_work_years: 0,
            mnc_work_years: 0,
            specific_sector_work_years: 0,
            intl_work_years: 0,
            has_fortune500_exp: false,
            last_year_income_hkd: 0,
            owns_business: false,
            business_profit_hkd: 0,
            owns_listed_co: false,
            budget: "30-50萬".to_string(),
            languages: String::new(),
            is_bilingual: false,
            english_level: String::new(),
            is_english_fluent: false,
            has_dependents: false,
            additional_info: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_enum_wire_values() {
        assert_eq!(serde_json::to_value(EducationLevel::Master).unwrap(), json!("碩士"));
        assert_eq!(serde_json::to_value(WorkExperience::TenPlus).unwrap(), json!("10年以上"));
        let level: EducationLevel = serde_json::from_value(json!("博士")).unwrap();
        assert_eq!(level, EducationLevel::Phd);
    }

    #[test]
    fn test_labels_match_wire_values() {
        for level in EducationLevel::ALL {
            assert_eq!(serde_json::to_value(level).unwrap(), json!(level.label()));
        }
        for exp in WorkExperience::ALL {
            assert_eq!(serde_json::to_value(exp).unwrap(), json!(exp.label()));
        }
    }

    #[test]
    fn test_defaults() {
        let p = UserProfile::default();
        assert_eq!(p.name, "匿名精英");
        assert_eq!(p.age, 28);
        assert_eq!(p.education, EducationLevel::Bachelor);
        assert_eq!(p.work_exp, WorkExperience::ThreeToFive);
        assert_eq!(p.budget, "30-50萬");
        assert_eq!(p.last_year_income_hkd, 0);
    }

    #[test]
    fn test_partial_payload_fills_defaults() {
        let p: UserProfile = serde_json::from_value(json!({
            "name": "Ada",
            "lastYearIncomeHKD": 2_600_000,
            "isStem": true
        }))
        .unwrap();
        assert_eq!(p.name, "Ada");
        assert_eq!(p.last_year_income_hkd, 2_600_000);
        assert!(p.is_stem);
        assert_eq!(p.age, 28);
        assert_eq!(p.gender, "男");
    }

    #[test]
    fn test_camel_case_wire_names() {
        let v = serde_json::to_value(UserProfile::default()).unwrap();
        for key in [
            "isQualifiedUni",
            "workExp",
            "degreeLevelWorkYears",
            "hasFortune500Exp",
            "lastYearIncomeHKD",
            "businessProfitHKD",
            "ownsListedCo",
            "isEnglishFluent",
            "additionalInfo",
        ] {
            assert!(v.get(key).is_some(), "missing wire key {key}");
        }
    }
}
