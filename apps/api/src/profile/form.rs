//! Profile Capture — the editable form state behind the assessment submission.
//!
//! The form starts from `UserProfile::default()`, is edited one field at a time
//! through `FieldUpdate`, and hands off an owned snapshot on submit. Nothing is
//! validated; the only rule is that business profit is collected solely while
//! the business-ownership flag is set.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::models::profile::{EducationLevel, UserProfile, WorkExperience};

/// A single-field edit, as posted by the client: `{"field": "age", "value": 30}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum FieldUpdate {
    Name(String),
    Gender(String),
    Age(u32),
    Location(String),
    Education(EducationLevel),
    University(String),
    Major(String),
    IsQualifiedUni(bool),
    IsStem(bool),
    Industry(String),
    WorkExp(WorkExperience),
    DegreeLevelWorkYears(u32),
    MncWorkYears(u32),
    SpecificSectorWorkYears(u32),
    IntlWorkYears(u32),
    HasFortune500Exp(bool),
    #[serde(rename = "lastYearIncomeHKD")]
    LastYearIncomeHkd(u64),
    OwnsBusiness(bool),
    #[serde(rename = "businessProfitHKD")]
    BusinessProfitHkd(u64),
    OwnsListedCo(bool),
    Budget(String),
    Languages(String),
    IsBilingual(bool),
    EnglishLevel(String),
    IsEnglishFluent(bool),
    HasDependents(bool),
    AdditionalInfo(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Text { placeholder: Option<&'static str> },
    Number { placeholder: Option<&'static str> },
    Select { options: Vec<&'static str> },
    Checkbox,
    Textarea,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
    pub kind: FieldKind,
    pub value: Value,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSection {
    pub title: &'static str,
    pub icon: &'static str,
    pub fields: Vec<FieldDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitButton {
    pub label: &'static str,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
    pub sections: Vec<FormSection>,
    pub submit: SubmitButton,
}

/// In-progress profile. Owned by the session; replaced with a fresh one on reset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    profile: UserProfile,
}

impl ProfileForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole in-progress profile, e.g. when a client submits a full record.
    pub fn replace(&mut self, profile: UserProfile) {
        self.profile = profile;
    }

    #[cfg(test)]
    pub fn current(&self) -> &UserProfile {
        &self.profile
    }

    pub fn apply(&mut self, update: FieldUpdate) {
        let p = &mut self.profile;
        match update {
            FieldUpdate::Name(v) => p.name = v,
            FieldUpdate::Gender(v) => p.gender = v,
            FieldUpdate::Age(v) => p.age = v,
            FieldUpdate::Location(v) => p.location = v,
            FieldUpdate::Education(v) => p.education = v,
            FieldUpdate::University(v) => p.university = v,
            FieldUpdate::Major(v) => p.major = v,
            FieldUpdate::IsQualifiedUni(v) => p.is_qualified_uni = v,
            FieldUpdate::IsStem(v) => p.is_stem = v,
            FieldUpdate::Industry(v) => p.industry = v,
            FieldUpdate::WorkExp(v) => p.work_exp = v,
            FieldUpdate::DegreeLevelWorkYears(v) => p.degree_level_work_years = v,
            FieldUpdate::MncWorkYears(v) => p.mnc_work_years = v,
            FieldUpdate::SpecificSectorWorkYears(v) => p.specific_sector_work_years = v,
            FieldUpdate::IntlWorkYears(v) => p.intl_work_years = v,
            FieldUpdate::HasFortune500Exp(v) => p.has_fortune500_exp = v,
            FieldUpdate::LastYearIncomeHkd(v) => p.last_year_income_hkd = v,
            FieldUpdate::OwnsBusiness(v) => p.owns_business = v,
            FieldUpdate::BusinessProfitHkd(v) => p.business_profit_hkd = v,
            FieldUpdate::OwnsListedCo(v) => p.owns_listed_co = v,
            FieldUpdate::Budget(v) => p.budget = v,
            FieldUpdate::Languages(v) => p.languages = v,
            FieldUpdate::IsBilingual(v) => p.is_bilingual = v,
            FieldUpdate::EnglishLevel(v) => p.english_level = v,
            FieldUpdate::IsEnglishFluent(v) => p.is_english_fluent = v,
            FieldUpdate::HasDependents(v) => p.has_dependents = v,
            FieldUpdate::AdditionalInfo(v) => p.additional_info = v,
        }
    }

    /// Hands off an owned snapshot of the profile.
    ///
    /// Business profit is only collectable while `owns_business` is set; a value
    /// typed before the flag was cleared is dropped here.
    pub fn submit(&self) -> UserProfile {
        let mut profile = self.profile.clone();
        if !profile.owns_business {
            profile.business_profit_hkd = 0;
        }
        profile
    }

    pub fn view(&self, disabled: bool) -> FormView {
        FormView {
            sections: self.sections(),
            submit: SubmitButton {
                label: if disabled {
                    "AI 正在深度分析中..."
                } else {
                    "獲取 AI 診斷報告"
                },
                disabled,
            },
        }
    }

    pub fn sections(&self) -> Vec<FormSection> {
        let p = &self.profile;
        vec![
            FormSection {
                title: "基礎畫像與學歷背景",
                icon: "🎓",
                fields: vec![
                    text("name", "暱稱/稱呼", None, &p.name),
                    select("gender", "性別", vec!["男", "女"], &p.gender),
                    number("age", "目前年齡", None, p.age),
                    text("location", "所在地", Some("城市/國家"), &p.location),
                    select(
                        "education",
                        "最高學歷",
                        EducationLevel::ALL.iter().map(|e| e.label()).collect(),
                        p.education.label(),
                    ),
                    text("university", "畢業院校", Some("完整校名"), &p.university),
                    text("major", "就讀專業", Some("例如：計算機科學"), &p.major),
                    checkbox("isQualifiedUni", "合資格大學學位", p.is_qualified_uni),
                    checkbox("isStem", "STEM 學科背景", p.is_stem),
                ],
            },
            FormSection {
                title: "專業經驗與名企背景",
                icon: "💼",
                fields: vec![
                    text("industry", "所屬行業", Some("例如：金融、科技、醫療"), &p.industry),
                    select(
                        "workExp",
                        "累計工作經驗",
                        WorkExperience::ALL.iter().map(|w| w.label()).collect(),
                        p.work_exp.label(),
                    ),
                    number("degreeLevelWorkYears", "學位程度年資", None, p.degree_level_work_years),
                    number("mncWorkYears", "名企工作年資", None, p.mnc_work_years),
                    number(
                        "specificSectorWorkYears",
                        "特定領域年資",
                        None,
                        p.specific_sector_work_years,
                    ),
                    number("intlWorkYears", "國際工作年資", None, p.intl_work_years),
                    checkbox("hasFortune500Exp", "世界500強工作背景", p.has_fortune500_exp),
                ],
            },
            FormSection {
                title: "財務狀況與業務實體",
                icon: "💰",
                fields: vec![
                    FieldDescriptor {
                        hint: Some("包含股權利潤分成"),
                        ..number(
                            "lastYearIncomeHKD",
                            "去年總收入 (HKD)",
                            Some("目標100萬+ 對標政策"),
                            p.last_year_income_hkd,
                        )
                    },
                    text("budget", "辦理預算 (CNY/HKD)", Some("例如：30-50萬"), &p.budget),
                    checkbox("ownsBusiness", "目前擁有業務實體（企業主）", p.owns_business),
                    FieldDescriptor {
                        visible: p.owns_business,
                        ..number(
                            "businessProfitHKD",
                            "業務實體全年盈利 (HKD)",
                            Some("目標500萬+"),
                            p.business_profit_hkd,
                        )
                    },
                    checkbox("ownsListedCo", "擁有一家上市公司", p.owns_listed_co),
                ],
            },
            FormSection {
                title: "語言與綜合背景",
                icon: "🌐",
                fields: vec![
                    text("languages", "擅長語言", Some("例如：粵語、法語"), &p.languages),
                    text("englishLevel", "英語水平/證書", Some("例如：IELTS 7.5"), &p.english_level),
                    checkbox("isBilingual", "精通兩門或以上語言", p.is_bilingual),
                    checkbox("isEnglishFluent", "良好的英文書寫/口語", p.is_english_fluent),
                    checkbox("hasDependents", "攜帶受養人(配偶/子女)", p.has_dependents),
                    FieldDescriptor {
                        key: "additionalInfo",
                        label: "其他背景補充（獲獎、專利、特殊技能）",
                        hint: None,
                        kind: FieldKind::Textarea,
                        value: json!(p.additional_info),
                        visible: true,
                    },
                ],
            },
        ]
    }
}

fn text(
    key: &'static str,
    label: &'static str,
    placeholder: Option<&'static str>,
    value: &str,
) -> FieldDescriptor {
    FieldDescriptor {
        key,
        label,
        hint: None,
        kind: FieldKind::Text { placeholder },
        value: json!(value),
        visible: true,
    }
}

fn number(
    key: &'static str,
    label: &'static str,
    placeholder: Option<&'static str>,
    value: impl Into<u64>,
) -> FieldDescriptor {
    FieldDescriptor {
        key,
        label,
        hint: None,
        kind: FieldKind::Number { placeholder },
        value: json!(value.into()),
        visible: true,
    }
}

fn select(
    key: &'static str,
    label: &'static str,
    options: Vec<&'static str>,
    value: &str,
) -> FieldDescriptor {
    FieldDescriptor {
        key,
        label,
        hint: None,
        kind: FieldKind::Select { options },
        value: json!(value),
        visible: true,
    }
}

fn checkbox(key: &'static str, label: &'static str, value: bool) -> FieldDescriptor {
    FieldDescriptor {
        key,
        label,
        hint: None,
        kind: FieldKind::Checkbox,
        value: json!(value),
        visible: true,
    }
}
