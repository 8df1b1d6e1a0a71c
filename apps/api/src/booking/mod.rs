//! Booking Modal — the consulting-application flow.
//!
//! Two views: the four-step application path, and the contact card shown once
//! a roadmap exists. Copying the handle happens client-side; this module only
//! supplies it.

use serde::Serialize;
use thiserror::Error;

pub const CONTACT_HANDLE: &str = "HK_Path_Expert";
pub const CONTACT_NOTE: &str = "陪跑策略預約 + 您的暱稱";
/// Anchor the client scrolls to when the visitor still needs an assessment.
pub const ASSESSMENT_ANCHOR: &str = "assessment-anchor";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingView {
    #[default]
    Steps,
    QrCode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Completed,
    Current,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingStep {
    pub id: &'static str,
    pub title: &'static str,
    pub desc: &'static str,
    pub status: StepStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactCard {
    pub handle: &'static str,
    pub note: &'static str,
}

/// What the client should do after `proceed`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ProceedOutcome {
    ShowContact(ContactCard),
    ScrollTo { anchor: &'static str },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingModalView {
    pub open: bool,
    pub view: BookingView,
    pub steps: Vec<BookingStep>,
    pub primary_action: &'static str,
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum BookingError {
    #[error("booking modal is not open")]
    NotOpen,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingModal {
    open: bool,
    view: BookingView,
}

impl BookingModal {
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Closing always resets to the steps view.
    pub fn close(&mut self) {
        self.open = false;
        self.view = BookingView::Steps;
    }

    fn require_open(&self) -> Result<(), BookingError> {
        if self.open {
            Ok(())
        } else {
            Err(BookingError::NotOpen)
        }
    }

    pub fn proceed(&mut self, has_roadmap: bool) -> Result<ProceedOutcome, BookingError> {
        self.require_open()?;
        if has_roadmap {
            self.view = BookingView::QrCode;
            Ok(ProceedOutcome::ShowContact(contact()))
        } else {
            self.close();
            Ok(ProceedOutcome::ScrollTo {
                anchor: ASSESSMENT_ANCHOR,
            })
        }
    }

    pub fn back(&mut self) -> Result<(), BookingError> {
        self.require_open()?;
        self.view = BookingView::Steps;
        Ok(())
    }

    pub fn view(&self, has_roadmap: bool) -> BookingModalView {
        BookingModalView {
            open: self.open,
            view: self.view,
            steps: steps(has_roadmap),
            primary_action: if has_roadmap {
                "立即預約面談"
            } else {
                "先去完成 AI 評估"
            },
        }
    }
}

pub fn contact() -> ContactCard {
    ContactCard {
        handle: CONTACT_HANDLE,
        note: CONTACT_NOTE,
    }
}

pub fn steps(has_roadmap: bool) -> Vec<BookingStep> {
    use StepStatus::*;
    vec![
        BookingStep {
            id: "01",
            title: "基礎評估",
            desc: "通過系統 2 (AI 診斷) 確保背景符合政策底線要求。",
            status: Completed,
        },
        BookingStep {
            id: "02",
            title: "策略定調",
            desc: "完成系統 3 (7 年策略設計)，雙方就發展路線達成戰略共識。",
            status: if has_roadmap { Completed } else { Current },
        },
        BookingStep {
            id: "03",
            title: "專家面談",
            desc: "預約顧問進行 30 分鐘一對一通話，審核材料真實性並確認服務期望。",
            status: if has_roadmap { Current } else { Pending },
        },
        BookingStep {
            id: "04",
            title: "正式入駐",
            desc: "確認合作意向，簽署合約並進入年度 50 位精英陪跑名單。",
            status: Pending,
        },
    ]
}
