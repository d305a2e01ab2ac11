//! Audit result types.
//!
//! An [`AuditReport`] holds one [`CategoryResult`] per rule [`Category`]. Each
//! flagged element becomes an [`Issue`]: a common header (label, description,
//! severity, handle, snippet) plus a category-specific [`IssueDetail`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::A11yError;
use crate::session::ElementHandle;

/// Rule categories, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Images,
    Svg,
    Links,
    Headings,
    Forms,
    Contrast,
    Language,
    Landmarks,
    Buttons,
    /// Color-vision simulation is a visual filter, not a rule; always empty.
    Colorblind,
}

impl Category {
    /// The nine rule categories that produce findings.
    pub const fn rules() -> [Category; 9] {
        [
            Category::Images,
            Category::Svg,
            Category::Links,
            Category::Headings,
            Category::Forms,
            Category::Contrast,
            Category::Language,
            Category::Landmarks,
            Category::Buttons,
        ]
    }

    pub const fn all() -> [Category; 10] {
        [
            Category::Images,
            Category::Svg,
            Category::Links,
            Category::Headings,
            Category::Forms,
            Category::Contrast,
            Category::Language,
            Category::Landmarks,
            Category::Buttons,
            Category::Colorblind,
        ]
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Images => "images",
            Category::Svg => "svg",
            Category::Links => "links",
            Category::Headings => "headings",
            Category::Forms => "forms",
            Category::Contrast => "contrast",
            Category::Language => "language",
            Category::Landmarks => "landmarks",
            Category::Buttons => "buttons",
            Category::Colorblind => "colorblind",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = A11yError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::all()
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| A11yError::Config(format!("Unknown category: {}", s)))
    }
}

/// How urgently an issue should be addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    /// 0 is most severe.
    pub const fn rank(&self) -> u8 {
        match self {
            Severity::High => 0,
            Severity::Medium => 1,
            Severity::Low => 2,
        }
    }

    /// True when `self` is as severe as `floor` or more.
    pub fn at_least(&self, floor: Severity) -> bool {
        self.rank() <= floor.rank()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        })
    }
}

impl FromStr for Severity {
    type Err = A11yError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            _ => Err(A11yError::Config(format!("Unknown severity: {}", s))),
        }
    }
}

/// One flagged problem instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Human label, e.g. "Image 3"
    pub element: String,
    /// Short description
    pub issue: String,
    /// Why it matters
    pub explanation: String,
    pub severity: Severity,
    /// Per-scan handle of the flagged element; absent for page-level findings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<ElementHandle>,
    /// Cleaned markup of the flagged element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(flatten)]
    pub detail: IssueDetail,
}

impl Issue {
    /// A page-level issue; rules attach a handle and snippet for element
    /// findings.
    pub fn new(
        element: impl Into<String>,
        issue: impl Into<String>,
        explanation: impl Into<String>,
        severity: Severity,
        detail: IssueDetail,
    ) -> Self {
        Self {
            element: element.into(),
            issue: issue.into(),
            explanation: explanation.into(),
            severity,
            handle: None,
            snippet: None,
            detail,
        }
    }
}

/// Category-specific identifying data for an issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum IssueDetail {
    Image {
        src: String,
    },
    Svg {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        role: Option<String>,
    },
    Link {
        href: String,
        text: String,
    },
    Heading {
        level: u8,
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        previous_level: Option<u8>,
    },
    HeadingStructure {
        h1_count: usize,
    },
    FormField {
        #[serde(rename = "type")]
        field_type: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    Contrast {
        text: String,
        ratio: f64,
        required: f64,
        fg_color: String,
        bg_color: String,
        font_size: String,
    },
    Language,
    Landmark {
        landmark: String,
    },
    Button {
        #[serde(rename = "type")]
        button_type: String,
    },
}

/// Aggregate outcome for one rule category.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResult {
    pub total: usize,
    pub issues: Vec<Issue>,
    pub passed: usize,
}

impl CategoryResult {
    /// Builds a result, deriving `passed` from `total` and the issue count.
    pub fn new(total: usize, issues: Vec<Issue>) -> Self {
        let total = total.max(issues.len());
        let passed = total - issues.len();
        Self {
            total,
            issues,
            passed,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Results for every category. All keys are always present.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub images: CategoryResult,
    pub svg: CategoryResult,
    pub links: CategoryResult,
    pub headings: CategoryResult,
    pub forms: CategoryResult,
    pub contrast: CategoryResult,
    pub language: CategoryResult,
    pub landmarks: CategoryResult,
    pub buttons: CategoryResult,
    pub colorblind: CategoryResult,
}

impl AuditReport {
    pub fn get(&self, category: Category) -> &CategoryResult {
        match category {
            Category::Images => &self.images,
            Category::Svg => &self.svg,
            Category::Links => &self.links,
            Category::Headings => &self.headings,
            Category::Forms => &self.forms,
            Category::Contrast => &self.contrast,
            Category::Language => &self.language,
            Category::Landmarks => &self.landmarks,
            Category::Buttons => &self.buttons,
            Category::Colorblind => &self.colorblind,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut CategoryResult {
        match category {
            Category::Images => &mut self.images,
            Category::Svg => &mut self.svg,
            Category::Links => &mut self.links,
            Category::Headings => &mut self.headings,
            Category::Forms => &mut self.forms,
            Category::Contrast => &mut self.contrast,
            Category::Language => &mut self.language,
            Category::Landmarks => &mut self.landmarks,
            Category::Buttons => &mut self.buttons,
            Category::Colorblind => &mut self.colorblind,
        }
    }

    pub fn insert(&mut self, category: Category, result: CategoryResult) {
        *self.get_mut(category) = result;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &CategoryResult)> + '_ {
        Category::all().into_iter().map(move |c| (c, self.get(c)))
    }

    pub fn issue_count(&self) -> usize {
        self.iter().map(|(_, r)| r.issues.len()).sum()
    }
}
