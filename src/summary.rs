//! Post-scan views of a report: filtering, scoring and top-issue ranking.
//!
//! None of this changes what the rules detect; it only reshapes an
//! [`AuditReport`] for presentation.

use serde::{Deserialize, Serialize};

use crate::types::{AuditReport, Category, CategoryResult, Severity};

/// Category and severity selection applied after a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    /// Categories to keep; empty keeps all.
    pub categories: Vec<Category>,
    /// Drop issues less severe than this.
    pub min_severity: Option<Severity>,
}

impl ReportFilter {
    pub fn is_noop(&self) -> bool {
        self.categories.is_empty() && self.min_severity.is_none()
    }

    fn selects(&self, category: Category) -> bool {
        self.categories.is_empty() || self.categories.contains(&category)
    }

    /// Unselected categories become empty; dropped issues keep `total`
    /// unchanged so they count as passed.
    pub fn apply(&self, report: &AuditReport) -> AuditReport {
        let mut filtered = AuditReport::default();
        for (category, result) in report.iter() {
            if !self.selects(category) {
                continue;
            }
            let issues = result
                .issues
                .iter()
                .filter(|i| {
                    self.min_severity
                        .map(|floor| i.severity.at_least(floor))
                        .unwrap_or(true)
                })
                .cloned()
                .collect();
            filtered.insert(category, CategoryResult::new(result.total, issues));
        }
        filtered
    }
}

/// Issue counts per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityCounts {
    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }

    /// Issues at `floor` or more severe.
    pub fn at_least(&self, floor: Severity) -> usize {
        match floor {
            Severity::High => self.high,
            Severity::Medium => self.high + self.medium,
            Severity::Low => self.total(),
        }
    }
}

pub fn severity_counts(report: &AuditReport) -> SeverityCounts {
    let mut counts = SeverityCounts::default();
    for (_, result) in report.iter() {
        for issue in &result.issues {
            match issue.severity {
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
            }
        }
    }
    counts
}

/// Share of passed checks across all categories, in `[0, 1]`. A report with
/// nothing to check scores 1.
pub fn accessibility_score(report: &AuditReport) -> f32 {
    let (passed, total) = report
        .iter()
        .fold((0usize, 0usize), |(p, t), (_, r)| (p + r.passed, t + r.total));
    if total == 0 {
        1.0
    } else {
        passed as f32 / total as f32
    }
}

#[derive(Debug, Clone)]
struct RankedIssue {
    severity_rank: u8,
    priority_rank: u8,
    message: String,
}

/// Issues grouped by `(category, issue)`, ranked by severity, then category
/// order, then message. Repeated findings collapse into one line with a count.
pub fn generate_top_issues(report: &AuditReport, max_issues: usize) -> Vec<String> {
    let mut issues: Vec<RankedIssue> = Vec::new();

    for (priority, (category, result)) in report.iter().enumerate() {
        let mut groups: Vec<(&str, Severity, usize)> = Vec::new();
        for issue in &result.issues {
            match groups
                .iter_mut()
                .find(|(text, severity, _)| *text == issue.issue && *severity == issue.severity)
            {
                Some(group) => group.2 += 1,
                None => groups.push((issue.issue.as_str(), issue.severity, 1)),
            }
        }
        issues.extend(groups.into_iter().map(|(text, severity, count)| {
            let message = if count > 1 {
                format!("[{}] {} ({} elements)", category, text, count)
            } else {
                format!("[{}] {}", category, text)
            };
            RankedIssue {
                severity_rank: severity.rank(),
                priority_rank: priority as u8,
                message,
            }
        }));
    }

    issues.sort_by(|a, b| {
        a.severity_rank
            .cmp(&b.severity_rank)
            .then_with(|| a.priority_rank.cmp(&b.priority_rank))
            .then_with(|| a.message.cmp(&b.message))
    });
    issues
        .into_iter()
        .take(max_issues)
        .map(|i| i.message)
        .collect()
}
