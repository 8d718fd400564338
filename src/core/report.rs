use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// 服務端已知的缺陷，例如接受錯誤型別
    Bug,
    Warning,
}

impl NoticeKind {
    pub fn label(&self) -> &'static str {
        match self {
            NoticeKind::Bug => "BUG:",
            NoticeKind::Warning => "Warning:",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn bug(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Bug,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Passed,
    PassedWithBugs,
    Failed { message: String },
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub outcome: Outcome,
    pub duration_ms: u64,
    pub notices: Vec<Notice>,
}

impl ScenarioResult {
    pub fn new(name: &str, outcome: Outcome, duration: Duration, notices: Vec<Notice>) -> Self {
        Self {
            name: name.to_string(),
            outcome,
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            notices,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteSummary {
    pub total: usize,
    pub passed: usize,
    pub passed_with_bugs: usize,
    pub failed: usize,
    pub notices: usize,
    pub total_duration_ms: u64,
}

/// 一次執行的完整結果，可輸出成 JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub suite_name: String,
    pub base_url: String,
    pub started_at: DateTime<Utc>,
    pub results: Vec<ScenarioResult>,
}

impl SuiteReport {
    pub fn new(suite_name: String, base_url: String) -> Self {
        Self {
            suite_name,
            base_url,
            started_at: Utc::now(),
            results: Vec::new(),
        }
    }

    pub fn push(&mut self, result: ScenarioResult) {
        self.results.push(result);
    }

    pub fn has_failures(&self) -> bool {
        self.results.iter().any(|r| r.outcome.is_failure())
    }

    pub fn result(&self, name: &str) -> Option<&ScenarioResult> {
        self.results.iter().find(|r| r.name == name)
    }

    pub fn summary(&self) -> SuiteSummary {
        let mut summary = SuiteSummary {
            total: self.results.len(),
            ..SuiteSummary::default()
        };

        for result in &self.results {
            match result.outcome {
                Outcome::Passed => summary.passed += 1,
                Outcome::PassedWithBugs => summary.passed_with_bugs += 1,
                Outcome::Failed { .. } => summary.failed += 1,
            }
            summary.notices += result.notices.len();
            summary.total_duration_ms = summary.total_duration_ms.saturating_add(result.duration_ms);
        }

        summary
    }

    pub fn to_json(&self) -> Result<String> {
        let mut value = serde_json::to_value(self)?;
        if let serde_json::Value::Object(map) = &mut value {
            map.insert("summary".to_string(), serde_json::to_value(self.summary())?);
        }
        Ok(serde_json::to_string_pretty(&value)?)
    }

    pub async fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        tokio::fs::write(path, self.to_json()?).await?;
        tracing::debug!("Report written to {}", path.display());
        Ok(())
    }
}
