use crate::core::report::{Notice, NoticeKind, Outcome, ScenarioResult, SuiteReport};
use crate::domain::model::{AuthKey, PetFilter, PetList};
use crate::domain::ports::{ConfigProvider, PetApi};
use crate::utils::error::{PetFriendsError, Result};
use std::path::PathBuf;
use std::time::Instant;

/// 單一情境執行時可用的客戶端與設定
pub struct ScenarioContext<'a> {
    pub api: &'a dyn PetApi,
    pub config: &'a dyn ConfigProvider,
}

impl<'a> ScenarioContext<'a> {
    pub fn new(api: &'a dyn PetApi, config: &'a dyn ConfigProvider) -> Self {
        Self { api, config }
    }

    /// 用有效帳號取得 auth_key
    pub async fn auth_key(&self) -> Result<AuthKey> {
        let response = self
            .api
            .get_api_key(self.config.valid_email(), self.config.valid_password())
            .await?;

        response
            .auth_key()
            .ok_or_else(|| PetFriendsError::UnexpectedResponse {
                status: response.status,
                message: "no `key` in api/key response".to_string(),
            })
    }

    pub async fn pets(&self, auth_key: &AuthKey, filter: PetFilter) -> Result<PetList> {
        let response = self.api.get_list_of_pets(auth_key, filter).await?;

        if !response.is_ok() {
            return Err(PetFriendsError::UnexpectedResponse {
                status: response.status,
                message: format!("listing pets failed: {}", response.body),
            });
        }

        response
            .pet_list()
            .ok_or_else(|| PetFriendsError::UnexpectedResponse {
                status: response.status,
                message: "no `pets` in api/pets response".to_string(),
            })
    }

    pub fn photo(&self, file_name: &str) -> PathBuf {
        self.config.photos_dir().join(file_name)
    }
}

/// 一個可獨立執行的檢查情境
#[async_trait::async_trait]
pub trait Scenario: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// 成功時回傳觀察到的服務端問題
    async fn run(&self, context: &ScenarioContext<'_>) -> Result<Vec<Notice>>;
}

/// 依序執行所有情境，失敗不會中斷後續情境
pub struct TestSuite {
    name: String,
    scenarios: Vec<Box<dyn Scenario>>,
}

impl TestSuite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scenarios: Vec::new(),
        }
    }

    pub fn add_scenario(&mut self, scenario: Box<dyn Scenario>) {
        self.scenarios.push(scenario);
    }

    pub fn scenario_names(&self) -> Vec<&str> {
        self.scenarios.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// 只保留指定名稱的情境；名稱不存在時回傳錯誤
    pub fn retain_only(&mut self, names: &[String]) -> Result<()> {
        if names.is_empty() {
            return Ok(());
        }

        let known = self.scenario_names();
        let unknown: Vec<&str> = names
            .iter()
            .map(String::as_str)
            .filter(|name| !known.contains(name))
            .collect();

        if !unknown.is_empty() {
            return Err(PetFriendsError::InvalidConfigValueError {
                field: "only".to_string(),
                value: unknown.join(", "),
                reason: format!("Unknown scenario. Known scenarios: {}", known.join(", ")),
            });
        }

        self.scenarios
            .retain(|scenario| names.iter().any(|name| name == scenario.name()));
        Ok(())
    }

    pub async fn run(&self, api: &dyn PetApi, config: &dyn ConfigProvider) -> SuiteReport {
        let mut report = SuiteReport::new(self.name.clone(), config.base_url().to_string());
        let context = ScenarioContext::new(api, config);

        tracing::info!("Running {} scenario(s) against {}", self.scenarios.len(), config.base_url());

        for scenario in &self.scenarios {
            tracing::info!("▶ {}", scenario.name());
            if !scenario.description().is_empty() {
                tracing::debug!("  {}", scenario.description());
            }

            let start = Instant::now();
            let result = scenario.run(&context).await;
            let duration = start.elapsed();

            let scenario_result = match result {
                Ok(notices) => {
                    for notice in &notices {
                        tracing::warn!("{} [{}] {}", notice.kind.label(), scenario.name(), notice.message);
                    }
                    let outcome = if notices.iter().any(|n| n.kind == NoticeKind::Bug) {
                        Outcome::PassedWithBugs
                    } else {
                        Outcome::Passed
                    };
                    tracing::info!("✅ {} ({:?})", scenario.name(), duration);
                    ScenarioResult::new(scenario.name(), outcome, duration, notices)
                }
                Err(e) => {
                    tracing::error!("❌ {}: {}", scenario.name(), e);
                    ScenarioResult::new(
                        scenario.name(),
                        Outcome::Failed {
                            message: e.to_string(),
                        },
                        duration,
                        Vec::new(),
                    )
                }
            };

            report.push(scenario_result);
        }

        let summary = report.summary();
        tracing::info!(
            "Suite {} finished: {} passed, {} passed with bugs, {} failed",
            self.name,
            summary.passed,
            summary.passed_with_bugs,
            summary.failed
        );

        report
    }
}
