pub mod client;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::Settings;

pub use crate::client::PetFriends;
pub use crate::core::report::{Notice, NoticeKind, Outcome, SuiteReport};
pub use crate::core::scenarios::{default_suite, Case};
pub use crate::core::suite::{Scenario, ScenarioContext, TestSuite};
pub use crate::utils::error::{PetFriendsError, Result};
