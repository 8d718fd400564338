pub mod report;
pub mod scenarios;
pub mod suite;

pub use crate::domain::model::{ApiResponse, AuthKey, Pet, PetFields, PetFilter, PetList, ResponseBody};
pub use crate::domain::ports::{ConfigProvider, PetApi};
pub use crate::utils::error::Result;
