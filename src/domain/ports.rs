use crate::domain::model::{ApiResponse, AuthKey, PetFields, PetFilter};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// PetFriends REST API 的呼叫介面
#[async_trait]
pub trait PetApi: Send + Sync {
    async fn get_api_key(&self, email: &str, password: &str) -> Result<ApiResponse>;

    async fn get_list_of_pets(&self, auth_key: &AuthKey, filter: PetFilter) -> Result<ApiResponse>;

    async fn add_new_pet(
        &self,
        auth_key: &AuthKey,
        fields: &PetFields,
        pet_photo: &Path,
    ) -> Result<ApiResponse>;

    async fn update_pet_info(
        &self,
        auth_key: &AuthKey,
        pet_id: &str,
        fields: &PetFields,
    ) -> Result<ApiResponse>;

    async fn delete_pet(&self, auth_key: &AuthKey, pet_id: &str) -> Result<ApiResponse>;

    async fn create_new_pet_simple(&self, auth_key: &AuthKey, fields: &PetFields) -> Result<ApiResponse>;

    async fn add_pet_photo(&self, auth_key: &AuthKey, pet_id: &str, pet_photo: &Path) -> Result<ApiResponse>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn valid_email(&self) -> &str;
    fn valid_password(&self) -> &str;
    fn invalid_email(&self) -> &str;
    fn invalid_password(&self) -> &str;
    fn photos_dir(&self) -> &Path;
}
