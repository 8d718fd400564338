use crate::domain::model::{ApiResponse, AuthKey, PetFields, PetFilter, ResponseBody};
use crate::domain::ports::{ConfigProvider, PetApi};
use crate::utils::error::{PetFriendsError, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use std::path::Path;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://petfriends.skillfactory.ru/";

/// PetFriends 服務的輕量客戶端
#[derive(Debug, Clone)]
pub struct PetFriends {
    base_url: Url,
    client: Client,
}

impl PetFriends {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        // Url::join 只有在 base 以 '/' 結尾時才會保留最後一段路徑
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        let base_url = Url::parse(&normalized).map_err(|e| PetFriendsError::InvalidConfigValueError {
            field: "service.base_url".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { base_url, client })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(config.base_url(), Duration::from_secs(config.timeout_seconds()))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(|e| PetFriendsError::ConfigError {
            message: format!("Cannot build endpoint {}: {}", path, e),
        })
    }

    async fn send(&self, request: RequestBuilder) -> Result<ApiResponse> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let raw = response.text().await?;

        tracing::debug!("Response status: {}, body: {} bytes", status, raw.len());

        Ok(ApiResponse::new(status, ResponseBody::parse(raw)))
    }

    async fn photo_part(pet_photo: &Path) -> Result<Part> {
        let data = tokio::fs::read(pet_photo)
            .await
            .map_err(|e| PetFriendsError::PhotoError {
                path: pet_photo.display().to_string(),
                message: e.to_string(),
            })?;

        let file_name = pet_photo
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("pet_photo.jpg")
            .to_string();

        let part = Part::bytes(data).file_name(file_name).mime_str("image/jpeg")?;
        Ok(part)
    }
}

#[async_trait]
impl PetApi for PetFriends {
    async fn get_api_key(&self, email: &str, password: &str) -> Result<ApiResponse> {
        let url = self.endpoint("api/key")?;
        tracing::debug!("GET {}", url);

        let request = self
            .client
            .get(url)
            .header("email", email)
            .header("password", password);
        self.send(request).await
    }

    async fn get_list_of_pets(&self, auth_key: &AuthKey, filter: PetFilter) -> Result<ApiResponse> {
        let url = self.endpoint("api/pets")?;
        tracing::debug!("GET {} (filter={:?})", url, filter.as_query());

        let request = self
            .client
            .get(url)
            .header("auth_key", &auth_key.key)
            .query(&[("filter", filter.as_query())]);
        self.send(request).await
    }

    async fn add_new_pet(
        &self,
        auth_key: &AuthKey,
        fields: &PetFields,
        pet_photo: &Path,
    ) -> Result<ApiResponse> {
        let url = self.endpoint("api/pets")?;
        tracing::debug!("POST {} with photo {}", url, pet_photo.display());

        let form = Form::new()
            .text("name", fields.name.clone())
            .text("animal_type", fields.animal_type.clone())
            .text("age", fields.age.clone())
            .part("pet_photo", Self::photo_part(pet_photo).await?);

        let request = self
            .client
            .post(url)
            .header("auth_key", &auth_key.key)
            .multipart(form);
        self.send(request).await
    }

    async fn update_pet_info(
        &self,
        auth_key: &AuthKey,
        pet_id: &str,
        fields: &PetFields,
    ) -> Result<ApiResponse> {
        let url = self.endpoint(&format!("api/pets/{}", pet_id))?;
        tracing::debug!("PUT {}", url);

        let request = self
            .client
            .put(url)
            .header("auth_key", &auth_key.key)
            .form(&fields.as_form());
        self.send(request).await
    }

    async fn delete_pet(&self, auth_key: &AuthKey, pet_id: &str) -> Result<ApiResponse> {
        let url = self.endpoint(&format!("api/pets/{}", pet_id))?;
        tracing::debug!("DELETE {}", url);

        let request = self.client.delete(url).header("auth_key", &auth_key.key);
        self.send(request).await
    }

    async fn create_new_pet_simple(&self, auth_key: &AuthKey, fields: &PetFields) -> Result<ApiResponse> {
        let url = self.endpoint("api/create_pet_simple")?;
        tracing::debug!("POST {}", url);

        let request = self
            .client
            .post(url)
            .header("auth_key", &auth_key.key)
            .form(&fields.as_form());
        self.send(request).await
    }

    async fn add_pet_photo(&self, auth_key: &AuthKey, pet_id: &str, pet_photo: &Path) -> Result<ApiResponse> {
        let url = self.endpoint(&format!("api/pets/set_photo/{}", pet_id))?;
        tracing::debug!("POST {} with photo {}", url, pet_photo.display());

        let form = Form::new().part("pet_photo", Self::photo_part(pet_photo).await?);

        let request = self
            .client
            .post(url)
            .header("auth_key", &auth_key.key)
            .multipart(form);
        self.send(request).await
    }
}
