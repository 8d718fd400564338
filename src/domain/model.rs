use serde::{Deserialize, Serialize};
use std::fmt;

/// 服務端的寵物紀錄，所有欄位都以字串回傳
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pet {
    pub id: String,
    pub name: String,
    pub animal_type: String,
    pub age: String,
    pub pet_photo: String,
    pub created_at: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PetList {
    #[serde(default)]
    pub pets: Vec<Pet>,
}

impl PetList {
    pub fn first_id(&self) -> Option<&str> {
        self.pets.first().map(|pet| pet.id.as_str())
    }

    pub fn contains_id(&self, pet_id: &str) -> bool {
        self.pets.iter().any(|pet| pet.id == pet_id)
    }
}

/// `auth_key` header 的值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthKey {
    pub key: String,
}

impl AuthKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PetFilter {
    #[default]
    All,
    MyPets,
}

impl PetFilter {
    pub fn as_query(&self) -> &'static str {
        match self {
            PetFilter::All => "",
            PetFilter::MyPets => "my_pets",
        }
    }
}

/// 建立或更新寵物時送出的三個表單欄位
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetFields {
    pub name: String,
    pub animal_type: String,
    pub age: String,
}

impl PetFields {
    pub fn new(name: impl Into<String>, animal_type: impl Into<String>, age: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            animal_type: animal_type.into(),
            age: age.into(),
        }
    }

    pub fn as_form(&self) -> [(&'static str, &str); 3] {
        [
            ("name", self.name.as_str()),
            ("animal_type", self.animal_type.as_str()),
            ("age", self.age.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(serde_json::Value),
    Text(String),
}

impl ResponseBody {
    /// 能解析成 JSON 就用 JSON，否則保留原始文字
    pub fn parse(raw: String) -> Self {
        match serde_json::from_str(&raw) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(raw),
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }

    /// JSON 物件有此 key，或文字內容包含此字串
    pub fn contains_key(&self, key: &str) -> bool {
        match self {
            ResponseBody::Json(serde_json::Value::Object(map)) => map.contains_key(key),
            ResponseBody::Json(_) => false,
            ResponseBody::Text(text) => text.contains(key),
        }
    }

    pub fn field_str(&self, key: &str) -> Option<&str> {
        self.as_json()?.get(key)?.as_str()
    }
}

impl fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseBody::Json(value) => write!(f, "{}", value),
            ResponseBody::Text(text) => write!(f, "{}", text),
        }
    }
}

/// 每個呼叫都回傳 (status, body)
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl ApiResponse {
    pub fn new(status: u16, body: ResponseBody) -> Self {
        Self { status, body }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    pub fn auth_key(&self) -> Option<AuthKey> {
        self.body.field_str("key").map(AuthKey::new)
    }

    pub fn pet(&self) -> Option<Pet> {
        let value = self.body.as_json()?;
        serde_json::from_value(value.clone()).ok()
    }

    pub fn pet_list(&self) -> Option<PetList> {
        let value = self.body.as_json()?;
        value.get("pets")?;
        serde_json::from_value(value.clone()).ok()
    }
}
