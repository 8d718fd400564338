use httpmock::prelude::*;
use pet_friends_check::core::{ApiResponse, AuthKey, PetApi, PetFields, PetFilter, ResponseBody};
use pet_friends_check::core::Pet;
use pet_friends_check::{
    default_suite, Outcome, PetFriends, PetFriendsError, Result, Settings, SuiteReport,
};
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

const VALID_EMAIL: &str = "user@example.com";
const VALID_PASSWORD: &str = "secret";
const VALID_KEY: &str = "valid-key";
const OWNER: &str = "me";

/// 記憶體中的 PetFriends，行為跟線上服務一樣寬鬆（strict = false）
struct FakePetFriends {
    pets: Mutex<Vec<Pet>>,
    next_id: Mutex<u32>,
    strict: bool,
    keeps_deleted: bool,
}

impl FakePetFriends {
    fn new(strict: bool) -> Self {
        Self {
            pets: Mutex::new(vec![Pet {
                id: "other-1".to_string(),
                name: "Шарик".to_string(),
                animal_type: "пёс".to_string(),
                age: "5".to_string(),
                user_id: "someone-else".to_string(),
                ..Pet::default()
            }]),
            next_id: Mutex::new(1),
            strict,
            keeps_deleted: false,
        }
    }

    /// DELETE 回 200 卻沒有真的刪掉
    fn with_broken_delete(mut self) -> Self {
        self.keeps_deleted = true;
        self
    }

    fn with_own_pet(self) -> Self {
        self.pets.lock().unwrap().push(Pet {
            id: "mine-0".to_string(),
            name: "Барсик".to_string(),
            animal_type: "кот".to_string(),
            age: "2".to_string(),
            user_id: OWNER.to_string(),
            ..Pet::default()
        });
        self
    }

    fn own_count(&self) -> usize {
        self.pets
            .lock()
            .unwrap()
            .iter()
            .filter(|pet| pet.user_id == OWNER)
            .count()
    }

    fn forbidden() -> ApiResponse {
        ApiResponse::new(403, ResponseBody::Text("Forbidden".to_string()))
    }

    fn bad_request() -> ApiResponse {
        ApiResponse::new(400, ResponseBody::Text("Bad Request".to_string()))
    }

    fn json(pet: &Pet) -> ApiResponse {
        ApiResponse::new(200, ResponseBody::Json(serde_json::to_value(pet).unwrap()))
    }

    fn rejects(&self, fields: &PetFields) -> bool {
        self.strict
            && (fields.age.parse::<u8>().map(|age| age > 99).unwrap_or(true)
                || fields.name.chars().all(|c| c.is_ascii_digit())
                || fields.animal_type.chars().count() > 30)
    }

    async fn read_photo(photo: &Path) -> Result<String> {
        let data = tokio::fs::read(photo)
            .await
            .map_err(|e| PetFriendsError::PhotoError {
                path: photo.display().to_string(),
                message: e.to_string(),
            })?;
        Ok(format!("data:image/jpeg;base64,{}", data.len()))
    }

    fn insert(&self, fields: &PetFields, pet_photo: String) -> Pet {
        let mut next_id = self.next_id.lock().unwrap();
        let pet = Pet {
            id: format!("mine-{}", *next_id),
            name: fields.name.clone(),
            animal_type: fields.animal_type.clone(),
            age: fields.age.clone(),
            pet_photo,
            created_at: "1700000000.0".to_string(),
            user_id: OWNER.to_string(),
        };
        *next_id += 1;
        // 新寵物排在最前面，跟線上服務一致
        self.pets.lock().unwrap().insert(0, pet.clone());
        pet
    }
}

#[async_trait::async_trait]
impl PetApi for FakePetFriends {
    async fn get_api_key(&self, email: &str, password: &str) -> Result<ApiResponse> {
        if email == VALID_EMAIL && password == VALID_PASSWORD {
            Ok(ApiResponse::new(
                200,
                ResponseBody::Json(serde_json::json!({ "key": VALID_KEY })),
            ))
        } else {
            Ok(Self::forbidden())
        }
    }

    async fn get_list_of_pets(&self, auth_key: &AuthKey, filter: PetFilter) -> Result<ApiResponse> {
        if auth_key.key != VALID_KEY {
            return Ok(Self::forbidden());
        }
        let pets: Vec<Pet> = self
            .pets
            .lock()
            .unwrap()
            .iter()
            .filter(|pet| filter == PetFilter::All || pet.user_id == OWNER)
            .cloned()
            .collect();
        Ok(ApiResponse::new(
            200,
            ResponseBody::Json(serde_json::json!({ "pets": pets })),
        ))
    }

    async fn add_new_pet(&self, auth_key: &AuthKey, fields: &PetFields, pet_photo: &Path) -> Result<ApiResponse> {
        if auth_key.key != VALID_KEY {
            return Ok(Self::forbidden());
        }
        let photo = Self::read_photo(pet_photo).await?;
        if self.rejects(fields) {
            return Ok(Self::bad_request());
        }
        Ok(Self::json(&self.insert(fields, photo)))
    }

    async fn update_pet_info(&self, auth_key: &AuthKey, pet_id: &str, fields: &PetFields) -> Result<ApiResponse> {
        if auth_key.key != VALID_KEY {
            return Ok(Self::forbidden());
        }
        let mut pets = self.pets.lock().unwrap();
        match pets.iter_mut().find(|pet| pet.id == pet_id && pet.user_id == OWNER) {
            Some(pet) => {
                pet.name = fields.name.clone();
                pet.animal_type = fields.animal_type.clone();
                pet.age = fields.age.clone();
                Ok(Self::json(pet))
            }
            None => Ok(Self::bad_request()),
        }
    }

    async fn delete_pet(&self, auth_key: &AuthKey, pet_id: &str) -> Result<ApiResponse> {
        if auth_key.key != VALID_KEY {
            return Ok(Self::forbidden());
        }
        if self.keeps_deleted {
            return Ok(ApiResponse::new(200, ResponseBody::Text(String::new())));
        }
        self.pets
            .lock()
            .unwrap()
            .retain(|pet| !(pet.id == pet_id && pet.user_id == OWNER));
        Ok(ApiResponse::new(200, ResponseBody::Text(String::new())))
    }

    async fn create_new_pet_simple(&self, auth_key: &AuthKey, fields: &PetFields) -> Result<ApiResponse> {
        if auth_key.key != VALID_KEY {
            return Ok(Self::forbidden());
        }
        if self.rejects(fields) {
            return Ok(Self::bad_request());
        }
        Ok(Self::json(&self.insert(fields, String::new())))
    }

    async fn add_pet_photo(&self, auth_key: &AuthKey, pet_id: &str, pet_photo: &Path) -> Result<ApiResponse> {
        if auth_key.key != VALID_KEY {
            return Ok(Self::forbidden());
        }
        let photo = Self::read_photo(pet_photo).await?;
        let mut pets = self.pets.lock().unwrap();
        match pets.iter_mut().find(|pet| pet.id == pet_id && pet.user_id == OWNER) {
            Some(pet) => {
                pet.pet_photo = photo;
                Ok(Self::json(pet))
            }
            None => Ok(Self::bad_request()),
        }
    }
}

fn settings_for(base_url: &str, photos_dir: &Path) -> Settings {
    Settings::from_toml_str(&format!(
        r#"
[service]
base_url = "{}"
timeout_seconds = 5

[credentials]
valid_email = "{}"
valid_password = "{}"
invalid_email = "nobody@example.com"
invalid_password = "wrong"

[photos]
directory = "{}"
"#,
        base_url,
        VALID_EMAIL,
        VALID_PASSWORD,
        photos_dir.to_str().unwrap().replace('\\', "/")
    ))
    .unwrap()
}

fn photos_dir() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for name in ["5-4.jpg", "357.jpg", "Belka.jpg"] {
        std::fs::write(temp_dir.path().join(name), "fake-jpeg-bytes").unwrap();
    }
    temp_dir
}

fn outcome<'a>(report: &'a SuiteReport, name: &str) -> &'a Outcome {
    &report.result(name).unwrap().outcome
}

#[tokio::test]
async fn test_full_suite_against_lenient_service() {
    let photos = photos_dir();
    let settings = settings_for("http://fake.local", photos.path());
    let api = FakePetFriends::new(false);

    let report = default_suite().run(&api, &settings).await;

    assert_eq!(report.results.len(), 15);
    assert!(!report.has_failures(), "{:#?}", report.results);

    for name in [
        "get_api_key_for_valid_user",
        "get_all_pets_with_valid_key",
        "add_new_pet_with_valid_data",
        "successful_update_self_pet_info",
        "successful_delete_self_pet",
        "create_new_pet_simple",
        "add_pet_photo",
        "get_api_key_with_invalid_email",
        "get_api_key_with_invalid_password",
        "create_pet_with_invalid_key",
    ] {
        assert_eq!(outcome(&report, name), &Outcome::Passed, "{}", name);
    }

    for name in [
        "create_new_pet_invalid_age_format",
        "create_new_pet_invalid_name_format",
        "add_new_pet_with_same_data",
        "add_pet_long_type_name",
    ] {
        assert_eq!(outcome(&report, name), &Outcome::PassedWithBugs, "{}", name);
    }

    let long_type = report.result("add_pet_long_type_name").unwrap();
    assert_eq!(
        long_type.notices[0].message,
        "Pet with too long animal type is added - 31 symbols"
    );

    // 三位數年齡只是警告，不算 bug
    let invalid_age = report.result("create_new_pet_simple_with_invalid_age").unwrap();
    assert_eq!(invalid_age.outcome, Outcome::Passed);
    assert_eq!(
        invalid_age.notices[0].message,
        "More than 2-digit number in Age parameter"
    );

    let summary = report.summary();
    assert_eq!(summary.passed, 11);
    assert_eq!(summary.passed_with_bugs, 4);
    assert_eq!(summary.failed, 0);
}

#[tokio::test]
async fn test_strict_service_reports_no_bugs_for_rejected_input() {
    let photos = photos_dir();
    let settings = settings_for("http://fake.local", photos.path());
    let api = FakePetFriends::new(true);

    let report = default_suite().run(&api, &settings).await;

    assert_eq!(outcome(&report, "create_new_pet_invalid_age_format"), &Outcome::Passed);
    assert!(report.result("create_new_pet_invalid_age_format").unwrap().notices.is_empty());
    assert!(report.result("create_new_pet_simple_with_invalid_age").unwrap().notices.is_empty());

    // 數字名稱被拒絕時，期望 200 的情境會失敗
    assert!(outcome(&report, "create_new_pet_invalid_name_format").is_failure());
    assert!(outcome(&report, "add_pet_long_type_name").is_failure());
}

#[tokio::test]
async fn test_update_without_own_pets_fails_with_precondition() {
    let photos = photos_dir();
    let settings = settings_for("http://fake.local", photos.path());
    let api = FakePetFriends::new(false);

    let mut suite = default_suite();
    suite
        .retain_only(&["successful_update_self_pet_info".to_string()])
        .unwrap();
    let report = suite.run(&api, &settings).await;

    assert_eq!(
        outcome(&report, "successful_update_self_pet_info"),
        &Outcome::Failed {
            message: "There is no my pets".to_string()
        }
    );
}

#[tokio::test]
async fn test_delete_adds_a_pet_when_account_is_empty() {
    let photos = photos_dir();
    let settings = settings_for("http://fake.local", photos.path());
    let api = FakePetFriends::new(false);

    let mut suite = default_suite();
    suite
        .retain_only(&["successful_delete_self_pet".to_string()])
        .unwrap();
    let report = suite.run(&api, &settings).await;

    assert_eq!(outcome(&report, "successful_delete_self_pet"), &Outcome::Passed);
    assert_eq!(api.own_count(), 0);
}

#[tokio::test]
async fn test_delete_removes_existing_pet() {
    let photos = photos_dir();
    let settings = settings_for("http://fake.local", photos.path());
    let api = FakePetFriends::new(false).with_own_pet();

    let mut suite = default_suite();
    suite
        .retain_only(&["successful_delete_self_pet".to_string()])
        .unwrap();
    let report = suite.run(&api, &settings).await;

    assert_eq!(outcome(&report, "successful_delete_self_pet"), &Outcome::Passed);
    assert_eq!(api.own_count(), 0);
}

#[tokio::test]
async fn test_delete_fails_when_pet_is_still_listed() {
    let photos = photos_dir();
    let settings = settings_for("http://fake.local", photos.path());
    let api = FakePetFriends::new(false).with_own_pet().with_broken_delete();

    let mut suite = default_suite();
    suite
        .retain_only(&["successful_delete_self_pet".to_string()])
        .unwrap();
    let report = suite.run(&api, &settings).await;

    match outcome(&report, "successful_delete_self_pet") {
        Outcome::Failed { message } => {
            assert!(message.contains("is still listed after deletion"), "{}", message)
        }
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(api.own_count(), 1);
}

#[tokio::test]
async fn test_add_photo_creates_a_pet_when_account_is_empty() {
    let photos = photos_dir();
    let settings = settings_for("http://fake.local", photos.path());
    let api = FakePetFriends::new(false);

    let mut suite = default_suite();
    suite.retain_only(&["add_pet_photo".to_string()]).unwrap();
    let report = suite.run(&api, &settings).await;

    assert_eq!(outcome(&report, "add_pet_photo"), &Outcome::Passed);
    assert_eq!(api.own_count(), 1);
}

#[tokio::test]
async fn test_missing_photo_fixture_fails_scenario() {
    let empty_dir = TempDir::new().unwrap();
    let settings = settings_for("http://fake.local", empty_dir.path());
    let api = FakePetFriends::new(false);

    let mut suite = default_suite();
    suite
        .retain_only(&["add_new_pet_with_valid_data".to_string()])
        .unwrap();
    let report = suite.run(&api, &settings).await;

    match outcome(&report, "add_new_pet_with_valid_data") {
        Outcome::Failed { message } => assert!(message.contains("5-4.jpg")),
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_credential_scenarios_over_http() -> anyhow::Result<()> {
    let photos = photos_dir();
    let server = MockServer::start();

    let valid_key = server.mock(|when, then| {
        when.method(GET)
            .path("/api/key")
            .header("email", VALID_EMAIL)
            .header("password", VALID_PASSWORD);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"key": VALID_KEY}));
    });
    let unknown_email = server.mock(|when, then| {
        when.method(GET)
            .path("/api/key")
            .header("email", "nobody@example.com");
        then.status(403).body("This user wasn't found in database");
    });
    let wrong_password = server.mock(|when, then| {
        when.method(GET)
            .path("/api/key")
            .header("password", "wrong");
        then.status(403).body("This user wasn't found in database");
    });
    let fake_key = server.mock(|when, then| {
        when.method(POST)
            .path("/api/create_pet_simple")
            .header("auth_key", "qwertyuiopasdfghjklzxcvbnm");
        then.status(403).body("Forbidden");
    });

    let settings = settings_for(&server.base_url(), photos.path());
    let client = PetFriends::from_config(&settings)?;

    let mut suite = default_suite();
    suite
        .retain_only(&[
            "get_api_key_for_valid_user".to_string(),
            "get_api_key_with_invalid_email".to_string(),
            "get_api_key_with_invalid_password".to_string(),
            "create_pet_with_invalid_key".to_string(),
        ])?;
    let report = suite.run(&client, &settings).await;

    valid_key.assert();
    unknown_email.assert();
    wrong_password.assert();
    fake_key.assert();

    assert_eq!(report.results.len(), 4);
    assert!(!report.has_failures(), "{:#?}", report.results);
    Ok(())
}
