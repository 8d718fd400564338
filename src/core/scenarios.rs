//! PetFriends 功能檢查情境。
//!
//! 每個情境都是「取得 auth_key → 呼叫 API → 檢查 status 與回傳內容」。
//! 服務端已知的缺陷不算失敗，而是以 [`Notice`] 回報。

use crate::core::report::Notice;
use crate::core::suite::{Scenario, ScenarioContext, TestSuite};
use crate::domain::model::{ApiResponse, AuthKey, PetFields, PetFilter};
use crate::utils::error::{PetFriendsError, Result};

pub const PHOTO_RED_CAT: &str = "5-4.jpg";
pub const PHOTO_FOX: &str = "357.jpg";
pub const PHOTO_SQUIRREL: &str = "Belka.jpg";

pub const FAKE_AUTH_KEY: &str = "qwertyuiopasdfghjklzxcvbnm";
pub const LONG_ANIMAL_TYPE: &str = "qwertyuiopasdfghjkllasdfghjklgt";
pub const MAX_ANIMAL_TYPE_LEN: usize = 30;
pub const MAX_AGE_DIGITS: usize = 2;
pub const THREE_DIGIT_AGE: &str = "123";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    GetApiKeyForValidUser,
    GetAllPetsWithValidKey,
    AddNewPetWithValidData,
    SuccessfulUpdateSelfPetInfo,
    SuccessfulDeleteSelfPet,
    CreateNewPetSimple,
    AddPetPhoto,
    GetApiKeyWithInvalidEmail,
    GetApiKeyWithInvalidPassword,
    CreateNewPetInvalidAgeFormat,
    CreateNewPetInvalidNameFormat,
    AddNewPetWithSameData,
    AddPetLongTypeName,
    CreatePetWithInvalidKey,
    CreateNewPetSimpleWithInvalidAge,
}

impl Case {
    pub const ALL: [Case; 15] = [
        Case::GetApiKeyForValidUser,
        Case::GetAllPetsWithValidKey,
        Case::AddNewPetWithValidData,
        Case::SuccessfulUpdateSelfPetInfo,
        Case::SuccessfulDeleteSelfPet,
        Case::CreateNewPetSimple,
        Case::AddPetPhoto,
        Case::GetApiKeyWithInvalidEmail,
        Case::GetApiKeyWithInvalidPassword,
        Case::CreateNewPetInvalidAgeFormat,
        Case::CreateNewPetInvalidNameFormat,
        Case::AddNewPetWithSameData,
        Case::AddPetLongTypeName,
        Case::CreatePetWithInvalidKey,
        Case::CreateNewPetSimpleWithInvalidAge,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Case::GetApiKeyForValidUser => "get_api_key_for_valid_user",
            Case::GetAllPetsWithValidKey => "get_all_pets_with_valid_key",
            Case::AddNewPetWithValidData => "add_new_pet_with_valid_data",
            Case::SuccessfulUpdateSelfPetInfo => "successful_update_self_pet_info",
            Case::SuccessfulDeleteSelfPet => "successful_delete_self_pet",
            Case::CreateNewPetSimple => "create_new_pet_simple",
            Case::AddPetPhoto => "add_pet_photo",
            Case::GetApiKeyWithInvalidEmail => "get_api_key_with_invalid_email",
            Case::GetApiKeyWithInvalidPassword => "get_api_key_with_invalid_password",
            Case::CreateNewPetInvalidAgeFormat => "create_new_pet_invalid_age_format",
            Case::CreateNewPetInvalidNameFormat => "create_new_pet_invalid_name_format",
            Case::AddNewPetWithSameData => "add_new_pet_with_same_data",
            Case::AddPetLongTypeName => "add_pet_long_type_name",
            Case::CreatePetWithInvalidKey => "create_pet_with_invalid_key",
            Case::CreateNewPetSimpleWithInvalidAge => "create_new_pet_simple_with_invalid_age",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Case::GetApiKeyForValidUser => "api key request returns 200 and a key",
            Case::GetAllPetsWithValidKey => "pet list with a valid key is not empty",
            Case::AddNewPetWithValidData => "a pet with valid data and a photo can be added",
            Case::SuccessfulUpdateSelfPetInfo => "own pet info can be updated",
            Case::SuccessfulDeleteSelfPet => "own pet can be deleted",
            Case::CreateNewPetSimple => "a pet can be created without a photo",
            Case::AddPetPhoto => "a photo can be attached to an existing pet",
            Case::GetApiKeyWithInvalidEmail => "unknown e-mail is rejected with 403",
            Case::GetApiKeyWithInvalidPassword => "wrong password is rejected with 403",
            Case::CreateNewPetInvalidAgeFormat => "non-numeric age should be rejected",
            Case::CreateNewPetInvalidNameFormat => "numeric name should be rejected",
            Case::AddNewPetWithSameData => "identical pets should not be duplicated",
            Case::AddPetLongTypeName => "animal type longer than 30 letters should be rejected",
            Case::CreatePetWithInvalidKey => "a fake auth key is rejected with 403",
            Case::CreateNewPetSimpleWithInvalidAge => "age with more than 2 digits should be rejected",
        }
    }

    pub fn from_name(name: &str) -> Option<Case> {
        Case::ALL.into_iter().find(|case| case.name() == name)
    }
}

#[async_trait::async_trait]
impl Scenario for Case {
    fn name(&self) -> &str {
        Case::name(self)
    }

    fn description(&self) -> &str {
        Case::description(self)
    }

    async fn run(&self, ctx: &ScenarioContext<'_>) -> Result<Vec<Notice>> {
        let scenario = Case::name(self);
        match self {
            Case::GetApiKeyForValidUser => get_api_key_for_valid_user(ctx, scenario).await,
            Case::GetAllPetsWithValidKey => get_all_pets_with_valid_key(ctx, scenario).await,
            Case::AddNewPetWithValidData => add_new_pet_with_valid_data(ctx, scenario).await,
            Case::SuccessfulUpdateSelfPetInfo => successful_update_self_pet_info(ctx, scenario).await,
            Case::SuccessfulDeleteSelfPet => successful_delete_self_pet(ctx, scenario).await,
            Case::CreateNewPetSimple => create_new_pet_simple(ctx, scenario).await,
            Case::AddPetPhoto => add_pet_photo(ctx, scenario).await,
            Case::GetApiKeyWithInvalidEmail => {
                let email = ctx.config.invalid_email();
                let password = ctx.config.valid_password();
                get_api_key_rejected(ctx, scenario, email, password).await
            }
            Case::GetApiKeyWithInvalidPassword => {
                let email = ctx.config.valid_email();
                let password = ctx.config.invalid_password();
                get_api_key_rejected(ctx, scenario, email, password).await
            }
            Case::CreateNewPetInvalidAgeFormat => create_new_pet_invalid_age_format(ctx, scenario).await,
            Case::CreateNewPetInvalidNameFormat => create_new_pet_invalid_name_format(ctx, scenario).await,
            Case::AddNewPetWithSameData => add_new_pet_with_same_data(ctx, scenario).await,
            Case::AddPetLongTypeName => add_pet_long_type_name(ctx, scenario).await,
            Case::CreatePetWithInvalidKey => create_pet_with_invalid_key(ctx, scenario).await,
            Case::CreateNewPetSimpleWithInvalidAge => {
                create_new_pet_simple_with_invalid_age(ctx, scenario).await
            }
        }
    }
}

/// 預設的完整套件
pub fn default_suite() -> TestSuite {
    let mut suite = TestSuite::new("pet-friends");
    for case in Case::ALL {
        suite.add_scenario(Box::new(case));
    }
    suite
}

fn expect_status(scenario: &str, response: &ApiResponse, expected: u16) -> Result<()> {
    if response.status != expected {
        return Err(PetFriendsError::assertion(
            scenario,
            format!(
                "expected status {}, got {} ({})",
                expected, response.status, response.body
            ),
        ));
    }
    Ok(())
}

fn expect_name(scenario: &str, response: &ApiResponse, expected: &str) -> Result<()> {
    match response.body.field_str("name") {
        Some(name) if name == expected => Ok(()),
        Some(name) => Err(PetFriendsError::assertion(
            scenario,
            format!("expected name {:?}, got {:?}", expected, name),
        )),
        None => Err(PetFriendsError::assertion(
            scenario,
            format!("response has no `name` field: {}", response.body),
        )),
    }
}

fn expect_no_key(scenario: &str, response: &ApiResponse) -> Result<()> {
    if response.body.contains_key("key") {
        return Err(PetFriendsError::assertion(
            scenario,
            "rejected api key response still contains `key`",
        ));
    }
    Ok(())
}

async fn get_api_key_for_valid_user(ctx: &ScenarioContext<'_>, scenario: &str) -> Result<Vec<Notice>> {
    let response = ctx
        .api
        .get_api_key(ctx.config.valid_email(), ctx.config.valid_password())
        .await?;

    expect_status(scenario, &response, 200)?;
    if !response.body.contains_key("key") {
        return Err(PetFriendsError::assertion(scenario, "response has no `key`"));
    }
    Ok(Vec::new())
}

async fn get_all_pets_with_valid_key(ctx: &ScenarioContext<'_>, scenario: &str) -> Result<Vec<Notice>> {
    let auth_key = ctx.auth_key().await?;
    let response = ctx.api.get_list_of_pets(&auth_key, PetFilter::All).await?;

    expect_status(scenario, &response, 200)?;
    let pets = response.pet_list().unwrap_or_default();
    if pets.pets.is_empty() {
        return Err(PetFriendsError::assertion(scenario, "pet list is empty"));
    }
    Ok(Vec::new())
}

async fn add_new_pet_with_valid_data(ctx: &ScenarioContext<'_>, scenario: &str) -> Result<Vec<Notice>> {
    let fields = PetFields::new("Рыжий", "кот", "4");
    let auth_key = ctx.auth_key().await?;

    let response = ctx
        .api
        .add_new_pet(&auth_key, &fields, &ctx.photo(PHOTO_RED_CAT))
        .await?;

    expect_status(scenario, &response, 200)?;
    expect_name(scenario, &response, &fields.name)?;
    Ok(Vec::new())
}

async fn successful_update_self_pet_info(ctx: &ScenarioContext<'_>, scenario: &str) -> Result<Vec<Notice>> {
    let fields = PetFields::new("Венера", "кот", "3");
    let auth_key = ctx.auth_key().await?;
    let my_pets = ctx.pets(&auth_key, PetFilter::MyPets).await?;

    let pet_id = my_pets
        .first_id()
        .ok_or_else(|| PetFriendsError::precondition("There is no my pets"))?;

    let response = ctx.api.update_pet_info(&auth_key, pet_id, &fields).await?;

    expect_status(scenario, &response, 200)?;
    expect_name(scenario, &response, &fields.name)?;
    Ok(Vec::new())
}

async fn successful_delete_self_pet(ctx: &ScenarioContext<'_>, scenario: &str) -> Result<Vec<Notice>> {
    let auth_key = ctx.auth_key().await?;
    let mut my_pets = ctx.pets(&auth_key, PetFilter::MyPets).await?;

    if my_pets.pets.is_empty() {
        let fields = PetFields::new("Рыжий", "кот", "4");
        ctx.api
            .add_new_pet(&auth_key, &fields, &ctx.photo(PHOTO_RED_CAT))
            .await?;
        my_pets = ctx.pets(&auth_key, PetFilter::MyPets).await?;
    }

    let pet_id = my_pets
        .first_id()
        .ok_or_else(|| PetFriendsError::precondition("There is no my pets"))?
        .to_string();

    let response = ctx.api.delete_pet(&auth_key, &pet_id).await?;
    let remaining = ctx.pets(&auth_key, PetFilter::MyPets).await?;

    expect_status(scenario, &response, 200)?;
    if remaining.contains_id(&pet_id) {
        return Err(PetFriendsError::assertion(
            scenario,
            format!("pet {} is still listed after deletion", pet_id),
        ));
    }
    Ok(Vec::new())
}

async fn create_new_pet_simple(ctx: &ScenarioContext<'_>, scenario: &str) -> Result<Vec<Notice>> {
    let fields = PetFields::new("Лиза", "лиса", "7");
    let auth_key = ctx.auth_key().await?;

    let response = ctx.api.create_new_pet_simple(&auth_key, &fields).await?;

    expect_status(scenario, &response, 200)?;
    expect_name(scenario, &response, &fields.name)?;
    Ok(Vec::new())
}

async fn add_pet_photo(ctx: &ScenarioContext<'_>, scenario: &str) -> Result<Vec<Notice>> {
    let auth_key = ctx.auth_key().await?;
    let mut my_pets = ctx.pets(&auth_key, PetFilter::MyPets).await?;

    if my_pets.pets.is_empty() {
        ctx.api
            .create_new_pet_simple(&auth_key, &PetFields::new("Лиза", "лиса", "7"))
            .await?;
        my_pets = ctx.pets(&auth_key, PetFilter::MyPets).await?;
    }

    let pet_id = my_pets
        .first_id()
        .ok_or_else(|| PetFriendsError::precondition("There is no my pets"))?;

    let response = ctx
        .api
        .add_pet_photo(&auth_key, pet_id, &ctx.photo(PHOTO_FOX))
        .await?;

    expect_status(scenario, &response, 200)?;
    if !response.body.contains_key("pet_photo") {
        return Err(PetFriendsError::assertion(scenario, "response has no `pet_photo`"));
    }
    Ok(Vec::new())
}

async fn get_api_key_rejected(
    ctx: &ScenarioContext<'_>,
    scenario: &str,
    email: &str,
    password: &str,
) -> Result<Vec<Notice>> {
    let response = ctx.api.get_api_key(email, password).await?;

    expect_status(scenario, &response, 403)?;
    expect_no_key(scenario, &response)?;
    Ok(Vec::new())
}

async fn create_new_pet_invalid_age_format(ctx: &ScenarioContext<'_>, _scenario: &str) -> Result<Vec<Notice>> {
    let fields = PetFields::new("Лиза", "лиса", "vol");
    let auth_key = ctx.auth_key().await?;

    let response = ctx.api.create_new_pet_simple(&auth_key, &fields).await?;

    let mut notices = Vec::new();
    if response.is_ok() {
        notices.push(Notice::bug("Data type error in Age"));
    }
    Ok(notices)
}

async fn create_new_pet_invalid_name_format(ctx: &ScenarioContext<'_>, scenario: &str) -> Result<Vec<Notice>> {
    let fields = PetFields::new(12345.to_string(), "лиса", "7");
    let auth_key = ctx.auth_key().await?;

    let response = ctx.api.create_new_pet_simple(&auth_key, &fields).await?;

    expect_status(scenario, &response, 200)?;
    Ok(vec![Notice::bug("wrong data type for Name is possible for input")])
}

async fn add_new_pet_with_same_data(ctx: &ScenarioContext<'_>, scenario: &str) -> Result<Vec<Notice>> {
    let fields = PetFields::new("Лиза", "лиса", "7");
    let photo = ctx.photo(PHOTO_FOX);
    let auth_key = ctx.auth_key().await?;

    let first = ctx.api.add_new_pet(&auth_key, &fields, &photo).await?;
    expect_status(scenario, &first, 200)?;

    let second = ctx.api.add_new_pet(&auth_key, &fields, &photo).await?;
    expect_status(scenario, &second, 200)?;

    Ok(vec![Notice::bug("Duplicate of pets data is possible")])
}

async fn add_pet_long_type_name(ctx: &ScenarioContext<'_>, scenario: &str) -> Result<Vec<Notice>> {
    let fields = PetFields::new("Tooth", LONG_ANIMAL_TYPE, "3");
    let auth_key = ctx.auth_key().await?;

    let response = ctx
        .api
        .add_new_pet(&auth_key, &fields, &ctx.photo(PHOTO_SQUIRREL))
        .await?;

    let stored_len = response
        .body
        .field_str("animal_type")
        .map(|animal_type| animal_type.chars().count())
        .unwrap_or(0);

    if stored_len > MAX_ANIMAL_TYPE_LEN {
        return Ok(vec![Notice::bug(format!(
            "Pet with too long animal type is added - {} symbols",
            stored_len
        ))]);
    }

    expect_status(scenario, &response, 200)?;
    Ok(Vec::new())
}

async fn create_pet_with_invalid_key(ctx: &ScenarioContext<'_>, scenario: &str) -> Result<Vec<Notice>> {
    let fields = PetFields::new("Kuzya", "Cat", "21");

    let response = ctx
        .api
        .create_new_pet_simple(&AuthKey::new(FAKE_AUTH_KEY), &fields)
        .await?;

    expect_status(scenario, &response, 403)?;
    Ok(Vec::new())
}

async fn create_new_pet_simple_with_invalid_age(
    ctx: &ScenarioContext<'_>,
    _scenario: &str,
) -> Result<Vec<Notice>> {
    let fields = PetFields::new("Dina", "Dog", THREE_DIGIT_AGE);
    let auth_key = ctx.auth_key().await?;

    let response = ctx.api.create_new_pet_simple(&auth_key, &fields).await?;

    // 服務端拒絕才是正確行為
    let mut notices = Vec::new();
    if response.is_ok() {
        notices.push(Notice::warning("More than 2-digit number in Age parameter"));
    }
    Ok(notices)
}
