//! Acceptance scenarios for the PetFriends API.
//!
//! Every scenario takes a `Context`, drives the API through one use case,
//! and returns `Err` describing the first expectation that did not hold.
//! Scenarios share nothing in-process; they do share the account's pets on
//! the service, so the ones that need a pet create one when none exists.

use petfriends_core::{ApiResponse, AuthKey, Credentials, NewPet, PetFilter, PetList, PetUpdate, PhotoUpload};
use rand::distr::Alphanumeric;
use rand::Rng;

use crate::api::PetFriends;
use crate::error::ScenarioError;
use crate::fixtures;
use crate::settings::Settings;

macro_rules! ensure {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return Err(ScenarioError::Assertion(format!($($arg)+)));
        }
    };
}

pub const INVALID_EMAIL: &str = "123@gmail.com";
pub const INVALID_PASSWORD: &str = "123321";
pub const FORGED_KEY: &str = "uoefhiuwheufhuiwehfhuew";
pub const INVALID_FILTER: &str = "wefwef";
pub const NONEXISTENT_PET_ID: &str = "3ceb67a8-faf0-4202-8f75-e06fa5b26832";
pub const LONG_NAME_LEN: usize = 10_000;

/// Everything a scenario needs, passed in explicitly.
#[derive(Debug, Clone)]
pub struct Context {
    pub api: PetFriends,
    pub credentials: Credentials,
    pub photo: PhotoUpload,
}

impl Context {
    pub fn new(api: PetFriends, credentials: Credentials, photo: PhotoUpload) -> Self {
        Self {
            api,
            credentials,
            photo,
        }
    }

    /// API from `settings`, photo from the default fixture.
    pub fn from_settings(settings: &Settings) -> Result<Self, ScenarioError> {
        Ok(Self::new(
            PetFriends::new(&settings.base_url),
            settings.credentials.clone(),
            fixtures::default_photo()?,
        ))
    }
}

pub type ScenarioFn = fn(&Context) -> Result<(), ScenarioError>;

/// Every scenario, in suite order.
pub const SCENARIOS: &[(&str, ScenarioFn)] = &[
    ("get_api_key_for_valid_user", get_api_key_for_valid_user),
    ("get_all_pets_with_valid_key", get_all_pets_with_valid_key),
    ("add_new_pet_with_valid_data", add_new_pet_with_valid_data),
    ("successful_delete_self_pet", successful_delete_self_pet),
    ("successful_update_self_pet_info", successful_update_self_pet_info),
    ("successful_add_new_pet_simple", successful_add_new_pet_simple),
    ("successful_add_photo_of_pet", successful_add_photo_of_pet),
    ("invalid_auth_key_get_all_pets", invalid_auth_key_get_all_pets),
    ("invalid_user_get_api_key", invalid_user_get_api_key),
    ("add_new_pet_noname", add_new_pet_noname),
    ("add_new_pet_long_name", add_new_pet_long_name),
    ("get_all_pets_with_invalid_filter", get_all_pets_with_invalid_filter),
    ("delete_nonexistent_pet_id", delete_nonexistent_pet_id),
];

#[derive(Debug)]
pub struct Outcome {
    pub name: &'static str,
    pub result: Result<(), ScenarioError>,
}

impl Outcome {
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

/// Run every scenario in order, continuing past failures.
pub fn run_all(ctx: &Context) -> Vec<Outcome> {
    SCENARIOS
        .iter()
        .map(|&(name, scenario)| {
            let result = scenario(ctx);
            match &result {
                Ok(()) => tracing::info!(scenario = name, "passed"),
                Err(e) => tracing::warn!(scenario = name, error = %e, "failed"),
            }
            Outcome { name, result }
        })
        .collect()
}

fn ensure_status<T>(response: &ApiResponse<T>, expected: u16, what: &str) -> Result<(), ScenarioError> {
    ensure!(
        response.status == expected,
        "{what}: expected status {expected}, got {}",
        response.status
    );
    Ok(())
}

/// Log in with the context's credentials; anything but a 200 with a key
/// aborts the scenario.
pub fn authenticate(ctx: &Context) -> Result<AuthKey, ScenarioError> {
    let response = ctx.api.get_api_key(&ctx.credentials)?;
    ensure_status(&response, 200, "get_api_key")?;
    response
        .into_parsed()
        .ok_or_else(|| ScenarioError::Assertion("get_api_key: 200 without a key".to_string()))
}

fn my_pets(ctx: &Context, key: &AuthKey) -> Result<PetList, ScenarioError> {
    let response = ctx.api.get_list_of_pets(key, &PetFilter::MyPets)?;
    ensure_status(&response, 200, "list my_pets")?;
    response
        .into_parsed()
        .ok_or_else(|| ScenarioError::Assertion("list my_pets: 200 without pets".to_string()))
}

/// The caller's pets, creating one first if there are none.
fn my_pets_or_create(ctx: &Context, key: &AuthKey) -> Result<PetList, ScenarioError> {
    let pets = my_pets(ctx, key)?;
    if !pets.pets.is_empty() {
        return Ok(pets);
    }
    tracing::info!("account owns no pets, creating one");
    let created = ctx.api.add_new_pet(key, &NewPet::new("СуперКот", "кот", 3), &ctx.photo)?;
    if created.status != 200 {
        return Err(ScenarioError::Precondition(format!(
            "account owns no pets and add_new_pet returned {}: {:?}",
            created.status, created.body
        )));
    }
    my_pets(ctx, key)
}

pub fn get_api_key_for_valid_user(ctx: &Context) -> Result<(), ScenarioError> {
    let response = ctx.api.get_api_key(&ctx.credentials)?;
    ensure_status(&response, 200, "get_api_key")?;
    let key = response.parsed();
    ensure!(
        key.is_some_and(|key| !key.as_str().is_empty()),
        "get_api_key: no key in {:?}",
        response.body
    );
    Ok(())
}

pub fn get_all_pets_with_valid_key(ctx: &Context) -> Result<(), ScenarioError> {
    let key = authenticate(ctx)?;
    let response = ctx.api.get_list_of_pets(&key, &PetFilter::All)?;
    ensure_status(&response, 200, "list all pets")?;
    let count = response.parsed().map_or(0, |list| list.pets.len());
    ensure!(count > 0, "list all pets: expected at least one pet");
    Ok(())
}

pub fn add_new_pet_with_valid_data(ctx: &Context) -> Result<(), ScenarioError> {
    let key = authenticate(ctx)?;
    let pet = NewPet::new("Барбоскин", "двортерьер", "4");
    let response = ctx.api.add_new_pet(&key, &pet, &ctx.photo)?;
    ensure_status(&response, 200, "add_new_pet")?;
    let created = response
        .into_parsed()
        .ok_or_else(|| ScenarioError::Assertion("add_new_pet: no pet in body".to_string()))?;
    ensure!(
        created.name == "Барбоскин",
        "add_new_pet: expected name Барбоскин, got {:?}",
        created.name
    );

    let mine = my_pets(ctx, &key)?;
    ensure!(
        mine.contains_id(&created.id),
        "add_new_pet: pet {} missing from my_pets",
        created.id
    );
    Ok(())
}

pub fn successful_delete_self_pet(ctx: &Context) -> Result<(), ScenarioError> {
    let key = authenticate(ctx)?;
    let pets = my_pets_or_create(ctx, &key)?;
    let pet_id = pets
        .pets
        .first()
        .map(|pet| pet.id.clone())
        .ok_or_else(|| ScenarioError::Precondition("could not create a pet to delete".to_string()))?;

    let response = ctx.api.delete_pet(&key, &pet_id)?;
    ensure_status(&response, 200, "delete_pet")?;

    let remaining = my_pets(ctx, &key)?;
    ensure!(
        !remaining.contains_id(&pet_id),
        "delete_pet: pet {pet_id} still listed in my_pets"
    );
    Ok(())
}

pub fn successful_update_self_pet_info(ctx: &Context) -> Result<(), ScenarioError> {
    let key = authenticate(ctx)?;
    let pets = my_pets(ctx, &key)?;
    let Some(pet) = pets.pets.first() else {
        return Err(ScenarioError::Precondition("There is no my pets".to_string()));
    };

    let update = PetUpdate::new("Мурзик", "Котэ", 5);
    let response = ctx.api.update_pet_info(&key, &pet.id, &update)?;
    ensure_status(&response, 200, "update_pet_info")?;
    let name = response.parsed().map(|pet| pet.name.as_str());
    ensure!(
        name == Some("Мурзик"),
        "update_pet_info: expected name Мурзик, got {name:?}"
    );

    let reread = my_pets(ctx, &key)?;
    let stored = reread.pets.iter().find(|p| p.id == pet.id).map(|p| p.name.as_str());
    ensure!(
        stored == Some("Мурзик"),
        "update_pet_info: my_pets shows {stored:?} for {}",
        pet.id
    );
    Ok(())
}

pub fn successful_add_new_pet_simple(ctx: &Context) -> Result<(), ScenarioError> {
    let key = authenticate(ctx)?;
    let response = ctx.api.add_new_pet_simple(&key, &NewPet::new("Мурзик_2", "Котэ_2", 10))?;
    ensure_status(&response, 200, "add_new_pet_simple")?;
    let name = response.parsed().map(|pet| pet.name.as_str());
    ensure!(
        name == Some("Мурзик_2"),
        "add_new_pet_simple: expected name Мурзик_2, got {name:?}"
    );
    Ok(())
}

pub fn successful_add_photo_of_pet(ctx: &Context) -> Result<(), ScenarioError> {
    let key = authenticate(ctx)?;
    let pets = my_pets_or_create(ctx, &key)?;
    let pet_id = pets
        .pets
        .first()
        .map(|pet| pet.id.clone())
        .ok_or_else(|| ScenarioError::Precondition("could not create a pet to photograph".to_string()))?;

    let response = ctx.api.add_photo_of_pet(&key, &pet_id, &ctx.photo)?;
    ensure_status(&response, 200, "add_photo_of_pet")?;
    Ok(())
}

pub fn invalid_auth_key_get_all_pets(ctx: &Context) -> Result<(), ScenarioError> {
    let response = ctx.api.get_list_of_pets(&AuthKey::new(FORGED_KEY), &PetFilter::All)?;
    ensure_status(&response, 403, "list with forged key")
}

pub fn invalid_user_get_api_key(ctx: &Context) -> Result<(), ScenarioError> {
    let response = ctx.api.get_api_key(&Credentials::new(INVALID_EMAIL, INVALID_PASSWORD))?;
    ensure_status(&response, 403, "get_api_key for unknown user")?;
    ensure!(
        response.parsed().is_none(),
        "get_api_key for unknown user: key issued"
    );
    Ok(())
}

/// Upstream documentation does not say whether a nameless pet is valid.
/// This pins the currently observed answer (200, empty name) and should be
/// revisited once the service documents it.
pub fn add_new_pet_noname(ctx: &Context) -> Result<(), ScenarioError> {
    let key = authenticate(ctx)?;
    let response = ctx.api.add_new_pet(&key, &NewPet::unnamed("двортерьер", "4"), &ctx.photo)?;
    ensure_status(&response, 200, "add_new_pet without name")?;
    let name = response.parsed().map(|pet| pet.name.as_str());
    ensure!(
        name == Some(""),
        "add_new_pet without name: expected empty name, got {name:?}"
    );
    Ok(())
}

/// Same open question as `add_new_pet_noname`, for a name of
/// `LONG_NAME_LEN` characters. Only the status is pinned.
pub fn add_new_pet_long_name(ctx: &Context) -> Result<(), ScenarioError> {
    let key = authenticate(ctx)?;
    let name = long_name(LONG_NAME_LEN);
    let response = ctx.api.add_new_pet(&key, &NewPet::new(name, "двортерьер", "4"), &ctx.photo)?;
    ensure_status(&response, 200, "add_new_pet with long name")
}

pub fn get_all_pets_with_invalid_filter(ctx: &Context) -> Result<(), ScenarioError> {
    let key = authenticate(ctx)?;
    let response = ctx.api.get_list_of_pets(&key, &PetFilter::Other(INVALID_FILTER.to_string()))?;
    ensure_status(&response, 500, "list with unknown filter")
}

pub fn delete_nonexistent_pet_id(ctx: &Context) -> Result<(), ScenarioError> {
    let key = authenticate(ctx)?;
    let response = ctx.api.delete_pet(&key, NONEXISTENT_PET_ID)?;
    ensure_status(&response, 200, "delete nonexistent pet")
}

/// Random ASCII alphanumerics, both cases and digits.
fn long_name(len: usize) -> String {
    rand::rng().sample_iter(&Alphanumeric).take(len).map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_name_is_alphanumeric_of_requested_length() {
        let name = long_name(LONG_NAME_LEN);
        assert_eq!(name.chars().count(), LONG_NAME_LEN);
        assert!(name.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(name.chars().any(|c| c.is_ascii_uppercase()));
        assert!(name.chars().any(|c| c.is_ascii_lowercase()));
        assert!(name.chars().any(|c| c.is_ascii_digit()));
        assert_ne!(long_name(64), long_name(64));
    }

    #[test]
    fn scenario_names_are_unique() {
        let mut names: Vec<_> = SCENARIOS.iter().map(|(name, _)| *name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), SCENARIOS.len());
        assert_eq!(SCENARIOS.len(), 13);
    }

    #[test]
    fn ensure_status_reports_both_codes() {
        let response = ApiResponse::<()> {
            status: 403,
            body: petfriends_core::ResponseBody::Other(serde_json::Value::Null),
        };
        let err = ensure_status(&response, 200, "list pets").unwrap_err();
        assert_eq!(err.to_string(), "assertion failed: list pets: expected status 200, got 403");
    }
}
