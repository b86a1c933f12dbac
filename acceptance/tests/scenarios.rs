//! Every scenario run end-to-end against the mock server over real HTTP.

mod common;

use common::{demo_key, mock_context, seed_pet};
use petfriends_acceptance::scenarios::{self, NONEXISTENT_PET_ID};
use petfriends_acceptance::{run_all, ScenarioError, SCENARIOS};
use petfriends_core::{AuthKey, PetFilter, PhotoUpload};

#[test]
fn get_api_key_for_valid_user() {
    let ctx = mock_context();
    scenarios::get_api_key_for_valid_user(&ctx).unwrap();
}

#[test]
fn get_all_pets_with_valid_key() {
    let ctx = mock_context();
    seed_pet(&ctx);
    scenarios::get_all_pets_with_valid_key(&ctx).unwrap();
}

#[test]
fn get_all_pets_fails_when_service_has_no_pets() {
    let ctx = mock_context();
    let err = scenarios::get_all_pets_with_valid_key(&ctx).unwrap_err();
    assert!(matches!(err, ScenarioError::Assertion(_)), "{err}");
}

#[test]
fn add_new_pet_with_valid_data() {
    let ctx = mock_context();
    scenarios::add_new_pet_with_valid_data(&ctx).unwrap();
}

#[test]
fn successful_delete_self_pet_creates_a_pet_when_none_exist() {
    let ctx = mock_context();
    scenarios::successful_delete_self_pet(&ctx).unwrap();

    let key = demo_key(&ctx);
    let mine = ctx.api.get_list_of_pets(&key, &PetFilter::MyPets).unwrap();
    assert!(mine.parsed().unwrap().pets.is_empty());
}

#[test]
fn successful_delete_self_pet_removes_an_existing_pet() {
    let ctx = mock_context();
    let id = seed_pet(&ctx);
    scenarios::successful_delete_self_pet(&ctx).unwrap();

    let key = demo_key(&ctx);
    let mine = ctx.api.get_list_of_pets(&key, &PetFilter::MyPets).unwrap();
    assert!(!mine.parsed().unwrap().contains_id(&id));
}

#[test]
fn successful_update_self_pet_info() {
    let ctx = mock_context();
    let id = seed_pet(&ctx);
    scenarios::successful_update_self_pet_info(&ctx).unwrap();

    let key = demo_key(&ctx);
    let mine = ctx.api.get_list_of_pets(&key, &PetFilter::MyPets).unwrap();
    let pet = mine.parsed().unwrap().pets.iter().find(|p| p.id == id).unwrap().clone();
    assert_eq!(pet.name, "Мурзик");
    assert_eq!(pet.animal_type, "Котэ");
    assert_eq!(pet.age, "5");
}

#[test]
fn update_without_pets_is_a_precondition_failure() {
    let ctx = mock_context();
    let err = scenarios::successful_update_self_pet_info(&ctx).unwrap_err();
    match err {
        ScenarioError::Precondition(message) => assert_eq!(message, "There is no my pets"),
        other => panic!("expected precondition failure, got {other}"),
    }
}

#[test]
fn delete_reports_the_status_when_creating_a_pet_fails() {
    let mut ctx = mock_context();
    ctx.photo = PhotoUpload::new("empty.jpg", Vec::new());
    let err = scenarios::successful_delete_self_pet(&ctx).unwrap_err();
    match err {
        ScenarioError::Precondition(message) => {
            assert!(message.contains("add_new_pet returned 400"), "{message}")
        }
        other => panic!("expected precondition failure, got {other}"),
    }
}

#[test]
fn successful_add_new_pet_simple() {
    let ctx = mock_context();
    scenarios::successful_add_new_pet_simple(&ctx).unwrap();
}

#[test]
fn successful_add_photo_of_pet() {
    let ctx = mock_context();
    scenarios::successful_add_photo_of_pet(&ctx).unwrap();

    let key = demo_key(&ctx);
    let mine = ctx.api.get_list_of_pets(&key, &PetFilter::MyPets).unwrap();
    let pets = mine.into_parsed().unwrap().pets;
    assert_eq!(pets.len(), 1);
    assert!(pets[0].pet_photo.starts_with("data:image/jpeg;base64,"));
}

#[test]
fn invalid_auth_key_get_all_pets() {
    let ctx = mock_context();
    scenarios::invalid_auth_key_get_all_pets(&ctx).unwrap();
}

#[test]
fn invalid_user_get_api_key() {
    let ctx = mock_context();
    scenarios::invalid_user_get_api_key(&ctx).unwrap();
}

#[test]
fn add_new_pet_noname() {
    let ctx = mock_context();
    scenarios::add_new_pet_noname(&ctx).unwrap();
}

#[test]
fn add_new_pet_long_name() {
    let ctx = mock_context();
    scenarios::add_new_pet_long_name(&ctx).unwrap();
}

#[test]
fn get_all_pets_with_invalid_filter() {
    let ctx = mock_context();
    scenarios::get_all_pets_with_invalid_filter(&ctx).unwrap();
}

#[test]
fn delete_nonexistent_pet_id() {
    let ctx = mock_context();
    scenarios::delete_nonexistent_pet_id(&ctx).unwrap();
}

#[test]
fn ids_with_spaces_and_cyrillic_reach_the_service() {
    let ctx = mock_context();
    let key = demo_key(&ctx);
    for id in ["pet 1", "кот"] {
        let response = ctx.api.delete_pet(&key, id).unwrap();
        assert_eq!(response.status, 200, "{id:?}");
    }
}

#[test]
fn forged_key_cannot_delete() {
    let ctx = mock_context();
    let response = ctx.api.delete_pet(&AuthKey::new("forged"), NONEXISTENT_PET_ID).unwrap();
    assert_eq!(response.status, 403);
    assert!(response.parsed().is_none());
}

#[test]
fn run_all_passes_on_a_seeded_service() {
    let ctx = mock_context();
    seed_pet(&ctx);
    let outcomes = run_all(&ctx);
    assert_eq!(outcomes.len(), SCENARIOS.len());
    for outcome in &outcomes {
        assert!(outcome.passed(), "{}: {:?}", outcome.name, outcome.result);
    }
}
