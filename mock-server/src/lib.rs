//! In-memory stand-in for the PetFriends API.
//!
//! Reproduces the contract the acceptance suite observes on the live
//! service: 403 for unknown credentials and keys, 500 for unknown list
//! filters, 200 for deleting a pet that does not exist, and an empty name
//! when a pet is created without one.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post, put},
    Form, Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const DEMO_EMAIL: &str = "demo@petfriends.test";
pub const DEMO_PASSWORD: &str = "demo-password";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pet {
    pub id: String,
    pub name: String,
    pub animal_type: String,
    pub age: String,
    pub pet_photo: String,
    pub created_at: String,
    pub user_id: String,
}

#[derive(Serialize, Deserialize)]
pub struct KeyBody {
    pub key: String,
}

#[derive(Serialize, Deserialize)]
pub struct PetList {
    pub pets: Vec<Pet>,
}

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub filter: String,
}

/// Urlencoded fields of `create_pet_simple` and update. Absent fields are
/// `None`.
#[derive(Debug, Default, Deserialize)]
pub struct PetForm {
    pub name: Option<String>,
    pub animal_type: Option<String>,
    pub age: Option<String>,
}

#[derive(Debug)]
struct Account {
    password: String,
    user_id: String,
    key: String,
}

#[derive(Debug, Default)]
pub struct Store {
    accounts: HashMap<String, Account>,
    pets: Vec<Pet>,
}

impl Store {
    pub fn add_account(&mut self, email: &str, password: &str) {
        self.accounts.insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                user_id: Uuid::new_v4().simple().to_string(),
                key: format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple()),
            },
        );
    }

    fn user_for_key(&self, key: &str) -> Option<&str> {
        self.accounts
            .values()
            .find(|account| account.key == key)
            .map(|account| account.user_id.as_str())
    }

    fn owned_pet_mut(&mut self, user_id: &str, pet_id: &str) -> Option<&mut Pet> {
        self.pets
            .iter_mut()
            .find(|pet| pet.id == pet_id && pet.user_id == user_id)
    }
}

pub type Db = Arc<RwLock<Store>>;

/// Rejections the real service produces, rendered the way it renders them.
#[derive(Debug)]
pub enum Rejection {
    Forbidden,
    BadRequest(String),
    InvalidFilter,
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        match self {
            Rejection::Forbidden => (
                StatusCode::FORBIDDEN,
                Html("<h1>Forbidden</h1><p>Please provide 'auth_key' Header</p>"),
            )
                .into_response(),
            Rejection::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(serde_json::json!({ "message": message }))).into_response()
            }
            Rejection::InvalidFilter => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "message": "Filter value is incorrect" })),
            )
                .into_response(),
        }
    }
}

/// Router seeded with the demo account.
pub fn app() -> Router {
    app_with_accounts([(DEMO_EMAIL, DEMO_PASSWORD)])
}

pub fn app_with_accounts<'a>(accounts: impl IntoIterator<Item = (&'a str, &'a str)>) -> Router {
    let mut store = Store::default();
    for (email, password) in accounts {
        store.add_account(email, password);
    }
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/api/key", get(get_api_key))
        .route("/api/pets", get(list_pets).post(add_pet))
        .route("/api/create_pet_simple", post(create_pet_simple))
        .route("/api/pets/set_photo/{id}", post(set_photo))
        .route("/api/pets/{id}", put(update_pet).delete(delete_pet))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

fn authorize(store: &Store, headers: &HeaderMap) -> Result<String, Rejection> {
    header(headers, "auth_key")
        .and_then(|key| store.user_for_key(key))
        .map(str::to_string)
        .ok_or(Rejection::Forbidden)
}

fn now() -> String {
    let elapsed = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
    format!("{}.{:06}", elapsed.as_secs(), elapsed.subsec_micros())
}

fn data_uri(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{content_type};base64,{}", STANDARD.encode(bytes))
}

async fn get_api_key(State(db): State<Db>, headers: HeaderMap) -> Result<Json<KeyBody>, Response> {
    let store = db.read().await;
    let email = header(&headers, "email").unwrap_or_default();
    let password = header(&headers, "password").unwrap_or_default();
    match store.accounts.get(email) {
        Some(account) if account.password == password => Ok(Json(KeyBody {
            key: account.key.clone(),
        })),
        _ => {
            tracing::info!(email, "rejected credentials");
            Err((
                StatusCode::FORBIDDEN,
                Html("<h1>Forbidden</h1><p>This user wasn't found in database</p>"),
            )
                .into_response())
        }
    }
}

async fn list_pets(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Json<PetList>, Rejection> {
    let store = db.read().await;
    let user_id = authorize(&store, &headers)?;
    let pets = match query.filter.as_str() {
        "" => store.pets.iter().rev().cloned().collect(),
        "my_pets" => store
            .pets
            .iter()
            .rev()
            .filter(|pet| pet.user_id == user_id)
            .cloned()
            .collect(),
        _ => return Err(Rejection::InvalidFilter),
    };
    Ok(Json(PetList { pets }))
}

/// Multipart fields of an upload; the photo is `(content_type, bytes)`.
/// An empty file part counts as no photo.
#[derive(Default)]
struct Upload {
    form: PetForm,
    photo: Option<(String, Vec<u8>)>,
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, Rejection> {
    let bad = |e: axum::extract::multipart::MultipartError| Rejection::BadRequest(e.body_text());
    let mut upload = Upload::default();
    while let Some(field) = multipart.next_field().await.map_err(bad)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "pet_photo" => {
                let content_type = field.content_type().unwrap_or("application/octet-stream").to_string();
                let bytes = field.bytes().await.map_err(bad)?;
                if !bytes.is_empty() {
                    upload.photo = Some((content_type, bytes.to_vec()));
                }
            }
            "name" => upload.form.name = Some(field.text().await.map_err(bad)?),
            "animal_type" => upload.form.animal_type = Some(field.text().await.map_err(bad)?),
            "age" => upload.form.age = Some(field.text().await.map_err(bad)?),
            _ => {}
        }
    }
    Ok(upload)
}

fn insert_pet(store: &mut Store, user_id: String, form: PetForm, pet_photo: String) -> Pet {
    let pet = Pet {
        id: Uuid::new_v4().to_string(),
        name: form.name.unwrap_or_default(),
        animal_type: form.animal_type.unwrap_or_default(),
        age: form.age.unwrap_or_default(),
        pet_photo,
        created_at: now(),
        user_id,
    };
    tracing::info!(pet_id = %pet.id, name_len = pet.name.len(), "pet created");
    store.pets.push(pet.clone());
    pet
}

async fn add_pet(State(db): State<Db>, headers: HeaderMap, multipart: Multipart) -> Result<Json<Pet>, Rejection> {
    let user_id = authorize(&*db.read().await, &headers)?;
    let upload = read_upload(multipart).await?;
    let (content_type, bytes) = upload
        .photo
        .ok_or_else(|| Rejection::BadRequest("pet_photo is required".to_string()))?;
    let mut store = db.write().await;
    Ok(Json(insert_pet(&mut store, user_id, upload.form, data_uri(&content_type, &bytes))))
}

async fn create_pet_simple(
    State(db): State<Db>,
    headers: HeaderMap,
    Form(form): Form<PetForm>,
) -> Result<Json<Pet>, Rejection> {
    let mut store = db.write().await;
    let user_id = authorize(&store, &headers)?;
    Ok(Json(insert_pet(&mut store, user_id, form, String::new())))
}

async fn set_photo(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<Pet>, Rejection> {
    let user_id = authorize(&*db.read().await, &headers)?;
    let upload = read_upload(multipart).await?;
    let (content_type, bytes) = upload
        .photo
        .ok_or_else(|| Rejection::BadRequest("pet_photo is required".to_string()))?;
    let mut store = db.write().await;
    let pet = store
        .owned_pet_mut(&user_id, &id)
        .ok_or_else(|| Rejection::BadRequest(format!("pet {id} not found")))?;
    pet.pet_photo = data_uri(&content_type, &bytes);
    tracing::info!(pet_id = %id, "photo replaced");
    Ok(Json(pet.clone()))
}

async fn update_pet(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Form(form): Form<PetForm>,
) -> Result<Json<Pet>, Rejection> {
    let mut store = db.write().await;
    let user_id = authorize(&store, &headers)?;
    let pet = store
        .owned_pet_mut(&user_id, &id)
        .ok_or_else(|| Rejection::BadRequest(format!("pet {id} not found")))?;
    if let Some(name) = form.name {
        pet.name = name;
    }
    if let Some(animal_type) = form.animal_type {
        pet.animal_type = animal_type;
    }
    if let Some(age) = form.age {
        pet.age = age;
    }
    tracing::info!(pet_id = %id, "pet updated");
    Ok(Json(pet.clone()))
}

/// Answers 200 whether or not the caller owned a pet with this id.
async fn delete_pet(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, Rejection> {
    let mut store = db.write().await;
    let user_id = authorize(&store, &headers)?;
    let before = store.pets.len();
    store.pets.retain(|pet| !(pet.id == id && pet.user_id == user_id));
    tracing::info!(pet_id = %id, removed = before - store.pets.len(), "pet deleted");
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pet_serializes_to_json() {
        let pet = Pet {
            id: "p1".to_string(),
            name: "Test".to_string(),
            animal_type: "cat".to_string(),
            age: "3".to_string(),
            pet_photo: String::new(),
            created_at: "1.000000".to_string(),
            user_id: "u1".to_string(),
        };
        let json = serde_json::to_value(&pet).unwrap();
        assert_eq!(json["id"], "p1");
        assert_eq!(json["age"], "3");
        assert_eq!(json["pet_photo"], "");
    }

    #[test]
    fn pet_form_fields_are_optional() {
        let form: PetForm = serde_json::from_str(r#"{}"#).unwrap();
        assert!(form.name.is_none());
        assert!(form.animal_type.is_none());
        assert!(form.age.is_none());
    }

    #[test]
    fn list_query_defaults_to_all() {
        let query: ListQuery = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(query.filter, "");
    }

    #[test]
    fn data_uri_embeds_base64() {
        assert_eq!(data_uri("image/jpeg", b"hi"), "data:image/jpeg;base64,aGk=");
    }

    #[test]
    fn keys_resolve_to_their_account() {
        let mut store = Store::default();
        store.add_account("a@b.c", "pw");
        let key = store.accounts["a@b.c"].key.clone();
        assert_eq!(store.user_for_key(&key), Some(store.accounts["a@b.c"].user_id.as_str()));
        assert_eq!(store.user_for_key("forged"), None);
    }
}
