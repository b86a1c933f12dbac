//! Domain types for the PetFriends API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch drift between the two crates. Response bodies are
//! modelled as a tagged union per endpoint: the success shape when it
//! decodes, otherwise whatever JSON (or text) the service sent back.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Account credentials used to obtain an `AuthKey`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Opaque token issued by `GET /api/key` and sent as the `auth_key` header.
///
/// Any string can be wrapped, which is how forged-key checks are expressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthKey(String);

impl AuthKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Value of the `filter` query parameter on `GET /api/pets`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PetFilter {
    /// Every pet on the service (`""`).
    #[default]
    All,
    /// Pets owned by the caller (`"my_pets"`).
    MyPets,
    /// Sent verbatim. The service answers unknown values with 500.
    Other(String),
}

impl PetFilter {
    pub fn as_query_value(&self) -> &str {
        match self {
            PetFilter::All => "",
            PetFilter::MyPets => "my_pets",
            PetFilter::Other(value) => value,
        }
    }
}

impl From<&str> for PetFilter {
    fn from(value: &str) -> Self {
        match value {
            "" => PetFilter::All,
            "my_pets" => PetFilter::MyPets,
            other => PetFilter::Other(other.to_string()),
        }
    }
}

/// A pet record as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub animal_type: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub age: String,
    /// Data URI of the photo, empty when the pet has none.
    #[serde(default)]
    pub pet_photo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Body of a successful `GET /api/pets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetList {
    pub pets: Vec<Pet>,
}

impl PetList {
    pub fn contains_id(&self, id: &str) -> bool {
        self.pets.iter().any(|pet| pet.id == id)
    }
}

/// Fields for creating a pet.
///
/// `name: None` leaves the field out of the request entirely; what the
/// service does with that is undocumented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPet {
    pub name: Option<String>,
    pub animal_type: String,
    pub age: String,
}

impl NewPet {
    pub fn new(name: impl Into<String>, animal_type: impl Into<String>, age: impl ToString) -> Self {
        Self {
            name: Some(name.into()),
            animal_type: animal_type.into(),
            age: age.to_string(),
        }
    }

    pub fn unnamed(animal_type: impl Into<String>, age: impl ToString) -> Self {
        Self {
            name: None,
            animal_type: animal_type.into(),
            age: age.to_string(),
        }
    }

    pub(crate) fn form_fields(&self) -> Vec<(&str, &str)> {
        let mut fields = Vec::with_capacity(3);
        if let Some(name) = &self.name {
            fields.push(("name", name.as_str()));
        }
        fields.push(("animal_type", self.animal_type.as_str()));
        fields.push(("age", self.age.as_str()));
        fields
    }
}

/// Replacement fields for `PUT /api/pets/{id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetUpdate {
    pub name: String,
    pub animal_type: String,
    pub age: String,
}

impl PetUpdate {
    pub fn new(name: impl Into<String>, animal_type: impl Into<String>, age: impl ToString) -> Self {
        Self {
            name: name.into(),
            animal_type: animal_type.into(),
            age: age.to_string(),
        }
    }

    pub(crate) fn form_fields(&self) -> [(&str, &str); 3] {
        [
            ("name", self.name.as_str()),
            ("animal_type", self.animal_type.as_str()),
            ("age", self.age.as_str()),
        ]
    }
}

/// An image attached to a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PhotoUpload {
    /// Content type is guessed from the file extension, falling back to
    /// `application/octet-stream`.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }
}

/// Response body of one endpoint call.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody<T> {
    /// The endpoint's success shape.
    Parsed(T),
    /// Anything else: an error object, an HTML page as a JSON string, or
    /// `Null` for an empty body.
    Other(serde_json::Value),
}

/// Status code plus body, surfaced as-is whatever the status.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub body: ResponseBody<T>,
}

impl<T> ApiResponse<T> {
    pub fn parsed(&self) -> Option<&T> {
        match &self.body {
            ResponseBody::Parsed(value) => Some(value),
            ResponseBody::Other(_) => None,
        }
    }

    pub fn into_parsed(self) -> Option<T> {
        match self.body {
            ResponseBody::Parsed(value) => Some(value),
            ResponseBody::Other(_) => None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Ages come back as strings, but numeric ages are accepted too.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}
