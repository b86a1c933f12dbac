//! Stateless HTTP request builder and response parser for the PetFriends API.
//!
//! # Design
//! `PetFriendsClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the HTTP round-trip.
//!
//! Parsing never fails on status: whatever the service answered comes back
//! as an `ApiResponse`. Only a 200 whose body does not fit the endpoint's
//! success shape is an error.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::body::{encode_form, Multipart, FORM_CONTENT_TYPE};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    ApiResponse, AuthKey, Credentials, NewPet, Pet, PetFilter, PetList, PetUpdate, PhotoUpload, ResponseBody,
};

/// Synchronous, stateless client for the PetFriends API.
#[derive(Debug, Clone)]
pub struct PetFriendsClient {
    base_url: String,
}

#[derive(Deserialize)]
struct KeyBody {
    key: AuthKey,
}

impl PetFriendsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_get_api_key(&self, credentials: &Credentials) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/api/key", self.base_url),
            headers: vec![
                ("email".to_string(), credentials.email.clone()),
                ("password".to_string(), credentials.password.clone()),
            ],
            body: None,
        }
    }

    pub fn build_list_pets(&self, auth_key: &AuthKey, filter: &PetFilter) -> HttpRequest {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("filter", filter.as_query_value())
            .finish();
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/api/pets?{query}", self.base_url),
            headers: vec![auth_header(auth_key)],
            body: None,
        }
    }

    pub fn build_add_pet(
        &self,
        auth_key: &AuthKey,
        pet: &NewPet,
        photo: &PhotoUpload,
    ) -> Result<HttpRequest, ApiError> {
        let (content_type, body) = pet
            .form_fields()
            .into_iter()
            .fold(Multipart::new(), |multipart, (name, value)| multipart.text(name, value))
            .file("pet_photo", photo)?
            .finish()?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/api/pets", self.base_url),
            headers: vec![auth_header(auth_key), content_type_header(content_type)],
            body: Some(body),
        })
    }

    pub fn build_add_pet_simple(&self, auth_key: &AuthKey, pet: &NewPet) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/api/create_pet_simple", self.base_url),
            headers: vec![auth_header(auth_key), content_type_header(FORM_CONTENT_TYPE)],
            body: Some(encode_form(pet.form_fields())),
        }
    }

    pub fn build_set_photo(
        &self,
        auth_key: &AuthKey,
        pet_id: &str,
        photo: &PhotoUpload,
    ) -> Result<HttpRequest, ApiError> {
        let segment = pet_segment(pet_id)?;
        let (content_type, body) = Multipart::new().file("pet_photo", photo)?.finish()?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/api/pets/set_photo/{segment}", self.base_url),
            headers: vec![auth_header(auth_key), content_type_header(content_type)],
            body: Some(body),
        })
    }

    pub fn build_update_pet(
        &self,
        auth_key: &AuthKey,
        pet_id: &str,
        update: &PetUpdate,
    ) -> Result<HttpRequest, ApiError> {
        let segment = pet_segment(pet_id)?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/api/pets/{segment}", self.base_url),
            headers: vec![auth_header(auth_key), content_type_header(FORM_CONTENT_TYPE)],
            body: Some(encode_form(update.form_fields())),
        })
    }

    pub fn build_delete_pet(&self, auth_key: &AuthKey, pet_id: &str) -> Result<HttpRequest, ApiError> {
        let segment = pet_segment(pet_id)?;
        Ok(HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/api/pets/{segment}", self.base_url),
            headers: vec![auth_header(auth_key)],
            body: None,
        })
    }

    pub fn parse_api_key(&self, response: HttpResponse) -> Result<ApiResponse<AuthKey>, ApiError> {
        let parsed = parse_body::<KeyBody>(response)?;
        Ok(ApiResponse {
            status: parsed.status,
            body: match parsed.body {
                ResponseBody::Parsed(body) => ResponseBody::Parsed(body.key),
                ResponseBody::Other(value) => ResponseBody::Other(value),
            },
        })
    }

    pub fn parse_list_pets(&self, response: HttpResponse) -> Result<ApiResponse<PetList>, ApiError> {
        parse_body(response)
    }

    /// Parses the single-pet body returned by add, add-simple, set-photo and
    /// update.
    pub fn parse_pet(&self, response: HttpResponse) -> Result<ApiResponse<Pet>, ApiError> {
        parse_body(response)
    }

    /// Delete answers 200 with an empty body, whether or not the pet existed.
    pub fn parse_delete_pet(&self, response: HttpResponse) -> Result<ApiResponse<()>, ApiError> {
        let body = if response.status == 200 {
            ResponseBody::Parsed(())
        } else {
            ResponseBody::Other(raw_value(&response.body))
        };
        Ok(ApiResponse {
            status: response.status,
            body,
        })
    }
}

fn auth_header(auth_key: &AuthKey) -> (String, String) {
    ("auth_key".to_string(), auth_key.as_str().to_string())
}

fn content_type_header(value: impl Into<String>) -> (String, String) {
    ("content-type".to_string(), value.into())
}

/// RFC 3986 unreserved characters pass through; everything else is escaped.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Percent-encode a pet id as exactly one URL path segment.
fn pet_segment(pet_id: &str) -> Result<String, ApiError> {
    if pet_id.is_empty() {
        return Err(ApiError::InvalidPetId(pet_id.to_string()));
    }
    Ok(utf8_percent_encode(pet_id, PATH_SEGMENT).to_string())
}

/// Decode a 200 into `T`; keep any other status as raw data.
fn parse_body<T: DeserializeOwned>(response: HttpResponse) -> Result<ApiResponse<T>, ApiError> {
    let body = if response.status == 200 {
        let value = serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))?;
        ResponseBody::Parsed(value)
    } else {
        ResponseBody::Other(raw_value(&response.body))
    };
    Ok(ApiResponse {
        status: response.status,
        body,
    })
}

/// JSON when the body is JSON, a JSON string otherwise, `Null` when empty.
fn raw_value(body: &str) -> serde_json::Value {
    if body.trim().is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| serde_json::Value::String(body.to_string()))
}
