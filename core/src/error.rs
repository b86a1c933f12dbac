//! Error types for the PetFriends API client.
//!
//! # Design
//! Non-2xx statuses are not errors here: the PetFriends contract is defined
//! as much by its 403 and 500 answers as by its 200s, so those come back as
//! `ApiResponse` data. `ApiError` covers only what the client itself cannot
//! handle: a request it refuses to build, or a 200 body of the wrong shape.

use thiserror::Error;

/// Errors returned by `PetFriendsClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The pet id is empty, so there is no path segment to address.
    #[error("invalid pet id {0:?}")]
    InvalidPetId(String),

    /// The photo's content type is not a valid MIME type.
    #[error("invalid photo: {0}")]
    InvalidPhoto(String),

    /// The multipart body could not be assembled.
    #[error("multipart encoding failed: {0}")]
    Multipart(String),

    /// A successful response body did not match the endpoint's shape.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}
