//! Synchronous API client core for the PetFriends service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip.
//!
//! # Design
//! - `PetFriendsClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - Every parse returns an `ApiResponse`: status code plus a per-endpoint
//!   tagged body. Non-200 answers are data, not errors.
//! - Types are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod body;
pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use body::Multipart;
pub use client::PetFriendsClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{
    ApiResponse, AuthKey, Credentials, NewPet, Pet, PetFilter, PetList, PetUpdate, PhotoUpload, ResponseBody,
};
