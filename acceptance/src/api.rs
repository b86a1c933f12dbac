//! The PetFriends API as a set of blocking calls.
//!
//! Each method pairs a core `build_*` with its `parse_*` over a `Transport`
//! and hands back the status code and body untouched, whatever the status.

use petfriends_core::{
    ApiResponse, AuthKey, Credentials, NewPet, Pet, PetFilter, PetFriendsClient, PetList, PetUpdate, PhotoUpload,
};

use crate::error::ClientError;
use crate::transport::Transport;

#[derive(Debug, Clone)]
pub struct PetFriends {
    client: PetFriendsClient,
    transport: Transport,
}

impl PetFriends {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(PetFriendsClient::new(base_url), Transport::new())
    }

    pub fn with_transport(client: PetFriendsClient, transport: Transport) -> Self {
        Self { client, transport }
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    pub fn get_api_key(&self, credentials: &Credentials) -> Result<ApiResponse<AuthKey>, ClientError> {
        let req = self.client.build_get_api_key(credentials);
        Ok(self.client.parse_api_key(self.transport.execute(req)?)?)
    }

    pub fn get_list_of_pets(&self, auth_key: &AuthKey, filter: &PetFilter) -> Result<ApiResponse<PetList>, ClientError> {
        let req = self.client.build_list_pets(auth_key, filter);
        Ok(self.client.parse_list_pets(self.transport.execute(req)?)?)
    }

    pub fn add_new_pet(
        &self,
        auth_key: &AuthKey,
        pet: &NewPet,
        photo: &PhotoUpload,
    ) -> Result<ApiResponse<Pet>, ClientError> {
        let req = self.client.build_add_pet(auth_key, pet, photo)?;
        Ok(self.client.parse_pet(self.transport.execute(req)?)?)
    }

    pub fn add_new_pet_simple(&self, auth_key: &AuthKey, pet: &NewPet) -> Result<ApiResponse<Pet>, ClientError> {
        let req = self.client.build_add_pet_simple(auth_key, pet);
        Ok(self.client.parse_pet(self.transport.execute(req)?)?)
    }

    pub fn add_photo_of_pet(
        &self,
        auth_key: &AuthKey,
        pet_id: &str,
        photo: &PhotoUpload,
    ) -> Result<ApiResponse<Pet>, ClientError> {
        let req = self.client.build_set_photo(auth_key, pet_id, photo)?;
        Ok(self.client.parse_pet(self.transport.execute(req)?)?)
    }

    pub fn update_pet_info(
        &self,
        auth_key: &AuthKey,
        pet_id: &str,
        update: &PetUpdate,
    ) -> Result<ApiResponse<Pet>, ClientError> {
        let req = self.client.build_update_pet(auth_key, pet_id, update)?;
        Ok(self.client.parse_pet(self.transport.execute(req)?)?)
    }

    pub fn delete_pet(&self, auth_key: &AuthKey, pet_id: &str) -> Result<ApiResponse<()>, ClientError> {
        let req = self.client.build_delete_pet(auth_key, pet_id)?;
        Ok(self.client.parse_delete_pet(self.transport.execute(req)?)?)
    }
}
