//! Request body encoders: urlencoded forms and `multipart/form-data`.
//!
//! Multipart payloads are produced by reqwest's blocking `Form` and drained
//! into memory, so the core still hands the caller plain bytes.

use std::io::Read;

use reqwest::blocking::multipart::{Form, Part};

use crate::error::ApiError;
use crate::types::PhotoUpload;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Encode `fields` as an `application/x-www-form-urlencoded` body.
pub fn encode_form<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Vec<u8> {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish()
        .into_bytes()
}

/// `multipart/form-data` payload under construction. The boundary is chosen
/// at random by reqwest.
#[derive(Debug)]
pub struct Multipart {
    form: Form,
}

impl Multipart {
    pub fn new() -> Self {
        Self { form: Form::new() }
    }

    pub fn boundary(&self) -> &str {
        self.form.boundary()
    }

    pub fn text(self, name: &str, value: &str) -> Self {
        Self {
            form: self.form.text(name.to_string(), value.to_string()),
        }
    }

    pub fn file(self, name: &str, photo: &PhotoUpload) -> Result<Self, ApiError> {
        let part = Part::bytes(photo.bytes.clone())
            .file_name(photo.file_name.clone())
            .mime_str(&photo.content_type)
            .map_err(|e| ApiError::InvalidPhoto(e.to_string()))?;
        Ok(Self {
            form: self.form.part(name.to_string(), part),
        })
    }

    /// Close the payload and return `(content_type, body)`.
    pub fn finish(self) -> Result<(String, Vec<u8>), ApiError> {
        let content_type = format!("multipart/form-data; boundary={}", self.form.boundary());
        let mut body = Vec::new();
        self.form
            .into_reader()
            .read_to_end(&mut body)
            .map_err(|e| ApiError::Multipart(e.to_string()))?;
        Ok((content_type, body))
    }
}

impl Default for Multipart {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|window| window == needle)
    }

    #[test]
    fn form_encoding_escapes_unicode_and_spaces() {
        let body = encode_form([("name", "Мурзик 2"), ("age", "5")]);
        assert_eq!(
            String::from_utf8(body).unwrap(),
            "name=%D0%9C%D1%83%D1%80%D0%B7%D0%B8%D0%BA+2&age=5"
        );
    }

    #[test]
    fn multipart_carries_text_and_file_parts() {
        let photo = PhotoUpload {
            file_name: "0.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: vec![0xff, 0xd8, 0xff],
        };
        let multipart = Multipart::new().text("name", "Rex").file("pet_photo", &photo).unwrap();
        let boundary = multipart.boundary().to_string();
        let (content_type, body) = multipart.finish().unwrap();

        assert_eq!(content_type, format!("multipart/form-data; boundary={boundary}"));
        assert!(body.starts_with(format!("--{boundary}\r\n").as_bytes()));
        assert!(body.ends_with(format!("--{boundary}--\r\n").as_bytes()));
        assert!(contains(&body, b"name=\"name\"\r\n\r\nRex\r\n"));
        assert!(contains(&body, b"filename=\"0.jpg\""));
        assert!(contains(&body, b"\r\n\r\n\xff\xd8\xff\r\n"));
    }

    #[test]
    fn boundaries_differ_per_payload() {
        assert_ne!(Multipart::new().boundary(), Multipart::new().boundary());
    }

    #[test]
    fn unparseable_content_type_is_rejected() {
        let photo = PhotoUpload {
            file_name: "0.jpg".to_string(),
            content_type: "not a mime".to_string(),
            bytes: Vec::new(),
        };
        let err = Multipart::new().file("pet_photo", &photo).unwrap_err();
        assert!(matches!(err, ApiError::InvalidPhoto(_)));
    }
}
