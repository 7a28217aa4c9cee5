use std::fmt;

use url::Url;

use crate::error::ValidationError;

/// A URI to a photograph of a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    id: Option<i64>,
    property_id: Option<i64>,
    uri: String,
}

impl Photo {
    /// Builds a photo from an absolute URI.
    ///
    /// Any absolute URI is accepted; web and file URIs must spell out their
    /// `//` authority marker. The original string is kept as given.
    pub fn new(uri: &str) -> Result<Self, ValidationError> {
        if !is_absolute_uri(uri) {
            return Err(ValidationError::InvalidPhotoUri(uri.to_string()));
        }

        Ok(Self {
            id: None,
            property_id: None,
            uri: uri.to_string(),
        })
    }

    pub(crate) fn persisted(mut self, id: i64, property_id: i64) -> Self {
        self.id = Some(id);
        self.property_id = Some(property_id);
        self
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn property_id(&self) -> Option<i64> {
        self.property_id
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }
}

impl fmt::Display for Photo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

fn is_absolute_uri(uri: &str) -> bool {
    match Url::parse(uri) {
        // `Url::parse` repairs `http:/host` into `http://host` for special
        // schemes, so their authority marker is checked on the raw input.
        Ok(url) if url.is_special() => uri
            .split_once(':')
            .is_some_and(|(_, rest)| rest.starts_with("//")),
        Ok(_) => true,
        Err(_) => false,
    }
}
