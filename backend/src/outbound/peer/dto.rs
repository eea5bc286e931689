//! DTOs for decoding peer service responses.

use serde::Deserialize;

/// Subset of the peer's user representation needed for age lookups.
///
/// Other fields are ignored so the peer can evolve its payload freely.
#[derive(Debug, Deserialize)]
pub(super) struct PeerUserDto {
    pub(super) age: Option<f64>,
}

impl PeerUserDto {
    pub(super) fn into_age(self) -> Result<f64, String> {
        match self.age {
            Some(age) if age.is_finite() => Ok(age),
            Some(age) => Err(format!("user age {age} is not a finite number")),
            None => Err("user payload has no age".to_owned()),
        }
    }
}
