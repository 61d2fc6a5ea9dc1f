//! Records exchanged with the admin API

use serde::{de, Deserialize, Deserializer, Serialize};

/// Account as listed by `GET /api/admin/users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id", deserialize_with = "record_id")]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub active: bool,
}

impl User {
    pub fn status_label(&self) -> &'static str {
        if self.active {
            "Active"
        } else {
            "Inactive"
        }
    }

    /// What toggling this user will do.
    pub fn action_label(&self) -> &'static str {
        if self.active {
            "Deactivate"
        } else {
            "Activate"
        }
    }
}

/// Catalogue entry as listed by `GET /api/admin/products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(alias = "_id", deserialize_with = "record_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: f64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub company: String,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub available: bool,
}

impl Product {
    pub fn available_label(&self) -> &'static str {
        if self.available {
            "Yes"
        } else {
            "No"
        }
    }
}

/// Body of `POST /api/products`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub image: String,
    pub description: String,
    pub category: String,
    pub company: String,
}

/// Result of a creation call that reached the server and got a 2xx.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    Created,
    Refused { message: Option<String> },
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateProductResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl From<CreateProductResponse> for CreateOutcome {
    fn from(response: CreateProductResponse) -> Self {
        if response.success {
            CreateOutcome::Created
        } else {
            CreateOutcome::Refused {
                message: response.message,
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ActiveUpdate {
    pub active: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct AvailabilityUpdate {
    pub available: bool,
}

// Some backends emit numeric ids.
fn record_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

/// `null` reads as `false`.
fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}

/// Numbers, numeric strings, or `null` (read as 0).
fn lenient_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Number(f64),
        Text(String),
    }

    match Option::<RawPrice>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(RawPrice::Number(price)) => Ok(price),
        Some(RawPrice::Text(text)) => text
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid price {:?}", text))),
    }
}
