//! New-product form buffer and its validation pipeline

use shop_admin_client::{NewProduct, Url};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Price,
    Image,
    Description,
    Category,
    Company,
}

impl DraftField {
    /// Form order.
    pub const ALL: [DraftField; 6] = [
        DraftField::Name,
        DraftField::Price,
        DraftField::Image,
        DraftField::Category,
        DraftField::Company,
        DraftField::Description,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DraftField::Name => "Product Name",
            DraftField::Price => "Price",
            DraftField::Image => "Image URL",
            DraftField::Description => "Description",
            DraftField::Category => "Category",
            DraftField::Company => "Company",
        }
    }
}

/// Failure messages double as the alert text shown to the operator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("Please fill in all fields")]
    MissingField(DraftField),

    #[error("Please enter a valid price")]
    InvalidPrice,

    #[error("Please enter a valid image URL")]
    InvalidImageUrl,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub price: String,
    pub image: String,
    pub description: String,
    pub category: String,
    pub company: String,
}

impl ProductDraft {
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::Price => &self.price,
            DraftField::Image => &self.image,
            DraftField::Description => &self.description,
            DraftField::Category => &self.category,
            DraftField::Company => &self.company,
        }
    }

    pub fn set(&mut self, field: DraftField, value: String) {
        let slot = match field {
            DraftField::Name => &mut self.name,
            DraftField::Price => &mut self.price,
            DraftField::Image => &mut self.image,
            DraftField::Description => &mut self.description,
            DraftField::Category => &mut self.category,
            DraftField::Company => &mut self.company,
        };
        *slot = value;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Stops at the first failing check: presence, then price, then image.
    /// Text fields are sent as entered; only price and URL parsing trim.
    pub fn validate(&self) -> Result<NewProduct, DraftError> {
        if let Some(field) = DraftField::ALL
            .into_iter()
            .find(|field| self.get(*field).is_empty())
        {
            return Err(DraftError::MissingField(field));
        }

        let price = parse_price(&self.price).ok_or(DraftError::InvalidPrice)?;

        if !is_image_url(&self.image) {
            return Err(DraftError::InvalidImageUrl);
        }

        Ok(NewProduct {
            name: self.name.clone(),
            price,
            image: self.image.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            company: self.company.clone(),
        })
    }
}

fn parse_price(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite() && *price > 0.0)
}

// Scheme and host are both required.
fn is_image_url(raw: &str) -> bool {
    Url::parse(raw.trim())
        .map(|url| url.has_host())
        .unwrap_or(false)
}
