//! Property listings: the hydrated record, the create/update draft and the
//! catalogue search filters.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::id::PropertyId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListingType {
    #[serde(rename = "For Sale")]
    ForSale,
    #[serde(rename = "For Rent")]
    ForRent,
    #[serde(other)]
    Other,
}

impl ListingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingType::ForSale => "For Sale",
            ListingType::ForRent => "For Rent",
            ListingType::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    Apartment,
    House,
    Villa,
    Townhouse,
    Studio,
    Penthouse,
    Commercial,
    #[serde(other)]
    Other,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "Apartment",
            PropertyType::House => "House",
            PropertyType::Villa => "Villa",
            PropertyType::Townhouse => "Townhouse",
            PropertyType::Studio => "Studio",
            PropertyType::Penthouse => "Penthouse",
            PropertyType::Commercial => "Commercial",
            PropertyType::Other => "Other",
        }
    }
}

/// Contact details of the listing owner, as embedded by the detail endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyOwner {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A fully hydrated property, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    pub id: PropertyId,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_type: Option<ListingType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<PropertyOwner>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

impl PropertyRecord {
    /// A record with only the identifying fields set; handy for fakes.
    pub fn new(id: PropertyId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            price: 0.0,
            location: String::new(),
            bedrooms: None,
            bathrooms: None,
            area: None,
            property_type: None,
            listing_type: None,
            image_url: None,
            images: Vec::new(),
            owner: None,
            created_at: None,
        }
    }

    /// Price as shown on listing cards: `$1,250,000` or `$1,200/month` for rentals.
    pub fn price_label(&self) -> String {
        let amount = format_amount(self.price);
        match self.listing_type {
            Some(ListingType::ForRent) => format!("${amount}/month"),
            _ => format!("${amount}"),
        }
    }

    /// Description excerpt of at most `max_chars` characters.
    pub fn summary(&self, max_chars: usize) -> String {
        let Some(description) = self.description.as_deref().filter(|d| !d.trim().is_empty()) else {
            return "No description available".to_string();
        };

        if description.chars().count() <= max_chars {
            return description.to_string();
        }

        let excerpt: String = description.chars().take(max_chars).collect();
        format!("{}...", excerpt.trim_end())
    }

    /// Main image, falling back to the first gallery entry.
    pub fn cover_image(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .or_else(|| self.images.first().map(String::as_str))
    }
}

impl Entity for PropertyRecord {
    type Id = PropertyId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Thousands-grouped amount; fractional values keep two decimals.
fn format_amount(value: f64) -> String {
    let formatted = if value.fract() != 0.0 {
        format!("{:.2}", value.abs())
    } else {
        format!("{:.0}", value.abs())
    };
    let (digits, fraction) = match formatted.split_once('.') {
        Some((digits, fraction)) => (digits, Some(fraction)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(formatted.len() + digits.len() / 3 + 1);
    if value < 0.0 {
        grouped.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}
