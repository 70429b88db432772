use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{FieldErrorKind, ValidationError};
use crate::fields::FieldReader;
use crate::id::Collection;

/// Number of artisans returned by a listing when the caller gives no limit.
pub const DEFAULT_LIST_LIMIT: u32 = 24;

/// Largest accepted listing limit.
pub const MAX_LIST_LIMIT: u32 = 1000;

/// A directory entry for a single artisan.
///
/// Immutable once created; the service exposes no update path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artisan {
    /// Artisan full name.
    pub name: String,
    /// Type of craft, e.g. `"handloom"` or `"pottery"`.
    pub craft_type: String,
    /// Region, city or state.
    pub region: String,
    /// Short bio.
    pub bio: Option<String>,
    /// Profile image URL.
    pub avatar_url: Option<String>,
    /// Image URLs for products, in display order. A stored `null` reads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub portfolio_images: Vec<String>,
    /// Phone or WhatsApp number.
    pub phone: Option<String>,
    /// Typical price range.
    pub price_range: Option<String>,
    /// Whether the artisan is featured on the home page.
    #[serde(default)]
    pub featured: bool,
}

impl Artisan {
    /// Validates an inbound JSON payload.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] listing every missing or mistyped field.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, ValidationError> {
        let mut r = FieldReader::new(value)?;
        let artisan = Self {
            name: r.required_str("name"),
            craft_type: r.required_str("craft_type"),
            region: r.required_str("region"),
            bio: r.optional_str("bio"),
            avatar_url: r.optional_str("avatar_url"),
            portfolio_images: r.string_list("portfolio_images"),
            phone: r.optional_str("phone"),
            price_range: r.optional_str("price_range"),
            featured: r.bool_or("featured", false),
        };
        r.finish(artisan)
    }
}

impl Collection for Artisan {
    const NAME: &'static str = "artisan";
}

/// Raw listing parameters as they arrive on the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtisanQuery {
    /// Craft type to match exactly.
    pub category: Option<String>,
    /// Region to match exactly.
    pub region: Option<String>,
    /// Featured flag to match. Accepts `true`/`false`, `1`/`0`, `yes`/`no`
    /// and `on`/`off`, in any case.
    #[serde(default, deserialize_with = "lenient_bool")]
    pub featured: Option<bool>,
    /// Maximum number of records to return.
    pub limit: Option<i64>,
}

/// A validated artisan listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtisanFilter {
    /// Match on `craft_type`.
    pub craft_type: Option<String>,
    /// Match on `region`.
    pub region: Option<String>,
    /// Match on `featured`.
    pub featured: Option<bool>,
    /// Upper bound on returned records.
    pub limit: u32,
}

impl ArtisanQuery {
    /// Normalizes the query into a filter.
    ///
    /// Empty `category` and `region` values mean "no constraint".
    ///
    /// # Errors
    /// Returns a [`ValidationError`] if `limit` is outside `1..=MAX_LIST_LIMIT`.
    pub fn validate(self) -> Result<ArtisanFilter, ValidationError> {
        let limit = match self.limit {
            None => DEFAULT_LIST_LIMIT,
            Some(n) => u32::try_from(n)
                .ok()
                .filter(|n| (1..=MAX_LIST_LIMIT).contains(n))
                .ok_or_else(|| {
                    ValidationError::single(
                        "limit",
                        FieldErrorKind::OutOfRange {
                            reason: format!("must be between 1 and {MAX_LIST_LIMIT}, got {n}"),
                        },
                    )
                })?,
        };
        Ok(ArtisanFilter {
            craft_type: self.category.filter(|s| !s.is_empty()),
            region: self.region.filter(|s| !s.is_empty()),
            featured: self.featured,
            limit,
        })
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "t" | "y" => Ok(Some(true)),
        "false" | "0" | "no" | "off" | "f" | "n" => Ok(Some(false)),
        _ => Err(serde::de::Error::invalid_value(
            serde::de::Unexpected::Str(&raw),
            &"a boolean such as true, false, 1, 0, yes, no, on or off",
        )),
    }
}
