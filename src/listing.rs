use serde::{Deserialize, Serialize};

use crate::config::join_origin;

/// One property listing as the backend serializes it. Search results from a
/// chat turn and catalog rows from the listings store share this shape; the
/// catalog rows additionally carry `folder_path` once a dossier exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub bedrooms: u32,
    #[serde(default)]
    pub bathrooms: f64,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub currency_symbol: Option<String>,
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default)]
    pub pet_friendly: Option<bool>,
    #[serde(default)]
    pub cloudinary_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub screenshot_path: Option<String>,
    #[serde(default)]
    pub folder_path: Option<String>,
}

/// Where a listing's photo comes from, in strict priority order. Hosted and
/// Direct URLs are already fully qualified; only Screenshot paths are
/// relative to the API origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Hosted(String),
    Direct(String),
    Screenshot(String),
    Missing,
}

impl ImageSource {
    pub fn resolve(&self, origin: &str) -> Option<String> {
        match self {
            ImageSource::Hosted(url) | ImageSource::Direct(url) => Some(url.clone()),
            ImageSource::Screenshot(path) => Some(join_origin(origin, path)),
            ImageSource::Missing => None,
        }
    }
}

impl Listing {
    /// Display currency symbol; the backend stamps one per search but older
    /// rows may lack it.
    pub fn symbol(&self) -> &str {
        self.currency_symbol
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("$")
    }

    /// Price as a plain decimal string, no separators: "2500", "2500.5".
    pub fn price_plain(&self) -> String {
        if self.price.fract() == 0.0 {
            format!("{}", self.price as i64)
        } else {
            format!("{}", self.price)
        }
    }

    /// The formatted rent string shown on cards: "$2,500/mo".
    pub fn display_price(&self) -> String {
        format!("{}{}/mo", self.symbol(), group_thousands(&self.price_plain()))
    }

    /// Case-insensitive free-text match across every field a user might type
    /// back at the card, including the rendered price in both its plain and
    /// formatted forms. Absent fields simply never match.
    pub fn matches_filter(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        if q.is_empty() {
            return true;
        }

        let fields = [
            Some(self.title.as_str()),
            Some(self.address.as_str()),
            Some(self.description.as_str()),
            self.currency_symbol.as_deref(),
            self.currency_code.as_deref(),
        ];
        if fields
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&q))
        {
            return true;
        }

        self.bedrooms.to_string().contains(&q)
            || self.price_plain().contains(&q)
            || self.display_price().to_lowercase().contains(&q)
    }

    pub fn image_source(&self) -> ImageSource {
        if let Some(url) = non_empty(self.cloudinary_url.as_deref()) {
            return ImageSource::Hosted(url.to_string());
        }
        if let Some(url) = non_empty(self.image_url.as_deref()) {
            return ImageSource::Direct(url.to_string());
        }
        if let Some(path) = non_empty(self.screenshot_path.as_deref()) {
            return ImageSource::Screenshot(path.to_string());
        }
        ImageSource::Missing
    }

    /// Link to the generated draft lease, present iff a dossier folder exists.
    pub fn lease_url(&self, origin: &str) -> Option<String> {
        self.document_url(origin, "lease_draft.txt")
    }

    /// Link to the generated info sheet, present iff a dossier folder exists.
    pub fn info_url(&self, origin: &str) -> Option<String> {
        self.document_url(origin, "info.txt")
    }

    fn document_url(&self, origin: &str, file: &str) -> Option<String> {
        non_empty(self.folder_path.as_deref())
            .map(|folder| join_origin(origin, &format!("{}/{}", folder, file)))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// Insert thousands separators into the integer part of a plain decimal
/// string: "2500" -> "2,500", "2500.5" -> "2,500.5".
fn group_thousands(plain: &str) -> String {
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (plain, None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in digits.iter().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*ch);
    }

    match frac_part {
        Some(frac) => format!("{}.{}", grouped, frac),
        None => grouped,
    }
}
