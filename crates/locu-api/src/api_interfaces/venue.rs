use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::deserializers::{
    lenient_bool, lenient_f64, lenient_list, lenient_open_hours, lenient_string,
};

// Every field is optional: the provider omits keys freely and older payloads
// carry fewer attributes than newer ones. A field of the wrong JSON type is
// treated as absent.

/// Raw venue data from API.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct Venue {
    #[serde(deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub website_url: Option<String>,
    #[serde(deserialize_with = "lenient_bool")]
    pub has_menu: Option<bool>,
    #[serde(deserialize_with = "lenient_list")]
    pub menus: Option<Vec<Menu>>,
    #[serde(deserialize_with = "lenient_string")]
    pub last_updated: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub resource_uri: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub street_address: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub locality: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub region: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub postal_code: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub country: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub lat: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub long: Option<f64>,
    #[serde(deserialize_with = "lenient_open_hours")]
    pub open_hours: Option<BTreeMap<String, Option<Vec<String>>>>,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub facebook_url: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub twitter_id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub factual_id: Option<String>,
}

/// Raw menu from API.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct Menu {
    #[serde(deserialize_with = "lenient_string")]
    pub menu_name: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub sections: Option<Vec<Section>>,
}

/// Raw menu section from API.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct Section {
    #[serde(deserialize_with = "lenient_string")]
    pub section_name: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub subsections: Option<Vec<Subsection>>,
}

/// Raw menu subsection from API.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct Subsection {
    #[serde(deserialize_with = "lenient_string")]
    pub subsection_name: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub contents: Option<Vec<Content>>,
}

/// Raw subsection entry from API, discriminated by `type`.
///
/// `SECTION_TEXT` entries only carry `text`; `ITEM` entries carry the rest.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct Content {
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub text: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,
    pub price: Option<Value>,
    #[serde(deserialize_with = "lenient_list")]
    pub option_groups: Option<Vec<OptionGroup>>,
}

/// Raw option group from API.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct OptionGroup {
    #[serde(deserialize_with = "lenient_string")]
    pub text: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub options: Option<Vec<MenuOption>>,
}

/// Raw option from API.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct MenuOption {
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    pub price: Option<Value>,
}
