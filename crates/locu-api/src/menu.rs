use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::{
    api_interfaces::venue,
    money::{Money, MoneyError},
};

/// Subsection content tag for free-text annotations.
const SECTION_TEXT: &str = "SECTION_TEXT";
/// Subsection content tag for menu items.
const ITEM: &str = "ITEM";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuError {
    #[error("invalid price for item `{item}`: {source}")]
    InvalidItemPrice {
        item: String,
        #[source]
        source: MoneyError,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Menu {
    pub name: String,
    pub sections: Vec<MenuSection>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MenuSection {
    pub name: String,
    pub subsections: Vec<MenuSubsection>,
}

/// A subsection keeps its free-text annotations and its items apart.
///
/// Order is preserved within `texts` and within `items`, but not how the two
/// were interleaved in the feed.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuSubsection {
    pub name: String,
    pub texts: Vec<String>,
    pub items: Vec<MenuItem>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MenuItem {
    pub name: String,
    pub description: Option<String>,
    pub option_groups: Vec<MenuOptionGroup>,
    pub price: Money,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MenuOptionGroup {
    pub text: String,
    pub kind: OptionGroupKind,
    pub options: Vec<MenuOption>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MenuOption {
    pub name: String,
    pub price: Money,
}

/// Lower-cased form of an option group's `type` (`OPTION_ADD` becomes `option_add`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum OptionGroupKind {
    OptionAdd,
    OptionChoose,
    Other(String),
}

impl OptionGroupKind {
    pub fn from_provider(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "option_add" => Self::OptionAdd,
            "option_choose" => Self::OptionChoose,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::OptionAdd => "option_add",
            Self::OptionChoose => "option_choose",
            Self::Other(other) => other,
        }
    }
}

impl Serialize for OptionGroupKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl TryFrom<venue::Menu> for Menu {
    type Error = MenuError;

    fn try_from(raw: venue::Menu) -> Result<Self, MenuError> {
        let sections = raw
            .sections
            .unwrap_or_default()
            .into_iter()
            .map(MenuSection::try_from)
            .collect::<Result<_, _>>()?;
        Ok(Self {
            name: raw.menu_name.unwrap_or_default(),
            sections,
        })
    }
}

impl TryFrom<venue::Section> for MenuSection {
    type Error = MenuError;

    fn try_from(raw: venue::Section) -> Result<Self, MenuError> {
        let subsections = raw
            .subsections
            .unwrap_or_default()
            .into_iter()
            .map(MenuSubsection::try_from)
            .collect::<Result<_, _>>()?;
        Ok(Self {
            name: raw.section_name.unwrap_or_default(),
            subsections,
        })
    }
}

impl TryFrom<venue::Subsection> for MenuSubsection {
    type Error = MenuError;

    fn try_from(raw: venue::Subsection) -> Result<Self, MenuError> {
        let mut texts = Vec::new();
        let mut items = Vec::new();
        for content in raw.contents.unwrap_or_default() {
            match content.kind.as_deref() {
                Some(SECTION_TEXT) => texts.push(content.text.unwrap_or_default()),
                Some(ITEM) => items.push(MenuItem::try_from(content)?),
                _ => {}
            }
        }
        Ok(Self {
            name: raw.subsection_name.unwrap_or_default(),
            texts,
            items,
        })
    }
}

impl TryFrom<venue::Content> for MenuItem {
    type Error = MenuError;

    fn try_from(raw: venue::Content) -> Result<Self, MenuError> {
        let name = raw.name.unwrap_or_default();
        let price = match Money::parse_required(raw.price.as_ref()) {
            Ok(price) => price,
            Err(source) => return Err(MenuError::InvalidItemPrice { item: name, source }),
        };
        Ok(Self {
            option_groups: raw
                .option_groups
                .unwrap_or_default()
                .into_iter()
                .map(MenuOptionGroup::from)
                .collect(),
            name,
            description: raw.description,
            price,
        })
    }
}

impl From<venue::OptionGroup> for MenuOptionGroup {
    fn from(raw: venue::OptionGroup) -> Self {
        Self {
            text: raw.text.unwrap_or_default(),
            kind: OptionGroupKind::from_provider(raw.kind.as_deref().unwrap_or_default()),
            options: raw
                .options
                .unwrap_or_default()
                .into_iter()
                .map(MenuOption::from)
                .collect(),
        }
    }
}

impl From<venue::MenuOption> for MenuOption {
    fn from(raw: venue::MenuOption) -> Self {
        Self {
            name: raw.name.unwrap_or_default(),
            price: Money::parse_or_zero(raw.price.as_ref()),
        }
    }
}

impl Menu {
    /// Flatten to `{section name: {subsection name: [item, ...]}}`.
    ///
    /// Sections or subsections sharing a name overwrite one another, and
    /// subsection texts are not carried over.
    pub fn to_hash(&self) -> Value {
        let mut sections = Map::new();
        for section in &self.sections {
            let mut subsections = Map::new();
            for subsection in &section.subsections {
                let items = subsection.items.iter().map(MenuItem::to_hash).collect();
                subsections.insert(subsection.name.clone(), Value::Array(items));
            }
            sections.insert(section.name.clone(), Value::Object(subsections));
        }
        Value::Object(sections)
    }
}

impl MenuItem {
    pub fn to_hash(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "price": self.price,
            "option_groups": self.option_groups.iter().map(MenuOptionGroup::to_hash).collect::<Vec<_>>(),
        })
    }
}

impl MenuOptionGroup {
    pub fn to_hash(&self) -> Value {
        json!({
            "text": self.text,
            "type": self.kind,
            "options": self
                .options
                .iter()
                .map(|option| json!({ "name": option.name, "price": option.price }))
                .collect::<Vec<_>>(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde::Deserialize;

    fn raw_menu(value: Value) -> venue::Menu {
        venue::Menu::deserialize(value).unwrap()
    }

    fn breakfast_menu() -> Value {
        json!({
            "menu_name": "Menu",
            "sections": [{
                "section_name": "Breakfast Fare",
                "subsections": [{
                    "subsection_name": "",
                    "contents": [
                        {"text": "Served Saturdays, Sundays 8 a.m.- 1 p.m.", "type": "SECTION_TEXT"},
                        {"description": "Three fried eggs", "name": "A breakfast", "option_groups": [], "price": "10.95", "type": "ITEM"},
                        {"description": "Three eggs and hash browns, served with toast and jelly.", "name": "Eggs Your Way", "option_groups": [
                            {"options": [
                                {"name": "Bacon", "price": "+1.50"},
                                {"name": "Sausage", "price": "+1.50"}
                            ], "text": "Meat", "type": "OPTION_ADD"}
                        ], "price": "7.25", "type": "ITEM"}
                    ]
                }]
            }]
        })
    }

    #[test]
    fn build_full_tree() {
        // Act
        let menu = Menu::try_from(raw_menu(breakfast_menu())).unwrap();

        // Assert
        assert_eq!(menu.name, "Menu");
        assert_eq!(menu.sections.len(), 1);
        let section = &menu.sections[0];
        assert_eq!(section.name, "Breakfast Fare");
        assert_eq!(section.subsections.len(), 1);
        let subsection = &section.subsections[0];
        assert!(subsection.name.is_empty());
        assert_eq!(
            subsection.texts,
            vec!["Served Saturdays, Sundays 8 a.m.- 1 p.m.".to_string()]
        );
        assert_eq!(subsection.items.len(), 2);

        let first = &subsection.items[0];
        assert_eq!(first.name, "A breakfast");
        assert_eq!(first.description.as_deref(), Some("Three fried eggs"));
        assert!(first.option_groups.is_empty());
        assert_eq!(first.price.amount(), dec!(10.95));

        let second = &subsection.items[1];
        assert_eq!(second.price.amount(), dec!(7.25));
        assert_eq!(second.option_groups.len(), 1);
        let group = &second.option_groups[0];
        assert_eq!(group.text, "Meat");
        assert_eq!(group.kind, OptionGroupKind::OptionAdd);
        assert_eq!(group.options.len(), 2);
        assert_eq!(group.options[0].name, "Bacon");
        assert_eq!(group.options[0].price.amount(), dec!(1.50));
        assert_eq!(group.options[1].name, "Sausage");
        assert_eq!(group.options[1].price.amount(), dec!(1.50));
    }

    #[test]
    fn contents_partition_keeps_order_within_each_list() {
        let raw = venue::Subsection::deserialize(json!({
            "subsection_name": "Sides",
            "contents": [
                {"type": "ITEM", "name": "Fries", "price": "3.00"},
                {"type": "SECTION_TEXT", "text": "first"},
                {"type": "ITEM", "name": "Salad", "price": "4.00"},
                {"type": "SECTION_TEXT", "text": "second"},
                {"type": "IMAGE", "url": "http://example.com/x.png"},
                {"name": "untagged"}
            ]
        }))
        .unwrap();

        let subsection = MenuSubsection::try_from(raw).unwrap();

        assert_eq!(subsection.texts, vec!["first", "second"]);
        let names: Vec<_> = subsection.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Fries", "Salad"]);
    }

    #[test]
    fn missing_nested_arrays_are_empty() {
        let menu = Menu::try_from(raw_menu(json!({
            "menu_name": "Dinner",
            "sections": [
                {"section_name": "No subsections"},
                {"section_name": "Empty", "subsections": [
                    {"subsection_name": "No contents"},
                    {"subsection_name": "Item", "contents": [
                        {"type": "ITEM", "name": "Plain", "price": "1"},
                        {"type": "ITEM", "name": "Grouped", "price": "2", "option_groups": [
                            {"text": "Size", "type": "OPTION_CHOOSE"}
                        ]}
                    ]}
                ]}
            ]
        })))
        .unwrap();

        assert!(menu.sections[0].subsections.is_empty());
        let subsections = &menu.sections[1].subsections;
        assert!(subsections[0].items.is_empty());
        assert!(subsections[0].texts.is_empty());
        assert!(subsections[1].items[0].option_groups.is_empty());
        let group = &subsections[1].items[1].option_groups[0];
        assert_eq!(group.kind, OptionGroupKind::OptionChoose);
        assert!(group.options.is_empty());

        let bare = Menu::try_from(raw_menu(json!({}))).unwrap();
        assert!(bare.name.is_empty());
        assert!(bare.sections.is_empty());
    }

    #[test]
    fn item_without_price_is_error() {
        let raw = venue::Content::deserialize(json!({"type": "ITEM", "name": "Mystery"})).unwrap();

        let result = MenuItem::try_from(raw);

        assert_eq!(
            result,
            Err(MenuError::InvalidItemPrice {
                item: "Mystery".to_string(),
                source: MoneyError::Missing,
            })
        );
    }

    #[test]
    fn item_with_bad_price_fails_the_whole_menu() {
        let mut value = breakfast_menu();
        value["sections"][0]["subsections"][0]["contents"][1]["price"] = json!("market price");

        let result = Menu::try_from(raw_menu(value));

        assert!(matches!(
            result,
            Err(MenuError::InvalidItemPrice {
                source: MoneyError::Invalid(_),
                ..
            })
        ));
    }

    #[test]
    fn option_without_price_is_zero() {
        let raw = venue::OptionGroup::deserialize(json!({
            "text": "Extras",
            "type": "Option_Add",
            "options": [{"name": "Napkins"}, {"name": "Ketchup", "price": null}, {"name": "Mayo", "price": ""}]
        }))
        .unwrap();

        let group = MenuOptionGroup::from(raw);

        assert_eq!(group.kind, OptionGroupKind::OptionAdd);
        assert!(group.options.iter().all(|option| option.price == Money::ZERO));
    }

    #[test]
    fn unknown_group_type_is_lower_cased() {
        assert_eq!(
            OptionGroupKind::from_provider("OPTION_REMOVE"),
            OptionGroupKind::Other("option_remove".to_string())
        );
        assert_eq!(
            OptionGroupKind::from_provider("OPTION_REMOVE").as_str(),
            "option_remove"
        );
    }

    #[test]
    fn to_hash_flattens_by_name() {
        let menu = Menu::try_from(raw_menu(breakfast_menu())).unwrap();

        let hash = menu.to_hash();

        let items = hash["Breakfast Fare"][""].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["name"], "A breakfast");
        assert_eq!(items[0]["price"], "10.95");
        assert_eq!(items[1]["price"], "7.25");
        let group = &items[1]["option_groups"][0];
        assert_eq!(group["text"], "Meat");
        assert_eq!(group["type"], "option_add");
        assert_eq!(group["options"][0], json!({"name": "Bacon", "price": "1.50"}));
    }

    #[test]
    fn to_hash_duplicate_section_names_overwrite() {
        let menu = Menu {
            name: "Menu".to_string(),
            sections: vec![
                MenuSection {
                    name: "Drinks".to_string(),
                    subsections: vec![MenuSubsection {
                        name: "Hot".to_string(),
                        texts: vec![],
                        items: vec![],
                    }],
                },
                MenuSection {
                    name: "Drinks".to_string(),
                    subsections: vec![MenuSubsection {
                        name: "Cold".to_string(),
                        texts: vec![],
                        items: vec![],
                    }],
                },
            ],
        };

        let hash = menu.to_hash();

        let sections = hash.as_object().unwrap();
        assert_eq!(sections.len(), 1);
        assert!(sections["Drinks"].get("Cold").is_some());
        assert!(sections["Drinks"].get("Hot").is_none());
    }
}
