mod api_interfaces;
mod api_key;
pub mod client;
pub mod constants;
mod deserializers;
pub mod error;
pub mod hours;
pub mod menu;
pub mod metadata;
pub mod money;
pub mod search;
mod util;
pub mod venue;

pub use api_key::ApiKey;
pub use client::{Client, ClientBuilder, Found, VenueIds};
pub use metadata::{VenueSearchMetadata, Venues};
pub use search::SearchConditions;
pub use venue::{LastUpdated, Venue};
