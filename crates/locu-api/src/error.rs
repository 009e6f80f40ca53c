use crate::{menu::MenuError, search::SearchConditionsError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GetError {
    #[error("the request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("the response body could not be read: {0}")]
    ResponseBodyError(#[source] reqwest::Error),
    #[error("unable to parse the response body: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("base URL `{0}` cannot carry a path")]
    InvalidBaseUrl(String),
    #[error("the response body has no `objects` list")]
    MissingObjects,
    #[error("invalid search conditions: {0}")]
    InvalidConditions(#[from] SearchConditionsError),
    #[error("unable to translate response object: {0}")]
    TranslateError(#[from] VenueError),
}

#[derive(Debug, Error)]
pub enum VenueError {
    #[error("the venue body is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error(transparent)]
    Menu(#[from] MenuError),
}
