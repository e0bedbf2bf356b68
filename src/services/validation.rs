//! Checks applied to `PUT /watchlist` payloads before anything is written.

use serde_json::Value;

use crate::models::MAX_WATCHLIST_ITEM_LENGTH;

/// Reasons a decoded request body cannot be stored as a watchlist
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("The request body must be a JSON list of strings.")]
    NotAListOfStrings,

    #[error("The watchlist item {item:?} is longer than {max} characters.")]
    ItemTooLong { item: String, max: usize },

    #[error("The watchlist item {item:?} contains a NUL character.")]
    ItemContainsNul { item: String },
}

/// Returns whether `value` is exactly a JSON array of JSON strings.
///
/// Objects are not accepted in place of arrays, even when their values are
/// all strings.
pub fn is_list_of_strings(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.iter().all(Value::is_string),
        _ => false,
    }
}

/// Returns whether a watchlist item fits in the `contents` column.
///
/// Length is measured in Unicode code points, not UTF-8 bytes.
pub fn is_short_enough(item: &str) -> bool {
    item.chars().count() <= MAX_WATCHLIST_ITEM_LENGTH
}

/// Returns whether a watchlist item is free of U+0000.
///
/// PostgreSQL text columns cannot hold NUL, so such items are rejected up
/// front instead of failing inside the write transaction.
pub fn has_no_nul(item: &str) -> bool {
    !item.contains('\0')
}

/// Validates a decoded body and extracts the watchlist from it.
///
/// Items are checked in input order; the first item that is too long or
/// contains NUL determines the error.
pub fn validate_watchlist(value: Value) -> Result<Vec<String>, ValidationError> {
    if !is_list_of_strings(&value) {
        return Err(ValidationError::NotAListOfStrings);
    }

    let Value::Array(items) = value else {
        return Err(ValidationError::NotAListOfStrings);
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::String(item) if !is_short_enough(&item) => Err(ValidationError::ItemTooLong {
                item,
                max: MAX_WATCHLIST_ITEM_LENGTH,
            }),
            Value::String(item) if !has_no_nul(&item) => {
                Err(ValidationError::ItemContainsNul { item })
            }
            Value::String(item) => Ok(item),
            _ => Err(ValidationError::NotAListOfStrings),
        })
        .collect()
}
