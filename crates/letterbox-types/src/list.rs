use serde::{Deserialize, Serialize};

use crate::lenient::null_as_default;

/// A user-curated list found by `search_lists`.
///
/// `owner` and `slug` together address the list for `get_list_details`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListSearchResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub owner: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
}
