//! Response naming.

use serde::{Deserialize, Serialize};
use snack_core::ItemLabel;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Noun used for the JSON list and item keys (`snack` or `biscuit`).
    #[serde(default)]
    pub item_label: ItemLabel,
}
