use std::sync::Arc;

use anyhow::Context;
use snack_config::{SheetsConfig, SnackConfig};
use snack_sheets::SheetsClient;

use crate::state::AppState;

/// Build the Sheets client from configuration. Credentials are decoded in
/// memory and never written to disk.
pub fn build_source(config: &SheetsConfig) -> anyhow::Result<SheetsClient> {
    let secret =
        snack_secrets::select_source(&config.credentials, config.credentials_file.as_deref())
            .context(
                "no data source credentials; set GCREDS or SNACKBOT_SHEETS__CREDENTIALS_FILE",
            )?;
    let key = secret
        .load()
        .context("failed to load service-account key")?;

    tracing::info!(
        client = %key.client_email,
        spreadsheet = %config.spreadsheet_key,
        "using google sheets record source"
    );

    SheetsClient::from_config(config, &key).context("failed to build sheets client")
}

/// Assemble the router state for a configured deployment.
pub fn build_state(config: &SnackConfig) -> anyhow::Result<AppState> {
    let source = build_source(&config.sheets)?;
    Ok(AppState::new(Arc::new(source), config.api.item_label).with_debug(config.server.debug))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credentials_fail_with_guidance() {
        let err = build_source(&SheetsConfig::default())
            .err()
            .expect("should fail without credentials");
        assert!(format!("{err:#}").contains("GCREDS"));
    }

    #[test]
    fn malformed_credentials_fail() {
        let config = SheetsConfig {
            credentials: "%%%".into(),
            ..Default::default()
        };
        let err = build_source(&config).err().expect("should fail");
        assert!(format!("{err:#}").contains("service-account key"));
    }
}
