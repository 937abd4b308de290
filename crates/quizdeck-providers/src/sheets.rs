//! Google-Sheets CSV export source.
//!
//! Given a user-supplied sheet URL, derives the published CSV export endpoint
//! and fetches its body text. The parser consumes the resulting text; all
//! fetch mechanics stay in this module.

use anyhow::{Context, Result};

const DEFAULT_BASE_URL: &str = "https://docs.google.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Extract the document id segment between `/d/` and the following `/`.
///
/// Mirrors the recognizable-URL rule: ids without a trailing path separator
/// are not recognized.
pub fn sheet_id(url: &str) -> Option<&str> {
    let start = url.find("/d/")? + 3;
    let rest = &url[start..];
    let end = rest.find('/')?;
    if end == 0 {
        return None;
    }
    Some(&rest[..end])
}

/// Build the CSV export endpoint for a document id.
pub fn csv_export_url(base_url: &str, id: &str) -> String {
    format!("{base_url}/spreadsheets/d/{id}/gviz/tq?tqx=out:csv")
}

/// Fetches published sheet exports.
pub struct SheetClient {
    base_url: String,
    client: reqwest::Client,
}

impl Default for SheetClient {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SheetClient {
    pub fn new(base_url: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client,
        }
    }

    /// Fetch the CSV export behind a sheet URL and return its body text.
    pub async fn fetch_csv(&self, sheet_url: &str) -> Result<String> {
        if !sheet_url.contains("/spreadsheets/") {
            anyhow::bail!("not a spreadsheet URL: {sheet_url}");
        }
        let id = sheet_id(sheet_url)
            .with_context(|| format!("no document id found in URL: {sheet_url}"))?;

        let export_url = csv_export_url(&self.base_url, id);
        tracing::debug!(%export_url, "fetching sheet export");

        let response = self
            .client
            .get(&export_url)
            .send()
            .await
            .context("failed to reach the spreadsheet host")?;

        if !response.status().is_success() {
            anyhow::bail!(
                "sheet export returned HTTP {}; make sure the sheet is shared with \
                 'anyone with the link'",
                response.status().as_u16()
            );
        }

        response.text().await.context("failed to read sheet export body")
    }
}
