use common::{AggregatorError, Result, SheetRow};
use reqwest::Url;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

pub const DRIVE_API_URL: &str = "https://www.googleapis.com/drive/v3";
pub const SHEETS_API_URL: &str = "https://sheets.googleapis.com/v4";

const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";

/// Base URLs for the two Google APIs involved in an append.
#[derive(Debug, Clone)]
pub struct GoogleEndpoints {
    pub drive: String,
    pub sheets: String,
}

impl Default for GoogleEndpoints {
    fn default() -> Self {
        Self {
            drive: DRIVE_API_URL.to_string(),
            sheets: SHEETS_API_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
}

#[derive(Debug, Deserialize)]
struct Spreadsheet {
    #[serde(default)]
    sheets: Vec<Sheet>,
}

#[derive(Debug, Deserialize)]
struct Sheet {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

async fn check(response: reqwest::Response, action: &str) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(AggregatorError::sheet(format!("{action}: {status}: {body}")))
}

fn request_failed(action: &str) -> impl Fn(reqwest::Error) -> AggregatorError + '_ {
    move |e| AggregatorError::sheet(format!("{action}: {e}"))
}

/// The first sheet of a spreadsheet, opened with an authorized token.
#[derive(Debug, Clone)]
pub struct Worksheet {
    http: reqwest::Client,
    sheets_url: String,
    token: String,
    spreadsheet_id: String,
    title: String,
}

impl Worksheet {
    /// Resolves `spreadsheet_name` through Drive and picks its first sheet.
    pub async fn open_first(
        http: reqwest::Client,
        endpoints: &GoogleEndpoints,
        token: String,
        spreadsheet_name: &str,
    ) -> Result<Self> {
        let spreadsheet_id =
            find_spreadsheet_id(&http, &endpoints.drive, &token, spreadsheet_name).await?;
        let title =
            first_sheet_title(&http, &endpoints.sheets, &token, &spreadsheet_id, spreadsheet_name)
                .await?;
        debug!(spreadsheet = spreadsheet_name, sheet = %title, "Opened Google Sheet");

        Ok(Self {
            http,
            sheets_url: endpoints.sheets.clone(),
            token,
            spreadsheet_id,
            title,
        })
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Appends all rows in one `values.append` call, parsed as if typed.
    pub async fn append_rows(&self, rows: Vec<SheetRow>) -> Result<()> {
        let values: Vec<Vec<String>> = rows.into_iter().map(SheetRow::into_cells).collect();
        let url = self.append_url()?;

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .query(&[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&json!({ "majorDimension": "ROWS", "values": values }))
            .send()
            .await
            .map_err(request_failed("append rows"))?;

        check(response, "append rows").await?;
        Ok(())
    }

    fn append_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.sheets_url)
            .map_err(|e| AggregatorError::sheet(format!("invalid Sheets API url: {e}")))?;
        // A1 notation quotes the title and doubles embedded quotes.
        let range = format!("'{}':append", self.title.replace('\'', "''"));
        url.path_segments_mut()
            .map_err(|_| AggregatorError::sheet("Sheets API url cannot be a base"))?
            .pop_if_empty()
            .extend([
                "spreadsheets",
                self.spreadsheet_id.as_str(),
                "values",
                range.as_str(),
            ]);
        Ok(url)
    }
}

async fn find_spreadsheet_id(
    http: &reqwest::Client,
    drive_url: &str,
    token: &str,
    name: &str,
) -> Result<String> {
    let q = format!(
        "name = '{}' and mimeType = '{SPREADSHEET_MIME_TYPE}' and trashed = false",
        name.replace('\\', "\\\\").replace('\'', "\\'")
    );

    let response = http
        .get(format!("{drive_url}/files"))
        .bearer_auth(token)
        .query(&[
            ("q", q.as_str()),
            ("fields", "files(id,name)"),
            ("includeItemsFromAllDrives", "true"),
            ("supportsAllDrives", "true"),
        ])
        .send()
        .await
        .map_err(request_failed("list spreadsheets"))?;

    let list: FileList = check(response, "list spreadsheets")
        .await?
        .json()
        .await
        .map_err(request_failed("list spreadsheets"))?;

    list.files
        .into_iter()
        .next()
        .map(|file| file.id)
        .ok_or_else(|| AggregatorError::sheet(format!("spreadsheet not found: {name}")))
}

async fn first_sheet_title(
    http: &reqwest::Client,
    sheets_url: &str,
    token: &str,
    spreadsheet_id: &str,
    name: &str,
) -> Result<String> {
    let response = http
        .get(format!("{sheets_url}/spreadsheets/{spreadsheet_id}"))
        .bearer_auth(token)
        .query(&[("fields", "sheets.properties")])
        .send()
        .await
        .map_err(request_failed("open spreadsheet"))?;

    let spreadsheet: Spreadsheet = check(response, "open spreadsheet")
        .await?
        .json()
        .await
        .map_err(request_failed("open spreadsheet"))?;

    spreadsheet
        .sheets
        .into_iter()
        .next()
        .map(|sheet| sheet.properties.title)
        .ok_or_else(|| AggregatorError::sheet(format!("spreadsheet not found: {name} has no sheets")))
}
