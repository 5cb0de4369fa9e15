//! Steam Web API lookups.
//!
//! Two requests are made per run:
//! - `appdetails` on the store API, to turn the app ID into a game name for the report header
//! - `GetPublishedFileDetails`, a single form-encoded POST resolving every installed addon at once
//!
//! Responses are decoded into typed structs. Shape problems surface as
//! [`WorkshopError::MalformedResponse`]; transport failures and explicit failure
//! flags surface as [`WorkshopError::RemoteLookupFailed`]. A non-OK result code on
//! an individual addon is kept as [`MetadataResult::Error`] and does not fail the batch.

use crate::error::{Result, WorkshopError};
use crate::models::{AppConfig, ContentId, GameRecord, MetadataResult};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Instant;

/// Steam `EResult` value for success
pub const RESULT_OK: i32 = 1;

/// Remote catalog used by a session.
pub trait WorkshopApi {
    /// Look up the store name of a game.
    fn game_record(&self, app_id: u32) -> Result<GameRecord>;

    /// Resolve all addons in one request, returning one result per ID.
    fn file_details(&self, ids: &[ContentId]) -> Result<Vec<MetadataResult>>;
}

#[derive(Debug, Deserialize)]
struct AppDetailsEntry {
    success: bool,
    #[serde(default)]
    data: Option<AppData>,
}

#[derive(Debug, Deserialize)]
struct AppData {
    name: String,
}

#[derive(Debug, Deserialize)]
struct FileDetailsBody {
    #[serde(default)]
    response: Option<FileDetailsResponse>,
    #[serde(default)]
    status: Option<StatusEnvelope>,
}

#[derive(Debug, Deserialize)]
struct StatusEnvelope {
    code: i32,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FileDetailsResponse {
    #[serde(default)]
    result: Option<i32>,
    #[serde(default)]
    resultcount: Option<usize>,
    #[serde(default)]
    publishedfiledetails: Vec<PublishedFileDetails>,
}

#[derive(Debug, Deserialize)]
struct PublishedFileDetails {
    publishedfileid: String,
    result: i32,
    #[serde(default)]
    title: Option<String>,
}

/// Blocking Steam Web API client
pub struct SteamWebClient {
    http: reqwest::blocking::Client,
    api_key: String,
    app_details_url: String,
    file_details_url: String,
}

impl SteamWebClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key().to_string(),
            app_details_url: config.settings.app_details_url.clone(),
            file_details_url: config.settings.file_details_url.clone(),
        })
    }
}

impl WorkshopApi for SteamWebClient {
    fn game_record(&self, app_id: u32) -> Result<GameRecord> {
        tracing::debug!("Requesting app details for {}", app_id);
        let started = Instant::now();

        let body = self
            .http
            .get(&self.app_details_url)
            .query(&[("appids", app_id)])
            .send()?
            .error_for_status()?
            .text()?;

        tracing::debug!("App details received in {:?}", started.elapsed());
        parse_app_details(app_id, &body)
    }

    fn file_details(&self, ids: &[ContentId]) -> Result<Vec<MetadataResult>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut form: Vec<(String, String)> = Vec::with_capacity(ids.len() + 2);
        form.push(("key".to_string(), self.api_key.clone()));
        form.push(("itemcount".to_string(), ids.len().to_string()));
        for (index, id) in ids.iter().enumerate() {
            form.push((format!("publishedfileids[{}]", index), id.clone()));
        }

        tracing::debug!("Requesting file details for {} addons", ids.len());
        let started = Instant::now();

        let body = self
            .http
            .post(&self.file_details_url)
            .form(&form)
            .send()?
            .error_for_status()?
            .text()?;

        tracing::debug!("File details received in {:?}", started.elapsed());
        parse_file_details(ids, &body)
    }
}

/// Check that `results` holds exactly one entry for every requested ID.
///
/// # Errors
///
/// [`WorkshopError::MalformedResponse`] on a missing, unexpected or repeated ID.
pub fn verify_coverage(ids: &[ContentId], results: &[MetadataResult]) -> Result<()> {
    if results.len() != ids.len() {
        return Err(WorkshopError::MalformedResponse(format!(
            "requested {} addons but received {} entries",
            ids.len(),
            results.len()
        )));
    }

    let mut outstanding: HashMap<&str, usize> = HashMap::new();
    for id in ids {
        *outstanding.entry(id.as_str()).or_default() += 1;
    }

    for result in results {
        match outstanding.get_mut(result.id()) {
            Some(remaining) if *remaining > 0 => *remaining -= 1,
            _ => {
                return Err(WorkshopError::MalformedResponse(format!(
                    "unexpected or repeated addon ID {}",
                    result.id()
                )));
            }
        }
    }

    Ok(())
}

/// Decode an `appdetails` response for `app_id`.
pub fn parse_app_details(app_id: u32, body: &str) -> Result<GameRecord> {
    let entries: HashMap<String, AppDetailsEntry> = serde_json::from_str(body)
        .map_err(|e| WorkshopError::MalformedResponse(format!("app details: {}", e)))?;

    let entry = entries.get(&app_id.to_string()).ok_or_else(|| {
        WorkshopError::MalformedResponse(format!("app details carry no entry for game {}", app_id))
    })?;

    if !entry.success {
        return Err(WorkshopError::RemoteLookupFailed(format!(
            "lookup for game id {} was not successful",
            app_id
        )));
    }

    let data = entry.data.as_ref().ok_or_else(|| {
        WorkshopError::MalformedResponse(format!("app details for game {} carry no data", app_id))
    })?;

    Ok(GameRecord {
        app_id,
        display_name: data.name.clone(),
    })
}

/// Decode a `GetPublishedFileDetails` response for the requested `ids`.
///
/// The response must hold exactly one entry per requested ID. Results keep the
/// order the API returned them in.
pub fn parse_file_details(ids: &[ContentId], body: &str) -> Result<Vec<MetadataResult>> {
    let body: FileDetailsBody = serde_json::from_str(body)
        .map_err(|e| WorkshopError::MalformedResponse(format!("file details: {}", e)))?;

    if let Some(status) = body.status {
        if status.code != RESULT_OK {
            return Err(WorkshopError::RemoteLookupFailed(format!(
                "workshop lookup returned status code {}{}",
                status.code,
                status
                    .message
                    .map(|m| format!(" ({})", m))
                    .unwrap_or_default()
            )));
        }
    }

    let response = body.response.ok_or_else(|| {
        WorkshopError::MalformedResponse("file details carry no \"response\" object".to_string())
    })?;

    if let Some(code) = response.result {
        if code != RESULT_OK {
            return Err(WorkshopError::RemoteLookupFailed(format!(
                "workshop lookup returned result code {}",
                code
            )));
        }
    }

    let details = response.publishedfiledetails;
    if details.len() != ids.len() {
        return Err(WorkshopError::MalformedResponse(format!(
            "requested {} addons but received {} entries",
            ids.len(),
            details.len()
        )));
    }
    if let Some(count) = response.resultcount {
        if count != ids.len() {
            return Err(WorkshopError::MalformedResponse(format!(
                "requested {} addons but resultcount is {}",
                ids.len(),
                count
            )));
        }
    }

    let mut results = Vec::with_capacity(details.len());
    for item in details {
        if item.result == RESULT_OK {
            let title = item.title.ok_or_else(|| {
                WorkshopError::MalformedResponse(format!(
                    "addon {} succeeded without a title",
                    item.publishedfileid
                ))
            })?;
            results.push(MetadataResult::Ok {
                id: item.publishedfileid,
                title,
            });
        } else {
            tracing::warn!(
                "Addon {} returned Steam error code {}",
                item.publishedfileid,
                item.result
            );
            results.push(MetadataResult::Error {
                id: item.publishedfileid,
                result_code: item.result,
            });
        }
    }

    verify_coverage(ids, &results)?;
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<ContentId> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_app_details_success() {
        let body = r#"{"400":{"success":true,"data":{"type":"game","name":"Portal","steam_appid":400}}}"#;
        let record = parse_app_details(400, body).unwrap();
        assert_eq!(record.display_name, "Portal");
        assert_eq!(record.app_id, 400);
    }

    #[test]
    fn test_app_details_unsuccessful() {
        let body = r#"{"400":{"success":false}}"#;
        let err = parse_app_details(400, body).unwrap_err();
        assert!(matches!(err, WorkshopError::RemoteLookupFailed(_)));
    }

    #[test]
    fn test_app_details_wrong_key() {
        let body = r#"{"401":{"success":true,"data":{"name":"Other"}}}"#;
        let err = parse_app_details(400, body).unwrap_err();
        assert!(matches!(err, WorkshopError::MalformedResponse(_)));
    }

    #[test]
    fn test_app_details_null_body() {
        let err = parse_app_details(400, "null").unwrap_err();
        assert!(matches!(err, WorkshopError::MalformedResponse(_)));
    }

    #[test]
    fn test_file_details_mixed_results() {
        let body = r#"{"response":{"result":1,"resultcount":2,"publishedfiledetails":[
            {"publishedfileid":"111","result":1,"title":"Fancy Hat","consumer_app_id":400},
            {"publishedfileid":"222","result":26}
        ]}}"#;
        let results = parse_file_details(&ids(&["111", "222"]), body).unwrap();
        assert_eq!(
            results,
            vec![
                MetadataResult::Ok {
                    id: "111".to_string(),
                    title: "Fancy Hat".to_string()
                },
                MetadataResult::Error {
                    id: "222".to_string(),
                    result_code: 26
                },
            ]
        );
    }

    #[test]
    fn test_file_details_keeps_response_order() {
        let body = r#"{"response":{"publishedfiledetails":[
            {"publishedfileid":"222","result":1,"title":"B"},
            {"publishedfileid":"111","result":1,"title":"A"}
        ]}}"#;
        let results = parse_file_details(&ids(&["111", "222"]), body).unwrap();
        assert_eq!(results[0].id(), "222");
        assert_eq!(results[1].id(), "111");
    }

    #[test]
    fn test_file_details_count_mismatch() {
        let body = r#"{"response":{"publishedfiledetails":[
            {"publishedfileid":"111","result":1,"title":"A"}
        ]}}"#;
        let err = parse_file_details(&ids(&["111", "222"]), body).unwrap_err();
        assert!(matches!(err, WorkshopError::MalformedResponse(_)));
    }

    #[test]
    fn test_file_details_repeated_id() {
        let body = r#"{"response":{"publishedfiledetails":[
            {"publishedfileid":"111","result":1,"title":"A"},
            {"publishedfileid":"111","result":1,"title":"A"}
        ]}}"#;
        let err = parse_file_details(&ids(&["111", "222"]), body).unwrap_err();
        assert!(matches!(err, WorkshopError::MalformedResponse(_)));
    }

    #[test]
    fn test_file_details_error_envelope() {
        let body = r#"{"status":{"code":8,"message":"Invalid parameter"}}"#;
        let err = parse_file_details(&ids(&["111"]), body).unwrap_err();
        assert!(matches!(err, WorkshopError::RemoteLookupFailed(_)));

        let body = r#"{"response":{"result":9,"resultcount":0,"publishedfiledetails":[]}}"#;
        let err = parse_file_details(&ids(&["111"]), body).unwrap_err();
        assert!(matches!(err, WorkshopError::RemoteLookupFailed(_)));
    }

    #[test]
    fn test_file_details_success_without_title() {
        let body = r#"{"response":{"publishedfiledetails":[{"publishedfileid":"111","result":1}]}}"#;
        let err = parse_file_details(&ids(&["111"]), body).unwrap_err();
        assert!(matches!(err, WorkshopError::MalformedResponse(_)));
    }

    #[test]
    fn test_file_details_bad_shape() {
        let body = r#"{"response":{"publishedfiledetails":[{"publishedfileid":111}]}}"#;
        let err = parse_file_details(&ids(&["111"]), body).unwrap_err();
        assert!(matches!(err, WorkshopError::MalformedResponse(_)));
    }
}
