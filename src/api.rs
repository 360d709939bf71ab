//! Score service client
//!
//! Thin bridge to the remote leaderboard backend: one fire-and-forget POST
//! when a run ends, and a user-triggered ranked read for the board view. The
//! wire shapes follow the service exactly: camelCase fields on the way out,
//! column-style SCREAMING_SNAKE keys on the way back.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_PLAYER_NAME;

/// Backend origin used when the page does not override it. The host page may
/// assign a `__SCORE_API` global before the module loads.
pub const DEFAULT_API_BASE: &str = "http://localhost:3000";

/// Smallest page the service will serve
pub const MIN_LEADERBOARD_LIMIT: u32 = 1;
/// Largest page the service will serve
pub const MAX_LEADERBOARD_LIMIT: u32 = 50;
/// Rows requested when the board view opens
pub const DEFAULT_LEADERBOARD_LIMIT: u32 = 10;

/// One finished run, shaped as the service expects it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSubmission {
    pub player_name: String,
    /// Floored distance
    pub score: u32,
    pub coins: u32,
}

/// One leaderboard row. Keys come straight from the service's result set;
/// `PLAYER_NAME` may be null on legacy rows.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LeaderboardRow {
    #[serde(rename = "PLAYER_NAME")]
    pub player_name: Option<String>,
    #[serde(rename = "SCORE")]
    pub score: u32,
    #[serde(rename = "COINS", default)]
    pub coins: u32,
    #[serde(rename = "CREATED_AT", default)]
    pub created_at: Option<String>,
}

impl LeaderboardRow {
    /// Name to show on the board, with the guest fallback for null or empty
    /// names.
    pub fn display_name(&self) -> &str {
        match self.player_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_PLAYER_NAME,
        }
    }
}

/// Envelope the service wraps row sets in
#[derive(Debug, Deserialize)]
struct LeaderboardResponse {
    #[serde(default)]
    rows: Vec<LeaderboardRow>,
}

/// Clamp a requested page size to what the service will actually honor, so
/// the query sent matches the rows that come back.
pub fn clamp_leaderboard_limit(limit: u32) -> u32 {
    limit.clamp(MIN_LEADERBOARD_LIMIT, MAX_LEADERBOARD_LIMIT)
}

/// Decode a leaderboard body. A missing `rows` field decodes as an empty
/// board; only malformed JSON is an error.
pub fn parse_leaderboard(body: &str) -> serde_json::Result<Vec<LeaderboardRow>> {
    serde_json::from_str::<LeaderboardResponse>(body).map(|resp| resp.rows)
}

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, Response};

    use super::{
        DEFAULT_API_BASE, LeaderboardRow, ScoreSubmission, clamp_leaderboard_limit,
        parse_leaderboard,
    };

    /// Backend origin: the page-level `__SCORE_API` override if present,
    /// otherwise the default.
    pub fn api_base() -> String {
        web_sys::window()
            .and_then(|w| js_sys::Reflect::get(&w, &JsValue::from_str("__SCORE_API")).ok())
            .and_then(|v| v.as_string())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
    }

    async fn post_score(submission: &ScoreSubmission) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let body = serde_json::to_string(submission)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_body(&JsValue::from_str(&body));

        let url = format!("{}/api/score", api_base());
        let request = Request::new_with_str_and_init(&url, &opts)?;
        request.headers().set("Content-Type", "application/json")?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
        let resp: Response = resp_value.dyn_into()?;
        if !resp.ok() {
            return Err(JsValue::from_str(&format!(
                "score POST returned {}",
                resp.status()
            )));
        }
        Ok(())
    }

    /// Fire-and-forget submission. The frame loop never waits on this;
    /// failures are logged and swallowed so a dead backend cannot stall the
    /// game-over screen.
    pub fn submit_score(submission: ScoreSubmission) {
        wasm_bindgen_futures::spawn_local(async move {
            match post_score(&submission).await {
                Ok(()) => log::info!(
                    "Submitted score {} ({} coins) for {}",
                    submission.score,
                    submission.coins,
                    submission.player_name
                ),
                Err(err) => log::debug!("Score submission failed: {err:?}"),
            }
        });
    }

    /// Fetch the top rows, best score first. The limit is pre-clamped to the
    /// service's accepted range.
    pub async fn fetch_leaderboard(limit: u32) -> Result<Vec<LeaderboardRow>, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let url = format!(
            "{}/api/leaderboard?limit={}",
            api_base(),
            clamp_leaderboard_limit(limit)
        );

        let resp_value = JsFuture::from(window.fetch_with_str(&url)).await?;
        let resp: Response = resp_value.dyn_into()?;
        if !resp.ok() {
            return Err(JsValue::from_str(&format!(
                "leaderboard GET returned {}",
                resp.status()
            )));
        }

        let text = JsFuture::from(resp.text()?).await?;
        let text = text
            .as_string()
            .ok_or_else(|| JsValue::from_str("leaderboard body was not text"))?;
        parse_leaderboard(&text).map_err(|err| JsValue::from_str(&err.to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::{api_base, fetch_leaderboard, submit_score};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_wire_shape() {
        let submission = ScoreSubmission {
            player_name: "Ace".to_string(),
            score: 357,
            coins: 12,
        };
        let json = serde_json::to_string(&submission).unwrap();
        assert_eq!(json, r#"{"playerName":"Ace","score":357,"coins":12}"#);
    }

    #[test]
    fn test_parse_leaderboard_rows() {
        let body = r#"{
            "ok": true,
            "rows": [
                {"PLAYER_NAME": "Ace", "SCORE": 512, "COINS": 31, "CREATED_AT": "2026-08-20T10:00:00Z"},
                {"PLAYER_NAME": null, "SCORE": 357, "COINS": 12, "CREATED_AT": null},
                {"PLAYER_NAME": "", "SCORE": 10, "COINS": 0}
            ]
        }"#;
        let rows = parse_leaderboard(body).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].display_name(), "Ace");
        assert_eq!(rows[0].score, 512);
        assert_eq!(rows[0].created_at.as_deref(), Some("2026-08-20T10:00:00Z"));
        // Null and empty names both fall back to the guest label
        assert_eq!(rows[1].display_name(), "Guest");
        assert_eq!(rows[2].display_name(), "Guest");
        assert_eq!(rows[2].coins, 0);
    }

    #[test]
    fn test_parse_leaderboard_missing_rows_is_empty() {
        let rows = parse_leaderboard(r#"{"ok": true}"#).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_parse_leaderboard_rejects_malformed_body() {
        assert!(parse_leaderboard("not json").is_err());
        assert!(parse_leaderboard(r#"{"rows": "nope"}"#).is_err());
    }

    #[test]
    fn test_limit_clamps_to_service_range() {
        assert_eq!(clamp_leaderboard_limit(100), 50);
        assert_eq!(clamp_leaderboard_limit(0), 1);
        assert_eq!(clamp_leaderboard_limit(10), 10);
        assert_eq!(clamp_leaderboard_limit(50), 50);
        assert_eq!(clamp_leaderboard_limit(1), 1);
    }
}
