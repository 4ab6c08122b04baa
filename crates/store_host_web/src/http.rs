//! Fetch-backed implementation of the store API service.

use std::rc::Rc;

use store_host::{
    clear_auth_session, delete_url, fs_api_url, load_auth_token, ApiError, CreateRequest,
    EntryPatch, KeyValueStore, ListOutcome, StoreApiFuture, StoreApiService, StoreEntry,
};

use crate::events::{dispatch_window_event, REQUIRE_LOGIN_EVENT};

/// Store API client speaking JSON over `fetch` with a bearer token from the
/// durable store.
///
/// A 401 on any request clears the stored session and raises the global
/// [`REQUIRE_LOGIN_EVENT`] before the error reaches the caller, so every
/// surface shares one login-expiry path.
#[derive(Clone)]
pub struct HttpStoreApi {
    durable: Rc<dyn KeyValueStore>,
}

impl HttpStoreApi {
    /// Creates a client reading its bearer token from `durable`.
    pub fn new(durable: Rc<dyn KeyValueStore>) -> Self {
        Self { durable }
    }

    async fn send(&self, method: &str, url: &str, body: Option<String>) -> Result<String, ApiError> {
        let token = load_auth_token(&*self.durable);
        let reply = perform_request(method, url, body, token)
            .await
            .and_then(|(status, body)| decode_reply(status, body));
        if let Err(err) = &reply {
            if err.requires_login() {
                let _ = clear_auth_session(&*self.durable);
                let _ = dispatch_window_event(REQUIRE_LOGIN_EVENT);
            }
        }
        reply
    }
}

/// Maps a raw HTTP reply onto the client error taxonomy.
///
/// Success passes the body through; failures prefer the backend's
/// `{"error": …}` message when one parses.
fn decode_reply(status: u16, body: String) -> Result<String, ApiError> {
    if (200..300).contains(&status) {
        return Ok(body);
    }
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(|msg| msg.as_str())
                .map(str::to_string)
        });
    Err(ApiError::from_status(status, message))
}

#[cfg(target_arch = "wasm32")]
async fn perform_request(
    method: &str,
    url: &str,
    body: Option<String>,
    token: Option<String>,
) -> Result<(u16, String), ApiError> {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;

    let transport = |stage: &str| {
        let stage = stage.to_string();
        move |err: JsValue| ApiError::Transport(format!("{stage}: {err:?}"))
    };

    let headers = web_sys::Headers::new().map_err(transport("headers"))?;
    if let Some(token) = token {
        headers
            .set("Authorization", &format!("Bearer {token}"))
            .map_err(transport("headers"))?;
    }
    if body.is_some() {
        headers
            .set("Content-Type", "application/json")
            .map_err(transport("headers"))?;
    }

    let init = web_sys::RequestInit::new();
    init.set_method(method);
    init.set_headers(&headers);
    if let Some(body) = &body {
        init.set_body(&JsValue::from_str(body));
    }

    let request =
        web_sys::Request::new_with_str_and_init(url, &init).map_err(transport("request"))?;
    let window =
        web_sys::window().ok_or_else(|| ApiError::Transport("window unavailable".to_string()))?;
    let response: web_sys::Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(transport("fetch"))?
        .dyn_into()
        .map_err(transport("response"))?;

    let status = response.status();
    let text = JsFuture::from(response.text().map_err(transport("body"))?)
        .await
        .map_err(transport("body"))?
        .as_string()
        .unwrap_or_default();

    Ok((status, text))
}

#[cfg(not(target_arch = "wasm32"))]
async fn perform_request(
    _method: &str,
    _url: &str,
    _body: Option<String>,
    _token: Option<String>,
) -> Result<(u16, String), ApiError> {
    Err(ApiError::Transport(
        "fetch unavailable outside the browser".to_string(),
    ))
}

fn parse_listing(body: &str) -> Result<ListOutcome, ApiError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| ApiError::Transport(format!("malformed listing response: {e}")))?;
    if value.is_array() {
        let entries: Vec<StoreEntry> = serde_json::from_value(value)
            .map_err(|e| ApiError::Transport(format!("malformed listing entry: {e}")))?;
        Ok(ListOutcome::Listing(entries))
    } else {
        Ok(ListOutcome::NotADirectory)
    }
}

impl StoreApiService for HttpStoreApi {
    fn list_dir<'a>(&'a self, path: &'a str) -> StoreApiFuture<'a, Result<ListOutcome, ApiError>> {
        Box::pin(async move {
            let body = self.send("GET", &fs_api_url(path), None).await?;
            parse_listing(&body)
        })
    }

    fn delete<'a>(&'a self, path: &'a str) -> StoreApiFuture<'a, Result<(), ApiError>> {
        Box::pin(async move {
            self.send("DELETE", &delete_url(path), None).await?;
            Ok(())
        })
    }

    fn patch_entry<'a>(
        &'a self,
        path: &'a str,
        patch: &'a EntryPatch,
    ) -> StoreApiFuture<'a, Result<StoreEntry, ApiError>> {
        Box::pin(async move {
            let payload = serde_json::to_string(patch)
                .map_err(|e| ApiError::Transport(format!("patch serialization failed: {e}")))?;
            let body = self
                .send("PATCH", &fs_api_url(path), Some(payload))
                .await?;
            serde_json::from_str(&body)
                .map_err(|e| ApiError::Transport(format!("malformed entry response: {e}")))
        })
    }

    fn create_dir<'a>(&'a self, path: &'a str) -> StoreApiFuture<'a, Result<(), ApiError>> {
        Box::pin(async move {
            let payload = serde_json::to_string(&CreateRequest::CreateDir(true))
                .map_err(|e| ApiError::Transport(format!("request serialization failed: {e}")))?;
            self.send("POST", &fs_api_url(path), Some(payload)).await?;
            Ok(())
        })
    }

    fn rename<'a>(
        &'a self,
        path: &'a str,
        new_name: &'a str,
    ) -> StoreApiFuture<'a, Result<(), ApiError>> {
        Box::pin(async move {
            let payload = serde_json::to_string(&CreateRequest::RenameTo(new_name.to_string()))
                .map_err(|e| ApiError::Transport(format!("request serialization failed: {e}")))?;
            self.send("POST", &fs_api_url(path), Some(payload)).await?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_reply_passes_success_bodies_through() {
        assert_eq!(decode_reply(200, "[]".to_string()), Ok("[]".to_string()));
        assert_eq!(decode_reply(204, String::new()), Ok(String::new()));
    }

    #[test]
    fn decode_reply_prefers_the_backend_error_message() {
        assert_eq!(
            decode_reply(400, "{\"error\":\"invalid tag\"}".to_string()),
            Err(ApiError::Validation("invalid tag".to_string()))
        );
        assert_eq!(
            decode_reply(404, "{\"error\":\"missing\"}".to_string()),
            Err(ApiError::NotFound)
        );
        assert_eq!(
            decode_reply(500, "<html>oops</html>".to_string()),
            Err(ApiError::Transport("server returned status 500".to_string()))
        );
    }

    #[test]
    fn parse_listing_distinguishes_arrays_from_objects() {
        let listing = parse_listing("[{\"name\":\"a.txt\",\"isdir\":false,\"size\":1,\"modtime\":\"2026-01-01T00:00:00Z\"}]")
            .expect("listing");
        match listing {
            ListOutcome::Listing(entries) => assert_eq!(entries[0].name, "a.txt"),
            ListOutcome::NotADirectory => panic!("expected a listing"),
        }

        assert_eq!(
            parse_listing("{\"name\":\"a.txt\"}").expect("file meta"),
            ListOutcome::NotADirectory
        );
        assert!(parse_listing("not json").is_err());
    }
}
