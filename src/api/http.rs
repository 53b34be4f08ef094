use anyhow::Result;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{CONTENT_TYPE, COOKIE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::{ApiError, MailApi};
use crate::config::Config;
use crate::domain::email::{Email, EmailId, EmailUpdate, Mailbox, OutgoingEmail};

/// `MailApi` over the backend's JSON endpoints.
pub struct HttpMailApi {
    client: Client,
    base: Url,
}

impl HttpMailApi {
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let mut base = Url::parse(&cfg.base_url)?;
        // Url::join drops the last segment unless the path ends with '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(sid) = &cfg.session_id {
            headers.insert(COOKIE, HeaderValue::from_str(&format!("sessionid={sid}"))?);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(cfg.timeout())
            .build()?;

        Ok(Self { client, base })
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base.join(path)?)
    }

    fn execute(&self, req: RequestBuilder) -> Result<Response, ApiError> {
        let resp = req.send().map_err(|e| ApiError::Network(e.to_string()))?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        // The backend reports problems as {"error": "..."}
        let message = resp
            .json::<serde_json::Value>()
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_owned));
        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path)?;
        log::debug!("GET {url}");
        let resp = self.execute(self.client.get(url))?;
        resp.json::<T>().map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl MailApi for HttpMailApi {
    fn list_mailbox(&self, mailbox: Mailbox) -> Result<Vec<Email>, ApiError> {
        self.get_json(&format!("emails/{}", mailbox.as_str()))
    }

    fn get_email(&self, id: EmailId) -> Result<Email, ApiError> {
        self.get_json(&format!("emails/{id}"))
    }

    fn update_email(&self, id: EmailId, update: &EmailUpdate) -> Result<(), ApiError> {
        let url = self.url(&format!("emails/{id}"))?;
        log::debug!("PUT {url} {update:?}");
        self.execute(self.client.put(url).json(update))?;
        Ok(())
    }

    fn send_email(&self, email: &OutgoingEmail) -> Result<serde_json::Value, ApiError> {
        let url = self.url("emails")?;
        log::debug!("POST {url}");
        let resp = self.execute(self.client.post(url).json(email))?;
        resp.json::<serde_json::Value>()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}
