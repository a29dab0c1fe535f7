//! REST adapter for the remote data gateway.

use std::env;

use async_trait::async_trait;
use literacy_core::model::{
    Assessment, AssessmentId, AuthToken, Level, NewAssessment, PasswordChange, ProfileUpdate,
    Registration, StatisticsFilter, StatisticsRecord, Status, UserAccount, UserProfile,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::repository::{
    AssessmentApi, AuthApi, Gateway, GatewayError, LoginResponse, ProfileApi, StatisticsApi,
    UserApi,
};

/// Where the backend lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: Url,
}

impl ApiConfig {
    pub const ENV_VAR: &'static str = "LITERACY_API_URL";
    pub const DEFAULT_URL: &'static str = "http://localhost:5000/api";

    /// Parse an API origin such as `http://host:5000/api`.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::InvalidUrl` if the value is not an absolute
    /// http(s) URL.
    pub fn parse(raw: &str) -> Result<Self, GatewayError> {
        let mut base_url =
            Url::parse(raw.trim()).map_err(|err| GatewayError::InvalidUrl(err.to_string()))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(GatewayError::InvalidUrl(format!(
                "unsupported scheme {}",
                base_url.scheme()
            )));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { base_url })
    }

    /// Read `LITERACY_API_URL`, falling back to the local development server.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::InvalidUrl` if the variable is set but invalid.
    pub fn from_env() -> Result<Self, GatewayError> {
        match env::var(Self::ENV_VAR) {
            Ok(raw) if !raw.trim().is_empty() => Self::parse(&raw),
            _ => Self::parse(Self::DEFAULT_URL),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Join a relative endpoint path onto the base URL.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::InvalidUrl` if the path cannot be joined.
    pub fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| GatewayError::InvalidUrl(err.to_string()))
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::Transport(err.to_string())
        }
    }
}

#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    config: ApiConfig,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct StatusBody {
    status: Status,
}

#[derive(Serialize)]
struct LevelBody {
    level: Level,
}

#[derive(Serialize)]
struct DeleteBody<'a> {
    ids: &'a [AssessmentId],
}

const MAX_ERROR_BODY: usize = 200;

impl HttpGateway {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// All gateway contracts served over HTTP.
    #[must_use]
    pub fn into_gateway(self) -> Gateway {
        Gateway::from_backend(self)
    }

    fn authed(&self, builder: RequestBuilder, token: &AuthToken) -> RequestBuilder {
        builder.bearer_auth(token.as_str())
    }

    async fn check(response: Response) -> Result<Response, GatewayError> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(GatewayError::Unauthorized);
        }
        if !status.is_success() {
            let mut message = response.text().await.unwrap_or_default();
            if message.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|i| message.is_char_boundary(*i))
                    .unwrap_or(0);
                message.truncate(cut);
            }
            return Err(GatewayError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, GatewayError> {
        let response = Self::check(builder.send().await?).await?;
        response
            .json::<T>()
            .await
            .map_err(|err| GatewayError::Decode(err.to_string()))
    }

    async fn send_empty(builder: RequestBuilder) -> Result<(), GatewayError> {
        Self::check(builder.send().await?).await?;
        Ok(())
    }
}

/// Decode each row on its own so one unreadable record does not hide the rest.
fn decode_rows(rows: Vec<serde_json::Value>) -> Vec<Assessment> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row.get("id").cloned();
            serde_json::from_value::<Assessment>(row)
                .map_err(|err| warn!(?id, error = %err, "skipping undecodable assessment"))
                .ok()
        })
        .collect()
}

#[async_trait]
impl AuthApi for HttpGateway {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, GatewayError> {
        let url = self.config.endpoint("auth/login")?;
        debug!(%url, "login request");
        Self::send_json(self.client.post(url).json(&LoginBody { email, password })).await
    }

    async fn register(
        &self,
        token: &AuthToken,
        registration: &Registration,
    ) -> Result<(), GatewayError> {
        let url = self.config.endpoint("auth/register")?;
        Self::send_empty(self.authed(self.client.post(url), token).json(registration)).await
    }
}

#[async_trait]
impl ProfileApi for HttpGateway {
    async fn get_profile(&self, token: &AuthToken) -> Result<UserProfile, GatewayError> {
        let url = self.config.endpoint("user/profile")?;
        Self::send_json(self.authed(self.client.get(url), token)).await
    }

    async fn update_profile(
        &self,
        token: &AuthToken,
        update: &ProfileUpdate,
    ) -> Result<(), GatewayError> {
        let url = self.config.endpoint("user/profile")?;
        let mut form = Form::new();
        for (key, value) in &update.fields {
            form = form.text(*key, value.clone());
        }
        if let Some(avatar) = &update.avatar {
            let part = Part::bytes(avatar.bytes.clone())
                .file_name(avatar.file_name.clone())
                .mime_str(&avatar.mime)?;
            form = form.part("avatar", part);
        }
        Self::send_empty(self.authed(self.client.put(url), token).multipart(form)).await
    }

    async fn change_password(
        &self,
        token: &AuthToken,
        change: &PasswordChange,
    ) -> Result<(), GatewayError> {
        let url = self.config.endpoint("user/profile/change-password")?;
        Self::send_empty(self.authed(self.client.post(url), token).json(change)).await
    }
}

#[async_trait]
impl AssessmentApi for HttpGateway {
    async fn list_assessments(&self, token: &AuthToken) -> Result<Vec<Assessment>, GatewayError> {
        let url = self.config.endpoint("assessments")?;
        let rows: Vec<serde_json::Value> =
            Self::send_json(self.authed(self.client.get(url), token)).await?;
        Ok(decode_rows(rows))
    }

    async fn get_assessment(
        &self,
        token: &AuthToken,
        id: AssessmentId,
    ) -> Result<Assessment, GatewayError> {
        let url = self.config.endpoint(&format!("assessments/{id}"))?;
        Self::send_json(self.authed(self.client.get(url), token)).await
    }

    async fn create_assessment(
        &self,
        token: &AuthToken,
        assessment: &NewAssessment,
    ) -> Result<(), GatewayError> {
        let url = self.config.endpoint("assessments")?;
        Self::send_empty(self.authed(self.client.post(url), token).json(assessment)).await
    }

    async fn update_status(
        &self,
        token: &AuthToken,
        id: AssessmentId,
        status: Status,
    ) -> Result<(), GatewayError> {
        let url = self.config.endpoint(&format!("assessments/{id}/status"))?;
        debug!(%id, status = status.label(), "status write");
        Self::send_empty(
            self.authed(self.client.put(url), token)
                .json(&StatusBody { status }),
        )
        .await
    }

    async fn update_level(
        &self,
        token: &AuthToken,
        id: AssessmentId,
        level: Level,
    ) -> Result<(), GatewayError> {
        let url = self.config.endpoint(&format!("assessments/{id}/level"))?;
        debug!(%id, level = level.label(), "level write");
        Self::send_empty(self.authed(self.client.put(url), token).json(&LevelBody { level })).await
    }

    async fn delete_assessments(
        &self,
        token: &AuthToken,
        ids: &[AssessmentId],
    ) -> Result<(), GatewayError> {
        let url = self.config.endpoint("assessments/delete")?;
        Self::send_empty(self.authed(self.client.post(url), token).json(&DeleteBody { ids })).await
    }
}

#[async_trait]
impl StatisticsApi for HttpGateway {
    async fn fetch_statistics(
        &self,
        token: &AuthToken,
        filter: &StatisticsFilter,
    ) -> Result<Vec<StatisticsRecord>, GatewayError> {
        let url = self.config.endpoint("statistics")?;
        let query = filter.query_pairs();
        Self::send_json(self.authed(self.client.get(url), token).query(&query)).await
    }
}

#[async_trait]
impl UserApi for HttpGateway {
    async fn list_users(&self, token: &AuthToken) -> Result<Vec<UserAccount>, GatewayError> {
        let url = self.config.endpoint("users")?;
        Self::send_json(self.authed(self.client.get(url), token)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        let config = ApiConfig::parse("http://example.org:5000/api").unwrap();
        assert_eq!(config.base_url().as_str(), "http://example.org:5000/api/");
        assert_eq!(
            config.endpoint("assessments/7/level").unwrap().as_str(),
            "http://example.org:5000/api/assessments/7/level"
        );
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(matches!(
            ApiConfig::parse("ftp://example.org"),
            Err(GatewayError::InvalidUrl(_))
        ));
        assert!(matches!(
            ApiConfig::parse("not a url"),
            Err(GatewayError::InvalidUrl(_))
        ));
    }

    #[test]
    fn gateway_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpGateway>();
    }
}
