use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use crate::{
    config::Config,
    errors::{AppError, AppResult, ErrorResponse},
    models::{
        domain::{AppSetting, Question, Quiz, QuizResult, UserProfile},
        dto::{
            request::{QuizFilter, SubmitResultRequest, UpdateSettingRequest},
            response::{
                AnalyticsOverview, DailyActivity, LeaderboardEntry, QuizPerformance,
                UserResultDto,
            },
        },
    },
    session::{QuestionSource, ResultSink},
};

/// Thin typed wrapper over the `/api` routes.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    token: Option<SecretString>,
}

impl ApiClient {
    /// `base_url` includes the `/api` prefix, e.g. `http://localhost:5000/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            token: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_base_url.clone())
    }

    pub fn with_token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    pub fn set_token(&mut self, token: Option<SecretString>) {
        self.token = token;
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, format!("{}/{}", self.base_url, path.trim_start_matches('/')));

        match &self.token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    pub(crate) async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> AppResult<T> {
        let response = builder.send().await?;
        let response = check_status(response).await?;
        Ok(response.json::<T>().await?)
    }

    pub async fn quizzes(&self, filter: &QuizFilter) -> AppResult<Vec<Quiz>> {
        self.send(self.request(Method::GET, "quizzes").query(filter))
            .await
    }

    pub async fn questions(&self, quiz_id: &str) -> AppResult<Vec<Question>> {
        self.send(self.request(Method::GET, &format!("quizzes/{}/questions", quiz_id)))
            .await
    }

    pub async fn submit_result(&self, request: &SubmitResultRequest) -> AppResult<QuizResult> {
        self.send(self.request(Method::POST, "results").json(request))
            .await
    }

    pub async fn user_results(&self, user_id: &str) -> AppResult<Vec<UserResultDto>> {
        self.send(self.request(Method::GET, &format!("results/{}", user_id)))
            .await
    }

    pub async fn leaderboard(&self) -> AppResult<Vec<LeaderboardEntry>> {
        self.send(self.request(Method::GET, "leaderboard")).await
    }

    /// Profile of the token holder, created server side on first call.
    pub async fn me(&self) -> AppResult<UserProfile> {
        self.send(self.request(Method::GET, "me")).await
    }

    pub async fn settings(&self) -> AppResult<Vec<AppSetting>> {
        self.send(self.request(Method::GET, "settings")).await
    }

    pub async fn update_setting(&self, key: &str, value: serde_json::Value) -> AppResult<AppSetting> {
        self.send(
            self.request(Method::PUT, &format!("settings/{}", key))
                .json(&UpdateSettingRequest { value }),
        )
        .await
    }

    pub async fn analytics_overview(&self) -> AppResult<AnalyticsOverview> {
        self.send(self.request(Method::GET, "analytics/overview"))
            .await
    }

    pub async fn quiz_performance(&self) -> AppResult<Vec<QuizPerformance>> {
        self.send(self.request(Method::GET, "analytics/quiz-performance"))
            .await
    }

    pub async fn user_activity(&self, days: u32) -> AppResult<Vec<DailyActivity>> {
        self.send(
            self.request(Method::GET, "analytics/user-activity")
                .query(&[("days", days)]),
        )
        .await
    }
}

/// Turns a non-2xx response into the matching `AppError`.
async fn check_status(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.error)
        .unwrap_or(body);

    log::debug!("API responded {}: {}", status, message);
    Err(AppError::from_status(status.as_u16(), message))
}

#[async_trait]
impl QuestionSource for ApiClient {
    async fn questions(&self, quiz_id: &str) -> AppResult<Vec<Question>> {
        ApiClient::questions(self, quiz_id).await
    }
}

#[async_trait]
impl ResultSink for ApiClient {
    async fn submit_result(&self, request: &SubmitResultRequest) -> AppResult<QuizResult> {
        ApiClient::submit_result(self, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_drops_trailing_slash() {
        let client = ApiClient::new("http://localhost:5000/api/");
        assert_eq!(client.base_url(), "http://localhost:5000/api");
    }

    #[test]
    fn requests_carry_bearer_token_when_set() {
        let client = ApiClient::new("http://localhost:5000/api")
            .with_token(SecretString::from("abc".to_string()));

        let request = client.request(Method::GET, "/me").build().unwrap();

        assert_eq!(request.url().as_str(), "http://localhost:5000/api/me");
        assert_eq!(request.headers()["authorization"], "Bearer abc");
    }

    #[test]
    fn anonymous_requests_have_no_authorization() {
        let client = ApiClient::new("http://localhost:5000/api");
        let request = client.request(Method::GET, "leaderboard").build().unwrap();
        assert!(request.headers().get("authorization").is_none());
    }
}
