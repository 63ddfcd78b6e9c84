//! REST client for the Tumbuh `/api/v1` endpoints.
//!
//! Wraps every endpoint with [`reqwest`]. Authenticated calls carry the
//! access token from the last successful register, login or refresh.

use serde::Serialize;
use tokio::sync::RwLock;
use tumbuh_core::growth::{AgePolicy, MeasurementInput, MeasurementType, Sex, StandardEntry};
use tumbuh_core::nutrition::DailyIntakeSummary;
use tumbuh_db::models::child::{CreateChild, UpdateChild};
use tumbuh_db::models::growth_record::{CreateGrowthRecord, UpdateGrowthRecord};
use tumbuh_db::models::nutrition_intake::{
    CreateNutritionIntake, NutritionIntakeFilter, UpdateNutritionIntake,
};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::models::{
    Assessment, AuthTokens, Chart, Child, DataEnvelope, GrowthRecord, HealthStatus,
    NutritionIntake, Recipe, SeedResult, StandardsStatus, UserInfo,
};

/// Tokens held between calls.
#[derive(Debug, Clone)]
struct Session {
    access_token: String,
    refresh_token: String,
}

/// HTTP client for a single Tumbuh server.
pub struct TumbuhApi {
    client: reqwest::Client,
    api_url: String,
    session: RwLock<Option<Session>>,
}

#[derive(Serialize)]
struct RegisterBody<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    full_name: Option<&'a str>,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshBody<'a> {
    refresh_token: &'a str,
}

#[derive(Serialize)]
struct EvaluateBody {
    #[serde(flatten)]
    input: MeasurementInput,
    age_policy: AgePolicy,
}

#[derive(Serialize)]
struct RecordQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    measurement_type: Option<MeasurementType>,
    age_policy: AgePolicy,
}

#[derive(Serialize)]
struct StandardsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    measurement_type: Option<MeasurementType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sex: Option<Sex>,
}

impl TumbuhApi {
    /// Create a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self::with_client(client, config.api_url.clone()))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    ///
    /// * `api_url` - Server base URL, e.g. `http://localhost:3000`.
    pub fn with_client(client: reqwest::Client, api_url: String) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            session: RwLock::new(None),
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_some()
    }

    // ---- auth ----

    /// Create an account and keep its session.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<UserInfo, ClientError> {
        let body = RegisterBody {
            username,
            email,
            password,
            full_name,
        };
        let response = self
            .client
            .post(self.url("/auth/register"))
            .json(&body)
            .send()
            .await?;
        let tokens: AuthTokens = Self::parse_response(response).await?;
        Ok(self.store_session(tokens).await)
    }

    /// Sign in with a username or email address.
    pub async fn login(&self, username: &str, password: &str) -> Result<UserInfo, ClientError> {
        let response = self
            .client
            .post(self.url("/auth/login"))
            .json(&LoginBody { username, password })
            .send()
            .await?;
        let tokens: AuthTokens = Self::parse_response(response).await?;
        Ok(self.store_session(tokens).await)
    }

    /// Exchange the stored refresh token for a new token pair.
    pub async fn refresh(&self) -> Result<(), ClientError> {
        let refresh_token = self
            .session
            .read()
            .await
            .as_ref()
            .map(|s| s.refresh_token.clone())
            .ok_or(ClientError::NotAuthenticated)?;

        let response = self
            .client
            .post(self.url("/auth/refresh"))
            .json(&RefreshBody {
                refresh_token: &refresh_token,
            })
            .send()
            .await?;
        let tokens: AuthTokens = Self::parse_response(response).await?;
        self.store_session(tokens).await;
        Ok(())
    }

    /// Revoke every session of the signed-in user and forget the tokens.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let token = self.access_token().await?;
        let response = self
            .client
            .post(self.url("/auth/logout"))
            .bearer_auth(token)
            .send()
            .await?;
        Self::check_status(response).await?;
        *self.session.write().await = None;
        Ok(())
    }

    // ---- health ----

    /// `GET /health` (served outside `/api/v1`).
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let response = self
            .client
            .get(format!("{}/health", self.api_url))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    // ---- children ----

    pub async fn list_children(&self) -> Result<Vec<Child>, ClientError> {
        self.get_data("/children").await
    }

    pub async fn create_child(&self, input: &CreateChild) -> Result<Child, ClientError> {
        self.post_data("/children", input).await
    }

    pub async fn get_child(&self, id: i64) -> Result<Child, ClientError> {
        self.get_data(&format!("/children/{id}")).await
    }

    pub async fn update_child(&self, id: i64, input: &UpdateChild) -> Result<Child, ClientError> {
        self.put_data(&format!("/children/{id}"), input).await
    }

    pub async fn delete_child(&self, id: i64) -> Result<(), ClientError> {
        self.delete(&format!("/children/{id}")).await
    }

    /// Recipes suitable for the child's current age.
    pub async fn child_recipes(&self, id: i64) -> Result<Vec<Recipe>, ClientError> {
        self.get_data(&format!("/children/{id}/recipes")).await
    }

    // ---- growth records ----

    /// List a child's records oldest first, optionally for one indicator.
    pub async fn list_growth_records(
        &self,
        child_id: i64,
        measurement_type: Option<MeasurementType>,
        age_policy: AgePolicy,
    ) -> Result<Vec<GrowthRecord>, ClientError> {
        let token = self.access_token().await?;
        let response = self
            .client
            .get(self.url(&format!("/children/{child_id}/growth-records")))
            .query(&RecordQuery {
                measurement_type,
                age_policy,
            })
            .bearer_auth(token)
            .send()
            .await?;
        Self::parse_data(response).await
    }

    pub async fn create_growth_record(
        &self,
        child_id: i64,
        input: &CreateGrowthRecord,
    ) -> Result<GrowthRecord, ClientError> {
        self.post_data(&format!("/children/{child_id}/growth-records"), input)
            .await
    }

    pub async fn get_growth_record(
        &self,
        child_id: i64,
        record_id: i64,
    ) -> Result<GrowthRecord, ClientError> {
        self.get_data(&format!("/children/{child_id}/growth-records/{record_id}"))
            .await
    }

    pub async fn update_growth_record(
        &self,
        child_id: i64,
        record_id: i64,
        input: &UpdateGrowthRecord,
    ) -> Result<GrowthRecord, ClientError> {
        self.put_data(
            &format!("/children/{child_id}/growth-records/{record_id}"),
            input,
        )
        .await
    }

    pub async fn delete_growth_record(&self, child_id: i64, record_id: i64) -> Result<(), ClientError> {
        self.delete(&format!("/children/{child_id}/growth-records/{record_id}"))
            .await
    }

    /// Chart points and reference curves for one indicator.
    pub async fn growth_chart(
        &self,
        child_id: i64,
        measurement_type: MeasurementType,
    ) -> Result<Chart, ClientError> {
        let token = self.access_token().await?;
        let response = self
            .client
            .get(self.url(&format!("/children/{child_id}/growth-chart")))
            .query(&[("measurement_type", measurement_type.as_str())])
            .bearer_auth(token)
            .send()
            .await?;
        Self::parse_data(response).await
    }

    // ---- nutrition ----

    pub async fn list_intakes(
        &self,
        filter: &NutritionIntakeFilter,
    ) -> Result<Vec<NutritionIntake>, ClientError> {
        self.get_data_with_query("/nutrition-intakes", filter).await
    }

    /// Per-day nutrient totals, oldest day first.
    pub async fn intake_summary(
        &self,
        filter: &NutritionIntakeFilter,
    ) -> Result<Vec<DailyIntakeSummary>, ClientError> {
        self.get_data_with_query("/nutrition-intakes/summary", filter)
            .await
    }

    pub async fn create_intake(
        &self,
        input: &CreateNutritionIntake,
    ) -> Result<NutritionIntake, ClientError> {
        self.post_data("/nutrition-intakes", input).await
    }

    pub async fn get_intake(&self, id: i64) -> Result<NutritionIntake, ClientError> {
        self.get_data(&format!("/nutrition-intakes/{id}")).await
    }

    pub async fn update_intake(
        &self,
        id: i64,
        input: &UpdateNutritionIntake,
    ) -> Result<NutritionIntake, ClientError> {
        self.put_data(&format!("/nutrition-intakes/{id}"), input)
            .await
    }

    pub async fn delete_intake(&self, id: i64) -> Result<(), ClientError> {
        self.delete(&format!("/nutrition-intakes/{id}")).await
    }

    // ---- recipes ----

    /// All recipes, or only those suitable for `age_months`.
    pub async fn list_recipes(&self, age_months: Option<i32>) -> Result<Vec<Recipe>, ClientError> {
        let mut request = self.client.get(self.url("/recipes"));
        if let Some(age) = age_months {
            request = request.query(&[("age_months", age)]);
        }
        let response = request.send().await?;
        Self::parse_data(response).await
    }

    pub async fn get_recipe(&self, id: i64) -> Result<Recipe, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/recipes/{id}")))
            .send()
            .await?;
        Self::parse_data(response).await
    }

    // ---- standards ----

    /// Reference entries, optionally narrowed to one indicator and sex.
    pub async fn list_standards(
        &self,
        measurement_type: Option<MeasurementType>,
        sex: Option<Sex>,
    ) -> Result<Vec<StandardEntry>, ClientError> {
        let response = self
            .client
            .get(self.url("/standards"))
            .query(&StandardsQuery {
                measurement_type,
                sex,
            })
            .send()
            .await?;
        Self::parse_data(response).await
    }

    pub async fn standards_status(&self) -> Result<StandardsStatus, ClientError> {
        let response = self
            .client
            .get(self.url("/standards/status"))
            .send()
            .await?;
        Self::parse_data(response).await
    }

    /// Ask the server to (re)write its bundled dataset.
    pub async fn seed_standards(&self) -> Result<SeedResult, ClientError> {
        let token = self.access_token().await?;
        let response = self
            .client
            .post(self.url("/standards/seed"))
            .bearer_auth(token)
            .send()
            .await?;
        Self::parse_data(response).await
    }

    /// Classify one measurement. A missing reference row comes back as
    /// [`ClientError::Api`] with code `NO_STANDARD_DATA`.
    pub async fn evaluate(
        &self,
        input: MeasurementInput,
        age_policy: AgePolicy,
    ) -> Result<Assessment, ClientError> {
        let response = self
            .client
            .post(self.url("/growth/evaluate"))
            .json(&EvaluateBody { input, age_policy })
            .send()
            .await?;
        Self::parse_data(response).await
    }

    // ---- private helpers ----

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.api_url, path)
    }

    async fn store_session(&self, tokens: AuthTokens) -> UserInfo {
        *self.session.write().await = Some(Session {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        });
        tokens.user
    }

    async fn access_token(&self) -> Result<String, ClientError> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|s| s.access_token.clone())
            .ok_or(ClientError::NotAuthenticated)
    }

    async fn get_data<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let token = self.access_token().await?;
        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await?;
        Self::parse_data(response).await
    }

    async fn get_data_with_query<Q, T>(&self, path: &str, query: &Q) -> Result<T, ClientError>
    where
        Q: Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        let token = self.access_token().await?;
        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .bearer_auth(token)
            .send()
            .await?;
        Self::parse_data(response).await
    }

    async fn post_data<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        let token = self.access_token().await?;
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .bearer_auth(token)
            .send()
            .await?;
        Self::parse_data(response).await
    }

    async fn put_data<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        let token = self.access_token().await?;
        let response = self
            .client
            .put(self.url(path))
            .json(body)
            .bearer_auth(token)
            .send()
            .await?;
        Self::parse_data(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let token = self.access_token().await?;
        let response = self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await?;
        Self::check_status(response).await
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`ClientError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::debug!(status = status.as_u16(), %body, "API request failed");
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Parse a `{ "data": ... }` envelope and return its payload.
    async fn parse_data<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let envelope: DataEnvelope<T> = Self::parse_response(response).await?;
        Ok(envelope.data)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), ClientError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}
