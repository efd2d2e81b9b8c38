//! Mason-points HTTP client implementation.

use reqwest::Client;
use std::time::Duration;

use crate::error::ClientError;
use crate::types::{
    AdjustOutcome, AdjustRequest, ApiErrorResponse, ClaimOutcome, EnrollMasonRequest,
    EnrolledMason, LedgerHistory, Lift, LiftDecision, MasonProfile, PlaceRedemptionRequest,
    RedemptionRecord, RewardItem, SubmitLiftRequest, UpdateRedemptionStatusRequest,
};

/// Mason-points API client.
///
/// Mason-facing methods take the mason's bearer token per call; operator
/// methods use the API key and operator ID the client was built with.
#[derive(Debug, Clone)]
pub struct MasonPointsClient {
    client: Client,
    base_url: String,
    operator_api_key: Option<String>,
    operator_id: Option<String>,
}

impl MasonPointsClient {
    /// Create a new client without operator credentials.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the mason-points service
    ///   (e.g., `"http://mason-points:8080"`)
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_options(base_url, ClientOptions::default())
    }

    /// Create a new client with custom options.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built (should not happen with
    /// default settings).
    #[must_use]
    pub fn with_options(base_url: impl Into<String>, options: ClientOptions) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            operator_api_key: options.operator_api_key,
            operator_id: options.operator_id,
        }
    }

    // =========================================================================
    // Mason Methods (bearer token per call)
    // =========================================================================

    /// Get the authenticated mason's profile and balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn get_profile(&self, mason_jwt: &str) -> Result<MasonProfile, ClientError> {
        let url = format!("{}/v1/masons/me", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("authorization", format!("Bearer {mason_jwt}"))
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Get the authenticated mason's ledger history, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn get_ledger(
        &self,
        mason_jwt: &str,
        limit: usize,
        offset: usize,
    ) -> Result<LedgerHistory, ClientError> {
        let url = format!(
            "{}/v1/masons/me/ledger?limit={limit}&offset={offset}",
            self.base_url
        );

        let response = self
            .client
            .get(&url)
            .header("authorization", format!("Bearer {mason_jwt}"))
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Submit a pending bag lift.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn submit_lift(
        &self,
        mason_jwt: &str,
        request: SubmitLiftRequest,
    ) -> Result<Lift, ClientError> {
        let url = format!("{}/v1/lifts", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("authorization", format!("Bearer {mason_jwt}"))
            .json(&request)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Place a redemption.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error,
    /// including the typed `InsufficientPoints` and `InsufficientStock`
    /// outcomes.
    pub async fn place_redemption(
        &self,
        mason_jwt: &str,
        request: PlaceRedemptionRequest,
    ) -> Result<RedemptionRecord, ClientError> {
        let url = format!("{}/v1/redemptions", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("authorization", format!("Bearer {mason_jwt}"))
            .json(&request)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Claim a slab achievement bonus.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error;
    /// a second claim surfaces the typed `AlreadyClaimed` outcome.
    pub async fn claim_slab(
        &self,
        mason_jwt: &str,
        slab_id: &str,
    ) -> Result<ClaimOutcome, ClientError> {
        let url = format!("{}/v1/slabs/{slab_id}/claim", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("authorization", format!("Bearer {mason_jwt}"))
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// List the reward catalogue.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn list_rewards(&self) -> Result<Vec<RewardItem>, ClientError> {
        let url = format!("{}/v1/rewards", self.base_url);

        let response = self.client.get(&url).send().await?;

        Self::handle_response(response).await
    }

    // =========================================================================
    // Operator Methods
    // =========================================================================

    /// Enroll a new mason.
    ///
    /// # Errors
    ///
    /// Returns an error if operator credentials are missing, the request
    /// fails, or the server returns an error.
    pub async fn enroll_mason(
        &self,
        request: EnrollMasonRequest,
    ) -> Result<EnrolledMason, ClientError> {
        let url = format!("{}/v1/masons", self.base_url);
        let builder = self.operator_request(self.client.post(&url))?;

        let response = builder.json(&request).send().await?;

        Self::handle_response(response).await
    }

    /// Approve a pending bag lift.
    ///
    /// # Errors
    ///
    /// Returns an error if operator credentials are missing, the request
    /// fails, or the server returns an error.
    pub async fn approve_lift(&self, lift_id: &str) -> Result<LiftDecision, ClientError> {
        self.lift_decision(lift_id, "approve").await
    }

    /// Reject a bag lift (reversing its credit if already approved).
    ///
    /// # Errors
    ///
    /// Returns an error if operator credentials are missing, the request
    /// fails, or the server returns an error.
    pub async fn reject_lift(&self, lift_id: &str) -> Result<LiftDecision, ClientError> {
        self.lift_decision(lift_id, "reject").await
    }

    /// Advance a redemption through its fulfilment states.
    ///
    /// # Errors
    ///
    /// Returns an error if operator credentials are missing, the request
    /// fails, or the server returns an error.
    pub async fn update_redemption_status(
        &self,
        redemption_id: &str,
        status: mason_points_core::RedemptionStatus,
    ) -> Result<RedemptionRecord, ClientError> {
        let url = format!("{}/v1/redemptions/{redemption_id}/status", self.base_url);
        let builder = self.operator_request(self.client.post(&url))?;

        let response = builder
            .json(&UpdateRedemptionStatusRequest { status })
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Apply a manual adjustment to a mason's balance.
    ///
    /// # Errors
    ///
    /// Returns an error if operator credentials are missing, the request
    /// fails, or the server returns an error.
    pub async fn adjust(
        &self,
        mason_id: &str,
        request: AdjustRequest,
    ) -> Result<AdjustOutcome, ClientError> {
        let url = format!("{}/v1/masons/{mason_id}/adjustments", self.base_url);
        let builder = self.operator_request(self.client.post(&url))?;

        let response = builder.json(&request).send().await?;

        Self::handle_response(response).await
    }

    async fn lift_decision(
        &self,
        lift_id: &str,
        action: &str,
    ) -> Result<LiftDecision, ClientError> {
        let url = format!("{}/v1/lifts/{lift_id}/{action}", self.base_url);
        let builder = self.operator_request(self.client.post(&url))?;

        let response = builder.send().await?;

        Self::handle_response(response).await
    }

    /// Attach operator credentials to a request.
    fn operator_request(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, ClientError> {
        let api_key = self.operator_api_key.as_ref().ok_or_else(|| {
            ClientError::Configuration("operator API key not configured".into())
        })?;
        let operator_id = self.operator_id.as_ref().ok_or_else(|| {
            ClientError::Configuration("operator ID not configured".into())
        })?;

        Ok(builder
            .header("x-api-key", api_key)
            .header("x-operator-id", operator_id))
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Try to parse error response
        let error_body: Result<ApiErrorResponse, _> = response.json().await;

        match error_body {
            Ok(api_error) => {
                let code = api_error.error.code.as_str();
                let message = api_error.error.message.clone();
                let detail = |key: &str| {
                    api_error
                        .error
                        .details
                        .as_ref()
                        .and_then(|d| d.get(key))
                        .and_then(serde_json::Value::as_i64)
                        .unwrap_or(0)
                };

                // Map specific error codes to typed errors
                match code {
                    "insufficient_points" => Err(ClientError::InsufficientPoints {
                        balance: detail("balance"),
                        required: detail("required"),
                    }),
                    "insufficient_stock" => Err(ClientError::InsufficientStock {
                        available: detail("available"),
                        requested: detail("requested"),
                    }),
                    "already_claimed" => Err(ClientError::AlreadyClaimed { message }),
                    _ => Err(ClientError::Api {
                        code: code.to_string(),
                        message,
                        status: status.as_u16(),
                    }),
                }
            }
            Err(_) => Err(ClientError::Api {
                code: "unknown".to_string(),
                message: format!("HTTP {status}"),
                status: status.as_u16(),
            }),
        }
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
    /// Operator API key for back-office methods.
    pub operator_api_key: Option<String>,
    /// Operator ID recorded on approvals.
    pub operator_id: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            operator_api_key: None,
            operator_id: None,
        }
    }
}

impl ClientOptions {
    /// Create options with operator credentials.
    #[must_use]
    pub fn with_operator(api_key: impl Into<String>, operator_id: impl Into<String>) -> Self {
        Self {
            timeout_seconds: 30,
            operator_api_key: Some(api_key.into()),
            operator_id: Some(operator_id.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let client = MasonPointsClient::new("http://localhost:8080");
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = MasonPointsClient::new("http://localhost:8080/");
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn operator_methods_require_credentials() {
        let client = MasonPointsClient::new("http://localhost:8080");
        let result = client.operator_request(client.client.post("http://localhost:8080/v1/masons"));
        assert!(matches!(result, Err(ClientError::Configuration(_))));
    }

    #[test]
    fn client_options() {
        let options = ClientOptions::with_operator("key", "op-1");
        let client = MasonPointsClient::with_options("http://localhost:8080", options);
        assert_eq!(client.operator_id.as_deref(), Some("op-1"));
    }
}
