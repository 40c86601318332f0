//! Outbound call creation

use dialogo_config::TelephonyConfig;
use serde::Deserialize;
use tracing::info;

use crate::TelephonyError;

/// REST client for the provider's call API.
pub struct TwilioClient {
    client: reqwest::Client,
    api_base: String,
    account_sid: String,
    auth_token: String,
    from_number: String,
}

#[derive(Deserialize)]
struct CreateCallResponse {
    sid: String,
}

impl TwilioClient {
    pub fn new(config: TelephonyConfig) -> Result<Self, TelephonyError> {
        let account_sid = config
            .account_sid
            .ok_or(TelephonyError::MissingCredential("telephony.account_sid"))?;
        let auth_token = config
            .auth_token
            .ok_or(TelephonyError::MissingCredential("telephony.auth_token"))?;
        let from_number = config
            .from_number
            .ok_or(TelephonyError::MissingCredential("telephony.from_number"))?;

        Ok(Self {
            client: reqwest::Client::new(),
            api_base: config.api_base,
            account_sid,
            auth_token,
            from_number,
        })
    }

    /// Place an outbound call. `answer_url` serves the entry control
    /// document when the callee picks up; `status_url` receives lifecycle
    /// events. Returns the provider's call sid.
    pub async fn create_call(
        &self,
        to: &str,
        answer_url: &str,
        status_url: &str,
    ) -> Result<String, TelephonyError> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Calls.json",
            self.api_base, self.account_sid
        );

        let params: Vec<(&str, &str)> = vec![
            ("To", to),
            ("From", &self.from_number),
            ("Url", answer_url),
            ("Method", "POST"),
            ("StatusCallback", status_url),
            ("StatusCallbackMethod", "POST"),
            ("StatusCallbackEvent", "initiated"),
            ("StatusCallbackEvent", "ringing"),
            ("StatusCallbackEvent", "answered"),
            ("StatusCallbackEvent", "completed"),
        ];

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(|e| TelephonyError::Provider(e.to_string()))?
            .error_for_status()
            .map_err(|e| TelephonyError::Provider(e.to_string()))?;

        let created: CreateCallResponse = response
            .json()
            .await
            .map_err(|e| TelephonyError::Provider(e.to_string()))?;

        info!(call_sid = %created.sid, to, "outbound call created");
        Ok(created.sid)
    }
}
