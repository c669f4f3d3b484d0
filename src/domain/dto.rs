use heapless::String;
use serde::{Deserialize, Serialize};

use crate::{
    config::{NAME_CAPACITY, RESPONSE_CAPACITY},
    domain::entity::PwmConfig,
};

/// Encoded action response.
pub type ResponseBody = String<RESPONSE_CAPACITY>;

/// Persisted configuration record.
///
/// Field names match the records already stored on deployed devices. Every
/// field is required on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRecord {
    #[serde(rename = "Name")]
    pub name: String<NAME_CAPACITY>,
    #[serde(rename = "Pin")]
    pub pin: u8,
    #[serde(rename = "saveDutyCycle")]
    pub save_duty_cycle: bool,
    #[serde(rename = "dutyCycle")]
    pub duty_cycle: u32,
    #[serde(rename = "ledc_channel")]
    pub channel: u8,
    #[serde(rename = "ledc_resolution")]
    pub resolution: u8,
    #[serde(rename = "ledc_frequency")]
    pub frequency: u32,
}

impl ConfigRecord {
    pub fn new(name: &String<NAME_CAPACITY>, config: &PwmConfig) -> Self {
        Self {
            name: name.clone(),
            pin: config.pin,
            save_duty_cycle: config.save_duty_cycle,
            duty_cycle: config.duty_cycle,
            channel: config.channel,
            resolution: config.resolution,
            frequency: config.frequency,
        }
    }

    pub const fn pwm_config(&self) -> PwmConfig {
        PwmConfig {
            pin: self.pin,
            save_duty_cycle: self.save_duty_cycle,
            duty_cycle: self.duty_cycle,
            channel: self.channel,
            resolution: self.resolution,
            frequency: self.frequency,
        }
    }
}

/// Reason an action was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionFailure {
    /// `state` payload other than `"0"` or `"1"`
    InvalidPayload,
    /// `dutycycle` payload outside `0..=2^resolution - 1`
    DutyCycleOutOfRange,
    /// `dutycycle` payload is not an integer
    MalformedDutyCycle,
    /// Unknown action code
    InvalidAction,
}

impl ActionFailure {
    pub const fn message(self) -> &'static str {
        match self {
            ActionFailure::InvalidPayload => "Invalid payload",
            ActionFailure::DutyCycleOutOfRange => "Duty cycle out of range",
            ActionFailure::MalformedDutyCycle => "Malformed duty cycle",
            ActionFailure::InvalidAction => "Invalid action",
        }
    }
}

/// Structured result of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionResponse {
    /// `{"Response":"OK"}`
    Acknowledged,
    /// `{"success":true}`
    Success,
    /// `{"success":true,"Response":"Duty cycle not saved"}`
    ///
    /// The runtime change was applied but writing it to the store failed.
    NotSaved,
    /// `{"success":false,"Response":"<message>"}`
    Failure(ActionFailure),
}

/// JSON shape shared by every response.
#[derive(Serialize)]
struct ResponsePayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    success: Option<bool>,
    #[serde(rename = "Response", skip_serializing_if = "Option::is_none")]
    response: Option<&'a str>,
}

impl ActionResponse {
    pub const fn is_success(self) -> bool {
        !matches!(self, ActionResponse::Failure(_))
    }

    const fn payload(self) -> ResponsePayload<'static> {
        match self {
            ActionResponse::Acknowledged => ResponsePayload {
                success: None,
                response: Some("OK"),
            },
            ActionResponse::Success => ResponsePayload {
                success: Some(true),
                response: None,
            },
            ActionResponse::NotSaved => ResponsePayload {
                success: Some(true),
                response: Some("Duty cycle not saved"),
            },
            ActionResponse::Failure(failure) => ResponsePayload {
                success: Some(false),
                response: Some(failure.message()),
            },
        }
    }

    /// Encode the response body sent back to the framework.
    pub fn to_body(self) -> ResponseBody {
        // Longest body is well under RESPONSE_CAPACITY.
        serde_json_core::to_string(&self.payload()).unwrap_or_default()
    }
}
