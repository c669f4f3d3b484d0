use crate::domain::{
    dto::{ActionFailure, ActionResponse},
    entity::{ActionCode, OutputState},
    ports::{ConfigStorage, LedcDriver},
};

use super::{PwmOutputActor, payload::parse_duty_cycle};

impl<S: ConfigStorage, D: LedcDriver> PwmOutputActor<S, D> {
    /// Run an action against the current configuration.
    ///
    /// Every code is handled; refused actions come back as
    /// [`ActionResponse::Failure`] and change nothing.
    pub fn dispatch(&mut self, action: i32, payload: &str) -> (bool, ActionResponse) {
        let response = match ActionCode::from_code(action) {
            Some(ActionCode::State) => self.switch_output(payload),
            Some(ActionCode::DutyCycle) => self.change_duty_cycle(payload),
            None => ActionResponse::Failure(ActionFailure::InvalidAction),
        };
        (true, response)
    }

    fn switch_output(&mut self, payload: &str) -> ActionResponse {
        match payload {
            "0" => {
                self.output = OutputState::Off;
                self.set_duty_cycle(0);
            }
            "1" => {
                self.output = OutputState::On;
                self.set_duty_cycle(self.config.duty_cycle);
            }
            _ => return ActionResponse::Failure(ActionFailure::InvalidPayload),
        }
        ActionResponse::Acknowledged
    }

    fn change_duty_cycle(&mut self, payload: &str) -> ActionResponse {
        let Some(requested) = parse_duty_cycle(payload, self.parsing) else {
            return ActionResponse::Failure(ActionFailure::MalformedDutyCycle);
        };
        let Some(duty_cycle) = u32::try_from(requested)
            .ok()
            .filter(|duty| self.config.accepts(*duty))
        else {
            return ActionResponse::Failure(ActionFailure::DutyCycleOutOfRange);
        };

        self.config.duty_cycle = duty_cycle;
        let saved = !self.config.save_duty_cycle || self.persist_config().is_ok();

        self.output = OutputState::On;
        self.set_duty_cycle(duty_cycle);

        if saved {
            ActionResponse::Success
        } else {
            ActionResponse::NotSaved
        }
    }
}
