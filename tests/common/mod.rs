#![allow(dead_code)]

use std::collections::BTreeMap;

use fugit::HertzU32;
use tb6612fng::{PinState, Platform};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Configure(u8),
    Digital(u8, PinState),
    Analog(u8, u16, Option<HertzU32>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    Unconfigured(u8),
    Broken(u8),
}

/// Remembers every write and the resulting pin state.
#[derive(Debug, Default)]
pub struct RecordingPlatform {
    pub events: Vec<Event>,
    pub configured: Vec<u8>,
    pub levels: BTreeMap<u8, PinState>,
    pub duties: BTreeMap<u8, (u16, Option<HertzU32>)>,
    /// Writes to this pin fail
    pub broken: Option<u8>,
}

impl RecordingPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self, pin: u8) -> Option<PinState> {
        self.levels.get(&pin).copied()
    }

    pub fn duty(&self, pin: u8) -> Option<u16> {
        self.duties.get(&pin).map(|(duty, _)| *duty)
    }

    pub fn frequency(&self, pin: u8) -> Option<HertzU32> {
        self.duties.get(&pin).and_then(|(_, freq)| *freq)
    }

    /// Direction levels and PWM output of one channel's pins
    pub fn channel_state(
        &self,
        (forward, reverse, pwm): (u8, u8, u8),
    ) -> (Option<PinState>, Option<PinState>, Option<(u16, Option<HertzU32>)>) {
        (
            self.level(forward),
            self.level(reverse),
            self.duties.get(&pwm).copied(),
        )
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    fn check(&self, pin: u8) -> Result<(), MockError> {
        if self.broken == Some(pin) {
            return Err(MockError::Broken(pin));
        }
        if !self.configured.contains(&pin) {
            return Err(MockError::Unconfigured(pin));
        }
        Ok(())
    }
}

impl Platform for RecordingPlatform {
    type Pin = u8;
    type Error = MockError;

    fn configure_output(&mut self, pin: u8) -> Result<(), MockError> {
        if self.broken == Some(pin) {
            return Err(MockError::Broken(pin));
        }
        self.events.push(Event::Configure(pin));
        self.configured.push(pin);
        Ok(())
    }

    fn write_digital(&mut self, pin: u8, level: PinState) -> Result<(), MockError> {
        self.check(pin)?;
        self.events.push(Event::Digital(pin, level));
        self.levels.insert(pin, level);
        Ok(())
    }

    fn write_analog(
        &mut self,
        pin: u8,
        duty: u16,
        frequency: Option<HertzU32>,
    ) -> Result<(), MockError> {
        self.check(pin)?;
        self.events.push(Event::Analog(pin, duty, frequency));
        self.duties.insert(pin, (duty, frequency));
        Ok(())
    }
}
