use embedded_hal::digital::PinState;
use log::{debug, trace};

use crate::{
    channel::{Channel, ChannelPins, PwmFrequency},
    error::Error,
    platform::Platform,
};

/// Pin wiring of an `N`-channel driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wiring<Pin, const N: usize> {
    pub channels: [ChannelPins<Pin>; N],
    /// STBY, if it is wired to the controller rather than tied high
    pub standby: Option<Pin>,
}

/// A TB6612FNG with one (`N = 1`) or both (`N = 2`) channels wired up.
///
/// Pin assignments are fixed once constructed. Dropping the driver leaves the
/// pins as they are; call [`MotorDriver::shutdown`] first to stop the motors.
pub struct MotorDriver<P: Platform, const N: usize> {
    platform: P,
    standby: Option<P::Pin>,
    channels: [Channel<P::Pin>; N],
}

impl<P: Platform> MotorDriver<P, 1> {
    pub fn single(platform: P, channel: ChannelPins<P::Pin>) -> Result<Self, Error<P::Error>> {
        Self::new(
            platform,
            Wiring {
                channels: [channel],
                standby: None,
            },
        )
    }

    pub fn single_with_standby(
        platform: P,
        channel: ChannelPins<P::Pin>,
        standby: P::Pin,
    ) -> Result<Self, Error<P::Error>> {
        Self::new(
            platform,
            Wiring {
                channels: [channel],
                standby: Some(standby),
            },
        )
    }
}

impl<P: Platform> MotorDriver<P, 2> {
    pub fn dual(
        platform: P,
        a: ChannelPins<P::Pin>,
        b: ChannelPins<P::Pin>,
    ) -> Result<Self, Error<P::Error>> {
        Self::new(
            platform,
            Wiring {
                channels: [a, b],
                standby: None,
            },
        )
    }

    pub fn dual_with_standby(
        platform: P,
        a: ChannelPins<P::Pin>,
        b: ChannelPins<P::Pin>,
        standby: P::Pin,
    ) -> Result<Self, Error<P::Error>> {
        Self::new(
            platform,
            Wiring {
                channels: [a, b],
                standby: Some(standby),
            },
        )
    }
}

impl<P: Platform, const N: usize> MotorDriver<P, N> {
    const CHANNEL_COUNT_OK: () = assert!(N == 1 || N == 2, "TB6612FNG has one or two channels");

    /// Configures every wired pin as an output, then shuts the chip down so
    /// nothing moves until the first speed command.
    pub fn new(mut platform: P, wiring: Wiring<P::Pin, N>) -> Result<Self, Error<P::Error>> {
        #[allow(clippy::let_unit_value)]
        let () = Self::CHANNEL_COUNT_OK;

        if let Some(standby) = wiring.standby {
            platform
                .configure_output(standby)
                .map_err(Error::Platform)?;
        }

        for pins in wiring.channels.iter() {
            for pin in [pins.forward, pins.reverse, pins.pwm] {
                platform.configure_output(pin).map_err(Error::Platform)?;
            }
        }

        let mut driver = Self {
            platform,
            standby: wiring.standby,
            channels: wiring.channels.map(Channel::new),
        };

        debug!(
            "tb6612fng: {} channel(s), standby {}",
            N,
            if driver.standby.is_some() {
                "wired"
            } else {
                "not wired"
            }
        );

        driver.shutdown()?;
        Ok(driver)
    }

    pub fn channel_count(&self) -> usize {
        N
    }

    pub fn standby(&self) -> Option<P::Pin> {
        self.standby
    }

    pub fn channel(&self, channel: usize) -> Option<&Channel<P::Pin>> {
        self.channels.get(channel)
    }

    pub fn pwm_frequency(&self, channel: usize) -> Option<PwmFrequency> {
        self.channel(channel).map(Channel::frequency)
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Give the platform back. Pins keep their last written state.
    pub fn release(self) -> P {
        self.platform
    }

    /// Store the PWM rate for one channel, used from the next speed command.
    ///
    /// Rates outside 1..=65535 Hz are stored as [`PwmFrequency::Default`].
    /// Nothing is written to the hardware here.
    pub fn set_pwm_frequency(
        &mut self,
        channel: usize,
        frequency_hz: u32,
    ) -> Result<PwmFrequency, Error<P::Error>> {
        let ch = self
            .channels
            .get_mut(channel)
            .ok_or(Error::NoSuchChannel(channel))?;

        let frequency = PwmFrequency::from_hz(frequency_hz);
        if frequency.hz() != frequency_hz {
            debug!(
                "tb6612fng: channel {} pwm {} Hz out of range, using platform default",
                channel, frequency_hz
            );
        }
        ch.set_frequency(frequency);

        Ok(frequency)
    }

    /// [`MotorDriver::set_pwm_frequency`] for every channel.
    pub fn set_pwm_frequency_all(&mut self, frequency_hz: u32) -> PwmFrequency {
        let mut frequency = PwmFrequency::from_hz(frequency_hz);
        // every index below N exists, so each call stores and returns
        for channel in 0..N {
            if let Ok(stored) = self.set_pwm_frequency(channel, frequency_hz) {
                frequency = stored;
            }
        }
        frequency
    }

    /// Stop every motor and, if STBY is wired, put the chip in standby.
    ///
    /// PWM goes to zero duty and both direction inputs go low (coast).
    /// Calling this repeatedly leaves the pins in the same state.
    pub fn shutdown(&mut self) -> Result<(), Error<P::Error>> {
        trace!("tb6612fng: shutdown");

        if let Some(standby) = self.standby {
            self.platform
                .write_digital(standby, PinState::Low)
                .map_err(Error::Platform)?;
        }

        for ch in self.channels.iter() {
            let pins = ch.pins();
            self.platform
                .write_analog(pins.pwm, 0, ch.frequency().as_rate())
                .map_err(Error::Platform)?;
            self.platform
                .write_digital(pins.forward, PinState::Low)
                .map_err(Error::Platform)?;
            self.platform
                .write_digital(pins.reverse, PinState::Low)
                .map_err(Error::Platform)?;
        }

        Ok(())
    }

    /// Drive one channel.
    ///
    /// * `speed` - -255..=255, positive is forward. The magnitude goes to
    ///   the PWM write unchecked.
    ///
    /// Any non-zero speed wakes the chip from standby first. Zero puts the
    /// channel in coast but leaves the PWM duty where it was.
    pub fn set_speed(&mut self, channel: usize, speed: i16) -> Result<(), Error<P::Error>> {
        let ch = *self
            .channels
            .get(channel)
            .ok_or(Error::NoSuchChannel(channel))?;
        let pins = ch.pins();

        trace!("tb6612fng: channel {} speed {}", channel, speed);

        if speed != 0 {
            if let Some(standby) = self.standby {
                self.platform
                    .write_digital(standby, PinState::High)
                    .map_err(Error::Platform)?;
            }
        }

        // TODO: short brake (xIN1 = xIN2 = H) as an alternative to coast at zero speed
        let (forward, reverse) = match speed {
            0 => (PinState::Low, PinState::Low),
            s if s > 0 => (PinState::High, PinState::Low),
            _ => (PinState::Low, PinState::High),
        };

        self.platform
            .write_digital(pins.forward, forward)
            .map_err(Error::Platform)?;
        self.platform
            .write_digital(pins.reverse, reverse)
            .map_err(Error::Platform)?;

        if speed != 0 {
            self.platform
                .write_analog(pins.pwm, speed.unsigned_abs(), ch.frequency().as_rate())
                .map_err(Error::Platform)?;
        }

        Ok(())
    }

    /// [`MotorDriver::set_speed`] for every channel, in channel order.
    pub fn set_speed_all(&mut self, speed: i16) -> Result<(), Error<P::Error>> {
        for channel in 0..N {
            self.set_speed(channel, speed)?;
        }
        Ok(())
    }
}
