use fugit::{HertzU32, RateExtU32};

pub const CHANNEL_A: usize = 0;
pub const CHANNEL_B: usize = 1;

/// PWM rate stored for a channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmFrequency {
    /// Use whatever rate the platform's PWM runs at
    #[default]
    Default,
    Fixed(u16),
}

impl PwmFrequency {
    /// Anything outside 1..=65535 Hz falls back to [`PwmFrequency::Default`].
    pub fn from_hz(hz: u32) -> Self {
        match u16::try_from(hz) {
            Ok(0) | Err(_) => PwmFrequency::Default,
            Ok(hz) => PwmFrequency::Fixed(hz),
        }
    }

    /// 0 for the platform default
    pub fn hz(&self) -> u32 {
        match self {
            PwmFrequency::Default => 0,
            PwmFrequency::Fixed(hz) => *hz as u32,
        }
    }

    pub fn as_rate(&self) -> Option<HertzU32> {
        match self {
            PwmFrequency::Default => None,
            PwmFrequency::Fixed(hz) => Some((*hz as u32).Hz()),
        }
    }
}

/// Pin assignment for one H-bridge channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelPins<Pin> {
    /// xIN1
    pub forward: Pin,
    /// xIN2
    pub reverse: Pin,
    /// PWMx
    pub pwm: Pin,
}

impl<Pin> ChannelPins<Pin> {
    pub fn new(forward: Pin, reverse: Pin, pwm: Pin) -> Self {
        Self {
            forward,
            reverse,
            pwm,
        }
    }
}

/// A configured channel: its pins plus the PWM rate used for speed commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Channel<Pin> {
    pins: ChannelPins<Pin>,
    frequency: PwmFrequency,
}

impl<Pin: Copy> Channel<Pin> {
    pub(crate) fn new(pins: ChannelPins<Pin>) -> Self {
        Self {
            pins,
            frequency: PwmFrequency::Default,
        }
    }

    pub fn pins(&self) -> ChannelPins<Pin> {
        self.pins
    }

    pub fn frequency(&self) -> PwmFrequency {
        self.frequency
    }

    pub(crate) fn set_frequency(&mut self, frequency: PwmFrequency) {
        self.frequency = frequency;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_range_frequencies_are_kept() {
        assert_eq!(PwmFrequency::from_hz(1), PwmFrequency::Fixed(1));
        assert_eq!(PwmFrequency::from_hz(500), PwmFrequency::Fixed(500));
        assert_eq!(PwmFrequency::from_hz(65535), PwmFrequency::Fixed(65535));
        assert_eq!(PwmFrequency::from_hz(20_000).hz(), 20_000);
    }

    #[test]
    fn out_of_range_frequencies_become_default() {
        for hz in [0, 65536, 100_000, u32::MAX] {
            assert_eq!(PwmFrequency::from_hz(hz), PwmFrequency::Default);
            assert_eq!(PwmFrequency::from_hz(hz).hz(), 0);
        }
    }

    #[test]
    fn default_frequency_has_no_rate() {
        assert_eq!(PwmFrequency::Default.as_rate(), None);
        assert_eq!(PwmFrequency::Fixed(1000).as_rate(), Some(1000.Hz()));
    }

    #[test]
    fn new_channel_uses_default_frequency() {
        let mut channel = Channel::new(ChannelPins::new(2, 3, 4));
        assert_eq!(channel.frequency(), PwmFrequency::Default);
        assert_eq!(channel.pins().pwm, 4);

        channel.set_frequency(PwmFrequency::Fixed(800));
        assert_eq!(channel.frequency().hz(), 800);
    }
}
