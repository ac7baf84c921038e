use embedded_hal::digital::PinState;
use fugit::HertzU32;

/// The GPIO/PWM surface the driver writes to.
///
/// Pins are plain identifiers; the implementor decides what they map to.
/// Some PWM timers share one frequency across several pins, so honouring a
/// requested frequency (or not) is up to the implementor as well.
pub trait Platform {
    type Pin: Copy + PartialEq + core::fmt::Debug;
    type Error: core::fmt::Debug;

    /// Must be called once for a pin before it is written to.
    fn configure_output(&mut self, pin: Self::Pin) -> Result<(), Self::Error>;

    fn write_digital(&mut self, pin: Self::Pin, level: PinState) -> Result<(), Self::Error>;

    /// Write a PWM duty on the 0..=255 scale.
    ///
    /// * `duty` - passed through unclamped, scaling is platform defined
    /// * `frequency` - `None` selects the platform's default PWM rate
    fn write_analog(
        &mut self,
        pin: Self::Pin,
        duty: u16,
        frequency: Option<HertzU32>,
    ) -> Result<(), Self::Error>;
}

impl<P: Platform + ?Sized> Platform for &mut P {
    type Pin = P::Pin;
    type Error = P::Error;

    fn configure_output(&mut self, pin: Self::Pin) -> Result<(), Self::Error> {
        (**self).configure_output(pin)
    }

    fn write_digital(&mut self, pin: Self::Pin, level: PinState) -> Result<(), Self::Error> {
        (**self).write_digital(pin, level)
    }

    fn write_analog(
        &mut self,
        pin: Self::Pin,
        duty: u16,
        frequency: Option<HertzU32>,
    ) -> Result<(), Self::Error> {
        (**self).write_analog(pin, duty, frequency)
    }
}
