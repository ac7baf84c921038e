#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// A GPIO or PWM write was rejected by the platform
    Platform(E),
    /// Channel index is not below the driver's channel count
    NoSuchChannel(usize),
}

impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Platform(e) => write!(f, "platform error: {:?}", e),
            Error::NoSuchChannel(c) => write!(f, "no such channel: {}", c),
        }
    }
}
