//! Driver for the Toshiba TB6612FNG dual H-bridge.
//!
//! The chip drives one or two brushed DC motors. Each channel has two
//! direction inputs (`xIN1`/`xIN2`) and one PWM input (`PWMx`), and the whole
//! chip shares a standby line (`STBY`). This crate only turns speed commands
//! into pin writes; it talks to hardware through the [`Platform`] trait.
//!
//! | xIN1 | xIN2 | PWMx | Output                |
//! |------|------|------|-----------------------|
//! | H    | L    | duty | Forward               |
//! | L    | H    | duty | Reverse               |
//! | L    | L    | -    | High-impedance (coast)|
//! | -    | -    | -    | STBY low: all off     |
#![cfg_attr(not(test), no_std)]

pub mod channel;
pub mod driver;
pub mod error;
pub mod platform;

pub use channel::{Channel, ChannelPins, PwmFrequency, CHANNEL_A, CHANNEL_B};
pub use driver::{MotorDriver, Wiring};
pub use error::Error;
pub use platform::Platform;

pub use embedded_hal::digital::PinState;
