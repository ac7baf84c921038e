use stm32f4xx_hal::{
    pac::TIM3,
    timer::{pwm::ChannelBuilder, Channel, PwmHz},
};

use fugit::{HertzU32, RateExtU32};

/// TIM3 CH1 on PC6 (PWMA) and CH2 on PC7 (PWMB). Both channels share the
/// timer period, so a frequency change on one is a change on both.
pub type MotorPwm = PwmHz<TIM3, (ChannelBuilder<TIM3, 0>, ChannelBuilder<TIM3, 1>)>;

pub const PWM_A: Channel = Channel::C1;
pub const PWM_B: Channel = Channel::C2;

/// Timer rate used when a channel asks for the platform default
pub fn default_frequency() -> HertzU32 {
    10.kHz()
}

/// Scale a 0..=255 duty onto the timer's duty range, saturating at full on.
pub fn scale_duty(duty: u16, max_duty: u16) -> u16 {
    let duty = duty.min(255) as u32;
    (duty * max_duty as u32 / 255) as u16
}
