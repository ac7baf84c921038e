#![no_std]

use embedded_hal::digital::PinState;
use fugit::HertzU32;
use log::{debug, warn};
use stm32f4xx_hal::{
    gpio::{Output, PushPull, PD0, PD1, PD2, PD3, PD4},
    pac::{CorePeripherals, Peripherals},
    prelude::*,
    timer::{Channel, Channel1, Channel2, SysDelay, Timer3},
};

use tb6612fng::Platform;

pub mod logger;
pub mod pwm;

use pwm::{default_frequency, scale_duty, MotorPwm, PWM_A, PWM_B};

/// TB6612FNG inputs as wired on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(defmt::Format)]
pub enum BoardPin {
    /// PD0
    Standby,
    /// PD1
    AIn1,
    /// PD2
    AIn2,
    /// PC6, TIM3 CH1
    PwmA,
    /// PD3
    BIn1,
    /// PD4
    BIn2,
    /// PC7, TIM3 CH2
    PwmB,
}

impl BoardPin {
    fn mask(self) -> u8 {
        1 << self as u8
    }

    fn pwm_channel(self) -> Option<Channel> {
        match self {
            BoardPin::PwmA => Some(PWM_A),
            BoardPin::PwmB => Some(PWM_B),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(defmt::Format)]
pub enum BoardError {
    /// Written before `configure_output`
    NotConfigured(BoardPin),
    /// Analog write to a pin with no timer channel behind it
    NotPwm(BoardPin),
    /// Digital write to a timer channel pin
    NotGpio(BoardPin),
}

pub struct MotorBoard {
    standby: PD0<Output<PushPull>>,
    a_in1: PD1<Output<PushPull>>,
    a_in2: PD2<Output<PushPull>>,
    b_in1: PD3<Output<PushPull>>,
    b_in2: PD4<Output<PushPull>>,
    pwm: MotorPwm,
    period: HertzU32,
    configured: u8,
}

impl MotorBoard {
    pub fn new(
        standby: PD0<Output<PushPull>>,
        a_in1: PD1<Output<PushPull>>,
        a_in2: PD2<Output<PushPull>>,
        b_in1: PD3<Output<PushPull>>,
        b_in2: PD4<Output<PushPull>>,
        pwm: MotorPwm,
    ) -> Self {
        Self {
            standby,
            a_in1,
            a_in2,
            b_in1,
            b_in2,
            pwm,
            period: default_frequency(),
            configured: 0,
        }
    }

    /// Current TIM3 rate, shared by PWMA and PWMB
    pub fn period(&self) -> HertzU32 {
        self.period
    }

    fn check(&self, pin: BoardPin) -> Result<(), BoardError> {
        if self.configured & pin.mask() == 0 {
            warn!("{:?} written before it was configured", pin);
            return Err(BoardError::NotConfigured(pin));
        }
        Ok(())
    }

    fn set_rate(&mut self, rate: HertzU32) {
        if rate != self.period {
            debug!("TIM3 period {} Hz -> {} Hz", self.period.raw(), rate.raw());
            self.pwm.set_period(rate);
            self.period = rate;
        }
    }
}

impl Platform for MotorBoard {
    type Pin = BoardPin;
    type Error = BoardError;

    fn configure_output(&mut self, pin: BoardPin) -> Result<(), BoardError> {
        // GPIO pins are push-pull from construction, PWM pins need their channel on
        if let Some(channel) = pin.pwm_channel() {
            self.pwm.set_duty(channel, 0);
            self.pwm.enable(channel);
        }
        self.configured |= pin.mask();
        Ok(())
    }

    fn write_digital(&mut self, pin: BoardPin, level: PinState) -> Result<(), BoardError> {
        self.check(pin)?;

        let high = level == PinState::High;
        let out: &mut dyn OutputLevel = match pin {
            BoardPin::Standby => &mut self.standby,
            BoardPin::AIn1 => &mut self.a_in1,
            BoardPin::AIn2 => &mut self.a_in2,
            BoardPin::BIn1 => &mut self.b_in1,
            BoardPin::BIn2 => &mut self.b_in2,
            BoardPin::PwmA | BoardPin::PwmB => return Err(BoardError::NotGpio(pin)),
        };
        out.set_level(high);

        Ok(())
    }

    fn write_analog(
        &mut self,
        pin: BoardPin,
        duty: u16,
        frequency: Option<HertzU32>,
    ) -> Result<(), BoardError> {
        self.check(pin)?;
        let channel = pin.pwm_channel().ok_or(BoardError::NotPwm(pin))?;

        self.set_rate(frequency.unwrap_or_else(default_frequency));
        let max = self.pwm.get_max_duty();
        self.pwm.set_duty(channel, scale_duty(duty, max));

        Ok(())
    }
}

/// Lets the GPIO outputs of different port/pin types share one write path.
trait OutputLevel {
    fn set_level(&mut self, high: bool);
}

impl<const P: char, const N: u8> OutputLevel for stm32f4xx_hal::gpio::Pin<P, N, Output<PushPull>> {
    fn set_level(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}

pub struct BoardHardware {
    pub delay: SysDelay,
    pub motors: MotorBoard,
}

impl BoardHardware {
    pub fn init(pac: Peripherals, core: CorePeripherals) -> Self {
        let rcc = pac.RCC.constrain();
        let clocks = rcc.cfgr.sysclk(168.MHz()).freeze();
        let delay = core.SYST.delay(&clocks);

        let gpioc = pac.GPIOC.split();
        let gpiod = pac.GPIOD.split();

        // Start low so nothing moves before the driver takes over
        let standby = gpiod.pd0.into_push_pull_output();
        let a_in1 = gpiod.pd1.into_push_pull_output();
        let a_in2 = gpiod.pd2.into_push_pull_output();
        let b_in1 = gpiod.pd3.into_push_pull_output();
        let b_in2 = gpiod.pd4.into_push_pull_output();

        let tim3 = Timer3::new(pac.TIM3, &clocks);
        let tim3_pins = (Channel1::new(gpioc.pc6), Channel2::new(gpioc.pc7));
        let pwm = tim3.pwm_hz(tim3_pins, default_frequency());

        Self {
            delay,
            motors: MotorBoard::new(standby, a_in1, a_in2, b_in1, b_in2, pwm),
        }
    }
}
