#![no_std]
#![no_main]

// Ramps both motors forward and back, parking the chip in standby between runs.
use cortex_m_rt::entry;
use log::{info, LevelFilter};
use panic_halt as _;
use stm32f4xx_hal::{pac::Peripherals, prelude::*};

use tb6612fng::{ChannelPins, MotorDriver, CHANNEL_A, CHANNEL_B};
use tb6612fng_hardware::{logger, BoardHardware, BoardPin};

const STEP: i16 = 5;
const STEP_MS: u32 = 20;

#[entry]
fn main() -> ! {
    let cp = cortex_m::peripheral::Peripherals::take().unwrap();
    let pac = Peripherals::take().unwrap();

    logger::init(LevelFilter::Debug).unwrap();

    let BoardHardware { mut delay, motors } = BoardHardware::init(pac, cp);

    let mut driver = MotorDriver::dual_with_standby(
        motors,
        ChannelPins::new(BoardPin::AIn1, BoardPin::AIn2, BoardPin::PwmA),
        ChannelPins::new(BoardPin::BIn1, BoardPin::BIn2, BoardPin::PwmB),
        BoardPin::Standby,
    )
    .unwrap();

    // Above the audible range. Both channels sit on TIM3 so they have to agree.
    driver.set_pwm_frequency_all(20_000);

    loop {
        info!("forward");
        for speed in (0..=255).step_by(STEP as usize) {
            driver.set_speed_all(speed).unwrap();
            delay.delay_ms(STEP_MS);
        }

        info!("coast");
        driver.set_speed_all(0).unwrap();
        delay.delay_ms(500);

        info!("spin in place");
        driver.set_speed(CHANNEL_A, 160).unwrap();
        driver.set_speed(CHANNEL_B, -160).unwrap();
        delay.delay_ms(1000);

        info!("reverse");
        for speed in (0..=255).step_by(STEP as usize) {
            driver.set_speed_all(-speed).unwrap();
            delay.delay_ms(STEP_MS);
        }

        info!("standby");
        driver.shutdown().unwrap();
        delay.delay_ms(2000);
    }
}
