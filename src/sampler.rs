use std::{fmt::Debug, thread::JoinHandle};

use anyhow::Context;
use embedded_hal::{
    blocking::{
        delay::DelayMs,
        i2c::{Read, Write},
    },
    digital::v2::OutputPin,
};
use rppal::{gpio::Gpio, i2c::I2c};
use thermo26::{
    driver::{mikroe::thermo26::convert::to_celsius, ThreadDelay},
    Command, Thermo26,
};
use tracing::{debug, info, trace, warn};

use crate::config::{Acquisition, Config};

/// Bus timeout for a single transfer, in milliseconds.
const BUS_TIMEOUT_MS: u32 = 100;

#[derive(Debug, Clone, Copy)]
pub struct Reading {
    pub index: usize,
    pub celsius: f32,
}

pub fn spawn_thread(
    config: Config,
    stop_rx: flume::Receiver<()>,
    reading_tx: flume::Sender<Reading>,
) -> JoinHandle<anyhow::Result<()>> {
    std::thread::spawn(move || {
        let i2c = I2c::with_bus(config.bus).context("failed to open i2c bus")?;
        i2c.set_timeout(BUS_TIMEOUT_MS)
            .context("failed to set i2c timeout")?;

        let rst = Gpio::new()
            .context("failed to open gpio")?
            .get(config.reset_pin)
            .with_context(|| format!("failed to claim reset pin {}", config.reset_pin))?
            .into_output_high();

        let mut sensor = Thermo26::new(i2c, rst, config.address);
        let mut delay = ThreadDelay;

        sensor.reset_device(&mut delay);

        let serial = sensor
            .read_serial_number()
            .context("failed to read serial number")?;
        let status = sensor.read_status().context("failed to read status")?;
        debug!("initialized thermo 26 driver, serial number = {serial:#010X}, status = {status:?}");

        if config.heater {
            sensor.set_heater(true).context("failed to enable heater")?;
        }

        if let Acquisition::Periodic(rate) = config.acquisition {
            let cmd = Command::periodic(rate, config.repeatability);
            sensor
                .start_measurement(cmd, &mut delay)
                .context("failed to start periodic acquisition")?;
            debug!("started periodic acquisition with {cmd:?}");
        }

        let mut index = 0;
        while !finished(config.count, index) {
            let result = match config.acquisition {
                Acquisition::Periodic(_) => sensor.read_command(Command::FetchData).map(to_celsius),
                Acquisition::SingleShot => {
                    sensor.measure_single_shot(config.repeatability, &mut delay)
                }
            };

            match result {
                Ok(celsius) => {
                    trace!("reading {index}: {celsius}");
                    if reading_tx.send(Reading { index, celsius }).is_err() {
                        break;
                    }
                    index += 1;
                }
                Err(e) => warn!("failed to read temperature: {e}"),
            }

            if finished(config.count, index) {
                break;
            }

            // idle until the next reading, unless we are told to stop
            match stop_rx.recv_timeout(config.interval) {
                Err(flume::RecvTimeoutError::Timeout) => {}
                Ok(()) | Err(flume::RecvTimeoutError::Disconnected) => break,
            }
        }

        let result = shutdown(&mut sensor, &config, &mut delay);

        info!("sampled {index} readings");

        result
    })
}

fn finished(count: Option<usize>, index: usize) -> bool {
    count.is_some_and(|count| index >= count)
}

/// Stops acquisition and turns the heater off. Both steps are attempted, the
/// first failure is returned.
fn shutdown<I2C, RST, E>(
    sensor: &mut Thermo26<I2C, RST>,
    config: &Config,
    delay: &mut impl DelayMs<u32>,
) -> anyhow::Result<()>
where
    I2C: Read<Error = E> + Write<Error = E>,
    RST: OutputPin,
    RST::Error: Debug,
    E: Debug + Send + Sync + 'static,
{
    let stopped = match config.acquisition {
        Acquisition::Periodic(_) => sensor
            .stop_measurement(delay)
            .context("failed to stop periodic acquisition"),
        Acquisition::SingleShot => Ok(()),
    };

    let heater_off = if config.heater {
        sensor.set_heater(false).context("failed to disable heater")
    } else {
        Ok(())
    };

    stopped.and(heater_off)
}

#[cfg(test)]
mod test {
    use std::{convert::Infallible, io::ErrorKind};

    use clap::Parser;
    use embedded_hal::digital::v2::OutputPin;
    use embedded_hal_mock::{
        delay::MockNoop,
        i2c::{Mock as I2cMock, Transaction},
        MockError,
    };
    use thermo26::{Address, Thermo26};

    use super::{finished, shutdown};
    use crate::config::{Args, Config};

    const ADDR: u8 = 0x4A;

    struct NoopPin;

    impl OutputPin for NoopPin {
        type Error = Infallible;

        fn set_low(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    fn config(args: &[&str]) -> Config {
        let args = ["thermo26"].iter().chain(args);
        Config::from(Args::try_parse_from(args).unwrap())
    }

    fn io_error() -> MockError {
        MockError::Io(ErrorKind::Other)
    }

    #[test]
    fn count_limits_readings() {
        assert!(!finished(None, 0));
        assert!(!finished(None, usize::MAX));
        assert!(!finished(Some(2), 1));
        assert!(finished(Some(2), 2));
    }

    #[test]
    fn heater_off_after_failed_stop() {
        let i2c = I2cMock::new(&[
            Transaction::write(ADDR, vec![0x30, 0x93]).with_error(io_error()),
            Transaction::write(ADDR, vec![0x30, 0x66]),
        ]);
        let mut sensor = Thermo26::new(i2c, NoopPin, Address::Primary);

        let err = shutdown(&mut sensor, &config(&["--heater"]), &mut MockNoop::new())
            .unwrap_err();
        assert_eq!(err.to_string(), "failed to stop periodic acquisition");

        let (mut i2c, _) = sensor.release();
        i2c.done();
    }

    #[test]
    fn heater_failure_reported() {
        let i2c = I2cMock::new(&[
            Transaction::write(ADDR, vec![0x30, 0x93]),
            Transaction::write(ADDR, vec![0x30, 0x66]).with_error(io_error()),
        ]);
        let mut sensor = Thermo26::new(i2c, NoopPin, Address::Primary);

        let err = shutdown(&mut sensor, &config(&["--heater"]), &mut MockNoop::new())
            .unwrap_err();
        assert_eq!(err.to_string(), "failed to disable heater");

        let (mut i2c, _) = sensor.release();
        i2c.done();
    }

    #[test]
    fn single_shot_without_heater_sends_nothing() {
        let mut sensor = Thermo26::new(I2cMock::new(&[]), NoopPin, Address::Primary);

        shutdown(
            &mut sensor,
            &config(&["--mode", "single-shot"]),
            &mut MockNoop::new(),
        )
        .unwrap();

        let (mut i2c, _) = sensor.release();
        i2c.done();
    }
}
