//! Driver for the MikroE Thermo 26 click, built around a Sensirion STS3x
//! digital temperature sensor.
//!
//! Commands are 16-bit words written MSB first. Every data word the sensor
//! sends back is followed by a CRC-8 byte, see [`crc`]. All operations take
//! `&mut self`, so a command and its response can never interleave with
//! another transaction on the same handle.

use std::fmt::Debug;

use embedded_hal::{
    blocking::{
        delay::DelayMs,
        i2c::{Read, Write},
    },
    digital::v2::{OutputPin, PinState},
};
use thiserror::Error;
use tracing::{debug, trace, warn};

pub mod commands;
pub mod convert;
pub mod crc;
pub mod status;

use commands::{ClockStretching, Command, Repeatability};
use status::Status;

/// 7-bit bus address, selected by the ADDR jumper on the board.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Address {
    Primary = 0x4A,
    Secondary = 0x4B,
}

impl From<Address> for u8 {
    fn from(address: Address) -> Self {
        address as u8
    }
}

/// Wait after a measurement command before data can be fetched.
pub const START_DELAY_MS: u32 = 20;
/// Wait after a break command.
pub const STOP_DELAY_MS: u32 = 1;
/// Length of the low pulse on the reset line.
pub const RESET_PULSE_MS: u32 = 1;
/// Wait after releasing the reset line.
pub const RESET_RECOVERY_MS: u32 = 100;
pub const SOFT_RESET_DELAY_MS: u32 = 2;

#[derive(Debug, Error)]
pub enum TransportError<E> {
    #[error("i2c write failed: {0:?}")]
    Write(E),
    #[error("i2c read failed: {0:?}")]
    Read(E),
}

#[derive(Debug, Error)]
pub enum Error<E> {
    #[error(transparent)]
    Transport(#[from] TransportError<E>),
    #[error("failed to start measurement")]
    Start(#[source] TransportError<E>),
    #[error("checksum mismatch: computed {expected:#04x}, received {actual:#04x}")]
    ChecksumMismatch { expected: u8, actual: u8 },
}

/// Acquisition mode the driver last put the sensor in.
///
/// Informational only, nothing is rejected based on it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Periodic(Command),
}

pub struct Thermo26<I2C, RST> {
    i2c: I2C,
    rst: RST,
    address: Address,
    mode: Mode,
}

impl<I2C, RST> Thermo26<I2C, RST> {
    pub fn new(i2c: I2C, rst: RST, address: Address) -> Self {
        Self {
            i2c,
            rst,
            address,
            mode: Mode::Idle,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Give back the bus and the reset pin
    pub fn release(self) -> (I2C, RST) {
        (self.i2c, self.rst)
    }

    fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            debug!("mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }
}

impl<I2C, RST, E> Thermo26<I2C, RST>
where
    I2C: Read<Error = E> + Write<Error = E>,
    RST: OutputPin,
    RST::Error: Debug,
{
    fn send(&mut self, cmd: Command) -> Result<(), TransportError<E>> {
        trace!("writing command {cmd:?} ({:#06X})", u16::from(cmd));
        self.i2c
            .write(self.address.into(), &cmd.to_be_bytes())
            .map_err(TransportError::Write)
    }

    fn read_bytes<const N: usize>(&mut self) -> Result<[u8; N], TransportError<E>> {
        let mut buf = [0u8; N];
        self.i2c
            .read(self.address.into(), &mut buf)
            .map_err(TransportError::Read)?;
        trace!("read {buf:02X?}");
        Ok(buf)
    }

    fn read_word(&mut self) -> Result<u16, Error<E>> {
        let frame = self.read_bytes::<3>()?;
        check_frame(&frame)
    }

    fn start(
        &mut self,
        cmd: Command,
        delay: &mut impl DelayMs<u32>,
    ) -> Result<(), TransportError<E>> {
        let result = self.send(cmd);
        delay.delay_ms(START_DELAY_MS);
        result?;

        if cmd.is_periodic() {
            self.set_mode(Mode::Periodic(cmd));
        }
        Ok(())
    }

    /// Write a command word to the sensor.
    pub fn write_command(&mut self, cmd: Command) -> Result<(), TransportError<E>> {
        self.send(cmd)
    }

    /// Write a command word and read back its CRC-checked response word.
    ///
    /// Nothing is read if the write fails.
    pub fn read_command(&mut self, cmd: Command) -> Result<u16, Error<E>> {
        self.write_command(cmd)?;
        self.read_word()
    }

    /// Starts a single shot or periodic measurement.
    ///
    /// Always waits [`START_DELAY_MS`] before returning, even when the
    /// command could not be written.
    pub fn start_measurement(
        &mut self,
        cmd: Command,
        delay: &mut impl DelayMs<u32>,
    ) -> Result<(), TransportError<E>> {
        self.start(cmd, delay)
    }

    /// Stops periodic acquisition with the break command
    pub fn stop_measurement(
        &mut self,
        delay: &mut impl DelayMs<u32>,
    ) -> Result<(), TransportError<E>> {
        let result = self.send(Command::Break);
        delay.delay_ms(STOP_DELAY_MS);
        result?;

        self.set_mode(Mode::Idle);
        Ok(())
    }

    /// Drives the reset line to the given level.
    pub fn set_reset_pin(&mut self, level: PinState) {
        if let Err(e) = self.rst.set_state(level) {
            let level = match level {
                PinState::Low => "low",
                PinState::High => "high",
            };
            warn!("failed to drive reset pin {level}: {e:?}");
        }
    }

    /// Hardware reset through the active-low reset line.
    pub fn reset_device(&mut self, delay: &mut impl DelayMs<u32>) {
        debug!("resetting device");
        self.set_reset_pin(PinState::Low);
        delay.delay_ms(RESET_PULSE_MS);
        self.set_reset_pin(PinState::High);
        delay.delay_ms(RESET_RECOVERY_MS);
        self.set_mode(Mode::Idle);
    }

    pub fn soft_reset(
        &mut self,
        delay: &mut impl DelayMs<u32>,
    ) -> Result<(), TransportError<E>> {
        debug!("soft resetting device");
        self.send(Command::SoftReset)?;
        delay.delay_ms(SOFT_RESET_DELAY_MS);
        self.set_mode(Mode::Idle);
        Ok(())
    }

    /// Starts periodic acquisition at 1 measurement per second with high
    /// repeatability, then fetches the result in degrees Celsius.
    pub fn read_temperature(&mut self, delay: &mut impl DelayMs<u32>) -> Result<f32, Error<E>> {
        self.start(Command::DEFAULT_PERIODIC, delay)
            .map_err(Error::Start)?;
        let raw = self.read_command(Command::FetchData)?;
        Ok(convert::to_celsius(raw))
    }

    /// One measurement without clock stretching, read directly after the
    /// conversion time of the given repeatability.
    pub fn measure_single_shot(
        &mut self,
        repeatability: Repeatability,
        delay: &mut impl DelayMs<u32>,
    ) -> Result<f32, Error<E>> {
        if let Mode::Periodic(cmd) = self.mode {
            warn!("single shot requested while periodic acquisition ({cmd:?}) is running");
        }

        self.send(Command::single_shot(ClockStretching::Disabled, repeatability))?;
        delay.delay_ms(repeatability.measurement_time());
        let raw = self.read_word()?;
        Ok(convert::to_celsius(raw))
    }

    pub fn set_heater(&mut self, enabled: bool) -> Result<(), TransportError<E>> {
        let cmd = if enabled {
            Command::HeaterEnable
        } else {
            Command::HeaterDisable
        };
        self.write_command(cmd)
    }

    pub fn read_status(&mut self) -> Result<Status, Error<E>> {
        self.read_command(Command::ReadStatus).map(Status)
    }

    pub fn clear_status(&mut self) -> Result<(), TransportError<E>> {
        self.write_command(Command::ClearStatus)
    }

    /// Reads the 32-bit serial number, sent as two checked words.
    pub fn read_serial_number(&mut self) -> Result<u32, Error<E>> {
        self.send(Command::GetSerialNumber)?;
        let buf = self.read_bytes::<6>()?;
        let hi = check_frame::<E>(&[buf[0], buf[1], buf[2]])?;
        let lo = check_frame::<E>(&[buf[3], buf[4], buf[5]])?;
        Ok((u32::from(hi) << 16) | u32::from(lo))
    }
}

fn check_frame<E>(frame: &[u8; 3]) -> Result<u16, Error<E>> {
    match crc::check_frame(frame) {
        Ok(data) => Ok(commands::decode(data)),
        Err((expected, actual)) => {
            warn!("checksum mismatch on {frame:02X?}: computed {expected:#04x}");
            Err(Error::ChecksumMismatch { expected, actual })
        }
    }
}
