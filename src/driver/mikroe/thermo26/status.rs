use std::fmt;

pub mod bits {
    pub const ALERT_PENDING: u16 = 1 << 15;
    pub const HEATER_ON: u16 = 1 << 13;
    pub const TEMPERATURE_ALERT: u16 = 1 << 10;
    pub const RESET_DETECTED: u16 = 1 << 4;
    pub const COMMAND_FAILED: u16 = 1 << 1;
    pub const WRITE_CHECKSUM_FAILED: u16 = 1 << 0;
}

/// Contents of the sensor's status register.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Status(pub u16);

impl Status {
    /// At least one alert is pending
    pub const fn alert_pending(self) -> bool {
        self.0 & bits::ALERT_PENDING != 0
    }

    pub const fn heater_on(self) -> bool {
        self.0 & bits::HEATER_ON != 0
    }

    /// Temperature tracking alert
    pub const fn temperature_alert(self) -> bool {
        self.0 & bits::TEMPERATURE_ALERT != 0
    }

    /// A reset (hard, soft or power on) happened since the last clear
    pub const fn reset_detected(self) -> bool {
        self.0 & bits::RESET_DETECTED != 0
    }

    /// The last command was not processed, either because it was invalid or
    /// failed its own checksum
    pub const fn command_failed(self) -> bool {
        self.0 & bits::COMMAND_FAILED != 0
    }

    pub const fn write_checksum_failed(self) -> bool {
        self.0 & bits::WRITE_CHECKSUM_FAILED != 0
    }
}

impl fmt::Debug for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Status")
            .field("raw", &format_args!("{:#06X}", self.0))
            .field("alert_pending", &self.alert_pending())
            .field("heater_on", &self.heater_on())
            .field("temperature_alert", &self.temperature_alert())
            .field("reset_detected", &self.reset_detected())
            .field("command_failed", &self.command_failed())
            .field("write_checksum_failed", &self.write_checksum_failed())
            .finish()
    }
}
