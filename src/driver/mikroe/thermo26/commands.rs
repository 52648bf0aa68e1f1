//! Command words understood by the sensor.
//!
//! Every command goes over the wire as two bytes, most significant byte first.

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Command {
    SingleShotClockStretchHigh = 0x2C06,
    SingleShotClockStretchMedium = 0x2C0D,
    SingleShotClockStretchLow = 0x2C10,

    SingleShotHigh = 0x2400,
    SingleShotMedium = 0x240B,
    SingleShotLow = 0x2416,

    PeriodicHalfHigh = 0x2032,
    PeriodicHalfMedium = 0x2024,
    PeriodicHalfLow = 0x202F,
    PeriodicOneHigh = 0x2130,
    PeriodicOneMedium = 0x2126,
    PeriodicOneLow = 0x212D,
    PeriodicTwoHigh = 0x2236,
    PeriodicTwoMedium = 0x2220,
    PeriodicTwoLow = 0x222B,
    PeriodicFourHigh = 0x2334,
    PeriodicFourMedium = 0x2322,
    PeriodicFourLow = 0x2329,
    PeriodicTenHigh = 0x2737,
    PeriodicTenMedium = 0x2721,
    PeriodicTenLow = 0x272A,

    /// Read the latest periodic measurement
    FetchData = 0xE000,
    /// Stop periodic acquisition and return to single shot mode
    Break = 0x3093,
    SoftReset = 0x30A2,
    HeaterEnable = 0x306D,
    HeaterDisable = 0x3066,
    ReadStatus = 0xF32D,
    ClearStatus = 0x3041,
    GetSerialNumber = 0x3780,
}

/// Precision/power tradeoff of a measurement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Repeatability {
    High,
    Medium,
    Low,
}

impl Repeatability {
    /// Maximum single shot measurement duration in milliseconds
    pub const fn measurement_time(self) -> u32 {
        match self {
            Repeatability::High => 16,
            Repeatability::Medium => 7,
            Repeatability::Low => 5,
        }
    }
}

/// Periodic acquisition rate, in measurements per second.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Rate {
    Half,
    One,
    Two,
    Four,
    Ten,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ClockStretching {
    Enabled,
    Disabled,
}

impl Command {
    /// Default acquisition used by a plain temperature read.
    pub const DEFAULT_PERIODIC: Command = Command::PeriodicOneHigh;

    pub const fn single_shot(stretching: ClockStretching, repeatability: Repeatability) -> Self {
        use ClockStretching::*;
        use Repeatability::*;

        match (stretching, repeatability) {
            (Enabled, High) => Command::SingleShotClockStretchHigh,
            (Enabled, Medium) => Command::SingleShotClockStretchMedium,
            (Enabled, Low) => Command::SingleShotClockStretchLow,
            (Disabled, High) => Command::SingleShotHigh,
            (Disabled, Medium) => Command::SingleShotMedium,
            (Disabled, Low) => Command::SingleShotLow,
        }
    }

    pub const fn periodic(rate: Rate, repeatability: Repeatability) -> Self {
        use Rate::*;
        use Repeatability::*;

        match (rate, repeatability) {
            (Half, High) => Command::PeriodicHalfHigh,
            (Half, Medium) => Command::PeriodicHalfMedium,
            (Half, Low) => Command::PeriodicHalfLow,
            (One, High) => Command::PeriodicOneHigh,
            (One, Medium) => Command::PeriodicOneMedium,
            (One, Low) => Command::PeriodicOneLow,
            (Two, High) => Command::PeriodicTwoHigh,
            (Two, Medium) => Command::PeriodicTwoMedium,
            (Two, Low) => Command::PeriodicTwoLow,
            (Four, High) => Command::PeriodicFourHigh,
            (Four, Medium) => Command::PeriodicFourMedium,
            (Four, Low) => Command::PeriodicFourLow,
            (Ten, High) => Command::PeriodicTenHigh,
            (Ten, Medium) => Command::PeriodicTenMedium,
            (Ten, Low) => Command::PeriodicTenLow,
        }
    }

    /// Whether this command starts periodic acquisition
    pub const fn is_periodic(self) -> bool {
        matches!(
            self,
            Command::PeriodicHalfHigh
                | Command::PeriodicHalfMedium
                | Command::PeriodicHalfLow
                | Command::PeriodicOneHigh
                | Command::PeriodicOneMedium
                | Command::PeriodicOneLow
                | Command::PeriodicTwoHigh
                | Command::PeriodicTwoMedium
                | Command::PeriodicTwoLow
                | Command::PeriodicFourHigh
                | Command::PeriodicFourMedium
                | Command::PeriodicFourLow
                | Command::PeriodicTenHigh
                | Command::PeriodicTenMedium
                | Command::PeriodicTenLow
        )
    }

    /// Wire representation of the command, most significant byte first.
    pub const fn to_be_bytes(self) -> [u8; 2] {
        encode(self as u16)
    }
}

impl From<Command> for u16 {
    fn from(cmd: Command) -> Self {
        cmd as u16
    }
}

pub const fn encode(word: u16) -> [u8; 2] {
    [(word >> 8) as u8, (word & 0xFF) as u8]
}

pub const fn decode(bytes: [u8; 2]) -> u16 {
    ((bytes[0] as u16) << 8) | bytes[1] as u16
}
