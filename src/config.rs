use std::{num::NonZeroUsize, time::Duration};

use clap::{Parser, ValueEnum};
use thermo26::{Address, Rate, Repeatability};

#[derive(Debug, Parser)]
#[command(name = "thermo26", about = "Samples a Thermo 26 click temperature sensor")]
pub struct Args {
    /// I2C bus number (/dev/i2c-N)
    #[arg(long, default_value_t = 1)]
    pub bus: u8,

    /// Bus address selected by the ADDR jumper
    #[arg(long, value_enum, default_value_t = AddressArg::Primary)]
    pub address: AddressArg,

    /// BCM number of the GPIO wired to the active-low reset line
    #[arg(long, default_value_t = 6)]
    pub reset_pin: u8,

    #[arg(long, value_enum, default_value_t = ModeArg::Periodic)]
    pub mode: ModeArg,

    /// Acquisition rate in periodic mode, in measurements per second
    #[arg(long, value_enum, default_value_t = RateArg::One)]
    pub rate: RateArg,

    #[arg(long, value_enum, default_value_t = RepeatabilityArg::High)]
    pub repeatability: RepeatabilityArg,

    /// Time between two readings
    #[arg(long, default_value_t = 1000)]
    pub interval_ms: u64,

    /// Stop after this many readings instead of running until ctrl+c
    #[arg(long)]
    pub count: Option<NonZeroUsize>,

    /// Keep the on-chip heater enabled while sampling
    #[arg(long)]
    pub heater: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum AddressArg {
    Primary,
    Secondary,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Periodic,
    SingleShot,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum RateArg {
    #[value(name = "0.5")]
    Half,
    #[value(name = "1")]
    One,
    #[value(name = "2")]
    Two,
    #[value(name = "4")]
    Four,
    #[value(name = "10")]
    Ten,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum RepeatabilityArg {
    High,
    Medium,
    Low,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Acquisition {
    Periodic(Rate),
    SingleShot,
}

/// Resolved sampler settings.
#[derive(Debug, Clone)]
pub struct Config {
    pub bus: u8,
    pub address: Address,
    pub reset_pin: u8,
    pub acquisition: Acquisition,
    pub repeatability: Repeatability,
    pub interval: Duration,
    pub count: Option<usize>,
    pub heater: bool,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        let address = match args.address {
            AddressArg::Primary => Address::Primary,
            AddressArg::Secondary => Address::Secondary,
        };

        let rate = match args.rate {
            RateArg::Half => Rate::Half,
            RateArg::One => Rate::One,
            RateArg::Two => Rate::Two,
            RateArg::Four => Rate::Four,
            RateArg::Ten => Rate::Ten,
        };

        let acquisition = match args.mode {
            ModeArg::Periodic => Acquisition::Periodic(rate),
            ModeArg::SingleShot => Acquisition::SingleShot,
        };

        let repeatability = match args.repeatability {
            RepeatabilityArg::High => Repeatability::High,
            RepeatabilityArg::Medium => Repeatability::Medium,
            RepeatabilityArg::Low => Repeatability::Low,
        };

        Self {
            bus: args.bus,
            address,
            reset_pin: args.reset_pin,
            acquisition,
            repeatability,
            interval: Duration::from_millis(args.interval_ms),
            count: args.count.map(NonZeroUsize::get),
            heater: args.heater,
        }
    }
}

#[cfg(test)]
mod test {
    use std::{num::NonZeroUsize, time::Duration};

    use clap::Parser;
    use thermo26::{Address, Rate, Repeatability};

    use super::{Acquisition, Args, Config};

    #[test]
    fn defaults() {
        let config = Config::from(Args::try_parse_from(["thermo26"]).unwrap());
        assert_eq!(config.bus, 1);
        assert_eq!(config.address, Address::Primary);
        assert_eq!(config.reset_pin, 6);
        assert_eq!(config.acquisition, Acquisition::Periodic(Rate::One));
        assert_eq!(config.repeatability, Repeatability::High);
        assert_eq!(config.interval, Duration::from_secs(1));
        assert_eq!(config.count, None);
        assert!(!config.heater);
    }

    #[test]
    fn single_shot_secondary() {
        let args = Args::try_parse_from([
            "thermo26",
            "--address",
            "secondary",
            "--mode",
            "single-shot",
            "--repeatability",
            "low",
            "--interval-ms",
            "250",
            "--count",
            "3",
            "--heater",
        ])
        .unwrap();
        let config = Config::from(args);
        assert_eq!(config.address, Address::Secondary);
        assert_eq!(config.acquisition, Acquisition::SingleShot);
        assert_eq!(config.repeatability, Repeatability::Low);
        assert_eq!(config.interval, Duration::from_millis(250));
        assert_eq!(config.count, Some(3));
        assert!(config.heater);
    }

    #[test]
    fn periodic_rate() {
        let args = Args::try_parse_from(["thermo26", "--rate", "0.5"]).unwrap();
        assert_eq!(
            Config::from(args).acquisition,
            Acquisition::Periodic(Rate::Half)
        );
    }

    #[test]
    fn rejects_zero_count() {
        assert!(Args::try_parse_from(["thermo26", "--count", "0"]).is_err());
        assert!(Args::try_parse_from(["thermo26", "--count", "1"]).is_ok());
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(Args::try_parse_from(["thermo26", "--mode", "burst"]).is_err());
    }
}
