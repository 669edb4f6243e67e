use clap::Parser;
use std::time::Duration;

use crate::config::{ConfigError, HaircutTiming, ShopConfig};

/// Command line flags for the simulation binary.
#[derive(Debug, Parser)]
#[command(author, version, about = "Sleeping barber shop simulation", long_about = None)]
pub struct Args {
    /// Waiting-room capacity
    #[arg(long, default_value_t = 2)]
    pub capacity: usize,

    /// Chairs guarded by the seat lock
    #[arg(long, default_value_t = 1)]
    pub chairs: usize,

    #[arg(long, default_value_t = 1)]
    pub barbers: u32,

    #[arg(long, default_value_t = 5)]
    pub clients: u32,

    /// Milliseconds between arrivals
    #[arg(name = "arrival-ms", long = "arrival-ms", default_value_t = 500)]
    pub arrival_ms: u64,

    /// Milliseconds a haircut takes
    #[arg(name = "haircut-ms", long = "haircut-ms", default_value_t = 1000)]
    pub haircut_ms: u64,

    /// Milliseconds the barber works per client, if different from the haircut
    #[arg(name = "service-ms", long = "service-ms", conflicts_with = "reference-timing")]
    pub service_ms: Option<u64>,

    /// Use the split 1000ms chair / 1500ms barber timing
    #[arg(name = "reference-timing", long = "reference-timing")]
    pub reference_timing: bool,
}

impl TryFrom<Args> for ShopConfig {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let timing = if args.reference_timing {
            HaircutTiming::reference()
        } else {
            let haircut = Duration::from_millis(args.haircut_ms);
            HaircutTiming {
                seat_hold: haircut,
                service: args.service_ms.map(Duration::from_millis).unwrap_or(haircut),
            }
        };

        let config = ShopConfig {
            capacity: args.capacity,
            chairs: args.chairs,
            barbers: args.barbers,
            clients: args.clients,
            arrival_interval: Duration::from_millis(args.arrival_ms),
            timing,
        };
        config.validate()?;
        Ok(config)
    }
}
