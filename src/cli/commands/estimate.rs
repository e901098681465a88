use anyhow::{bail, Result};

use super::Command;
use ilicoo::pricing::{estimate_price, format_fcfa};

pub struct EstimateCommand {
    pub distance_km: f64,
}

impl EstimateCommand {
    pub fn new(distance_km: f64) -> Self {
        Self { distance_km }
    }
}

impl Command for EstimateCommand {
    async fn execute(&self) -> Result<()> {
        if !self.distance_km.is_finite() || self.distance_km < 0.0 {
            bail!("Distance must be a positive number of kilometers");
        }
        println!("{}", format_fcfa(estimate_price(self.distance_km)));
        Ok(())
    }
}
