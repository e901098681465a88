use anyhow::{bail, Result};

use super::Command;
use ilicoo::device::{call, ConsoleUrlOpener};

pub struct CallCommand {
    pub phone: String,
}

impl Command for CallCommand {
    async fn execute(&self) -> Result<()> {
        if self.phone.trim().is_empty() {
            bail!("No phone number given");
        }
        print!("📞 Dial: ");
        if !call(&ConsoleUrlOpener, &self.phone).await? {
            println!();
            bail!("This device cannot place calls");
        }
        Ok(())
    }
}
