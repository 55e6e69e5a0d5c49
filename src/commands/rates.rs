use anyhow::Result;
use log::info;

use crate::domain::model::{RateKey, RateOverride, RateTable};
use crate::runtime::Runtime;

use super::config::Config;
use super::render::format_number;

/// Print the current rate table
#[tracing::instrument(skip(runtime, config))]
pub fn rates_show<R: Runtime>(runtime: R, config: Config) -> Result<()> {
    let rates = config.data(&runtime).load_rates()?;
    print!("{}", describe_rates(&rates));
    Ok(())
}

/// Change one or more rates and re-value every saved package
#[tracing::instrument(skip(runtime, config))]
pub async fn rates_set<R: Runtime>(
    runtime: R,
    config: Config,
    overrides: Vec<RateOverride>,
) -> Result<()> {
    let mut repo = config.open(&runtime).await?;
    let current = repo.store().load_rates()?;

    let updated = overrides
        .iter()
        .fold(current, |table, o| table.with(o.key, o.value));

    if updated == current {
        println!("Rates unchanged.");
        return Ok(());
    }

    repo.apply_rates(&updated)?;
    info!("Applied {} rate change(s)", overrides.len());

    print!("{}", describe_rates(&updated));
    println!("Re-valued {} package(s).", repo.len());
    Ok(())
}

/// Restore the default rates and re-value every saved package
#[tracing::instrument(skip(runtime, config))]
pub async fn rates_reset<R: Runtime>(runtime: R, config: Config) -> Result<()> {
    let mut repo = config.open(&runtime).await?;
    let defaults = RateTable::default();

    repo.apply_rates(&defaults)?;

    print!("{}", describe_rates(&defaults));
    println!("Re-valued {} package(s).", repo.len());
    Ok(())
}

fn describe_rates(rates: &RateTable) -> String {
    let width = RateKey::ALL
        .iter()
        .map(|k| k.wire_name().len())
        .max()
        .unwrap_or(0);

    RateKey::ALL
        .iter()
        .map(|key| {
            format!(
                "{:width$}  {:>8}  {}\n",
                key.wire_name(),
                format_number(rates.get(*key)),
                key.label(),
                width = width
            )
        })
        .collect()
}
