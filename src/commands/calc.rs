use anyhow::Result;
use log::debug;

use crate::domain::service::{Draft, Filter, SortBy, compare_efficiency, evaluate, filter_and_sort};
use crate::runtime::Runtime;

use super::config::Config;
use super::render::{comparison_marker, describe_package, describe_quote};

#[derive(Debug, Clone, Default)]
pub struct CalcOptions {
    pub draft: Draft,
    /// Store the evaluated package in the repository.
    pub save: bool,
    /// Related packages may contain more kinds than the candidate.
    pub comprehensive: bool,
    pub sort: SortBy,
}

/// Evaluate a candidate package and list the saved packages with the same contents.
#[tracing::instrument(skip(runtime, config, options))]
pub async fn calc<R: Runtime>(runtime: R, config: Config, options: CalcOptions) -> Result<()> {
    let mut repo = config.open(&runtime).await?;
    let rates = repo.store().load_rates()?;

    let quote = evaluate(&options.draft, &rates)?;
    debug!("Evaluated draft: {:?}", quote);

    println!("{}", describe_quote(&quote, &options.draft.non_quantifiable_items));

    let mut filter = Filter::for_items(&quote.items);
    filter.comprehensive = options.comprehensive;
    let related = filter_and_sort(repo.packages(), &filter, options.sort);

    if !related.is_empty() {
        println!();
        println!(
            "Related packages ({}, sorted by {}, efficiency relative to this one):",
            related.len(),
            options.sort
        );
        for package in &related {
            let marker =
                comparison_marker(compare_efficiency(quote.efficiency(), package.efficiency));
            println!("{} {}", marker, describe_package(package));
        }
    }

    if options.save {
        let package = quote.into_package(options.draft);
        let id = package.id.clone();
        repo.insert(package)?;
        println!();
        println!("Saved package {}", id);
    }

    Ok(())
}
