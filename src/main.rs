use anyhow::Result;
use clap::{ArgGroup, Parser};
use packcalc::commands::{self, CalcOptions, Config};
use packcalc::domain::model::{CurrencyKind, PackageItem, PriceCurrency, RateOverride, SaleDate};
use packcalc::domain::service::{Draft, ImportMode, SortBy};
use std::path::PathBuf;

/// packcalc - in-game currency package calculator
///
/// Values purchase packages in a common currency (juhwa), scores how much
/// value each one returns for its price, and keeps a searchable record of
/// packages seen so far.
///
/// Examples:
///   packcalc calc --price 1000 --currency KRW --item relicBinary=10
///   packcalc list --kind juhwa --sort efficiency
///   packcalc rates set krwPerJuhwa=14.5
#[derive(Parser, Debug)]
#[command(author, version = env!("PACKCALC_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Data directory (overrides defaults; also via PACKCALC_DATA_DIR)
    #[arg(long = "data-dir", env = "PACKCALC_DATA_DIR", value_name = "PATH", global = true)]
    data_dir: Option<PathBuf>,

    /// Initial package list used on first run: an http(s) URL or a file path
    #[arg(long, env = "PACKCALC_SEED", value_name = "URL|PATH", global = true)]
    seed: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Evaluate a package and compare it with saved ones
    Calc(CalcArgs),

    /// List saved packages
    List(ListArgs),

    /// Remove a saved package
    Remove(RemoveArgs),

    /// Show or change the exchange rates
    #[command(subcommand)]
    Rates(RatesCommand),

    /// Import packages from a JSON file
    Import(ImportArgs),

    /// Export saved packages to a JSON file
    Export(ExportArgs),
}

#[derive(clap::Args, Debug)]
#[command(group(ArgGroup::new("sale").args(["date", "permanent", "semi_permanent"])))]
struct CalcArgs {
    /// Price amount
    #[arg(long, value_name = "AMOUNT")]
    price: f64,

    /// Price currency: KRW, juhwa or quartz
    #[arg(long, default_value = "juhwa", value_name = "CURRENCY")]
    currency: PriceCurrency,

    /// Contents entry, e.g. relicBinary=10 (repeatable)
    #[arg(long = "item", short = 'i', value_name = "KIND=QTY")]
    items: Vec<PackageItem>,

    /// Contents that have no rate, as free text
    #[arg(long, value_name = "TEXT", default_value = "")]
    extra: String,

    /// Package name
    #[arg(long, default_value = "")]
    name: String,

    /// Sale date, e.g. 2024-05-01
    #[arg(long)]
    date: Option<String>,

    /// Always on sale (상시)
    #[arg(long)]
    permanent: bool,

    /// Semi-permanently on sale (준상시)
    #[arg(long)]
    semi_permanent: bool,

    /// Opaque thumbnail reference stored with the package
    #[arg(long, value_name = "REF")]
    image: Option<String>,

    /// Save the package after evaluating it
    #[arg(long)]
    save: bool,

    /// Related packages may contain additional kinds
    #[arg(long)]
    comprehensive: bool,

    /// Order of related packages: efficiency or date
    #[arg(long, default_value = "efficiency")]
    sort: SortBy,
}

impl CalcArgs {
    fn into_options(self) -> CalcOptions {
        let sale_date = if self.permanent {
            SaleDate::Permanent
        } else if self.semi_permanent {
            SaleDate::SemiPermanent
        } else {
            SaleDate::from(self.date.as_deref().unwrap_or_default())
        };

        CalcOptions {
            draft: Draft {
                name: self.name,
                price_amount: self.price,
                price_currency: self.currency,
                items: self.items,
                non_quantifiable_items: self.extra,
                sale_date,
                image: self.image,
            },
            save: self.save,
            comprehensive: self.comprehensive,
            sort: self.sort,
        }
    }
}

#[derive(clap::Args, Debug)]
struct ListArgs {
    /// Only packages containing this kind (repeatable)
    #[arg(long = "kind", short = 'k', value_name = "KIND")]
    kinds: Vec<CurrencyKind>,

    /// Match packages containing at least the selected kinds
    #[arg(long)]
    comprehensive: bool,

    /// Order: date or efficiency
    #[arg(long, default_value = "date")]
    sort: SortBy,
}

#[derive(clap::Args, Debug)]
struct RemoveArgs {
    /// Package id or a unique id prefix
    #[arg(value_name = "ID")]
    id: String,

    /// Skip confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

#[derive(clap::Subcommand, Debug)]
enum RatesCommand {
    /// Print the current rates
    Show,

    /// Change rates and re-value every saved package
    Set {
        /// Rate to change, e.g. krwPerJuhwa=14.5
        #[arg(value_name = "KEY=VALUE", required = true)]
        overrides: Vec<RateOverride>,
    },

    /// Restore the default rates and re-value every saved package
    Reset,
}

#[derive(clap::Args, Debug)]
#[command(group(ArgGroup::new("mode").args(["merge", "replace"])))]
struct ImportArgs {
    /// JSON file produced by `export`
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Add packages whose id is not saved yet
    #[arg(long)]
    merge: bool,

    /// Discard saved packages and keep the imported ones
    #[arg(long)]
    replace: bool,

    /// Skip confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

impl ImportArgs {
    fn mode(&self) -> Option<ImportMode> {
        if self.merge {
            Some(ImportMode::Merge)
        } else if self.replace {
            Some(ImportMode::Replace)
        } else {
            None
        }
    }
}

#[derive(clap::Args, Debug)]
struct ExportArgs {
    /// Output file (default: cs-calc-database-YYYY-MM-DD.json)
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = packcalc::runtime::RealRuntime;
    let config = Config::new(&runtime, cli.data_dir, cli.seed)?;

    match cli.command {
        Commands::Calc(args) => commands::calc(runtime, config, args.into_options()).await?,
        Commands::List(args) => {
            commands::list(runtime, config, args.kinds, args.comprehensive, args.sort).await?
        }
        Commands::Remove(args) => commands::remove(runtime, config, &args.id, args.yes).await?,
        Commands::Rates(RatesCommand::Show) => commands::rates_show(runtime, config)?,
        Commands::Rates(RatesCommand::Set { overrides }) => {
            commands::rates_set(runtime, config, overrides).await?
        }
        Commands::Rates(RatesCommand::Reset) => commands::rates_reset(runtime, config).await?,
        Commands::Import(args) => {
            let mode = args.mode();
            commands::import(runtime, config, &args.file, mode, args.yes).await?
        }
        Commands::Export(args) => commands::export(runtime, config, args.path).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_calc_parsing() {
        let cli = Cli::try_parse_from([
            "packcalc",
            "calc",
            "--price",
            "1000",
            "--currency",
            "KRW",
            "--item",
            "relicBinary=10",
            "-i",
            "juhwa=5",
            "--permanent",
            "--save",
        ])
        .unwrap();
        match cli.command {
            Commands::Calc(args) => {
                let options = args.into_options();
                assert_eq!(options.draft.price_amount, 1000.0);
                assert_eq!(options.draft.price_currency, PriceCurrency::Krw);
                assert_eq!(
                    options.draft.items,
                    vec![
                        PackageItem::new(CurrencyKind::RelicBinary, 10.0),
                        PackageItem::new(CurrencyKind::Juhwa, 5.0),
                    ]
                );
                assert_eq!(options.draft.sale_date, SaleDate::Permanent);
                assert!(options.save);
                assert_eq!(options.sort, SortBy::Efficiency);
            }
            _ => panic!("Expected Calc command"),
        }
        assert_eq!(cli.data_dir, None);
    }

    #[test]
    fn test_cli_calc_date_conflicts_with_permanent() {
        let result = Cli::try_parse_from([
            "packcalc",
            "calc",
            "--price",
            "1",
            "--date",
            "2024-01-01",
            "--permanent",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_calc_rejects_unknown_kind() {
        let result =
            Cli::try_parse_from(["packcalc", "calc", "--price", "1", "--item", "gold=3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_list_parsing() {
        let cli = Cli::try_parse_from([
            "packcalc", "list", "-k", "juhwa", "--kind", "quartz", "--comprehensive",
        ])
        .unwrap();
        match cli.command {
            Commands::List(args) => {
                assert_eq!(args.kinds, vec![CurrencyKind::Juhwa, CurrencyKind::Quartz]);
                assert!(args.comprehensive);
                assert_eq!(args.sort, SortBy::Date);
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_cli_rates_set_parsing() {
        let cli =
            Cli::try_parse_from(["packcalc", "rates", "set", "krwPerJuhwa=14.5"]).unwrap();
        match cli.command {
            Commands::Rates(RatesCommand::Set { overrides }) => {
                assert_eq!(overrides.len(), 1);
                assert_eq!(overrides[0].value, 14.5);
            }
            _ => panic!("Expected Rates Set command"),
        }

        assert!(Cli::try_parse_from(["packcalc", "rates", "set"]).is_err());
    }

    #[test]
    fn test_cli_import_parsing() {
        let cli = Cli::try_parse_from(["packcalc", "import", "db.json", "--merge"]).unwrap();
        match cli.command {
            Commands::Import(args) => {
                assert_eq!(args.file, PathBuf::from("db.json"));
                assert_eq!(args.mode(), Some(ImportMode::Merge));
            }
            _ => panic!("Expected Import command"),
        }

        let result =
            Cli::try_parse_from(["packcalc", "import", "db.json", "--merge", "--replace"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_global_data_dir_parsing() {
        let cli =
            Cli::try_parse_from(["packcalc", "--data-dir", "/tmp/pc", "export"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/pc")));

        let cli = Cli::try_parse_from(["packcalc", "export", "--data-dir", "/tmp/pc"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/pc")));
    }

    #[test]
    fn test_cli_no_subcommand_fails() {
        let result = Cli::try_parse_from(["packcalc"]);
        assert!(result.is_err());
    }
}
