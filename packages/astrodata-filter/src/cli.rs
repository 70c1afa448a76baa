//! Command-line interface: the presentation layer over a browse session.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use console::style;

use crate::cache::DatasetCache;
use crate::config::{BrowserConfig, LabelMode, SignDisplay, ANY};
use crate::error::{AstroError, Result};
use crate::filter::{Criteria, DegreeConstraint, Selection};
use crate::render::{
    render_detail, render_json, render_options, render_table, render_tree, DETAIL_WRAP_WIDTH,
};
use crate::session::BrowseSession;
use crate::types::RoddenRating;

/// AstroData Filter - Browse and filter AstroDatabank XML exports.
#[derive(Parser)]
#[command(name = "astrodata-filter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Source XML file (default: $ASTRODATA_PATH or astrodata.xml)
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,

    /// Store signs as raw codes or translated names
    #[arg(long, global = true)]
    pub signs: Option<SignDisplay>,

    /// Label records by keyword mapping or by first category
    #[arg(long, global = true)]
    pub labels: Option<LabelMode>,

    /// YAML keyword mapping replacing the built-in labels
    #[arg(long, global = true)]
    pub keywords: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every filter and the values it offers.
    Options,

    /// Filter records and print the matches.
    Search(SearchArgs),

    /// Print the category hierarchy.
    Tree {
        /// Start below this path, one flag per level
        #[arg(short, long = "category")]
        category: Vec<String>,
    },

    /// Show the detail panel for one record.
    Show {
        /// Record identifier (adb_id)
        id: String,
    },
}

/// How search results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Detail,
    Json,
}

#[derive(Debug, Default, Args)]
pub struct SearchArgs {
    /// Rodden rating (AA, A, B, C, DD, X, XX)
    #[arg(long)]
    pub rodden: Option<String>,

    /// Sun sign, code or name (e.g. leo or Лев)
    #[arg(long)]
    pub sun_sign: Option<String>,

    /// Sun degree: exact (15) or inclusive range (10..20)
    #[arg(long)]
    pub sun_degree: Option<String>,

    /// Moon sign
    #[arg(long)]
    pub moon_sign: Option<String>,

    /// Moon degree: exact or range
    #[arg(long)]
    pub moon_degree: Option<String>,

    /// Ascendant sign
    #[arg(long)]
    pub asc_sign: Option<String>,

    /// Ascendant degree: exact or range
    #[arg(long)]
    pub asc_degree: Option<String>,

    /// Record label (keyword label or first category)
    #[arg(long)]
    pub label: Option<String>,

    /// Category path, one flag per level (e.g. --category Sports --category Football)
    #[arg(short, long = "category")]
    pub category: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    let mut cache = DatasetCache::new();
    let dataset = cache.get_or_load(&config)?;
    let mut session = BrowseSession::new(dataset);

    match cli.command {
        Commands::Options => {
            print!("{}", render_options(session.dataset()));
            Ok(())
        }
        Commands::Search(args) => search_command(&mut session, &args),
        Commands::Tree { category } => tree_command(&session, &category),
        Commands::Show { id } => show_command(&session, &id),
    }
}

/// Environment settings overridden by command-line flags.
pub fn build_config(cli: &Cli) -> Result<BrowserConfig> {
    let mut config = BrowserConfig::from_env()?;
    if let Some(data) = &cli.data {
        config = config.with_data_path(data);
    }
    if let Some(signs) = cli.signs {
        config = config.with_sign_display(signs);
    }
    if let Some(labels) = cli.labels {
        config = config.with_label_mode(labels);
    }
    if let Some(keywords) = &cli.keywords {
        config = config.with_keywords_path(keywords);
    }
    Ok(config)
}

/// Translate search flags into criteria. `any` is accepted as a wildcard
/// for every field.
pub fn criteria_from_args(args: &SearchArgs) -> Result<Criteria> {
    Ok(Criteria {
        rodden_rating: selection(args.rodden.as_deref()).map(|code| RoddenRating::from_code(&code)),
        sun_sign: selection(args.sun_sign.as_deref()),
        sun_degree: degree("sun degree", args.sun_degree.as_deref())?,
        moon_sign: selection(args.moon_sign.as_deref()),
        moon_degree: degree("moon degree", args.moon_degree.as_deref())?,
        ascendant_sign: selection(args.asc_sign.as_deref()),
        ascendant_degree: degree("ascendant degree", args.asc_degree.as_deref())?,
        label: selection(args.label.as_deref()),
        category_path: Vec::new(),
        required_paths: Vec::new(),
    })
}

fn is_wildcard(value: &str) -> bool {
    value.trim().is_empty() || value.trim().eq_ignore_ascii_case(ANY)
}

fn selection(value: Option<&str>) -> Selection<String> {
    value
        .filter(|v| !is_wildcard(v))
        .map(|v| v.trim().to_string())
        .into()
}

fn degree(field: &str, value: Option<&str>) -> Result<DegreeConstraint> {
    match value.filter(|v| !is_wildcard(v)) {
        Some(v) => DegreeConstraint::parse(field, v),
        None => Ok(DegreeConstraint::Any),
    }
}

/// Apply search flags to the session and print the result.
fn search_command(session: &mut BrowseSession, args: &SearchArgs) -> Result<()> {
    session.set_criteria(criteria_from_args(args)?);
    for (index, segment) in args.category.iter().enumerate() {
        let level_selection = selection(Some(segment));
        if level_selection.is_any() {
            break;
        }
        session.set_category_level(index + 1, level_selection)?;
    }

    let results = session.results();
    if results.is_empty() {
        println!("{}", style("No records match the selected filters.").yellow());
        return Ok(());
    }

    match args.format {
        OutputFormat::Table => {
            print!("{}", render_table(&results));
            println!();
            println!(
                "{} of {} records",
                style(results.len()).green().bold(),
                session.dataset().len()
            );
        }
        OutputFormat::Detail => {
            for record in &results {
                println!("{}", render_detail(record, DETAIL_WRAP_WIDTH));
            }
        }
        OutputFormat::Json => println!("{}", render_json(&results)?),
    }
    Ok(())
}

fn tree_command(session: &BrowseSession, category: &[String]) -> Result<()> {
    let hierarchy = session.dataset().hierarchy();
    let node = hierarchy.get(category).ok_or_else(|| {
        AstroError::invalid_criterion("category", format!("'{}' not found", category.join(" > ")))
    })?;

    if node.is_leaf() {
        println!("{}", style("(no subcategories)").dim());
    } else {
        print!("{}", render_tree(node));
    }
    Ok(())
}

fn show_command(session: &BrowseSession, id: &str) -> Result<()> {
    let record = session
        .dataset()
        .find(id)
        .ok_or_else(|| AstroError::invalid_criterion("id", format!("no record with id '{id}'")))?;
    print!("{}", render_detail(record, DETAIL_WRAP_WIDTH));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_search() {
        let cli = Cli::parse_from([
            "astrodata-filter",
            "--data",
            "export.xml",
            "search",
            "--sun-sign",
            "leo",
            "--sun-degree",
            "10..20",
            "--category",
            "Sports",
            "--category",
            "Football",
            "--format",
            "json",
        ]);

        assert_eq!(cli.data, Some(PathBuf::from("export.xml")));
        let Commands::Search(args) = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(args.sun_sign.as_deref(), Some("leo"));
        assert_eq!(args.category, vec!["Sports", "Football"]);
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_cli_parse_global_modes() {
        let cli = Cli::parse_from([
            "astrodata-filter",
            "options",
            "--signs",
            "raw",
            "--labels",
            "first",
        ]);
        assert_eq!(cli.signs, Some(SignDisplay::Raw));
        assert_eq!(cli.labels, Some(LabelMode::FirstCategory));
        assert!(matches!(cli.command, Commands::Options));
    }

    #[test]
    fn test_criteria_from_args() {
        let args = SearchArgs {
            rodden: Some("aa".into()),
            sun_sign: Some("Лев".into()),
            sun_degree: Some("10..20".into()),
            moon_degree: Some("any".into()),
            asc_degree: Some("7".into()),
            label: Some("ANY".into()),
            ..SearchArgs::default()
        };
        let criteria = criteria_from_args(&args).unwrap();

        assert_eq!(criteria.rodden_rating, Selection::Is(RoddenRating::AA));
        assert_eq!(criteria.sun_sign, Selection::Is("Лев".into()));
        assert_eq!(criteria.sun_degree, DegreeConstraint::Range { low: 10, high: 20 });
        assert_eq!(criteria.moon_degree, DegreeConstraint::Any);
        assert_eq!(criteria.ascendant_degree, DegreeConstraint::Exact(7));
        assert!(criteria.label.is_any());
        assert!(criteria.moon_sign.is_any());
    }

    #[test]
    fn test_criteria_from_args_rejects_bad_degree() {
        let args = SearchArgs {
            moon_degree: Some("31".into()),
            ..SearchArgs::default()
        };
        let err = criteria_from_args(&args).unwrap_err();
        assert!(err.to_string().contains("moon degree"));
    }
}
