use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use statfin_rs::project::ChartSession;
use statfin_rs::{AreaDirectory, Client, Series, stats, storage, viz};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "statfin",
    version,
    about = "Fetch, visualize & project Statistics Finland population data"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the population series, optionally projecting future years.
    Population(PopulationArgs),
    /// Fetch births and deaths as a paired series.
    BirthsDeaths(BirthsDeathsArgs),
    /// List the area directory (codes and display names).
    Areas,
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct AreaSelection {
    /// Municipality name, code, or "whole country".
    #[arg(short, long, default_value = "whole country")]
    area: String,
    /// Send this area code as-is, skipping directory validation
    /// (the deep-link path; the API rejects codes it does not know).
    #[arg(long, conflicts_with = "area")]
    code: Option<String>,
    /// Display label to pair with --code.
    #[arg(long, requires = "code")]
    name: Option<String>,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Save results to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Create a chart at the given path (.svg or .png).
    #[arg(long)]
    plot: Option<PathBuf>,
    /// Width of the plot (default 1000).
    #[arg(long, default_value_t = 1000)]
    width: u32,
    /// Height of the plot (default 600).
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Print summary statistics to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

#[derive(Args, Debug)]
struct PopulationArgs {
    #[command(flatten)]
    area: AreaSelection,
    /// Project this many future years by mean annual change (max 5).
    #[arg(short, long, default_value_t = 0)]
    predict: usize,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct BirthsDeathsArgs {
    #[command(flatten)]
    area: AreaSelection,
    #[command(flatten)]
    output: OutputArgs,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 4 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

/// Resolve the selected area to (code, display label). `--code` bypasses the
/// directory like the original's query-string deep link; free text goes
/// through strict resolution against the loaded directory.
fn resolve_area(client: &Client, sel: &AreaSelection) -> Result<(String, String)> {
    if let Some(code) = &sel.code {
        let code = code.trim().to_uppercase();
        let label = sel.name.clone().unwrap_or_else(|| code.clone());
        return Ok((code, label));
    }
    let directory = AreaDirectory::load_with(|| client.fetch_area_directory());
    let code = directory.resolve(&sel.area)?;
    let label = directory.display_label(&sel.area);
    Ok((code, label))
}

fn save_series(series: &[Series], output: &OutputArgs) -> Result<()> {
    let Some(path) = output.out.as_ref() else {
        return Ok(());
    };
    let fmt = match output.format {
        Some(OutFormat::Csv) => "csv",
        Some(OutFormat::Json) => "json",
        None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
    }
    .to_ascii_lowercase();
    match fmt.as_str() {
        "csv" => storage::save_csv(series, path)?,
        "json" => storage::save_json(series, path)?,
        other => anyhow::bail!("unsupported format: {}", other),
    }
    let rows: usize = series.iter().map(|s| s.points.len()).sum();
    eprintln!("Saved {} rows to {}", rows, path.display());
    Ok(())
}

fn print_stats(series: &[Series]) {
    for s in series {
        let summary = stats::summarize(s);
        println!(
            "{} • {}  count={}  min={} max={} mean={} median={}  mean annual change={}",
            summary.area_name,
            summary.metric_label,
            summary.count,
            fmt_opt(summary.min),
            fmt_opt(summary.max),
            fmt_opt(summary.mean),
            fmt_opt(summary.median),
            fmt_opt(summary.mean_annual_change),
        );
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Population(args) => cmd_population(args),
        Command::BirthsDeaths(args) => cmd_births_deaths(args),
        Command::Areas => cmd_areas(),
    }
}

fn cmd_population(args: PopulationArgs) -> Result<()> {
    let client = Client::default();
    let (code, label) = resolve_area(&client, &args.area)?;

    let history = client.fetch_population(&code, &label)?;
    let mut session = ChartSession::new(history);
    session.project_more(args.predict)?;

    if let Some(plot_path) = args.output.plot.as_ref() {
        let spec = viz::population_spec(&session);
        viz::render(&spec, plot_path, args.output.width, args.output.height)?;
        eprintln!("Wrote plot to {}", plot_path.display());
    }

    let mut series = vec![session.history().clone()];
    if !session.projected().is_empty() {
        series.push(Series::new(
            &session.history().area_code,
            &session.history().area_name,
            "Population (projected)",
            session.projected().to_vec(),
        ));
    }
    save_series(&series, &args.output)?;

    if args.output.stats {
        print_stats(&series);
    }

    if args.output.out.is_none() && args.output.plot.is_none() && !args.output.stats {
        for p in session.combined() {
            println!("{}\t{}", p.year, fmt_opt(Some(p.value)));
        }
    }

    Ok(())
}

fn cmd_births_deaths(args: BirthsDeathsArgs) -> Result<()> {
    let client = Client::default();
    let (code, label) = resolve_area(&client, &args.area)?;

    let (births, deaths) = client.fetch_births_deaths(&code, &label)?;

    if let Some(plot_path) = args.output.plot.as_ref() {
        let spec = viz::births_deaths_spec(&births, &deaths);
        viz::render(&spec, plot_path, args.output.width, args.output.height)?;
        eprintln!("Wrote plot to {}", plot_path.display());
    }

    let series = vec![births, deaths];
    save_series(&series, &args.output)?;

    if args.output.stats {
        print_stats(&series);
    }

    if args.output.out.is_none() && args.output.plot.is_none() && !args.output.stats {
        for (b, d) in series[0].points.iter().zip(series[1].points.iter()) {
            println!(
                "{}\t{}\t{}",
                b.year,
                fmt_opt(Some(b.value)),
                fmt_opt(Some(d.value))
            );
        }
    }

    Ok(())
}

fn cmd_areas() -> Result<()> {
    let client = Client::default();
    let directory = AreaDirectory::load_with(|| client.fetch_area_directory());
    if !directory.is_complete() {
        eprintln!("Warning: area metadata unavailable, listing fallback directory only.");
    }
    for area in directory.areas() {
        println!("{}\t{}", area.code, area.name);
    }
    Ok(())
}
