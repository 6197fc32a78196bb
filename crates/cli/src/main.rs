use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use geovalid::algorithm::{EndPoint, Mod2, MonovalentEndPoint, MultivalentEndPoint};
use geovalid::valid::{SimpleCfg, ValidCfg};
use serde_json::json;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod check;
mod input;
mod provenance;

use check::{check_all, write_table, CheckOpts, CheckRow};

#[derive(Parser)]
#[command(name = "geovalid")]
#[command(version, about = "Planar geometry validity and simplicity checks")]
struct Cmd {
    /// Optional run label; propagated to provenance and logs
    #[arg(long)]
    tag: Option<String>,

    /// Log library decisions (failed checks, sweep statistics)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Check every geometry and print one JSON line per geometry
    Check(CheckArgs),
    /// Check every geometry and write a results table plus provenance sidecar
    Batch {
        #[command(flatten)]
        args: CheckArgs,
        /// Output table; `.parquet` selects Parquet, anything else CSV
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Args, Clone, Debug)]
struct CheckArgs {
    /// GeoJSON-like geometry object or array
    #[arg(long)]
    input: PathBuf,
    /// Report every non-simple location instead of the first
    #[arg(long)]
    find_all: bool,
    /// Boundary node rule for closed line endpoints
    #[arg(long, value_enum, default_value_t = Rule::Mod2)]
    rule: Rule,
    /// Accept shells that self-touch to form holes
    #[arg(long)]
    allow_inverted_rings: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Rule {
    Mod2,
    Endpoint,
    Multivalent,
    Monovalent,
}

impl CheckArgs {
    fn opts(&self) -> CheckOpts {
        let mut simple = match self.rule {
            Rule::Mod2 => SimpleCfg::with_rule(&Mod2),
            Rule::Endpoint => SimpleCfg::with_rule(&EndPoint),
            Rule::Multivalent => SimpleCfg::with_rule(&MultivalentEndPoint),
            Rule::Monovalent => SimpleCfg::with_rule(&MonovalentEndPoint),
        };
        simple.find_all_locations = self.find_all;
        CheckOpts {
            simple,
            valid: ValidCfg {
                self_touching_ring_forming_hole_valid: self.allow_inverted_rings,
            },
        }
    }

    fn params(&self) -> serde_json::Value {
        json!({
            "rule": format!("{:?}", self.rule).to_lowercase(),
            "find_all": self.find_all,
            "allow_inverted_rings": self.allow_inverted_rings,
        })
    }
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::TRACE } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    match cmd.action {
        Action::Check(args) => check(args, cmd.tag),
        Action::Batch { args, out } => batch(args, out, cmd.tag),
        Action::Report => report(cmd.tag),
    }
}

fn run(args: &CheckArgs, tag: Option<&str>) -> Result<Vec<CheckRow>> {
    let geoms = input::load(&args.input)?;
    let rows = check_all(&geoms, &args.opts());
    let invalid = rows.iter().filter(|r| !r.valid).count();
    let non_simple = rows.iter().filter(|r| !r.simple).count();
    tracing::info!(
        input = %args.input.display(),
        tag,
        geometries = rows.len(),
        invalid,
        non_simple,
        "checked"
    );
    Ok(rows)
}

fn check(args: CheckArgs, tag: Option<String>) -> Result<()> {
    for row in run(&args, tag.as_deref())? {
        println!("{}", serde_json::to_string(&row)?);
    }
    Ok(())
}

fn batch(args: CheckArgs, out: PathBuf, tag: Option<String>) -> Result<()> {
    let rows = run(&args, tag.as_deref())?;
    let format = write_table(&out, &rows)?;
    let mut payload = provenance::Payload::new(args.params());
    payload.inputs.push(args.input.to_string_lossy().into_owned());
    payload.summary = json!({
        "geometries": rows.len(),
        "invalid": rows.iter().filter(|r| !r.valid).count(),
        "non_simple": rows.iter().filter(|r| !r.simple).count(),
        "format": format!("{format:?}").to_lowercase(),
    });
    payload.tag = tag;
    let prov = provenance::write_sidecar(&out, payload)?;
    tracing::info!(out = %out.display(), provenance = %prov.display(), "batch written");
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    let mut obj = provenance::base_block(tag.as_deref());
    obj["params"] = json!({});
    obj["outputs"] = json!([]);
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
