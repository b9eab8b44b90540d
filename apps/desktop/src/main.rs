use std::{fmt::Write as _, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use dashboard_core::{
    config::parse_analysis_url,
    load_settings, render,
    render::{BarKind, ProposalAction, Tone, ViewBody},
    AnalysisResultStore, DashboardView, HttpAnalysisClient, UploadController, UploadDocument,
    UploadError,
};
use shared::domain::ReasoningStatus;
use tracing_subscriber::EnvFilter;

const BAR_CELLS: usize = 40;

/// Runs one dashboard session from the terminal: upload, show, optionally approve.
#[derive(Parser, Debug)]
struct Args {
    /// Tender document to analyze.
    #[arg(long)]
    file: PathBuf,
    /// Overrides the configured analysis endpoint.
    #[arg(long)]
    analysis_url: Option<String>,
    /// Settings file; defaults to ./dashboard.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Generate the proposal after a successful analysis.
    #[arg(long)]
    approve: bool,
    /// Print the view description as JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(url) = &args.analysis_url {
        settings.analysis_url = parse_analysis_url(url)?;
    }

    let document = UploadDocument::from_path(&args.file)
        .await
        .with_context(|| format!("failed to read '{}'", args.file.display()))?;

    tracing::info!(
        file = %args.file.display(),
        url = %settings.analysis_url,
        "starting dashboard session"
    );
    let controller = UploadController::new(HttpAnalysisClient::new(settings.analysis_url));
    let mut store = AnalysisResultStore::new();
    let prices = settings.reference_prices;

    show(&render(&store, &prices), args.json)?;
    match controller.submit_file(&mut store, document).await {
        Ok(()) => {}
        Err(UploadError::Failed(failure)) => bail!(failure.notice()),
        Err(err) => return Err(err.into()),
    }
    show(&render(&store, &prices), args.json)?;

    if args.approve {
        store.approve()?;
        show(&render(&store, &prices), args.json)?;
    }

    store.reset();
    Ok(())
}

fn show(view: &DashboardView, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(view)?);
    } else {
        print!("{}", format_view(view));
    }
    Ok(())
}

fn tone_tag(tone: Tone) -> &'static str {
    match tone {
        Tone::Success => "OK",
        Tone::Warning => "WARN",
    }
}

/// Bars are drawn clipped to the track, while the label keeps the real percentage.
fn bar_cells(width_percent: f64) -> String {
    let filled = (width_percent.clamp(0.0, 100.0) / 100.0 * BAR_CELLS as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_CELLS - filled))
}

fn format_view(view: &DashboardView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}\n{}\n", view.title, view.subtitle);

    let panel = match &view.body {
        ViewBody::Upload(upload) => {
            let _ = writeln!(out, "{}", upload.caption);
            return out;
        }
        ViewBody::Result(panel) => panel,
    };

    if let Some(banner) = &panel.banner {
        let _ = writeln!(out, "[{}] {}\n", tone_tag(banner.tone), banner.text);
    }

    let product = &panel.product;
    let _ = writeln!(out, "{}: {}", product.heading, product.name);
    if !product.description.is_empty() {
        let _ = writeln!(out, "  {}", product.description);
    }
    let _ = writeln!(out, "  {}{}", product.price_label, product.unit_label);
    let _ = writeln!(
        out,
        "  [{}] {}",
        tone_tag(product.compliance_tone),
        product.compliance_label
    );
    for row in &panel.compliance {
        let mark = match row.status {
            ReasoningStatus::Pass => "PASS",
            ReasoningStatus::Fail => "FAIL",
        };
        let _ = writeln!(out, "  [{mark}] {}", row.text);
    }

    let _ = writeln!(out, "\n{}", panel.prices.title);
    for bar in &panel.prices.bars {
        let marker = match bar.kind {
            BarKind::Selected => '*',
            BarKind::Reference => ' ',
        };
        let _ = writeln!(
            out,
            "{marker} {:<24} {:>8}  {} {:.0}%",
            bar.label,
            bar.price_label,
            bar_cells(bar.width_percent),
            bar.width_percent
        );
        if let Some(caption) = bar.caption {
            let _ = writeln!(out, "  {caption}");
        }
    }

    let _ = writeln!(out);
    match &panel.proposal {
        ProposalAction::Generate { label } => {
            let _ = writeln!(out, "> {label} (run with --approve)");
        }
        ProposalAction::Unavailable { reason } => {
            let _ = writeln!(out, "Proposal unavailable: {reason}");
        }
        ProposalAction::Generated { message } => {
            let _ = writeln!(out, "{message}");
        }
    }
    let _ = writeln!(out, "{}", panel.reset_label);
    out
}
