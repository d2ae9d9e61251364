use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use git_release::cli::{run_release_workflow, ReleaseKind, ReleaseWorkflowArgs};
use git_release::config;
use git_release::git::Git2Repository;
use git_release::ui;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum KindArg {
    /// Next stable release
    Stable,
    /// Next preview release on the "next" track
    Preview,
    /// Ephemeral pull-request build
    Pr,
}

#[derive(clap::Parser)]
#[command(
    name = "git-release",
    version,
    about = "Compute the next release version from conventional commits"
)]
struct Args {
    #[arg(value_enum, default_value = "stable", help = "Kind of release to compute")]
    kind: KindArg,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, default_value = ".", help = "Path inside the git repository")]
    repo: String,

    #[arg(long, help = "Revision to compute the release for [default: from config, HEAD]")]
    rev: Option<String>,

    #[arg(long, help = "Pull request number (required for pr releases)")]
    pr: Option<u64>,

    #[arg(long, help = "Force the build number of a preview release")]
    build_num: Option<u64>,

    #[arg(
        long = "published",
        value_name = "VERSION",
        help = "Version already published to the registry (repeatable)"
    )]
    published: Vec<String>,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "git_release=debug"
    } else {
        "git_release=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let kind = match args.kind {
        KindArg::Stable => ReleaseKind::Stable,
        KindArg::Preview => ReleaseKind::Preview,
        KindArg::Pr => ReleaseKind::PullRequest {
            pr_num: args
                .pr
                .context("--pr <NUMBER> is required for pull-request releases")?,
        },
    };

    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;

    let repo = Git2Repository::open(&args.repo)
        .with_context(|| format!("Git repository error at '{}'", args.repo))?;

    let workflow_args = ReleaseWorkflowArgs {
        revision: args.rev,
        build_num: args.build_num,
        published_versions: args.published,
    };

    let result = run_release_workflow(&repo, kind, &workflow_args, &config)?;

    ui::display_series_report(&result.series);
    ui::display_outcome(&result);

    Ok(())
}
