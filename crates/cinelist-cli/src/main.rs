//! cinelist - list TMDB movie categories in the terminal.

/// Application configuration (TOML).
mod config;
/// Listing output formatting.
mod output;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, resolve_config_path};
use crate::output::write_movies;
use cinelist_api::tmdb::{LocalMovieApi, MovieCategory, TmdbClient, TmdbError};

/// CLI argument parser.
#[derive(Parser)]
#[command(
    about = "Fetch and display movie listings from The Movie Database (TMDB)",
    version,
    after_help = "Examples:\n  \
        cinelist --type now-playing   # Show now playing movies\n  \
        cinelist --type popular       # Show popular movies\n  \
        cinelist --type top-rated     # Show top-rated movies\n  \
        cinelist --type upcoming      # Show upcoming movies"
)]
struct Cli {
    /// Listing category to fetch.
    #[arg(short = 't', long = "type", value_enum)]
    category: CategoryArg,
}

/// Listing categories accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CategoryArg {
    /// Movies currently in theaters.
    NowPlaying,
    /// Popular movies.
    Popular,
    /// Top rated movies.
    TopRated,
    /// Upcoming releases.
    Upcoming,
}

impl From<CategoryArg> for MovieCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::NowPlaying => Self::NowPlaying,
            CategoryArg::Popular => Self::Popular,
            CategoryArg::TopRated => Self::TopRated,
            CategoryArg::Upcoming => Self::Upcoming,
        }
    }
}

/// Loads the config file from `$CINELIST_CONFIG_DIR` or `~/.config/cinelist`.
///
/// # Errors
///
/// Returns an error if the path cannot be resolved or the file is invalid.
fn load_config() -> Result<AppConfig> {
    let config_path = resolve_config_path().context("failed to resolve config path")?;
    tracing::debug!(path = %config_path.display(), "Loading config");
    AppConfig::load(&config_path).context("failed to load config")
}

/// Builds a `TmdbClient` from the config and the `TMDB_API_KEY` environment variable.
///
/// # Errors
///
/// Returns [`TmdbError::MissingApiKey`] if no key is available, or an error
/// if the configured base URL is invalid or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &AppConfig) -> Result<TmdbClient> {
    let mut builder = TmdbClient::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(url) = config.tmdb.base_url()? {
        builder = builder.base_url(url);
    }
    if let Some(ref language) = config.tmdb.language {
        builder = builder.language(language);
    }
    if let Some(ref region) = config.tmdb.region {
        builder = builder.region(region);
    }
    Ok(builder.build()?)
}

/// Fetches one listing category and writes it to `out`.
///
/// Nothing is written until the fetch has succeeded.
///
/// # Errors
///
/// Returns an error if the API request fails or writing to `out` fails.
#[allow(clippy::future_not_send)]
async fn list_movies<A, W>(api: &A, category: MovieCategory, out: &mut W) -> Result<()>
where
    A: LocalMovieApi,
    W: Write,
{
    tracing::info!("Fetching {} movies from TMDB...", category);

    let movies = api.movie_list(category).await?;

    writeln!(out, "{}", category.title()).context("failed to write output")?;
    write_movies(out, &movies).context("failed to write output")?;
    out.flush().context("failed to write output")?;

    Ok(())
}

/// Writes a user-facing error message.
///
/// A missing API key gets setup instructions instead of the generic text.
fn report_error<W: Write>(err: &anyhow::Error, out: &mut W) -> io::Result<()> {
    let tmdb_err = err.downcast_ref::<TmdbError>();
    if let Some(env_var) = tmdb_err.and_then(TmdbError::missing_api_key_env) {
        writeln!(out, "Configuration Error: {err}")?;
        writeln!(out)?;
        writeln!(out, "Please set your TMDB API key:")?;
        writeln!(out, "  export {env_var}='your_api_key_here'")?;
    } else {
        writeln!(out, "Error: {err:#}")?;
    }
    Ok(())
}

/// Runs one invocation: config, client, fetch, print.
///
/// # Errors
///
/// Returns an error if any step fails.
#[allow(clippy::future_not_send)]
#[instrument(skip_all, fields(category = %category))]
async fn run(category: MovieCategory) -> Result<()> {
    let config = load_config()?;
    let client = build_tmdb_client(&config)?;
    let mut stdout = io::stdout().lock();
    list_movies(&client, category, &mut stdout).await
}

/// Flushes exported spans on drop.
#[cfg(feature = "otel")]
struct TracingGuard(Option<opentelemetry_sdk::trace::SdkTracerProvider>);

#[cfg(feature = "otel")]
impl Drop for TracingGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.0.take() {
            // Spans are lost either way if the collector is unreachable.
            let _ = provider.shutdown();
        }
    }
}

#[cfg(not(feature = "otel"))]
struct TracingGuard;

/// Initializes the tracing subscriber. Logs go to stderr; stdout carries
/// only the listing.
///
/// Must run outside the tokio runtime: the OTLP exporter uses a blocking
/// HTTP client, and spans are sent from the batch processor's own thread.
fn init_tracing() -> TracingGuard {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .with_writer(io::stderr)
            .init();
        TracingGuard
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(io::stderr);

        let tracer_provider = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                Some(
                    opentelemetry_sdk::trace::SdkTracerProvider::builder()
                        .with_batch_exporter(exporter)
                        .build(),
                )
            });

        let otel_layer = tracer_provider.as_ref().map(|provider| {
            let tracer =
                opentelemetry::trace::TracerProvider::tracer(provider, env!("CARGO_PKG_NAME"));
            opentelemetry::global::set_tracer_provider(provider.clone());
            tracing_opentelemetry::layer().with_tracer(tracer)
        });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();

        TracingGuard(tracer_provider)
    }
}

/// Entry point.
///
/// Exit code 0 on success, 1 on any error, 2 on invalid arguments (clap).
fn main() -> ExitCode {
    let _tracing = init_tracing();

    let cli = Cli::parse();
    let result = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start tokio runtime")
        .and_then(|runtime| runtime.block_on(run(MovieCategory::from(cli.category))));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "Invocation failed");
            // Nothing left to report to if stderr itself is gone.
            let _ = report_error(&err, &mut io::stderr().lock());
            ExitCode::FAILURE
        }
    }
}
