use crate::analyzers::TableAnalyzer;
use crate::cli::args::{Cli, Commands, DateArgs, Selection};
use crate::error::Result;
use crate::models::{season_title, top_title, TrackTable};
use crate::processors::{DateRange, TrackQuery};
use crate::readers::{DatasetLoader, FetchOutcome};
use crate::settings::Settings;
use crate::utils::progress::ProgressReporter;
use crate::writers::{OutputFormat, ReportWriter};
use std::io::{self, Write};
use tracing::{debug, info};

pub fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(data) = cli.data {
        settings.data_path = data;
    }
    debug!(?settings, "settings resolved");

    let loader = DatasetLoader::from_settings(&settings).with_offline(cli.offline);
    let silent = cli.format == OutputFormat::Json;
    let stdout = io::stdout();
    let mut writer = ReportWriter::new(stdout.lock(), cli.format);

    match cli.command {
        Commands::Fetch => {
            let progress = ProgressReporter::new_spinner("Checking track file...", silent);
            let outcome = loader.fetch(&settings.data_path, Some(&progress))?;
            let message = match outcome {
                FetchOutcome::Downloaded { bytes } => format!(
                    "Downloaded {} bytes to {}",
                    bytes,
                    settings.data_path.display()
                ),
                FetchOutcome::UpToDate => {
                    "File already exists and has the expected size.".to_string()
                }
                FetchOutcome::KeptLocal => format!(
                    "Kept local file {} without checking the remote size",
                    settings.data_path.display()
                ),
            };
            progress.finish_with_message(&message);
            info!(?outcome, "fetch complete");
        }

        command => {
            let progress = ProgressReporter::new_spinner("Loading track file...", silent);
            let table = loader.load(&settings.data_path, Some(&progress))?;
            drop(progress);

            let query = TrackQuery::new(table);
            run_query(command, &query, &settings, &mut writer)?;
        }
    }

    writer.into_inner().flush()?;
    Ok(())
}

fn run_query<W: Write>(
    command: Commands,
    query: &TrackQuery,
    settings: &Settings,
    writer: &mut ReportWriter<W>,
) -> Result<()> {
    match command {
        Commands::Fetch => {}

        Commands::Info => {
            let stats = TableAnalyzer::new().analyze(query.table());
            writer.write_text(&stats.summary())?;
            writer.write_seasons(query.table().seasons())?;
        }

        Commands::Window { selection } => {
            let window = query.date_range_for_selection(&selection.basin, selection.season)?;
            writer.write_window(&window)?;
        }

        Commands::Disturbances { selection, dates } => {
            let ids = match resolve_range(query, &selection, &dates)? {
                Some(range) => {
                    query.disturbances_in_range(&selection.basin, selection.season, range)
                }
                None => Vec::new(),
            };
            writer.write_disturbances(&ids)?;
        }

        Commands::Tracks {
            selection,
            dates,
            ids,
        } => {
            let title = season_title(selection.season, &selection.basin);
            let Some(range) = resolve_range(query, &selection, &dates)? else {
                return writer.write_tracks(&title, &[]);
            };

            let ids = if ids.is_empty() {
                query.disturbances_in_range(&selection.basin, selection.season, range)
            } else {
                ids
            };
            let tracks = query.tracks_grouped(&selection.basin, selection.season, &ids, range);
            writer.write_tracks(&title, &tracks)?;
        }

        Commands::Storm { selection, name } => {
            let title = format!("{}: {}", name, selection.season);
            let tracks = query.tracks_for_storm(&selection.basin, selection.season, &name);
            writer.write_tracks(&title, &tracks)?;
        }

        Commands::Top {
            basin,
            from,
            to,
            limit,
        } => {
            let limit = limit.unwrap_or(settings.top_limit);
            let Some((first, last)) = season_bounds(query.table(), from, to) else {
                return writer.write_top(&format!("No seasons loaded for {}", basin), &[]);
            };

            let ranked = query.top_by_peak_wind(&basin, first, last, limit)?;
            writer.write_top(&top_title(&basin, first, last, limit), &ranked)?;
        }
    }

    Ok(())
}

/// Requested days, defaulting each missing bound to the observed span.
///
/// `None` when a bound is missing and the selection has no data.
fn resolve_range(
    query: &TrackQuery,
    selection: &Selection,
    dates: &DateArgs,
) -> Result<Option<DateRange>> {
    let window = query.date_range_for_selection(&selection.basin, selection.season)?;
    let start = dates
        .start
        .or_else(|| window.earliest_observed.map(|t| t.date()));
    let end = dates.end.or_else(|| window.latest_observed.map(|t| t.date()));

    match (start, end) {
        (Some(start), Some(end)) => Ok(Some(DateRange::days(start, end)?)),
        _ => Ok(None),
    }
}

fn season_bounds(table: &TrackTable, from: Option<i32>, to: Option<i32>) -> Option<(i32, i32)> {
    let span = table.season_span();
    let first = from.or(span.map(|s| s.0))?;
    let last = to.or(span.map(|s| s.1))?;
    Some((first, last))
}

