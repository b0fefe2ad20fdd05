//! The interactive session loop.
//!
//! State transitions live in [`next_state`], a pure function over
//! [`SessionState`] and [`SessionEvent`], so the control flow is testable
//! without a terminal; [`SessionLoop`] is the thin I/O driver around it.

use std::io::{BufRead, Write};

use explorer_core::error::Result;
use explorer_core::models::Dataset;
use explorer_data::pager::{self, PAGE_SIZE};
use explorer_data::reader::load_dataset;
use explorer_data::sources::CitySources;
use tracing::{info, warn};

use crate::prompts::{self, FilterSeed};
use crate::report;

// ── State machine ─────────────────────────────────────────────────────────────

/// The five states of one explorer run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Prompting for city/month/day and loading the dataset.
    CollectFilters,
    /// Running the four aggregators and printing their reports.
    Analyze,
    /// Asking whether to show (more) raw rows.
    OfferRawData,
    /// Asking whether to start over with new filters.
    OfferRestart,
    /// Terminal state.
    Done,
}

/// Everything that can happen inside a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The dataset loaded successfully.
    Loaded,
    /// The dataset could not be loaded; filters are re-collected.
    LoadFailed,
    /// All aggregate reports were printed.
    AnalysisShown,
    /// The user asked for a raw-data page and it was displayed.
    RawShown {
        /// Whether any rows remain after the displayed page.
        more_remaining: bool,
    },
    /// The user declined the raw-data offer.
    RawDeclined,
    /// The user accepted the restart offer.
    RestartAccepted,
    /// The user declined the restart offer.
    RestartDeclined,
}

/// Pure transition function. Events that do not apply to the current state
/// leave it unchanged.
pub fn next_state(state: SessionState, event: SessionEvent) -> SessionState {
    use SessionEvent::*;
    use SessionState::*;

    match (state, event) {
        (CollectFilters, Loaded) => Analyze,
        (CollectFilters, LoadFailed) => CollectFilters,
        (Analyze, AnalysisShown) => OfferRawData,
        (OfferRawData, RawShown { more_remaining: true }) => OfferRawData,
        (OfferRawData, RawShown { more_remaining: false }) => OfferRestart,
        (OfferRawData, RawDeclined) => OfferRestart,
        (OfferRestart, RestartAccepted) => CollectFilters,
        (OfferRestart, RestartDeclined) => Done,
        (state, _) => state,
    }
}

// ── SessionLoop ───────────────────────────────────────────────────────────────

/// Drives the state machine against real (or test) I/O streams.
pub struct SessionLoop<R, W> {
    input: R,
    output: W,
    sources: CitySources,
    seed: FilterSeed,
}

impl<R: BufRead, W: Write> SessionLoop<R, W> {
    pub fn new(sources: CitySources, seed: FilterSeed, input: R, output: W) -> Self {
        Self {
            input,
            output,
            sources,
            seed,
        }
    }

    /// Run sessions until the user declines a restart.
    pub fn run(mut self) -> Result<()> {
        writeln!(self.output, "Hello! Let's explore some US bikeshare data!")?;

        let mut state = SessionState::CollectFilters;
        let mut dataset = Dataset::default();
        let mut start_row = 0usize;
        // Seeded filters apply to the first session only.
        let mut seed = self.seed;

        while state != SessionState::Done {
            state = match state {
                SessionState::CollectFilters => {
                    let selection =
                        prompts::collect_filters(&mut self.input, &mut self.output, &seed)?;
                    seed = FilterSeed::default();

                    match load_dataset(&self.sources, &selection) {
                        Ok(loaded) => {
                            info!(
                                "Loaded {} records for {} (month: {}, day: {})",
                                loaded.len(),
                                selection.city,
                                selection.month,
                                selection.day
                            );
                            dataset = loaded;
                            start_row = 0;
                            report::divider(&mut self.output)?;
                            next_state(state, SessionEvent::Loaded)
                        }
                        Err(err) => {
                            warn!("load failed: {}", err);
                            writeln!(self.output, "Could not load data: {}", err)?;
                            writeln!(self.output, "Please choose again.")?;
                            next_state(state, SessionEvent::LoadFailed)
                        }
                    }
                }

                SessionState::Analyze => {
                    report::render_analysis(&mut self.output, &dataset)?;
                    next_state(state, SessionEvent::AnalysisShown)
                }

                SessionState::OfferRawData => {
                    let wants_raw = prompts::confirm(
                        &mut self.input,
                        &mut self.output,
                        "\nWould you like to see 5 lines of raw data? Enter yes or no.",
                    )?;

                    if wants_raw {
                        let page = pager::page(&dataset, start_row);
                        report::render_page(&mut self.output, &page, start_row)?;
                        let more_remaining = page.has_more;
                        start_row += PAGE_SIZE;

                        if !more_remaining {
                            writeln!(self.output, "No more raw data to display.")?;
                        }
                        next_state(state, SessionEvent::RawShown { more_remaining })
                    } else {
                        next_state(state, SessionEvent::RawDeclined)
                    }
                }

                SessionState::OfferRestart => {
                    let restart = prompts::confirm(
                        &mut self.input,
                        &mut self.output,
                        "\nWould you like to restart? Enter yes or no.",
                    )?;
                    next_state(
                        state,
                        if restart {
                            SessionEvent::RestartAccepted
                        } else {
                            SessionEvent::RestartDeclined
                        },
                    )
                }

                SessionState::Done => SessionState::Done,
            };
        }

        writeln!(self.output, "Goodbye!")?;
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
