use std::io::Write;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use habit_core::{
    dashboard::DashboardSnapshot,
    day::parse_day_key,
    range::{DayRange, DEFAULT_WINDOW_DAYS},
    HabitStore,
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub(crate) window_days: u32,
    pub(crate) year: Option<i32>,
    pub(crate) today: Option<NaiveDate>,
    pub(crate) sample_data: bool,
    pub(crate) sample_seed: u64,
    pub(crate) filter: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self::from_lookup(|key| std::env::var(key).ok()))
    }

    /// Builds a config from any key lookup. Malformed values are logged and
    /// the default is kept.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = lookup("HABIT_WINDOW_DAYS") {
            match raw.trim().parse::<u32>() {
                Ok(value) => config.window_days = value,
                Err(err) => warn!(%raw, %err, "ignoring HABIT_WINDOW_DAYS"),
            }
        }
        if let Some(raw) = lookup("HABIT_YEAR") {
            match raw.trim().parse::<i32>() {
                Ok(value) => config.year = Some(value),
                Err(err) => warn!(%raw, %err, "ignoring HABIT_YEAR"),
            }
        }
        if let Some(raw) = lookup("HABIT_TODAY") {
            match parse_day_key(&raw) {
                Ok(date) => config.today = Some(date),
                Err(err) => warn!(%raw, %err, "ignoring HABIT_TODAY"),
            }
        }
        if let Some(raw) = lookup("HABIT_SAMPLE_DATA") {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => config.sample_data = true,
                "0" | "false" | "no" | "off" => config.sample_data = false,
                _ => warn!(%raw, "ignoring HABIT_SAMPLE_DATA"),
            }
        }
        if let Some(raw) = lookup("HABIT_SAMPLE_SEED") {
            match raw.trim().parse::<u64>() {
                Ok(value) => config.sample_seed = value,
                Err(err) => warn!(%raw, %err, "ignoring HABIT_SAMPLE_SEED"),
            }
        }
        if let Some(raw) = lookup("HABIT_FILTER") {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                config.filter = Some(trimmed.to_string());
            }
        }
        config
    }

    pub fn range(&self) -> DayRange {
        match self.year {
            Some(year) => DayRange::Year { year },
            None => DayRange::Trailing {
                days: self.window_days,
            },
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            year: None,
            today: None,
            sample_data: true,
            sample_seed: 42,
            filter: None,
        }
    }
}

/// Logs go to stderr so stdout carries only the JSON document.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub fn build_dashboard(config: &AppConfig) -> Result<DashboardSnapshot> {
    let start = Instant::now();
    let today = config.today();
    let mut builder = HabitStore::builder();
    if config.sample_data {
        builder = builder.with_sample_data(config.sample_seed, today);
    }
    let store = builder
        .build()
        .context("failed to initialize habit store")?;
    info!(habit_count = store.len(), %today, "habit store ready");

    if let Some(filter) = &config.filter {
        if !store.contains(filter) {
            warn!(habit_id = %filter, "filter names an unknown habit; showing an empty graph");
        }
    }

    let range = config.range();
    let dashboard = store.dashboard(range, today, config.filter.as_deref());
    debug!(
        cells = dashboard.cells.len(),
        weeks = dashboard.weeks.len(),
        elapsed_ms = %start.elapsed().as_millis(),
        "dashboard computed"
    );
    Ok(dashboard)
}

pub fn run(config: AppConfig) -> Result<()> {
    info!(?config, "starting habit dashboard");
    let dashboard = build_dashboard(&config)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &dashboard).context("failed to write dashboard")?;
    writeln!(out).context("failed to write dashboard")?;
    info!(
        range = %dashboard.range_label,
        contributions = dashboard.total_contributions,
        streak = dashboard.current_streak,
        "dashboard written"
    );
    Ok(())
}
