// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{DisplayPreference, TracingConfig, WriterConfig, rolling_file_appender_impl};
use tracing::subscriber::DefaultGuard;
use tracing_core::{LevelFilter, Subscriber};
use tracing_subscriber::{Layer, Registry, layer::SubscriberExt, registry::LookupSpan,
                         util::SubscriberInitExt};

/// Type alias for a boxed layer.
pub type DynLayer<S> = dyn Layer<S> + Send + Sync + 'static;

impl TracingConfig {
    /// Install as the process wide default subscriber. Does nothing if logging is
    /// disabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file can't be opened or a global subscriber was
    /// already installed.
    pub fn install_global(&self) -> miette::Result<()> {
        if self.is_disabled() {
            return Ok(());
        }
        tracing_subscriber::registry()
            .with(try_create_layers(self)?)
            .try_init()
            .map_err(|err| miette::miette!("Can't install the tracing subscriber: {err}"))
    }

    /// Install as the default subscriber for the current thread, until the returned
    /// guard is dropped. Returns `None` if logging is disabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file can't be opened.
    pub fn install_thread_local(&self) -> miette::Result<Option<DefaultGuard>> {
        if self.is_disabled() {
            return Ok(None);
        }
        let subscriber = tracing_subscriber::registry().with(try_create_layers(self)?);
        Ok(Some(tracing::subscriber::set_default(subscriber)))
    }
}

/// Returns the layers. This does not initialize the tracing system.
///
/// The first layer is always the level filter, followed by the display layer and the
/// file layer if the [`WriterConfig`] asks for them.
///
/// # Errors
///
/// Returns an error if the log file can't be opened.
pub fn try_create_layers(
    tracing_config: &TracingConfig,
) -> miette::Result<Vec<Box<DynLayer<Registry>>>> {
    let level_filter = tracing_config.get_level_filter();
    let writer_config = tracing_config.get_writer_config();

    let mut acc: Vec<Box<DynLayer<Registry>>> = vec![Box::new(level_filter)];
    if let Some(layer) = create_display_layer(level_filter, &writer_config) {
        acc.push(layer);
    }
    if let Some(layer) = try_create_file_layer(level_filter, &writer_config)? {
        acc.push(layer);
    }
    Ok(acc)
}

/// This erases the concrete type of the writer, and returns a boxed layer.
#[must_use]
pub fn create_display_layer<S>(
    level_filter: LevelFilter,
    writer_config: &WriterConfig,
) -> Option<Box<DynLayer<S>>>
where
    S: Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    let display_pref = match writer_config {
        WriterConfig::Display(it) | WriterConfig::DisplayAndFile(it, _) => *it,
        WriterConfig::None | WriterConfig::File(_) => return None,
    };

    let fmt_layer = tracing_subscriber::fmt::layer();
    Some(match display_pref {
        DisplayPreference::Stdout => Box::new(
            fmt_layer
                .with_writer(std::io::stdout)
                .with_filter(level_filter),
        ),
        DisplayPreference::Stderr => Box::new(
            fmt_layer
                .with_writer(std::io::stderr)
                .with_filter(level_filter),
        ),
    })
}

/// This erases the concrete type of the writer, and returns a boxed layer.
///
/// # Errors
///
/// Returns an error if the log file can't be opened.
pub fn try_create_file_layer<S>(
    level_filter: LevelFilter,
    writer_config: &WriterConfig,
) -> miette::Result<Option<Box<DynLayer<S>>>>
where
    S: Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    let path = match writer_config {
        WriterConfig::File(it) | WriterConfig::DisplayAndFile(_, it) => it,
        WriterConfig::None | WriterConfig::Display(_) => return Ok(None),
    };

    let file = rolling_file_appender_impl::try_create(path)?;
    Ok(Some(Box::new(
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file)
            .with_filter(level_filter),
    )))
}
