use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use pick_engine::pick_core::settings::settings;
use pick_engine::{
    EngineMode, Form, HttpSuggestionClient, SelectionEngine, StaticSuggestionClient,
    SuggestionClient, Suggestions,
};

use super::render::{format_bulk, format_suggestions, SuggestionReport};
use super::CliError;

pub struct SuggestOptions {
    pub field: String,
    pub mode: EngineMode,
    /// Overrides `remote.endpoint`.
    pub endpoint: Option<String>,
    /// Comma-separated labels served from memory instead of HTTP.
    pub offline: Option<String>,
    /// Type every term before waiting, so only the last reply can surface.
    pub burst: bool,
    pub json: bool,
    pub wait_ms: u64,
}

fn build_client(opts: &SuggestOptions) -> Arc<dyn SuggestionClient> {
    let remote = &settings().remote;
    if let Some(labels) = &opts.offline {
        return Arc::new(StaticSuggestionClient::from_labels(
            labels.split(','),
            remote.max_results,
        ));
    }
    match &opts.endpoint {
        Some(endpoint) => Arc::new(HttpSuggestionClient::new(
            endpoint.clone(),
            remote.timeout_ms.map(Duration::from_millis),
            remote.max_results,
        )),
        None => Arc::new(HttpSuggestionClient::from_settings(remote)),
    }
}

fn emit(out: &mut impl Write, opts: &SuggestOptions, s: &Suggestions) -> Result<(), CliError> {
    if opts.json {
        serde_json::to_writer(&mut *out, &SuggestionReport::new(&opts.field, s))?;
        writeln!(out)?;
    } else {
        write!(out, "{}", format_suggestions(s))?;
    }
    Ok(())
}

/// Type each term into one field, in order, printing what the UI would show.
pub fn suggest_cmd(
    out: &mut impl Write,
    opts: &SuggestOptions,
    terms: &[String],
) -> Result<(), CliError> {
    let mut form = Form::new(build_client(opts));
    form.add_field(SelectionEngine::new(opts.field.clone(), opts.mode))?;
    let wait = Duration::from_millis(opts.wait_ms);

    let mut awaiting: Option<&str> = None;
    for term in terms {
        let resp = form.input(&opts.field, term)?;
        if let Some(report) = &resp.bulk {
            eprintln!("{}", format_bulk(report));
        }
        if let Some(shown) = resp.shown() {
            emit(out, opts, shown)?;
            awaiting = None;
            continue;
        }
        awaiting = Some(term.as_str());
        if !opts.burst {
            receive(out, &mut form, opts, term, wait)?;
            awaiting = None;
        }
    }
    if let Some(term) = awaiting {
        receive(out, &mut form, opts, term, wait)?;
    }
    Ok(())
}

fn receive(
    out: &mut impl Write,
    form: &mut Form,
    opts: &SuggestOptions,
    term: &str,
    wait: Duration,
) -> Result<(), CliError> {
    let fresh = form.wait(wait).ok_or_else(|| CliError::NoReply {
        term: term.to_string(),
        timeout_ms: opts.wait_ms,
    })?;
    emit(out, opts, &fresh.suggestions)
}
