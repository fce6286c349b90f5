use clap::ValueEnum;
use ferrous_doh_domain::{Answer, ErrorKind, Outcome, ResolverResult};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `{resolver} ({latency})` followed by one line per answer.
    Text,
    /// One JSON object per resolver per line.
    Json,
}

#[derive(Serialize)]
struct JsonLine<'a> {
    resolver: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    proxy: Option<&'a str>,
    latency_ms: Option<f64>,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    answers: Option<&'a [Answer]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<&'a serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorKind>,
}

/// Writes each resolver's result as soon as it is handed over.
pub struct Presenter<W: Write> {
    format: OutputFormat,
    out: W,
}

impl<W: Write> Presenter<W> {
    pub fn new(format: OutputFormat, out: W) -> Self {
        Self { format, out }
    }

    pub fn render(&mut self, result: &ResolverResult) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => self.render_text(result)?,
            OutputFormat::Json => self.render_json(result)?,
        }
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render_text(&mut self, result: &ResolverResult) -> io::Result<()> {
        let latency = result.latency_display();
        writeln!(self.out, "{} ({})", result.resolver, latency)?;

        match &result.outcome {
            Outcome::Answers(answers) => {
                for answer in answers {
                    writeln!(self.out, "{}", answer)?;
                }
            }
            Outcome::Passthrough(payload) => writeln!(self.out, "{}", payload)?,
            Outcome::Failure(kind) => writeln!(self.out, "{}", kind)?,
        }

        Ok(())
    }

    fn render_json(&mut self, result: &ResolverResult) -> io::Result<()> {
        let (status, answers, payload, error) = match &result.outcome {
            Outcome::Answers(answers) => ("ok", Some(answers.as_slice()), None, None),
            Outcome::Passthrough(payload) => ("passthrough", None, Some(payload), None),
            Outcome::Failure(kind) => ("error", None, None, Some(*kind)),
        };

        let line = JsonLine {
            resolver: result.resolver.host(),
            proxy: result.resolver.proxy(),
            latency_ms: result.latency_ms(),
            status,
            answers,
            payload,
            error,
        };

        serde_json::to_writer(&mut self.out, &line)?;
        writeln!(self.out)
    }
}
