//! Output formatting for symcat commands.
//!
//! Every command result implements [`OutputFormatter`] and is printed as
//! compact text, pretty text, JSON, JSON Lines or jq-filtered JSON.

use serde::{Deserialize, Serialize};
use std::io::IsTerminal;

/// Color output mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Auto-detect based on TTY (default)
    #[default]
    Auto,
    Always,
    Never,
}

/// Default output format when no flag is given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultFormat {
    /// Pretty on a TTY, compact otherwise.
    #[default]
    Auto,
    Compact,
    Pretty,
    Json,
    Jsonl,
}

/// The `[output]` config section.
///
/// ```toml
/// [output]
/// format = "json"     # "auto", "compact", "pretty", "json", "jsonl"
/// colors = "never"    # "auto", "always", "never"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: Option<DefaultFormat>,
    pub colors: Option<ColorMode>,
}

impl OutputConfig {
    /// Field-wise merge; `other` wins where set.
    pub fn merge(self, other: Self) -> Self {
        Self {
            format: other.format.or(self.format),
            colors: other.colors.or(self.colors),
        }
    }

    /// Should colors be used? Respects `NO_COLOR`.
    pub fn use_colors(&self) -> bool {
        if std::env::var("NO_COLOR").is_ok() {
            return false;
        }
        match self.colors.unwrap_or_default() {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }
}

/// CLI flags selecting an output format.
#[derive(Debug, Clone, Default)]
pub struct FormatFlags<'a> {
    pub json: bool,
    pub jsonl: bool,
    pub jq: Option<&'a str>,
    pub pretty: bool,
    pub compact: bool,
}

/// Output format and display mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Compact text output, no colors.
    #[default]
    Compact,
    /// Pretty text output, with colors if available.
    Pretty { colors: bool },
    Json,
    /// JSON Lines output (arrays emit each element on its own line).
    JsonLines,
    /// JSON filtered through a jq expression.
    Jq { filter: String, jsonl: bool },
}

impl OutputFormat {
    /// Resolve from CLI flags, falling back to config.
    pub fn from_cli(flags: &FormatFlags<'_>, config: &OutputConfig) -> Self {
        if let Some(filter) = flags.jq {
            return OutputFormat::Jq {
                filter: filter.to_string(),
                jsonl: flags.jsonl,
            };
        }
        if flags.jsonl {
            return OutputFormat::JsonLines;
        }
        if flags.json {
            return OutputFormat::Json;
        }
        if flags.compact {
            return OutputFormat::Compact;
        }
        if flags.pretty {
            // --pretty forces colors unless explicitly disabled
            let colors = std::env::var("NO_COLOR").is_err()
                && config.colors.unwrap_or_default() != ColorMode::Never;
            return OutputFormat::Pretty { colors };
        }

        match config.format.unwrap_or_default() {
            DefaultFormat::Json => OutputFormat::Json,
            DefaultFormat::Jsonl => OutputFormat::JsonLines,
            DefaultFormat::Compact => OutputFormat::Compact,
            DefaultFormat::Pretty => OutputFormat::Pretty {
                colors: config.use_colors(),
            },
            DefaultFormat::Auto if std::io::stdout().is_terminal() => OutputFormat::Pretty {
                colors: config.use_colors(),
            },
            DefaultFormat::Auto => OutputFormat::Compact,
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(
            self,
            OutputFormat::Json | OutputFormat::JsonLines | OutputFormat::Jq { .. }
        )
    }

    pub fn use_colors(&self) -> bool {
        matches!(self, OutputFormat::Pretty { colors: true })
    }
}

/// Types that can be printed in every output format.
///
/// JSON goes through serde; text formatting is up to the implementor.
pub trait OutputFormatter: Serialize {
    /// Minimal text (default).
    fn format_text(&self) -> String;

    /// Human-friendly text. `colors` enables ANSI styling.
    fn format_pretty(&self, colors: bool) -> String {
        let _ = colors;
        self.format_text()
    }

    /// Render in the given format. jq failures surface as errors.
    fn render(&self, format: &OutputFormat) -> Result<String, String> {
        let out = match format {
            OutputFormat::Compact => self.format_text(),
            OutputFormat::Pretty { colors } => self.format_pretty(*colors),
            OutputFormat::Json => serde_json::to_string(self).map_err(|e| e.to_string())?,
            OutputFormat::JsonLines => {
                let json = serde_json::to_value(self).map_err(|e| e.to_string())?;
                json_lines(&json).join("\n")
            }
            OutputFormat::Jq { filter, jsonl } => {
                let json = serde_json::to_value(self).map_err(|e| e.to_string())?;
                let results = apply_jq(&json, filter)?;
                if *jsonl {
                    results
                        .iter()
                        .flat_map(|line| match serde_json::from_str::<serde_json::Value>(line) {
                            Ok(val) => json_lines(&val),
                            Err(_) => vec![line.clone()],
                        })
                        .collect::<Vec<_>>()
                        .join("\n")
                } else {
                    results.join("\n")
                }
            }
        };
        Ok(out)
    }

    /// Print to stdout in the given format. Nothing is printed if
    /// rendering fails.
    fn print(&self, format: &OutputFormat) -> Result<(), String> {
        let out = self.render(format)?;
        if !out.is_empty() {
            println!("{}", out);
        }
        Ok(())
    }
}

/// One compact JSON document per line; arrays emit each element.
pub fn json_lines(value: &serde_json::Value) -> Vec<String> {
    match value {
        serde_json::Value::Array(arr) => arr
            .iter()
            .map(|item| serde_json::to_string(item).unwrap_or_default())
            .collect(),
        other => vec![serde_json::to_string(other).unwrap_or_default()],
    }
}

/// Apply a jq filter to a JSON value.
pub fn apply_jq(value: &serde_json::Value, filter: &str) -> Result<Vec<String>, String> {
    use jaq_core::load::{Arena, File as JaqFile, Loader};
    use jaq_core::{Compiler, Ctx, RcIter};
    use jaq_json::Val;

    let loader = Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let arena = Arena::default();
    let program = JaqFile {
        code: filter,
        path: (),
    };

    let modules = loader
        .load(&arena, program)
        .map_err(|errs| format!("jq parse error: {:?}", errs))?;
    let compiled = Compiler::default()
        .with_funs(jaq_std::funs().chain(jaq_json::funs()))
        .compile(modules)
        .map_err(|errs| format!("jq compile error: {:?}", errs))?;

    let inputs = RcIter::new(core::iter::empty());
    let out = compiled.run((Ctx::new([], &inputs), Val::from(value.clone())));

    let mut results = Vec::new();
    for result in out {
        match result {
            Ok(v) => results.push(v.to_string()),
            Err(e) => return Err(format!("jq runtime error: {:?}", e)),
        }
    }
    Ok(results)
}

/// ANSI styling that degrades to plain text when colors are off.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    colors: bool,
}

impl Palette {
    pub fn new(colors: bool) -> Self {
        Self { colors }
    }

    fn paint(&self, style: nu_ansi_term::Style, text: &str) -> String {
        if self.colors {
            style.paint(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// Section headings.
    pub fn heading(&self, text: &str) -> String {
        self.paint(nu_ansi_term::Style::new().bold(), text)
    }

    /// Symbol names.
    pub fn name(&self, text: &str) -> String {
        self.paint(nu_ansi_term::Color::Cyan.bold(), text)
    }

    /// Kinds and markers such as `class` or `abstract`.
    pub fn keyword(&self, text: &str) -> String {
        self.paint(nu_ansi_term::Color::Magenta.normal(), text)
    }

    /// Secondary information.
    pub fn dim(&self, text: &str) -> String {
        self.paint(nu_ansi_term::Style::new().dimmed(), text)
    }
}
