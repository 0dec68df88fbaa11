//! Extract command - build a catalog from a namespace descriptor.

use anyhow::Context as _;
use clap::{ArgGroup, Args};
use serde::Serialize;
use std::path::PathBuf;

use symcat::{AliasPatch, Catalog, Category, SymbolRecord, load_module, registry};
use symcat_output::{OutputFormat, OutputFormatter, Palette};

use super::{Context, exit_code, print_report};

/// Extract command arguments
#[derive(Args)]
#[command(group(ArgGroup::new("pass").required(true).args(["category", "functions", "classes"])))]
pub struct ExtractArgs {
    /// Namespace descriptor (.json, .yaml or .yml)
    pub descriptor: PathBuf,

    /// Registered category to run (see `symcat categories`)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Extract functions only
    #[arg(long)]
    pub functions: bool,

    /// Extract classes only, with aliases
    #[arg(long)]
    pub classes: bool,

    /// Report return annotations of each class's invocation member
    #[arg(long)]
    pub call_annotations: bool,

    /// Alias patch applied after extraction: TARGET=a,b (replace) or TARGET+=a (append)
    #[arg(long = "patch", value_name = "TARGET=ALIASES")]
    pub patches: Vec<String>,

    /// Write the records array as pretty JSON to a file instead of stdout.
    /// Output format flags (--jq, --jsonl, --compact, ...) do not apply.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Run the extract command
pub fn run(args: ExtractArgs, ctx: &Context) -> i32 {
    exit_code(extract(args, ctx))
}

fn resolve_category(args: &ExtractArgs) -> anyhow::Result<Category> {
    let mut category = match &args.category {
        Some(name) => registry::require_category(name).map_err(|e| {
            anyhow::anyhow!("{} (available: {})", e, registry::category_names().join(", "))
        })?,
        None if args.functions => Category::functions("functions"),
        None => Category::classes("classes"),
    };

    category.call_annotations |= args.call_annotations;
    for spec in &args.patches {
        let patch = AliasPatch::parse(spec)
            .with_context(|| format!("invalid patch `{}` (expected TARGET=a,b)", spec))?;
        category.patches.push(patch);
    }
    Ok(category)
}

fn extract(args: ExtractArgs, ctx: &Context) -> anyhow::Result<()> {
    let category = resolve_category(&args)?;
    let module = load_module(&args.descriptor)
        .with_context(|| format!("failed to load {}", args.descriptor.display()))?;

    let catalog = category
        .extract(&ctx.extractor(), &module)
        .with_context(|| format!("extracting `{}`", category.name))?;

    if let Some(path) = &args.output {
        if let OutputFormat::Jq { filter, .. } = &ctx.format {
            tracing::warn!(filter = %filter, "--jq is ignored when writing with -o");
        }
        let json = serde_json::to_string_pretty(&catalog.records)?;
        std::fs::write(path, json + "\n")
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("Wrote {} records to {}", catalog.len(), path.display());
        return Ok(());
    }

    print_report(&CatalogReport(catalog), &ctx.format)
}

/// A catalog as printed by the CLI.
#[derive(Serialize)]
#[serde(transparent)]
pub struct CatalogReport(pub Catalog);

impl CatalogReport {
    fn render_with(&self, palette: Palette) -> String {
        let catalog = &self.0;
        let mut lines = Vec::with_capacity(catalog.len() + 1);

        let version = catalog
            .version
            .as_deref()
            .map(|v| format!(" {}", v))
            .unwrap_or_default();
        lines.push(format!(
            "{}{} {}",
            palette.heading(&catalog.namespace),
            version,
            palette.dim(&format!("[{}] {} records", catalog.category, catalog.len()))
        ));

        for record in &catalog.records {
            lines.push(match record {
                SymbolRecord::Function(f) => format!(
                    "{} {}({})",
                    palette.keyword("fn"),
                    palette.name(&f.name),
                    join_params(&f.arguments)
                ),
                SymbolRecord::Class(c) => {
                    let mut line = format!(
                        "{} {}",
                        palette.keyword(if c.is_abstract { "abstract class" } else { "class" }),
                        palette.name(&c.name)
                    );
                    if let Some(args) = &c.arguments {
                        line.push_str(&format!("({})", join_params(args)));
                    }
                    line.push_str(&palette.dim(&format!(" : {}", c.base)));
                    if let Some(inputs) = &c.inputs {
                        line.push_str(&format!(" call({})", join_params(inputs)));
                    }
                    if let Some(outputs) = c.outputs.as_ref().filter(|o| !o.is_empty()) {
                        line.push_str(&format!(" -> {}", outputs.join(", ")));
                    }
                    if let Some(aliases) = &c.aliases {
                        line.push_str(&palette.dim(&format!(" aka {}", aliases.join(", "))));
                    }
                    line
                }
            });
        }
        lines.join("\n")
    }
}

fn join_params(params: &[symcat::Parameter]) -> String {
    params
        .iter()
        .map(symcat::Parameter::format_summary)
        .collect::<Vec<_>>()
        .join(", ")
}

impl OutputFormatter for CatalogReport {
    fn format_text(&self) -> String {
        self.render_with(Palette::new(false))
    }

    fn format_pretty(&self, colors: bool) -> String {
        self.render_with(Palette::new(colors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symcat::{ClassRecord, ParamDefault, Parameter};

    fn report() -> CatalogReport {
        CatalogReport(Catalog {
            namespace: "keras.regularizers".into(),
            version: Some("2.4.0".into()),
            category: "regularizers".into(),
            records: vec![SymbolRecord::Class(ClassRecord {
                name: "L1L2".into(),
                base: "Regularizer".into(),
                docstring: None,
                arguments: Some(vec![
                    Parameter::required("self"),
                    Parameter::new("l1", ParamDefault::Literal(serde_json::json!(0.0))),
                ]),
                is_abstract: false,
                outputs: None,
                inputs: None,
                file: "keras/regularizers.py".into(),
                aliases: Some(vec!["l1l2".into()]),
            })],
        })
    }

    #[test]
    fn compact_text() {
        assert_eq!(
            report().format_text(),
            "keras.regularizers 2.4.0 [regularizers] 1 records\n\
             class L1L2(self, l1=0.0) : Regularizer aka l1l2"
        );
    }

    #[test]
    fn json_is_the_catalog() {
        let json = serde_json::to_value(report()).unwrap();
        assert_eq!(json["category"], "regularizers");
        assert_eq!(json["records"][0]["abstract"], false);
        assert_eq!(json["records"][0]["aliases"][0], "l1l2");
    }

    fn args(category: Option<&str>, functions: bool, patches: &[&str]) -> ExtractArgs {
        ExtractArgs {
            descriptor: PathBuf::from("unused.json"),
            category: category.map(str::to_string),
            functions,
            classes: false,
            call_annotations: false,
            patches: patches.iter().map(|p| p.to_string()).collect(),
            output: None,
        }
    }

    #[test]
    fn category_resolution() {
        let category = resolve_category(&args(Some("regularizers"), false, &["Dense+=dense"])).unwrap();
        assert_eq!(category.patches.len(), 2);
        assert!(category.patches[1].append);

        let category = resolve_category(&args(None, true, &[])).unwrap();
        assert_eq!(category.strategy, symcat::Strategy::Functions);

        assert!(resolve_category(&args(Some("nope"), false, &[])).is_err());
        assert!(resolve_category(&args(None, false, &["bogus"])).is_err());
    }
}
