//! Categories command - list registered extraction categories.

use serde::Serialize;

use symcat::{Category, registry};
use symcat_output::{OutputFormatter, Palette};

use super::{Context, exit_code, print_report};

/// Run the categories command
pub fn run(ctx: &Context) -> i32 {
    let list = CategoryList {
        categories: registry::categories(),
    };
    exit_code(print_report(&list, &ctx.format))
}

#[derive(Serialize)]
pub struct CategoryList {
    pub categories: Vec<Category>,
}

impl CategoryList {
    fn render_with(&self, palette: Palette) -> String {
        self.categories
            .iter()
            .map(|c| {
                let mut line = format!("{} {}", palette.name(&c.name), palette.dim(c.strategy.as_str()));
                if let Some(description) = &c.description {
                    line.push_str(&format!(" - {}", description));
                }
                for patch in &c.patches {
                    line.push_str(&palette.dim(&format!(
                        " [{}{}{}]",
                        patch.target,
                        if patch.append { "+=" } else { "=" },
                        patch.aliases.join(",")
                    )));
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for CategoryList {
    fn format_text(&self) -> String {
        self.render_with(Palette::new(false))
    }

    fn format_pretty(&self, colors: bool) -> String {
        self.render_with(Palette::new(colors))
    }
}
