//! CLI output rendering.
//!
//! Every listing command funnels through [`render_list`] and every detail
//! command through [`render_single`]; the `--output` flag picks the shape.
//! `plain` exists for scripting: identifiers only, one per line.

use std::io::{self, IsTerminal, Write};

use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};

/// Whether colored output is wanted under `mode`.
///
/// `auto` honors `NO_COLOR` and turns color off when stdout is piped.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Render a list of items in the chosen format.
///
/// `to_row` shapes one item for the table; `id_fn` yields the identifier
/// `plain` prints. The structured formats serialize the items as-is.
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Table::new(rows).with(Style::rounded()).to_string()
        }
        OutputFormat::Json => json(data, false),
        OutputFormat::JsonCompact => json(data, true),
        OutputFormat::Yaml => yaml(data),
        OutputFormat::Plain => data.iter().map(&id_fn).collect::<Vec<_>>().join("\n"),
    }
}

/// Render one item in the chosen format.
///
/// Detail views don't go through `Tabled`: `detail_fn` returns the
/// pre-formatted table text instead.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: Serialize,
{
    match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => json(data, false),
        OutputFormat::JsonCompact => json(data, true),
        OutputFormat::Yaml => yaml(data),
        OutputFormat::Plain => id_fn(data),
    }
}

/// Print to stdout unless quiet mode swallows it.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

fn json<T: Serialize + ?Sized>(data: &T, compact: bool) -> String {
    let result = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    result.expect("serialization should not fail")
}

fn yaml<T: Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).expect("serialization should not fail")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Tabled)]
    struct Item {
        name: &'static str,
        count: u32,
    }

    fn items() -> Vec<Item> {
        vec![
            Item {
                name: "first",
                count: 1,
            },
            Item {
                name: "second",
                count: 2,
            },
        ]
    }

    #[test]
    fn plain_emits_one_identifier_per_line() {
        let out = render_list(
            &OutputFormat::Plain,
            &items(),
            |i| Item {
                name: i.name,
                count: i.count,
            },
            |i| i.name.to_string(),
        );
        assert_eq!(out, "first\nsecond");
    }

    #[test]
    fn compact_json_is_single_line() {
        let out = render_list(
            &OutputFormat::JsonCompact,
            &items(),
            |i| Item {
                name: i.name,
                count: i.count,
            },
            |i| i.name.to_string(),
        );
        assert!(!out.contains('\n'));
        assert!(out.starts_with("[{"));
    }

    #[test]
    fn single_table_uses_the_detail_formatter() {
        let item = Item {
            name: "only",
            count: 7,
        };
        let out = render_single(
            &OutputFormat::Table,
            &item,
            |i| format!("{} x{}", i.name, i.count),
            |i| i.name.to_string(),
        );
        assert_eq!(out, "only x7");
    }

    #[test]
    fn never_mode_disables_color() {
        assert!(!should_color(&ColorMode::Never));
        assert!(should_color(&ColorMode::Always));
    }
}
