//! `list` - numbered overview of registered commands.

use crate::cli::{Command, CommandContext};
use crate::colors::{BG_MAGENTA, DARK_GRAY, GREEN, PURPLE, Style, WHITE};
use crate::config::DEFAULT_TITLE;
use crate::format::text_width;
use crate::types::ArgValue;

/// Global flags every command understands, as shown in the overview.
const DEFAULT_OPTIONS: &[(&str, &str)] = &[
    ("-h, --help", "Displays help and usage info for a command"),
    ("-v, --debug", "Displays the hidden debug messages"),
    ("--ansi", "Forces color to display on terminal"),
    ("-n, --no-ansi", "Removes colors from the output on terminal"),
    ("-c, --color", "Enables color output on terminal"),
];

pub struct ListCommand;

impl Command for ListCommand {
    fn signature(&self) -> &str {
        "list {keyword?::Filter commands containing this keyword}"
    }

    fn description(&self) -> &str {
        "Show available commands"
    }

    fn handle(&self, ctx: &mut dyn CommandContext, args: &[ArgValue]) -> anyhow::Result<()> {
        let keyword = args.first().and_then(ArgValue::as_str).map(str::to_string);

        let commands: Vec<(String, Option<String>, String)> = {
            let registry = ctx.registry();
            let defs: Vec<_> = match &keyword {
                Some(keyword) => registry.find_like(keyword),
                None => registry.all().collect(),
            };
            defs.into_iter()
                .map(|def| {
                    (
                        def.name.clone(),
                        def.namespace().map(str::to_string),
                        def.description.clone(),
                    )
                })
                .collect()
        };
        let filename = ctx.filename().to_string();
        let default_title = ctx.app_name() == DEFAULT_TITLE;
        let verbose = ctx.is_verbose();
        let out = ctx.output();

        match &keyword {
            Some(keyword) => {
                let header = format!("Here are commands like '{}':", keyword);
                if out.painter().enabled() {
                    out.block(&header, &[BG_MAGENTA, WHITE, Style::Bold]);
                } else {
                    out.writeln(&header);
                    out.new_line(1);
                }
            }
            None => {
                if default_title {
                    out.robot(&format!(
                        "conlite is running in a {} environment",
                        std::env::consts::OS
                    ));
                }
                out.writeln_styled("Usage:", &[PURPLE]);
                out.new_line(1);
                out.writeln(&format!(" {} [options] [arguments]", filename));
                out.new_line(1);

                out.writeln_styled("Default Options:", &[PURPLE]);
                out.new_line(1);
                let rows: Vec<(String, String)> = DEFAULT_OPTIONS
                    .iter()
                    .map(|(name, desc)| (name.to_string(), desc.to_string()))
                    .collect();
                out.help_block(&rows);

                out.writeln_styled("Available Commands:", &[PURPLE]);
                out.new_line(1);
            }
        }

        let pad = commands
            .iter()
            .map(|(name, _, _)| text_width(name))
            .max()
            .unwrap_or(0)
            + 3;

        let mut current_ns: Option<&str> = None;
        for (i, (name, namespace, description)) in commands.iter().enumerate() {
            if let Some(ns) = namespace.as_deref()
                && current_ns != Some(ns)
            {
                out.writeln(&format!(" {}", ns));
            }
            current_ns = namespace.as_deref();

            let no = format!("{}) ", i + 1);
            out.write(&" ".repeat(4usize.saturating_sub(no.len())));
            out.write_styled(&no, &[DARK_GRAY]);
            out.write_styled(name, &[GREEN]);
            out.write(&" ".repeat(pad - text_width(name)));
            out.write_short(description);
        }

        if verbose {
            if out.painter().enabled() {
                out.error_block("You are in Debug mode");
            } else {
                out.debug("You are in Debug mode");
            }
        }
        Ok(())
    }
}
