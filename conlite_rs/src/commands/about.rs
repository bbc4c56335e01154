//! `about` - application and environment summary.

use crate::cli::{Command, CommandContext};
use crate::colors::{GREEN, LIGHT_CYAN, Style, YELLOW};
use crate::format::{Column, Formatter, format_memory};
use crate::types::ArgValue;

const LAYOUT: [Column; 2] = [Column::Percent(20.0), Column::Fluid];

pub struct AboutCommand;

impl AboutCommand {
    fn environment_rows(ctx: &mut dyn CommandContext) -> Vec<(&'static str, String)> {
        let exe_size = std::env::current_exe()
            .and_then(std::fs::metadata)
            .map(|meta| format_memory(meta.len()))
            .unwrap_or_else(|_| "n/a".to_string());
        let verbose = ctx.is_verbose();
        let out = ctx.output();
        vec![
            ("OS", std::env::consts::OS.to_string()),
            ("Architecture", std::env::consts::ARCH.to_string()),
            ("Process ID", std::process::id().to_string()),
            ("Executable size", exe_size),
            ("Terminal width", out.width().to_string()),
            ("Color support", out.painter().enabled().to_string()),
            ("Debug mode", verbose.to_string()),
        ]
    }
}

impl Command for AboutCommand {
    fn signature(&self) -> &str {
        "about"
    }

    fn description(&self) -> &str {
        "Displays information about the current project"
    }

    fn handle(&self, ctx: &mut dyn CommandContext, _args: &[ArgValue]) -> anyhow::Result<()> {
        let project = vec![
            ("Name", ctx.app_name().to_string()),
            ("Version", ctx.version().to_string()),
            ("Binary", ctx.filename().to_string()),
            ("Commands", ctx.registry().len().to_string()),
        ];
        let environment = Self::environment_rows(ctx);

        let out = ctx.output();
        let mut formatter = Formatter::new(out.width().min(100));
        formatter.set_border(" | ");
        let painter = out.painter().clone();
        let head_styles: [&[Style]; 2] = [&[Style::Bold, GREEN], &[LIGHT_CYAN]];
        let row_styles: [&[Style]; 2] = [&[YELLOW], &[]];

        out.robot("conlite at a glance");
        for (title, rows) in [("Project", &project), ("Environment", &environment)] {
            out.rule('-');
            out.write(&formatter.columns(
                &LAYOUT,
                &[title, "Description"],
                &head_styles,
                &painter,
            )?);
            out.rule('-');
            for (name, value) in rows.iter() {
                out.write(&formatter.columns(
                    &LAYOUT,
                    &[*name, value.as_str()],
                    &row_styles,
                    &painter,
                )?);
            }
        }
        out.rule('-');
        Ok(())
    }
}
