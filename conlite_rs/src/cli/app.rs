//! The application: command registry plus the dispatch state machine.
//!
//! ```text
//! execute(name)
//!   ├─ empty name        -> default command
//!   ├─ unknown name      -> suggest: confirm single match / list + "not available"
//!   ├─ --help | -h       -> help screen, handler not run
//!   ├─ global flags      -> verbosity and styling state
//!   ├─ --loglevel        -> Deprecated (fatal)
//!   ├─ bind arguments    -> MissingArgument reported, handler not run
//!   └─ invoke handler    -> ConsoleError reported, anything else returned
//! ```

use super::argv::ParsedArgv;
use super::command::{Command, CommandContext, CommandDefinition};
use super::help::render_help;
use super::registry::CommandRegistry;
use super::report::{Frame, report_error};
use super::resolve::{ResolvedOptions, resolve_arguments, resolve_options};
use crate::colors::{DARK_GRAY, GREEN, Painter, YELLOW};
use crate::commands::{AboutCommand, ListCommand};
use crate::config::AppConfig;
use crate::error::{ConsoleError, RaiseExt, console_error};
use crate::output::{Output, OutputConfig, terminal_width};
use crate::prompt::{Prompter, TermPrompter, parse_confirmation};
use crate::types::{ArgValue, OptionValue};

pub struct Application {
    config: AppConfig,
    registry: CommandRegistry,
    argv: ParsedArgv,
    output: Output,
    prompter: Box<dyn Prompter>,
    /// Options of the handler currently running; empty between executions.
    options: ResolvedOptions,
}

impl Application {
    pub fn new(title: &str, version: &str) -> Self {
        Self::from_config(AppConfig::new(title, version))
    }

    /// Application reading the process argv and writing to stdout, with the
    /// builtin `list` and `about` commands registered.
    pub fn from_config(config: AppConfig) -> Self {
        let output = Output::stdout(OutputConfig {
            painter: Painter::new(config.color),
            verbose: false,
            max_width: config.max_width.unwrap_or_else(terminal_width),
        });

        let mut registry = CommandRegistry::new();
        for builtin in [
            CommandDefinition::from_command(ListCommand),
            CommandDefinition::from_command(AboutCommand),
        ] {
            if let Err(e) = registry.register(builtin) {
                tracing::warn!(error = %e, "failed to register builtin command");
            }
        }

        Self {
            config,
            registry,
            argv: ParsedArgv::from_env(),
            output,
            prompter: Box::new(TermPrompter),
            options: ResolvedOptions::default(),
        }
    }

    pub fn with_argv(mut self, argv: ParsedArgv) -> Self {
        self.argv = argv;
        self
    }

    pub fn with_output(mut self, output: Output) -> Self {
        self.output = output;
        self
    }

    pub fn with_prompter<P: Prompter + 'static>(mut self, prompter: P) -> Self {
        self.prompter = Box::new(prompter);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn output_mut(&mut self) -> &mut Output {
        &mut self.output
    }

    pub fn register(&mut self, definition: CommandDefinition) -> Result<(), ConsoleError> {
        self.registry.register(definition)
    }

    /// Register a [`Command`] implementation.
    #[track_caller]
    pub fn add<C: Command + 'static>(&mut self, command: C) -> Result<(), ConsoleError> {
        self.register(CommandDefinition::from_command(command))
    }

    /// Register an inline handler under `signature`.
    #[track_caller]
    pub fn command<F>(
        &mut self,
        signature: &str,
        description: &str,
        handler: F,
    ) -> Result<(), ConsoleError>
    where
        F: Fn(&mut dyn CommandContext, &[ArgValue]) -> anyhow::Result<()> + 'static,
    {
        self.register(CommandDefinition::inline(signature, description, handler))
    }

    /// Print the banner and execute the command named on the command line.
    pub fn run(&mut self) -> anyhow::Result<()> {
        if self.config.show_banner {
            let title = self.output.style(&self.config.title, &[GREEN]);
            let version = self.output.style(&self.config.version, &[YELLOW]);
            self.output.writeln(&format!("{} {}", title, version));
            self.output.new_line(1);
        }
        let name = self.argv.command_name.clone();
        let result = self.execute(name.as_deref());
        self.output.flush();
        result
    }

    /// Dispatch one command.
    ///
    /// `ConsoleError`s raised while suggesting, binding or running the handler
    /// are reported and swallowed; any other error, and the deprecated
    /// `--loglevel`, is returned.
    pub fn execute(&mut self, name: Option<&str>) -> anyhow::Result<()> {
        let name = match name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.config.default_command.clone(),
        };
        tracing::debug!(command = %name, "resolving command");

        let definition = match self.registry.lookup(&name) {
            Ok(definition) => definition.clone(),
            Err(ConsoleError::CommandNotFound(_)) => return self.suggest(&name),
            Err(e) => return Err(e.into()),
        };

        if self.argv.has_long("help") || self.argv.has_alias('h') {
            tracing::debug!(command = %name, "showing help");
            render_help(&mut self.output, &definition, &self.config.title);
            return Ok(());
        }

        self.apply_global_flags();

        if self.argv.has_long("loglevel") {
            return Err(ConsoleError::deprecated("--loglevel", "--debug or -v").into());
        }

        let bound = match resolve_arguments(&definition.arguments, &self.argv) {
            Ok(bound) => bound,
            Err(ConsoleError::MissingArgument(arg)) => {
                tracing::debug!(command = %name, argument = %arg, "missing argument");
                self.output
                    .error_block(&ConsoleError::MissingArgument(arg).to_string());
                return Ok(());
            }
            Err(e) => {
                report_error(&mut self.output, &anyhow::Error::from(e), None);
                return Ok(());
            }
        };
        let args = bound.into_positional();
        tracing::debug!(command = %name, arguments = args.len(), "invoking handler");
        self.options = resolve_options(&definition.options, &self.argv);
        let result = definition.handler.invoke(self, &args);
        self.options = ResolvedOptions::default();

        match result {
            Ok(()) => Ok(()),
            Err(err) => {
                let frame = Frame::new(&name, &args).at(definition.site);
                self.recover(err, Some(&frame))
            }
        }
    }

    /// Report a `ConsoleError` and carry on; anything else is returned.
    fn recover(&mut self, err: anyhow::Error, frame: Option<&Frame>) -> anyhow::Result<()> {
        if console_error(&err).is_none() {
            return Err(err);
        }
        tracing::debug!(error = %err, "reporting console error");
        report_error(&mut self.output, &err, frame);
        Ok(())
    }

    /// Unknown command: offer the single close match, else list what exists.
    fn suggest(&mut self, keyword: &str) -> anyhow::Result<()> {
        let matches: Vec<String> = self
            .registry
            .find_like(keyword)
            .iter()
            .map(|def| def.name.clone())
            .collect();
        tracing::debug!(keyword, matches = matches.len(), "command not found");

        if let [only] = matches.as_slice() {
            self.output.new_line(1);
            let question = format!(
                " Command '{}' is not available. Did you mean '{}'?",
                keyword, only
            );
            let confirmed = match self.confirm(&question, false) {
                Ok(confirmed) => confirmed,
                Err(err) => return self.recover(err, None),
            };
            if confirmed {
                return self.execute(Some(only));
            }
            return self.show_list(Some(keyword));
        }

        let filter = (!matches.is_empty()).then_some(keyword);
        self.show_list(filter)?;
        self.output
            .error_block(&format!(" Command '{}' is not available.", keyword));

        if matches.is_empty()
            && let Some(close) = self.registry.closest(keyword).map(str::to_string)
        {
            self.output.notice(&format!(" Did you mean '{}'?", close));
        }
        Ok(())
    }

    /// Run the `list` handler with an optional keyword filter.
    fn show_list(&mut self, keyword: Option<&str>) -> anyhow::Result<()> {
        let Ok(list) = self.registry.lookup("list") else {
            return Ok(());
        };
        let handler = list.handler.clone();
        let args = [keyword.map_or(ArgValue::Null, |kw| ArgValue::Single(kw.to_string()))];
        let frame = Frame::new("list", &args).at(list.site);
        match handler.invoke(self, &args) {
            Ok(()) => Ok(()),
            Err(err) => self.recover(err, Some(&frame)),
        }
    }

    fn apply_global_flags(&mut self) {
        let argv = &self.argv;
        let verbose = argv.has_long("debug") || argv.has_alias('v');
        let force = argv.has_long("ansi");
        let disable = argv.has_long("no-ansi") || argv.has_long("no-color") || argv.has_alias('n');
        let enable = argv.has_long("color") || argv.has_alias('c');

        let config = self.output.config_mut();
        if verbose {
            config.verbose = true;
        }
        if force {
            config.painter.set_forced(true);
            config.painter.enable();
        }
        if disable {
            config.painter.disable();
        } else if enable {
            config.painter.enable();
        }
        tracing::debug!(
            verbose = config.verbose,
            styled = config.painter.enabled(),
            "applied global flags"
        );
    }
}

impl CommandContext for Application {
    fn output(&mut self) -> &mut Output {
        &mut self.output
    }

    fn has_option(&self, name: &str) -> bool {
        self.options.is_set(name)
    }

    fn option(&self, name: &str) -> Option<&OptionValue> {
        self.options.get(name)
    }

    fn argv(&self) -> &ParsedArgv {
        &self.argv
    }

    fn confirm(&mut self, question: &str, default: bool) -> anyhow::Result<bool> {
        let suffix = if default {
            format!(
                "{}{}{}",
                self.output.style("[", &[DARK_GRAY]),
                self.output.style("Y", &[GREEN]),
                self.output.style("/n]", &[DARK_GRAY])
            )
        } else {
            format!(
                "{}{}{}",
                self.output.style("[y/", &[DARK_GRAY]),
                self.output.style("N", &[GREEN]),
                self.output.style("]", &[DARK_GRAY])
            )
        };

        loop {
            self.output.write(&format!("{} {} ", question, suffix));
            self.output.flush();
            let Some(answer) = self.prompter.read_line().raised()? else {
                self.output.new_line(1);
                return Ok(default);
            };
            match parse_confirmation(&answer, default) {
                Some(choice) => return Ok(choice),
                None => self.output.error_block("Please type: (y/n) or (yes/no)"),
            }
        }
    }

    fn ask(&mut self, question: &str, default: Option<&str>) -> anyhow::Result<String> {
        match default {
            Some(default) => {
                let hint = self.output.style(&format!("[{}]", default), &[DARK_GRAY]);
                self.output.write(&format!("{} {} ", question, hint));
            }
            None => self.output.write(&format!("{} ", question)),
        }
        self.output.flush();

        let answer = self.prompter.read_line().raised()?.unwrap_or_default();
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(default.unwrap_or_default().to_string());
        }
        Ok(answer.to_string())
    }

    fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    fn app_name(&self) -> &str {
        &self.config.title
    }

    fn version(&self) -> &str {
        &self.config.version
    }

    fn is_verbose(&self) -> bool {
        self.output.is_verbose()
    }
}
