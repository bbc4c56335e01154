use std::any::Any;
use std::panic;
use std::path::{Path, PathBuf};
use std::time::Instant;

use conlite::progress::{Countdown, Spinner, format_count, format_duration};
use conlite::error::{RaiseExt, Raised};
use conlite::{AppConfig, Application, ArgValue, CommandContext, ConsoleError};

fn install_broken_pipe_handler() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let payload = info.payload();
        let is_broken = <dyn Any>::downcast_ref::<&str>(payload)
            .is_some_and(|s| s.contains("Broken pipe"))
            || <dyn Any>::downcast_ref::<String>(payload)
                .is_some_and(|s| s.contains("Broken pipe"));

        if is_broken {
            // Quietly exit when downstream closes the pipe (e.g. piping to `head`).
            std::process::exit(0);
        }

        default_hook(info);
    }));
}

fn init_logging() {
    // Diagnostics go to stderr; stdout belongs to command output.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("CONLITE_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
}

fn load_config() -> AppConfig {
    let path = std::env::var_os("CONLITE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("conlite.toml"));
    let mut config = AppConfig::load_from_path(&path);
    if config.title == conlite::config::DEFAULT_TITLE {
        config.title = "conlite".to_string();
    }
    config.apply_env()
}

fn greet(ctx: &mut dyn CommandContext, args: &[ArgValue]) -> anyhow::Result<()> {
    let name = args[0].as_str().unwrap_or("World");
    ctx.output().success(&format!("Hello, {}!", name));
    Ok(())
}

fn copy(ctx: &mut dyn CommandContext, args: &[ArgValue]) -> anyhow::Result<()> {
    let Some(source) = args[0].as_str() else {
        return Ok(());
    };
    let dest = match args[1].as_str() {
        Some(dest) => PathBuf::from(dest),
        None => PathBuf::from(format!("{}.copy", source)),
    };
    let force = ctx.has_option("force");

    if dest.exists() && !force {
        ctx.output().warning(&format!(
            "{} already exists, pass --force to overwrite",
            dest.display()
        ));
        return Ok(());
    }

    let bytes = std::fs::copy(source, &dest).raised()?;
    ctx.output()
        .success(&format!("Copied {} -> {} ({} bytes)", source, dest.display(), bytes));
    Ok(())
}

fn wait(ctx: &mut dyn CommandContext, args: &[ArgValue]) -> anyhow::Result<()> {
    let raw = args[0].as_str().unwrap_or("3");
    let Ok(seconds) = raw.parse::<u64>() else {
        ctx.output()
            .error_block(&format!("'{}' is not a number of seconds", raw));
        return Ok(());
    };

    ctx.output().notice(&format!(
        "Waiting {}",
        conlite::format::format_time(seconds)
    ));
    ctx.output().flush();
    let started = Instant::now();
    Countdown::new(seconds).run();
    ctx.output()
        .success(&format!("Done in {}", format_duration(started.elapsed())));
    Ok(())
}

fn make_stub(ctx: &mut dyn CommandContext, args: &[ArgValue]) -> anyhow::Result<()> {
    let names = args[0].as_list().to_vec();
    let dir = PathBuf::from(ctx.option_str("dir").unwrap_or("stubs"));
    std::fs::create_dir_all(&dir).raised()?;

    let spinner = Spinner::new("Writing stubs");
    let mut written = Vec::with_capacity(names.len());
    for name in &names {
        spinner.set_message(&format!("Writing {}", name));
        written.push(write_stub(&dir, name)?);
    }
    spinner.finish_clear();

    let total = written.len() as u64;
    for (i, path) in written.iter().enumerate() {
        ctx.output()
            .show_progress(i as u64 + 1, total, &path.display().to_string());
    }
    ctx.output().success(&format!(
        "Created {}",
        format_count(written.len(), "stub", "stubs")
    ));
    Ok(())
}

fn write_stub(dir: &Path, name: &str) -> Result<PathBuf, Raised> {
    let path = dir.join(format!("{}.stub", name));
    std::fs::write(&path, format!("// {}\n", name)).raised()?;
    Ok(path)
}

fn build_app(config: AppConfig) -> Result<Application, ConsoleError> {
    let mut app = Application::from_config(config);
    app.command(
        "greet {name=World::Who to greet}",
        "Print a greeting",
        greet,
    )?;
    app.command(
        "copy {source::File to copy} {dest?::Target path, defaults to <source>.copy} {--f|force::Overwrite an existing target}",
        "Copy a file",
        copy,
    )?;
    app.command(
        "wait {seconds=3::How long to wait}",
        "Count down a number of seconds",
        wait,
    )?;
    app.command(
        "make:stub {names*::Stub names} {--d|dir=stubs::Target directory}",
        "Write one stub file per name",
        make_stub,
    )?;
    Ok(app)
}

fn main() {
    install_broken_pipe_handler();
    init_logging();

    let result = build_app(load_config())
        .map_err(anyhow::Error::from)
        .and_then(|mut app| app.run());

    if let Err(err) = result {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}
