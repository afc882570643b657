use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use vfs_shell::{Flow, MemFS, Shell, ShellConfig, init_logging};

/// Interactive shell over an in-memory file system
#[derive(Parser)]
#[command(name = "vfs-shell")]
#[command(about = "Interactive shell over an in-memory file system")]
struct Cli {
    /// Scripts to run in order; standard input is read when none are given
    scripts: Vec<PathBuf>,

    /// Initial prompt (a space is appended)
    #[arg(long)]
    prompt: Option<String>,

    /// Echo every input line after the prompt
    #[arg(long, default_value = "false")]
    echo: bool,

    /// Log filter, e.g. `debug` or `vfs_shell=trace` (overrides VFS_SHELL_LOG)
    #[arg(short, long)]
    debug: Option<String>,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.debug.as_deref())?;

    let config = ShellConfig::default()
        .with_prompt(cli.prompt)
        .with_echo(cli.echo);
    let mut shell = Shell::new(MemFS::new(), config);

    let mut out = io::stdout().lock();
    let mut err = io::stderr().lock();
    if cli.scripts.is_empty() {
        let stdin = io::stdin();
        let interactive = stdin.is_terminal();
        shell.run(stdin.lock(), &mut out, &mut err, interactive)?;
    } else {
        for script in &cli.scripts {
            info!(script = %script.display(), "running script");
            if let Flow::Exit(status) = shell.run_script(script, &mut out, &mut err)? {
                info!(status, "exit requested, remaining scripts skipped");
                break;
            }
        }
    }
    let status = shell.status();
    Ok(ExitCode::from(u8::try_from(status).unwrap_or(1)))
}
