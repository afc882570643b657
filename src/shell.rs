//! Command layer: turns input lines into `FsBackend` calls and prints the results.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, anyhow, bail};
use tracing::{debug, warn};

use crate::FsError;
use crate::ShellConfig;
use crate::core::FsBackend;

/// Commands understood by the shell.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Cat,
    Cd,
    Echo,
    Exit,
    Ls,
    Lsr,
    Make,
    Mkdir,
    Prompt,
    Pwd,
    Rm,
    Rmr,
    Comment,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(verb: &str) -> anyhow::Result<Self> {
        let command = match verb {
            "cat" => Command::Cat,
            "cd" => Command::Cd,
            "echo" => Command::Echo,
            "exit" => Command::Exit,
            "ls" => Command::Ls,
            "lsr" => Command::Lsr,
            "make" => Command::Make,
            "mkdir" => Command::Mkdir,
            "prompt" => Command::Prompt,
            "pwd" => Command::Pwd,
            "rm" => Command::Rm,
            "rmr" => Command::Rmr,
            _ if verb.starts_with('#') => Command::Comment,
            _ => return Err(anyhow!("{verb}: no such function")),
        };
        Ok(command)
    }
}

/// What the caller should do after a line ran.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit(i32),
}

/// A shell session over a file system backend.
pub struct Shell<B: FsBackend> {
    fs: B,
    config: ShellConfig,
    status: i32,
}

impl<B: FsBackend> Shell<B> {
    pub fn new(mut fs: B, config: ShellConfig) -> Self {
        fs.set_prompt(&config.prompt);
        Self {
            fs,
            config,
            status: 0,
        }
    }

    pub fn fs(&self) -> &B {
        &self.fs
    }

    pub fn fs_mut(&mut self) -> &mut B {
        &mut self.fs
    }

    /// Exit status so far: 1 once any command has failed, 0 otherwise.
    pub fn status(&self) -> i32 {
        self.status
    }

    pub fn prompt(&self) -> &str {
        self.fs.prompt()
    }

    /// Runs a single line. Blank lines and comments do nothing.
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> anyhow::Result<Flow> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((verb, args)) = words.split_first() else {
            return Ok(Flow::Continue);
        };
        let command: Command = verb.parse()?;
        debug!(?command, args = args.len(), "executing");
        self.dispatch(command, args, out).with_context(|| verb.to_string())
    }

    fn dispatch<W: Write>(
        &mut self,
        command: Command,
        args: &[&str],
        out: &mut W,
    ) -> anyhow::Result<Flow> {
        match command {
            Command::Cat => {
                if args.is_empty() {
                    bail!("missing file operand");
                }
                let words = self.fs.cat(args)?;
                writeln!(out, "{}", words.join(" "))?;
            }
            Command::Cd => {
                if args.len() > 1 {
                    bail!("too many arguments");
                }
                self.fs.cd(args.first().copied())?;
            }
            Command::Echo => writeln!(out, "{}", args.join(" "))?,
            Command::Exit => {
                let status = match args.first() {
                    Some(code) => code
                        .parse::<i32>()
                        .with_context(|| format!("{code}: invalid exit status"))?,
                    None => self.status,
                };
                return Ok(Flow::Exit(status));
            }
            Command::Ls => match args {
                ["-R", rest @ ..] => self.list_recursive(rest, out)?,
                _ => self.list(args, out)?,
            },
            Command::Lsr => self.list_recursive(args, out)?,
            Command::Make => {
                let Some((name, words)) = args.split_first() else {
                    bail!("missing file name");
                };
                match self.fs.make(name, words) {
                    Err(e @ FsError::AlreadyExists(_)) => {
                        debug!(name, "make skipped: {e}");
                        writeln!(out, "{e}")?;
                    }
                    result => result?,
                }
            }
            Command::Mkdir => self.fs.mkdir(single_operand(args, "directory name")?)?,
            Command::Prompt => self.fs.set_prompt(single_operand(args, "prompt")?),
            Command::Pwd => writeln!(out, "{}", self.fs.pwd())?,
            Command::Rm => match args {
                ["-R", rest @ ..] => self.fs.rmr(single_operand(rest, "name")?)?,
                _ => self.fs.rm(single_operand(args, "name")?)?,
            },
            Command::Rmr => self.fs.rmr(single_operand(args, "name")?)?,
            Command::Comment => {}
        }
        Ok(Flow::Continue)
    }

    fn list<W: Write>(&self, args: &[&str], out: &mut W) -> anyhow::Result<()> {
        if args.len() > 1 {
            bail!("too many arguments");
        }
        write!(out, "{}", self.fs.ls(args.first().copied())?)?;
        Ok(())
    }

    fn list_recursive<W: Write>(&self, args: &[&str], out: &mut W) -> anyhow::Result<()> {
        if args.len() > 1 {
            bail!("too many arguments");
        }
        for listing in self.fs.lsr(args.first().copied())? {
            write!(out, "{listing}")?;
        }
        Ok(())
    }

    /// Runs every line of `input`. Failures go to `err` and set the status to 1; the
    /// next line runs regardless. Returns `Flow::Exit` when an `exit` ended the run,
    /// `Flow::Continue` when the input ran out. The status is kept in [`Shell::status`].
    pub fn run<R: BufRead, W: Write, E: Write>(
        &mut self,
        input: R,
        out: &mut W,
        err: &mut E,
        interactive: bool,
    ) -> anyhow::Result<Flow> {
        if interactive {
            write!(out, "{}", self.prompt())?;
            out.flush()?;
        }
        for line in input.lines() {
            let line = line.context("failed to read input")?;
            // an interactive run has already shown the prompt
            if self.config.echo && !interactive {
                writeln!(out, "{}{}", self.prompt(), line)?;
            }
            match self.execute(&line, out) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit(status)) => {
                    self.status = status;
                    return Ok(Flow::Exit(status));
                }
                Err(e) => {
                    warn!(line = line.as_str(), "command failed: {e:#}");
                    writeln!(err, "{e:#}")?;
                    self.status = 1;
                }
            }
            if interactive {
                write!(out, "{}", self.prompt())?;
                out.flush()?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Runs the script at `path` on the host file system.
    pub fn run_script<P: AsRef<Path>, W: Write, E: Write>(
        &mut self,
        path: P,
        out: &mut W,
        err: &mut E,
    ) -> anyhow::Result<Flow> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
        self.run(BufReader::new(file), out, err, false)
    }
}

fn single_operand<'a>(args: &[&'a str], what: &str) -> anyhow::Result<&'a str> {
    match args {
        [arg] => Ok(*arg),
        [] => bail!("missing {what}"),
        _ => bail!("too many arguments"),
    }
}
