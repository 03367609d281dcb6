use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use clap_complete::Shell;

use csshtml_core::config::{self, CONFIG_FILE_NAME, LiteralEscape};
use csshtml_core::validate::{self, GenerationPlan, Options};

#[derive(Parser)]
#[command(
    name = "csshtml-module",
    about = "Compile CSS, HTML or text files into JS/TS modules",
    after_help = "USAGE: csshtml-module -i [inputFile] -o [outputFile]",
    version
)]
struct Cli {
    /// Single file to convert (ignored if --template is set)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Destination file, must end with .ts or .js
    #[arg(short, long, required_unless_present_any = ["completions", "init"])]
    output: Option<PathBuf>,

    /// Compile to an HTMLTemplateElement module
    #[arg(long)]
    template: bool,

    /// Milliseconds to wait before compiling
    #[arg(short, long)]
    delay: Option<u64>,

    /// Name of the exported constant (ignored if --template is set)
    #[arg(short, long)]
    name: Option<String>,

    /// HTML file to use in the template
    #[arg(long)]
    html: Option<PathBuf>,

    /// CSS file to use in the template
    #[arg(long)]
    css: Option<PathBuf>,

    /// Language hint for editors, overrides the input file extension
    #[arg(short, long)]
    language: Option<String>,

    /// How to embed content in the template literal
    #[arg(long)]
    escape: Option<EscapeArg>,

    /// Project defaults file [default: .csshtml-module.yaml if present]
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write a project defaults file and exit
    #[arg(long)]
    init: bool,

    /// Overwrite an existing defaults file with --init
    #[arg(long, requires = "init")]
    force: bool,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

#[derive(Clone, Copy, ValueEnum)]
enum EscapeArg {
    Verbatim,
    TemplateLiteral,
}

impl From<EscapeArg> for LiteralEscape {
    fn from(arg: EscapeArg) -> Self {
        match arg {
            EscapeArg::Verbatim => LiteralEscape::Verbatim,
            EscapeArg::TemplateLiteral => LiteralEscape::TemplateLiteral,
        }
    }
}

impl Cli {
    fn into_options(self) -> Options {
        Options {
            input: self.input,
            output: self.output,
            name: self.name,
            template: self.template,
            html: self.html,
            css: self.css,
            language: self.language,
            delay: self.delay,
            escape: self.escape.map(LiteralEscape::from),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        clap_complete::generate(shell, &mut cmd, "csshtml-module", &mut std::io::stdout());
        return Ok(());
    }

    if cli.init {
        let path = cli.config.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
        return cmd_init(&path, cli.force);
    }

    cmd_compile(cli)
}

/// Validate the flags, resolve project defaults and compile the module.
fn cmd_compile(cli: Cli) -> Result<()> {
    // Checked before the defaults file is read.
    validate::check_output(cli.output.as_deref())?;
    let defaults = config::resolve_defaults(cli.config.as_deref())?;
    let plan = validate::plan(cli.into_options(), &defaults)?;
    run(&plan)
}

fn cmd_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists. Use --force to overwrite.", path.display());
    }

    fs::write(path, config::default_config_content())
        .with_context(|| format!("failed to write {}", path.display()))?;
    eprintln!("Created {}", path.display());
    Ok(())
}

/// Wait out the configured delay, then render and write the module.
fn run(plan: &GenerationPlan) -> Result<()> {
    if !plan.delay.is_zero() {
        log::debug!("waiting {:?} before compiling", plan.delay);
        thread::sleep(plan.delay);
    }

    let content = plan.render()?;
    fs::write(&plan.output, &content)
        .with_context(|| format!("failed to write {}", plan.output.display()))?;
    eprintln!("Converted file complete: {}", plan.output.display());
    Ok(())
}
