use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use multiedit_config::Config;
use multiedit_engine::{BufferBackend, Converter, EditorMode, MultiEditor, wrap_delimited_pairs};
use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

#[derive(Parser)]
#[command(
    name = "multiedit",
    version,
    about = "Move a document between WYSIWYG, Markdown and HTML editing modes"
)]
struct Cli {
    /// Config file to use instead of ~/.config/multiedit/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Switch a document from one editing mode to another
    Convert {
        /// Mode the input is written for (defaults to the configured mode)
        #[arg(long)]
        from: Option<EditorMode>,
        /// Mode to switch to
        #[arg(long)]
        to: EditorMode,
        /// Input file, stdin when omitted
        input: Option<PathBuf>,
        /// Output file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render Markdown to HTML with math spans wrapped
    Render {
        input: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Wrap every unescaped pair of a marker in arbitrary text
    Wrap {
        /// Marker as a regular expression
        #[arg(long, default_value = r"\$")]
        marker: String,
        /// Marker length in characters
        #[arg(long, default_value_t = 1)]
        len: usize,
        #[arg(long)]
        left: String,
        #[arg(long)]
        right: String,
        input: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the editing modes
    Modes,
    /// Write a config file holding the default settings
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => match Config::load_from_path(path)? {
            Some(config) => config,
            None => bail!("Config file not found: {}", path.display()),
        },
        None => Config::load()?.unwrap_or_default(),
    };
    log::debug!("Using config: {config:?}");
    Ok(config)
}

fn init_config(path: Option<&Path>, force: bool) -> Result<()> {
    let path = path.map_or_else(Config::config_path, Path::to_path_buf);
    if path.exists() && !force {
        bail!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }
    Config::default()
        .save_to_path(&path)
        .with_context(|| format!("Failed to write config file {}", path.display()))?;
    log::info!("Wrote default config to {}", path.display());
    Ok(())
}

fn converter(config: &Config) -> Result<Converter> {
    Converter::new(&config.conversion_options()).context("Invalid math markup in config")
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => fs::write(path, content)
            .with_context(|| format!("Failed to write output file {}", path.display())),
        None => {
            print!("{content}");
            if !content.ends_with('\n') {
                println!();
            }
            Ok(())
        }
    }
}

/// Loads `input` into a headless editor in mode `from` and switches to `to`.
fn convert(converter: Converter, from: EditorMode, to: EditorMode, input: &str) -> String {
    let mut editor = MultiEditor::new(BufferBackend, converter, from, input);
    editor.apply_mode(to);
    editor.content()
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Command::Convert {
            from,
            to,
            input,
            output,
        } => {
            let config = load_config(config_path)?;
            let from = from.unwrap_or(config.default_mode);
            log::info!("Converting from {from} to {to}");
            let text = read_input(input.as_deref())?;
            write_output(
                output.as_deref(),
                &convert(converter(&config)?, from, to, &text),
            )
        }
        Command::Render { input, output } => {
            let converter = converter(&load_config(config_path)?)?;
            let text = read_input(input.as_deref())?;
            write_output(output.as_deref(), &converter.markdown_to_html(&text))
        }
        Command::Wrap {
            marker,
            len,
            left,
            right,
            input,
            output,
        } => {
            let text = read_input(input.as_deref())?;
            let wrapped = wrap_delimited_pairs(&text, &marker, &left, &right, len)?;
            write_output(output.as_deref(), &wrapped)
        }
        Command::Modes => {
            let config = load_config(config_path)?;
            for mode in EditorMode::ALL {
                let marker = if mode == config.default_mode { "*" } else { " " };
                println!("{marker} {:<8} {}", mode.as_str(), mode.label());
            }
            Ok(())
        }
        Command::Init { force } => init_config(config_path, force),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    run(Cli::parse())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;
    use std::ffi::OsString;
    use tempfile::TempDir;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_convert_arguments() {
        let cli = Cli::try_parse_from(["multiedit", "convert", "--from", "md", "--to", "html"])
            .unwrap();
        match cli.command {
            Command::Convert { from, to, .. } => {
                assert_eq!(from, Some(EditorMode::Markdown));
                assert_eq!(to, EditorMode::Html);
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["multiedit", "convert", "--to", "latex"]).is_err());
    }

    #[test]
    fn convert_markdown_to_html_and_back() {
        let html = convert(
            Converter::standard().unwrap(),
            EditorMode::Markdown,
            EditorMode::Html,
            "Some $x$",
        );
        assert_eq!(html, "<p>Some <span class=\"math inline\">x</span></p>\n");

        let markdown = convert(
            Converter::standard().unwrap(),
            EditorMode::Wysiwyg,
            EditorMode::Markdown,
            &html,
        );
        assert_eq!(markdown, "Some $x$");
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.toml");
        assert!(load_config(Some(missing.as_path())).is_err());
    }

    #[test]
    fn explicit_config_is_loaded() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "default_mode = \"html\"\n").unwrap();

        let config = load_config(Some(path.as_path())).unwrap();

        assert_eq!(config.default_mode, EditorMode::Html);
    }

    #[test]
    fn wrap_command_writes_output_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in.txt");
        let output = temp_dir.path().join("out.txt");
        let config = temp_dir.path().join("config.toml");
        fs::write(&input, "$a$ and $b").unwrap();
        fs::write(&config, "").unwrap();

        let args: Vec<OsString> = vec![
            "multiedit".into(),
            "--config".into(),
            config.into_os_string(),
            "wrap".into(),
            "--left".into(),
            "<i>".into(),
            "--right".into(),
            "</i>".into(),
            input.into_os_string(),
            "-o".into(),
            output.clone().into_os_string(),
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        run(cli).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "<i>a</i> and $b");
    }

    #[test]
    fn init_writes_default_config_once() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("multiedit").join("config.toml");

        init_config(Some(path.as_path()), false).unwrap();
        assert_eq!(load_config(Some(path.as_path())).unwrap(), Config::default());

        fs::write(&path, "default_mode = \"html\"\n").unwrap();
        assert!(init_config(Some(path.as_path()), false).is_err());
        assert_eq!(
            load_config(Some(path.as_path())).unwrap().default_mode,
            EditorMode::Html
        );

        init_config(Some(path.as_path()), true).unwrap();
        assert_eq!(load_config(Some(path.as_path())).unwrap(), Config::default());
    }

    #[test]
    fn parses_init_force() {
        let cli = Cli::try_parse_from(["multiedit", "init", "--force"]).unwrap();
        assert!(matches!(cli.command, Command::Init { force: true }));
    }
}
