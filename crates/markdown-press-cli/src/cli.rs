use clap::Parser;
use markdown_press_config::ConfigOverrides;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "markdown-press")]
#[command(version)]
#[command(about = "Convert a Markdown file into a standalone HTML page")]
#[command(after_help = "\
CONFIGURATION:

Settings are taken, lowest priority first, from built-in defaults,
markdown-press.toml in the working directory (or --config), and flags.

Example markdown-press.toml:

    input = \"README.md\"
    output = \"site/index.html\"
    title = \"Readme\"
    port = 8080")]
pub struct Cli {
    /// Input Markdown file [default: TEST.md]
    #[arg(long = "in", value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Output HTML file [default: output.html]
    #[arg(long = "out", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// HTML document title [default: Document]
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Serve the output HTML at http://localhost:<port> after converting
    #[arg(long)]
    pub serve: bool,

    /// Page template with {{.Title}} and {{.Body}} placeholders [default: template.html]
    #[arg(long, value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// Port for --serve [default: 8080]
    #[arg(long)]
    pub port: Option<u16>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write the effective configuration to PATH and exit
    #[arg(long, value_name = "PATH")]
    pub save_config: Option<PathBuf>,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            input: self.input.clone(),
            output: self.output.clone(),
            title: self.title.clone(),
            serve: self.serve.then_some(true),
            template: self.template.clone(),
            port: self.port,
        }
    }
}
