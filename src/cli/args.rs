use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "arcbrowse",
    version,
    about = "client for folder-based static archives",
    long_about = "Arcbrowse browses folder-based static archives: it resolves a page location to its JSON dataset fragments, fetches them, and renders topic, category, and entry views.\n\nExamples:\n  arcbrowse -u https://archive.example.org -p /content/\n  arcbrowse -u https://archive.example.org -p /content/software.html -s doc\n  arcbrowse -u https://archive.example.org -p /content/software/games.html --interactive\n\nTip: Use --config to persist the archive host and layout roots."
)]
pub struct CliArgs {
    #[arg(
        short = 'u',
        long = "u",
        visible_alias = "url",
        value_name = "URL",
        help_heading = "Input",
        help = "Base URL of the archive host."
    )]
    pub url: Option<String>,

    #[arg(
        short = 'p',
        long = "pg",
        visible_alias = "page",
        value_name = "PATH",
        help_heading = "Input",
        help = "Page path to open (e.g. /content/software/games.html)."
    )]
    pub page: Option<String>,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.arcbrowse/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "cr",
        visible_alias = "content-root",
        value_name = "PATH",
        help_heading = "Layout",
        help = "Root under which the static pages live."
    )]
    pub content_root: Option<String>,

    #[arg(
        long = "dr",
        visible_alias = "data-root",
        value_name = "PATH",
        help_heading = "Layout",
        help = "Root under which the JSON dataset fragments live."
    )]
    pub data_root: Option<String>,

    #[arg(
        short = 's',
        long = "se",
        visible_alias = "search",
        value_name = "TERM",
        help_heading = "Search",
        help = "Run one forced search (topic pages) or filter the list (category pages)."
    )]
    pub search: Option<String>,

    #[arg(
        short = 'i',
        long = "ia",
        visible_alias = "interactive",
        help_heading = "Search",
        help = "Read search input interactively after rendering the page."
    )]
    pub interactive: bool,

    #[arg(
        long = "nc",
        visible_alias = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'c',
        long = "clr",
        visible_alias = "color",
        help_heading = "Output",
        help = "Enable colored output (overrides --no-color)."
    )]
    pub color: bool,

    #[arg(
        short = 'w',
        long = "wd",
        visible_alias = "width",
        value_name = "COLS",
        help_heading = "Output",
        help = "Card layout width in columns."
    )]
    pub width: Option<usize>,
}
