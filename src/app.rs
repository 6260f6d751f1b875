use std::future::Future;
use std::io::Write;
use std::time::Duration;

use clap::{error::ErrorKind, Parser};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::filter::{visibility_mask, SearchIntent};
use crate::loader::{
    fetch_entry, fetch_entry_list, fetch_name_list, FragmentSource, HttpSource, LoadError,
};
use crate::model::ContentEntry;
use crate::page::{parse_page_path, FragmentPlan};
use crate::render::{self, text};
use crate::view::{Container, PageViewState, SearchEvent, ViewError};

fn print_banner() {
    const BANNER: &str = r#"
                     __
  ____ ___________  / /_  _________ _      __________
 / __ `/ ___/ ___/ / __ \/ ___/ __ \ | /| / / ___/ _ \
/ /_/ / /  / /__  / /_/ / /  / /_/ / |/ |/ (__  )  __/
\__,_/_/   \___/ /_.___/_/   \____/|__/|__/____/\___/

       v0.3.1 - folder-based static archive browser
"#;
    println!("{}", BANNER.bold().cyan());
}

#[derive(Clone, Debug)]
pub struct RunConfig {
    pub base_url: String,
    pub page_path: String,
    pub content_root: String,
    pub data_root: String,
    pub search: Option<String>,
    pub interactive: bool,
    pub no_color: bool,
    pub width: usize,
}

/// Merge the cli arguments over the config file over the built-in
/// defaults into one resolved run configuration.
pub fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };

    let base_url = args
        .url
        .or(cfg.base_url)
        .ok_or_else(|| "an archive host is required (-u or base_url in the config)".to_string())?;
    let page_path = args
        .page
        .or(cfg.page)
        .unwrap_or_else(|| "/content/".to_string());
    let content_root = args
        .content_root
        .or(cfg.content_root)
        .unwrap_or_else(|| "/content".to_string());
    let data_root = args
        .data_root
        .or(cfg.data_root)
        .unwrap_or_else(|| "/datasets/content".to_string());
    let search = args.search.or(cfg.search);
    let interactive = args.interactive || cfg.interactive.unwrap_or(false);
    let width = args.width.or(cfg.width).unwrap_or(text::DEFAULT_WIDTH);

    Ok(RunConfig {
        base_url,
        page_path,
        content_root,
        data_root,
        search,
        interactive,
        no_color,
        width,
    })
}

fn format_kv_line(key: &str, value: &str) -> String {
    format!(
        "{}  {} {} {}",
        ">".bold().green(),
        format!("{key:<9}").bold().white(),
        ":".bold().white(),
        value.bold().cyan()
    )
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.blue} {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_message(message);
    pb
}

fn print_container(container: &Container, width: usize) {
    println!("{} {}", "::".bold().green(), container.name().bold().white());
    if let Some(node) = container.content() {
        for line in text::render_lines(node, width) {
            println!("  {line}");
        }
    }
    println!();
}

/// Run one fragment fetch through the container lifecycle: loading
/// indicator up front, the error panel in place of it on failure.
async fn load_into<T, Fut>(
    container: &mut Container,
    what: &str,
    fetch: Fut,
) -> Result<T, LoadError>
where
    Fut: Future<Output = Result<T, LoadError>>,
{
    container.begin_loading(what);
    let pb = spinner(format!("loading {what}"));
    let result = fetch.await;
    pb.finish_and_clear();
    if let Err(e) = &result {
        container.fail(e);
    }
    result
}

fn show_category(container: &mut Container, entries: &[ContentEntry], term: &str, width: usize) {
    let mask = visibility_mask(entries, term);
    let visible: Vec<&ContentEntry> = entries
        .iter()
        .zip(&mask)
        .filter(|(_, visible)| **visible)
        .map(|(entry, _)| entry)
        .collect();
    container.show(render::entry_card_list(&visible, false));
    print_container(container, width);
    if !term.trim().is_empty() {
        println!(
            "{}",
            format!(
                "{} of {} entries match '{}'",
                visible.len(),
                entries.len(),
                term
            )
            .dimmed()
        );
    }
}

async fn run_topic_search(
    view: &mut PageViewState,
    source: &dyn FragmentSource,
    event: SearchEvent,
    term: &str,
    intent: SearchIntent,
    width: usize,
) -> Result<(), String> {
    let mut container = Container::new("search results");
    container.begin_loading("search index");
    let pb = spinner("loading search index".to_string());
    let outcome = view.search(source, event, term, intent).await;
    pb.finish_and_clear();
    match outcome {
        Ok(Some(hits)) => {
            let node = render::entry_card_list(&hits, true);
            container.show(node);
            print_container(&container, width);
            Ok(())
        }
        Ok(None) => {
            container.clear();
            print_container(&container, width);
            Ok(())
        }
        Err(ViewError::Load(e)) => {
            container.fail(&e);
            print_container(&container, width);
            Err(e.to_string())
        }
        Err(e) => Err(e.to_string()),
    }
}

fn parse_search_line(line: &str) -> Option<(SearchEvent, &str, SearchIntent)> {
    match line {
        ":q" => None,
        "" => Some((SearchEvent::Enter, "", SearchIntent::Forced)),
        "/" => Some((SearchEvent::Keystroke, "", SearchIntent::Erased)),
        _ if line.starts_with('/') => {
            Some((SearchEvent::Keystroke, &line[1..], SearchIntent::Forced))
        }
        _ => Some((SearchEvent::Trigger, line, SearchIntent::Forced)),
    }
}

fn read_search_line(input: &mut String) -> Result<bool, String> {
    print!("{} ", "search>".bold().green());
    std::io::stdout()
        .flush()
        .map_err(|e| format!("failed to flush stdout: {e}"))?;
    input.clear();
    let read = std::io::stdin()
        .read_line(input)
        .map_err(|e| format!("failed to read search input: {e}"))?;
    Ok(read != 0)
}

async fn interactive_topic_search(
    view: &mut PageViewState,
    source: &dyn FragmentSource,
    width: usize,
) -> Result<(), String> {
    println!(
        "{}",
        "interactive search :: /term filters, bare Enter lists everything, / clears, :q quits"
            .dimmed()
    );
    let mut input = String::new();
    loop {
        if !read_search_line(&mut input)? {
            break;
        }
        let line = input.trim_end_matches(['\r', '\n']).to_string();
        let Some((event, term, intent)) = parse_search_line(&line) else {
            break;
        };
        run_topic_search(view, source, event, term, intent, width).await?;
    }
    Ok(())
}

fn interactive_category_filter(
    container: &mut Container,
    entries: &[ContentEntry],
    width: usize,
) -> Result<(), String> {
    println!(
        "{}",
        "interactive filter :: /term narrows the list, bare Enter shows everything, :q quits"
            .dimmed()
    );
    let mut input = String::new();
    loop {
        if !read_search_line(&mut input)? {
            break;
        }
        let line = input.trim_end_matches(['\r', '\n']);
        if line == ":q" {
            break;
        }
        let term = line.strip_prefix('/').unwrap_or(line);
        show_category(container, entries, term, width);
    }
    Ok(())
}

pub async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }
    print_banner();

    // One parse up front. A malformed page path aborts here; nothing
    // gets fetched for it.
    let page = parse_page_path(&run.page_path, &run.content_root).map_err(|e| e.to_string())?;

    println!("{}", format_kv_line("Host", &run.base_url));
    println!(
        "{}",
        format_kv_line("Page", &page.page_path(&run.content_root))
    );
    println!();

    let source = HttpSource::new(&run.base_url)?;
    let width = run.width;

    match page.fragment_plan(&run.data_root) {
        FragmentPlan::TopicList { topics } => {
            let mut container = Container::new("topics");
            match load_into(&mut container, "topics", fetch_name_list(&source, &topics)).await {
                Ok(names) => {
                    container.show(render::button_list(&names));
                    print_container(&container, width);
                }
                Err(e) => {
                    print_container(&container, width);
                    return Err(e.to_string());
                }
            }
        }
        FragmentPlan::Topic { categories, .. } => {
            let mut container = Container::new("categories");
            match load_into(
                &mut container,
                "categories",
                fetch_name_list(&source, &categories),
            )
            .await
            {
                Ok(names) => {
                    container.show(render::button_list(&names));
                    print_container(&container, width);
                }
                Err(e) => {
                    print_container(&container, width);
                    return Err(e.to_string());
                }
            }

            let mut view = PageViewState::new(page.clone(), &run.data_root);
            if let Some(term) = run.search.as_deref() {
                run_topic_search(
                    &mut view,
                    &source,
                    SearchEvent::Trigger,
                    term,
                    SearchIntent::Forced,
                    width,
                )
                .await?;
            }
            if run.interactive {
                interactive_topic_search(&mut view, &source, width).await?;
            }
        }
        FragmentPlan::Category { entries } => {
            let mut container = Container::new("entries");
            let list = match load_into(
                &mut container,
                "entries",
                fetch_entry_list(&source, &entries),
            )
            .await
            {
                Ok(list) => list,
                Err(e) => {
                    print_container(&container, width);
                    return Err(e.to_string());
                }
            };
            show_category(
                &mut container,
                &list,
                run.search.as_deref().unwrap_or(""),
                width,
            );
            if run.interactive {
                interactive_category_filter(&mut container, &list, width)?;
            }
        }
        FragmentPlan::Entry { entry } => {
            let mut container = Container::new("entry");
            match load_into(&mut container, "entry", fetch_entry(&source, &entry)).await {
                Ok(record) => {
                    container.show(render::entry_detail(&record));
                    print_container(&container, width);
                }
                Err(e) => {
                    print_container(&container, width);
                    return Err(e.to_string());
                }
            }
        }
    }

    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return Ok(());
        }
        Err(e) => return Err(e.to_string()),
    };

    let cfg = match args.config.as_deref() {
        Some(path) => config::load_config(&config::expand_tilde(path), false)?,
        None => match config::default_config_path() {
            Some(path) => {
                let _ = config::ensure_default_config_file(&path);
                config::load_config(&path, true)?
            }
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start runtime: {e}"))?;
    rt.block_on(run_async(run))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::parse_from(std::iter::once("arcbrowse").chain(args.iter().copied()))
    }

    #[test]
    fn run_config_requires_a_base_url() {
        let err = build_run_config(parse(&[]), ConfigFile::default()).unwrap_err();
        assert!(err.contains("archive host"));
    }

    #[test]
    fn run_config_defaults_match_the_generator_layout() {
        let run = build_run_config(
            parse(&["-u", "https://archive.example.org"]),
            ConfigFile::default(),
        )
        .unwrap();
        assert_eq!(run.page_path, "/content/");
        assert_eq!(run.content_root, "/content");
        assert_eq!(run.data_root, "/datasets/content");
        assert_eq!(run.width, text::DEFAULT_WIDTH);
        assert!(!run.interactive);
    }

    #[test]
    fn cli_arguments_override_the_config_file() {
        let cfg = ConfigFile {
            base_url: Some("https://fallback.example.org".to_string()),
            page: Some("/content/movies.html".to_string()),
            width: Some(100),
            ..ConfigFile::default()
        };
        let run = build_run_config(
            parse(&["-u", "https://archive.example.org", "-p", "/content/"]),
            cfg,
        )
        .unwrap();
        assert_eq!(run.base_url, "https://archive.example.org");
        assert_eq!(run.page_path, "/content/");
        assert_eq!(run.width, 100);
    }

    #[test]
    fn color_flag_wins_over_no_color() {
        let cfg = ConfigFile {
            base_url: Some("https://archive.example.org".to_string()),
            no_color: Some(true),
            ..ConfigFile::default()
        };
        let run = build_run_config(parse(&["-c"]), cfg).unwrap();
        assert!(!run.no_color);
    }

    #[test]
    fn search_lines_map_to_events_and_intents() {
        assert!(parse_search_line(":q").is_none());
        assert_eq!(
            parse_search_line(""),
            Some((SearchEvent::Enter, "", SearchIntent::Forced))
        );
        assert_eq!(
            parse_search_line("/"),
            Some((SearchEvent::Keystroke, "", SearchIntent::Erased))
        );
        assert_eq!(
            parse_search_line("/doc"),
            Some((SearchEvent::Keystroke, "doc", SearchIntent::Forced))
        );
        assert_eq!(
            parse_search_line("doc"),
            Some((SearchEvent::Trigger, "doc", SearchIntent::Forced))
        );
    }
}
