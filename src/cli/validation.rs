use crate::cli::args::CliArgs;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(url) = args.url.as_deref() {
        if reqwest::Url::parse(url).is_err() {
            return Err(format!("invalid --url '{url}'"));
        }
    }
    if let Some(page) = args.page.as_deref() {
        if page.trim().is_empty() {
            return Err("invalid --page, expected a page path".to_string());
        }
    }
    if let Some(width) = args.width {
        if width < 20 {
            return Err("invalid --width, expected at least 20 columns".to_string());
        }
    }
    if args.interactive && args.search.is_some() {
        return Err("use either --search or --interactive, not both".to_string());
    }
    Ok(())
}
