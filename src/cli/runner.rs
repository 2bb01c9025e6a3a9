//! CLI runner - executes commands

use crate::browser::Browser;
use crate::cli::commands::{BrowseCommand, Cli, Commands, OutputFormat};
use crate::config::BrowserConfig;
use crate::error::{Error, Result};
use crate::pagination::{Dispatch, Outcome};
use crate::state::BrowserState;
use crate::types::{cursor_label, Cursor};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

const BROWSE_HELP: &str = "\
commands:
  next | n            following page
  prev | p            preceding page
  refresh | r         re-fetch the current page
  go [CURSOR]         jump to a cursor (first page when omitted)
  search [TEXT] | /   filter the current page by name (empty clears)
  show                print the current page again
  quit | q            leave";

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Fetch { cursor, query } => {
                self.fetch(cursor.as_deref(), query.as_deref()).await
            }
            Commands::Browse => self.browse().await,
            Commands::Config => self.show_config(),
        }
    }

    /// Load configuration: file (or defaults), then command-line overrides
    fn load_config(&self) -> Result<BrowserConfig> {
        let mut config = match &self.cli.config {
            Some(path) => BrowserConfig::from_file(path)?,
            None => BrowserConfig::default(),
        };
        if let Some(endpoint) = &self.cli.endpoint {
            config = config.with_endpoint(endpoint);
        }
        config.validate()?;
        Ok(config)
    }

    /// Fetch one page and print it
    async fn fetch(&self, cursor: Option<&str>, query: Option<&str>) -> Result<()> {
        let config = self.load_config()?;
        let mut browser = Browser::from_config(&config)?;
        if let Some(query) = query {
            browser.set_query(query);
        }

        let state = browser.navigate(cursor.map(Cursor::from)).await;
        if let BrowserState::Error { detail, .. } = state {
            return Err(Error::Fetch(detail.clone()));
        }

        self.print_browser(&browser);
        Ok(())
    }

    /// Interactive session: commands from stdin, fetch completions as they land
    async fn browse(&self) -> Result<()> {
        let config = self.load_config()?;
        let mut browser = Browser::from_config(&config)?;
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        if self.cli.format == OutputFormat::Pretty {
            println!("Browsing {} (type 'help' for commands)", config.endpoint);
        }
        let dispatch = browser.request(None);
        self.report_dispatch(&browser, &dispatch);

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        break;
                    };
                    let Some(command) = BrowseCommand::parse(&line) else {
                        if !line.trim().is_empty() {
                            self.print_notice(&format!("unknown command: {}", line.trim()));
                        }
                        continue;
                    };
                    if command == BrowseCommand::Quit {
                        break;
                    }
                    self.apply(&mut browser, command);
                }
                Some(outcome) = browser.poll_next_completion(), if browser.has_pending() => {
                    debug!("Fetch completed: {:?}", outcome);
                    if outcome != Outcome::Discarded {
                        self.print_browser(&browser);
                    }
                }
            }
        }

        Ok(())
    }

    fn apply(&self, browser: &mut Browser, command: BrowseCommand) {
        let dispatch = match command {
            BrowseCommand::Next => browser.next(),
            BrowseCommand::Prev => browser.prev(),
            BrowseCommand::Refresh => browser.refresh(),
            BrowseCommand::Go(cursor) => browser.request(cursor.map(Cursor::from)),
            BrowseCommand::Search(query) => {
                browser.set_query(query);
                self.print_browser(browser);
                return;
            }
            BrowseCommand::Show => {
                self.print_browser(browser);
                return;
            }
            BrowseCommand::Help => {
                println!("{BROWSE_HELP}");
                return;
            }
            BrowseCommand::Quit => return,
        };
        self.report_dispatch(browser, &dispatch);
    }

    fn report_dispatch(&self, browser: &Browser, dispatch: &Dispatch) {
        match dispatch {
            Dispatch::Unchanged => self.print_notice("nothing to do"),
            Dispatch::CacheHit => self.print_browser(browser),
            Dispatch::Joined(_) | Dispatch::Fetch(_) => self.print_status(browser),
        }
    }

    /// Print the effective configuration
    fn show_config(&self) -> Result<()> {
        let config = self.load_config()?;
        match self.cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(&config)?),
            OutputFormat::Pretty => print!("{}", serde_yaml::to_string(&config)?),
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------------

    fn print_status(&self, browser: &Browser) {
        match self.cli.format {
            OutputFormat::Json => self.output_message(&json!({
                "type": "STATE",
                "state": browser.state().kind(),
            })),
            OutputFormat::Pretty => println!("[{}]", browser.state().kind()),
        }
    }

    fn print_notice(&self, message: &str) {
        match self.cli.format {
            OutputFormat::Json => self.output_message(&json!({
                "type": "NOTICE",
                "message": message,
            })),
            OutputFormat::Pretty => println!("{message}"),
        }
    }

    fn print_browser(&self, browser: &Browser) {
        match self.cli.format {
            OutputFormat::Json => self.output_message(&page_message(browser)),
            OutputFormat::Pretty => print!("{}", render_pretty(browser)),
        }
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        println!("{}", serde_json::to_string(msg).unwrap_or_default());
    }
}

fn page_message(browser: &Browser) -> Value {
    let state = browser.state();
    json!({
        "type": "PAGE",
        "state": state.kind(),
        "cursor": browser.current_cursor(),
        "query": browser.query(),
        "items": browser.visible_items(),
        "has_next": browser.has_next(),
        "has_previous": browser.has_previous(),
        "fetched_at": browser.fetched_at(),
        "error": state.error().map(ToString::to_string),
    })
}

fn render_pretty(browser: &Browser) -> String {
    let state = browser.state();
    let mut out = format!(
        "[{}] {}",
        state.kind(),
        cursor_label(browser.current_cursor())
    );
    if let Some(at) = browser.fetched_at() {
        out.push_str(&format!(" fetched {}", at.format("%H:%M:%S UTC")));
    }
    if !browser.query().is_empty() {
        out.push_str(&format!(" (search: \"{}\")", browser.query()));
    }
    out.push('\n');

    if let Some(err) = state.error() {
        let hint = if err.is_transient() {
            " - 'refresh' to retry"
        } else {
            ""
        };
        out.push_str(&format!("error: {err}{hint}\n"));
    }

    match state {
        BrowserState::Idle | BrowserState::Loading => {}
        _ => {
            let items = browser.visible_items();
            if items.is_empty() && state.displayed_page().is_some() {
                out.push_str("  (no results)\n");
            }
            for item in items {
                out.push_str(&format!("  {}\n", item.name));
            }
        }
    }

    let prev = if browser.has_previous() { "prev" } else { "----" };
    let next = if browser.has_next() { "next" } else { "----" };
    out.push_str(&format!("<{prev}|{next}>\n"));
    out
}
