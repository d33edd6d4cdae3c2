use std::io::{self, Write};

use crate::api::HttpApi;
use crate::config::Config;
use crate::planner::PlannerViewModel;
use crate::session::SessionStore;

pub struct CLIContext {
    pub planner: PlannerViewModel<HttpApi>,
    pub session: SessionStore,
    pub config: Config,
}

impl CLIContext {
    pub fn new(planner: PlannerViewModel<HttpApi>, session: SessionStore, config: Config) -> Self {
        Self { planner, session, config }
    }

    /// Prompt and read a line from stdin. Returns None on EOF.
    pub fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{}", prompt);
        io::stdout().flush().ok();
        let mut buf = String::new();
        match io::stdin().read_line(&mut buf) {
            Ok(0) => None,
            Ok(_) => Some(buf.trim_end_matches('\n').trim_end_matches('\r').to_string()),
            Err(_) => None,
        }
    }

    /// Read a line, trimmed.
    pub fn prompt(&self, prompt: &str) -> Option<String> {
        self.read_line(prompt).map(|s| s.trim().to_string())
    }

    /// Find an itinerary item by name query. Prints a message if not
    /// found or ambiguous.
    pub fn find_item(&self, args: &str) -> Option<String> {
        let query = args.trim();
        if query.is_empty() {
            return None;
        }

        let items = self.planner.itinerary();
        if items.is_empty() {
            println!("No itinerary yet. Run 'plan' first.");
            return None;
        }

        let lower = query.to_lowercase();
        let matches: Vec<&str> = items
            .iter()
            .map(|i| i.name.as_str())
            .filter(|name| name.to_lowercase().contains(&lower))
            .collect();

        match matches.len() {
            0 => {
                println!("No itinerary item matching '{}'", query);
                None
            }
            1 => Some(matches[0].to_string()),
            _ => {
                if let Some(exact) = matches.iter().find(|n| n.eq_ignore_ascii_case(query)) {
                    return Some(exact.to_string());
                }
                println!("Multiple matches found:");
                for name in &matches {
                    println!("  {}", name);
                }
                println!("Please be more specific.");
                None
            }
        }
    }

    pub fn format_money(amount: f64) -> String {
        if amount.fract() == 0.0 {
            format!("${:.0}", amount)
        } else {
            format!("${:.2}", amount)
        }
    }

    /// Print an error.
    pub fn print_error(&self, e: &crate::error::PlannerError) {
        println!("Error: {}", e);
    }
}
