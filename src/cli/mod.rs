pub mod context;
pub mod member_commands;
pub mod trip_commands;
pub mod session_commands;

use crate::api::HttpApi;
use crate::config::Config;
use crate::db::LocalStorage;
use crate::planner::PlannerViewModel;
use crate::session::SessionStore;
use context::CLIContext;

/// Run the interactive REPL.
pub fn run(config: Config) {
    println!("WanderSync - Plan. Sync. Explore.");
    println!("Type 'help' for commands, 'exit' to quit.");
    println!();

    let storage = match LocalStorage::open(&config.storage_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error opening storage: {}", e);
            return;
        }
    };

    let mut session = SessionStore::new(storage, config.login_enabled());
    session.subscribe(|current| {
        if let Some(s) = current {
            tracing::debug!(name = %s.user.name, "session changed");
        } else {
            tracing::debug!("session cleared");
        }
    });
    match session.restore() {
        Ok(Some(s)) => println!("Welcome back, {}!", s.user.name),
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "could not read stored session"),
    }

    let api = HttpApi::from_config(&config);
    let mut planner = PlannerViewModel::new(api, config.loading_delay);
    planner.subscribe_loading(|loading| {
        if loading {
            println!("Generating your trip...");
        }
    });
    // Initial roster fetch; failures are logged and the list stays empty.
    let _ = planner.refresh_if_stale();

    let mut ctx = CLIContext::new(planner, session, config);
    repl_loop(&mut ctx);
}

fn repl_loop(ctx: &mut CLIContext) {
    loop {
        let input = match ctx.read_line("> ") {
            Some(s) => s,
            None => break,
        };

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let (command, args) = parse_command(input);

        match command {
            "help" | "?" => print_help(),
            "quit" | "exit" | "q" => break,

            // Member commands
            "members" | "list" | "ls" => member_commands::list(ctx),
            "show-member" | "show" => member_commands::show(ctx, args),
            "add-member" => member_commands::add(ctx, args),
            "set" => member_commands::set_field(ctx, args),
            "draft" => member_commands::show_draft(ctx),
            "submit" => member_commands::submit(ctx),
            "delete-member" | "rm" => member_commands::delete(ctx, args),

            // Trip commands
            "cities" => trip_commands::cities(ctx),
            "plan" => trip_commands::plan(ctx),
            "itinerary" => trip_commands::show_itinerary(ctx),
            "vote" => trip_commands::vote(ctx, args),
            "finalize" => trip_commands::finalize(ctx),

            // Session commands
            "login" => session_commands::login(ctx, args),
            "logout" => session_commands::logout(ctx),
            "whoami" => session_commands::whoami(ctx),

            _ => println!("Unknown command: {}. Type 'help' for commands.", command),
        }
    }
}

/// Split input into command and the rest of the line.
fn parse_command(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.find(|c: char| c == ' ' || c == '\t') {
        Some(pos) => (&input[..pos], input[pos..].trim()),
        None => (input, ""),
    }
}

fn print_help() {
    println!(r#"
COMMANDS:

  Members:
    members                 Reload and list group members
    show-member <name>      Show a member's profile
    add-member [name]       Fill in the member form (interactive)
    set <field> <value>     Edit one form field
    draft                   Show the current form
    submit                  Send the current form as a new member
    delete-member <name>    Remove a member

  Trip:
    cities                  List candidate destinations
    plan                    Generate an itinerary
    itinerary               Show the current itinerary
    vote <item>             Vote for an itinerary item
    finalize                Pick the item with the most votes

  Account:
    login [token]           Sign in with a Google ID token
    logout                  Sign out
    whoami                  Show the signed-in user

  Other:
    help                    Show this help
    exit / quit / q         Exit

TIPS:
  - Preference weights are 0-5: nightlife, adventure, shopping, food, urban
  - Item names in 'vote' can be partial matches"#);
}
