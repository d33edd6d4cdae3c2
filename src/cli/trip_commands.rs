use crate::cli::context::CLIContext;

pub fn cities(ctx: &mut CLIContext) {
    let _ = ctx.planner.load_cities();
    let cities = ctx.planner.cities();
    if cities.is_empty() {
        println!("No candidate cities.");
        return;
    }
    println!("Candidate cities ({}):", cities.len());
    for city in cities {
        println!("  {}", city);
    }
}

pub fn plan(ctx: &mut CLIContext) {
    if ctx.planner.plan_trip().is_err() {
        println!("Could not generate a trip. Showing the previous itinerary, if any.");
    }
    show_itinerary(ctx);
}

pub fn show_itinerary(ctx: &CLIContext) {
    let items = ctx.planner.itinerary();
    if items.is_empty() {
        println!("No itinerary yet. Run 'plan' to generate one.");
        return;
    }

    println!();
    for (i, item) in items.iter().enumerate() {
        let votes = ctx.planner.tally().count(&item.name);
        println!(
            "  {}. {} ({}){}",
            i + 1,
            item.name,
            CLIContext::format_money(item.budget),
            if votes > 0 { format!(" - {} vote{}", votes, if votes == 1 { "" } else { "s" }) } else { String::new() },
        );
        if !item.justification_score.is_empty() {
            println!("     {}", item.justification_score);
        }
    }
    println!();
}

pub fn vote(ctx: &mut CLIContext, args: &str) {
    let name = match if args.is_empty() { println!("Usage: vote <item>"); return; } else { ctx.find_item(args) } {
        Some(n) => n,
        None => return,
    };
    let count = ctx.planner.vote(&name);
    println!("{} now has {} vote{}", name, count, if count == 1 { "" } else { "s" });
}

pub fn finalize(ctx: &CLIContext) {
    match ctx.planner.finalize() {
        Some(item) => {
            println!();
            println!("Final pick: {} ({})", item.name, CLIContext::format_money(item.budget));
            if !item.justification_score.is_empty() {
                println!("  {}", item.justification_score);
            }
            println!();
        }
        None => println!("Nothing to finalize. Run 'plan' first."),
    }
}
