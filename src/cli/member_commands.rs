use crate::cli::context::CLIContext;
use crate::model::member::{CONSTRAINT_KEYS, PREFERENCE_KEYS};
use crate::model::*;

pub fn list(ctx: &mut CLIContext) {
    // Failures are logged by the planner; the last good list is shown.
    let _ = ctx.planner.load_members();

    let members = ctx.planner.members();
    if members.is_empty() {
        println!("No members yet. Use 'add-member' to add someone.");
        return;
    }

    println!("Members ({}):", members.len());
    for entry in members {
        match entry {
            MemberEntry::Name(name) => println!("  {}", name),
            MemberEntry::Record(m) => {
                let city = m.city.as_ref().map(|c| format!(", {}", c)).unwrap_or_default();
                println!(
                    "  {} - budget {}, saves {}/month{}",
                    m.name,
                    CLIContext::format_money(m.total_budget),
                    CLIContext::format_money(m.monthly_saving_capacity),
                    city,
                );
            }
        }
    }
}

pub fn show(ctx: &mut CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: show-member <name>");
        return;
    }
    let _ = ctx.planner.refresh_if_stale();

    let wanted = args.trim();
    let entry = ctx
        .planner
        .members()
        .iter()
        .find(|e| e.name().eq_ignore_ascii_case(wanted));

    match entry {
        None => println!("No member named '{}'", wanted),
        Some(MemberEntry::Name(name)) => println!("{} (no details from server)", name),
        Some(MemberEntry::Record(m)) => {
            println!();
            println!("Name: {}", m.name);
            println!("Total budget: {}", CLIContext::format_money(m.total_budget));
            println!("Monthly saving: {}", CLIContext::format_money(m.monthly_saving_capacity));
            println!("Preferences:");
            for key in PREFERENCE_KEYS {
                println!("  {}: {}", key, m.preference_weights.get(key).unwrap_or(0));
            }
            println!("Constraints:");
            for key in CONSTRAINT_KEYS {
                println!("  {}: {}", key, m.constraints.get(key).unwrap_or(0));
            }
            if let Some(city) = &m.city {
                println!("City: {}", city);
            }
            if let (Some(start), Some(end)) = (m.start_date, m.end_date) {
                println!("Window: {} to {}", start, end);
            }
            if !m.notes.is_empty() {
                println!("Notes: {}", m.notes);
            }
            println!();
        }
    }
}

/// Walk through every form field, then submit.
pub fn add(ctx: &mut CLIContext, args: &str) {
    println!("Adding a member (press Enter to keep the current value, 's' to submit now)");
    println!();

    if !args.is_empty() {
        let _ = ctx.planner.edit_field("name", args);
    }

    let mut fields: Vec<(&str, String)> = vec![
        ("name", "Name".into()),
        ("total_budget", "Total budget".into()),
        ("monthly_saving_capacity", "Monthly saving capacity".into()),
    ];
    fields.extend(PREFERENCE_KEYS.iter().map(|k| (*k, format!("{} (0-5)", k))));
    fields.extend(CONSTRAINT_KEYS.iter().map(|k| (*k, k.replace('_', " "))));
    fields.extend([
        ("notes", "Notes".to_string()),
        ("city", "City".to_string()),
        ("start_date", "Start date (YYYY-MM-DD)".to_string()),
        ("end_date", "End date (YYYY-MM-DD)".to_string()),
    ]);

    for (field, label) in &fields {
        loop {
            let current = current_value(ctx.planner.draft(), field);
            let shown = if current.is_empty() { String::new() } else { format!(" [{}]", current) };
            let input = match ctx.prompt(&format!("{}{}: ", label, shown)) {
                Some(s) => s,
                None => return,
            };
            if input.eq_ignore_ascii_case("s") {
                submit(ctx);
                return;
            }
            if input.is_empty() {
                break;
            }
            match ctx.planner.edit_field(field, &input) {
                Ok(_) => break,
                Err(e) => ctx.print_error(&e),
            }
        }
    }

    submit(ctx);
}

/// Set one draft field: `set <field> <value>`.
pub fn set_field(ctx: &mut CLIContext, args: &str) {
    let (field, value) = match args.split_once(char::is_whitespace) {
        Some((f, v)) => (f, v.trim()),
        None if !args.is_empty() => (args, ""),
        None => {
            println!("Usage: set <field> <value>");
            return;
        }
    };

    match ctx.planner.edit_field(field, value) {
        Ok(FieldTarget::PreferenceWeight) => println!("Preference {} = {}", field, current_value(ctx.planner.draft(), field)),
        Ok(FieldTarget::Constraint) => println!("Constraint {} = {}", field, current_value(ctx.planner.draft(), field)),
        Ok(FieldTarget::TopLevel) => println!("{} = {}", field, value),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn show_draft(ctx: &CLIContext) {
    let draft = ctx.planner.draft();
    println!();
    for field in ["name", "total_budget", "monthly_saving_capacity"] {
        println!("  {}: {}", field, current_value(draft, field));
    }
    for key in PREFERENCE_KEYS.iter().chain(CONSTRAINT_KEYS.iter()) {
        println!("  {}: {}", key, current_value(draft, key));
    }
    for field in ["notes", "city", "start_date", "end_date"] {
        println!("  {}: {}", field, current_value(draft, field));
    }
    for (field, value) in &draft.extra {
        println!("  {}: {}", field, value);
    }
    println!();
}

pub fn submit(ctx: &mut CLIContext) {
    let name = ctx.planner.draft().name.trim().to_string();
    match ctx.planner.add_member() {
        Ok(()) => println!("Added {}", name),
        Err(_) => println!("Member not added. Your entries were kept; use 'submit' to try again."),
    }
}

pub fn delete(ctx: &mut CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: delete-member <name>");
        return;
    }
    ctx.planner.set_delete_input(args);
    if ctx.planner.delete_pending().is_ok() {
        println!("Deleted {}", args.trim());
    }
}

fn current_value(draft: &MemberDraft, field: &str) -> String {
    match FieldTarget::route(field) {
        FieldTarget::PreferenceWeight => draft.preference_weights.get(field).unwrap_or(0).to_string(),
        FieldTarget::Constraint => draft.constraints.get(field).unwrap_or(0).to_string(),
        FieldTarget::TopLevel => draft.text(field).unwrap_or_default().to_string(),
    }
}
