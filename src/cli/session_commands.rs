use crate::cli::context::CLIContext;

pub fn login(ctx: &mut CLIContext, args: &str) {
    if !ctx.session.login_enabled() {
        println!("Google login is not configured. Set GOOGLE_CLIENT_ID and restart.");
        return;
    }

    let credential = if args.is_empty() {
        ctx.prompt("Google ID token: ")
    } else {
        Some(args.to_string())
    };

    match ctx.session.sign_in(ctx.planner.api(), credential.as_deref()) {
        Ok(session) => {
            println!("Login successful!");
            println!("  Name:  {}", session.user.name);
            println!("  Email: {}", session.user.email);
        }
        Err(e) => println!("{}", e),
    }
}

pub fn logout(ctx: &mut CLIContext) {
    match ctx.session.sign_out() {
        Ok(()) => println!("Logged out."),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn whoami(ctx: &CLIContext) {
    match ctx.session.current() {
        Some(session) => {
            println!("Name:      {}", session.user.name);
            println!("Email:     {}", session.user.email);
            println!("Google ID: {}", session.user.google_id);
        }
        None => println!("Not signed in. Use 'login <token>'."),
    }
}
