use colored::Colorize;

pub fn header(title: &str) {
    println!("{}", title.bold().underline());
}

pub fn field(name: &str, value: Option<&str>) {
    match value {
        Some(value) => println!("  {:<20} {}", format!("{name}:"), value.cyan()),
        None => println!("  {:<20} {}", format!("{name}:"), "(none)".dimmed())
    }
}

pub fn flag(name: &str, enabled: bool) {
    let status = if enabled { "yes".green() } else { "no".red() };
    println!("  {:<20} {}", format!("{name}:"), status);
}

pub fn hint(msg: &str) {
    println!("{} {}", "hint:".cyan().bold(), msg.dimmed());
}

pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}
