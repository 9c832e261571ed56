use std::env;
use std::io::{self, IsTerminal, Write};
use std::sync::OnceLock;
use std::time::Duration;

fn use_color() -> bool {
    static USE_COLOR: OnceLock<bool> = OnceLock::new();
    *USE_COLOR.get_or_init(|| env::var_os("NO_COLOR").is_none() && io::stderr().is_terminal())
}

fn paint(code: &str, text: &str) -> String {
    if use_color() {
        format!("\u{1b}[{}m{}\u{1b}[0m", code, text)
    } else {
        text.to_string()
    }
}

fn dim(text: &str) -> String {
    paint("2", text)
}

fn green(text: &str) -> String {
    paint("32", text)
}

fn cyan(text: &str) -> String {
    paint("36", text)
}

fn yellow(text: &str) -> String {
    paint("33", text)
}

fn red(text: &str) -> String {
    paint("31", text)
}

pub fn header(command: &str) {
    eprintln!(
        "{}",
        dim(&format!("jdk-switch {} v{}", command, env!("CARGO_PKG_VERSION")))
    );
    eprintln!();
}

pub fn step(message: &str) {
    eprintln!("{}", dim(message));
}

pub fn timing(label: &str, elapsed: Duration) {
    eprintln!("{} {}", dim(label), cyan(&format_duration(elapsed)));
}

pub fn version_entry(label: &str, path: &str, active: bool) {
    if active {
        println!("{} JDK {}: {} {}", green("*"), label, path, dim("(current)"));
    } else {
        println!("  JDK {}: {}", label, path);
    }
}

pub fn success(message: &str) {
    println!("{} {}", green("ok"), message);
}

pub fn warn(message: &str) {
    let tag = yellow("warn");
    eprintln!("{} {}", tag, message);
}

pub fn error(message: &str) {
    let tag = red("error");
    eprintln!("{} {}", tag, message);
}

pub fn info(message: &str) {
    println!("{}", message);
}

pub fn prompt(message: &str) {
    print!("{}", message);
    let _ = io::stdout().flush();
}

pub fn format_duration(elapsed: Duration) -> String {
    let seconds = elapsed.as_secs_f64();
    if seconds < 1.0 {
        format!("{:.0}ms", seconds * 1000.0)
    } else {
        format!("{:.2}s", seconds)
    }
}
