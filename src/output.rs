//! Terminal output formatting for next-gen.
//!
//! Every user-facing status line goes through here so the icons and colors
//! stay consistent. Diagnostics belong in `log`, not in these functions.

use console::style;

const BANNER: &str = r#"
                      __
   ____  ___  _  ____/ /_      ____ ____  ____
  / __ \/ _ \| |/_/ __/______/ __ `/ _ \/ __ \
 / / / /  __/>  </ /_/_____/ /_/ /  __/ / / /
/_/ /_/\___/_/|_|\__/      \__, /\___/_/ /_/
                          /____/
"#;

/// Print the startup banner.
pub fn banner() {
    println!("{}", style(BANNER).cyan());
}

/// Plain progress line.
pub fn info(text: &str) {
    println!("📝 {}", text);
}

/// Print a success message in green.
pub fn success(text: &str) {
    println!("✅ {}", style(text).green());
}

/// Print an error message in red on stderr.
pub fn error(text: &str) {
    eprintln!("❌ {}", style(text).red());
}

/// Print a warning message in orange.
pub fn warning(text: &str) {
    println!("⚠️  {}", style(text).color256(208));
}

/// Milestones and greetings.
pub fn special(text: &str) {
    println!("✨ {}", style(text).magenta());
}

/// Question shown before reading a line of input.
pub fn input(text: &str) {
    println!("⌨️  {}", style(text).blue());
}

/// Hint shown after a rejected answer.
pub fn help(text: &str) {
    println!("❓ {}", style(text).cyan());
}
