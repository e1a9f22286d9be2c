//! Colored output helpers for CLI
//!
//! Provides consistent, colored terminal output for the GRAIL CLI.

use owo_colors::OwoColorize;

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper with colors enabled
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print the GRAIL banner
    pub fn banner(&self) {
        if self.colored {
            println!(
                r#"
   {}
   {}
   {}
   {}
   {}
"#,
                "  ____ ____      _    ___ _      ".bright_cyan().bold(),
                " / ___|  _ \\    / \\  |_ _| |     ".bright_cyan().bold(),
                "| |  _| |_) |  / _ \\  | || |     ".cyan().bold(),
                "| |_| |  _ <  / ___ \\ | || |___  ".blue().bold(),
                " \\____|_| \\_\\/_/   \\_\\___|_____| ".blue().bold(),
            );
            println!(
                "   {} {}\n",
                "Grounded Retrieval Augmented Inference Loop"
                    .bright_white()
                    .bold(),
                format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
            );
        } else {
            println!(
                r#"
  ____ ____      _    ___ _
 / ___|  _ \    / \  |_ _| |
| |  _| |_) |  / _ \  | || |
| |_| |  _ <  / ___ \ | || |___
 \____|_| \_\/_/   \_\___|_____|

   Grounded Retrieval Augmented Inference Loop v{}
"#,
                env!("CARGO_PKG_VERSION")
            );
        }
    }

    /// Print a success message with a checkmark
    pub fn success(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "✓".green().bold(), message.green());
        } else {
            println!("  [OK] {}", message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "•".blue(), message);
        } else {
            println!("  [INFO] {}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "⚠".yellow().bold(), message.yellow());
        } else {
            println!("  [WARN] {}", message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    /// Print a step message (for multi-step operations)
    pub fn step(&self, step_num: u32, total: u32, message: &str) {
        if self.colored {
            println!(
                "  {} {}",
                format!("[{}/{}]", step_num, total).dimmed(),
                message.bright_white()
            );
        } else {
            println!("  [{}/{}] {}", step_num, total, message);
        }
    }

    /// Print a file creation message
    pub fn created(&self, file_type: &str, path: &str) {
        if self.colored {
            println!(
                "  {} {} {}",
                "+".green().bold(),
                file_type.dimmed(),
                path.bright_white()
            );
        } else {
            println!("  [NEW] {} {}", file_type, path);
        }
    }

    /// Print the interactive prompt marker (no trailing newline)
    pub fn prompt(&self) {
        use std::io::Write;
        if self.colored {
            print!("{} ", "?".bright_cyan().bold());
        } else {
            print!("? ");
        }
        let _ = std::io::stdout().flush();
    }
}
