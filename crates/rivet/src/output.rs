// SPDX-FileCopyrightText: 2026 Rivet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal output. Colors only when stdout is a TTY and `--plain` is off.

use std::io::IsTerminal;
use std::path::Path;

use colored::Colorize;
use rivet_core::{Coordinate, RivetError};
use rivet_plugin::PluginDescriptor;

pub struct Output {
    color: bool,
}

impl Output {
    pub fn new(plain: bool) -> Self {
        Self {
            color: !plain && std::io::stdout().is_terminal(),
        }
    }

    pub fn plugin(&self, descriptor: &PluginDescriptor) {
        let id = descriptor.id.to_string();
        let id = if self.color { id.bold().to_string() } else { id };
        println!("{id}  {}", descriptor.display_name);
        if !descriptor.description.is_empty() {
            println!("    {}", descriptor.description);
        }
        println!("    binding: {}", descriptor.binding);
        if !descriptor.tags.is_empty() {
            let tags: Vec<&str> = descriptor.tags.iter().map(String::as_str).collect();
            println!("    tags: {}", tags.join(", "));
        }
    }

    pub fn resolved(&self, requested: &Coordinate, resolved: &Coordinate) {
        if requested == resolved {
            println!("{requested}");
        } else if self.color {
            println!("{requested} {} {}", "->".cyan(), resolved.to_string().green());
        } else {
            println!("{requested} -> {resolved}");
        }
    }

    pub fn excluded(&self, requested: &Coordinate) {
        if self.color {
            println!("{requested} {}", "(excluded)".yellow());
        } else {
            println!("{requested} (excluded)");
        }
    }

    pub fn missing_header(&self, path: &Path) {
        let label = if self.color {
            "missing header".red().to_string()
        } else {
            "missing header".to_string()
        };
        println!("{label}: {}", path.display());
    }

    pub fn success(&self, message: &str) {
        if self.color {
            println!("{} {message}", "✓".green());
        } else {
            println!("{message}");
        }
    }

    pub fn error(&self, err: &RivetError) {
        if std::io::stderr().is_terminal() && self.color {
            eprintln!("{} {err}", "error:".red().bold());
        } else {
            eprintln!("error: {err}");
        }
    }
}
