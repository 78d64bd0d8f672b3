//! Generate EQUATIONS.md from the equation registry.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin gen-equations
//! ```
//!
//! The generated file is written to `wellcalc_core/src/equations/EQUATIONS.md`
//! (run from the workspace root).

use std::fs;
use std::path::Path;

use wellcalc_core::equations::{generate_equations_markdown, ALL_EQUATIONS};

fn main() {
    let markdown = generate_equations_markdown();
    let output_path = Path::new("wellcalc_core/src/equations/EQUATIONS.md");

    match fs::write(output_path, &markdown) {
        Ok(()) => {
            println!(
                "Wrote {} equations ({} bytes) to {}",
                ALL_EQUATIONS.len(),
                markdown.len(),
                output_path.display()
            );
        }
        Err(e) => {
            eprintln!("Error writing {}: {}", output_path.display(), e);
            std::process::exit(1);
        }
    }
}
