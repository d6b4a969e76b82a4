//! The `gradecalc init` command.

use std::path::Path;

use anyhow::Result;

const CONFIG_FILE: &str = "gradecalc.toml";

pub fn execute() -> Result<()> {
    if Path::new(CONFIG_FILE).exists() {
        println!("{CONFIG_FILE} already exists, skipping.");
        return Ok(());
    }

    std::fs::write(CONFIG_FILE, SAMPLE_CONFIG)?;
    println!("Created {CONFIG_FILE}");

    println!("\nNext steps:");
    println!("  1. Export GEMINI_API_KEY, or put the key in {CONFIG_FILE}");
    println!("  2. Run: gradecalc subject --regular 8 --midterm 7 --final 6 --advice");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gradecalc configuration

# Gemini API key. Leave unset to run without AI advice.
api_key = "${GEMINI_API_KEY}"

model = "gemini-3-flash-preview"
max_output_tokens = 1024
temperature = 0.7
"#;
