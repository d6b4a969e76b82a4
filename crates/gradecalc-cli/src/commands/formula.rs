//! The `gradecalc formula` command.

use anyhow::{Error, Result};
use comfy_table::Table;

use gradecalc_core::formula::formula_info;
use gradecalc_core::CalculatorKind;

pub fn execute(tool: Option<String>) -> Result<()> {
    let Some(tool) = tool else {
        let mut table = Table::new();
        table.set_header(vec!["Tool", "Name", "Description"]);
        for kind in CalculatorKind::ALL {
            table.add_row(vec![
                kind.to_string(),
                kind.title().to_string(),
                kind.description().to_string(),
            ]);
        }
        println!("{table}");
        println!("\nRun `gradecalc formula <tool>` for the formula and study tips.");
        return Ok(());
    };

    let kind: CalculatorKind = tool.parse().map_err(Error::msg)?;
    let info = formula_info(kind);

    println!("{}", info.title);
    println!("\n  {}\n", info.formula);
    println!("{}", info.explanation);
    if !info.tips.is_empty() {
        println!("\nTips:");
        for tip in info.tips {
            println!("  - {tip}");
        }
    }

    Ok(())
}
