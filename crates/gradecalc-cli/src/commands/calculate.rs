//! The `gradecalc subject|semester|yearly|target` commands.

use std::path::PathBuf;

use anyhow::{bail, Result};
use serde::Serialize;

use gradecalc_advisor::{config::load_config_from, AdviceClient};
use gradecalc_core::grading::{annotate, Standing};
use gradecalc_core::notify::TracingListener;
use gradecalc_core::traits::AdviceResponse;
use gradecalc_core::{CalcError, CalculatorKind, Field, Session};

/// Raw field text for one calculator, exactly as typed.
pub enum Inputs {
    Subject {
        regulars: Vec<String>,
        midterm: String,
        final_exam: String,
    },
    Semester {
        math: String,
        literature: String,
        english: String,
        others: Vec<String>,
    },
    Yearly {
        sem1: String,
        sem2: String,
    },
    Target {
        current: String,
        target: String,
        current_weight: String,
        exam_weight: String,
    },
}

impl Inputs {
    fn kind(&self) -> CalculatorKind {
        match self {
            Inputs::Subject { .. } => CalculatorKind::Subject,
            Inputs::Semester { .. } => CalculatorKind::Semester,
            Inputs::Yearly { .. } => CalculatorKind::Yearly,
            Inputs::Target { .. } => CalculatorKind::Target,
        }
    }
}

pub struct OutputOptions {
    pub advice: bool,
    pub config: Option<PathBuf>,
    pub format: String,
}

#[derive(Serialize)]
struct Outcome {
    tool: CalculatorKind,
    result: Option<f64>,
    standing: Option<Standing>,
    note: Option<String>,
    advice: Option<AdviceResponse>,
}

pub async fn execute(inputs: Inputs, options: OutputOptions) -> Result<()> {
    if !matches!(options.format.as_str(), "text" | "json") {
        bail!("unknown format: {} (expected text or json)", options.format);
    }

    let mut session = Session::new(inputs.kind(), TracingListener);
    apply(&mut session, inputs)?;
    let result = session.current();

    let advice = match (options.advice, result) {
        (true, Some(_)) => {
            let config = load_config_from(options.config.as_deref())?;
            let client = AdviceClient::from_config(&config)?;
            let ticket = session.begin_advice()?;
            let response = client.advise(&ticket.request).await;
            if !session.finish_advice(ticket, response.clone()) {
                tracing::debug!("advice reply arrived for a stale result, dropped");
            }
            Some(response)
        }
        _ => None,
    };

    let kind = session.kind();
    let outcome = Outcome {
        tool: kind,
        result,
        // A target result is a required exam score, not an average.
        standing: result
            .filter(|_| kind != CalculatorKind::Target)
            .map(Standing::of),
        note: result.map(|v| annotate(kind, v)).filter(|n| !n.is_empty()),
        advice,
    };

    if options.format == "json" {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_text(&outcome, options.advice);
    }

    Ok(())
}

/// Feed every raw field into the session, sizing the score list first.
fn apply(session: &mut Session<TracingListener>, inputs: Inputs) -> Result<()> {
    match inputs {
        Inputs::Subject {
            regulars,
            midterm,
            final_exam,
        } => {
            fill_slots(session, &regulars, Field::Regular)?;
            session.edit(Field::Midterm, &midterm)?;
            session.edit(Field::Final, &final_exam)?;
        }
        Inputs::Semester {
            math,
            literature,
            english,
            others,
        } => {
            fill_slots(session, &others, Field::Other)?;
            session.edit(Field::Math, &math)?;
            session.edit(Field::Literature, &literature)?;
            session.edit(Field::English, &english)?;
        }
        Inputs::Yearly { sem1, sem2 } => {
            session.edit(Field::Semester1, &sem1)?;
            session.edit(Field::Semester2, &sem2)?;
        }
        Inputs::Target {
            current,
            target,
            current_weight,
            exam_weight,
        } => {
            session.edit(Field::CurrentAverage, &current)?;
            session.edit(Field::Target, &target)?;
            session.edit(Field::CurrentWeight, &current_weight)?;
            session.edit(Field::ExamWeight, &exam_weight)?;
        }
    }
    Ok(())
}

fn fill_slots(
    session: &mut Session<TracingListener>,
    values: &[String],
    field: fn(usize) -> Field,
) -> Result<()> {
    while session.calculator().slot_count() < values.len() {
        session.add_slot()?;
    }
    while session.calculator().slot_count() > values.len() {
        let last = session.calculator().slot_count() - 1;
        match session.remove_slot(last) {
            Err(CalcError::LastSlot) => break,
            other => {
                other?;
            }
        }
    }
    for (i, value) in values.iter().enumerate() {
        session.edit(field(i), value)?;
    }
    Ok(())
}

fn print_text(outcome: &Outcome, advice_requested: bool) {
    use comfy_table::{Cell, Table};

    let Some(value) = outcome.result else {
        println!(
            "{}: no result yet. A required score is missing or not a number.",
            outcome.tool.title()
        );
        if advice_requested {
            println!("Advice needs a computed result.");
        }
        return;
    };

    let mut table = Table::new();
    let mut header = vec!["Tool", "Result"];
    let mut row = vec![
        Cell::new(outcome.tool.title()),
        Cell::new(format!("{value:.2}")),
    ];
    if let Some(standing) = outcome.standing {
        header.push("Standing");
        row.push(Cell::new(standing));
    }
    header.push("Note");
    row.push(Cell::new(outcome.note.as_deref().unwrap_or("")));
    table.set_header(header);
    table.add_row(row);
    println!("{table}");

    if let Some(advice) = &outcome.advice {
        println!("\nAI advice:\n{advice}");
    }
}
