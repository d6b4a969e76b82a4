//! gradecalc CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

mod commands;

use commands::calculate::{Inputs, OutputOptions};

#[derive(Parser)]
#[command(
    name = "gradecalc",
    version,
    about = "Grade average calculator with AI study advice"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct OutputArgs {
    /// Ask the AI advisor about the result
    #[arg(long)]
    advice: bool,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: text, json
    #[arg(long, default_value = "text")]
    format: String,
}

impl From<OutputArgs> for OutputOptions {
    fn from(args: OutputArgs) -> Self {
        Self {
            advice: args.advice,
            config: args.config,
            format: args.format,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Subject average: regular tests x1, midterm x2, final x3
    #[command(allow_negative_numbers = true)]
    Subject {
        /// Coefficient-1 score (oral, 15-minute test); repeat for each column
        #[arg(long = "regular")]
        regulars: Vec<String>,

        /// Midterm score (coefficient 2)
        #[arg(long, default_value = "")]
        midterm: String,

        /// Final exam score (coefficient 3)
        #[arg(long = "final", default_value = "")]
        final_exam: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Semester average: math, literature, english x2, other subjects x1
    #[command(allow_negative_numbers = true)]
    Semester {
        /// Math average (coefficient 2)
        #[arg(long, default_value = "")]
        math: String,

        /// Literature average (coefficient 2)
        #[arg(long, default_value = "")]
        literature: String,

        /// English average (coefficient 2)
        #[arg(long, default_value = "")]
        english: String,

        /// Another subject's average (coefficient 1); repeat for each subject
        #[arg(long = "other")]
        others: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Yearly average: semester 1 x1, semester 2 x2
    #[command(allow_negative_numbers = true)]
    Yearly {
        /// Semester 1 average
        #[arg(long, default_value = "")]
        sem1: String,

        /// Semester 2 average
        #[arg(long, default_value = "")]
        sem2: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Score the next exam needs to reach a target average
    #[command(allow_negative_numbers = true)]
    Target {
        /// Current average
        #[arg(long, default_value = "")]
        current: String,

        /// Target average
        #[arg(long, default_value = "")]
        target: String,

        /// Total coefficient already counted
        #[arg(long, default_value = "7")]
        current_weight: String,

        /// Coefficient of the upcoming exam
        #[arg(long, default_value = "3")]
        exam_weight: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show the formula guide for a calculator, or list all calculators
    Formula {
        /// Calculator: subject, semester, yearly, target
        tool: Option<String>,
    },

    /// Create a starter config file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gradecalc=info".parse().expect("valid directive")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Subject {
            regulars,
            midterm,
            final_exam,
            output,
        } => {
            commands::calculate::execute(
                Inputs::Subject {
                    regulars,
                    midterm,
                    final_exam,
                },
                output.into(),
            )
            .await
        }
        Commands::Semester {
            math,
            literature,
            english,
            others,
            output,
        } => {
            commands::calculate::execute(
                Inputs::Semester {
                    math,
                    literature,
                    english,
                    others,
                },
                output.into(),
            )
            .await
        }
        Commands::Yearly { sem1, sem2, output } => {
            commands::calculate::execute(Inputs::Yearly { sem1, sem2 }, output.into()).await
        }
        Commands::Target {
            current,
            target,
            current_weight,
            exam_weight,
            output,
        } => {
            commands::calculate::execute(
                Inputs::Target {
                    current,
                    target,
                    current_weight,
                    exam_weight,
                },
                output.into(),
            )
            .await
        }
        Commands::Formula { tool } => commands::formula::execute(tool),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
