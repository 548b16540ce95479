mod document;
mod error;
mod parser;
mod quiz;
mod settings;
mod store;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use tracing::warn;

use quiz::QuestionBank;
use store::Choice;

#[derive(Parser)]
#[command(name = "ward_quiz", about = "Guess-the-answer quiz built from a conversation transcript")]
struct Cli {
    /// Config file (default: ./quiz.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract questions from the source document into the question bank
    Extract {
        /// Source document (.docx, or plain text with one paragraph per line)
        #[arg(short, long)]
        source: Option<PathBuf>,
        /// Question bank to write
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print what would be written without touching the bank
        #[arg(long)]
        dry_run: bool,
    },
    /// Questions overview table
    List {
        /// Question bank to read
        #[arg(short, long)]
        bank: Option<PathBuf>,
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
        #[arg(long)]
        json: bool,
    },
    /// Show one question with its five choices
    Show {
        id: String,
        /// Show the answer text instead of the choices
        #[arg(short, long)]
        answer: bool,
        #[arg(short, long)]
        bank: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Submit a choice (A-E) for a question
    Guess {
        id: String,
        choice: Choice,
        #[arg(short, long)]
        bank: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Check the question bank for problems
    Check {
        #[arg(short, long)]
        bank: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = settings::load(cli.config.as_deref())?;

    let result = match cli.command {
        Commands::Extract {
            source,
            output,
            dry_run,
        } => {
            let source = source.unwrap_or(settings.source);
            let output = output.unwrap_or(settings.output);

            let paragraphs = document::read_paragraphs(&source)?;
            let questions = parser::extract_questions(&paragraphs, &settings.game)?;

            if dry_run {
                print_table(&QuestionBank::new(questions), usize::MAX);
                println!("\nDry run: {} not written.", output.display());
            } else {
                store::save_questions(&output, &questions)?;
                println!("Wrote {} questions to {}", questions.len(), output.display());
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::List { bank, limit, json } => {
            let bank = QuestionBank::load(&bank.unwrap_or(settings.output))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&bank.summaries())?);
            } else {
                print_table(&bank, limit);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Show {
            id,
            answer,
            bank,
            json,
        } => {
            let bank = QuestionBank::load(&bank.unwrap_or(settings.output))?;
            if answer {
                let a = bank.answer(&id)?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&a)?);
                } else {
                    println!("{} | {}\n", a.id, a.title);
                    println!("{}", a.answer_text);
                }
            } else {
                let d = bank.detail(&id)?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&d)?);
                } else {
                    println!("{} | {}\n", d.id, d.title);
                    println!("{}\n", d.question_text);
                    for (label, text) in Choice::ALL.iter().zip(d.choices) {
                        println!("  {}) {}", label, text);
                    }
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Guess {
            id,
            choice,
            bank,
            json,
        } => {
            let bank = QuestionBank::load(&bank.unwrap_or(settings.output))?;
            let verdict = bank.grade(&id, choice)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&verdict)?);
            } else {
                println!("{}", verdict.message);
                if !verdict.correct {
                    println!("Correct choice: {}", verdict.correct_choice);
                }
                if let Some(text) = verdict.explanation.as_deref().or(verdict.hint.as_deref()) {
                    println!("{}", text);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check { bank } => {
            let path = bank.unwrap_or(settings.output);
            let bank = QuestionBank::load(&path)?;
            let problems = bank.validate();
            if problems.is_empty() {
                println!("{}: {} questions, no problems.", path.display(), bank.len());
                Ok(ExitCode::SUCCESS)
            } else {
                for p in &problems {
                    warn!("{}", p);
                }
                println!("{}: {} problems found.", path.display(), problems.len());
                Ok(ExitCode::FAILURE)
            }
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_elapsed(elapsed));
    }

    result
}

fn print_table(bank: &QuestionBank, limit: usize) {
    if bank.is_empty() {
        println!("No questions.");
        return;
    }

    println!("{:<5} | {:<21} | {:<61}", "Id", "Title", "Question");
    println!("{}", "-".repeat(93));
    for s in bank.summaries().iter().take(limit) {
        let preview = s.question_preview.replace('\n', " ");
        println!(
            "{:<5} | {:<21} | {:<61}",
            s.id,
            quiz::preview(s.title, 20),
            quiz::preview(&preview, 60)
        );
    }

    println!("\n{} questions", bank.len());
}

fn format_elapsed(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {:02}s", secs / 60, secs % 60)
    }
}
