//! gradetrack CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gradetrack", version, about = "Console course grade tracker")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Course data file (overrides config)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Course schema file (overrides config)
    #[arg(long, global = true)]
    schema: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive grade tracking menu (default)
    Menu,

    /// Print the grade summary
    Summary {
        /// Show the evaluations of one course (1-based)
        #[arg(long)]
        course: Option<usize>,
    },

    /// Validate the data file against the schema
    Validate,

    /// Create a starter config and schema file
    Init,

    /// Add a course
    AddCourse {
        /// Course code, e.g. CS101
        #[arg(long)]
        code: String,
    },

    /// Delete a course
    DeleteCourse {
        /// Course position (1-based)
        #[arg(long)]
        course: usize,
    },

    /// Add an evaluation to a course
    AddEval {
        /// Course position (1-based)
        #[arg(long)]
        course: usize,

        /// Evaluation description
        #[arg(long)]
        description: String,

        /// Maximum raw score
        #[arg(long)]
        out_of: u32,

        /// Percent of the course grade
        #[arg(long)]
        weight: f64,

        /// Marks earned, omit if not graded yet
        #[arg(long)]
        earned: Option<f64>,
    },

    /// Delete an evaluation
    DeleteEval {
        /// Course position (1-based)
        #[arg(long)]
        course: usize,

        /// Evaluation position (1-based)
        #[arg(long)]
        eval: usize,
    },

    /// Set or clear the marks earned on an evaluation
    Grade {
        /// Course position (1-based)
        #[arg(long)]
        course: usize,

        /// Evaluation position (1-based)
        #[arg(long)]
        eval: usize,

        /// Marks earned, omit to mark as not graded
        #[arg(long)]
        earned: Option<f64>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gradetrack=warn".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let paths = commands::Paths {
        config: cli.config,
        data: cli.data,
        schema: cli.schema,
    };

    let result = match cli.command.unwrap_or(Commands::Menu) {
        // The interactive session reports its own errors and always exits 0.
        Commands::Menu => {
            commands::menu::execute(&paths);
            return;
        }
        Commands::Summary { course } => commands::summary::execute(&paths, course),
        Commands::Validate => commands::validate::execute(&paths),
        Commands::Init => commands::init::execute(),
        Commands::AddCourse { code } => commands::edit::add_course(&paths, &code),
        Commands::DeleteCourse { course } => commands::edit::delete_course(&paths, course),
        Commands::AddEval {
            course,
            description,
            out_of,
            weight,
            earned,
        } => commands::edit::add_evaluation(&paths, course, &description, out_of, weight, earned),
        Commands::DeleteEval { course, eval } => {
            commands::edit::delete_evaluation(&paths, course, eval)
        }
        Commands::Grade {
            course,
            eval,
            earned,
        } => commands::edit::grade(&paths, course, eval, earned),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
