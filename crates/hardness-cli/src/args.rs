// crates/hardness-cli/src/args.rs
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "hardness",
    about = "Assess how hard a business problem is via the talos reasoning agents"
)]
pub struct HardnessArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(about = "Run the full reasoning chain and print the hardness assessment")]
    Analyze {
        #[arg(short, long, help = "Account the problem belongs to")]
        account: String,

        #[arg(
            short,
            long,
            help = "Industry (only honored for accounts without a fixed industry)"
        )]
        industry: Option<String>,

        #[arg(short, long, help = "The business problem statement")]
        problem: Option<String>,

        #[arg(
            long,
            value_name = "FILE",
            conflicts_with = "problem",
            help = "Read the problem statement from a file"
        )]
        problem_file: Option<String>,

        #[arg(long, help = "Print raw response text instead of rendered HTML")]
        raw: bool,
    },

    #[command(about = "Run a single stage against a problem statement")]
    Stage {
        #[arg(help = "Stage name (see `hardness stages`)")]
        name: String,

        #[arg(short, long, help = "The business problem statement")]
        problem: String,

        #[arg(
            long,
            value_name = "FILE",
            help = "File holding a prior vocabulary output to feed the prompt"
        )]
        vocabulary_file: Option<String>,

        #[arg(
            long,
            value_name = "FILE",
            help = "File holding a prior current-system output to feed the prompt"
        )]
        current_system_file: Option<String>,

        #[arg(long, value_name = "URL", help = "Override the stage endpoint")]
        endpoint: Option<String>,

        #[arg(long, help = "Print raw response text instead of rendered HTML")]
        raw: bool,
    },

    #[command(about = "List the stages of the reasoning chain in order")]
    Stages,

    #[command(about = "Record feedback about an agent's output")]
    Feedback {
        #[arg(long, help = "Employee id of the person giving feedback")]
        employee_id: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(
            long,
            value_name = "TYPE",
            help = "One of: positive, content_issue, suggestion"
        )]
        feedback_type: String,

        #[arg(long, help = "Free-text feedback", default_value = "")]
        comment: String,

        #[arg(long, help = "Definitions that looked off", default_value = "")]
        off_definitions: String,

        #[arg(long, help = "Feature suggestions", default_value = "")]
        suggestions: String,

        #[arg(long, default_value = "")]
        account: String,

        #[arg(long, default_value = "")]
        industry: String,

        #[arg(long, default_value = "")]
        problem: String,

        #[arg(long, help = "Stage the feedback is about", default_value = "")]
        agent: String,
    },

    #[command(about = "Password-gated feedback administration")]
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    #[command(about = "List recorded feedback")]
    List {
        #[arg(long, help = "Only rows for this agent")]
        agent: Option<String>,

        #[arg(long, value_name = "TYPE", help = "Only rows of this feedback type")]
        feedback_type: Option<String>,
    },

    #[command(about = "Export all feedback to a CSV file")]
    Export {
        #[arg(
            short,
            long,
            value_name = "FILE",
            help = "Output path (defaults to a dated filename)"
        )]
        output: Option<String>,
    },

    #[command(about = "Delete every feedback row, keeping the column schema")]
    Reset {
        #[arg(long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}
