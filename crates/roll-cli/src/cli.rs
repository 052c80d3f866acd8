//! Command-line interface definition.

use clap::{Parser, Subcommand, ValueEnum};

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "rlc", version, about = "Rollcall: section roster & attendance administration")]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Database path (overrides configuration)
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Actor recorded as `performed_by` on mutations
    #[arg(long, global = true)]
    pub actor: Option<String>,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage sections
    #[command(subcommand)]
    Section(SectionCommand),

    /// Manage the mirrored student directory
    #[command(subcommand)]
    Student(StudentCommand),

    /// Enroll one student into a section
    Enroll {
        section_id: String,
        student_id: String,
    },

    /// Enroll a batch of student identifiers (free text or a file)
    BulkEnroll {
        section_id: String,
        /// Newline/comma-separated identifiers; omit to read --file
        #[arg(long, conflicts_with = "file")]
        ids: Option<String>,
        /// File containing identifiers
        #[arg(long)]
        file: Option<String>,
    },

    /// Enroll from a roster CSV with username/email/full_name columns
    Upload {
        section_id: String,
        file: String,
    },

    /// Remove a student from a section's roster
    Remove {
        section_id: String,
        student_id: String,
        /// Reason recorded in the audit log
        #[arg(long)]
        reason: Option<String>,
    },

    /// Show the active roster of a section
    Roster {
        section_id: String,
        /// Show joined directory records instead of enrollment rows
        #[arg(long)]
        students: bool,
    },

    /// Mark or inspect attendance
    #[command(subcommand)]
    Attendance(AttendanceCommand),

    /// Show the audit history of a section
    Audit {
        section_id: String,
        #[arg(long, default_value_t = 100)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
}

#[derive(Debug, Subcommand)]
pub enum SectionCommand {
    /// Create a section
    Create {
        name: String,
        #[arg(long)]
        class_name: Option<String>,
        #[arg(long)]
        teacher_id: String,
    },
    /// List sections
    List,
    /// Show one section with its roster cardinality
    Show { section_id: String },
}

#[derive(Debug, Subcommand)]
pub enum StudentCommand {
    /// Add or update one directory record
    Add {
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        department: Option<String>,
    },
    /// List directory records
    List,
}

#[derive(Debug, Subcommand)]
pub enum AttendanceCommand {
    /// Mark attendance for a day: `rlc attendance mark SEC 2026-03-02 s1=present s2=late`
    Mark {
        section_id: String,
        /// Calendar day (YYYY-MM-DD)
        date: String,
        /// One `student=status` pair per roster member; status defaults to
        /// present when the `=status` part is omitted
        marks: Vec<String>,
    },
    /// Show the records for one day
    Show {
        section_id: String,
        date: String,
    },
    /// Show aggregate statistics
    Stats {
        section_id: String,
        #[arg(long)]
        student: Option<String>,
    },
}
