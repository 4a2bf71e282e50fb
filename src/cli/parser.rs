use clap::{Parser, Subcommand, ValueEnum};

/// Command-line interface definition for rTimesheet
/// Offline tooling around the timesheet draft & submission engine
#[derive(Parser)]
#[command(
    name = "rtimesheet",
    version = env!("CARGO_PKG_VERSION"),
    about = "Timesheet drafts and submissions: time slots, editable dates and payload previews",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PreviewKind {
    Draft,
    Submit,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the configuration file with default values
    Init {
        #[arg(long, help = "Overwrite an existing configuration file")]
        force: bool,
    },

    /// Show the configuration
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "path", help = "Print the configuration file path")]
        path: bool,
    },

    /// List the selectable time slots
    Slots {
        #[arg(long, help = "Slot granularity in minutes (default from config)")]
        step: Option<u32>,
    },

    /// Tell whether a date can still be edited
    Check {
        /// Date to check (YYYY-MM-DD)
        date: String,

        #[arg(long, help = "Pretend today is this date (YYYY-MM-DD)")]
        today: Option<String>,

        #[arg(
            long,
            value_delimiter = ',',
            help = "Dates already submitted, comma separated (YYYY-MM-DD,...)"
        )]
        uploaded: Vec<String>,
    },

    /// Run a draft save or submit offline and print the multipart body
    Preview {
        #[arg(value_enum)]
        kind: PreviewKind,

        #[arg(long, help = "Cursor date (YYYY-MM-DD, default today)")]
        cursor: Option<String>,

        #[arg(
            long = "entry",
            help = "Day entry: DATE,TIME_IN,TIME_OUT,LUNCH,HOURS (empty segments allowed)"
        )]
        entries: Vec<String>,

        #[arg(long, value_name = "FILE", help = "Attach an image file")]
        image: Option<String>,

        #[arg(long = "image-name", help = "File name sent for the image")]
        image_name: Option<String>,

        #[arg(long = "image-type", help = "MIME type sent for the image")]
        image_type: Option<String>,

        #[arg(long, help = "Fixed multipart boundary (default random)")]
        boundary: Option<String>,
    },
}
