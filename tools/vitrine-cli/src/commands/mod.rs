//! CLI command implementations.

pub mod cep;
pub mod config;
pub mod page;

use clap::{Args, Subcommand, ValueEnum};

/// Arguments for the cep command.
#[derive(Args)]
pub struct CepArgs {
    #[command(subcommand)]
    pub command: CepCommand,
}

#[derive(Subcommand)]
pub enum CepCommand {
    /// Normalize a CEP the way the input field does.
    Format {
        /// Raw input, e.g. "01310100".
        input: String,
    },
    /// Resolve a CEP to an address and show shipping estimates.
    Lookup {
        /// CEP with or without the dash.
        cep: String,
    },
}

/// Arguments for the page command.
#[derive(Args)]
pub struct PageArgs {
    #[command(subcommand)]
    pub command: PageCommand,
}

#[derive(Subcommand)]
pub enum PageCommand {
    /// Show the current selection.
    Show {
        /// Print the rendered HTML instead of a summary.
        #[arg(long)]
        html: bool,

        /// Write the HTML to a file.
        #[arg(short, long, requires = "html")]
        output: Option<String>,

        /// Render with the full-screen gallery open.
        #[arg(long)]
        gallery: bool,
    },
    /// Move through the gallery: `next`, `prev` or an index.
    Image {
        /// `next`, `prev` or a zero-based index.
        target: String,
    },
    /// Select a size (prompts when omitted).
    Size {
        size: Option<String>,
    },
    /// Select a color (prompts when omitted).
    Color {
        color: Option<String>,
    },
    /// Change the quantity.
    Qty {
        #[arg(value_enum)]
        step: QtyStep,
    },
    /// Toggle the favorite flag.
    Favorite,
    /// Type a CEP into the shipping field.
    Cep {
        /// CEP input; non-digits are dropped.
        value: String,

        /// Look the CEP up after entering it.
        #[arg(long)]
        lookup: bool,
    },
    /// Forget the saved selection.
    Reset {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Quantity stepper buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum QtyStep {
    /// Add one.
    Inc,
    /// Remove one, never below 1.
    Dec,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
