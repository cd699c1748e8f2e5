//! Command-line surface
//!
//! Every connection flag can also come from the environment (or a `.env`
//! file), so `helpdesk templates list` works with no arguments once
//! `HELPDESK_API_URL` is set.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "helpdesk")]
#[command(about = "Help-desk form builder, renderer and submission viewer")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Directory for a daily rolling log file
    #[arg(long, env = "HELPDESK_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// Debug logging for the client crates
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Overrides for [`helpdesk_client::ClientConfig`]
#[derive(Debug, Clone, Default, Args)]
pub struct ConnectionArgs {
    /// REST API base URL
    #[arg(long, env = "HELPDESK_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "HELPDESK_TIMEOUT_SECS", global = true)]
    pub timeout: Option<u64>,

    /// Base URL used to build shareable form links
    #[arg(long, env = "HELPDESK_FORM_URL", global = true)]
    pub form_url: Option<String>,

    /// Inventory service base URL
    #[arg(long, env = "HELPDESK_INVENTORY_URL", global = true)]
    pub inventory_url: Option<String>,

    /// Prefix for asset edit links
    #[arg(long, env = "HELPDESK_ASSET_EDIT_URL", global = true)]
    pub asset_edit_url: Option<String>,

    /// Where the session file is kept
    #[arg(long, env = "HELPDESK_HOME", global = true)]
    pub home: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "HELPDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Template builder and editor
    #[command(subcommand)]
    Templates(TemplateCommand),
    /// Fill in a template and submit it
    Fill {
        template_id: i64,
        /// LABEL_OR_ID=VALUE, repeatable
        #[arg(long = "set", value_name = "LABEL_OR_ID=VALUE")]
        values: Vec<String>,
    },
    /// Show the submissions of a template as a table
    Submissions {
        template_id: i64,
        /// Print the raw submissions as JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Update the work-order fields of a submission
    WorkOrder(WorkOrderArgs),
    /// Show a ticket with its replies
    Ticket {
        id: i64,
        /// Post this reply first
        #[arg(long)]
        reply: Option<String>,
    },
    /// List technicians (requires a session)
    Tecnicos,
    /// List ticket categories
    Categorias,
    /// List inventory assets
    Assets,
}

#[derive(Debug, Subcommand)]
pub enum TemplateCommand {
    /// List templates
    List,
    /// Show one template with its fields
    Show { id: i64 },
    /// Build a new template
    Create {
        #[arg(long)]
        name: String,
        /// type:label[=default][|opt1,opt2], repeatable, in order
        #[arg(long = "field", value_name = "SPEC")]
        fields: Vec<String>,
        /// Print the preview JSON instead of saving
        #[arg(long)]
        preview: bool,
    },
    /// Edit an existing template and replace it on the server
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        /// Append a field: type:label[=default][|opt1,opt2]
        #[arg(long = "add", value_name = "SPEC")]
        add: Vec<String>,
        /// Remove a field by id
        #[arg(long = "remove", value_name = "ID")]
        remove: Vec<String>,
        /// Move a field before the given index
        #[arg(long = "move", value_name = "ID:INDEX")]
        moves: Vec<String>,
        /// Relabel a field
        #[arg(long = "label", value_name = "ID=TEXT")]
        labels: Vec<String>,
    },
}

#[derive(Debug, Args)]
pub struct WorkOrderArgs {
    pub submission_id: i64,
    #[arg(long)]
    pub tecnico: Option<String>,
    /// abierto, en_proceso, cerrado
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub serial: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long = "tipo")]
    pub tipo_mantenimiento: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_template_create() {
        let cli = Cli::try_parse_from([
            "helpdesk",
            "--api-url",
            "http://api.local",
            "templates",
            "create",
            "--name",
            "Intake",
            "--field",
            "text:Name",
            "--field",
            "select:Prioridad|Alta,Baja",
        ])
        .unwrap();
        assert_eq!(cli.connection.api_url.as_deref(), Some("http://api.local"));
        match cli.command {
            Command::Templates(TemplateCommand::Create { name, fields, preview }) => {
                assert_eq!(name, "Intake");
                assert_eq!(fields.len(), 2);
                assert!(!preview);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_ticket_reply() {
        let cli = Cli::try_parse_from(["helpdesk", "ticket", "7", "--reply", "Revisado"]).unwrap();
        match cli.command {
            Command::Ticket { id, reply } => {
                assert_eq!(id, 7);
                assert_eq!(reply.as_deref(), Some("Revisado"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_work_order() {
        let cli = Cli::try_parse_from([
            "helpdesk", "work-order", "12", "--status", "cerrado", "--tipo", "preventivo",
        ])
        .unwrap();
        match cli.command {
            Command::WorkOrder(args) => {
                assert_eq!(args.submission_id, 12);
                assert_eq!(args.status.as_deref(), Some("cerrado"));
                assert_eq!(args.tipo_mantenimiento.as_deref(), Some("preventivo"));
                assert!(args.tecnico.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
