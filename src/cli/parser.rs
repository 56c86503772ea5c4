use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for driverlog
/// Driver job-run and mileage log backed by SQLite
#[derive(Parser)]
#[command(
    name = "driverlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "A driver log CLI: record monthly job runs, vehicle mileage and driver profiles using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite an existing backup without asking")]
        force: bool,
    },

    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// List the available roles
    Role,

    /// Manage warehouses
    Warehouse {
        #[command(subcommand)]
        action: WarehouseAction,
    },

    /// Manage banks
    Bank {
        #[command(subcommand)]
        action: BankAction,
    },

    /// Show or edit the profile attached to a user
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Open a session (stored next to the database)
    Login { username: String, password: String },

    /// Close the current session
    Logout,

    /// Show the user of the current session
    Whoami,

    /// Monthly job-run sheet of the logged-in driver
    Jobrun {
        #[command(subcommand)]
        action: JobrunAction,
    },

    /// Vehicle mileage of the logged-in driver
    Mileage {
        #[command(subcommand)]
        action: MileageAction,
    },

    /// Send a raw request to a page, e.g. `request GET /job-running/?year=2024&month=02`
    Request {
        /// GET, POST, PUT, PATCH or DELETE
        method: String,

        /// Path with optional query string
        target: String,

        #[arg(long, value_name = "URLENCODED", help = "Form body (key=value&...)")]
        form: Option<String>,

        #[arg(long = "file", value_name = "FIELD=PATH", help = "Uploaded file")]
        files: Vec<String>,
    },

    /// Export job runs
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, value_name = "YYYY-MM", help = "Export only this month")]
        period: Option<String>,

        #[arg(long, help = "User to export (defaults to the logged-in user)")]
        user: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Create a user
    Add {
        username: String,

        #[arg(long)]
        password: String,

        #[arg(long, default_value = "")]
        email: String,

        #[arg(long = "first-name", default_value = "")]
        first_name: String,

        #[arg(long = "last-name", default_value = "")]
        last_name: String,

        #[arg(long, help = "driver, operator or admin")]
        role: Option<String>,
    },

    /// Create a staff user with the admin role
    Superuser {
        username: String,

        #[arg(long)]
        password: String,

        #[arg(long, default_value = "")]
        email: String,
    },

    /// List users ordered by username
    List {
        #[arg(long)]
        role: Option<String>,

        #[arg(long, help = "Match username, names or email")]
        search: Option<String>,
    },

    /// Change the role of a user ("none" removes it)
    SetRole { username: String, role: String },

    /// Change the password of a user
    Passwd { username: String, password: String },

    /// Allow a user to log in again
    Activate { username: String },

    /// Prevent a user from logging in
    Deactivate { username: String },
}

#[derive(Subcommand)]
pub enum WarehouseAction {
    Add {
        name: String,

        #[arg(long)]
        address: Option<String>,
    },
    List,
}

#[derive(Subcommand)]
pub enum BankAction {
    Add {
        code: String,

        #[arg(long = "name-th")]
        name_th: Option<String>,

        #[arg(long = "name-eng")]
        name_eng: Option<String>,
    },
    List {
        #[arg(long)]
        search: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the profile of a user
    Show { username: String },

    /// Update the profile of a user; only the given fields change
    Set {
        username: String,

        #[arg(long)]
        warehouse: Option<i64>,

        #[arg(long, value_name = "BANK_CODE")]
        bank: Option<String>,

        #[arg(long = "id-card-number")]
        id_card_number: Option<String>,

        #[arg(long = "id-card-address")]
        id_card_address: Option<String>,

        #[arg(long = "current-address")]
        current_address: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long = "bank-account")]
        bank_account: Option<String>,

        #[arg(long = "car-license")]
        car_license: Option<String>,

        #[arg(long = "id-card-image", value_name = "PATH")]
        id_card_image: Option<String>,

        #[arg(long = "driver-license", value_name = "PATH")]
        driver_license: Option<String>,

        #[arg(long = "photo-with-card", value_name = "PATH")]
        photo_with_card: Option<String>,

        #[arg(long = "profile-photo", value_name = "PATH")]
        profile_photo: Option<String>,

        #[arg(long = "office")]
        office_location: Option<String>,

        #[arg(long = "extension")]
        extension_number: Option<String>,

        #[arg(long = "admin-level")]
        admin_level: Option<String>,

        #[arg(long)]
        department: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum JobrunAction {
    /// Submit the job-run sheet of one month
    Submit {
        #[arg(long)]
        year: String,

        #[arg(long)]
        month: String,

        #[arg(
            long,
            value_name = "URLENCODED",
            help = "Form fields round_info_<day>=...&remarks_<day>=..."
        )]
        form: Option<String>,

        #[arg(
            long = "entry",
            value_name = "DAY:ROUND[:REMARKS]",
            help = "One day of the sheet, repeatable"
        )]
        entries: Vec<String>,
    },

    /// Show the job runs of one month
    List {
        #[arg(long)]
        year: Option<String>,

        #[arg(long)]
        month: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum MileageAction {
    /// Record an odometer reading for today
    Add {
        #[arg(long)]
        mile: String,

        #[arg(long = "mile-image", value_name = "PATH")]
        mile_image: Option<String>,

        #[arg(long = "front", value_name = "PATH")]
        front_image: Option<String>,

        #[arg(long = "back", value_name = "PATH")]
        back_image: Option<String>,

        #[arg(long = "left", value_name = "PATH")]
        left_image: Option<String>,

        #[arg(long = "right", value_name = "PATH")]
        right_image: Option<String>,
    },

    /// Show recorded readings
    List,
}
