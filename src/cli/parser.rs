use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for polierlog
/// Site diary for paving crews, backed by a local SQLite file
#[derive(Parser)]
#[command(
    name = "polierlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "A local site diary: asphalt deliveries, materials, worker hours, vehicle trips and reports using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show or edit the configuration file
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Editor to use with --edit")]
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

        #[arg(long = "limit", help = "Only the newest N rows")]
        limit: Option<usize>,
    },

    /// Construction sites
    Project {
        #[command(subcommand)]
        action: ProjectCmd,
    },

    /// Asphalt deliveries (Lieferschein)
    Asphalt {
        #[command(subcommand)]
        action: AsphaltCmd,
    },

    /// Length-based work items (running meters)
    Material {
        #[command(subcommand)]
        action: MaterialCmd,
    },

    /// Crew roster
    Worker {
        #[command(subcommand)]
        action: WorkerCmd,
    },

    /// Daily worker hours
    Hours {
        #[command(subcommand)]
        action: HoursCmd,
    },

    /// Company vehicles
    Vehicle {
        #[command(subcommand)]
        action: VehicleCmd,
    },

    /// Vehicle log entries
    Trip {
        #[command(subcommand)]
        action: TripCmd,
    },

    /// Priced material catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogCmd,
    },

    /// Catalog material consumption
    Usage {
        #[command(subcommand)]
        action: UsageCmd,
    },

    /// Calculators (nothing is stored)
    Calc {
        #[command(subcommand)]
        action: CalcCmd,
    },

    /// Export a report for the active project
    Export {
        #[arg(
            long,
            default_value = "today",
            help = "today, yesterday, week, YYYY, YYYY-MM, YYYY-MM-DD or FROM:TO"
        )]
        range: String,

        #[arg(
            long,
            help = "Comma separated: asphalt,materials,usage,hours,vehicle (default: all)"
        )]
        sections: Option<String>,

        #[arg(long, value_enum, default_value = "pdf")]
        format: ExportFormat,

        #[arg(long, help = "Output directory (default: export_dir from the config)")]
        out: Option<String>,

        #[arg(long, help = "Overwrite an existing file without asking")]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum ProjectCmd {
    /// Create a project
    Add {
        name: String,
        #[arg(long)]
        location: Option<String>,
        #[arg(long, help = "Start date (YYYY-MM-DD)")]
        start: Option<String>,
        #[arg(long, help = "End date (YYYY-MM-DD)")]
        end: Option<String>,
        #[arg(long, help = "Make it the active project")]
        activate: bool,
    },
    /// List projects, newest first
    List,
    /// Select the active project
    Activate { id: String },
    /// Change fields; an empty value clears an optional field
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
    /// Delete a project without records
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum AsphaltCmd {
    /// Record a delivery
    Add {
        #[arg(help = "Delivery note number")]
        note: String,
        #[arg(help = "Mix class, e.g. \"AC 11 D S\", SMA11, Binder")]
        class: String,
        tons: f64,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        driver: Option<String>,
        #[arg(long, help = "Truck registration, e.g. M-AB 1234")]
        truck: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long, help = "Photo reference")]
        photo: Option<String>,
    },
    /// Deliveries of one day, latest first
    List {
        #[arg(long)]
        date: Option<String>,
    },
    /// Change fields; an empty value clears an optional field
    Update {
        id: String,
        #[arg(long)]
        note: Option<String>,
        #[arg(long)]
        class: Option<String>,
        #[arg(long)]
        tons: Option<f64>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        driver: Option<String>,
        #[arg(long)]
        truck: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum MaterialCmd {
    /// Record a work item by length or by chainage
    Add {
        #[arg(help = "Fugenmasse, TackCoat, Primer or Other")]
        kind: String,
        #[arg(long, conflicts_with_all = ["from", "to"])]
        meters: Option<f64>,
        #[arg(long, requires = "to", help = "Start chainage, e.g. 0+450")]
        from: Option<String>,
        #[arg(long, requires = "from", help = "End chainage, e.g. 1+200")]
        to: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    List {
        #[arg(long)]
        date: Option<String>,
    },
    Update {
        id: String,
        #[arg(long)]
        kind: Option<String>,
        #[arg(long)]
        meters: Option<f64>,
        #[arg(long)]
        notes: Option<String>,
    },
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum WorkerCmd {
    Add { first_name: String, last_name: String },
    /// Active roster (add --all for everyone)
    List {
        #[arg(long)]
        all: bool,
    },
    Update {
        id: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
    },
    /// Put a worker back on the roster
    Activate { id: String },
    /// Take a worker off the roster
    Deactivate { id: String },
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum HoursCmd {
    /// Record (or replace) the day of one worker
    Set {
        worker: String,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long = "break", help = "Break in hours, e.g. 0.5")]
        break_hours: Option<f64>,
        #[arg(long, default_value = "present", help = "present, vacation, sick or absent")]
        status: String,
        #[arg(long)]
        overtime: bool,
        #[arg(long)]
        notes: Option<String>,
    },
    List {
        #[arg(long)]
        date: Option<String>,
    },
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum VehicleCmd {
    Add {
        make: String,
        model: String,
        registration: String,
        #[arg(long, default_value_t = 0.0)]
        odometer: f64,
        #[arg(long, help = "Make it the active vehicle")]
        activate: bool,
    },
    List,
    Activate { id: String },
    Update {
        id: String,
        #[arg(long)]
        make: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        registration: Option<String>,
    },
    /// Correct the stored odometer reading
    Odometer { id: String, value: f64 },
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum TripCmd {
    /// Record a trip with the active vehicle
    Add {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long = "end-km", help = "Odometer at arrival")]
        end_odometer: f64,
        #[arg(long = "start-km", help = "Odometer at departure (default: last reading)")]
        start_odometer: Option<f64>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long, default_value = "Drive to site")]
        purpose: String,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long, help = "Vehicle id (default: active vehicle)")]
        vehicle: Option<String>,
    },
    List {
        #[arg(long)]
        date: Option<String>,
    },
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum CatalogCmd {
    Add {
        name: String,
        #[arg(help = "m2, mb or t")]
        unit: String,
        price: f64,
        #[arg(long, help = "t/m³, only for materials priced per ton")]
        density: Option<f64>,
        #[arg(long)]
        category: Option<String>,
    },
    List,
    /// Change fields; an empty value clears density or category
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        unit: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        density: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum UsageCmd {
    /// Record consumption of a catalog material
    Add {
        material: String,
        quantity: f64,
        #[arg(long, help = "Layer thickness in cm (per-ton materials with density)")]
        thickness: Option<f64>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    List {
        #[arg(long)]
        date: Option<String>,
    },
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum CalcCmd {
    /// Asphalt tonnage for a paved area
    Paving {
        length: f64,
        width: f64,
        #[arg(help = "Thickness in cm")]
        thickness: f64,
        #[arg(long, help = "t/m³ (default from config)")]
        density: Option<f64>,
    },
    /// Meters between two chainage points
    Chainage { from: String, to: String },
    /// Net hours of a shift
    Hours {
        start: String,
        end: String,
        #[arg(long = "break", default_value_t = 0.5)]
        break_hours: f64,
    },
    /// Quantity and cost for a catalog material
    Usage {
        material: String,
        quantity: f64,
        #[arg(long)]
        thickness: Option<f64>,
    },
}
