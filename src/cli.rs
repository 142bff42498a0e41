use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::models::Slot;
use crate::planner::{ActivityLevel, Sex};

/// Dietary: plans a day of convenience-store meals within a calorie target and a budget.
#[derive(Parser, Debug)]
#[command(name = "dietary")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to a planner config JSON file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Recommend breakfast, lunch, and dinner from a catalog.
    Plan(PlanArgs),

    /// Show the daily intake and macro targets for a body profile.
    Targets(BodyArgs),

    /// List catalog items eligible for a slot.
    Catalog {
        /// Path to the catalog (.json or .csv).
        #[arg(long, default_value = "products.json")]
        catalog: PathBuf,

        /// Only list items from this store.
        #[arg(long)]
        store: Option<String>,

        /// Only list items usable for this slot.
        #[arg(long)]
        slot: Option<Slot>,

        /// Write the listed items to this file as JSON.
        #[arg(long)]
        export: Option<PathBuf>,
    },
}

/// Body measurements used to derive the daily intake.
#[derive(Args, Debug, Clone)]
pub struct BodyArgs {
    #[arg(long, default_value = "33")]
    pub age: u32,

    /// male or female.
    #[arg(long, default_value = "male")]
    pub sex: Sex,

    /// Height in cm.
    #[arg(long, default_value = "173")]
    pub height: f64,

    /// Current weight in kg.
    #[arg(long, default_value = "70")]
    pub weight: f64,

    /// Goal weight in kg.
    #[arg(long, default_value = "65")]
    pub goal_weight: f64,

    /// Days until the goal deadline.
    #[arg(long, default_value = "60")]
    pub days: u32,

    /// sedentary, light, moderate, active, or very-active.
    #[arg(long, default_value = "light")]
    pub activity: ActivityLevel,
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Path to the catalog (.json or .csv).
    #[arg(long, default_value = "products.json")]
    pub catalog: PathBuf,

    /// Daily budget in yen.
    #[arg(short, long, default_value = "1200")]
    pub budget: i64,

    /// Daily intake in kcal. Derived from the body profile when omitted.
    #[arg(long)]
    pub intake: Option<u32>,

    #[command(flatten)]
    pub body: BodyArgs,

    /// Store for every slot, unless overridden per slot.
    #[arg(long)]
    pub store: Option<String>,

    #[arg(long)]
    pub breakfast_store: Option<String>,

    #[arg(long)]
    pub lunch_store: Option<String>,

    #[arg(long)]
    pub dinner_store: Option<String>,

    /// Largest number of items per meal.
    #[arg(long)]
    pub max_items: Option<usize>,

    /// Ranked bundles kept per slot.
    #[arg(long)]
    pub keep_top: Option<usize>,

    /// Dinner bundles examined per breakfast/lunch pair.
    #[arg(long)]
    pub dinner_prefix: Option<usize>,

    /// Search breakfast candidates on all cores.
    #[arg(long)]
    pub parallel: bool,

    /// Stop searching after this many milliseconds and report the best plan so far.
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Stop after this many breakfast candidates and report the best plan so far.
    #[arg(long)]
    pub candidate_limit: Option<usize>,

    /// Print the plan as JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Write the plan as JSON to this file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Ask for today's weight, budget, and stores.
    #[arg(short, long)]
    pub interactive: bool,
}

impl PlanArgs {
    /// Store per slot: a per-slot flag wins over `--store`.
    pub fn slot_stores(&self) -> [Option<String>; 3] {
        let pick = |specific: &Option<String>| specific.clone().or_else(|| self.store.clone());
        [
            pick(&self.breakfast_store),
            pick(&self.lunch_store),
            pick(&self.dinner_store),
        ]
    }
}
