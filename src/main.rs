use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;

use dietary_rs::catalog::{Catalog, load_items, save_items};
use dietary_rs::cli::{BodyArgs, Cli, Command, PlanArgs};
use dietary_rs::error::{DietError, Result};
use dietary_rs::interface::{
    collect_today_inputs, display_item_list, display_plan, display_targets, prompt_yes_no,
};
use dietary_rs::models::{Item, Slot};
use dietary_rs::planner::{
    BodyProfile, Execution, IntakeEstimate, PlannerConfig, SearchControl, TargetProfile,
    calc_target_intake, plan_day,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Plan(args) => cmd_plan(args, config),
        Command::Targets(body) => cmd_targets(&body, &config),
        Command::Catalog {
            catalog,
            store,
            slot,
            export,
        } => cmd_catalog(&catalog, store.as_deref(), slot, export.as_deref()),
    }
}

fn load_config(path: Option<&Path>) -> Result<PlannerConfig> {
    match path {
        Some(path) => {
            let config = PlannerConfig::load(path)?;
            tracing::info!(path = %path.display(), "loaded planner config");
            Ok(config)
        }
        None => Ok(PlannerConfig::default()),
    }
}

fn body_profile(body: &BodyArgs) -> BodyProfile {
    BodyProfile {
        age: body.age,
        sex: body.sex,
        height_cm: body.height,
        weight_kg: body.weight,
        goal_weight_kg: body.goal_weight,
        days_to_goal: body.days,
        activity: body.activity,
    }
}

fn load_catalog(path: &Path) -> Result<Catalog> {
    let items = load_items(path)?;
    let catalog = Catalog::new(items)?;
    tracing::info!(items = catalog.len(), path = %path.display(), "loaded catalog");
    Ok(catalog)
}

/// Show intake and macro targets for a body profile.
fn cmd_targets(body: &BodyArgs, config: &PlannerConfig) -> Result<()> {
    let profile = body_profile(body);
    let estimate = calc_target_intake(&profile)?;
    let targets = TargetProfile::from_intake(estimate.intake_kcal, profile.weight_kg, config)?;
    display_targets(Some(&estimate), &targets);
    Ok(())
}

/// List items eligible for a slot (or all slots), optionally exporting them.
fn cmd_catalog(
    path: &Path,
    store: Option<&str>,
    slot: Option<Slot>,
    export: Option<&Path>,
) -> Result<()> {
    let catalog = load_catalog(path)?;
    let store = store.map(|s| catalog.resolve_store(s)).transpose()?;

    let slots = match slot {
        Some(slot) => vec![slot],
        None => Slot::ALL.to_vec(),
    };

    for slot in slots {
        let items = catalog.view(slot, store.as_deref());
        let title = match &store {
            Some(store) => format!("{} at {}", slot, store),
            None => slot.to_string(),
        };
        display_item_list(&items, &title);
    }

    if let Some(export) = export {
        let items: Vec<Item> = catalog
            .select(slot, store.as_deref())
            .into_iter()
            .cloned()
            .collect();
        save_items(export, &items)?;
        tracing::info!(items = items.len(), path = %export.display(), "exported catalog");
    }

    Ok(())
}

/// Generate a one-day plan from the catalog.
fn cmd_plan(args: PlanArgs, mut config: PlannerConfig) -> Result<()> {
    if let Some(max_items) = args.max_items {
        config.max_items = max_items;
    }
    if let Some(keep_top) = args.keep_top {
        config.keep_top = keep_top;
    }
    if let Some(prefix) = args.dinner_prefix {
        config.dinner_prefix = prefix;
    }
    if args.parallel {
        config.execution = Execution::Parallel;
    }
    config.validate()?;

    if args.budget < 0 {
        return Err(DietError::Configuration(format!(
            "budget must not be negative, got {}",
            args.budget
        )));
    }
    let mut budget = u32::try_from(args.budget)
        .map_err(|_| DietError::Configuration(format!("budget {} is too large", args.budget)))?;

    let catalog = load_catalog(&args.catalog)?;
    let mut profile = body_profile(&args.body);
    let mut stores = args.slot_stores();

    if args.interactive {
        let inputs = collect_today_inputs(&catalog.stores(), profile.weight_kg, budget)?;
        profile.weight_kg = inputs.weight_kg;
        budget = inputs.budget;
        stores = inputs.stores.map(Some);
    }

    let (estimate, intake): (Option<IntakeEstimate>, u32) = match args.intake {
        Some(intake) => (None, intake),
        None => {
            let estimate = calc_target_intake(&profile)?;
            (Some(estimate), estimate.intake_kcal)
        }
    };
    let targets = TargetProfile::from_intake(intake, profile.weight_kg, &config)?;
    if !args.json {
        display_targets(estimate.as_ref(), &targets);
    }

    let resolved: Vec<Option<String>> = stores
        .iter()
        .map(|s| s.as_deref().map(|s| catalog.resolve_store(s)).transpose())
        .collect::<Result<_>>()?;
    let views = catalog.slot_views([
        resolved[0].as_deref(),
        resolved[1].as_deref(),
        resolved[2].as_deref(),
    ]);

    let mut control = match args.timeout_ms {
        Some(ms) => SearchControl::with_timeout(Duration::from_millis(ms)),
        None => SearchControl::new(),
    };
    if let Some(limit) = args.candidate_limit {
        control = control.with_candidate_limit(limit);
    }

    let outcome = plan_day(&views, &targets, budget, &config, &control)?;

    if !outcome.complete {
        eprintln!("Search stopped early; showing the best plan found in time.");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.plan)?);
    } else {
        display_plan(&outcome.plan, &targets, budget);
    }

    let output = match args.output {
        Some(path) => Some(path),
        None if args.interactive && prompt_yes_no("Save this plan to plan.json?", false)? => {
            Some(PathBuf::from("plan.json"))
        }
        None => None,
    };
    if let Some(path) = output {
        fs::write(&path, serde_json::to_string_pretty(&outcome.plan)?)?;
        eprintln!("Plan saved to {}", path.display());
    }

    Ok(())
}
