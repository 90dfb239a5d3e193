//! blocksmith's command line entry point.
//! Resolves a block description against a project and prints the resulting
//! generation plan as JSON.

use anyhow::Context;
use blocksmith::{
    cli::{get_args, Args},
    definition::{BlockDefinition, Description},
    error::default_error_handler,
    logger::init_logger,
    plan::BlockPlan,
    workspace::Workspace,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(format!("{err:#}"));
    }
}

/// # Flow
/// 1. Loads the project configuration and builds the workspace
/// 2. Reads the description file
/// 3. Resolves the block, its templates and its nested classes
/// 4. Prints the plan
fn run(args: Args) -> anyhow::Result<()> {
    let workspace = Workspace::load(&args.project_dir).with_context(|| {
        format!("Failed to load project '{}'", args.project_dir.display())
    })?;

    let content = std::fs::read_to_string(&args.description).with_context(|| {
        format!("Failed to read description '{}'", args.description.display())
    })?;
    let description: Description = content.parse()?;
    log::debug!("Resolving block '{}'", description.name);

    let mut definition = BlockDefinition::new(&workspace, description)?;
    let plan = BlockPlan::build(&mut definition)?;

    let output = if args.compact {
        serde_json::to_string(&plan)?
    } else {
        serde_json::to_string_pretty(&plan)?
    };
    println!("{output}");
    Ok(())
}
