//! Command dispatch: one handler per subcommand.

use std::thread;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::application::services::Workbench;
use crate::cli::args::{Cli, Commands, ConfigCommands, SnapshotCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::global_config_path;
use crate::domain::{
    Algorithm, Replay, SearchMode, Side, Snapshot, SnapshotUpdate, Step, Traversal,
    TreeNodeConvert,
};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    let ctx = Context::new(cli, container);
    match &cli.command {
        Some(Commands::Insert { values }) => _insert(&ctx, values),
        Some(Commands::InsertManual {
            value,
            parent,
            side,
        }) => _insert_manual(&ctx, *value, *parent, *side),
        Some(Commands::Delete { value }) => _delete(&ctx, *value),
        Some(Commands::Clear) => _clear(&ctx),
        Some(Commands::Search { value, mode }) => _search(&ctx, *value, *mode),
        Some(Commands::Traverse { order }) => _traverse(&ctx, *order),
        Some(Commands::Stats) => _stats(&ctx),
        Some(Commands::Show) => _show(&ctx),
        Some(Commands::Parents) => _parents(&ctx),
        Some(Commands::Snapshots { command }) => _snapshots(&ctx, command),
        Some(Commands::Config { command }) => _config(&ctx, command),
        None => Ok(()),
    }
}

/// Per-invocation view of the global flags and services.
struct Context<'a> {
    container: &'a ServiceContainer,
    snapshot: &'a str,
    json: bool,
    delay: Duration,
}

impl<'a> Context<'a> {
    fn new(cli: &'a Cli, container: &'a ServiceContainer) -> Self {
        let snapshot = cli
            .snapshot
            .as_deref()
            .unwrap_or(&container.settings.default_snapshot);
        let delay_ms = cli.delay_ms.unwrap_or(container.settings.step_delay_ms);
        Self {
            container,
            snapshot,
            json: cli.json,
            delay: Duration::from_millis(delay_ms),
        }
    }

    fn user_id(&self) -> &str {
        self.container.workbench.user_id()
    }

    fn open(&self) -> CliResult<Workbench> {
        Ok(self.container.workbench.open(self.snapshot)?)
    }

    /// Whether the working tree has nodes; warns when it does not.
    fn has_nodes(&self) -> CliResult<bool> {
        if self.open()?.tree.is_empty() {
            output::warning("Tree is empty. Add some nodes first.");
            return Ok(false);
        }
        Ok(true)
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(InfraError::from)?;
    output::info(&json);
    Ok(())
}

/// Print every step, pausing between ticks.
fn replay(steps: &[Step], delay: Duration) {
    let mut ticks = Replay::new(steps).peekable();
    while let Some(frame) = ticks.next() {
        output::frame(&frame);
        if !delay.is_zero() && ticks.peek().is_some() {
            thread::sleep(delay);
        }
    }
}

fn draw(bench: &Workbench) {
    output::info(&bench.tree.to_tree_string());
}

#[instrument(skip(ctx))]
fn _insert(ctx: &Context, values: &[i64]) -> CliResult<()> {
    let bench = ctx.container.workbench.insert(ctx.snapshot, values)?;
    if ctx.json {
        return print_json(&bench.tree);
    }
    output::success(&format!(
        "Inserted {} into '{}'",
        output::arrow_join(values),
        bench.name
    ));
    draw(&bench);
    Ok(())
}

#[instrument(skip(ctx))]
fn _insert_manual(ctx: &Context, value: i64, parent: i64, side: Side) -> CliResult<()> {
    let bench = ctx
        .container
        .workbench
        .insert_manual(ctx.snapshot, value, parent, side)?;
    if ctx.json {
        return print_json(&bench.tree);
    }
    if bench.tree.root().is_some_and(|root| root.value == value && root.is_leaf()) {
        output::success(&format!("Inserted {} as root", value));
    } else {
        output::success(&format!("Inserted {} as {} child of {}", value, side, parent));
    }
    draw(&bench);
    Ok(())
}

#[instrument(skip(ctx))]
fn _delete(ctx: &Context, value: i64) -> CliResult<()> {
    let bench = ctx.container.workbench.delete(ctx.snapshot, value)?;
    if ctx.json {
        return print_json(&bench.tree);
    }
    output::success(&format!("Deleted {} from '{}'", value, bench.name));
    draw(&bench);
    Ok(())
}

#[instrument(skip(ctx))]
fn _clear(ctx: &Context) -> CliResult<()> {
    let bench = ctx.container.workbench.clear(ctx.snapshot)?;
    output::success(&format!("Cleared '{}'", bench.name));
    Ok(())
}

#[instrument(skip(ctx))]
fn _search(ctx: &Context, value: i64, mode: Option<SearchMode>) -> CliResult<()> {
    if !ctx.has_nodes()? {
        return Ok(());
    }
    let mode = mode.unwrap_or(ctx.container.settings.search_mode);
    let (_, result) = ctx.container.workbench.search(ctx.snapshot, value, mode)?;
    debug!("{} search for {}: found={}", mode, value, result.found);

    if ctx.json {
        return print_json(&result);
    }

    output::header(&format!("{} search for {}", mode, value));
    replay(&result.steps, ctx.delay);
    if result.found {
        output::success(&format!(
            "Found {}: {} ({} nodes visited)",
            value,
            output::arrow_join(&result.path),
            result.visited_count()
        ));
    } else {
        output::failure(&format!(
            "{} not found in tree ({} nodes visited)",
            value,
            result.visited_count()
        ));
    }
    Ok(())
}

#[instrument(skip(ctx))]
fn _traverse(ctx: &Context, order: Traversal) -> CliResult<()> {
    if !ctx.has_nodes()? {
        return Ok(());
    }
    let (_, result) = ctx.container.workbench.traverse(ctx.snapshot, order)?;

    if ctx.json {
        return print_json(&result);
    }

    let label = Algorithm::from(order).label();
    output::header(label);
    replay(&result.steps, ctx.delay);
    output::success(&format!(
        "{} completed: {}",
        label,
        output::arrow_join(&result.values)
    ));
    Ok(())
}

#[instrument(skip(ctx))]
fn _stats(ctx: &Context) -> CliResult<()> {
    let bench = ctx.open()?;
    let stats = bench.tree.stats();
    if ctx.json {
        return print_json(&stats);
    }
    let yes_no = |flag: bool| if flag { "yes" } else { "no" };
    output::header(&format!("Stats for '{}'", bench.name));
    output::detail(&format!("height:     {}", stats.height));
    output::detail(&format!("nodes:      {}", stats.node_count));
    output::detail(&format!("leaves:     {}", stats.leaf_count));
    output::detail(&format!("balanced:   {}", yes_no(stats.is_balanced)));
    output::detail(&format!("valid BST:  {}", yes_no(stats.is_valid_bst)));
    Ok(())
}

#[instrument(skip(ctx))]
fn _show(ctx: &Context) -> CliResult<()> {
    let bench = ctx.open()?;
    if ctx.json {
        return print_json(&bench.tree);
    }
    match &bench.snapshot {
        Some(snapshot) => output::header(&format!("{} ({})", snapshot.name, snapshot.id)),
        None => output::header(&format!("{} (not saved)", bench.name)),
    }
    draw(&bench);
    Ok(())
}

#[instrument(skip(ctx))]
fn _parents(ctx: &Context) -> CliResult<()> {
    let bench = ctx.open()?;
    let parents = bench.tree.available_parents();
    if ctx.json {
        return print_json(&parents);
    }
    if parents.is_empty() {
        output::info("Empty tree: the next manual insert becomes the root");
        return Ok(());
    }
    let slot = |free: bool| if free { "free" } else { "taken" };
    for parent in &parents {
        output::info(&format!(
            "{:>6}   left: {:<5}  right: {}",
            parent.value,
            slot(parent.can_insert_left),
            slot(parent.can_insert_right)
        ));
    }
    Ok(())
}

fn _snapshots(ctx: &Context, command: &SnapshotCommands) -> CliResult<()> {
    let service = &ctx.container.snapshots;
    match command {
        SnapshotCommands::List => {
            let snapshots = service.list(ctx.user_id())?;
            if ctx.json {
                return print_json(&snapshots);
            }
            if snapshots.is_empty() {
                output::info(&format!(
                    "No snapshots in {}",
                    service.store_dir().display()
                ));
            }
            for snapshot in &snapshots {
                output::info(&summary(snapshot));
            }
            Ok(())
        }
        SnapshotCommands::Show { key } => {
            let snapshot = service.resolve(ctx.user_id(), key)?;
            if ctx.json {
                return print_json(&snapshot);
            }
            output::header(&summary(&snapshot));
            output::info(&snapshot.tree_data.to_tree_string());
            Ok(())
        }
        SnapshotCommands::Rename { key, name } => {
            let snapshot = service.resolve(ctx.user_id(), key)?;
            let renamed = service.update(&snapshot.id, SnapshotUpdate::rename(name.as_str()))?;
            output::success(&format!("Renamed '{}' to '{}'", snapshot.name, renamed.name));
            Ok(())
        }
        SnapshotCommands::Delete { key } => {
            let snapshot = service.resolve(ctx.user_id(), key)?;
            service.delete(&snapshot.id)?;
            output::success(&format!("Deleted '{}' ({})", snapshot.name, snapshot.id));
            Ok(())
        }
        SnapshotCommands::Purge => {
            let removed = service.delete_all(ctx.user_id())?;
            output::success(&format!("Deleted {} snapshot(s)", removed));
            Ok(())
        }
    }
}

fn summary(snapshot: &Snapshot) -> String {
    format!(
        "{}  {:<20} {:<10} {:>4} nodes  {}",
        snapshot.id,
        snapshot.name,
        snapshot.algorithm.to_string(),
        snapshot.tree_data.stats().node_count,
        snapshot.updated_at.format("%Y-%m-%d %H:%M:%S")
    )
}

fn _config(ctx: &Context, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let toml = ctx.container.settings.to_toml()?;
            output::info(toml.trim_end());
            Ok(())
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => {
                output::info(&path.display());
                Ok(())
            }
            None => Err(CliError::Usage(
                "cannot determine a config directory for this platform".to_string(),
            )),
        },
    }
}
