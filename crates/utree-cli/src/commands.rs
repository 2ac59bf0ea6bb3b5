use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use colored::Colorize;
use tracing::debug;
use utree_model::{InMemoryWorkspace, WorkspaceSnapshot};
use utree_store::LocalFileStore;
use utree_types::{Depth, ResourcePath};
use utree_walk::{TraversalStats, UnifiedTree, UnifiedTreeVisitor};

use crate::cli::*;
use crate::config::CliConfig;
use crate::visitors::{apply_changes, Change, PrintVisitor, RefreshVisitor, StatusVisitor, TreeLine};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::load(cli.config.as_deref())?
        .with_overrides(cli.workspace.clone(), cli.follow_symlinks);
    debug!(?config, "configuration loaded");
    match cli.command {
        Command::Init(args) => cmd_init(&config, args),
        Command::Tree(args) => cmd_tree(&config, cli.format, args),
        Command::Status(args) => cmd_status(&config, cli.format, args),
        Command::Refresh(args) => cmd_refresh(&config, cli.format, args),
    }
}

fn cmd_init(config: &CliConfig, args: InitArgs) -> anyhow::Result<()> {
    if config.workspace.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config.workspace.display()
        );
    }
    let workspace = InMemoryWorkspace::new();
    for project in &args.projects {
        let (name, path) = project
            .split_once('=')
            .with_context(|| format!("expected NAME=PATH, got {project:?}"))?;
        let location = absolute(Path::new(path))?;
        workspace
            .add_project(name, &location)
            .with_context(|| format!("cannot add project {name:?}"))?;
        println!("  {} {} → {}", "project:".green(), name.bold(), location.display());
    }
    save_workspace(&config.workspace, &workspace)?;
    println!(
        "{} Initialized workspace in {}",
        "✓".green().bold(),
        config.workspace.display().to_string().bold()
    );
    Ok(())
}

fn cmd_tree(config: &CliConfig, format: OutputFormat, args: TreeArgs) -> anyhow::Result<()> {
    let depth = args.depth.unwrap_or(config.depth);
    let (workspace, root) = match &args.dir {
        Some(dir) => scratch_workspace(dir)?,
        None => (
            load_workspace(&config.workspace)?,
            parse_root(args.resource.as_deref())?,
        ),
    };

    let mut visitor = PrintVisitor::default();
    let stats = walk(config, Arc::new(workspace), root, &mut visitor, depth)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&visitor.lines)?),
        OutputFormat::Text => {
            for line in &visitor.lines {
                print_line(line);
            }
            print_absorbed(&stats);
        }
    }
    Ok(())
}

fn cmd_status(config: &CliConfig, format: OutputFormat, args: StatusArgs) -> anyhow::Result<()> {
    let workspace = load_workspace(&config.workspace)?;
    let root = parse_root(args.resource.as_deref())?;
    let depth = args.depth.unwrap_or(config.depth);

    let mut visitor = StatusVisitor::default();
    let stats = walk(config, Arc::new(workspace), root, &mut visitor, depth)?;
    let report = visitor.report;
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    if report.is_clean() {
        println!("{} Workspace matches the disk.", "✓".green().bold());
    }
    for path in &report.untracked {
        println!("  {} {}", "untracked:".yellow(), path);
    }
    for path in &report.missing {
        println!("  {} {}", "missing:".red(), path);
    }
    for path in &report.changed {
        println!("  {} {}", "changed:".cyan(), path);
    }
    print_absorbed(&stats);
    Ok(())
}

fn cmd_refresh(config: &CliConfig, format: OutputFormat, args: RefreshArgs) -> anyhow::Result<()> {
    let workspace = Arc::new(load_workspace(&config.workspace)?);
    let root = parse_root(args.resource.as_deref())?;

    let mut visitor = RefreshVisitor::default();
    let stats = walk(config, workspace.clone(), root, &mut visitor, Depth::Infinite)?;
    let changes = visitor.changes;

    if format == OutputFormat::Text {
        for change in &changes {
            match change {
                Change::Add { path, kind } => println!("  {} {} ({kind})", "add:".green(), path),
                Change::Remove { path } => println!("  {} {}", "remove:".red(), path),
                Change::Replace { path, kind } => {
                    println!("  {} {} ({kind})", "replace:".cyan(), path)
                }
            }
        }
        print_absorbed(&stats);
    }
    if args.dry_run {
        println!("{} change(s) not saved (dry run).", changes.len());
        return Ok(());
    }

    // Unknown children were marked known during the walk, so save even when
    // nothing else changed.
    let applied = apply_changes(&workspace, &changes);
    save_workspace(&config.workspace, &workspace)?;
    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({ "planned": changes.len(), "applied": applied })
        ),
        OutputFormat::Text => println!(
            "{} Applied {} of {} change(s).",
            "✓".green().bold(),
            applied,
            changes.len()
        ),
    }
    Ok(())
}

fn walk<V: UnifiedTreeVisitor>(
    config: &CliConfig,
    workspace: Arc<InMemoryWorkspace>,
    root: ResourcePath,
    visitor: &mut V,
    depth: Depth,
) -> anyhow::Result<TraversalStats> {
    let store = LocalFileStore::new().with_follow_symlinks(config.follow_symlinks);
    let mut tree = UnifiedTree::new(workspace, Arc::new(store)).with_root(root.clone());
    tree.accept(visitor, depth)
        .with_context(|| format!("traversal of {root} failed"))
}

fn print_line(line: &TreeLine) {
    let indent = "  ".repeat(line.level as usize);
    let name = if line.level == 0 { line.path.as_str() } else { line.name.as_str() };
    let marker = match line.origin {
        "merged" => " ".normal(),
        "disk_only" => "+".green(),
        "workspace_only" => "-".red(),
        _ => "@".cyan(),
    };
    match &line.location {
        Some(location) if line.origin == "linked" => {
            println!("{marker} {indent}{} → {}", name.bold(), location.dimmed())
        }
        _ => println!("{marker} {indent}{name}"),
    }
}

fn print_absorbed(stats: &TraversalStats) {
    let absorbed = &stats.absorbed;
    if absorbed.total() > 0 {
        eprintln!(
            "{} {} unreadable director(ies), {} failed child queries, {} unresolved link(s)",
            "warning:".yellow().bold(),
            absorbed.physical_listings,
            absorbed.children_queries,
            absorbed.unresolved_relocations
        );
    }
}

fn parse_root(resource: Option<&str>) -> anyhow::Result<ResourcePath> {
    match resource {
        Some(text) => ResourcePath::parse(text).with_context(|| format!("bad resource {text:?}")),
        None => Ok(ResourcePath::root()),
    }
}

fn absolute(path: &Path) -> anyhow::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()
        .context("cannot determine current directory")?
        .join(path))
}

/// A throwaway workspace holding `dir` as its only project, never scanned.
fn scratch_workspace(dir: &Path) -> anyhow::Result<(InMemoryWorkspace, ResourcePath)> {
    let location = absolute(dir)?;
    let name = location
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("dir")
        .to_string();
    let workspace = InMemoryWorkspace::new();
    let root = workspace
        .add_project(&name, &location)
        .with_context(|| format!("cannot walk {}", dir.display()))?;
    Ok((workspace, root))
}

pub fn load_workspace(path: &Path) -> anyhow::Result<InMemoryWorkspace> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read workspace {} (run `utree init`)", path.display()))?;
    let snapshot = WorkspaceSnapshot::from_json(&json)?;
    Ok(InMemoryWorkspace::from_snapshot(&snapshot)?)
}

pub fn save_workspace(path: &Path, workspace: &InMemoryWorkspace) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create {}", parent.display()))?;
    }
    let json = workspace.snapshot().to_json()?;
    std::fs::write(path, json).with_context(|| format!("cannot write {}", path.display()))?;
    debug!(path = %path.display(), resources = workspace.len(), "workspace saved");
    Ok(())
}
