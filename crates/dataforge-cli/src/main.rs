//! DataForge CLI - Project scaffolding for data engineering pipelines

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dataforge_core::archive::validate_project_name;
use dataforge_core::catalog::tools_in;
use dataforge_core::tui::CreateArgs;
use dataforge_core::{
    find_template, generate, load_base_config, render_tree, Action, ExportFormat, ProjectConfig,
    ToolCategory, TEMPLATES,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dataforge")]
#[command(about = "CLI for scaffolding data engineering pipeline projects")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configure a stack and export the project skeleton
    Create(CliCreateArgs),
    /// Print the file tree a configuration would generate
    Tree(TreeArgs),
    /// Print the resolved configuration as YAML, reusable with --config
    Config(SelectionArgs),
    /// List the predefined project templates
    Templates,
    /// List the tool catalog grouped by pipeline stage
    Tools,
}

/// Flags shared by every command that builds a configuration
#[derive(Parser, Debug)]
pub struct SelectionArgs {
    /// YAML configuration file to start from (defaults to $DATAFORGE_CONFIG)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Template to apply (lakehouse, streaming, mds, local-analytics)
    #[arg(short, long)]
    pub template: Option<String>,

    /// Project name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Project description
    #[arg(long)]
    pub description: Option<String>,

    /// Project author
    #[arg(long)]
    pub author: Option<String>,

    /// Tool per stage (comma-separated: ingestion=airbyte,transformation=dbt)
    #[arg(long = "tool", value_delimiter = ',', value_parser = parse_tool)]
    pub tools: Vec<(ToolCategory, String)>,
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Directory to write the archive or project folder into
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the files into a directory instead of a zip archive
    #[arg(long)]
    pub dir: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            config_file: args.selection.config,
            template: args.selection.template,
            project_name: args.selection.name,
            description: args.selection.description,
            author: args.selection.author,
            tools: args.selection.tools,
            output_dir: args.output,
            format: args.dir.then_some(ExportFormat::Directory),
            yes: args.yes,
        }
    }
}

#[derive(Parser, Debug)]
pub struct TreeArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Print the full tree, file contents included, as YAML
    #[arg(long)]
    pub yaml: bool,
}

fn parse_tool(s: &str) -> Result<(ToolCategory, String), String> {
    let (category, tool) = s
        .split_once('=')
        .ok_or_else(|| format!("Expected <category>=<tool>, got '{}'", s))?;
    let category: ToolCategory = category.parse().map_err(|e| format!("{}", e))?;
    let tool = tool.trim();
    if tool.is_empty() {
        return Err(format!("Missing tool id for category '{}'", category));
    }
    Ok((category, tool.to_string()))
}

/// Build a configuration from flags without prompting
fn resolve_config(selection: &SelectionArgs) -> Result<ProjectConfig> {
    let mut config =
        load_base_config(selection.config.as_deref()).context("Failed to load configuration")?;

    if let Some(template_id) = &selection.template {
        let template = find_template(template_id).with_context(|| {
            let available: Vec<&str> = TEMPLATES.iter().map(|t| t.id).collect();
            format!(
                "Template '{}' not found. Available templates: {}",
                template_id,
                available.join(", ")
            )
        })?;
        config = config.apply(&Action::ApplyTemplate(template.id.to_string()));
    }

    let mut actions = Vec::new();
    if let Some(name) = &selection.name {
        actions.push(Action::SetProjectName(name.clone()));
    }
    if let Some(description) = &selection.description {
        actions.push(Action::SetDescription(description.clone()));
    }
    if let Some(author) = &selection.author {
        actions.push(Action::SetAuthor(author.clone()));
    }
    for (category, tool) in &selection.tools {
        actions.push(Action::SelectTool {
            category: *category,
            tool: Some(tool.clone()),
        });
    }

    let config = config.apply_all(&actions);
    validate_project_name(&config.project_name)?;
    Ok(config)
}

fn print_config(selection: &SelectionArgs) -> Result<()> {
    let config = resolve_config(selection)?;
    print!("{}", config.to_yaml()?);
    Ok(())
}

fn print_tree(args: &TreeArgs) -> Result<()> {
    let config = resolve_config(&args.selection)?;
    let tree = generate(&config);

    if args.yaml {
        let yaml = serde_yaml::to_string(&tree).context("Failed to serialize file tree")?;
        print!("{}", yaml);
        return Ok(());
    }

    println!("{}", format!("{}/", config.project_name).cyan().bold());
    print!("{}", render_tree(&tree));
    Ok(())
}

fn print_templates() {
    println!();
    for template in TEMPLATES {
        println!(
            "  {} {}",
            template.id.cyan().bold(),
            format!("({})", template.name).dimmed()
        );
        println!("    {}", template.description);
        println!("    {}", template.tool_names().join(", ").green());
        println!();
    }
}

fn print_tools() {
    println!();
    for category in ToolCategory::ALL {
        println!(
            "  {} {}",
            category.icon().glyph(),
            category.label().cyan().bold()
        );
        for tool in tools_in(category) {
            println!(
                "    {} {:<20} {} {}",
                tool.icon.glyph(),
                tool.id.green(),
                tool.name,
                format!("- {}", tool.description).dimmed()
            );
        }
        println!();
    }
}

async fn run_create(create_args: CreateArgs) -> Result<()> {
    let result = dataforge_core::run(create_args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    match args.command {
        Some(Command::Create(create_args)) => run_create(create_args.into()).await,
        Some(Command::Tree(tree_args)) => print_tree(&tree_args),
        Some(Command::Config(selection)) => print_config(&selection),
        Some(Command::Templates) => {
            print_templates();
            Ok(())
        }
        Some(Command::Tools) => {
            print_tools();
            Ok(())
        }
        // No subcommand provided, default to create behavior (interactive mode)
        None => run_create(CreateArgs::default()).await,
    }
}
