//! Charm-style CLI prompts using cliclack

use crate::archive::{validate_project_name, ExportFormat, Exporter};
use crate::catalog::{find_template, tools_in, ToolCategory, TEMPLATES};
use crate::config::{load_base_config, Action, ProjectConfig};
use crate::flow::{pipeline_flow, pipeline_notes};
use crate::generator::generate;
use crate::render::compose::service_names;
use crate::setup::{export_steps, service_endpoints};
use crate::tree::render_tree;
use anyhow::{Context, Result};
use console::style;
use std::path::{Path, PathBuf};

/// Environment variable overriding the default output directory
pub const OUTPUT_DIR_ENV: &str = "DATAFORGE_OUTPUT_DIR";

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// YAML configuration file to start from
    pub config_file: Option<PathBuf>,

    /// Project template to apply
    pub template: Option<String>,

    pub project_name: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,

    /// Per-category tool overrides, applied after the template
    pub tools: Vec<(ToolCategory, String)>,

    /// Directory the archive or project folder is written to
    pub output_dir: Option<PathBuf>,

    /// Zip or directory output; prompted when unset
    pub format: Option<ExportFormat>,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Run the configurator with interactive prompts
pub async fn run(args: CreateArgs) -> Result<()> {
    cliclack::intro("DataForge")?;

    // Step 1: Starting configuration (file, template, flag overrides)
    let mut config = load_base_config(args.config_file.as_deref())
        .context("Failed to load configuration")?;
    if args.config_file.is_some() {
        cliclack::log::info("Loaded configuration file")?;
    }
    config = select_template(config, &args)?;

    // Step 2: Project details
    config = project_details(config, &args)?;

    // Step 3: Tool per pipeline stage
    config = select_tools(config, &args)?;

    // Step 4: Preview
    show_preview(&config)?;

    // Step 5: Output
    let out_dir = select_output_dir(&args)?;
    let format = select_format(&args)?;

    // Step 6: Export
    export(&config, &out_dir, format).await?;

    // Step 7: Show next steps
    print_next_steps(&config, &out_dir, format)?;

    Ok(())
}

fn select_template(config: ProjectConfig, args: &CreateArgs) -> Result<ProjectConfig> {
    if let Some(template_id) = &args.template {
        let Some(template) = find_template(template_id) else {
            let available: Vec<&str> = TEMPLATES.iter().map(|t| t.id).collect();
            anyhow::bail!(
                "Template '{}' not found. Available templates: {}",
                template_id,
                available.join(", ")
            );
        };
        cliclack::log::info(format!("Template: {} - {}", template.name, template.description))?;
        return Ok(config.apply(&Action::ApplyTemplate(template.id.to_string())));
    }

    if args.yes {
        return Ok(config);
    }

    let mut select = cliclack::select("Start from a template?").item(
        String::new(),
        "No template",
        "pick every tool yourself",
    );
    for template in TEMPLATES {
        let hint = template.tool_names().into_iter().take(4).collect::<Vec<_>>().join(", ");
        select = select.item(template.id.to_string(), template.name, hint);
    }
    let selected: String = select.interact()?;

    if selected.is_empty() {
        Ok(config)
    } else {
        Ok(config.apply(&Action::ApplyTemplate(selected)))
    }
}

fn project_details(config: ProjectConfig, args: &CreateArgs) -> Result<ProjectConfig> {
    let mut actions = Vec::new();

    let name = match &args.project_name {
        Some(name) => name.clone(),
        None if args.yes => config.project_name.clone(),
        None => cliclack::input("Project name")
            .placeholder(&config.project_name)
            .default_input(&config.project_name)
            .validate(|input: &String| validate_project_name(input).map_err(|e| e.to_string()))
            .interact()?,
    };
    validate_project_name(&name)?;
    actions.push(Action::SetProjectName(name));

    let description = match &args.description {
        Some(description) => description.clone(),
        None if args.yes => config.description.clone(),
        None => cliclack::input("Description")
            .default_input(&config.description)
            .interact()?,
    };
    actions.push(Action::SetDescription(description));

    let author = match &args.author {
        Some(author) => author.clone(),
        None if args.yes => config.author.clone(),
        None => cliclack::input("Author")
            .default_input(&config.author)
            .interact()?,
    };
    actions.push(Action::SetAuthor(author));

    Ok(config.apply_all(&actions))
}

fn select_tools(config: ProjectConfig, args: &CreateArgs) -> Result<ProjectConfig> {
    let overrides: Vec<Action> = args
        .tools
        .iter()
        .map(|(category, tool)| Action::SelectTool {
            category: *category,
            tool: Some(tool.clone()),
        })
        .collect();
    let mut config = config.apply_all(&overrides);

    if args.yes {
        return Ok(config);
    }

    for category in ToolCategory::ALL {
        // Categories fixed on the command line are not asked again
        if args.tools.iter().any(|(c, _)| *c == category) {
            continue;
        }

        let current = config.tools.get(category).unwrap_or_default().to_string();
        let prompt = format!("{} {}", category.icon().glyph(), category.label());
        let mut select = cliclack::select(prompt).item(String::new(), "None", "");

        let mut known = false;
        for tool in tools_in(category) {
            known |= tool.id == current;
            select = select.item(tool.id.to_string(), tool.name, tool.description);
        }
        if !current.is_empty() && !known {
            select = select.item(current.clone(), current.clone(), "not in catalog");
        }

        let selected: String = select.initial_value(current).interact()?;
        config = config.apply(&Action::SelectTool {
            category,
            tool: (!selected.is_empty()).then_some(selected),
        });
    }

    let chosen: Vec<String> = config
        .tools
        .selected()
        .map(|(category, tool)| format!("{}={}", category, tool))
        .collect();
    if chosen.is_empty() {
        cliclack::log::warning("No tools selected, generating the base skeleton only")?;
    } else {
        cliclack::log::success(format!("Stack: {}", chosen.join(", ")))?;
    }

    Ok(config)
}

fn show_preview(config: &ProjectConfig) -> Result<()> {
    let tree = generate(config);
    cliclack::note(
        format!("{}/", config.project_name),
        render_tree(&tree).trim_end(),
    )?;

    let flow: Vec<String> = pipeline_flow(config)
        .iter()
        .map(|stage| {
            let line = format!("{} {}: {}", stage.icon.glyph(), stage.label, stage.detail);
            if stage.active {
                line
            } else {
                style(line).dim().to_string()
            }
        })
        .collect();
    cliclack::note("Data flow", flow.join("\n"))?;

    let services = service_names(&config.tools);
    if config.tools.is(ToolCategory::Container, "docker") && !services.is_empty() {
        cliclack::log::info(format!("docker-compose services: {}", services.join(", ")))?;
    }

    for note in pipeline_notes(config) {
        cliclack::log::info(note)?;
    }
    Ok(())
}

fn select_output_dir(args: &CreateArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let path = if let Some(dir) = &args.output_dir {
        dir.clone()
    } else if let Some(dir) = std::env::var_os(OUTPUT_DIR_ENV) {
        PathBuf::from(dir)
    } else if args.yes {
        current_dir.clone()
    } else {
        let input: String = cliclack::input("Output directory")
            .placeholder(".")
            .default_input(".")
            .interact()?;
        PathBuf::from(input)
    };

    let path = if path.is_absolute() {
        path
    } else {
        current_dir.join(path)
    };

    if !path.is_dir() {
        anyhow::bail!("Output directory does not exist: {}", path.display());
    }

    Ok(path)
}

fn select_format(args: &CreateArgs) -> Result<ExportFormat> {
    if let Some(format) = args.format {
        return Ok(format);
    }
    if args.yes {
        return Ok(ExportFormat::default());
    }

    let format = cliclack::select("Output format")
        .item(ExportFormat::Zip, "Zip archive", "<project>.zip")
        .item(ExportFormat::Directory, "Directory", "write the files in place")
        .interact()?;
    Ok(format)
}

async fn export(config: &ProjectConfig, out_dir: &Path, format: ExportFormat) -> Result<PathBuf> {
    let exporter = Exporter::new();

    let spinner = cliclack::spinner();
    spinner.start("Generating project...");

    match exporter.export(config, out_dir, format).await {
        Ok(path) => {
            spinner.stop(format!("Created {}", path.display()));
            Ok(path)
        }
        Err(e) => {
            spinner.stop("Export failed");
            cliclack::log::error(format!("There was an error exporting the project: {}", e))?;
            anyhow::bail!("Export failed.");
        }
    }
}

fn print_next_steps(config: &ProjectConfig, out_dir: &Path, format: ExportFormat) -> Result<()> {
    let endpoints = service_endpoints(config);
    if !endpoints.is_empty() {
        let lines: Vec<String> = endpoints
            .iter()
            .map(|e| format!("{}  {}", e.name, style(e.address).cyan()))
            .collect();
        cliclack::note("Active services", lines.join("\n"))?;
    }

    let steps = export_steps(config, out_dir, format);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}  {}", style(format!("{}.", i + 1)).dim(), step);
    }

    cliclack::outro("Happy building!")?;

    Ok(())
}
