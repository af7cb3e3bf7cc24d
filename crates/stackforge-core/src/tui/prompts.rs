//! Charm-style CLI prompts using cliclack

use crate::config::GeneratorConfig;
use crate::input::{FieldKind, InputSource, NameClass, RawInput};
use crate::materializer::ProjectMaterializer;
use crate::pipeline::{GenerationReport, Pipeline};
use crate::project::{ProjectSpec, StackVariant};
use crate::templates::{catalog, ProjectStamp};
use anyhow::Result;
use std::io;
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Stack variant to generate (prompted for when absent)
    pub variant: Option<StackVariant>,

    /// Directory the project directory is created in
    pub directory: Option<PathBuf>,

    /// Generator configuration file
    pub config: Option<PathBuf>,
}

/// Asks for each field with a cliclack prompt; the password is masked
pub struct PromptInput;

impl InputSource for PromptInput {
    fn ask(&mut self, field: FieldKind, variant: StackVariant) -> io::Result<String> {
        match field {
            FieldKind::ProjectName => {
                let placeholder = match variant.name_class() {
                    NameClass::Permissive => "github.com/acme/sample-api",
                    NameClass::Strict => "sample-api",
                };
                cliclack::input("Project name").placeholder(placeholder).interact()
            }
            FieldKind::DatabaseName => cliclack::input("Database name")
                .placeholder("sampledb")
                .interact(),
            FieldKind::DbUser => cliclack::input("Database username")
                .placeholder("admin")
                .interact(),
            FieldKind::DbPassword => cliclack::password("Database password")
                .mask('▪')
                .interact(),
        }
    }
}

/// Run the CLI with interactive prompts
pub async fn run(args: CreateArgs) -> Result<()> {
    cliclack::intro("stackforge")?;

    // Step 1: Load generator defaults
    let config = GeneratorConfig::load(args.config.as_deref()).await?;
    if config != GeneratorConfig::default() {
        cliclack::log::info("Using custom generator defaults")?;
    }

    // Step 2: Select stack variant
    let variant = select_variant(args.variant)?;

    // Step 3: Resolve the parent directory
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let parent = select_directory(&args, &current_dir)?;

    // Step 4: Collect answers (validation happens once, after every prompt)
    let raw = RawInput::collect(&mut PromptInput, variant)?;

    // Step 5: Validate and bind
    let mut pipeline = Pipeline::new(config);
    let spec = pipeline.validate(raw, variant)?;
    let ctx = pipeline.bind(&spec)?;
    let root = Pipeline::destination(&spec, &parent);

    // Step 6: Warn about what a re-run will replace
    if let Err(e) = warn_existing(&spec, &ctx, &root).await {
        pipeline.abort(&e);
        return Err(e);
    }

    // Step 7: Create project
    let spinner = cliclack::spinner();
    spinner.start("Creating project...");
    let report = match pipeline.materialize(&spec, &ctx, &root).await {
        Ok(report) => report,
        Err(e) => {
            spinner.stop("Project creation failed");
            return Err(e.into());
        }
    };
    spinner.stop(format!(
        "Created {} files in {}",
        report.files.len(),
        report.root.display()
    ));

    // Step 8: Show next steps
    print_next_steps(&spec, &report, &current_dir)?;

    Ok(())
}

fn select_variant(specified: Option<StackVariant>) -> Result<StackVariant> {
    if let Some(variant) = specified {
        cliclack::log::info(format!("Stack: {}", variant.display_name()))?;
        return Ok(variant);
    }

    let mut select = cliclack::select("Select a stack");
    for variant in StackVariant::ALL {
        select = select.item(variant, variant.display_name(), variant.description());
    }

    Ok(select.interact()?)
}

fn select_directory(args: &CreateArgs, current_dir: &Path) -> Result<PathBuf> {
    let path = match &args.directory {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => current_dir.join(dir),
        None => current_dir.to_path_buf(),
    };

    if !path.is_dir() {
        anyhow::bail!("Directory does not exist: {}", path.display());
    }

    Ok(path)
}

async fn warn_existing(
    spec: &ProjectSpec,
    ctx: &crate::binder::SubstitutionContext,
    root: &Path,
) -> Result<()> {
    if !root.exists() {
        return Ok(());
    }

    if let Some(stamp) = ProjectStamp::read(root).await {
        for warning in stamp.warnings(spec.variant(), crate::CATALOG_VERSION) {
            cliclack::log::warning(warning)?;
        }
    }

    let planned = ProjectMaterializer::new(catalog()).plan(spec.variant(), ctx, root)?;
    let existing = planned
        .iter()
        .filter(|f| f.absolute_path.exists())
        .count();
    if existing > 0 {
        cliclack::log::warning(format!(
            "{} existing file(s) in {} will be overwritten; hand edits to them are lost",
            existing,
            root.display()
        ))?;
    }

    Ok(())
}

fn print_next_steps(
    spec: &ProjectSpec,
    report: &GenerationReport,
    current_dir: &Path,
) -> Result<()> {
    if report.overwritten() > 0 {
        cliclack::log::info(format!("Overwrote {} existing file(s)", report.overwritten()))?;
    }

    let credentials: Vec<&str> = report
        .files
        .iter()
        .filter(|f| f.credential_bearing)
        .map(|f| f.relative_path)
        .collect();
    cliclack::log::info(format!(
        "Credentials were written to {} (excluded from git)",
        credentials.join(", ")
    ))?;

    let steps = spec
        .variant()
        .next_steps(&report.root, current_dir, spec.project_name());

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}
