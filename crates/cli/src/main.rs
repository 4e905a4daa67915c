//! `tenon` — validate, report on and view lumber assembly plans.

use std::error::Error;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use plan_format::{parse_plan, MaterialReport, ProjectMetadata};
use tenon_engine::resolve;
use tenon_tessellation::{assembly_meshes, meshes_to_obj, svg::meshes_to_svg};

#[derive(Parser)]
#[command(name = "tenon", version, about = "Joint-based placement for lumber assemblies")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a plan, check its graph and resolve every placement.
    Validate {
        /// Plan file, or '-' for standard input.
        file: String,
    },
    /// Generate a material report (markdown, or JSON for .json outputs).
    Report {
        /// Plan file, or '-' for standard input.
        file: String,
        /// Write to this path instead of standard output.
        #[arg(long)]
        output: Option<PathBuf>,
        /// Project name for the report header.
        #[arg(long, value_name = "NAME")]
        project_name: Option<String>,
        /// Append a per-category cut diagram.
        #[arg(long)]
        include_cut_diagram: bool,
    },
    /// Resolve a plan and render it as SVG (or OBJ for .obj outputs).
    View {
        /// Plan file, or '-' for standard input.
        file: String,
        /// Chamfer the long edges of every piece by this radius.
        #[arg(long, value_name = "MM", default_value_t = 0.0)]
        fillet_radius: f64,
        /// Output path; defaults to the plan name with an .svg extension.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()))
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err}");
        let mut source = err.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Commands::Validate { file } => {
            let model = parse_plan(&read_input(&file)?)?;
            tracing::debug!(
                pieces = model.piece_count(),
                joints = model.connections().len(),
                "plan parsed"
            );
            let issues = model.validate();
            for issue in &issues {
                println!("issue: {issue}");
            }
            if !issues.is_empty() {
                return Err(format!("validation found {} issue(s)", issues.len()).into());
            }
            let assembly = resolve(&model)?;
            println!(
                "ok: {} pieces placed, {} joints resolved",
                assembly.piece_count(),
                assembly.joints().len()
            );
            Ok(())
        }

        Commands::Report {
            file,
            output,
            project_name,
            include_cut_diagram,
        } => {
            let model = parse_plan(&read_input(&file)?)?;
            let name = project_name.unwrap_or_else(|| plan_name(&file));
            let report = MaterialReport::from_model(&model, ProjectMetadata::new(name));

            let json = output
                .as_deref()
                .and_then(Path::extension)
                .is_some_and(|ext| ext == "json");
            let rendered = if json {
                report.to_json()?
            } else {
                report.to_markdown(include_cut_diagram)
            };

            match output {
                Some(path) => {
                    std::fs::write(&path, rendered)?;
                    println!("wrote {}", path.display());
                }
                None => print!("{rendered}"),
            }
            Ok(())
        }

        Commands::View {
            file,
            fillet_radius,
            output,
        } => {
            let model = parse_plan(&read_input(&file)?)?;
            let assembly = resolve(&model)?;
            let meshes = assembly_meshes(&model, &assembly, fillet_radius);

            let name = plan_name(&file);
            let path =
                output.unwrap_or_else(|| PathBuf::from(format!("{name}.svg")));
            let obj = path.extension().is_some_and(|ext| ext == "obj");
            let rendered = if obj {
                meshes_to_obj(&meshes)
            } else {
                meshes_to_svg(&meshes, 960.0, 720.0, &name)
            };

            std::fs::write(&path, rendered)?;
            println!("wrote {}", path.display());
            Ok(())
        }
    }
}

/// Read the plan text from a file path, or standard input for `-`.
fn read_input(file: &str) -> Result<String, Box<dyn Error>> {
    if file == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(std::fs::read_to_string(file)?)
    }
}

/// A display name for the plan: the file stem, or a fallback for stdin.
fn plan_name(file: &str) -> String {
    if file == "-" {
        return "assembly".to_string();
    }
    Path::new(file)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "assembly".to_string())
}
