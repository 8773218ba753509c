use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod demos;

#[derive(Parser)]
#[command(name = "fortir")]
#[command(about = "Fortir - Fortran statement lowering onto runtime library calls")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Lower {
        demo: String,

        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long)]
        annotated: bool,

        #[arg(long, conflicts_with = "annotated")]
        json: bool,

        #[arg(short, long)]
        verbose: bool,
    },

    Demos,

    Runtime {
        #[arg(short, long)]
        verbose: bool,
    },

    Validate {
        input: PathBuf,

        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Lower {
            demo,
            output,
            annotated,
            json,
            verbose,
        } => cmd_lower(demo, output, annotated, json, verbose),
        Commands::Demos => cmd_demos(),
        Commands::Runtime { verbose } => cmd_runtime(verbose),
        Commands::Validate { input, verbose } => cmd_validate(input, verbose),
    }
}

fn cmd_lower(
    demo: String,
    output: Option<PathBuf>,
    annotated: bool,
    json: bool,
    verbose: bool,
) -> Result<()> {
    use colored::*;
    use fortir_emit::{Emitter, EmitterConfig, IrEmitter, VerbosityLevel};
    use std::fs;
    use std::time::Instant;

    if verbose {
        println!("{}", " Fortir Lowering Driver".bright_blue().bold());
        println!("{}", "=".repeat(50).bright_blue());
        println!(" Demo: {}", demo);
        if let Some(ref out) = output {
            println!(" Output: {}", out.display());
        }
        if annotated {
            println!(" Mode: Annotated IR");
        }
        println!();
    }

    let start = Instant::now();

    let selected = demos::find(&demo)
        .ok_or_else(|| anyhow::anyhow!("unknown demo '{}', try `fortir demos`", demo))?;

    if verbose {
        println!(" Lowering statements...");
    }
    let module = (selected.build)()?;

    if verbose {
        println!(" Validating module...");
    }
    module.validate()?;

    if verbose {
        println!(" Generating output...");
    }
    let rendered = if json {
        serde_json::to_string_pretty(&module)?
    } else {
        let mut config = if output.is_some() {
            EmitterConfig::plain()
        } else {
            EmitterConfig::default()
        };
        config.include_locations = annotated;
        if verbose {
            config.verbosity = VerbosityLevel::Verbose;
        }
        IrEmitter::new(config).emit_to_string(&module)?
    };

    if let Some(output_path) = output {
        fs::write(&output_path, &rendered)?;
        if verbose {
            let elapsed = start.elapsed();
            println!(
                "\n {} Lowering successful!",
                "SUCCESS:".bright_green().bold()
            );
            println!("   Time: {:.3}s", elapsed.as_secs_f64());
            println!("   Output: {}", output_path.display());
        }
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

fn cmd_demos() -> Result<()> {
    use colored::*;

    println!("{}", " Built-in demo programs".bright_cyan().bold());
    println!();
    for demo in demos::ALL {
        println!("  {:<12} {}", demo.name.bright_yellow(), demo.summary);
    }
    println!();
    println!("Run one with `fortir lower <name>`");

    Ok(())
}

fn cmd_runtime(verbose: bool) -> Result<()> {
    use colored::*;
    use fortir_lower::RuntimeFunc;

    println!("{}", " Runtime entry points".bright_cyan().bold());
    println!();

    for func in RuntimeFunc::ALL {
        let ty = func.func_type();
        let params: Vec<String> = ty.params.iter().map(|t| t.to_string()).collect();

        let mut line = format!(
            "  {}({}) -> {}",
            func.symbol().bright_yellow(),
            params.join(", "),
            ty.ret
        );
        if func.never_returns() {
            line.push_str(&format!(" {}", "noreturn".bright_red()));
        }
        println!("{}", line);

        if verbose && func.has_source_loc_args() {
            println!("      trailing arguments receive the calling file and line");
        }
    }

    Ok(())
}

fn cmd_validate(input: PathBuf, verbose: bool) -> Result<()> {
    use colored::*;
    use fortir_core::persist::load_module;

    if verbose {
        println!("{}", " Validating module".bright_cyan().bold());
        println!("{}", "=".repeat(50).bright_cyan());
        println!(" Input: {}", input.display());
        println!();
    }

    let module = load_module(&input)?;

    match module.validate() {
        Ok(()) => {
            println!("{}", " VALID".bright_green().bold());
            if verbose {
                println!(
                    "   {} declaration(s), {} function(s)",
                    module.declarations.len(),
                    module.functions.len()
                );
            }
            Ok(())
        }
        Err(e) => {
            println!("{}", " INVALID".bright_red().bold());
            println!("\n{}", "Validation Error:".bright_red());
            println!("{}", e);
            Err(anyhow::anyhow!("Validation failed"))
        }
    }
}
