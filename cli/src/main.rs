//! mdtoc CLI - categorized README table of contents generator

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use mdtoc::{
    ErrorMode, JsonFormat, ReadmeStatus, RunReport, ScanOptions, TocGenerator, TocResult,
};

#[derive(Parser)]
#[command(name = "mdtoc")]
#[command(version)]
#[command(
    about = "Generate a categorized table of contents for a directory of Markdown notes",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    target: TargetArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan notes and rewrite the README table of contents (default)
    Update {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Print the rendered table of contents without touching the README
    Print {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Print the category tree as JSON
    Json {
        #[command(flatten)]
        target: TargetArgs,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Exit with an error if the README table of contents is out of date
    Check {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Show version information
    Version,
}

#[derive(Args, Clone, Debug, Default)]
struct TargetArgs {
    /// Directory containing the Markdown notes (defaults to the current directory)
    #[arg(value_name = "DIR")]
    dir: Option<PathBuf>,

    /// README to patch (defaults to DIR/README.md)
    #[arg(long, value_name = "FILE", env = "MDTOC_README")]
    readme: Option<PathBuf>,

    /// Heading before which a new table of contents is inserted
    #[arg(long, value_name = "TEXT", env = "MDTOC_ANCHOR")]
    anchor: Option<String>,

    /// Abort on the first unreadable note instead of skipping it
    #[arg(long)]
    strict: bool,
}

impl TargetArgs {
    fn dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    fn readme(&self) -> PathBuf {
        self.readme
            .clone()
            .unwrap_or_else(|| self.dir().join("README.md"))
    }

    fn generator(&self) -> TocGenerator {
        let mode = if self.strict {
            ErrorMode::Strict
        } else {
            ErrorMode::Lenient
        };
        let mut scan_options = ScanOptions::new().with_error_mode(mode);
        // The README is never one of the listed notes.
        if let Some(name) = self.readme().file_name().and_then(|n| n.to_str()) {
            if !scan_options.is_excluded(name) {
                scan_options = scan_options.exclude(name);
            }
        }

        let mut generator = TocGenerator::new().with_scan_options(scan_options);
        if let Some(ref anchor) = self.anchor {
            generator = generator.with_anchor(anchor.clone());
        }
        generator
    }
}

type CmdResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Update { target }) => cmd_update(&target),
        Some(Commands::Print { target }) => cmd_print(&target),
        Some(Commands::Json { target, compact }) => cmd_json(&target, compact),
        Some(Commands::Check { target }) => cmd_check(&target),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => cmd_update(&cli.target),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_update(target: &TargetArgs) -> CmdResult {
    let dir = target.dir();
    let readme = target.readme();
    let generator = target.generator();

    log::debug!("notes: {}, readme: {}", dir.display(), readme.display());
    println!("{} {}", "Scanning directory:".cyan(), dir.display());

    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Reading notes...");
    let catalog = generator.scan(&dir)?;
    pb.inc(1);

    pb.set_message("Rendering table of contents...");
    let result = generator.build_from_catalog(catalog);
    pb.inc(1);

    pb.set_message("Updating README...");
    let report = generator.apply(result, &readme);
    pb.inc(1);
    pb.finish_and_clear();

    print_skipped(&report.result);

    if report.result.catalog.is_empty() {
        println!(
            "{}",
            "No markdown files found (excluding README.md)".yellow()
        );
        return Ok(());
    }

    println!(
        "Found {} markdown files",
        report.result.catalog.len().to_string().bold()
    );
    print_readme_status(&report, &readme);
    print_summary(&report.result);

    if matches!(report.readme, ReadmeStatus::Patched { .. }) {
        println!(
            "\n{}",
            "** Table of contents generated successfully! **".green().bold()
        );
    }

    Ok(())
}

fn cmd_print(target: &TargetArgs) -> CmdResult {
    let result = target.generator().build(target.dir())?;
    print_skipped(&result);
    print!("{}", result.toc);
    Ok(())
}

fn cmd_json(target: &TargetArgs, compact: bool) -> CmdResult {
    let result = target.generator().build(target.dir())?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    println!("{}", result.to_json(format)?);
    Ok(())
}

fn cmd_check(target: &TargetArgs) -> CmdResult {
    let generator = target.generator();
    let result = generator.build(target.dir())?;
    let readme = target.readme();

    if result.catalog.is_empty() {
        println!("{}", "No markdown files found, nothing to check".yellow());
        return Ok(());
    }

    if mdtoc::patch::is_up_to_date(&readme, &result.toc, generator.patch_options())? {
        println!("{} {}", "Up to date:".green(), readme.display());
        Ok(())
    } else {
        Err(format!("{} is out of date, run `mdtoc update`", readme.display()).into())
    }
}

fn cmd_version() {
    println!("{} {}", "mdtoc".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Categorized README table of contents generator");
    println!();
    println!("License: MIT");
}

fn print_skipped(result: &TocResult) {
    for skipped in &result.catalog.skipped {
        eprintln!(
            "{} {}: {}",
            "Skipped".yellow(),
            skipped.path.display(),
            skipped.reason
        );
    }
    for conflict in &result.tree.conflicts {
        let shape = if conflict.existing_nested {
            "nested"
        } else {
            "flat"
        };
        eprintln!(
            "{} {}: category {:?} is already {}",
            "Ignored".yellow(),
            conflict.file,
            conflict.category,
            shape
        );
    }
}

fn print_readme_status(report: &RunReport, readme: &Path) {
    match &report.readme {
        ReadmeStatus::Patched { placement, changed } => {
            let verb = if *changed { "Updated" } else { "Unchanged" };
            println!(
                "{} {} ({})",
                verb.green(),
                readme.display(),
                placement
            );
        }
        ReadmeStatus::NoDocuments => {}
        ReadmeStatus::Failed(reason) => {
            eprintln!("{}: {}", "Error".red().bold(), reason);
        }
    }
}

fn print_summary(result: &TocResult) {
    println!("\n{}", "Summary:".cyan().bold());
    for row in result.tree.summary() {
        if row.subcategories > 0 {
            println!(
                "  {}: {} files in {} subcategories",
                row.name.bold(),
                row.files,
                row.subcategories
            );
        } else {
            println!("  {}: {} files", row.name.bold(), row.files);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_command_uses_top_level_args() {
        let cli = Cli::try_parse_from(["mdtoc", "notes", "--strict"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.target.dir(), PathBuf::from("notes"));
        assert_eq!(cli.target.readme(), PathBuf::from("notes/README.md"));
        assert!(cli.target.strict);
    }

    #[test]
    fn test_subcommand_args() {
        let cli = Cli::try_parse_from([
            "mdtoc",
            "check",
            "docs",
            "--readme",
            "INDEX.md",
            "--anchor",
            "## Usage",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Check { target }) => {
                assert_eq!(target.readme(), PathBuf::from("INDEX.md"));
                assert_eq!(target.anchor.as_deref(), Some("## Usage"));
                assert_eq!(
                    target.generator().patch_options().anchor,
                    "## Usage".to_string()
                );
            }
            _ => panic!("expected check command"),
        }
    }

    #[test]
    fn test_json_compact_flag() {
        let cli = Cli::try_parse_from(["mdtoc", "json", "--compact"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Json { compact: true, .. })
        ));
    }

    #[test]
    fn test_default_dir_is_current_directory() {
        let target = TargetArgs::default();
        assert_eq!(target.dir(), PathBuf::from("."));
        assert_eq!(target.readme(), PathBuf::from("./README.md"));
    }

    #[test]
    fn test_update_then_check() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.md"), "# Alpha\n").unwrap();
        fs::write(dir.path().join("README.md"), "# Notes\n").unwrap();

        let target = TargetArgs {
            dir: Some(dir.path().to_path_buf()),
            ..TargetArgs::default()
        };

        assert!(cmd_check(&target).is_err());
        cmd_update(&target).unwrap();
        assert!(cmd_check(&target).is_ok());

        let readme = fs::read_to_string(dir.path().join("README.md")).unwrap();
        assert!(readme.contains("*  [Alpha](a.md)"));
    }

    #[test]
    fn test_custom_readme_name_is_not_listed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.md"), "# Alpha\n").unwrap();
        fs::write(dir.path().join("INDEX.md"), "# Index\n").unwrap();

        let target = TargetArgs {
            dir: Some(dir.path().to_path_buf()),
            readme: Some(dir.path().join("INDEX.md")),
            ..TargetArgs::default()
        };

        let result = target.generator().build(target.dir()).unwrap();
        assert_eq!(result.catalog.len(), 1);
        assert_eq!(result.catalog.records[0].file, "a.md");
    }

    #[test]
    fn test_missing_directory_only_fails_when_strict() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let lenient = TargetArgs {
            dir: Some(missing.clone()),
            ..TargetArgs::default()
        };
        assert!(cmd_update(&lenient).is_ok());
        assert!(cmd_check(&lenient).is_ok());

        let strict = TargetArgs {
            strict: true,
            ..lenient
        };
        assert!(cmd_print(&strict).is_err());
    }
}
