//! Collate tool: configuration resolution, reporting, and the periodic run loop.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use colored::Colorize;

use file_clerk::collate::CollationResult;
use file_clerk::organize::{DEFAULT_NO_EXTENSION_DIR, DEFAULT_SYMBOL_DIR, DateSource, Grouping, OrganizeOptions, organize};
use file_clerk::{
    format_duration, get_relative_path_or_filename, path_to_string_relative, print_bold, print_error, print_warning,
};

use crate::config::Config;
use crate::{CollateArgs, Group};

#[derive(Debug)]
pub struct CollateTool {
    source: PathBuf,
    target: PathBuf,
    config: Config,
}

impl CollateTool {
    /// Create a new instance with CLI args.
    pub fn new(args: CollateArgs) -> anyhow::Result<Self> {
        let (source_arg, target_arg) = match (args.source.clone(), args.target.clone()) {
            (Some(source), Some(target)) => (Some(source), target),
            (Some(target), None) => (None, target),
            _ => anyhow::bail!("Target directory is required"),
        };

        let source = file_clerk::resolve_input_path(source_arg.as_deref())?;
        let target = file_clerk::resolve_output_path(target_arg.to_str(), &source)?;
        if source == target {
            print_warning!("Source and target are the same directory");
        }
        let config = Config::from_args(args);
        if config.debug {
            eprintln!("Config: {config:#?}");
            eprintln!("Source: {}", source.display());
            eprintln!("Target: {}", target.display());
        }
        Ok(Self { source, target, config })
    }

    /// Run collation once, or repeatedly when an interval was configured.
    pub fn run(&self) -> anyhow::Result<()> {
        match self.config.every {
            Some(seconds) => self.run_periodic(seconds),
            None => self.run_once(),
        }
    }

    /// Perform one collation pass and report the results.
    fn run_once(&self) -> anyhow::Result<()> {
        if self.config.verbose {
            print_bold!(
                "Collating {} to {}",
                path_to_string_relative(&self.source),
                path_to_string_relative(&self.target)
            );
        }
        let results = organize(&self.source, &self.target, self.organize_options())?;
        self.report(&results)
    }

    /// Re-run the collation on a fixed interval until interrupted with Ctrl+C.
    fn run_periodic(&self, seconds: u64) -> anyhow::Result<()> {
        let interval = Duration::from_secs(seconds.max(1));
        let stop_flag = Arc::new(AtomicBool::new(false));
        let stop_handler = Arc::clone(&stop_flag);

        ctrlc::set_handler(move || {
            if stop_handler.load(Ordering::SeqCst) {
                // Second Ctrl+C - force exit
                std::process::exit(130);
            }
            println!("\n{}", "Received Ctrl+C, stopping...".yellow().bold());
            stop_handler.store(true, Ordering::SeqCst);
        })?;

        print_bold!("Collating every {}, press Ctrl+C to stop", format_duration(interval));
        while !stop_flag.load(Ordering::SeqCst) {
            if let Err(error) = self.run_once() {
                print_error!("{error}");
            }
            let started = Instant::now();
            while started.elapsed() < interval {
                if stop_flag.load(Ordering::SeqCst) {
                    return Ok(());
                }
                thread::sleep(Duration::from_millis(200));
            }
        }
        Ok(())
    }

    fn organize_options(&self) -> OrganizeOptions {
        OrganizeOptions {
            recursive: self.config.recurse,
            copy: self.config.copy,
            clean_dirs: self.config.clean_dirs,
            dry_run: self.config.dryrun,
            overwrite: self.config.overwrite,
            rename: self.config.rename,
            extensions: self.config.extensions.clone(),
            grouping: self.grouping(),
        }
    }

    fn grouping(&self) -> Grouping {
        match self.config.group {
            None => Grouping::None,
            Some(Group::Date) => Grouping::Date {
                formats: self.config.date_formats.clone(),
                source: if self.config.use_modified {
                    DateSource::Modified
                } else {
                    DateSource::Created
                },
            },
            Some(Group::Extension) => Grouping::Extension {
                no_extension_dir: DEFAULT_NO_EXTENSION_DIR.to_string(),
            },
            Some(Group::Alpha) => Grouping::Alphabetical {
                uppercase: false,
                symbol_dir: DEFAULT_SYMBOL_DIR.to_string(),
            },
        }
    }

    /// Print per-file lines and a summary, failing when any pair failed.
    fn report(&self, results: &[CollationResult]) -> anyhow::Result<()> {
        let mut failures: usize = 0;
        for result in results {
            let source = get_relative_path_or_filename(&result.source, &self.source);
            let target = get_relative_path_or_filename(&result.target, &self.target);
            if result.success {
                if self.config.dryrun || self.config.verbose {
                    println!("{source} {} {target}", "→".green());
                }
            } else {
                failures += 1;
                print_error!("{source}: {}", result.error.as_deref().unwrap_or("unknown error"));
            }
        }

        let count = results.len() - failures;
        let files = if count == 1 { "file" } else { "files" };
        let verb = if self.config.copy { "copied" } else { "moved" };
        if self.config.dryrun {
            println!("Dryrun: would have {verb} {count} {files}");
        } else if count > 0 || self.config.verbose {
            println!("{}", format!("{} {count} {files}", capitalize(verb)).green());
        }

        if failures > 0 {
            anyhow::bail!("{failures} of {} file(s) failed", results.len());
        }
        Ok(())
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}
