use std::{
    cell::OnceCell,
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Result;
use colored::Colorize;
use rayon::prelude::*;

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        check::{FileCheck, check_file, check_files},
        file_scanner::scan_files,
        languages::LanguageSelection,
        reconcile::GlobalReconciliation,
    },
    issues::Issue,
};

/// A scanned file that could not be read as UTF-8 text.
#[derive(Debug, Clone)]
pub struct UnreadableFile {
    pub file_path: String,
    pub error: String,
}

struct CheckedFiles {
    checks: Vec<FileCheck>,
    unreadable: Vec<UnreadableFile>,
}

/// A whole-project check run.
///
/// Holds the effective configuration and the scanned file list. File checks
/// and the cross-file reconciliation are computed on first access.
///
/// # Configuration Priority
///
/// 1. CLI arguments (e.g., `--lang rust`)
/// 2. `.reqsatrc.json` config file
/// 3. Built-in defaults
pub struct CheckContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Directory or file being checked.
    pub root_dir: PathBuf,

    /// Language selection applied to every file.
    pub selection: LanguageSelection,

    /// All files to check, sorted by path.
    pub files: BTreeSet<String>,

    /// Whether to print verbose diagnostic messages.
    pub verbose: bool,

    checked: OnceCell<CheckedFiles>,
    global: OnceCell<GlobalReconciliation>,
}

impl CheckContext {
    /// Load configuration, apply CLI overrides and scan files.
    ///
    /// # Errors
    ///
    /// Returns error if the config file is invalid or names an unknown
    /// language.
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;
        let root_dir = common_args.path.clone();

        // The config is searched from the checked directory, or the file's parent.
        let config_dir = if root_dir.is_file() {
            root_dir.parent().unwrap_or(Path::new("."))
        } else {
            root_dir.as_path()
        };
        let config_result = load_config(config_dir)?;

        if verbose && !config_result.from_file {
            eprintln!(
                "Note: No {} found, using default configuration",
                CONFIG_FILE_NAME
            );
        }

        let mut config = config_result.config;

        if !common_args.includes.is_empty() {
            config.includes = common_args.includes.clone();
        }
        if !common_args.excludes.is_empty() {
            config.ignores = common_args.excludes.clone();
        }
        let selection = match common_args.lang {
            Some(selection) => selection,
            None => config.language_selection()?,
        };
        config.lang = selection.to_string();

        if verbose {
            eprintln!("{}", format!("lang={}", config.lang).dimmed());
            eprintln!("{}", format!("include={}", config.includes.join(",")).dimmed());
            eprintln!("{}", format!("exclude={}", config.ignores.join(",")).dimmed());
        }

        let scan_result = scan_files(&root_dir, &config.includes, &config.ignores, verbose);

        if scan_result.skipped_count > 0 {
            eprintln!(
                "Warning: {} path(s) skipped due to access errors{}",
                scan_result.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }

        Ok(Self {
            config,
            root_dir,
            selection,
            files: scan_result.files,
            verbose,
            checked: OnceCell::new(),
            global: OnceCell::new(),
        })
    }

    /// Per-file check results, sorted by path.
    ///
    /// Files are read and checked in parallel. Files that cannot be read
    /// are collected separately, see [`Self::unreadable_files`].
    pub fn file_checks(&self) -> &[FileCheck] {
        &self.checked().checks
    }

    pub fn unreadable_files(&self) -> &[UnreadableFile] {
        &self.checked().unreadable
    }

    /// Cross-file reconciliation of all external scopes.
    pub fn global(&self) -> &GlobalReconciliation {
        self.global
            .get_or_init(|| check_files(self.file_checks()))
    }

    /// File issues of every file followed by the cross-file issues.
    pub fn issues(&self) -> Vec<Issue> {
        self.file_checks()
            .iter()
            .flat_map(|check| check.issues.iter().cloned())
            .chain(self.global().issues.iter().cloned())
            .collect()
    }

    fn checked(&self) -> &CheckedFiles {
        self.checked.get_or_init(|| {
            let files: Vec<&String> = self.files.iter().collect();
            let selection = self.selection;

            let results: Vec<_> = files
                .par_iter()
                .map(|file_path| {
                    let result = fs::read_to_string(file_path.as_str())
                        .map(|source| check_file(&source, file_path, selection));
                    (file_path.to_string(), result)
                })
                .collect();

            let mut checks = Vec::with_capacity(results.len());
            let mut unreadable = Vec::new();

            for (file_path, result) in results {
                match result {
                    Ok(check) => {
                        if self.verbose {
                            print_file_diagnostics(&check);
                        }
                        checks.push(check);
                    }
                    Err(e) => {
                        if self.verbose {
                            eprintln!("Warning: {} - {}", file_path, e);
                        }
                        unreadable.push(UnreadableFile {
                            file_path,
                            error: e.to_string(),
                        });
                    }
                }
            }

            checks.sort_by(|a, b| a.file_path.cmp(&b.file_path));

            CheckedFiles { checks, unreadable }
        })
    }
}

fn print_file_diagnostics(check: &FileCheck) {
    let stats = check.stats();
    if stats.has_local() || stats.has_external() {
        eprintln!(
            "{}",
            format!(
                "{} local {}/{} extern {}/{}",
                check.file_path,
                stats.local_satisfied,
                stats.local_require,
                stats.external_satisfied,
                stats.external_require
            )
            .dimmed()
        );
    }
    if let Some(open) = &check.unterminated_block {
        eprintln!(
            "{}",
            format!(
                "{}:{}:{} unterminated block comment ignored",
                check.file_path, open.start_line, open.start_col
            )
            .dimmed()
        );
    }
}
