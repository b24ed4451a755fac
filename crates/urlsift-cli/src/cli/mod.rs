//! CLI for the urlsift URL cleaner and deduplicator.

mod commands;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use urlsift_core::config::{self, UrlsiftConfig};
use urlsift_core::engine::Scope;
use urlsift_core::link_db::{LinkDb, UrlFilter};

use commands::{
    run_completions, run_create_profile, run_delete_import, run_export, run_imports, run_list,
    run_manpage, run_normalize, run_origin, run_process, run_profiles, run_stats,
};

/// Top-level CLI for urlsift.
#[derive(Debug, Parser)]
#[command(name = "urlsift")]
#[command(about = "urlsift: clean tracking noise from URLs and trace duplicates", long_about = None)]
pub struct Cli {
    /// Use this database file instead of the configured/default one.
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Restricts a listing to one import or to every import of a profile.
#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = false)]
pub struct ScopeArgs {
    /// Profile name (all of its imports).
    #[arg(long)]
    pub profile: Option<String>,
    /// Import id.
    #[arg(long)]
    pub import: Option<i64>,
}

impl ScopeArgs {
    pub fn to_scope(&self) -> Result<Scope> {
        match (&self.profile, self.import) {
            (None, Some(id)) => Ok(Scope::Import(id)),
            (Some(name), None) => Ok(Scope::Profile(name.trim().to_string())),
            _ => bail!("pass exactly one of --profile or --import"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusFilter {
    Unique,
    Duplicate,
}

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Only URLs whose domain contains this text (case-insensitive).
    #[arg(long)]
    pub domain: Option<String>,
    /// Only unique or only duplicate URLs.
    #[arg(long, value_enum)]
    pub status: Option<StatusFilter>,
    /// Text to find in the original URL, cleaned URL, or domain (case-insensitive).
    #[arg(long)]
    pub search: Option<String>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> UrlFilter {
        UrlFilter {
            domain: self.domain.clone(),
            is_duplicate: self.status.map(|s| s == StatusFilter::Duplicate),
            search: self.search.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Txt,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Clean and deduplicate a batch of URLs as a new import.
    Process {
        /// Profile to file the import under (created if missing).
        #[arg(long)]
        profile: String,
        /// Name for this import.
        #[arg(long)]
        alias: String,
        /// Read URLs from a file (one per line, or a OneTab export). Use '-' for stdin.
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
        /// Newline-separated URLs given inline.
        #[arg(long)]
        text: Option<String>,
        /// Find URLs anywhere in the input instead of reading it line by line.
        #[arg(long)]
        extract: bool,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the canonical form and domain of URLs without storing anything.
    Normalize {
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// List profiles with their import and URL counts.
    Profiles,

    /// Create an empty profile.
    CreateProfile { name: String },

    /// List the imports of a profile.
    Imports { profile: String },

    /// Delete an import and all of its URLs.
    DeleteImport {
        /// Import identifier.
        id: i64,
    },

    /// List URLs of a profile or import, one page at a time.
    List {
        #[command(flatten)]
        scope: ScopeArgs,
        #[command(flatten)]
        filter: FilterArgs,
        /// Page number (1-based).
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
        /// Rows per page (defaults to the configured page size).
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        page_size: Option<u32>,
        /// Print the page as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Export every matching URL as CSV or plain text.
    Export {
        #[command(flatten)]
        scope: ScopeArgs,
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
        /// Write to this file instead of stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Show which earlier URL a duplicate was matched against.
    Origin {
        /// URL record identifier.
        id: i64,
    },

    /// URL totals for a profile.
    Stats { profile: String },

    /// Print shell completions.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Print a man page (roff).
    Manpage,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let db_path = cli.db.as_deref();

        match cli.command {
            // Offline commands touch neither config nor database.
            CliCommand::Normalize { urls } => run_normalize(&urls)?,
            CliCommand::Completions { shell } => run_completions(shell)?,
            CliCommand::Manpage => run_manpage()?,

            CliCommand::Process {
                profile,
                alias,
                file,
                text,
                extract,
                json,
            } => {
                let (_, db) = open_session(db_path).await?;
                run_process(&db, &profile, &alias, file.as_deref(), text.as_deref(), extract, json)
                    .await?
            }
            CliCommand::Profiles => {
                let (_, db) = open_session(db_path).await?;
                run_profiles(&db).await?
            }
            CliCommand::CreateProfile { name } => {
                let (_, db) = open_session(db_path).await?;
                run_create_profile(&db, &name).await?
            }
            CliCommand::Imports { profile } => {
                let (_, db) = open_session(db_path).await?;
                run_imports(&db, &profile).await?
            }
            CliCommand::DeleteImport { id } => {
                let (_, db) = open_session(db_path).await?;
                run_delete_import(&db, id).await?
            }
            CliCommand::List {
                scope,
                filter,
                page,
                page_size,
                json,
            } => {
                let scope = scope.to_scope()?;
                let (cfg, db) = open_session(db_path).await?;
                let page_size = page_size.unwrap_or(cfg.default_page_size);
                run_list(&db, &scope, &filter.to_filter(), page, page_size, json).await?
            }
            CliCommand::Export {
                scope,
                filter,
                format,
                output,
            } => {
                let scope = scope.to_scope()?;
                let (cfg, db) = open_session(db_path).await?;
                run_export(
                    &db,
                    &scope,
                    &filter.to_filter(),
                    format,
                    output.as_deref(),
                    cfg.export_page_size,
                )
                .await?
            }
            CliCommand::Origin { id } => {
                let (_, db) = open_session(db_path).await?;
                run_origin(&db, id).await?
            }
            CliCommand::Stats { profile } => {
                let (_, db) = open_session(db_path).await?;
                run_stats(&db, &profile).await?
            }
        }

        Ok(())
    }
}

/// Loads config and opens the database. `--db` wins over `database_path` in
/// config, which wins over the XDG default.
async fn open_session(cli_path: Option<&Path>) -> Result<(UrlsiftConfig, LinkDb)> {
    let cfg = config::load_or_init()?;
    tracing::debug!("loaded config: {:?}", cfg);
    let db = match cli_path.or(cfg.database_path.as_deref()) {
        Some(path) => LinkDb::open_at(path).await?,
        None => LinkDb::open_default().await?,
    };
    Ok((cfg, db))
}

#[cfg(test)]
mod tests;
