//! # CLI Layer
//!
//! This module is **one possible UI client** for memoz. It is not the
//! application itself.
//!
//! The CLI layer is the only place in the codebase that knows about terminal
//! I/O, calls `std::process::exit`, parses arguments, or formats output for
//! humans. Everything else goes through [`MemozApi`].
//!
//! ## Structure
//!
//! - `run()`: main dispatch (called by `main.rs`)
//! - `init_context()`: resolves the data directory, loads config, builds the API
//! - `handle_*()`: per-command handlers that call the API and print results
//!
//! The data directory is `--data-dir`, else `$MEMOZ_HOME`, else the platform
//! data directory.

use super::print::{
    print_archive, print_full_memo, print_memos, print_messages, print_search_results,
    print_shares, print_statistics, print_templates, print_trash,
};
use super::setup::{
    Cli, Commands, CoreCommands, DataCommands, ListArgs, MemoCommands, MiscCommands,
    ShareCommands,
};
use clap::Parser;
use directories::ProjectDirs;
use memoz::api::{ExportFormat, MemozApi};
use memoz::clipboard::{copy_to_clipboard, email_share_link, format_for_clipboard};
use memoz::config::MemozConfig;
use memoz::error::{MemozError, Result};
use memoz::model::{Category, MemoPatch, NewMemo};
use memoz::query::{CategoryFilter, MemoQuery, SortDirection};
use memoz::stats;
use memoz::store::fs::FileStore;
use memoz::templates;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const HOME_ENV: &str = "MEMOZ_HOME";

struct AppContext {
    api: MemozApi<FileStore>,
    data_dir: PathBuf,
    config: MemozConfig,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Core(cmd)) => match cmd {
            CoreCommands::Create {
                content,
                category,
                tags,
                pin,
                template,
                title,
            } => {
                let title = if title.is_empty() {
                    None
                } else {
                    Some(title.join(" "))
                };
                match template {
                    Some(template) => handle_create_from_template(&mut ctx, &template, title, pin),
                    None => handle_create(&mut ctx, title, content, category, tags, pin),
                }
            }
            CoreCommands::List {
                search,
                archived,
                filters,
            } => {
                if archived {
                    handle_archive_list(&mut ctx)
                } else {
                    handle_list(&mut ctx, search, &filters)
                }
            }
            CoreCommands::Search { query, filters } => {
                handle_search(&mut ctx, &query.join(" "), &filters)
            }
            CoreCommands::Templates => {
                print_templates(&templates::catalog_now());
                Ok(())
            }
        },
        Some(Commands::Memo(cmd)) => match cmd {
            MemoCommands::View { id } => handle_view(&mut ctx, &id),
            MemoCommands::Edit {
                id,
                title,
                content,
                category,
                tags,
                clear_tags,
            } => handle_edit(&mut ctx, &id, title, content, category, tags, clear_tags),
            MemoCommands::Pin { id, toggle } => handle_pin(&mut ctx, &id, toggle),
            MemoCommands::Unpin { id } => {
                let result = ctx.api.unpin_memo(&id)?;
                print_messages(&result.messages);
                Ok(())
            }
            MemoCommands::Delete { ids } => {
                let result = ctx.api.delete_memos(&ids)?;
                print_messages(&result.messages);
                Ok(())
            }
            MemoCommands::Archive { ids } => {
                let result = ctx.api.archive_memos(&ids)?;
                print_messages(&result.messages);
                Ok(())
            }
            MemoCommands::Restore { id, archived } => handle_restore(&mut ctx, &id, archived),
            MemoCommands::Copy { id } => handle_copy(&mut ctx, &id),
        },
        Some(Commands::Data(cmd)) => match cmd {
            DataCommands::Trash => {
                let result = ctx.api.list_trash()?;
                print_trash(&result.trashed);
                Ok(())
            }
            DataCommands::Purge { id } => {
                let result = ctx.api.purge_trash(&id)?;
                print_messages(&result.messages);
                Ok(())
            }
            DataCommands::EmptyTrash { yes } => handle_empty_trash(&mut ctx, yes),
            DataCommands::Export {
                format,
                output,
                ids,
            } => handle_export(&mut ctx, &format, output, &ids),
            DataCommands::Import { file } => handle_import(&mut ctx, &file),
            DataCommands::Print {
                output,
                ids,
                filters,
            } => handle_print(&mut ctx, output, &ids, &filters),
        },
        Some(Commands::Share(cmd)) => match cmd {
            ShareCommands::Share { id, expires, email } => {
                handle_share(&mut ctx, &id, expires, email)
            }
            ShareCommands::OpenShare { share } => handle_open_share(&mut ctx, &share),
            ShareCommands::Shares { cleanup } => handle_shares(&mut ctx, cleanup),
            ShareCommands::Unshare { share } => {
                let result = ctx.api.revoke_share(&share)?;
                print_messages(&result.messages);
                Ok(())
            }
        },
        Some(Commands::Misc(cmd)) => match cmd {
            MiscCommands::Stats => handle_stats(&mut ctx),
            MiscCommands::Config { key, value } => handle_config(&mut ctx, key, value),
        },
        None => handle_list(&mut ctx, None, &ListArgs::default()),
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "memoz=debug" } else { "memoz=warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli.data_dir.clone())?;
    tracing::debug!(dir = %data_dir.display(), "using data directory");

    let config = MemozConfig::load(&data_dir).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "unreadable config, using defaults");
        MemozConfig::default()
    });
    let api = MemozApi::new(FileStore::new(&data_dir));

    Ok(AppContext {
        api,
        data_dir,
        config,
    })
}

fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "memoz", "memoz")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            MemozError::PlatformUnavailable(format!(
                "Could not determine a data directory; set {} or pass --data-dir",
                HOME_ENV
            ))
        })
}

/// The list query from command-line filters, falling back to configured
/// ordering.
fn build_query(ctx: &AppContext, search: Option<String>, args: &ListArgs) -> Result<MemoQuery> {
    let category = match &args.category {
        Some(c) => c.parse::<CategoryFilter>().map_err(MemozError::Validation)?,
        None => CategoryFilter::All,
    };
    let sort_field = match &args.sort {
        Some(s) => s.parse().map_err(MemozError::Validation)?,
        None => ctx.config.default_sort,
    };
    let direction = if args.asc {
        SortDirection::Asc
    } else if args.desc {
        SortDirection::Desc
    } else {
        ctx.config.default_direction
    };

    Ok(MemoQuery {
        search: search.unwrap_or_default(),
        category,
        tag: args.tag.clone().unwrap_or_default(),
        sort_field,
        direction,
    })
}

fn parse_category(input: &str) -> Result<Category> {
    input.parse().map_err(MemozError::Validation)
}

fn read_stdin() -> Result<Option<String>> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }
    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(Some(buffer.trim_end().to_string()))
}

fn handle_create(
    ctx: &mut AppContext,
    title: Option<String>,
    content: Option<String>,
    category: Option<String>,
    tags: Vec<String>,
    pin: bool,
) -> Result<()> {
    let content = match content {
        Some(content) => content,
        None => read_stdin()?.unwrap_or_default(),
    };

    let mut draft = NewMemo::new(title.unwrap_or_default(), content).with_tags(tags);
    if let Some(category) = category {
        draft = draft.with_category(parse_category(&category)?);
    }
    if pin {
        draft = draft.pinned();
    }

    let result = ctx.api.create_memo(draft)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_create_from_template(
    ctx: &mut AppContext,
    template: &str,
    title: Option<String>,
    pin: bool,
) -> Result<()> {
    let result = ctx.api.create_from_template(template, title, pin)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &mut AppContext, search: Option<String>, args: &ListArgs) -> Result<()> {
    let query = build_query(ctx, search, args)?;
    let result = ctx.api.list_memos(&query)?;
    if query.search.trim().is_empty() {
        print_memos(&result.listed_memos);
    } else {
        print_search_results(&result.listed_memos, &query.search);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(ctx: &mut AppContext, text: &str, args: &ListArgs) -> Result<()> {
    let query = build_query(ctx, None, args)?;
    let result = ctx.api.search_memos(text, &query)?;
    // Highlight the first positive term or phrase.
    let parsed = memoz::search::parse_query(text);
    let term = parsed
        .exact
        .first()
        .or(parsed.terms.first())
        .cloned()
        .unwrap_or_default();
    print_search_results(&result.listed_memos, &term);
    Ok(())
}

fn handle_archive_list(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.list_archive()?;
    print_archive(&result.archived);
    Ok(())
}

fn handle_view(ctx: &mut AppContext, id: &str) -> Result<()> {
    let result = ctx.api.view_memo(id)?;
    for memo in &result.listed_memos {
        print_full_memo(memo);
    }
    Ok(())
}

fn handle_edit(
    ctx: &mut AppContext,
    id: &str,
    title: Option<String>,
    content: Option<String>,
    category: Option<String>,
    tags: Vec<String>,
    clear_tags: bool,
) -> Result<()> {
    let category = match category.as_deref() {
        None => None,
        Some("none") => Some(None),
        Some(c) => Some(Some(parse_category(c)?)),
    };
    let tags = if clear_tags {
        Some(Vec::new())
    } else if tags.is_empty() {
        None
    } else {
        Some(tags)
    };

    let patch = MemoPatch {
        title,
        content,
        category,
        tags,
        is_pinned: None,
    };
    if patch.is_empty() {
        println!("Nothing to change.");
        return Ok(());
    }

    let result = ctx.api.update_memo(id, &patch)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_pin(ctx: &mut AppContext, id: &str, toggle: bool) -> Result<()> {
    let result = if toggle {
        ctx.api.toggle_pin(id)?
    } else {
        ctx.api.pin_memo(id)?
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_restore(ctx: &mut AppContext, id: &str, archived: bool) -> Result<()> {
    let result = if archived {
        ctx.api.restore_from_archive(id)?
    } else {
        ctx.api.restore_from_trash(id)?
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_copy(ctx: &mut AppContext, id: &str) -> Result<()> {
    let result = ctx.api.view_memo(id)?;
    for memo in &result.listed_memos {
        let text = format_for_clipboard(memo);
        match copy_to_clipboard(&text) {
            Ok(()) => println!("Copied to clipboard: {}", memo.title),
            Err(MemozError::PlatformUnavailable(reason)) => {
                eprintln!("Warning: {}", reason);
                println!("{}", text);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

fn handle_empty_trash(ctx: &mut AppContext, yes: bool) -> Result<()> {
    if !yes {
        let count = ctx.api.list_trash()?.trashed.len();
        if count == 0 {
            println!("Trash is already empty.");
            return Ok(());
        }
        println!(
            "This permanently deletes {} memo(s). Re-run with --yes to confirm.",
            count
        );
        return Ok(());
    }
    let result = ctx.api.empty_trash()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(
    ctx: &mut AppContext,
    format: &str,
    output: Option<PathBuf>,
    ids: &[String],
) -> Result<()> {
    let format: ExportFormat = format.parse().map_err(MemozError::Validation)?;
    let doc = ctx.api.export_memos(format, ids)?;

    let dir = output.unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(&doc.filename);
    std::fs::write(&path, &doc.content)?;

    println!(
        "Exported {} memo(s) to {}",
        doc.memo_count,
        path.display()
    );
    Ok(())
}

fn handle_import(ctx: &mut AppContext, file: &Path) -> Result<()> {
    let document = std::fs::read_to_string(file)?;
    let result = ctx.api.import_memos(&document)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_print(
    ctx: &mut AppContext,
    output: Option<PathBuf>,
    ids: &[String],
    args: &ListArgs,
) -> Result<()> {
    let query = build_query(ctx, None, args)?;
    let html = ctx.api.print_memos(&query, ids)?;
    match output {
        Some(path) => {
            std::fs::write(&path, html)?;
            println!("Printable page written to {}", path.display());
        }
        None => println!("{}", html),
    }
    Ok(())
}

fn handle_share(ctx: &mut AppContext, id: &str, expires: Option<i64>, email: bool) -> Result<()> {
    let expires = expires.or(ctx.config.share_expiry_days);
    let result = ctx.api.share_memo(id, expires)?;
    print_messages(&result.messages);
    if email {
        for share in &result.shares {
            println!("{}", email_share_link(&share.memo));
        }
    }
    Ok(())
}

fn handle_open_share(ctx: &mut AppContext, share: &str) -> Result<()> {
    let result = ctx.api.open_share(share)?;
    for share in &result.shares {
        print_full_memo(&share.memo);
        println!("Viewed {} time(s)", share.access_count);
    }
    Ok(())
}

fn handle_shares(ctx: &mut AppContext, cleanup: bool) -> Result<()> {
    if cleanup {
        let result = ctx.api.cleanup_shares()?;
        print_messages(&result.messages);
    }
    let result = ctx.api.list_shares()?;
    print_shares(&result.shares);
    Ok(())
}

fn handle_stats(ctx: &mut AppContext) -> Result<()> {
    let statistics = ctx.api.statistics()?;
    let insights = stats::insights(&statistics);
    print_statistics(&statistics, &insights);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    match (key, value) {
        (None, _) => {
            for key in MemozConfig::KEYS {
                println!("{} = {}", key, ctx.config.get(key)?);
            }
        }
        (Some(key), None) => println!("{} = {}", key, ctx.config.get(&key)?),
        (Some(key), Some(value)) => {
            ctx.config.set(&key, &value)?;
            ctx.config.save(&ctx.data_dir)?;
            println!("{} = {}", key, ctx.config.get(&key)?);
        }
    }
    Ok(())
}
