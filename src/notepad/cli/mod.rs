//! Command-line client.
//!
//! Each invocation loads the saved notes, runs one command through [`NotepadApi`] and, for
//! commands that change the notepad, saves at the end when autosave is on (or `--save` is
//! given). Surfaces are headless [`MemorySurfaces`].

mod print;
mod setup;

use chrono::Utc;
use clap::Parser;
use directories::ProjectDirs;
use notepad::api::{AlwaysConfirm, ConfigAction, Confirm, ExportFormat, NotepadApi};
use notepad::config::{parse_on_off, NotepadConfig, CONFIG_KEYS};
use notepad::editor::{FormatCommand, MemorySurfaces};
use notepad::error::{NotepadError, Result};
use notepad::model::PageId;
use notepad::store::fs::FsBackend;
use notepad::text;
use print::{print_messages, print_page, print_pages};
use setup::{Cli, Commands};
use std::fs::{self, File};
use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "NOTEPAD_LOG";

struct AppContext {
    api: NotepadApi<FsBackend, MemorySurfaces>,
    data_dir: PathBuf,
    config: NotepadConfig,
    assume_yes: bool,
}

impl AppContext {
    fn confirmer(&self) -> Box<dyn Confirm> {
        if self.assume_yes {
            Box::new(AlwaysConfirm)
        } else {
            Box::new(prompt)
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let mut ctx = init_context(&cli)?;

    let changed = match cli.command {
        Some(Commands::List) | None => handle_list(&ctx)?,
        Some(Commands::New) => handle_new(&mut ctx)?,
        Some(Commands::Switch { id }) => handle_switch(&mut ctx, id)?,
        Some(Commands::Show { id, raw }) => handle_show(&ctx, id, raw)?,
        Some(Commands::Write { id, content }) => handle_write(&mut ctx, id, &content)?,
        Some(Commands::Rename { id, name }) => handle_rename(&mut ctx, id, &name)?,
        Some(Commands::Delete { id }) => handle_delete(&mut ctx, id)?,
        Some(Commands::Clear) => handle_clear(&mut ctx)?,
        Some(Commands::Format {
            command,
            value,
            from,
            to,
        }) => handle_format(&mut ctx, &command, value.as_deref(), from, to)?,
        Some(Commands::Export { format, output }) => handle_export(&ctx, format.into(), output)?,
        Some(Commands::Save) => handle_save(&mut ctx)?,
        Some(Commands::Autosave { state }) => handle_autosave(&mut ctx, &state)?,
        Some(Commands::Reset) => handle_reset(&mut ctx)?,
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value)?,
    };

    if changed && (cli.save || ctx.api.auto_save()) {
        let result = ctx.api.save(Utc::now())?;
        debug!(saved_at = ?result.saved_at, "saved on exit");
        if cli.save {
            print_messages(&result.messages);
        }
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();
    // A subscriber installed by an embedding test harness wins.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match &cli.dir {
        Some(dir) => dir.clone(),
        None => ProjectDirs::from("com", "notepad", "notepad")
            .ok_or_else(|| NotepadError::Api("Could not determine data dir".to_string()))?
            .data_dir()
            .to_path_buf(),
    };
    debug!(dir = %data_dir.display(), "data dir");

    let config = NotepadConfig::load(&data_dir)?;
    let mut api = NotepadApi::new(FsBackend::new(data_dir.clone()), MemorySurfaces::new())
        .with_config(&config);

    let loaded = api.load()?;
    print_messages(&loaded.messages);

    Ok(AppContext {
        api,
        data_dir,
        config,
        assume_yes: cli.yes,
    })
}

fn prompt(question: &str) -> bool {
    print!("{} [y/N] ", question);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn handle_list(ctx: &AppContext) -> Result<bool> {
    let result = ctx.api.status()?;
    print_pages(&result.listed_pages, result.char_count, result.saved_at);
    print_messages(&result.messages);
    Ok(false)
}

fn handle_new(ctx: &mut AppContext) -> Result<bool> {
    let result = ctx.api.create_page()?;
    print_messages(&result.messages);
    Ok(true)
}

fn handle_switch(ctx: &mut AppContext, id: PageId) -> Result<bool> {
    let result = ctx.api.switch_to(id)?;
    if let Some(page) = result.affected_pages.first() {
        println!("Switched to {}", page.name);
    }
    print_messages(&result.messages);
    Ok(true)
}

fn handle_show(ctx: &AppContext, id: Option<PageId>, raw: bool) -> Result<bool> {
    let pages = ctx.api.pages();
    let id = id.unwrap_or_else(|| pages.current());
    let page = pages.get(id).ok_or(NotepadError::UnknownPage(id))?;
    let markup = ctx
        .api
        .editors()
        .read(id)
        .unwrap_or_else(|| page.content.clone());

    if raw {
        print_page(&page.name, &markup);
    } else {
        print_page(&page.name, &text::plain_text(&markup));
    }
    Ok(false)
}

fn handle_write(ctx: &mut AppContext, id: PageId, content: &str) -> Result<bool> {
    let result = ctx.api.write_page(id, content)?;
    print_messages(&result.messages);
    if let Some(count) = result.char_count {
        println!("{} characters", count);
    }
    Ok(true)
}

fn handle_rename(ctx: &mut AppContext, id: PageId, name: &str) -> Result<bool> {
    let result = ctx.api.rename_page(id, name)?;
    print_messages(&result.messages);
    Ok(true)
}

fn handle_delete(ctx: &mut AppContext, id: PageId) -> Result<bool> {
    let mut confirm = ctx.confirmer();
    let result = ctx.api.delete_page(id, confirm.as_mut())?;
    print_messages(&result.messages);
    Ok(!result.affected_pages.is_empty())
}

fn handle_clear(ctx: &mut AppContext) -> Result<bool> {
    let mut confirm = ctx.confirmer();
    let result = ctx.api.clear_page(confirm.as_mut())?;
    print_messages(&result.messages);
    Ok(!result.affected_pages.is_empty())
}

fn handle_format(
    ctx: &mut AppContext,
    name: &str,
    value: Option<&str>,
    from: Option<usize>,
    to: Option<usize>,
) -> Result<bool> {
    let command = FormatCommand::parse(name, value)?;
    let id = ctx.api.pages().current();
    let len = ctx
        .api
        .editors()
        .read(id)
        .map(|markup| text::text_len(&markup))
        .unwrap_or(0);
    let range = from.unwrap_or(0)..to.unwrap_or(len);

    if !ctx.api.host_mut().select(id, range.clone()) {
        return Err(NotepadError::Api(format!(
            "Cannot select characters {}..{} of page {} ({} characters)",
            range.start, range.end, id, len
        )));
    }

    let result = ctx.api.format(&command)?;
    print_messages(&result.messages);
    println!("Applied {} to page {}", command, id);
    Ok(true)
}

fn handle_export(ctx: &AppContext, format: ExportFormat, output: Option<PathBuf>) -> Result<bool> {
    let path = match output {
        Some(path) if path.is_dir() => path.join(format.file_name()),
        Some(path) => path,
        None => ctx
            .config
            .export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(format.file_name()),
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(NotepadError::Io)?;
        }
    }

    let file = File::create(&path).map_err(NotepadError::Io)?;
    let result = ctx.api.export(format, BufWriter::new(file), Utc::now())?;
    print_messages(&result.messages);
    println!("{}", path.display());
    Ok(false)
}

fn handle_save(ctx: &mut AppContext) -> Result<bool> {
    let result = ctx.api.save(Utc::now())?;
    print_messages(&result.messages);
    Ok(false)
}

fn handle_autosave(ctx: &mut AppContext, state: &str) -> Result<bool> {
    let on = parse_on_off(state)
        .ok_or_else(|| NotepadError::Api(format!("autosave expects on or off, got {}", state)))?;
    let result = ctx.api.set_auto_save(on);
    ctx.config.auto_save = on;
    ctx.config.save(&ctx.data_dir)?;
    print_messages(&result.messages);
    Ok(false)
}

fn handle_reset(ctx: &mut AppContext) -> Result<bool> {
    let mut confirm = ctx.confirmer();
    let result = ctx.api.reset(confirm.as_mut())?;
    print_messages(&result.messages);
    Ok(false)
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<bool> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(&ctx.data_dir, action)?;
    print_messages(&result.messages);

    if show_all {
        if let Some(config) = &result.config {
            for key in CONFIG_KEYS {
                println!("{} = {}", key, config.get(key).unwrap_or_default());
            }
        }
    }
    Ok(false)
}
