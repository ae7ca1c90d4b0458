use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::clock::SystemClock;
use crate::config::Config;
use crate::entity::{Note, NoteUpdate};
use crate::error::{NotasError, Result};
use crate::format::{format_date, Locale};
use crate::storage::{FileStorage, NoteStore, Persistence};

const PREVIEW_CHARS: usize = 60;

/// Settings shared by every command
pub struct Context {
    pub config: Config,
    data_dir: Option<PathBuf>,
}

impl Context {
    pub fn load(config_path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<Self> {
        let config = Config::load(config_path)?;
        Ok(Self { config, data_dir })
    }

    fn locale(&self) -> Locale {
        self.config.locale
    }

    fn open_store(&self) -> Result<NoteStore> {
        let dir = self.config.resolve_data_dir(self.data_dir.as_deref())?;
        tracing::debug!(dir = %dir.display(), "opening note store");
        NoteStore::open(Persistence::with_storage(FileStorage::new(dir)), SystemClock)
    }
}

fn read_stdin() -> Result<String> {
    let mut content = String::new();
    io::stdin().read_to_string(&mut content)?;
    Ok(content)
}

fn content_arg(content: Option<String>, stdin: bool) -> Result<Option<String>> {
    if stdin {
        Ok(Some(read_stdin()?))
    } else {
        Ok(content)
    }
}

/// First line of the content, shortened for list output
fn preview(content: &str) -> Option<String> {
    let line = content.lines().find(|l| !l.trim().is_empty())?.trim();
    if line.chars().count() > PREVIEW_CHARS {
        let cut: String = line.chars().take(PREVIEW_CHARS).collect();
        Some(format!("{}…", cut))
    } else {
        Some(line.to_string())
    }
}

fn print_note(note: &Note, locale: Locale) {
    println!("{}", note.title);
    println!("  id:      {}", note.id);
    println!("  created: {}", format_date(note.created_at, locale));
    println!("  updated: {}", format_date(note.updated_at, locale));
    if !note.content.is_empty() {
        println!();
        println!("{}", note.content);
    }
}

pub fn handle_new(
    ctx: &Context,
    title: Option<String>,
    content: Option<String>,
    stdin: bool,
    json: bool,
) -> Result<()> {
    let fields = NoteUpdate {
        title,
        content: content_arg(content, stdin)?,
    };

    let mut store = ctx.open_store()?;
    let note = store.create_with(fields)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        println!("Created note {} - {}", note.id, note.title);
    }

    Ok(())
}

pub fn handle_edit(
    ctx: &Context,
    id: String,
    title: Option<String>,
    content: Option<String>,
    stdin: bool,
    json: bool,
) -> Result<()> {
    let updates = NoteUpdate {
        title,
        content: content_arg(content, stdin)?,
    };
    if updates.is_empty() {
        eprintln!("Nothing to change: pass --title, --content or --stdin");
        return Ok(());
    }

    let mut store = ctx.open_store()?;
    if !store.update(&id, updates)? {
        println!("No note with id {}; nothing changed", id);
        return Ok(());
    }

    let note = store
        .get(&id)
        .ok_or_else(|| NotasError::NoteNotFound(id.clone()))?;
    if json {
        println!("{}", serde_json::to_string_pretty(note)?);
    } else {
        println!("Updated note {} - {}", note.id, note.title);
    }

    Ok(())
}

pub fn handle_delete(ctx: &Context, id: String) -> Result<()> {
    let mut store = ctx.open_store()?;

    match store.delete(&id)? {
        Some(note) => println!("Deleted note {} - {}", note.id, note.title),
        None => println!("No note with id {}; nothing deleted", id),
    }

    Ok(())
}

pub fn handle_show(ctx: &Context, id: String, json: bool) -> Result<()> {
    let store = ctx.open_store()?;
    let note = store.get(&id).ok_or(NotasError::NoteNotFound(id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(note)?);
    } else {
        print_note(note, ctx.locale());
    }

    Ok(())
}

pub fn handle_list(ctx: &Context, json: bool) -> Result<()> {
    let store = ctx.open_store()?;
    let notes = store.notes();

    if json {
        println!("{}", serde_json::to_string_pretty(notes)?);
    } else if notes.is_empty() {
        println!("No notes found.");
    } else {
        println!("Notes:\n");
        for n in notes {
            println!(
                "  {}  {}  ({})",
                n.id,
                n.title,
                format_date(n.updated_at, ctx.locale())
            );
            if let Some(line) = preview(&n.content) {
                println!("      {}", line);
            }
        }
    }

    Ok(())
}

fn emit(contents: &str, out: Option<PathBuf>) -> Result<()> {
    match out {
        Some(path) => {
            fs::write(&path, format!("{}\n", contents))?;
            println!("Wrote {}", path.display());
        }
        None => println!("{}", contents),
    }
    Ok(())
}

pub fn handle_pwa_manifest(ctx: &Context, out: Option<PathBuf>) -> Result<()> {
    ctx.config.pwa.validate()?;
    emit(&ctx.config.pwa.manifest_json()?, out)
}

pub fn handle_pwa_workbox(ctx: &Context, out: Option<PathBuf>) -> Result<()> {
    ctx.config.pwa.validate()?;
    emit(&ctx.config.pwa.workbox_json()?, out)
}

pub fn handle_pwa_check(ctx: &Context) -> Result<()> {
    ctx.config.pwa.validate()?;

    let workbox = &ctx.config.pwa.workbox;
    println!("PWA configuration OK");
    println!("  manifest: {}", ctx.config.pwa.manifest.name);
    for rule in &workbox.runtime_caching {
        println!(
            "  cache {}: {} for {}",
            rule.options.cache_name, rule.handler, rule.url_pattern
        );
    }

    Ok(())
}
