mod manifest;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use polymorph_selector::{Selection, SelectorConfig, TypeSelector};

/// Preview the type selection menu for a polymorphic field.
#[derive(Parser, Debug)]
#[command(
    name = "polymorph",
    about = "Preview type selection menus built from a type manifest",
    long_about = "Loads a TOML type manifest, collects every concrete type assignable to \
        --base and prints the folder-organized selection menu.\n\n\
        EXAMPLES:\n\
          # Print the menu outline\n\
          polymorph types.toml --base Game.IEffect\n\
        \n\
          # Search item labels\n\
          polymorph types.toml --base Game.IEffect --search spark\n\
        \n\
          # Resolve a menu path\n\
          polymorph types.toml --base Game.IEffect --select Game/Fx/Spark",
    version
)]
struct Args {
    /// Type manifest (TOML).
    manifest: PathBuf,

    /// Full name of the field's declared type.
    #[arg(long)]
    base: String,

    /// Selector config (TOML). Replaces the manifest's [selector] table.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the menu title.
    #[arg(long)]
    title: Option<String>,

    /// List candidate types by full name instead of printing the menu.
    #[arg(long, conflicts_with_all = ["search", "select"])]
    candidates: bool,

    /// Search item labels (all words must match).
    #[arg(long, conflicts_with = "select")]
    search: Option<String>,

    /// Resolve a menu path such as `Game/Fx/Spark`.
    #[arg(long)]
    select: Option<String>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), String> {
    let manifest = manifest::load_manifest(&args.manifest)?;

    let mut config = match &args.config {
        Some(path) => SelectorConfig::load(path).map_err(|e| e.to_string())?,
        None => manifest.selector.clone().unwrap_or_default(),
    };
    manifest.apply_opaque_roots(&mut config);
    if let Some(title) = args.title {
        config.title = title;
    }

    let catalog = manifest::build_catalog(&manifest).map_err(|e| e.to_string())?;
    let selector = TypeSelector::for_type(Arc::new(catalog), &args.base, config)
        .map_err(|e| e.to_string())?;

    if args.candidates {
        for key in selector.candidates() {
            println!("{}", selector.catalog().full_name(key).unwrap_or("?"));
        }
        return Ok(());
    }

    let menu = selector.menu();

    if let Some(query) = &args.search {
        let hits = menu.search(query);
        if hits.is_empty() {
            println!("no matches for \"{query}\"");
        }
        for id in hits {
            let disabled = menu.entry(id).is_some_and(|e| !e.is_enabled());
            let suffix = if disabled { " (disabled)" } else { "" };
            println!("{}{suffix}", menu.path_of(id).join("/"));
        }
        return Ok(());
    }

    if let Some(path) = &args.select {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        return match selector.select_path(&segments) {
            Some(Selection::Null) => {
                println!("{}", selector.label_for(None));
                Ok(())
            }
            Some(Selection::Type(key)) => {
                println!("{}", selector.catalog().full_name(key).unwrap_or("?"));
                Ok(())
            }
            None => Err(format!("\"{path}\" is not a selectable menu item")),
        };
    }

    print!("{menu}");
    Ok(())
}
