use std::process::ExitCode;

use tracing::{error, info};

use boardtree::hierarchy::{build_hierarchy, flatten};
use boardtree::{BoardRepository, BoardTreeError, Config, MemoryBoardRepository};

fn run(config: &Config) -> boardtree::Result<()> {
    config.validate()?;

    let repo = MemoryBoardRepository::load_snapshot(&config.boards.snapshot)?;
    let boards = repo
        .list_all()
        .map_err(|e| BoardTreeError::Admin(e.into()))?;
    let forest = build_hierarchy(&boards);

    info!(
        "Loaded {} board(s), {} root(s) from {}",
        forest.len(),
        forest.root_count(),
        config.boards.snapshot
    );

    for row in flatten(&forest) {
        let mark = match (row.is_first_sibling, row.is_last_sibling) {
            (true, true) => "-",
            (true, false) => "┌",
            (false, true) => "└",
            (false, false) => "├",
        };
        let slug = row.board.slug.as_deref().unwrap_or("");
        println!(
            "{}{} {} [{}] #{} ({})",
            "  ".repeat(row.level),
            mark,
            row.board.name,
            slug,
            row.board.id,
            row.board.display_order
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    // Load configuration
    let config = match Config::load_with_env(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {path}: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = boardtree::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        boardtree::logging::init_console_only(&config.logging.level);
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("boardtree: {e}");
            ExitCode::FAILURE
        }
    }
}
