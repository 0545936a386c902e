use kanban_board::config::Config;
use kanban_board::domain::KanbanError;
use kanban_board::infrastructure::{db, StateStore, STORAGE_KEY};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    let pool = db::init_db(&config.database_url).await?;

    let journal_mode = db::journal_mode(&pool).await?;
    println!("Database: {} (journal mode {})", config.database_url, journal_mode);

    let store = StateStore::new(pool);
    let expected_columns = config.board_layout().columns.len();
    let board = match store.peek_board(expected_columns).await {
        Ok(Some(board)) => board,
        Ok(None) => {
            println!("No board stored under '{}'", STORAGE_KEY);
            return Ok(());
        }
        Err(KanbanError::CorruptState(reason)) => {
            println!("Stored board is unusable: {}", reason);
            if let Some(raw) = store.get_item(STORAGE_KEY).await? {
                println!("Raw record:\n{}", raw);
            }
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("Locked: {}", board.locked);
    for column in &board.columns {
        let capacity = column
            .max_cards
            .map(|max| max.to_string())
            .unwrap_or_else(|| "∞".into());
        println!("{} [{}/{}]", column.name, column.cards.len(), capacity);

        for card in &column.cards {
            let status = card
                .status
                .map(|s| format!(" ({:?})", s))
                .unwrap_or_default();
            println!(
                "  - {}{} [{}/{} items]",
                card.title,
                status,
                card.completed_items(),
                card.items.len()
            );
        }
    }

    Ok(())
}
