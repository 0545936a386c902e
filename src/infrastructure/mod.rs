pub mod db;
pub mod storage;

pub use storage::{StateStore, STORAGE_KEY};
