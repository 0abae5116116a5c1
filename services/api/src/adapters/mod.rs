pub mod db;
pub mod gemini;
mod google;
pub mod memory;
pub mod translate;

pub use db::DbAdapter;
pub use gemini::GeminiAdapter;
pub use memory::InMemoryUserStore;
pub use translate::GoogleTranslateAdapter;
