pub mod gemini_llm;
pub mod memory_store;

pub use gemini_llm::GeminiAnalysisAdapter;
pub use memory_store::MemoryUserStore;
