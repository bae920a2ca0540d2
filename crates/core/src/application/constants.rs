// Executor constants (no magic values)

/// Tokens requested per `infer` call unless the request says otherwise
pub const DEFAULT_PREDICT_LIMIT: i64 = 128;

/// Tokenizer binary expected next to the inference executable
/// (platform executable suffix is appended at lookup time)
pub const TOKENIZER_BINARY_NAME: &str = "llama-tokenize";

/// Child-process flags understood by llama.cpp tools
pub const MODEL_FLAG: &str = "-m";
pub const PROMPT_FLAG: &str = "-p";
pub const PREDICT_FLAG: &str = "-n";
