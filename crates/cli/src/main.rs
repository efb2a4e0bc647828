//! LLM Leaderboard CLI entry point.

fn main() {
    if let Err(e) = llm_leaderboard_cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
