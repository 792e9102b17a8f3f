fn main() {
    if let Err(e) = country_atlas::run_app() {
        tracing::error!("Country Atlas failed to start: {}", e);
        std::process::exit(1);
    }
}
