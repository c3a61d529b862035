use clap::Parser;
use env_logger::Env;
use unit_quiz::Config;

#[actix_web::main]
async fn main() {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::parse();

    if let Err(e) = unit_quiz::run(config).await {
        log::error!("Error running quiz server: {}", e);
        std::process::exit(1);
    }
}
