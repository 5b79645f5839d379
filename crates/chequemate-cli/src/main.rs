mod command;
mod config;
mod pipeline;
mod util;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    command::run()
}
