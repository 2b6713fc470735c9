mod config;
mod media;
mod runtime;
mod session;
mod track;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
