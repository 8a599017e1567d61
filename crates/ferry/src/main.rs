use ferry::runtime::{boot, run};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Basic tracing until the configured subscriber can be installed
    let basic_tracing = boot::init_logging_basic();
    let config = boot::boot()?;
    drop(basic_tracing);
    boot::init_logging(&config.logging);

    run::run(config)?;
    Ok(())
}
